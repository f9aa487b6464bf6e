//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Default API base URL.
pub const BASE_URL: &str = "https://api.xkepster.com";

/// Default read timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default connect timeout in seconds.
pub const OPEN_TIMEOUT_SECS: u64 = 5;

/// Default log level name.
pub const LOG_LEVEL: &str = "info";

/// File name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "xkepster";

/// Default read timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default connect timeout as Duration.
#[must_use]
pub const fn open_timeout() -> Duration {
    Duration::from_secs(OPEN_TIMEOUT_SECS)
}

/// Default `User-Agent` header value.
#[must_use]
pub fn user_agent() -> String {
    format!("xkepster-rust/{}", env!("CARGO_PKG_VERSION"))
}

/// Platform location of the configuration file, e.g.
/// `~/.config/xkepster/config.toml` on Linux.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
