//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments and environment variables.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API client configuration section
    #[serde(default)]
    pub client: ClientSection,

    /// Webhook verification section
    #[serde(default)]
    pub webhook: WebhookSection,

    /// Logging section
    #[serde(default)]
    pub logging: LoggingSection,
}

/// API client configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// API key sent in `X-Kepster-Key`
    pub api_key: Option<String>,

    /// API base URL
    pub base_url: Option<String>,

    /// Read timeout in seconds
    pub timeout: Option<u64>,

    /// Connect timeout in seconds
    pub open_timeout: Option<u64>,

    /// Custom `User-Agent` header value
    pub user_agent: Option<String>,

    /// Machine token sent in `X-Machine-Token`
    pub machine_token: Option<String>,
}

/// Webhook verification section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Shared HMAC secret
    pub secret: Option<String>,
}

/// Logging section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Emit request/response events
    pub enabled: Option<bool>,

    /// Minimum level: debug, info, warn, error
    pub level: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# xkepster configuration file
#
# Values can also come from environment variables (XKEPSTER_*) or CLI flags.
# Priority: CLI flags > environment > this file > built-in defaults.

[client]
# API key (env: XKEPSTER_API_KEY)
# api_key = "xk_live_..."

# API base URL (default: https://api.xkepster.com, env: XKEPSTER_BASE_URL)
# base_url = "https://api.xkepster.com"

# Read timeout in seconds (default: 30, env: XKEPSTER_TIMEOUT)
# timeout = 30

# Connect timeout in seconds (default: 5, env: XKEPSTER_OPEN_TIMEOUT)
# open_timeout = 5

# Custom User-Agent header
# user_agent = "my-app/1.0"

# Machine token sent as X-Machine-Token (env: XKEPSTER_MACHINE_TOKEN)
# machine_token = "..."

[webhook]
# Shared secret for X-Webhook-Signature verification (env: XKEPSTER_WEBHOOK_SECRET)
# secret = "..."

[logging]
# Emit request/response log events (default: false, env: XKEPSTER_LOGGING_ENABLED)
# enabled = false

# Minimum level: debug, info, warn, error (default: info, env: XKEPSTER_LOG_LEVEL)
# level = "info"
"#
    .to_string()
}
