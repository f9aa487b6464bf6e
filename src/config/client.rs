//! Per-client settings consumed by the dispatcher and the webhook verifier.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use super::ConfigError;
use super::defaults;

/// Verbosity of the client's request/response logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Everything, including request bodies
    Debug,
    /// Requests and successful responses
    #[default]
    Info,
    /// Client-side failures (3xx/4xx)
    Warn,
    /// Server failures and transport errors only
    Error,
}

impl LogLevel {
    /// Returns the equivalent `tracing` level.
    #[must_use]
    pub const fn as_tracing(self) -> tracing::Level {
        match self {
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" | "trace" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" | "fatal" => Ok(Self::Error),
            _ => Err(ConfigError::InvalidLogLevel {
                value: s.to_string(),
            }),
        }
    }
}

/// Settings for one client instance.
///
/// Built once (usually from [`Default`] plus `with_*` calls, or through
/// [`ValidatedConfig`](super::ValidatedConfig)) and then handed to
/// [`Client::new`](crate::Client::new), which freezes it behind an `Arc`.
///
/// `Debug` and `Display` never print the API key, machine token or
/// webhook secret.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use xkepster::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_api_key("xk_live_123")
///     .with_timeout(Duration::from_secs(10));
///
/// assert!(config.has_api_key());
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Key sent in the `X-Kepster-Key` header
    pub api_key: Option<String>,

    /// Base URL every request path is resolved against
    pub base_url: Url,

    /// Read timeout for a whole request
    pub timeout: Duration,

    /// Connect timeout
    pub open_timeout: Duration,

    /// `User-Agent` header value
    pub user_agent: String,

    /// Optional machine identity sent in `X-Machine-Token`
    pub machine_token: Option<String>,

    /// Shared secret for webhook signatures
    pub webhook_secret: Option<String>,

    /// Whether request/response events are emitted
    pub logging_enabled: bool,

    /// Minimum level of emitted events
    pub log_level: LogLevel,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout: defaults::timeout(),
            open_timeout: defaults::open_timeout(),
            user_agent: defaults::user_agent(),
            machine_token: None,
            webhook_secret: None,
            logging_enabled: false,
            log_level: LogLevel::default(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(defaults::BASE_URL).expect("default base URL is valid")
}

impl ClientConfig {
    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Sets the read timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub const fn with_open_timeout(mut self, open_timeout: Duration) -> Self {
        self.open_timeout = open_timeout;
        self
    }

    /// Sets the `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the machine token.
    #[must_use]
    pub fn with_machine_token(mut self, token: impl Into<String>) -> Self {
        self.machine_token = Some(token.into());
        self
    }

    /// Sets the webhook secret.
    #[must_use]
    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(secret.into());
        self
    }

    /// Enables or disables request/response logging.
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    /// Sets the log level.
    #[must_use]
    pub const fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Returns the API key if it is present and not blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    /// Returns true if a usable API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    /// Returns true if an event at `level` should be emitted.
    #[must_use]
    pub fn logs_at(&self, level: LogLevel) -> bool {
        self.logging_enabled && level >= self.log_level
    }
}

const REDACTED: &str = "[REDACTED]";

fn redacted(value: Option<&String>) -> &'static str {
    if value.is_some() { REDACTED } else { "none" }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &redacted(self.api_key.as_ref()))
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("open_timeout", &self.open_timeout)
            .field("user_agent", &self.user_agent)
            .field("machine_token", &redacted(self.machine_token.as_ref()))
            .field("webhook_secret", &redacted(self.webhook_secret.as_ref()))
            .field("logging_enabled", &self.logging_enabled)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ base_url: {}, api_key: {}, timeout: {}s, open_timeout: {}s, \
             machine_token: {}, webhook_secret: {}, logging: {} ({}) }}",
            self.base_url,
            redacted(self.api_key.as_ref()),
            self.timeout.as_secs(),
            self.open_timeout.as_secs(),
            redacted(self.machine_token.as_ref()),
            redacted(self.webhook_secret.as_ref()),
            self.logging_enabled,
            self.log_level,
        )
    }
}
