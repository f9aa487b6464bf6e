//! Validated configuration after merging CLI, environment and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the binary. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use super::cli::Cli;
use super::client::{ClientConfig, LogLevel};
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// Environment variables are already folded into [`Cli`] by clap.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Settings handed to the API client and webhook verifier
    pub client: ClientConfig,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} verbose: {}", self.client, self.verbose)
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (and their environment fallbacks) take precedence over
    /// TOML config values, which take precedence over built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base URL is invalid or not http(s)
    /// - A timeout is zero
    /// - The log level name is unknown
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let section = toml.map(|t| &t.client);

        let base_url = Self::resolve_base_url(cli, toml)?;

        let timeout = resolve_duration(
            "timeout",
            cli.timeout.or_else(|| section.and_then(|s| s.timeout)),
            defaults::TIMEOUT_SECS,
        )?;

        let open_timeout = resolve_duration(
            "open_timeout",
            cli.open_timeout
                .or_else(|| section.and_then(|s| s.open_timeout)),
            defaults::OPEN_TIMEOUT_SECS,
        )?;

        let log_level = Self::resolve_log_level(cli, toml)?;

        // Verbose implies logging on, even if the file disables it
        let logging_enabled = cli.verbose
            || cli
                .logging_enabled
                .or_else(|| toml.and_then(|t| t.logging.enabled))
                .unwrap_or(false);

        let mut client = ClientConfig::default()
            .with_base_url(base_url)
            .with_timeout(timeout)
            .with_open_timeout(open_timeout)
            .with_logging(logging_enabled)
            .with_log_level(if cli.verbose { LogLevel::Debug } else { log_level });

        client.api_key = cli
            .api_key
            .clone()
            .or_else(|| section.and_then(|s| s.api_key.clone()));

        client.machine_token = cli
            .machine_token
            .clone()
            .or_else(|| section.and_then(|s| s.machine_token.clone()));

        client.webhook_secret = cli
            .webhook_secret
            .clone()
            .or_else(|| toml.and_then(|t| t.webhook.secret.clone()));

        if let Some(user_agent) = section.and_then(|s| s.user_agent.clone()) {
            client.user_agent = user_agent;
        }

        Ok(Self {
            client,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and an optional config file.
    ///
    /// If `cli.config` is set, that file must exist. Otherwise the platform
    /// default location is used when a file is present there.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| defaults::config_path().filter(|p| p.is_file()));

        let toml = match path {
            Some(ref path) => Some(TomlConfig::load(path)?),
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_base_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .base_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.client.base_url.as_deref()))
            .unwrap_or(defaults::BASE_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(url)
    }

    fn resolve_log_level(cli: &Cli, toml: Option<&TomlConfig>) -> Result<LogLevel, ConfigError> {
        if let Some(level) = cli.log_level {
            return Ok(level.into());
        }

        toml.and_then(|t| t.logging.level.as_deref())
            .unwrap_or(defaults::LOG_LEVEL)
            .parse()
    }
}

fn resolve_duration(
    field: &'static str,
    seconds: Option<u64>,
    default: u64,
) -> Result<Duration, ConfigError> {
    let seconds = seconds.unwrap_or(default);

    if seconds == 0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok(Duration::from_secs(seconds))
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Returns the path `load` would fall back to, for diagnostics.
#[must_use]
pub fn default_config_location() -> Option<PathBuf> {
    defaults::config_path()
}
