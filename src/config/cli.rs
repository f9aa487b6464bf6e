//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.
//! Connection options can also be supplied through `XKEPSTER_*`
//! environment variables.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::client::Method;
use crate::webhook::WebhookEventType;

use super::LogLevel;

/// xkepster: command-line client for the Kepster identity API
///
/// Sends JSON:API requests and verifies webhook deliveries.
#[derive(Debug, Parser)]
#[command(name = "xkepster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// API key
    #[arg(long = "api-key", global = true, env = "XKEPSTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long = "base-url", global = true, env = "XKEPSTER_BASE_URL")]
    pub base_url: Option<String>,

    /// Read timeout in seconds
    #[arg(long, global = true, env = "XKEPSTER_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Connect timeout in seconds
    #[arg(long = "open-timeout", global = true, env = "XKEPSTER_OPEN_TIMEOUT")]
    pub open_timeout: Option<u64>,

    /// Machine token sent as X-Machine-Token
    #[arg(
        long = "machine-token",
        global = true,
        env = "XKEPSTER_MACHINE_TOKEN",
        hide_env_values = true
    )]
    pub machine_token: Option<String>,

    /// Shared secret for webhook signatures
    #[arg(
        long = "webhook-secret",
        global = true,
        env = "XKEPSTER_WEBHOOK_SECRET",
        hide_env_values = true
    )]
    pub webhook_secret: Option<String>,

    /// Emit request/response log events (true/false)
    #[arg(long = "logging", global = true, env = "XKEPSTER_LOGGING_ENABLED", value_name = "BOOL")]
    pub logging_enabled: Option<bool>,

    /// Minimum log level
    #[arg(long = "log-level", value_enum, global = true, env = "XKEPSTER_LOG_LEVEL")]
    pub log_level: Option<LogLevelArg>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (forces request logging at debug level)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for xkepster
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "xkepster.toml")]
        output: PathBuf,
    },

    /// Send a single request and print the JSON response
    Request {
        /// HTTP method
        #[arg(value_enum)]
        method: MethodArg,

        /// Resource path relative to the base URL, e.g. `users/42`
        path: String,

        /// JSON request body
        #[arg(long)]
        body: Option<String>,

        /// Query parameter in 'key=value' form (can be specified multiple times)
        #[arg(long = "param", value_name = "K=V")]
        params: Vec<String>,

        /// Extra header in 'Key=Value' or 'Key: Value' form (can be specified multiple times)
        #[arg(long = "header", value_name = "K=V")]
        headers: Vec<String>,
    },

    /// Verify a webhook delivery and print the parsed event
    VerifyWebhook {
        /// Value of the X-Webhook-Signature header
        #[arg(long)]
        signature: String,

        /// File holding the raw request body (stdin if omitted)
        #[arg(long = "body-file")]
        body_file: Option<PathBuf>,

        /// Expected event type (X-Webhook-Event header)
        #[arg(long, value_enum)]
        event: Option<EventArg>,
    },

    /// Compute the signature for a webhook body
    SignWebhook {
        /// File holding the raw request body (stdin if omitted)
        #[arg(long = "body-file")]
        body_file: Option<PathBuf>,
    },
}

/// HTTP method argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// GET
    #[value(name = "get", alias = "GET")]
    Get,
    /// POST
    #[value(name = "post", alias = "POST")]
    Post,
    /// PATCH
    #[value(name = "patch", alias = "PATCH")]
    Patch,
    /// DELETE
    #[value(name = "delete", alias = "DELETE")]
    Delete,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Get => Self::Get,
            MethodArg::Post => Self::Post,
            MethodArg::Patch => Self::Patch,
            MethodArg::Delete => Self::Delete,
        }
    }
}

/// Webhook event type argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventArg {
    /// OTP delivery
    #[value(name = "otp")]
    Otp,
    /// Magic link delivery
    #[value(name = "magic_link", alias = "magic-link")]
    MagicLink,
}

impl From<EventArg> for WebhookEventType {
    fn from(arg: EventArg) -> Self {
        match arg {
            EventArg::Otp => Self::Otp,
            EventArg::MagicLink => Self::MagicLink,
        }
    }
}

/// Log level argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    /// Debug
    Debug,
    /// Info
    Info,
    /// Warn
    Warn,
    /// Error
    Error,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Debug => Self::Debug,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Error => Self::Error,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
