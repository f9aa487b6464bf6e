//! Configuration layer for xkepster.
//!
//! This module provides:
//! - Per-client settings ([`ClientConfig`], [`LogLevel`])
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! Library users normally build a [`ClientConfig`] directly. The merge
//! logic below only serves the binary.
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **`XKEPSTER_*` environment variables** (read by clap as CLI fallbacks)
//! 3. **TOML config file** (`--config`, or the platform config directory)
//! 4. **Built-in defaults**
//!
//! `--verbose` forces logging on at debug level regardless of other sources.

mod cli;
mod client;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command, EventArg, LogLevelArg, MethodArg};
pub use client::{ClientConfig, LogLevel};
pub use error::ConfigError;
pub use self::toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, default_config_location, write_default_config};
