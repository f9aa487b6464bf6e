//! xkepster: client for the Kepster identity API
//!
//! A library for sending JSON:API requests to the Kepster API with typed
//! errors, and for verifying the webhooks it delivers.

pub mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod transport;
pub mod webhook;

pub use client::Client;
pub use config::{ClientConfig, LogLevel};
pub use error::{ApiFailure, Error, ErrorKind, Result};
pub use webhook::{WebhookPayload, WebhookVerifier};
