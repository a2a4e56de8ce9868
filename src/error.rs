//! Errors surfaced while configuring, starting or stopping the dashboard.
//!
//! Poll cycle failures never show up here; they stay inside their cycle.

use crate::clients::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The configuration sources could not be read or deserialized.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The configuration was read but its values are unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] FetchError),

    /// A poller task ended abnormally.
    #[error("Poller task failed: {0}")]
    TaskFailed(String),
}
