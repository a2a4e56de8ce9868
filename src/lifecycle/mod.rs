//! Runtime lifecycle: configuration, startup and shutdown of the pollers, and
//! tracing setup.
//!
//! # Main Components
//!
//! - [`DashboardConfig`] - Static configuration loaded at process start
//! - [`DashboardSystem`] - Spawns both pollers and stops them again
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod config;
pub mod dashboard_system;
pub mod tracing;

pub use self::config::*;
pub use self::dashboard_system::*;
pub use self::tracing::*;
