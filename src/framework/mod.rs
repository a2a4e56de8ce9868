//! Generic polling framework.
//!
//! This module provides the building blocks shared by every poller: the
//! [`PollSource`] contract, the [`Poller`] task that schedules cycles and
//! publishes snapshots, and the [`SnapshotReader`] handed to consumers.
//!
//! # Main Components
//!
//! - [`PollSource`] - Trait a polled resource implements (one fetch per call)
//! - [`Poller`] - Generic scheduler and single writer of the snapshot cell
//! - [`SnapshotReader`] - Read accessor for the latest [`Snapshot`]
//! - [`PollError`] - Framework errors
//!
//! # Testing
//!
//! See [`mock`] for a scripted source that drives a poller without a network.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
