//! # Ops Dashboard
//!
//! > **The polling engine behind a live operations dashboard.**
//!
//! This crate keeps two snapshots fresh for a presentation layer: the current
//! list of orders in the pipeline, and the health of a small fleet of backend
//! services. It refreshes them on timers, folds every kind of failure into a
//! small status vocabulary, and hands out consistent, race-free reads.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Pull, don't push
//! Each poller fetches on its own interval and replaces its snapshot wholesale.
//! There is no diffing, no history and no streaming: a reader always gets the
//! latest complete value.
//!
//! ### Failures are data
//! A health probe never errors. A refused connection or timeout becomes
//! [`HealthStatus::Down`](model::HealthStatus::Down), a non-2xx response
//! becomes [`HealthStatus::Unhealthy`](model::HealthStatus::Unhealthy). A
//! failed order fetch simply leaves the previous list in place. Nothing thrown
//! inside a cycle ever reaches the presentation layer, and no cycle can stop
//! its loop.
//!
//! ## 🚀 Core Concepts
//!
//! ### Generics: one loop, two pollers
//! [`Poller<S: PollSource>`](framework::Poller) owns scheduling, cycle numbering
//! and publication. The order feed and the health aggregator only implement
//! [`PollSource::poll`](framework::PollSource::poll).
//!
//! ### Snapshots
//! Every publish swaps in a new [`Snapshot`](framework::Snapshot) tagged with
//! the cycle that produced it. A slow cycle that finishes after a newer one has
//! already published is dropped, so readers never go backwards.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Scheduling
//! Both pollers run their first cycle at startup. The default
//! [`Schedule::FixedDelay`](framework::Schedule::FixedDelay) waits one interval
//! after a cycle *completes* before starting the next, so cycles never overlap.
//! [`Schedule::FixedRate`](framework::Schedule::FixedRate) keeps a fixed grid
//! and lets a slow cycle overlap the next one; cycle numbers decide which result
//! wins.
//!
//! ### 2. Timeouts
//! Every request is bounded by an explicit timeout shorter than its poller's
//! interval (3 s by default), so a hung endpoint can stall neither a cycle nor
//! the loop.
//!
//! ### 3. Concurrency Model
//! One Tokio task per poller. Inside a health cycle all probes run
//! concurrently and the report is published only after every probe resolves.
//!
//! ### 4. Observability
//! We use `tracing` with structured fields (`poller`, `cycle`, `endpoint`).
//! See the [`lifecycle::tracing`] module for details.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: Generic poller, snapshot cell and read half.
//! - **Key items**: [`PollSource`](framework::PollSource), [`Poller`](framework::Poller),
//!   [`SnapshotReader`](framework::SnapshotReader).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Role**: Loads configuration, spawns both pollers, shuts them down.
//! - **Key items**: [`DashboardConfig`](lifecycle::DashboardConfig),
//!   [`DashboardSystem`](lifecycle::DashboardSystem).
//!
//! ### 3. The Interface ([`clients`])
//! - **Role**: The HTTP fetch primitive, and the read accessors handed to the
//!   presentation layer.
//! - **Key items**: [`HttpFetcher`](clients::HttpFetcher),
//!   [`OrderFeedClient`](clients::OrderFeedClient),
//!   [`ServiceHealthClient`](clients::ServiceHealthClient).
//!
//! ### 4. The Implementation ([`order_feed`], [`service_health`])
//! - **Role**: Concrete [`PollSource`](framework::PollSource) implementations.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Poll the reference services on localhost:8081-8084
//! RUST_LOG=info cargo run
//!
//! # Use a config file
//! cargo run -- --config dashboard.toml
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod error;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_feed;
pub mod service_health;

pub use error::DashboardError;
