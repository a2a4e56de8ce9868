//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! The compact format hides the module prefix (`with_target(false)`); every
//! event already carries a `poller` or `endpoint` field that says where it came
//! from. Verbosity comes from `RUST_LOG` and defaults to `info`.
//!
//! ```bash
//! # Poller start/stop, failed cycles, dropped stale results
//! RUST_LOG=info cargo run
//!
//! # Every cycle, every publish, every probe
//! RUST_LOG=debug cargo run
//!
//! # Only the health aggregator
//! RUST_LOG=ops_dashboard::service_health=debug cargo run
//! ```
//!
//! ## What Gets Logged
//!
//! - **Poller lifecycle**: `Poller started` with interval and schedule
//! - **Cycles** (debug): `Cycle started`, `Published`, `Discarded stale result`
//! - **Failures** (warn): order feed cycles that kept the previous list, probes
//!   that got no response or a failing status
//! - **Panics** (error): a cycle that panicked; the loop carries on
//!
//! With `RUST_LOG=info` a failing order endpoint looks like:
//!
//! ```text
//! INFO Poller started poller=order_feed interval_ms=5000 schedule=FixedDelay
//! WARN Cycle failed, keeping previous snapshot poller="order_feed" cycle=3 error=Order endpoint returned status 503
//! ```

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // events carry poller/endpoint fields instead
        .compact()
        .init();
}
