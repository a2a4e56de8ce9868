//! # Core Polling Framework
//!
//! This module defines the generic building blocks for the polling engine.
//!
//! ## Key Types
//!
//! - [`PollSource`]: The trait every polled resource implements.
//! - [`Poller`]: The generic task that schedules cycles and publishes snapshots.
//! - [`SnapshotReader`]: The read half handed to consumers.
//! - [`PollError`]: Framework errors (e.g. the poller went away).

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that anything polled by a [`Poller`] must implement.
///
/// # Architecture Note
/// The poller owns the timing, sequencing and publication; a source only knows
/// how to run *one* fetch. Writing the loop once against this trait gives the
/// order feed and the health aggregator identical scheduling and staleness
/// rules.
///
/// A source reports a failed cycle by returning `Err`. The poller logs it and
/// keeps the previous snapshot. Sources that always produce a value (the health
/// aggregator folds failures into the report) use
/// [`std::convert::Infallible`].
#[async_trait]
pub trait PollSource: Send + Sync + 'static {
    /// The value published after a successful cycle.
    type Snapshot: Clone + Send + Sync + Debug + 'static;

    /// Why a cycle produced nothing to publish.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short name used in logs (e.g. `order_feed`).
    fn name(&self) -> &str;

    /// Value visible to readers before the first cycle completes.
    fn initial(&self) -> Self::Snapshot;

    /// Runs one fetch. Must be bounded by the source's own timeout.
    async fn poll(&self) -> Result<Self::Snapshot, Self::Error>;
}

// =============================================================================
// 2. SNAPSHOTS & ERRORS
// =============================================================================

/// Errors that can occur within the polling framework itself.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PollError {
    #[error("Poller stopped")]
    PollerStopped,
}

/// The published result of one poll cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    /// Cycle that produced this value; `0` for the initial value.
    pub cycle: u64,
    /// When the value was published; `None` for the initial value.
    pub refreshed_at: Option<DateTime<Utc>>,
    pub data: T,
}

impl<T> Snapshot<T> {
    fn initial(data: T) -> Self {
        Self {
            cycle: 0,
            refreshed_at: None,
            data,
        }
    }

    /// True once any cycle has published.
    pub fn is_fresh(&self) -> bool {
        self.cycle > 0
    }
}

/// Result of a single cycle, as seen by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The cycle's value is now the latest snapshot.
    Published { cycle: u64 },
    /// A newer cycle published first; this result was dropped.
    Stale { cycle: u64 },
    /// The source failed; the previous snapshot is retained.
    Failed { cycle: u64 },
}

/// How cycles are spaced in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// Next cycle starts one interval after the previous one completes.
    /// Cycles never overlap.
    #[default]
    FixedDelay,
    /// Cycles start on a fixed grid and may overlap a slow predecessor.
    /// Late results from older cycles are discarded.
    FixedRate,
}

// =============================================================================
// 3. THE READ HALF
// =============================================================================

/// Read accessor for the latest snapshot of one poller.
///
/// Reads never block the poller and there is no history: only the most recent
/// value is kept.
#[derive(Debug, Clone)]
pub struct SnapshotReader<T> {
    receiver: watch::Receiver<Arc<Snapshot<T>>>,
}

impl<T> SnapshotReader<T> {
    fn new(receiver: watch::Receiver<Arc<Snapshot<T>>>) -> Self {
        Self { receiver }
    }

    /// The latest snapshot. The whole value is swapped on publish, so a reader
    /// sees either the previous or the next snapshot, never a mix.
    pub fn latest(&self) -> Arc<Snapshot<T>> {
        self.receiver.borrow().clone()
    }

    /// Waits for a snapshot newer than the last one this reader saw.
    pub async fn changed(&mut self) -> Result<Arc<Snapshot<T>>, PollError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| PollError::PollerStopped)?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// Waits until a snapshot from at least `cycle` is visible.
    pub async fn wait_for_cycle(&mut self, cycle: u64) -> Result<Arc<Snapshot<T>>, PollError> {
        let snapshot = self
            .receiver
            .wait_for(|s| s.cycle >= cycle)
            .await
            .map_err(|_| PollError::PollerStopped)?;
        Ok(snapshot.clone())
    }
}

// =============================================================================
// 4. THE GENERIC POLLER
// =============================================================================

struct Shared<S: PollSource> {
    source: S,
    sender: watch::Sender<Arc<Snapshot<S::Snapshot>>>,
    next_cycle: AtomicU64,
}

/// Generic poller driving one [`PollSource`].
///
/// # Architecture Note
/// The poller is the only writer of its snapshot cell. Each cycle takes a
/// number when it *starts*, and publication only succeeds if no cycle with a
/// higher number has published yet. That single comparison, done inside the
/// watch channel's update, is what keeps a slow cycle from overwriting a newer
/// one when cycles overlap.
pub struct Poller<S: PollSource> {
    shared: Arc<Shared<S>>,
    interval: Duration,
    schedule: Schedule,
}

impl<S: PollSource> Poller<S> {
    pub fn new(
        source: S,
        interval: Duration,
        schedule: Schedule,
    ) -> (Self, SnapshotReader<S::Snapshot>) {
        let (sender, receiver) = watch::channel(Arc::new(Snapshot::initial(source.initial())));
        let poller = Self {
            shared: Arc::new(Shared {
                source,
                sender,
                next_cycle: AtomicU64::new(1),
            }),
            interval,
            schedule,
        };
        (poller, SnapshotReader::new(receiver))
    }

    pub fn name(&self) -> &str {
        self.shared.source.name()
    }

    /// Runs a single cycle now: fetch, then publish unless stale or failed.
    pub async fn poll_once(&self) -> CycleOutcome {
        Self::cycle(&self.shared).await
    }

    async fn cycle(shared: &Shared<S>) -> CycleOutcome {
        let poller = shared.source.name();
        let cycle = shared.next_cycle.fetch_add(1, Ordering::SeqCst);
        debug!(poller, cycle, "Cycle started");

        match shared.source.poll().await {
            Ok(data) => {
                let published = shared.sender.send_if_modified(|current| {
                    if current.cycle >= cycle {
                        return false;
                    }
                    *current = Arc::new(Snapshot {
                        cycle,
                        refreshed_at: Some(Utc::now()),
                        data,
                    });
                    true
                });
                if published {
                    debug!(poller, cycle, "Published");
                    CycleOutcome::Published { cycle }
                } else {
                    debug!(poller, cycle, "Discarded stale result");
                    CycleOutcome::Stale { cycle }
                }
            }
            Err(e) => {
                warn!(poller, cycle, error = %e, "Cycle failed, keeping previous snapshot");
                CycleOutcome::Failed { cycle }
            }
        }
    }

    /// Runs the polling loop until the task is aborted.
    ///
    /// The first cycle starts immediately. Every cycle runs in its own task
    /// inside a [`JoinSet`] owned by this future, so a panicking cycle is
    /// contained and logged, and aborting the loop aborts whatever is still
    /// in flight.
    pub async fn run(self) {
        let poller = self.name().to_string();
        info!(
            poller = %poller,
            interval_ms = self.interval.as_millis() as u64,
            schedule = ?self.schedule,
            "Poller started"
        );

        let mut in_flight = JoinSet::new();
        match self.schedule {
            Schedule::FixedDelay => loop {
                let shared = Arc::clone(&self.shared);
                in_flight.spawn(async move { Self::cycle(&shared).await });
                if let Some(joined) = in_flight.join_next().await {
                    Self::log_join(&poller, joined);
                }
                tokio::time::sleep(self.interval).await;
            },
            Schedule::FixedRate => {
                let mut ticker = tokio::time::interval(self.interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                loop {
                    tokio::select! {
                        _ = ticker.tick() => {
                            let shared = Arc::clone(&self.shared);
                            in_flight.spawn(async move { Self::cycle(&shared).await });
                        }
                        Some(joined) = in_flight.join_next() => {
                            Self::log_join(&poller, joined);
                        }
                    }
                }
            }
        }
    }

    fn log_join(poller: &str, joined: Result<CycleOutcome, tokio::task::JoinError>) {
        match joined {
            Ok(CycleOutcome::Stale { cycle }) => {
                info!(poller, cycle, "Cycle finished after a newer one, result dropped")
            }
            Ok(_) => {}
            Err(e) if e.is_panic() => error!(poller, error = %e, "Cycle panicked"),
            Err(_) => {}
        }
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
