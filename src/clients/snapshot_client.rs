use crate::framework::{PollError, Snapshot, SnapshotReader};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for domain clients to inherit the standard snapshot reads.
///
/// Every read is side-effect free with respect to polling: reading, or not
/// reading at all, never changes when the next cycle runs.
#[async_trait]
pub trait SnapshotClient<T: Clone + Send + Sync + 'static>: Send + Sync {
    /// Access the inner generic reader.
    fn reader(&self) -> &SnapshotReader<T>;

    /// The latest snapshot, with its cycle number and refresh time.
    fn snapshot(&self) -> Arc<Snapshot<T>> {
        self.reader().latest()
    }

    /// True once the first cycle has published.
    fn is_fresh(&self) -> bool {
        self.snapshot().is_fresh()
    }

    /// Waits for a snapshot newer than the one currently visible.
    #[tracing::instrument(skip(self), level = "debug")]
    async fn next_snapshot(&self) -> Result<Arc<Snapshot<T>>, PollError> {
        let current = self.snapshot().cycle;
        self.wait_for_cycle(current + 1).await
    }

    /// Waits until a snapshot from `cycle` or later is visible.
    async fn wait_for_cycle(&self, cycle: u64) -> Result<Arc<Snapshot<T>>, PollError> {
        let mut reader = self.reader().clone();
        reader.wait_for_cycle(cycle).await
    }
}
