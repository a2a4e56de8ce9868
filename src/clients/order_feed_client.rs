use crate::clients::snapshot_client::SnapshotClient;
use crate::framework::SnapshotReader;
use crate::model::{Order, OrderId, OrderStatus};

/// Client for reading the order feed.
#[derive(Clone, Debug)]
pub struct OrderFeedClient {
    inner: SnapshotReader<Vec<Order>>,
}

impl OrderFeedClient {
    pub fn new(inner: SnapshotReader<Vec<Order>>) -> Self {
        Self { inner }
    }

    /// The latest order list, in the order the endpoint returned it.
    pub fn orders(&self) -> Vec<Order> {
        self.snapshot().data.clone()
    }

    pub fn order(&self, id: OrderId) -> Option<Order> {
        self.snapshot().data.iter().find(|o| o.id == id).cloned()
    }

    /// Number of orders currently in `status`.
    pub fn count_by_status(&self, status: OrderStatus) -> usize {
        self.snapshot().data.iter().filter(|o| o.status == status).count()
    }
}

impl SnapshotClient<Vec<Order>> for OrderFeedClient {
    fn reader(&self) -> &SnapshotReader<Vec<Order>> {
        &self.inner
    }
}
