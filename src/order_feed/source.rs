//! [`PollSource`] implementation for the order-data endpoint.

use async_trait::async_trait;
use tracing::debug;

use crate::clients::HttpFetcher;
use crate::framework::PollSource;
use crate::model::Order;
use crate::order_feed::OrderFeedError;

/// Fetches the full order list from a single endpoint.
#[derive(Debug, Clone)]
pub struct OrderFeedSource {
    url: String,
    http: HttpFetcher,
}

impl OrderFeedSource {
    pub fn new(url: impl Into<String>, http: HttpFetcher) -> Self {
        Self {
            url: url.into(),
            http,
        }
    }
}

#[async_trait]
impl PollSource for OrderFeedSource {
    type Snapshot = Vec<Order>;
    type Error = OrderFeedError;

    fn name(&self) -> &str {
        "order_feed"
    }

    fn initial(&self) -> Vec<Order> {
        Vec::new()
    }

    async fn poll(&self) -> Result<Vec<Order>, OrderFeedError> {
        let (status, body) = self.http.get_body(&self.url).await?;
        if !status.is_success() {
            return Err(OrderFeedError::Status(status.as_u16()));
        }
        let orders: Vec<Order> = serde_json::from_slice(&body)
            .map_err(|e| OrderFeedError::MalformedBody(e.to_string()))?;
        debug!(url = %self.url, count = orders.len(), "Orders fetched");
        Ok(orders)
    }
}
