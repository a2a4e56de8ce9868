//! Order feed: polls the order-data endpoint and republishes the list wholesale.

pub mod error;
pub mod source;

pub use error::*;
pub use source::*;

use crate::clients::{HttpFetcher, OrderFeedClient};
use crate::framework::{Poller, Schedule};
use std::time::Duration;

/// Creates a new order feed poller and its client.
pub fn new(
    url: impl Into<String>,
    http: HttpFetcher,
    interval: Duration,
    schedule: Schedule,
) -> (Poller<OrderFeedSource>, OrderFeedClient) {
    let (poller, reader) = Poller::new(OrderFeedSource::new(url, http), interval, schedule);
    (poller, OrderFeedClient::new(reader))
}
