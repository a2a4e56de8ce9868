//! Error types for the order feed.

use crate::clients::FetchError;
use thiserror::Error;

/// Why an order feed cycle published nothing.
///
/// None of these reach the presentation layer; the poller logs them and keeps
/// the previous order list.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderFeedError {
    /// No response from the order endpoint.
    #[error("Order endpoint unreachable: {0}")]
    Fetch(#[from] FetchError),

    /// The endpoint answered with a non-success status.
    #[error("Order endpoint returned status {0}")]
    Status(u16),

    /// The body was not a JSON array of orders.
    #[error("Malformed order payload: {0}")]
    MalformedBody(String),
}
