//! Represents a customer order as reported by the order-data endpoint.
//!
//! # Polling
//! Orders are opaque to the poller: the order feed publishes whatever the
//! endpoint returns, in the order it returns it, as one immutable list.
//! Nothing here validates or transitions [`OrderStatus`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle status of an order, already resolved by the order service.
///
/// Travels as its SCREAMING_SNAKE_CASE name. Names outside the pipeline's six
/// stages are kept verbatim in [`OrderStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    InventoryChecked,
    PaymentProcessed,
    Completed,
    Failed,
    Cancelled,
    /// Any other status name, as sent.
    Other(String),
}

impl OrderStatus {
    /// Terminal states no longer move through the pipeline.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Whether this is one of the pipeline's own stages.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::InventoryChecked => "INVENTORY_CHECKED",
            Self::PaymentProcessed => "PAYMENT_PROCESSED",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(name: String) -> Self {
        match name.as_str() {
            "PENDING" => Self::Pending,
            "INVENTORY_CHECKED" => Self::InventoryChecked,
            "PAYMENT_PROCESSED" => Self::PaymentProcessed,
            "COMPLETED" => Self::Completed,
            "FAILED" => Self::Failed,
            "CANCELLED" => Self::Cancelled,
            _ => Self::Other(name),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_id: String,
    pub status: OrderStatus,
    pub total_amount: f64,
    #[serde(with = "crate::model::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::model::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new Order instance with both timestamps set to `at`.
    pub fn new(
        id: impl Into<OrderId>,
        customer_id: impl Into<String>,
        status: OrderStatus,
        total_amount: f64,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            customer_id: customer_id.into(),
            status,
            total_amount,
            created_at: at,
            updated_at: at,
        }
    }
}
