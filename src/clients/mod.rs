//! HTTP fetch primitive and type-safe wrappers around
//! [`SnapshotReader`](crate::framework::SnapshotReader).

pub mod http;
pub mod order_feed_client;
pub mod service_health_client;
pub mod snapshot_client;

pub use http::*;
pub use order_feed_client::*;
pub use service_health_client::*;
pub use snapshot_client::*;
