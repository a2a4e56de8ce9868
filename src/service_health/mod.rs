//! Service health aggregation: probes every configured endpoint each cycle
//! and publishes one complete status map.

pub mod probe;
pub mod source;

pub use source::*;

use crate::clients::{HttpFetcher, ServiceHealthClient};
use crate::framework::{Poller, Schedule};
use crate::model::ServiceEndpoint;
use std::time::Duration;

/// Creates a new service health poller and its client.
pub fn new(
    endpoints: Vec<ServiceEndpoint>,
    http: HttpFetcher,
    interval: Duration,
    schedule: Schedule,
) -> (Poller<ServiceHealthSource>, ServiceHealthClient) {
    let source = ServiceHealthSource::new(endpoints.clone(), http);
    let (poller, reader) = Poller::new(source, interval, schedule);
    (poller, ServiceHealthClient::new(reader, endpoints))
}
