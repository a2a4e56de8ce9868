//! [`PollSource`] implementation that aggregates every service probe.

use std::convert::Infallible;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::debug;

use crate::clients::HttpFetcher;
use crate::framework::PollSource;
use crate::model::{HealthReport, HealthStatus, ServiceEndpoint};
use crate::service_health::probe;

/// Probes all configured endpoints concurrently and reduces the results into
/// one [`HealthReport`].
#[derive(Debug, Clone)]
pub struct ServiceHealthSource {
    endpoints: Vec<ServiceEndpoint>,
    http: HttpFetcher,
}

impl ServiceHealthSource {
    pub fn new(endpoints: Vec<ServiceEndpoint>, http: HttpFetcher) -> Self {
        Self { endpoints, http }
    }
}

#[async_trait]
impl PollSource for ServiceHealthSource {
    type Snapshot = HealthReport;
    type Error = Infallible;

    fn name(&self) -> &str {
        "service_health"
    }

    fn initial(&self) -> HealthReport {
        HealthReport::unknown(&self.endpoints)
    }

    /// Fans out one probe per endpoint and joins on all of them. Each probe
    /// resolves to a status on its own, so no endpoint can short-circuit
    /// another, and the report is only built once every probe is done.
    async fn poll(&self) -> Result<HealthReport, Infallible> {
        let statuses = join_all(
            self.endpoints
                .iter()
                .map(|endpoint| probe::probe(&self.http, endpoint)),
        )
        .await;

        let report = HealthReport::from_results(&self.endpoints, statuses);
        debug!(
            healthy = report.count(HealthStatus::Healthy),
            unhealthy = report.count(HealthStatus::Unhealthy),
            down = report.count(HealthStatus::Down),
            "Health cycle complete"
        );
        Ok(report)
    }
}
