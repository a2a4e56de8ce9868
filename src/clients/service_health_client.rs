use crate::clients::snapshot_client::SnapshotClient;
use crate::framework::SnapshotReader;
use crate::model::{HealthReport, HealthStatus, ServiceEndpoint};

/// Client for reading the aggregated service health.
#[derive(Clone, Debug)]
pub struct ServiceHealthClient {
    inner: SnapshotReader<HealthReport>,
    endpoints: Vec<ServiceEndpoint>,
}

impl ServiceHealthClient {
    pub fn new(inner: SnapshotReader<HealthReport>, endpoints: Vec<ServiceEndpoint>) -> Self {
        Self { inner, endpoints }
    }

    /// The latest status of every configured endpoint.
    pub fn statuses(&self) -> HealthReport {
        self.snapshot().data.clone()
    }

    pub fn status_of(&self, key: &str) -> Option<HealthStatus> {
        self.snapshot().data.get(key)
    }

    /// The configured endpoints, in configuration order, for display names.
    pub fn endpoints(&self) -> &[ServiceEndpoint] {
        &self.endpoints
    }
}

impl SnapshotClient<HealthReport> for ServiceHealthClient {
    fn reader(&self) -> &SnapshotReader<HealthReport> {
        &self.inner
    }
}
