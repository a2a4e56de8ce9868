//! Per-endpoint probe: one GET, normalized to a [`HealthStatus`].

use tracing::{debug, warn};

use crate::clients::{FetchError, HttpFetcher};
use crate::model::{HealthStatus, ServiceEndpoint};

/// Maps the outcome of a probe request to a status.
///
/// Any completed response is either healthy (2xx) or unhealthy; only a
/// missing response is `Down`.
pub fn classify(outcome: Result<reqwest::StatusCode, &FetchError>) -> HealthStatus {
    HealthStatus::from_response(outcome.ok().map(|status| status.is_success()))
}

/// Probes one endpoint. Never fails: every failure mode is a status.
pub async fn probe(http: &HttpFetcher, endpoint: &ServiceEndpoint) -> HealthStatus {
    let outcome = http.get(&endpoint.url).await;
    let status = classify(outcome.as_ref().map(|r| r.status()));
    match (&outcome, status) {
        (Err(e), _) => warn!(endpoint = %endpoint.key, error = %e, "Probe got no response"),
        (Ok(r), HealthStatus::Unhealthy) => {
            warn!(endpoint = %endpoint.key, http_status = r.status().as_u16(), "Probe reported failure")
        }
        _ => debug!(endpoint = %endpoint.key, %status, "Probe ok"),
    }
    status
}
