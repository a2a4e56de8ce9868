//! Service health types: the endpoint configuration, the per-endpoint status
//! and the aggregated report published by the health poller.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// A service the dashboard probes, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    /// Stable key used in the health report (e.g. `orderService`).
    pub key: String,
    /// Human readable name for display.
    pub name: String,
    /// Fully qualified health URL.
    pub url: String,
}

impl ServiceEndpoint {
    pub fn new(key: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Health of one endpoint.
///
/// `Unknown` only exists before the first completed cycle. A probe outcome is
/// always one of the other three variants, so once a report is built from
/// probe results no entry can go back to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Reachable and the response indicated success.
    Healthy,
    /// Reachable but the response indicated failure.
    Unhealthy,
    /// No response at all (refused, DNS, timeout, ...).
    Down,
    /// No cycle has completed yet.
    Unknown,
}

impl HealthStatus {
    /// Normalizes a probe outcome: `Some(success)` for a completed response,
    /// `None` when no response was obtained.
    pub fn from_response(success: Option<bool>) -> Self {
        match success {
            Some(true) => Self::Healthy,
            Some(false) => Self::Unhealthy,
            None => Self::Down,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
            Self::Down => "down",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Mapping from every configured endpoint key to its status.
///
/// A report can only be built from the full endpoint list, so its key set is
/// always exactly the configured key set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HealthReport {
    statuses: BTreeMap<String, HealthStatus>,
}

impl HealthReport {
    /// The report before any cycle completes: every endpoint `Unknown`.
    pub fn unknown(endpoints: &[ServiceEndpoint]) -> Self {
        Self {
            statuses: endpoints
                .iter()
                .map(|e| (e.key.clone(), HealthStatus::Unknown))
                .collect(),
        }
    }

    /// Builds a report pairing each endpoint with its probe result.
    ///
    /// `results` must be in the same order as `endpoints`; a short iterator
    /// leaves the remaining endpoints `Down`.
    pub fn from_results(
        endpoints: &[ServiceEndpoint],
        results: impl IntoIterator<Item = HealthStatus>,
    ) -> Self {
        let mut results = results.into_iter();
        Self {
            statuses: endpoints
                .iter()
                .map(|e| (e.key.clone(), results.next().unwrap_or(HealthStatus::Down)))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<HealthStatus> {
        self.statuses.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.statuses.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, HealthStatus)> {
        self.statuses.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn all_healthy(&self) -> bool {
        self.statuses.values().all(|s| *s == HealthStatus::Healthy)
    }

    pub fn count(&self, status: HealthStatus) -> usize {
        self.statuses.values().filter(|s| **s == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Vec<ServiceEndpoint> {
        vec![
            ServiceEndpoint::new("a", "A", "http://a/health"),
            ServiceEndpoint::new("b", "B", "http://b/health"),
            ServiceEndpoint::new("c", "C", "http://c/health"),
        ]
    }

    #[test]
    fn test_from_response() {
        assert_eq!(HealthStatus::from_response(Some(true)), HealthStatus::Healthy);
        assert_eq!(HealthStatus::from_response(Some(false)), HealthStatus::Unhealthy);
        assert_eq!(HealthStatus::from_response(None), HealthStatus::Down);
    }

    #[test]
    fn test_unknown_report_covers_all_keys() {
        let report = HealthReport::unknown(&endpoints());
        assert_eq!(report.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(report.count(HealthStatus::Unknown), 3);
        assert!(!report.all_healthy());
    }

    #[test]
    fn test_from_results_pairs_in_order() {
        let report = HealthReport::from_results(
            &endpoints(),
            [HealthStatus::Healthy, HealthStatus::Unhealthy, HealthStatus::Down],
        );
        assert_eq!(report.get("a"), Some(HealthStatus::Healthy));
        assert_eq!(report.get("b"), Some(HealthStatus::Unhealthy));
        assert_eq!(report.get("c"), Some(HealthStatus::Down));
        assert_eq!(report.get("d"), None);
    }

    #[test]
    fn test_short_results_never_drop_keys() {
        let report = HealthReport::from_results(&endpoints(), [HealthStatus::Healthy]);
        assert_eq!(report.len(), 3);
        assert!(report.iter().all(|(_, s)| s.is_known()));
    }

    #[test]
    fn test_report_serializes_as_flat_map() {
        let report = HealthReport::from_results(
            &endpoints()[..1],
            [HealthStatus::Healthy],
        );
        assert_eq!(serde_json::to_string(&report).unwrap(), r#"{"a":"healthy"}"#);
    }
}
