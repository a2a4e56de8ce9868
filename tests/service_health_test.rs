mod common;

use std::collections::BTreeSet;
use std::time::Duration;

use ops_dashboard::clients::{HttpFetcher, SnapshotClient};
use ops_dashboard::framework::{CycleOutcome, Schedule};
use ops_dashboard::model::{HealthStatus, ServiceEndpoint};
use ops_dashboard::service_health;

const PROBE_TIMEOUT: Duration = Duration::from_millis(300);

fn http() -> HttpFetcher {
    HttpFetcher::new(PROBE_TIMEOUT).expect("Failed to build client")
}

fn key_set(endpoints: &[ServiceEndpoint]) -> BTreeSet<String> {
    endpoints.iter().map(|e| e.key.clone()).collect()
}

/// Four endpoints all answering 2xx.
#[tokio::test]
async fn test_all_healthy() {
    let mut server = mockito::Server::new_async().await;
    let mut mocks = Vec::new();
    let mut endpoints = Vec::new();
    for (key, status) in [("orderService", 200), ("paymentService", 200), ("inventoryService", 204), ("notificationService", 200)] {
        let path = format!("/{key}/actuator/health");
        mocks.push(
            server
                .mock("GET", path.as_str())
                .with_status(status)
                .with_body(r#"{"status":"UP"}"#)
                .create_async()
                .await,
        );
        endpoints.push(ServiceEndpoint::new(key, key, format!("{}{}", server.url(), path)));
    }

    let (poller, client) =
        service_health::new(endpoints.clone(), http(), Duration::from_secs(10), Schedule::FixedDelay);

    assert_eq!(poller.poll_once().await, CycleOutcome::Published { cycle: 1 });
    let report = client.statuses();
    assert_eq!(report.len(), 4);
    assert!(report.all_healthy());
    assert_eq!(
        report.keys().map(String::from).collect::<BTreeSet<_>>(),
        key_set(&endpoints)
    );

    for mock in mocks {
        mock.assert_async().await;
    }
}

/// A answers 2xx, B answers 500, C never answers, D refuses the connection.
#[tokio::test]
async fn test_mixed_outcomes_do_not_cross_contaminate() {
    let mut server = mockito::Server::new_async().await;
    let _a = server.mock("GET", "/a/health").with_status(200).create_async().await;
    let _b = server
        .mock("GET", "/b/health")
        .with_status(500)
        .with_body(r#"{"status":"DOWN"}"#)
        .create_async()
        .await;
    let silent = common::silent_server().await;
    let refused = common::closed_port().await;

    let endpoints = vec![
        ServiceEndpoint::new("A", "Service A", format!("{}/a/health", server.url())),
        ServiceEndpoint::new("B", "Service B", format!("{}/b/health", server.url())),
        ServiceEndpoint::new("C", "Service C", format!("http://{silent}/health")),
        ServiceEndpoint::new("D", "Service D", format!("http://{refused}/health")),
    ];

    let (poller, client) =
        service_health::new(endpoints, http(), Duration::from_secs(10), Schedule::FixedDelay);
    poller.poll_once().await;

    assert_eq!(client.status_of("A"), Some(HealthStatus::Healthy));
    assert_eq!(client.status_of("B"), Some(HealthStatus::Unhealthy));
    assert_eq!(client.status_of("C"), Some(HealthStatus::Down));
    assert_eq!(client.status_of("D"), Some(HealthStatus::Down));
    assert_eq!(client.statuses().len(), 4);
}

/// Probes run concurrently: several silent endpoints cost one timeout, not
/// one timeout each.
#[tokio::test]
async fn test_probes_fan_out() {
    let mut endpoints = Vec::new();
    for i in 0..4 {
        let silent = common::silent_server().await;
        endpoints.push(ServiceEndpoint::new(
            format!("svc{i}"),
            format!("Service {i}"),
            format!("http://{silent}/health"),
        ));
    }

    let (poller, client) =
        service_health::new(endpoints, http(), Duration::from_secs(10), Schedule::FixedDelay);

    let started = std::time::Instant::now();
    poller.poll_once().await;
    let elapsed = started.elapsed();

    assert_eq!(client.statuses().count(HealthStatus::Down), 4);
    assert!(
        elapsed < PROBE_TIMEOUT * 3,
        "Probes look sequential: cycle took {elapsed:?}"
    );
}

/// `unknown` before the first cycle; never again afterwards, whatever the
/// outcome of later cycles.
#[tokio::test]
async fn test_unknown_only_before_first_cycle() {
    let mut server = mockito::Server::new_async().await;
    let healthy = server.mock("GET", "/x/health").with_status(200).create_async().await;
    let refused = common::closed_port().await;

    let endpoints = vec![
        ServiceEndpoint::new("x", "X", format!("{}/x/health", server.url())),
        ServiceEndpoint::new("y", "Y", format!("http://{refused}/health")),
    ];
    let (poller, client) =
        service_health::new(endpoints.clone(), http(), Duration::from_secs(10), Schedule::FixedDelay);

    let initial = client.snapshot();
    assert_eq!(initial.cycle, 0);
    assert_eq!(initial.data.count(HealthStatus::Unknown), 2);
    assert_eq!(
        initial.data.keys().map(String::from).collect::<BTreeSet<_>>(),
        key_set(&endpoints)
    );

    poller.poll_once().await;
    assert_eq!(client.statuses().count(HealthStatus::Unknown), 0);

    // Take the healthy endpoint away; x now answers 501 (mockito's no-match).
    healthy.remove_async().await;
    poller.poll_once().await;

    let report = client.statuses();
    assert_eq!(report.count(HealthStatus::Unknown), 0);
    assert_eq!(report.get("x"), Some(HealthStatus::Unhealthy));
    assert_eq!(report.get("y"), Some(HealthStatus::Down));
    assert_eq!(client.snapshot().cycle, 2);
}

/// The endpoint list handed to the presentation layer matches configuration.
#[tokio::test]
async fn test_client_exposes_configured_endpoints() {
    let endpoints = vec![
        ServiceEndpoint::new("b", "Bravo", "http://127.0.0.1:1/health"),
        ServiceEndpoint::new("a", "Alpha", "http://127.0.0.1:2/health"),
    ];
    let (_poller, client) =
        service_health::new(endpoints.clone(), http(), Duration::from_secs(10), Schedule::FixedDelay);

    assert_eq!(client.endpoints(), endpoints.as_slice());
    assert_eq!(client.status_of("a"), Some(HealthStatus::Unknown));
    assert_eq!(client.status_of("zzz"), None);
}
