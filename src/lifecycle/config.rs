//! # Configuration
//!
//! Static settings, fixed at process start. Defaults reproduce the reference
//! deployment: orders from `localhost:8081` every 5 s, four services probed
//! every 10 s, 3 s timeout on every request.
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. an optional TOML file
//! 3. environment variables prefixed `DASHBOARD_`, nested with `__`
//!    (e.g. `DASHBOARD_ORDER_FEED__INTERVAL_MS=2000`)
//!
//! ```toml
//! [order_feed]
//! url = "http://localhost:8081/api/orders"
//! interval_ms = 5000
//! timeout_ms = 3000
//! schedule = "fixed_delay"
//!
//! [service_health]
//! interval_ms = 10000
//! timeout_ms = 3000
//!
//! [[service_health.endpoints]]
//! key = "orderService"
//! name = "Order Service"
//! url = "http://localhost:8081/actuator/health"
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::DashboardError;
use crate::framework::Schedule;
use crate::model::ServiceEndpoint;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub order_feed: OrderFeedConfig,
    pub service_health: ServiceHealthConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrderFeedConfig {
    pub url: String,
    pub interval_ms: u64,
    pub timeout_ms: u64,
    pub schedule: Schedule,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceHealthConfig {
    pub endpoints: Vec<ServiceEndpoint>,
    pub interval_ms: u64,
    pub timeout_ms: u64,
    pub schedule: Schedule,
}

impl Default for OrderFeedConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8081/api/orders".to_string(),
            interval_ms: 5_000,
            timeout_ms: 3_000,
            schedule: Schedule::FixedDelay,
        }
    }
}

impl Default for ServiceHealthConfig {
    fn default() -> Self {
        let service = |key: &str, name: &str, port: u16| {
            ServiceEndpoint::new(key, name, format!("http://localhost:{port}/actuator/health"))
        };
        Self {
            endpoints: vec![
                service("orderService", "Order Service", 8081),
                service("paymentService", "Payment Service", 8082),
                service("inventoryService", "Inventory Service", 8083),
                service("notificationService", "Notification Service", 8084),
            ],
            interval_ms: 10_000,
            timeout_ms: 3_000,
            schedule: Schedule::FixedDelay,
        }
    }
}

impl OrderFeedConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl ServiceHealthConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl DashboardConfig {
    /// Loads defaults, then `path` (if any), then `DASHBOARD_*` variables,
    /// and validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self, DashboardError> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Self::load), but reads variables from `env` instead of
    /// the process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, DashboardError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix("DASHBOARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        let invalid = |msg: String| Err(DashboardError::InvalidConfig(msg));

        if self.order_feed.url.trim().is_empty() {
            return invalid("order_feed.url is empty".into());
        }
        check_timing("order_feed", self.order_feed.interval_ms, self.order_feed.timeout_ms)?;
        check_timing(
            "service_health",
            self.service_health.interval_ms,
            self.service_health.timeout_ms,
        )?;

        if self.service_health.endpoints.is_empty() {
            return invalid("service_health.endpoints is empty".into());
        }
        let mut seen = HashSet::new();
        for endpoint in &self.service_health.endpoints {
            if endpoint.key.trim().is_empty() {
                return invalid(format!("endpoint '{}' has an empty key", endpoint.name));
            }
            if endpoint.url.trim().is_empty() {
                return invalid(format!("endpoint '{}' has an empty url", endpoint.key));
            }
            if !seen.insert(endpoint.key.as_str()) {
                return invalid(format!("duplicate endpoint key '{}'", endpoint.key));
            }
        }
        Ok(())
    }
}

fn check_timing(section: &str, interval_ms: u64, timeout_ms: u64) -> Result<(), DashboardError> {
    if interval_ms == 0 {
        return Err(DashboardError::InvalidConfig(format!(
            "{section}.interval_ms must be positive"
        )));
    }
    // A cycle must be able to finish before the next one is due.
    if timeout_ms == 0 || timeout_ms >= interval_ms {
        return Err(DashboardError::InvalidConfig(format!(
            "{section}.timeout_ms must be positive and below interval_ms ({interval_ms})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_reference_deployment() {
        let config = DashboardConfig::default();
        assert_eq!(config.order_feed.interval(), Duration::from_millis(5_000));
        assert_eq!(config.service_health.interval(), Duration::from_millis(10_000));
        assert_eq!(config.service_health.endpoints.len(), 4);
        assert_eq!(config.service_health.endpoints[1].key, "paymentService");
        assert_eq!(
            config.service_health.endpoints[3].url,
            "http://localhost:8084/actuator/health"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!("ops-dashboard-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[order_feed]
url = "http://orders.internal/api/orders"
interval_ms = 2000
timeout_ms = 500
schedule = "fixed_rate"

[service_health]
interval_ms = 4000

[[service_health.endpoints]]
key = "orders"
name = "Orders"
url = "http://orders.internal/health"
"#
        )
        .unwrap();

        let config = DashboardConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.order_feed.url, "http://orders.internal/api/orders");
        assert_eq!(config.order_feed.schedule, Schedule::FixedRate);
        assert_eq!(config.order_feed.timeout(), Duration::from_millis(500));
        // Unset fields keep their defaults.
        assert_eq!(config.service_health.timeout_ms, 3_000);
        assert_eq!(config.service_health.schedule, Schedule::FixedDelay);
        assert_eq!(config.service_health.endpoints.len(), 1);
    }

    #[test]
    fn test_env_overrides_file_and_defaults() {
        let path = std::env::temp_dir().join(format!("ops-dashboard-env-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[order_feed]\nurl = \"http://orders.internal/api/orders\"\ninterval_ms = 2000\n",
        )
        .unwrap();

        let env = config::Map::from([
            ("DASHBOARD_ORDER_FEED__INTERVAL_MS".to_string(), "4000".to_string()),
            ("DASHBOARD_SERVICE_HEALTH__TIMEOUT_MS".to_string(), "1500".to_string()),
            ("DASHBOARD_ORDER_FEED__SCHEDULE".to_string(), "fixed_rate".to_string()),
            ("UNRELATED_ORDER_FEED__INTERVAL_MS".to_string(), "1".to_string()),
        ]);
        let config = DashboardConfig::load_with_env(Some(&path), Some(env)).unwrap();
        std::fs::remove_file(&path).ok();

        // Environment beats the file.
        assert_eq!(config.order_feed.interval_ms, 4_000);
        assert_eq!(config.order_feed.schedule, Schedule::FixedRate);
        // File beats the defaults.
        assert_eq!(config.order_feed.url, "http://orders.internal/api/orders");
        // Environment beats the defaults.
        assert_eq!(config.service_health.timeout_ms, 1_500);
        assert_eq!(config.service_health.interval_ms, 10_000);
    }

    #[test]
    fn test_env_double_underscore_prefix_is_not_matched() {
        let env = config::Map::from([(
            "DASHBOARD__ORDER_FEED__INTERVAL_MS".to_string(),
            "4000".to_string(),
        )]);
        let config = DashboardConfig::load_with_env(None, Some(env)).unwrap();
        assert_eq!(config.order_feed.interval_ms, 5_000);
    }

    #[test]
    fn test_timeout_must_be_below_interval() {
        let mut config = DashboardConfig::default();
        config.order_feed.timeout_ms = config.order_feed.interval_ms;
        assert!(matches!(config.validate(), Err(DashboardError::InvalidConfig(_))));

        let mut config = DashboardConfig::default();
        config.service_health.interval_ms = 0;
        assert!(matches!(config.validate(), Err(DashboardError::InvalidConfig(_))));
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let mut config = DashboardConfig::default();
        let dup = config.service_health.endpoints[0].clone();
        config.service_health.endpoints.push(dup);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate endpoint key 'orderService'"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("ops-dashboard-does-not-exist.toml");
        assert!(matches!(
            DashboardConfig::load(Some(&path)),
            Err(DashboardError::Config(_))
        ));
    }
}
