use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::clients::{HttpFetcher, OrderFeedClient, ServiceHealthClient};
use crate::error::DashboardError;
use crate::lifecycle::DashboardConfig;
use crate::{order_feed, service_health};

/// The runtime orchestrator for the dashboard's two pollers.
///
/// `DashboardSystem` is responsible for:
/// - **Lifecycle Management**: Starting both pollers and stopping them again
/// - **Wiring**: Building each poller's HTTP client from its own timeout
/// - **Exposure**: Handing the read-only clients to the presentation layer
///
/// The two pollers share nothing; each runs in its own Tokio task and owns its
/// snapshot cell.
///
/// # Example
///
/// ```ignore
/// let system = DashboardSystem::start(&DashboardConfig::default())?;
///
/// let orders = system.orders.orders();
/// let health = system.services.statuses();
///
/// system.shutdown().await?;
/// ```
pub struct DashboardSystem {
    /// Read accessor for the latest order list
    pub orders: OrderFeedClient,

    /// Read accessor for the latest service health report
    pub services: ServiceHealthClient,

    /// Poller task handles (used for shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl DashboardSystem {
    /// Validates `config`, then spawns both pollers. Each one runs its first
    /// cycle immediately.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(config: &DashboardConfig) -> Result<Self, DashboardError> {
        config.validate()?;

        let (order_poller, orders) = order_feed::new(
            config.order_feed.url.clone(),
            HttpFetcher::new(config.order_feed.timeout())?,
            config.order_feed.interval(),
            config.order_feed.schedule,
        );
        let (health_poller, services) = service_health::new(
            config.service_health.endpoints.clone(),
            HttpFetcher::new(config.service_health.timeout())?,
            config.service_health.interval(),
            config.service_health.schedule,
        );

        let order_handle = tokio::spawn(order_poller.run());
        let health_handle = tokio::spawn(health_poller.run());

        info!(
            order_url = %config.order_feed.url,
            endpoints = config.service_health.endpoints.len(),
            "Dashboard started"
        );

        Ok(Self {
            orders,
            services,
            handles: vec![order_handle, health_handle],
        })
    }

    /// Stops both pollers.
    ///
    /// # Shutdown Process
    ///
    /// The pollers loop forever, so shutdown aborts their tasks. Aborting a
    /// poller also aborts any cycle it still has in flight; nothing waits for
    /// outstanding requests. The clients stay readable and keep returning the
    /// last published snapshot.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if both pollers stopped by cancellation
    /// - `Err(DashboardError::TaskFailed)` if a poller task had panicked
    pub async fn shutdown(self) -> Result<(), DashboardError> {
        info!("Shutting down dashboard...");

        for handle in &self.handles {
            handle.abort();
        }

        for handle in self.handles {
            match handle.await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    error!("Poller task failed: {:?}", e);
                    return Err(DashboardError::TaskFailed(e.to_string()));
                }
            }
        }

        info!("Dashboard shutdown complete.");
        Ok(())
    }
}
