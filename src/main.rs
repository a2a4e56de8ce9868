//! # Ops Dashboard (console)
//!
//! Runs both pollers and prints a plain-text rendering of their snapshots on
//! a separate timer, until Ctrl-C.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use ops_dashboard::clients::{OrderFeedClient, ServiceHealthClient, SnapshotClient};
use ops_dashboard::lifecycle::{setup_tracing, DashboardConfig, DashboardSystem};
use ops_dashboard::DashboardError;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "ops-dashboard", about = "Live order pipeline and service health monitor")]
struct Cli {
    /// TOML configuration file
    #[arg(long, env = "DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// How often to print the dashboard, in milliseconds
    #[arg(long, default_value_t = 5_000)]
    render_interval_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    let cli = Cli::parse();
    setup_tracing();

    let config = DashboardConfig::load(cli.config.as_deref())?;
    let system = DashboardSystem::start(&config)?;

    let mut render = tokio::time::interval(Duration::from_millis(cli.render_interval_ms.max(1)));
    loop {
        tokio::select! {
            _ = render.tick() => {
                println!("{}", render_text(&system.orders, &system.services));
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received");
                break;
            }
        }
    }

    system.shutdown().await
}

fn render_text(orders: &OrderFeedClient, services: &ServiceHealthClient) -> String {
    let mut out = String::new();

    let health = services.snapshot();
    out.push_str("== Service Status ==\n");
    for endpoint in services.endpoints() {
        let status = health
            .data
            .get(&endpoint.key)
            .map(|s| s.to_string())
            .unwrap_or_default();
        out.push_str(&format!("  {:<24} {}\n", endpoint.name, status));
    }
    if let Some(at) = health.refreshed_at {
        out.push_str(&format!("  last updated {}\n", at.format("%H:%M:%S")));
    }

    let feed = orders.snapshot();
    out.push_str("== Order Monitor ==\n");
    if feed.data.is_empty() {
        out.push_str("  No orders found\n");
    }
    for order in &feed.data {
        out.push_str(&format!(
            "  {:<6} {:<16} {:>10.2} {:<18} {}\n",
            order.id.to_string(),
            order.customer_id,
            order.total_amount,
            order.status.to_string(),
            order.created_at.format("%Y-%m-%d %H:%M:%S"),
        ));
    }
    out
}
