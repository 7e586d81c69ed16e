//! Background stats refresher
//!
//! Periodically re-reads the vault's exchange rate and totals and
//! publishes them on a watch channel. Fetch failures already degrade to
//! defaults inside the fetch layer, so a flaky endpoint shows up as stale
//! numbers rather than a dead loop. The loop exits once every receiver is
//! dropped.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use lumenvault_core::NetworkConfig;
use soroban_client::SorobanRpc;

use crate::calculator::{RateTracker, YieldEstimate};
use crate::fetch::{fetch_protocol_stats, ProtocolStats};

pub const STATS_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// One published observation of the protocol
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub stats: ProtocolStats,
    /// Present once the rate has been observed long enough to annualize
    pub yield_estimate: Option<YieldEstimate>,
}

/// Spawn the refresh loop. The initial receiver value is the default
/// snapshot; the first real observation lands after one interval.
pub fn spawn_stats_refresher(
    rpc: Arc<dyn SorobanRpc>,
    config: NetworkConfig,
    interval: Duration,
) -> (JoinHandle<()>, watch::Receiver<StatsSnapshot>) {
    let (tx, rx) = watch::channel(StatsSnapshot::default());

    let handle = tokio::spawn(async move {
        let mut tracker = RateTracker::new();
        loop {
            tokio::time::sleep(interval).await;

            let stats = fetch_protocol_stats(rpc.as_ref(), &config).await;
            tracker.record(stats.exchange_rate);

            tracing::debug!(
                rate = stats.exchange_rate,
                total_assets = stats.total_assets_xlm,
                "refreshed protocol stats"
            );

            let snapshot = StatsSnapshot {
                stats,
                yield_estimate: tracker.estimate_apy(),
            };
            if tx.send(snapshot).is_err() {
                break;
            }
        }
    });

    (handle, rx)
}
