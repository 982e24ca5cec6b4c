use std::sync::Arc;

use chrono::Local;
use log::info;
use tokio::sync::watch;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::earnings::{compute_snapshot, EarningsSnapshot};
use crate::settings::SettingsStore;

const REFRESH_INTERVAL_SECS: u64 = 1;

/// Sample the local clock once per second and publish a fresh snapshot.
/// Runs until cancelled or until every receiver is gone.
pub async fn refresh_loop(
    settings: Arc<SettingsStore>,
    tx: watch::Sender<EarningsSnapshot>,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(Duration::from_secs(REFRESH_INTERVAL_SECS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Local::now().naive_local();
                let snapshot = compute_snapshot(&settings.settings(), now);
                if tx.send(snapshot).is_err() {
                    // Every receiver dropped: the display is gone.
                    break;
                }
            }
            _ = cancel_token.cancelled() => {
                info!("refresh loop shutting down");
                break;
            }
        }
    }
}
