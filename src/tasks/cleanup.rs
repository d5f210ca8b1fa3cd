//! Sweep Task
//!
//! Optional background task that purges expired discovery records and
//! nonces on a fixed interval. Without it, expiry happens only on reads.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::AppState;

/// Spawns a task that sweeps both stores every `interval_secs` seconds.
///
/// The returned handle is aborted during graceful shutdown.
pub fn spawn_sweep_task(state: AppState, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!("Starting sweep task with interval of {} seconds", interval_secs);

        loop {
            tokio::time::sleep(interval).await;

            let records = state.discovery.sweep_expired();
            let nonces = state.nonces.sweep_expired();

            if records > 0 || nonces > 0 {
                info!(records, nonces, "Sweep removed expired entries");
            } else {
                debug!("Sweep: nothing expired");
            }
        }
    })
}
