//! TTL Cleanup Task
//!
//! Background task that periodically removes expired store entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::store::StoreHandle;

/// Spawns a background task that periodically purges expired store entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. Expired entries are also dropped lazily on read, so the
/// sweep only reclaims entries nobody touches.
///
/// # Arguments
/// * `store` - Handle to the shared store
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
pub fn spawn_cleanup_task(store: StoreHandle, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            match store.purge_expired() {
                Ok(removed) if removed > 0 => {
                    info!("TTL cleanup: removed {} expired entries", removed);
                }
                Ok(_) => {
                    debug!("TTL cleanup: no expired entries found");
                }
                Err(err) => {
                    warn!("TTL cleanup failed: {}", err);
                }
            }
        }
    })
}
