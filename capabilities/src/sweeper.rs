//! Background task that purges expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::cache::InterfaceCache;

/// Run [`InterfaceCache::clean_expired`] every `every` until `shutdown`
/// fires (or its sender is dropped).
pub fn spawn_sweeper(
    cache: Arc<InterfaceCache>,
    every: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tracing::debug!(
            interval = %atk_utils::format_duration(every),
            ttl = %atk_utils::format_duration(cache.ttl()),
            "capability cache sweeper started"
        );
        loop {
            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    tracing::info!("capability cache sweeper shutting down");
                    break;
                }
                _ = interval.tick() => {
                    let removed = cache.clean_expired();
                    if removed > 0 {
                        tracing::debug!(removed, remaining = cache.len(), "purged expired capability entries");
                    }
                }
            }
        }
    })
}
