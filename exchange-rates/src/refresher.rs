//! Periodic background refresh.

use std::sync::Arc;
use std::time::Duration;

use currency_types::RateFeed;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::RateCache;

/// Handle to a running refresh task.
pub struct RefreshHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Signals the task to stop and waits for it.
    ///
    /// A refresh already in flight finishes first.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Rate refresh task panicked");
        }
    }
}

/// Spawns a task that refreshes `cache` every `every`.
///
/// The first refresh happens one interval after spawning; the cache is
/// already fresh from construction. Failed refreshes are logged by the cache
/// and the last good table keeps serving.
pub fn spawn_refresher<F>(cache: Arc<RateCache<F>>, every: Duration) -> RefreshHandle
where
    F: RateFeed + 'static,
{
    let (shutdown, mut stopped) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        info!("Rate refresh scheduled every {}s", every.as_secs());

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if cache.refresh().await.is_ok() {
                        debug!("Rate table refreshed");
                    }
                }
                _ = stopped.changed() => break,
            }
        }

        info!("Rate refresh stopped");
    });

    RefreshHandle { shutdown, task }
}
