use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::features::sessions::services::SessionService;

/// Background worker that ends idle sessions
pub struct SessionSweeper {
    session_service: Arc<SessionService>,
    sweep_interval: Duration,
}

impl SessionSweeper {
    pub fn new(session_service: Arc<SessionService>, sweep_interval: Duration) -> Self {
        Self {
            session_service,
            sweep_interval,
        }
    }

    /// Run the sweeper in a background loop
    pub async fn run(&self) {
        tracing::info!(
            "Starting session sweeper (interval={}s)",
            self.sweep_interval.as_secs()
        );

        let mut interval = interval(self.sweep_interval);

        loop {
            interval.tick().await;

            let ended = self.session_service.sweep_idle(Instant::now()).await;
            if ended > 0 {
                tracing::debug!(
                    "Sweep finished: ended={}, live={}",
                    ended,
                    self.session_service.session_count().await
                );
            }
        }
    }
}
