use std::sync::Arc;
use std::time::{Duration, Instant};

use tinylink_core::Registry;

#[derive(Clone)]
pub struct AppState {
    registry: Arc<dyn Registry>,
    started_at: Instant,
}

impl AppState {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self {
            registry,
            started_at: Instant::now(),
        }
    }

    pub fn registry(&self) -> &dyn Registry {
        self.registry.as_ref()
    }

    /// Time elapsed since the state was built, i.e. process uptime.
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
