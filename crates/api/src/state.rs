//! Application state for the API server.

use wayfarer_coordinator::{Coordinator, CoordinatorConfig};

/// Shared application state for the API server.
pub struct AppState {
    /// The coordinator that handles the conversation
    pub coordinator: Coordinator,

    /// Server start time (for health checks)
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create application state from coordinator configuration.
    pub fn new(config: CoordinatorConfig) -> wayfarer_common::Result<Self> {
        Ok(Self::with_coordinator(Coordinator::new(config)?))
    }

    /// Wrap an already-built coordinator.
    pub fn with_coordinator(coordinator: Coordinator) -> Self {
        Self {
            coordinator,
            start_time: std::time::Instant::now(),
        }
    }

    /// Get the uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
