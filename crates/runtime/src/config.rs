//! Runtime configuration shared across the navigator and its stores.

use std::time::Duration;

/// Tunables for the navigation runtime.
#[derive(Debug, Clone)]
pub struct NavConfig {
    /// Fixed short wait applied to a fresh scan request before the planner
    /// gives up to "blocked". A heuristic wait, not a hard deadline.
    pub scan_wait: Duration,

    /// Lines retained in the rolling scan log; bounds the backwards search.
    pub scan_log_capacity: usize,

    /// Entries retained in the command history ring.
    pub history_capacity: usize,

    /// Broadcast buffer size per event topic.
    pub event_buffer_size: usize,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            scan_wait: Duration::from_millis(1500),
            scan_log_capacity: 256,
            history_capacity: 128,
            event_buffer_size: 100,
        }
    }
}
