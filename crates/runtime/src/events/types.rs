//! Typed event payloads per topic.

use serde::{Deserialize, Serialize};

use nav_core::Direction;

/// Scan lifecycle events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScanEvent {
    /// A fresh scan was requested from the sensor.
    Requested { direction: Direction },

    /// A scan was digested and stored in the cache.
    Digested { direction: Direction, safe_len: u8 },

    /// The per-direction cache was dropped wholesale.
    CacheCleared,
}

/// March planning and submission events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MovementEvent {
    /// A plan was computed and its compound command queued.
    Planned {
        direction: Direction,
        steps: u8,
        command: String,
    },

    /// Planning could not produce a command; always carries a
    /// human-readable reason, never a silent no-op.
    Blocked { direction: Direction, reason: String },

    /// The queued command was accepted by the transport.
    Submitted { program: String, gas_used: u64 },

    /// The queued command was rejected by the transport.
    SubmissionFailed { program: String, error: String },
}

/// Skill gate events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkillEvent {
    /// A skill passed its gate and its behavior was invoked.
    Dispatched { name: String },

    /// The gate refused the skill with the given reason.
    Rejected { name: String, reason: String },
}
