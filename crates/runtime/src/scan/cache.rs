//! Per-direction store of the latest digested scan.

use std::collections::HashMap;

use nav_core::{Direction, ScanSummary};

use super::digest::digest_from_log;

/// Latest [`ScanSummary`] per direction.
///
/// At most one entry per direction, overwritten wholesale on `set` and
/// never merged. The cache has no TTL: staleness is resolved by the
/// planner through the consumed-step count, not here.
#[derive(Debug, Default)]
pub struct ScanCache {
    entries: HashMap<Direction, ScanSummary>,
}

impl ScanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a summary, replacing any previous entry for its direction.
    pub fn set(&mut self, summary: ScanSummary) {
        self.entries.insert(summary.direction, summary);
    }

    /// Latest summary for a direction, if any.
    pub fn get(&self, direction: Direction) -> Option<ScanSummary> {
        self.entries.get(&direction).copied()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Re-parse a rolling log and store the result on success.
    ///
    /// Returns the stored summary, or `None` when the log holds no
    /// digestible scan for the requested direction.
    pub fn update_from_log(
        &mut self,
        lines: &[String],
        direction: Option<Direction>,
    ) -> Option<ScanSummary> {
        let summary = digest_from_log(lines, direction)?;
        self.set(summary);
        Some(summary)
    }
}
