//! Rolling history of issued commands and scan markers.
//!
//! The planner needs to know how many columns were already marched on the
//! strength of the scan it is about to reuse. That count is derived from
//! this history: the contiguous run of matching march steps after the most
//! recent scan marker for the direction. Any other entry in between resets
//! the running count — an interruption invalidates the remembered ground.

use std::collections::VecDeque;

use nav_core::Direction;

/// One remembered command-stream entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEntry {
    /// A fresh scan was requested for the direction.
    ScanIssued(Direction),

    /// A compound march command was submitted, advancing `steps` columns.
    March { direction: Direction, steps: u8 },

    /// Any other externally visible command.
    Other(String),
}

/// Bounded ring of recent [`HistoryEntry`] values, oldest first.
#[derive(Debug)]
pub struct CommandHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl CommandHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    /// Append an entry, evicting the oldest when full.
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Columns already marched on the most recent scan of `direction`.
    ///
    /// Walks forward from the last `ScanIssued(direction)` marker summing
    /// matching march steps; any non-matching entry resets the running
    /// count to zero (the run restarts after the interruption). No marker
    /// in the retained history means nothing is known to be consumed.
    pub fn consumed_since_scan(&self, direction: Direction) -> u8 {
        let marker = self
            .entries
            .iter()
            .rposition(|entry| matches!(entry, HistoryEntry::ScanIssued(d) if *d == direction));
        let Some(marker) = marker else {
            return 0;
        };

        let mut consumed: u32 = 0;
        for entry in self.entries.iter().skip(marker + 1) {
            match entry {
                HistoryEntry::March {
                    direction: marched,
                    steps,
                } if *marched == direction => {
                    consumed = consumed.saturating_add(*steps as u32);
                }
                _ => consumed = 0,
            }
        }

        consumed.min(u8::MAX as u32) as u8
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entries, newest last.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }
}
