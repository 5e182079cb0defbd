//! Bounded rolling buffer of raw textual scan output.

use std::collections::VecDeque;

/// Rolling line buffer the backwards scan search runs over.
///
/// The capacity bounds both memory and how far back
/// [`super::digest_from_log`] can look; older lines fall off the front.
#[derive(Debug)]
pub struct ScanLogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl ScanLogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    /// Append one line, evicting the oldest when full.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    /// Append every line of a block of text.
    pub fn push_text(&mut self, text: &str) {
        for line in text.lines() {
            self.push(line);
        }
    }

    /// Snapshot of the buffered lines, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_lines_at_capacity() {
        let mut log = ScanLogBuffer::new(3);
        for line in ["a", "b", "c", "d"] {
            log.push(line);
        }

        assert_eq!(log.snapshot(), vec!["b", "c", "d"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn push_text_splits_lines() {
        let mut log = ScanLogBuffer::new(10);
        log.push_text("scan east:\n0: Air Air Air Air Air");

        assert_eq!(log.len(), 2);
        assert_eq!(log.snapshot()[0], "scan east:");
    }
}
