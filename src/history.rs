//! Recall of recently used pattern texts.

use std::collections::VecDeque;

/// A bounded list of recently used pattern texts, newest first.
/// Re-entering the newest text is a no-op; older duplicates are kept, since
/// recall order is what matters.
#[derive(Debug, Clone)]
pub struct PatternHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl PatternHistory {
    pub fn new(capacity: usize) -> PatternHistory {
        debug_assert!(capacity > 0, "History must hold at least one entry");
        PatternHistory {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a pattern text as the most recent entry.
    pub fn push(&mut self, body: &str) {
        if self.latest() == Some(body) {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(body.to_string());
    }

    /// \return the most recently recorded text, if any.
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(|s| s.as_str())
    }

    /// Iterate entries from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
