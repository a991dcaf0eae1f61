//! Capture group bookkeeping and retention of matched text.

use crate::indexing::PositionType;

/// Recorded edges for one capture group during a match attempt.
/// The start is always the left edge and the end the right edge, regardless
/// of scan direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GroupData<P: PositionType> {
    pub start: Option<P>,
    pub end: Option<P>,
}

impl<P: PositionType> GroupData<P> {
    pub fn new() -> GroupData<P> {
        GroupData {
            start: None,
            end: None,
        }
    }

    /// \return the span if both edges were recorded.
    pub fn as_span(&self) -> Option<(P, P)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

impl<P: PositionType> Default for GroupData<P> {
    fn default() -> Self {
        GroupData::new()
    }
}

/// The retained text of the most recent successful match, per group.
/// Group 0 is the whole match. Saving a new match overwrites only the groups
/// that participated; other entries keep their former content.
#[derive(Debug, Clone, Default)]
pub struct SavedMatch {
    groups: Vec<Option<Vec<u8>>>,
}

impl SavedMatch {
    /// Record the text of group \p idx.
    pub fn save(&mut self, idx: usize, text: Vec<u8>) {
        if self.groups.len() <= idx {
            self.groups.resize(idx + 1, None);
        }
        self.groups[idx] = Some(text);
    }

    /// \return the retained text of group \p idx, if any.
    pub fn group_text(&self, idx: usize) -> Option<&[u8]> {
        self.groups.get(idx)?.as_deref()
    }

    /// \return the retained text of the whole match, if any.
    pub fn last_match(&self) -> Option<&[u8]> {
        self.group_text(0)
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }
}
