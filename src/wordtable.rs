//! The table of codes considered word constituents by word boundaries.

use crate::bitset::ClassBits;

/// Which codes count as word characters for \b and \B.
/// The default covers digits, ASCII letters and underscore; callers may add
/// or remove individual codes.
#[derive(Debug, Clone)]
pub struct WordTable {
    bits: ClassBits,
}

impl Default for WordTable {
    fn default() -> WordTable {
        let mut bits = ClassBits::default();
        bits.set_range(b'0', b'9');
        bits.set_range(b'A', b'Z');
        bits.set_range(b'a', b'z');
        bits.set(b'_');
        WordTable { bits }
    }
}

impl WordTable {
    pub fn is_word(&self, c: u8) -> bool {
        self.bits.contains(c)
    }

    /// Make \p c a word constituent.
    pub fn add(&mut self, c: u8) {
        self.bits.set(c);
    }

    /// Make \p c a non-word code.
    pub fn remove(&mut self, c: u8) {
        self.bits.clear(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_members() {
        let wt = WordTable::default();
        assert!(wt.is_word(b'a'));
        assert!(wt.is_word(b'Z'));
        assert!(wt.is_word(b'0'));
        assert!(wt.is_word(b'_'));
        assert!(!wt.is_word(b' '));
        assert!(!wt.is_word(b'-'));
    }

    #[test]
    fn mutation() {
        let mut wt = WordTable::default();
        wt.add(b'-');
        wt.remove(b'_');
        assert!(wt.is_word(b'-'));
        assert!(!wt.is_word(b'_'));
    }
}
