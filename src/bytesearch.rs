//! Delta-table literal searching over bidirectional inputs.

use crate::cursor::{self, Direction};
use crate::indexing::TextInput;
use crate::matchers;
use crate::util::DebugCheckIndex;
use std::cmp;

/// Jump tables for scanning one orientation of a literal pattern.
#[derive(Debug, Clone)]
struct DeltaTables {
    /// The pattern codes in scan order, pre-folded when matching is
    /// case-insensitive.
    pat: Vec<u8>,

    /// delta1[c] is the distance from the rightmost occurrence of code c to
    /// the end of the pattern, or the pattern length when c never occurs.
    delta1: [u32; 256],

    /// delta2[j] is the good-suffix shift for a mismatch at pattern index j.
    /// Always at least 1.
    delta2: Vec<u32>,
}

impl DeltaTables {
    fn new(pat: Vec<u8>, icase: bool) -> DeltaTables {
        let len = pat.len();
        debug_assert!(len > 0, "Empty literal pattern");
        let mut delta1 = [len as u32; 256];
        for (idx, &c) in pat.iter().enumerate() {
            let dist = (len - 1 - idx) as u32;
            delta1[c as usize] = dist;
            if icase {
                // Codes arrive unfolded from the input, so both cases of a
                // letter carry the same entry.
                delta1[c.to_ascii_uppercase() as usize] = dist;
            }
        }
        let delta2 = if icase {
            // With folding there is no reliable good-suffix information;
            // degrade to unit shifts and let delta1 drive the scan.
            vec![1; len]
        } else {
            Self::good_suffix(&pat)
        };
        DeltaTables { pat, delta1, delta2 }
    }

    /// Build the strong good-suffix table via the border construction.
    fn good_suffix(pat: &[u8]) -> Vec<u32> {
        let len = pat.len();
        let mut shift = vec![0usize; len + 1];
        let mut border = vec![0usize; len + 1];

        let mut i = len;
        let mut j = len + 1;
        border[i] = j;
        while i > 0 {
            while j <= len && pat[i - 1] != pat[j - 1] {
                if shift[j] == 0 {
                    shift[j] = j - i;
                }
                j = border[j];
            }
            i -= 1;
            j -= 1;
            border[i] = j;
        }

        let mut j = border[0];
        for i in 0..=len {
            if shift[i] == 0 {
                shift[i] = j;
            }
            if i == j {
                j = border[j];
            }
        }

        // A mismatch at pattern index j consults shift[j + 1].
        (1..=len).map(|idx| shift[idx] as u32).collect()
    }
}

/// A literal-text searcher carrying delta tables for both scan directions.
/// Backward scans run the reversed pattern's tables over a mirrored walk.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    fwd: DeltaTables,
    rev: DeltaTables,
    icase: bool,
}

impl ExactMatcher {
    pub fn new(body: &str, icase: bool) -> ExactMatcher {
        let mut pat: Vec<u8> = body.bytes().collect();
        if icase {
            for c in pat.iter_mut() {
                *c = matchers::fold(*c);
            }
        }
        let mut rpat = pat.clone();
        rpat.reverse();
        ExactMatcher {
            fwd: DeltaTables::new(pat, icase),
            rev: DeltaTables::new(rpat, icase),
            icase,
        }
    }

    /// Find the \p count-th non-overlapping occurrence, scanning from
    /// \p start in direction \p dir.
    /// \return the occurrence's span, ordered (left, right), or None.
    pub fn scan<Input: TextInput, Dir: Direction>(
        &self,
        input: &Input,
        dir: Dir,
        start: Input::Position,
        count: usize,
    ) -> Option<(Input::Position, Input::Position)> {
        debug_assert!(count > 0, "Occurrence count must be positive");
        let mut pos = start;
        let mut found = None;
        for _ in 0..count {
            let span = self.scan_one(input, dir, pos)?;
            pos = if Dir::FORWARD { span.1 } else { span.0 };
            found = Some(span);
        }
        found
    }

    fn scan_one<Input: TextInput, Dir: Direction>(
        &self,
        input: &Input,
        dir: Dir,
        start: Input::Position,
    ) -> Option<(Input::Position, Input::Position)> {
        let tables = if Dir::FORWARD { &self.fwd } else { &self.rev };
        let pat = &tables.pat;
        let len = pat.len();

        if Dir::FORWARD && len == 1 && !self.icase {
            // Single exact code: defer to the input's byte finder.
            let left = input.find_byte_right(start, *pat.iat(0))?;
            let mut right = left;
            input.next_right(&mut right);
            return Some((left, right));
        }

        let mut wpos = start;
        loop {
            // Far end of the candidate window, in the scan direction.
            let mut far = wpos;
            if !cursor::try_advance(input, dir, &mut far, len) {
                return None;
            }

            // Compare from the far end back toward the window start.
            let mut cur = far;
            let mut j = len;
            let mismatch = loop {
                if j == 0 {
                    break None;
                }
                let c = match cursor::next_back(input, dir, &mut cur) {
                    Some(c) => c,
                    None => rs_unreachable!("Window extent was just verified"),
                };
                let fc = if self.icase { matchers::fold(c) } else { c };
                if fc != *pat.iat(j - 1) {
                    break Some((j - 1, c));
                }
                j -= 1;
            };

            let (jidx, bad) = match mismatch {
                None => {
                    return Some(if Dir::FORWARD { (wpos, far) } else { (far, wpos) });
                }
                Some(m) => m,
            };

            // Window shift: the larger of the bad-code jump, converted from a
            // far-end distance to a start distance, and the good-suffix jump.
            let tail = len - 1 - jidx;
            let d1 = tables.delta1[bad as usize] as usize;
            let d2 = *tables.delta2.iat(jidx) as usize;
            let shift = cmp::max(cmp::max(d1.saturating_sub(tail), d2), 1);
            if !cursor::try_advance(input, dir, &mut wpos, shift) {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{Backward, Forward};
    use crate::indexing::{BufInput, BufPos, StrInput};

    fn fwd(pattern: &str, text: &str) -> Option<(usize, usize)> {
        let m = ExactMatcher::new(pattern, false);
        m.scan(&StrInput::new(text), Forward, 0, 1)
    }

    #[test]
    fn forward_leftmost() {
        assert_eq!(fwd("abc", "xxabcxxabc"), Some((2, 5)));
        assert_eq!(fwd("abc", "abc"), Some((0, 3)));
        assert_eq!(fwd("abc", "ab"), None);
        assert_eq!(fwd("abc", ""), None);
        assert_eq!(fwd("a", "xya"), Some((2, 3)));
    }

    #[test]
    fn repeated_suffixes() {
        // Exercises the good-suffix shift.
        assert_eq!(fwd("abab", "aabaabab"), Some((4, 8)));
        assert_eq!(fwd("aaa", "abaabaaa"), Some((5, 8)));
    }

    #[test]
    fn backward_rightmost() {
        let m = ExactMatcher::new("abc", false);
        let input = StrInput::new("xxabcxxabcx");
        let end = input.right_end();
        assert_eq!(m.scan(&input, Backward, end, 1), Some((7, 10)));
        assert_eq!(m.scan(&input, Backward, end, 2), Some((2, 5)));
        assert_eq!(m.scan(&input, Backward, end, 3), None);
    }

    #[test]
    fn backward_respects_start() {
        let m = ExactMatcher::new("ab", false);
        let input = StrInput::new("ababab");
        // Starting mid-string only sees what lies to the left.
        assert_eq!(m.scan(&input, Backward, 3, 1), Some((0, 2)));
    }

    #[test]
    fn count_th_occurrence() {
        let m = ExactMatcher::new("aa", false);
        let input = StrInput::new("aaaa");
        // Non-overlapping: the second occurrence starts where the first ends.
        assert_eq!(m.scan(&input, Forward, 0, 1), Some((0, 2)));
        assert_eq!(m.scan(&input, Forward, 0, 2), Some((2, 4)));
        assert_eq!(m.scan(&input, Forward, 0, 3), None);
    }

    #[test]
    fn case_insensitive() {
        let m = ExactMatcher::new("AbC", true);
        let input = StrInput::new("xaBcx");
        assert_eq!(m.scan(&input, Forward, 0, 1), Some((1, 4)));
        let exact = ExactMatcher::new("AbC", false);
        assert_eq!(exact.scan(&input, Forward, 0, 1), None);
    }

    #[test]
    fn spans_buffer_lines() {
        let lines = vec!["one two", "three"];
        let input = BufInput::new(&lines);
        let m = ExactMatcher::new("two\nthree", false);
        let got = m.scan(&input, Forward, input.left_end(), 1);
        assert_eq!(got, Some((BufPos::new(0, 4), BufPos::new(1, 5))));
    }
}
