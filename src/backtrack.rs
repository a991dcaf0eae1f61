//! The backtracking element matcher and the scan drivers.

use crate::bytesearch::ExactMatcher;
use crate::cursor::{self, Direction};
use crate::groups::GroupData;
use crate::indexing::{PositionType, TextInput};
use crate::matchers;
use crate::meta::{CompiledPattern, Meta, MetaKind, Quant};
use crate::util::DebugCheckIndex;
use crate::wordtable::WordTable;

/// Number of anchor attempts before logging that a scan is still running.
const SLOW_SCAN_NOTICE: usize = 1 << 20;

/// The result of a successful scan: the overall span and the group spans.
/// Group 0 is the whole match.
#[derive(Debug, Clone)]
pub struct ScanMatch<P: PositionType> {
    pub start: P,
    pub end: P,
    pub groups: Vec<GroupData<P>>,
}

/// Attempts matches of a compiled element list at a fixed position.
pub struct MatchAttempter<'a, Input: TextInput> {
    pat: &'a CompiledPattern,
    word: &'a WordTable,
    groups: Vec<GroupData<Input::Position>>,
}

impl<'a, Input: TextInput> MatchAttempter<'a, Input> {
    pub fn new(pat: &'a CompiledPattern, word: &'a WordTable) -> Self {
        MatchAttempter {
            pat,
            word,
            groups: vec![GroupData::new(); pat.groups as usize],
        }
    }

    fn reset_groups(&mut self) {
        for g in self.groups.iter_mut() {
            *g = GroupData::new();
        }
    }

    /// Attempt a match anchored at \p pos.
    /// \return the position reached at the goal, or None.
    fn try_match<Dir: Direction>(
        &mut self,
        input: &Input,
        dir: Dir,
        pos: Input::Position,
    ) -> Option<Input::Position> {
        let pat = self.pat;
        let elems: &[Meta] = if Dir::FORWARD {
            &pat.forward
        } else {
            &pat.backward
        };
        self.try_at(input, dir, elems, pos)
    }

    fn try_at<Dir: Direction>(
        &mut self,
        input: &Input,
        dir: Dir,
        elems: &[Meta],
        pos: Input::Position,
    ) -> Option<Input::Position> {
        let (elem, rest) = match elems.split_first() {
            Some(x) => x,
            None => rs_unreachable!("Element lists are goal-terminated"),
        };
        if let Some(quant) = elem.quant {
            return self.try_quantified(input, dir, elem.kind, quant, rest, pos);
        }
        let pat = self.pat;
        match elem.kind {
            MetaKind::Goal => Some(pos),

            MetaKind::BeginLine => {
                let ok = pos == input.left_end()
                    || (pat.options.multiline && input.peek_left(pos) == Some(b'\n'));
                if ok {
                    self.try_at(input, dir, rest, pos)
                } else {
                    None
                }
            }

            MetaKind::EndLine => {
                let ok = pos == input.right_end()
                    || (pat.options.multiline && input.peek_right(pos) == Some(b'\n'));
                if ok {
                    self.try_at(input, dir, rest, pos)
                } else {
                    None
                }
            }

            MetaKind::BeginInput => {
                if pos == input.left_end() {
                    self.try_at(input, dir, rest, pos)
                } else {
                    None
                }
            }

            MetaKind::EndInput => {
                if pos == input.right_end() {
                    self.try_at(input, dir, rest, pos)
                } else {
                    None
                }
            }

            MetaKind::EndInputAlt => {
                // The very end, or just before a sole trailing newline.
                let ok = pos == input.right_end() || {
                    let mut p = pos;
                    input.next_right(&mut p) == Some(b'\n') && p == input.right_end()
                };
                if ok {
                    self.try_at(input, dir, rest, pos)
                } else {
                    None
                }
            }

            MetaKind::WordBoundary { invert } => {
                let left_word = input
                    .peek_left(pos)
                    .map_or(false, |c| self.word.is_word(c));
                let right_word = input
                    .peek_right(pos)
                    .map_or(false, |c| self.word.is_word(c));
                let boundary = left_word != right_word;
                if boundary != invert {
                    self.try_at(input, dir, rest, pos)
                } else {
                    None
                }
            }

            // Group edges record the current position directly: a forward
            // scan reaches the begin marker at the left edge and a backward
            // scan reaches it last, also at the left edge. Likewise for ends.
            MetaKind::GroupBegin(group) => {
                let idx = group as usize;
                let saved = self.groups.iat(idx).start;
                self.groups.mat(idx).start = Some(pos);
                let res = self.try_at(input, dir, rest, pos);
                if res.is_none() {
                    self.groups.mat(idx).start = saved;
                }
                res
            }

            MetaKind::GroupEnd(group) => {
                let idx = group as usize;
                let saved = self.groups.iat(idx).end;
                self.groups.mat(idx).end = Some(pos);
                let res = self.try_at(input, dir, rest, pos);
                if res.is_none() {
                    self.groups.mat(idx).end = saved;
                }
                res
            }

            kind => {
                debug_assert!(kind.consuming(), "Unhandled zero-width element");
                let mut next = pos;
                match cursor::next(input, dir, &mut next) {
                    Some(c) if matchers::match_one(kind, pat, c) => {
                        self.try_at(input, dir, rest, next)
                    }
                    _ => None,
                }
            }
        }
    }

    fn try_quantified<Dir: Direction>(
        &mut self,
        input: &Input,
        dir: Dir,
        kind: MetaKind,
        quant: Quant,
        rest: &[Meta],
        pos: Input::Position,
    ) -> Option<Input::Position> {
        let pat = self.pat;
        if quant.greedy {
            // Consume as much as possible, then give back one code at a time.
            let mut ends = vec![pos];
            let mut cur = pos;
            while ends.len() - 1 < quant.max {
                match cursor::next(input, dir, &mut cur) {
                    Some(c) if matchers::match_one(kind, pat, c) => ends.push(cur),
                    _ => break,
                }
            }
            if ends.len() - 1 < quant.min {
                return None;
            }
            for &end in ends[quant.min..].iter().rev() {
                if let Some(goal) = self.try_at(input, dir, rest, end) {
                    return Some(goal);
                }
            }
            None
        } else {
            // Lazy: take the minimum, then extend only on demand.
            let mut cur = pos;
            for _ in 0..quant.min {
                match cursor::next(input, dir, &mut cur) {
                    Some(c) if matchers::match_one(kind, pat, c) => {}
                    _ => return None,
                }
            }
            let mut consumed = quant.min;
            loop {
                if let Some(goal) = self.try_at(input, dir, rest, cur) {
                    return Some(goal);
                }
                if consumed >= quant.max {
                    return None;
                }
                match cursor::next(input, dir, &mut cur) {
                    Some(c) if matchers::match_one(kind, pat, c) => consumed += 1,
                    _ => return None,
                }
            }
        }
    }
}

#[inline(always)]
fn passed_origin<P: PositionType, Dir: Direction>(pos: P, origin: P) -> bool {
    if Dir::FORWARD {
        pos >= origin
    } else {
        pos <= origin
    }
}

/// Scan for the \p count-th match of a compiled element list, starting at
/// \p start and moving in direction \p dir. If \p wrap is set the scan wraps
/// once at the input end and stops upon returning to the origin.
pub fn scan_elements<Input: TextInput, Dir: Direction>(
    pat: &CompiledPattern,
    word: &WordTable,
    input: &Input,
    dir: Dir,
    start: Input::Position,
    count: usize,
    wrap: bool,
) -> Option<ScanMatch<Input::Position>> {
    debug_assert!(count > 0, "Occurrence count must be positive");
    let mut attempter = MatchAttempter::new(pat, word);
    let mut pos = start;
    let mut wrapped = false;
    let mut remaining = count;
    let mut attempts: usize = 0;
    loop {
        attempts += 1;
        if attempts == SLOW_SCAN_NOTICE {
            log::info!("pattern scan still running after {} anchor attempts", attempts);
        }
        attempter.reset_groups();
        if let Some(goal) = attempter.try_match(input, dir, pos) {
            let (left, right) = if Dir::FORWARD { (pos, goal) } else { (goal, pos) };
            remaining -= 1;
            if remaining == 0 {
                let mut groups = attempter.groups;
                *groups.mat(0) = GroupData {
                    start: Some(left),
                    end: Some(right),
                };
                return Some(ScanMatch {
                    start: left,
                    end: right,
                    groups,
                });
            }
            // Continue past the match. An empty match falls through to the
            // single-code advance so the scan cannot stall.
            let next = if Dir::FORWARD { right } else { left };
            if next != pos {
                pos = next;
                if wrapped && passed_origin::<_, Dir>(pos, start) {
                    return None;
                }
                continue;
            }
        }
        if cursor::next(input, dir, &mut pos).is_none() {
            if !wrap || wrapped {
                return None;
            }
            wrapped = true;
            pos = if Dir::FORWARD {
                input.left_end()
            } else {
                input.right_end()
            };
            if passed_origin::<_, Dir>(pos, start) {
                return None;
            }
            continue;
        }
        if wrapped && passed_origin::<_, Dir>(pos, start) {
            return None;
        }
    }
}

/// Scan for the \p count-th occurrence of a literal pattern via its delta
/// tables, with the same wrap behavior as scan_elements.
pub fn scan_literal<Input: TextInput, Dir: Direction>(
    matcher: &ExactMatcher,
    input: &Input,
    dir: Dir,
    start: Input::Position,
    count: usize,
    wrap: bool,
) -> Option<(Input::Position, Input::Position)> {
    debug_assert!(count > 0, "Occurrence count must be positive");
    let mut pos = start;
    let mut wrapped = false;
    let mut remaining = count;
    loop {
        match matcher.scan(input, dir, pos, 1) {
            Some((left, right)) => {
                // After the wrap, a span reaching the origin re-covers text
                // already scanned; the search has come full circle.
                let lead = if Dir::FORWARD { left } else { right };
                if wrapped && passed_origin::<_, Dir>(lead, start) {
                    return None;
                }
                remaining -= 1;
                if remaining == 0 {
                    return Some((left, right));
                }
                pos = if Dir::FORWARD { right } else { left };
            }
            None => {
                if !wrap || wrapped {
                    return None;
                }
                wrapped = true;
                pos = if Dir::FORWARD {
                    input.left_end()
                } else {
                    input.right_end()
                };
            }
        }
    }
}
