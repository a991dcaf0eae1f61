use crate::backtrack::{self, ScanMatch};
use crate::bytesearch::ExactMatcher;
use crate::compile;
use crate::cursor::{Backward, Forward};
use crate::groups::{GroupData, SavedMatch};
use crate::indexing::{BufInput, BufPos, Buffer, StrInput, TextInput};
use crate::meta::CompiledPattern;
use crate::wordtable::WordTable;
use core::{fmt, str::FromStr};
use std::cell::OnceCell;

pub use crate::compile::Error;

/// The option letters accepted in a pattern's ':letters' suffix.
const OPTION_LETTERS: &str = "mierp";

/// Matching options for a pattern.
/// The default is case-sensitive matching with metacharacters recognized and
/// line anchors confined to the input edges.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// If set, fold case when matching. The 'i' letter.
    pub ignore_case: bool,

    /// If set, match case exactly even where an embedding application would
    /// default to folding. The 'e' letter. Conflicts with ignore_case.
    pub exact_case: bool,

    /// If set, ^ and $ match at line separators, not just the input edges.
    /// The 'm' letter.
    pub multiline: bool,

    /// If set, the body is literal text and no metacharacter is recognized.
    /// The 'p' letter. Conflicts with regex.
    pub plain_text: bool,

    /// If set, force metacharacter interpretation. This is already the
    /// default; the 'r' letter exists to override an embedding application's
    /// plain-text default.
    pub regex: bool,

    /// If set, a substitution applies to every occurrence instead of the
    /// first. There is no option letter; substitution commands set this
    /// programmatically.
    pub repeat_all: bool,
}

impl Options {
    /// Construct Options from a string of option letters.
    pub fn from_letters(letters: &str) -> Result<Options, Error> {
        let mut result = Options::default();
        for c in letters.chars() {
            match c {
                'm' => result.multiline = true,
                'i' => result.ignore_case = true,
                'e' => result.exact_case = true,
                'r' => result.regex = true,
                'p' => result.plain_text = true,
                other => {
                    return Err(Error {
                        text: format!("Unknown option letter '{}'", other),
                    })
                }
            }
        }
        result.validate()?;
        Ok(result)
    }

    fn validate(self) -> Result<(), Error> {
        if self.ignore_case && self.exact_case {
            return Err(Error {
                text: "Options 'i' and 'e' conflict".to_string(),
            });
        }
        if self.plain_text && self.regex {
            return Err(Error {
                text: "Options 'p' and 'r' conflict".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.multiline {
            f.write_str("m")?;
        }
        if self.ignore_case {
            f.write_str("i")?;
        }
        if self.exact_case {
            f.write_str("e")?;
        }
        if self.regex {
            f.write_str("r")?;
        }
        if self.plain_text {
            f.write_str("p")?;
        }
        Ok(())
    }
}

/// Split a pattern specification into its body and option letters.
/// Options are a trailing ':letters' suffix. A colon at the very start, a
/// trailing colon, or a suffix with characters outside the option set is
/// part of the body.
pub fn split_options(spec: &str) -> (&str, &str) {
    if let Some(idx) = spec.rfind(':') {
        let suffix = &spec[idx + 1..];
        if idx > 0 && !suffix.is_empty() && suffix.chars().all(|c| OPTION_LETTERS.contains(c)) {
            return (&spec[..idx], suffix);
        }
    }
    (spec, "")
}

/// Which way a scan walks the input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScanDirection {
    Forward,
    Backward,
}

/// Range is used to express the extent of a match, as indexes into the input
/// string.
pub type Range = core::ops::Range<usize>;

/// A Match represents a portion of a string which was found to match a
/// Pattern.
#[derive(Debug, Clone)]
pub struct Match {
    /// The total range of the match. Note this may be empty, if the pattern
    /// matched an empty string.
    pub range: Range,

    /// The list of captures. This has length equal to the number of capturing
    /// groups in the pattern. For each capture, if the value is None, that
    /// group did not record a span.
    pub captures: Vec<Option<Range>>,
}

impl Match {
    /// Access a group by index. Index 0 is the total match, index 1 the
    /// first capture group.
    #[inline]
    pub fn group(&self, idx: usize) -> Option<Range> {
        if idx == 0 {
            Some(self.range.clone())
        } else {
            self.captures.get(idx - 1)?.clone()
        }
    }

    /// Returns the range over the starting and ending offsets of the match.
    #[inline]
    pub fn range(&self) -> Range {
        self.range.clone()
    }

    /// Returns the starting offset of the match in the haystack.
    #[inline]
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// Returns the ending offset of the match in the haystack.
    #[inline]
    pub fn end(&self) -> usize {
        self.range.end
    }

    fn from_scan(m: ScanMatch<usize>) -> Match {
        let captures = m
            .groups
            .iter()
            .skip(1)
            .map(|g| g.as_span().map(|(s, e)| s..e))
            .collect();
        Match {
            range: m.start..m.end,
            captures,
        }
    }
}

/// A match within a buffer, with positions as line and offset pairs.
#[derive(Debug, Clone)]
pub struct BufMatch {
    pub start: BufPos,
    pub end: BufPos,

    /// Capture group spans, ordered left to right regardless of scan
    /// direction.
    pub captures: Vec<Option<(BufPos, BufPos)>>,
}

/// A Pattern is the compiled version of a search specification.
#[derive(Debug, Clone)]
pub struct Pattern {
    body: String,
    compiled: CompiledPattern,

    /// Delta tables for the literal engine, built on first use. A pattern
    /// with metacharacters never builds them.
    tables: OnceCell<ExactMatcher>,
}

impl Pattern {
    /// Compile a pattern specification, which may carry a ':letters' option
    /// suffix.
    /// An Error is returned if the syntax or the options are invalid.
    /// Note compilation is relatively expensive; prefer to cache a Pattern
    /// which is intended to be used more than once.
    #[inline]
    pub fn new(spec: &str) -> Result<Pattern, Error> {
        let (body, letters) = split_options(spec);
        let options = Options::from_letters(letters)?;
        Self::with_options(body, options)
    }

    /// Compile a pattern body with explicit options.
    pub fn with_options(body: &str, options: Options) -> Result<Pattern, Error> {
        options.validate()?;
        if body.is_empty() {
            return Err(Error {
                text: "Empty pattern".to_string(),
            });
        }
        let compiled = if options.plain_text {
            compile::literal_pattern(body, options)
        } else {
            compile::try_parse(body, options)?
        };
        Ok(Pattern {
            body: body.to_string(),
            compiled,
            tables: OnceCell::new(),
        })
    }

    /// \return the pattern body, without any option suffix.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn options(&self) -> Options {
        self.compiled.options
    }

    /// \return whether matching runs the element engine. False means the
    /// body is literal text served by the delta-table search.
    pub fn sregical(&self) -> bool {
        self.compiled.sregical
    }

    /// \return the number of groups, counting group 0 (the whole match).
    pub fn group_count(&self) -> usize {
        self.compiled.groups as usize
    }

    fn matcher(&self) -> &ExactMatcher {
        debug_assert!(!self.compiled.sregical, "Literal engine on element pattern");
        self.tables
            .get_or_init(|| ExactMatcher::new(&self.body, self.compiled.options.ignore_case))
    }

    /// Searches `text` to find the first match.
    #[inline]
    pub fn find(&self, text: &str) -> Option<Match> {
        self.find_from(text, 0, ScanDirection::Forward)
    }

    /// Searches `text` for a match, scanning from byte offset `start` in the
    /// given direction. A backward scan inspects only text left of `start`.
    pub fn find_from(&self, text: &str, start: usize, dir: ScanDirection) -> Option<Match> {
        let input = StrInput::new(text);
        let word = WordTable::default();
        self.scan_input(&input, start, dir, 1, false, &word)
            .map(Match::from_scan)
    }

    /// Searches `text`, returning an iterator over non-overlapping matches.
    /// Note that the resulting Iterator borrows both the pattern `'r` and the
    /// input string as `'t`.
    #[inline]
    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> Matches<'r, 't> {
        Matches {
            pat: self,
            text,
            pos: 0,
        }
    }

    /// Scan a buffer for the `count`-th match from `start` in the given
    /// direction. The scan wraps once at the buffer end and gives up upon
    /// returning to its origin. Word boundaries consult \p word.
    pub fn scan_buffer<B: Buffer + ?Sized>(
        &self,
        buf: &B,
        start: BufPos,
        dir: ScanDirection,
        count: usize,
        word: &WordTable,
    ) -> Option<BufMatch> {
        if count == 0 {
            return None;
        }
        let input = BufInput::new(buf);
        let m = self.scan_input(&input, start, dir, count, true, word)?;
        Some(Self::buf_match(m))
    }

    /// Like scan_buffer, but also retains the matched text of each
    /// participating group in \p saved for later recall.
    pub fn scan_buffer_saving<B: Buffer + ?Sized>(
        &self,
        buf: &B,
        start: BufPos,
        dir: ScanDirection,
        count: usize,
        word: &WordTable,
        saved: &mut SavedMatch,
    ) -> Option<BufMatch> {
        if count == 0 {
            return None;
        }
        let input = BufInput::new(buf);
        let m = self.scan_input(&input, start, dir, count, true, word)?;
        for (idx, g) in m.groups.iter().enumerate() {
            if let Some((s, e)) = g.as_span() {
                saved.save(idx, input.copy_span(s, e));
            }
        }
        Some(Self::buf_match(m))
    }

    fn buf_match(m: ScanMatch<BufPos>) -> BufMatch {
        BufMatch {
            start: m.start,
            end: m.end,
            captures: m.groups.iter().skip(1).map(|g| g.as_span()).collect(),
        }
    }

    /// Dispatch a scan to the element engine or the literal engine.
    fn scan_input<Input: TextInput>(
        &self,
        input: &Input,
        start: Input::Position,
        dir: ScanDirection,
        count: usize,
        wrap: bool,
        word: &WordTable,
    ) -> Option<ScanMatch<Input::Position>> {
        // Start positions come from callers; an out-of-range one is treated
        // as the nearest input edge.
        let start = input.clamp(start);
        if self.compiled.sregical {
            let pat = &self.compiled;
            match dir {
                ScanDirection::Forward => {
                    backtrack::scan_elements(pat, word, input, Forward, start, count, wrap)
                }
                ScanDirection::Backward => {
                    backtrack::scan_elements(pat, word, input, Backward, start, count, wrap)
                }
            }
        } else {
            let matcher = self.matcher();
            let span = match dir {
                ScanDirection::Forward => {
                    backtrack::scan_literal(matcher, input, Forward, start, count, wrap)
                }
                ScanDirection::Backward => {
                    backtrack::scan_literal(matcher, input, Backward, start, count, wrap)
                }
            }?;
            let mut groups = vec![GroupData::new(); self.group_count()];
            groups[0] = GroupData {
                start: Some(span.0),
                end: Some(span.1),
            };
            Some(ScanMatch {
                start: span.0,
                end: span.1,
                groups,
            })
        }
    }
}

impl fmt::Display for Pattern {
    /// Formats as the body followed by the option letters, which recompiles
    /// to an equivalent pattern.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.body)?;
        let letters = self.compiled.options.to_string();
        if !letters.is_empty() {
            write!(f, ":{}", letters)?;
        }
        Ok(())
    }
}

impl FromStr for Pattern {
    type Err = Error;

    /// Attempts to parse a string into a pattern.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Error> {
        Self::new(s)
    }
}

/// An iterator type which yields `Match`es found in a string.
#[derive(Debug, Clone)]
pub struct Matches<'r, 't> {
    pat: &'r Pattern,
    text: &'t str,
    pos: usize,
}

impl<'r, 't> Iterator for Matches<'r, 't> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        if self.pos > self.text.len() {
            return None;
        }
        let m = self
            .pat
            .find_from(self.text, self.pos, ScanDirection::Forward)?;
        // An empty match must not stall the iterator.
        self.pos = if m.range.end > self.pos {
            m.range.end
        } else {
            self.pos + 1
        };
        Some(m)
    }
}
