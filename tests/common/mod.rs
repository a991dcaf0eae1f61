#![allow(clippy::uninlined_format_args)]
#![allow(dead_code)]

use patscan::{BufPos, Pattern, ScanDirection, WordTable};

/// Test that \p spec fails to compile.
pub fn test_parse_fails(spec: &str) {
    let res = Pattern::new(spec);
    assert!(res.is_err(), "Pattern should not have compiled: {}", spec);
}

/// Format a Match by inserting commas between all capture groups.
fn format_match(r: &patscan::Match, input: &str) -> String {
    let mut result = input[r.range()].to_string();
    for cg in r.captures.iter() {
        result.push(',');
        if let Some(cg) = cg {
            result.push_str(&input[cg.clone()])
        }
    }
    result
}

pub trait StringTestHelpers {
    /// "Fluent" style helper for testing that a String is equal to a str.
    fn test_eq(&self, s: &str);
}

impl StringTestHelpers for String {
    fn test_eq(&self, rhs: &str) {
        assert_eq!(self.as_str(), rhs)
    }
}

pub trait VecTestHelpers {
    /// "Fluent" style helper for testing that a Vec<&str> is equal to a
    /// Vec<&str>.
    fn test_eq(&self, rhs: Vec<&str>);
}

impl VecTestHelpers for Vec<&str> {
    fn test_eq(&self, rhs: Vec<&str>) {
        assert_eq!(*self, rhs)
    }
}

/// Split a flat string into the lines a buffer would hold.
fn to_lines(input: &str) -> Vec<String> {
    input.split('\n').map(str::to_string).collect()
}

/// Convert a byte offset in the flat form to a buffer position.
fn offset_to_bufpos(lines: &[String], offset: usize) -> BufPos {
    let mut rest = offset;
    for (idx, line) in lines.iter().enumerate() {
        if rest <= line.len() {
            return BufPos::new(idx, rest);
        }
        // One code for the separating newline.
        rest -= line.len() + 1;
    }
    BufPos::new(lines.len().saturating_sub(1), rest)
}

/// Convert a buffer position back to a byte offset in the flat form.
fn bufpos_to_offset(lines: &[String], pos: BufPos) -> usize {
    let before: usize = lines[..pos.line].iter().map(|l| l.len() + 1).sum();
    before + pos.offset
}

/// A compiled pattern which remembers a TestConfig.
#[derive(Debug, Clone)]
pub struct TestCompiledPattern {
    pat: Pattern,
    tc: TestConfig,
}

impl TestCompiledPattern {
    /// Search for self in \p input from byte offset \p start, returning a
    /// list of all matches in order.
    #[track_caller]
    pub fn matches(&self, input: &str, start: usize) -> Vec<patscan::Match> {
        match self.tc.kind {
            InputKind::Str => {
                let mut result = Vec::new();
                let mut pos = start;
                while pos <= input.len() {
                    match self.pat.find_from(input, pos, ScanDirection::Forward) {
                        Some(m) => {
                            pos = if m.range.end > pos { m.range.end } else { pos + 1 };
                            result.push(m);
                        }
                        None => break,
                    }
                }
                result
            }
            InputKind::Buffer => self.match_buffer(input, start),
        }
    }

    /// Run the same search over the buffer form of \p input, mapping
    /// positions back to flat byte offsets.
    #[track_caller]
    fn match_buffer(&self, input: &str, start: usize) -> Vec<patscan::Match> {
        let lines = to_lines(input);
        let word = WordTable::default();
        let origin = offset_to_bufpos(&lines, start);
        let mut result = Vec::new();
        let mut count = 1;
        while let Some(m) =
            self.pat
                .scan_buffer(&lines, origin, ScanDirection::Forward, count, &word)
        {
            let range =
                bufpos_to_offset(&lines, m.start)..bufpos_to_offset(&lines, m.end);
            // The buffer scan wraps; stop once it comes back around.
            if range.start < start {
                break;
            }
            let captures = m
                .captures
                .iter()
                .map(|c| {
                    c.map(|(s, e)| bufpos_to_offset(&lines, s)..bufpos_to_offset(&lines, e))
                })
                .collect();
            result.push(patscan::Match { range, captures });
            count += 1;
        }
        result
    }

    /// Search for self in \p input, returning the first Match, or None if
    /// none.
    pub fn find(&self, input: &str) -> Option<patscan::Match> {
        self.matches(input, 0).into_iter().next()
    }

    /// Search backward from the end of \p input, returning the rightmost
    /// Match, or None if none.
    pub fn rfind(&self, input: &str) -> Option<patscan::Match> {
        match self.tc.kind {
            InputKind::Str => {
                self.pat
                    .find_from(input, input.len(), ScanDirection::Backward)
            }
            InputKind::Buffer => {
                let lines = to_lines(input);
                let word = WordTable::default();
                let end = offset_to_bufpos(&lines, input.len());
                let m = self
                    .pat
                    .scan_buffer(&lines, end, ScanDirection::Backward, 1, &word)?;
                let range =
                    bufpos_to_offset(&lines, m.start)..bufpos_to_offset(&lines, m.end);
                let captures = m
                    .captures
                    .iter()
                    .map(|c| {
                        c.map(|(s, e)| {
                            bufpos_to_offset(&lines, s)..bufpos_to_offset(&lines, e)
                        })
                    })
                    .collect();
                Some(patscan::Match { range, captures })
            }
        }
    }

    /// Match against a string, returning the first formatted match.
    #[track_caller]
    pub fn match1f(&self, input: &str) -> String {
        match self.find(input) {
            Some(m) => format_match(&m, input),
            None => panic!("Failed to match {}", input),
        }
    }

    /// Match against a string, returning the match as a Vec containing None
    /// for unmatched groups, or the matched strings.
    pub fn match1_vec<'b>(&self, input: &'b str) -> Vec<Option<&'b str>> {
        let mut result = Vec::new();
        let m: patscan::Match = self.find(input).expect("Failed to match");
        result.push(Some(&input[m.range()]));
        for cr in m.captures {
            result.push(cr.map(|r| &input[r]));
        }
        result
    }

    /// Test that matching against \p input fails.
    #[track_caller]
    pub fn test_fails(&self, input: &str) {
        assert!(self.find(input).is_none(), "Should not have matched")
    }

    /// Test that matching against \p input succeeds.
    #[track_caller]
    pub fn test_succeeds(&self, input: &str) {
        assert!(self.find(input).is_some(), "Should have matched")
    }

    /// Return a list of all non-overlapping total match ranges from a given
    /// start.
    pub fn match_all_from(&self, input: &str, start: usize) -> Vec<patscan::Range> {
        self.matches(input, start)
            .into_iter()
            .map(move |m| m.range())
            .collect()
    }

    /// Return a list of all non-overlapping matches.
    pub fn match_all<'b>(&self, input: &'b str) -> Vec<&'b str> {
        self.matches(input, 0)
            .into_iter()
            .map(move |m| &input[m.range()])
            .collect()
    }

    /// Collect all matches into a String, separated by commas.
    pub fn run_global_match(&self, input: &str) -> String {
        self.matches(input, 0)
            .into_iter()
            .map(move |m| format_match(&m, input))
            .collect::<Vec<String>>()
            .join(",")
    }
}

/// The input forms a pattern can scan.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum InputKind {
    Str,
    Buffer,
}

/// Description of how to test a pattern.
#[derive(Debug, Copy, Clone)]
pub struct TestConfig {
    kind: InputKind,
}

impl TestConfig {
    /// Compile a pattern with no option letters.
    #[track_caller]
    pub fn compile(&self, pattern: &str) -> TestCompiledPattern {
        self.compilef(pattern, "")
    }

    /// Compile a pattern with the given option letters.
    #[track_caller]
    pub fn compilef(&self, pattern: &str, letters: &str) -> TestCompiledPattern {
        let options = patscan::Options::from_letters(letters)
            .unwrap_or_else(|e| panic!("Bad option letters {}: {}", letters, e));
        let pat = Pattern::with_options(pattern, options);
        assert!(
            pat.is_ok(),
            "Failed to compile! letters: {} pattern: {}, error: {}",
            letters,
            pattern,
            pat.unwrap_err()
        );
        TestCompiledPattern {
            pat: pat.unwrap(),
            tc: *self,
        }
    }

    /// Test that \p pattern with \p letters compiles and matches \p input.
    #[track_caller]
    pub fn test_match_succeeds(&self, pattern: &str, letters: &str, input: &str) {
        let cp = self.compilef(pattern, letters);
        cp.test_succeeds(input)
    }

    /// Test that \p pattern with \p letters compiles and does not match
    /// \p input.
    pub fn test_match_fails(&self, pattern: &str, letters: &str, input: &str) {
        let cp = self.compilef(pattern, letters);
        cp.test_fails(input)
    }
}

/// Invoke \p F with each test config, in turn.
/// The same pattern must behave identically over a flat string and over the
/// buffer form of that string.
pub fn test_with_configs<F>(func: F)
where
    F: Fn(TestConfig),
{
    func(TestConfig {
        kind: InputKind::Str,
    });
    func(TestConfig {
        kind: InputKind::Buffer,
    });
}
