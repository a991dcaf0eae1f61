//! Compiler from pattern text to meta-element lists

use crate::api;
use crate::bitset::ClassBits;
use crate::classes::{self, NamedClass};
use crate::meta::{mirror, CompiledPattern, Meta, MetaKind, Quant, MAX_GROUPS};
use std::fmt;

/// Represents an error encountered during pattern compilation.
/// The text contains a human-readable error message.
#[derive(Debug, Clone)]
pub struct Error {
    pub text: String,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn error<S, T>(text: S) -> Result<T, Error>
where
    S: ToString,
{
    Err(Error {
        text: text.to_string(),
    })
}

/// Represents the state used to compile a pattern.
struct Parser<'a> {
    /// The pattern body.
    input: &'a [u8],

    /// Current position in the body.
    pos: usize,

    /// Options used.
    options: api::Options,

    /// Elements compiled so far, forward order.
    elems: Vec<Meta>,

    /// Class bitmaps owned by the compiled pattern.
    classes: Vec<ClassBits>,

    /// Index of the next capture group. Group 0 is the whole match.
    next_group: u8,

    /// Currently open capture groups.
    open_groups: Vec<u8>,

    /// Whether a true metacharacter has been seen.
    sregical: bool,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// If our contents begin with the byte c, consume it and return true.
    fn try_consume(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn icase(&self) -> bool {
        self.options.ignore_case
    }

    fn push(&mut self, kind: MetaKind) {
        self.elems.push(Meta::simple(kind));
    }

    /// Push a literal code, folded if matching is case-insensitive.
    fn push_literal(&mut self, c: u8) {
        let c = if self.icase() {
            c.to_ascii_lowercase()
        } else {
            c
        };
        self.push(MetaKind::Literal(c));
    }

    fn push_class(&mut self, bits: ClassBits, invert: bool) {
        let index = self.classes.len();
        self.classes.push(bits);
        self.push(MetaKind::Class { index, invert });
        self.sregical = true;
    }

    fn try_parse(mut self) -> Result<CompiledPattern, Error> {
        while let Some(c) = self.peek() {
            match c {
                b'^' => {
                    self.bump();
                    self.push(MetaKind::BeginLine);
                    self.sregical = true;
                }
                b'$' => {
                    self.bump();
                    self.push(MetaKind::EndLine);
                    self.sregical = true;
                }
                b'.' => {
                    self.bump();
                    self.push(MetaKind::AnyChar);
                    self.sregical = true;
                }
                b'(' => {
                    self.bump();
                    if self.next_group as usize >= MAX_GROUPS {
                        return error("Group count limit exceeded");
                    }
                    let group = self.next_group;
                    self.next_group += 1;
                    self.open_groups.push(group);
                    self.push(MetaKind::GroupBegin(group));
                    self.sregical = true;
                }
                b')' => {
                    self.bump();
                    match self.open_groups.pop() {
                        Some(group) => self.push(MetaKind::GroupEnd(group)),
                        None => return error("Unbalanced parenthesis"),
                    }
                    self.sregical = true;
                }
                b'[' => {
                    let parsed = classes::parse_class(&self.input[self.pos..], self.icase())?;
                    self.pos += parsed.len;
                    self.push_class(parsed.bits, parsed.invert);
                }
                b'*' | b'+' | b'?' | b'{' => {
                    self.consume_quantifier(c)?;
                }
                b'\\' => {
                    self.bump();
                    self.consume_escape()?;
                }
                c => {
                    self.bump();
                    self.push_literal(c);
                }
            }
        }
        if !self.open_groups.is_empty() {
            return error("Unbalanced parenthesis");
        }
        self.push(MetaKind::Goal);
        self.finalize()
    }

    /// Attempt to attach a quantifier starting at byte \p c.
    /// A quantifier after a group-end is a hard error; one with no valid
    /// preceding atom degrades to literal text.
    fn consume_quantifier(&mut self, c: u8) -> Result<(), Error> {
        let start = self.pos;
        let (min, max) = match c {
            b'*' => {
                self.bump();
                (0, usize::MAX)
            }
            b'+' => {
                self.bump();
                (1, usize::MAX)
            }
            b'?' => {
                self.bump();
                (0, 1)
            }
            b'{' => {
                self.bump();
                match self.try_consume_bounds() {
                    Some(bounds) => bounds,
                    None => {
                        // Not a well-formed repetition; the brace is literal
                        // and the rest of the text is re-parsed normally.
                        self.pos = start + 1;
                        self.push_literal(b'{');
                        return Ok(());
                    }
                }
            }
            _ => rs_unreachable!("Caller should pass a quantifier byte"),
        };
        if min > max {
            return error("Invalid quantifier");
        }

        match self.elems.last().map(|m| (m.kind, m.quant.is_some())) {
            Some((MetaKind::GroupEnd(_), _)) => error("Closure on a group is unsupported"),
            Some((kind, false)) if kind.quantifiable() => {
                let greedy = !self.try_consume(b'?');
                let last = match self.elems.last_mut() {
                    Some(last) => last,
                    None => rs_unreachable!("Quantified atom was just inspected"),
                };
                last.quant = Some(Quant { min, max, greedy });
                self.sregical = true;
                Ok(())
            }
            _ => {
                // Nothing to repeat, or the atom is an anchor/boundary or
                // already quantified: literal interpretation.
                for idx in start..self.pos {
                    self.push_literal(self.input[idx]);
                }
                Ok(())
            }
        }
    }

    /// Try to consume `m}`, `m,}` or `m,n}` after an opening brace.
    fn try_consume_bounds(&mut self) -> Option<(usize, usize)> {
        let min = self.try_consume_decimal()?;
        let max = if self.try_consume(b',') {
            self.try_consume_decimal().unwrap_or(usize::MAX)
        } else {
            min
        };
        if self.try_consume(b'}') {
            Some((min, max))
        } else {
            None
        }
    }

    /// Consume a decimal integer, saturating on overflow.
    fn try_consume_decimal(&mut self) -> Option<usize> {
        let mut result: usize = 0;
        let mut digits = 0;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.bump();
                digits += 1;
                result = result.saturating_mul(10);
                result = result.saturating_add((c - b'0') as usize);
            } else {
                break;
            }
        }
        if digits > 0 {
            Some(result)
        } else {
            None
        }
    }

    /// Consume the byte following a backslash.
    fn consume_escape(&mut self) -> Result<(), Error> {
        let ec = match self.bump() {
            None => return error("Trailing backslash"),
            Some(ec) => ec,
        };
        if let Some((nc, positive)) = NamedClass::from_escape(ec) {
            let bits = classes::named_bits(nc, self.icase());
            self.push_class(bits, !positive);
            return Ok(());
        }
        match ec {
            b'A' => self.push(MetaKind::BeginInput),
            b'z' => self.push(MetaKind::EndInput),
            b'Z' => self.push(MetaKind::EndInputAlt),
            b'b' => self.push(MetaKind::WordBoundary { invert: false }),
            b'B' => self.push(MetaKind::WordBoundary { invert: true }),
            b't' => self.push_literal(b'\t'),
            b'r' => self.push_literal(b'\r'),
            b'n' => self.push_literal(b'\n'),
            b'f' => self.push_literal(b'\x0C'),
            // Unrecognized escapes are the escaped byte, literally.
            other => self.push_literal(other),
        }
        // Any escape decouples the element list from the raw pattern text, so
        // the literal engine can no longer scan for the text itself.
        self.sregical = true;
        Ok(())
    }

    fn finalize(self) -> Result<CompiledPattern, Error> {
        debug_assert!((self.next_group as usize) <= MAX_GROUPS);
        let backward = mirror(&self.elems);
        log::debug!(
            "compiled pattern: {} elements, {} groups, sregical={}",
            self.elems.len(),
            self.next_group,
            self.sregical
        );
        Ok(CompiledPattern {
            forward: self.elems,
            backward,
            classes: self.classes,
            sregical: self.sregical,
            groups: self.next_group,
            options: self.options,
        })
    }
}

/// Try compiling a pattern body.
/// \return the compiled forward and backward element lists, or an error.
pub fn try_parse(body: &str, options: api::Options) -> Result<CompiledPattern, Error> {
    let p = Parser {
        input: body.as_bytes(),
        pos: 0,
        options,
        elems: Vec::new(),
        classes: Vec::new(),
        next_group: 1,
        open_groups: Vec::new(),
        sregical: false,
    };
    p.try_parse()
}

/// Compile a plain-text pattern: every byte is a literal element and no
/// metacharacter is recognized.
pub fn literal_pattern(body: &str, options: api::Options) -> CompiledPattern {
    let icase = options.ignore_case;
    let mut elems: Vec<Meta> = body
        .bytes()
        .map(|c| {
            let c = if icase { c.to_ascii_lowercase() } else { c };
            Meta::simple(MetaKind::Literal(c))
        })
        .collect();
    elems.push(Meta::simple(MetaKind::Goal));
    let backward = mirror(&elems);
    CompiledPattern {
        forward: elems,
        backward,
        classes: Vec::new(),
        sregical: false,
        groups: 1,
        options,
    }
}
