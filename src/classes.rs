//! Character classes: `[...]` expressions and the named classes \d \s \w \l.

use crate::bitset::ClassBits;
use crate::compile::Error;

/// The named character classes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NamedClass {
    /// \d
    Digits,
    /// \s
    Spaces,
    /// \w
    Words,
    /// \l
    Lower,
}

impl NamedClass {
    pub fn from_escape(c: u8) -> Option<(NamedClass, bool)> {
        // Uppercase escapes are the negated forms.
        match c {
            b'd' | b'D' => Some((NamedClass::Digits, c == b'd')),
            b's' | b'S' => Some((NamedClass::Spaces, c == b's')),
            b'w' | b'W' => Some((NamedClass::Words, c == b'w')),
            b'l' | b'L' => Some((NamedClass::Lower, c == b'l')),
            _ => None,
        }
    }

    /// The bracket-class text a named class desugars to.
    pub fn desugared(self) -> &'static [u8] {
        match self {
            NamedClass::Digits => b"[0-9]",
            NamedClass::Spaces => b"[ \t\r\n\x0B\x0C]",
            NamedClass::Words => b"[0-9A-Za-z_]",
            NamedClass::Lower => b"[a-z]",
        }
    }
}

/// \return the bitmap for a named class, by compiling its desugared bracket
/// text through the ordinary class builder.
pub fn named_bits(nc: NamedClass, icase: bool) -> ClassBits {
    match parse_class(nc.desugared(), icase) {
        Ok(parsed) => {
            debug_assert!(!parsed.invert);
            parsed.bits
        }
        Err(_) => rs_unreachable!("Desugared class text should always compile"),
    }
}

/// The result of compiling a `[...]` expression.
#[derive(Debug, Clone)]
pub struct ParsedClass {
    pub bits: ClassBits,
    pub invert: bool,
    /// Bytes consumed, including both brackets.
    pub len: usize,
}

fn error<T, S: ToString>(text: S) -> Result<T, Error> {
    Err(Error {
        text: text.to_string(),
    })
}

/// Set a member, filling both cases when case-insensitive.
fn add_member(bits: &mut ClassBits, c: u8, icase: bool) {
    bits.set(c);
    if icase && c.is_ascii_alphabetic() {
        bits.set(c ^ 0x20);
    }
}

/// A single atom inside a bracket: either one code or a named class.
enum ClassAtom {
    Code(u8),
    Named { bits: ClassBits },
}

/// Compile a `[...]` expression. The caller is positioned at the `[`; we
/// parse through the matching `]`. An empty or unterminated class is an
/// error; an inverted range like `[z-a]` degrades to its literal members.
pub fn parse_class(text: &[u8], icase: bool) -> Result<ParsedClass, Error> {
    debug_assert!(text.first() == Some(&b'['), "Caller should be at the [");
    let mut idx = 1;
    let mut bits = ClassBits::default();
    let mut invert = false;
    let mut members = 0usize;

    if text.get(idx) == Some(&b'^') {
        invert = true;
        idx += 1;
    }

    // Consume one atom, advancing idx. Returns None at `]` or end of text.
    let next_atom = |idx: &mut usize| -> Result<Option<ClassAtom>, Error> {
        let c = match text.get(*idx) {
            None | Some(b']') => return Ok(None),
            Some(&c) => c,
        };
        *idx += 1;
        if c != b'\\' {
            return Ok(Some(ClassAtom::Code(c)));
        }
        let ec = match text.get(*idx) {
            None => return error("Unterminated character class"),
            Some(&ec) => ec,
        };
        *idx += 1;
        if let Some((nc, positive)) = NamedClass::from_escape(ec) {
            let mut nb = named_bits(nc, icase);
            if !positive {
                nb.bitnot();
            }
            return Ok(Some(ClassAtom::Named { bits: nb }));
        }
        let lit = match ec {
            b't' => b'\t',
            b'r' => b'\r',
            b'n' => b'\n',
            b'f' => b'\x0C',
            _ => ec,
        };
        Ok(Some(ClassAtom::Code(lit)))
    };

    loop {
        let first = match next_atom(&mut idx)? {
            Some(atom) => atom,
            None => break,
        };
        members += 1;
        let first = match first {
            ClassAtom::Named { bits: nb } => {
                bits.bitor(&nb);
                continue;
            }
            ClassAtom::Code(c) => c,
        };

        // Check for a dash; we may have a range. A dash at the closing edge is
        // a literal member.
        if text.get(idx) != Some(&b'-') || text.get(idx + 1) == Some(&b']') {
            add_member(&mut bits, first, icase);
            continue;
        }
        idx += 1;
        let second = match next_atom(&mut idx)? {
            Some(atom) => atom,
            None => {
                // No second atom: `[a-]`. The dash is literal.
                add_member(&mut bits, first, icase);
                add_member(&mut bits, b'-', icase);
                continue;
            }
        };
        members += 1;
        match second {
            ClassAtom::Code(last) if first <= last => {
                for c in first..=last {
                    add_member(&mut bits, c, icase);
                }
            }
            ClassAtom::Code(last) => {
                // Inverted range like `[z-a]`: degrade to the literal members.
                add_member(&mut bits, first, icase);
                add_member(&mut bits, b'-', icase);
                add_member(&mut bits, last, icase);
            }
            ClassAtom::Named { bits: nb } => {
                // A named class cannot end a range; degrade likewise.
                add_member(&mut bits, first, icase);
                add_member(&mut bits, b'-', icase);
                bits.bitor(&nb);
            }
        }
    }

    match text.get(idx) {
        Some(b']') => idx += 1,
        _ => return error("Unterminated character class"),
    }
    if members == 0 {
        return error("Empty character class");
    }
    Ok(ParsedClass {
        bits,
        invert,
        len: idx,
    })
}
