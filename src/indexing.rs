//! Input abstraction over flat strings and line buffers.

use crate::util::DebugCheckIndex;

/// A trait for types which can address a position in some input text.
pub trait PositionType:
    std::fmt::Debug + Copy + Clone + PartialEq + Eq + PartialOrd + Ord
{
}

impl PositionType for usize {}
impl PositionType for BufPos {}

/// A trait for accessing input text as a bidirectional sequence of 8-bit
/// codes addressed by positions.
pub trait TextInput: std::fmt::Debug + Copy + Clone {
    type Position: PositionType;

    /// \return the leftmost position.
    fn left_end(&self) -> Self::Position;

    /// \return the position just past the rightmost code.
    fn right_end(&self) -> Self::Position;

    /// Clamp a caller-supplied position into the input's extents.
    fn clamp(&self, pos: Self::Position) -> Self::Position;

    /// \return the code at the position, moving the position one code right.
    fn next_right(&self, pos: &mut Self::Position) -> Option<u8>;

    /// \return the code left of the position, moving the position one code
    /// left.
    fn next_left(&self, pos: &mut Self::Position) -> Option<u8>;

    /// \return the code at the position, without moving.
    #[inline(always)]
    fn peek_right(&self, pos: Self::Position) -> Option<u8> {
        let mut pos = pos;
        self.next_right(&mut pos)
    }

    /// \return the code left of the position, without moving.
    #[inline(always)]
    fn peek_left(&self, pos: Self::Position) -> Option<u8> {
        let mut pos = pos;
        self.next_left(&mut pos)
    }

    /// Try moving the position right by \p amt codes.
    /// \return false if the input ends first, leaving the position
    /// unspecified.
    #[inline(always)]
    fn try_move_right(&self, pos: &mut Self::Position, amt: usize) -> bool {
        for _ in 0..amt {
            if self.next_right(pos).is_none() {
                return false;
            }
        }
        true
    }

    /// Try moving the position left by \p amt codes.
    #[inline(always)]
    fn try_move_left(&self, pos: &mut Self::Position, amt: usize) -> bool {
        for _ in 0..amt {
            if self.next_left(pos).is_none() {
                return false;
            }
        }
        true
    }

    /// \return the first position at or right of \p pos holding the code
    /// \p b, or None if there is none.
    fn find_byte_right(&self, pos: Self::Position, b: u8) -> Option<Self::Position> {
        let mut pos = pos;
        loop {
            let here = pos;
            match self.next_right(&mut pos) {
                Some(c) if c == b => return Some(here),
                Some(_) => {}
                None => return None,
            }
        }
    }

    /// Collect the codes in the span [start, end).
    fn copy_span(&self, start: Self::Position, end: Self::Position) -> Vec<u8> {
        let mut res = Vec::new();
        let mut pos = start;
        while pos < end {
            match self.next_right(&mut pos) {
                Some(c) => res.push(c),
                None => break,
            }
        }
        res
    }
}

/// A TextInput over a flat string slice, positioned by byte offsets.
#[derive(Debug, Copy, Clone)]
pub struct StrInput<'a> {
    input: &'a [u8],
}

impl<'a> StrInput<'a> {
    pub fn new(s: &'a str) -> StrInput<'a> {
        StrInput {
            input: s.as_bytes(),
        }
    }
}

impl<'a> TextInput for StrInput<'a> {
    type Position = usize;

    #[inline(always)]
    fn left_end(&self) -> usize {
        0
    }

    #[inline(always)]
    fn right_end(&self) -> usize {
        self.input.len()
    }

    #[inline(always)]
    fn clamp(&self, pos: usize) -> usize {
        pos.min(self.input.len())
    }

    #[inline(always)]
    fn next_right(&self, pos: &mut usize) -> Option<u8> {
        if *pos < self.input.len() {
            let c = *self.input.iat(*pos);
            *pos += 1;
            Some(c)
        } else {
            None
        }
    }

    #[inline(always)]
    fn next_left(&self, pos: &mut usize) -> Option<u8> {
        if *pos > 0 {
            *pos -= 1;
            Some(*self.input.iat(*pos))
        } else {
            None
        }
    }

    #[inline(always)]
    fn find_byte_right(&self, pos: usize, b: u8) -> Option<usize> {
        memchr::memchr(b, self.input.get(pos..)?).map(|idx| pos + idx)
    }

    fn copy_span(&self, start: usize, end: usize) -> Vec<u8> {
        self.input[start..end].to_vec()
    }
}

/// Access to an editor buffer as a sequence of lines.
/// Line text carries no terminator; a virtual newline code separates
/// consecutive lines, and the final line has none.
pub trait Buffer {
    fn line_count(&self) -> usize;
    fn line(&self, idx: usize) -> &[u8];
}

impl<S: AsRef<[u8]>> Buffer for [S] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, idx: usize) -> &[u8] {
        self[idx].as_ref()
    }
}

impl<S: AsRef<[u8]>> Buffer for Vec<S> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, idx: usize) -> &[u8] {
        self[idx].as_ref()
    }
}

/// A position in a buffer: a line index and a code offset within the line.
/// An offset equal to the line length addresses the virtual newline ending
/// that line. Derived ordering is lexicographic, which matches text order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BufPos {
    pub line: usize,
    pub offset: usize,
}

impl BufPos {
    pub fn new(line: usize, offset: usize) -> BufPos {
        BufPos { line, offset }
    }
}

/// A TextInput over a Buffer, positioned by BufPos.
pub struct BufInput<'t, B: ?Sized> {
    buf: &'t B,
}

// Manual impls so B itself need not be Copy or Debug.
impl<'t, B: ?Sized> Copy for BufInput<'t, B> {}

impl<'t, B: ?Sized> Clone for BufInput<'t, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'t, B: Buffer + ?Sized> std::fmt::Debug for BufInput<'t, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "BufInput({} lines)", self.buf.line_count())
    }
}

impl<'t, B: Buffer + ?Sized> BufInput<'t, B> {
    pub fn new(buf: &'t B) -> BufInput<'t, B> {
        BufInput { buf }
    }

    #[inline(always)]
    fn line_len(&self, line: usize) -> usize {
        self.buf.line(line).len()
    }
}

impl<'t, B: Buffer + ?Sized> TextInput for BufInput<'t, B> {
    type Position = BufPos;

    #[inline(always)]
    fn left_end(&self) -> BufPos {
        BufPos { line: 0, offset: 0 }
    }

    fn right_end(&self) -> BufPos {
        let lc = self.buf.line_count();
        if lc == 0 {
            BufPos { line: 0, offset: 0 }
        } else {
            BufPos {
                line: lc - 1,
                offset: self.line_len(lc - 1),
            }
        }
    }

    fn clamp(&self, pos: BufPos) -> BufPos {
        let lc = self.buf.line_count();
        if lc == 0 || pos.line >= lc {
            return self.right_end();
        }
        BufPos {
            line: pos.line,
            offset: pos.offset.min(self.line_len(pos.line)),
        }
    }

    fn next_right(&self, pos: &mut BufPos) -> Option<u8> {
        let lc = self.buf.line_count();
        if pos.line >= lc {
            return None;
        }
        let text = self.buf.line(pos.line);
        if pos.offset < text.len() {
            let c = *text.iat(pos.offset);
            pos.offset += 1;
            Some(c)
        } else if pos.line + 1 < lc {
            pos.line += 1;
            pos.offset = 0;
            Some(b'\n')
        } else {
            None
        }
    }

    fn next_left(&self, pos: &mut BufPos) -> Option<u8> {
        if pos.offset > 0 {
            pos.offset -= 1;
            Some(*self.buf.line(pos.line).iat(pos.offset))
        } else if pos.line > 0 {
            pos.line -= 1;
            pos.offset = self.line_len(pos.line);
            Some(b'\n')
        } else {
            None
        }
    }
}
