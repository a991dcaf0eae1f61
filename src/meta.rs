//! Compiled meta-elements for a pattern

use crate::api;
use crate::bitset::ClassBits;

/// A group index is u8.
/// Group 0 always denotes the whole match; parenthesized groups start at 1.
pub type GroupID = u8;

/// The maximum number of groups, including group 0.
pub const MAX_GROUPS: usize = 10;

/// A repetition closure attached to a meta-element.
/// `max` is usize::MAX for unbounded closures.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Quant {
    pub min: usize,
    pub max: usize,
    pub greedy: bool,
}

/// The list of meta-element kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MetaKind {
    /// Match the start of a line; emitted by '^'.
    BeginLine,

    /// Match the end of a line; emitted by '$'.
    EndLine,

    /// Match the absolute start of the input; emitted by \A.
    BeginInput,

    /// Match the absolute end of the input; emitted by \z.
    EndInput,

    /// Match the end of the input, or just before a sole trailing newline;
    /// emitted by \Z.
    EndInputAlt,

    /// \b or \B word boundaries.
    WordBoundary { invert: bool },

    /// Match any single code except a line terminator; emitted by '.'.
    AnyChar,

    /// Match a single literal code.
    Literal(u8),

    /// Match the next code against the class bitmap stored at the given index
    /// in the CompiledPattern.
    Class { index: usize, invert: bool },

    /// Enter a capture group.
    GroupBegin(GroupID),

    /// Exit a capture group.
    GroupEnd(GroupID),

    /// The match was successful. Terminates both element lists.
    Goal,
}

impl MetaKind {
    /// \return whether a closure may be attached to this kind.
    /// Anchors and boundaries are zero-width; a closure on them falls back to
    /// literal text, and a closure on a group boundary is a hard error.
    pub fn quantifiable(self) -> bool {
        matches!(
            self,
            MetaKind::AnyChar | MetaKind::Literal(_) | MetaKind::Class { .. }
        )
    }

    /// \return whether this kind consumes a code unit when matched.
    pub fn consuming(self) -> bool {
        self.quantifiable()
    }
}

/// A compiled meta-element: a kind plus an optional closure.
#[derive(Debug, Copy, Clone)]
pub struct Meta {
    pub kind: MetaKind,
    pub quant: Option<Quant>,
}

impl Meta {
    pub fn simple(kind: MetaKind) -> Meta {
        Meta { kind, quant: None }
    }
}

/// A pattern compiled to its matchable forms.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Forward element list, terminated by Goal.
    pub forward: Vec<Meta>,

    /// Mirrored backward element list, terminated by Goal.
    pub backward: Vec<Meta>,

    /// The class bitmaps, indexed by the value in `MetaKind::Class`.
    pub classes: Vec<ClassBits>,

    /// Whether the pattern contains a true metacharacter. A regex-mode
    /// pattern without one is dispatched to the literal engine.
    pub sregical: bool,

    /// Number of groups, including group 0 (the whole match).
    pub groups: u8,

    /// Options controlling matching.
    pub options: api::Options,
}

/// Mirror a forward element list into its backward form: the element order is
/// reversed and the Goal terminator re-appended. Each element keeps its own
/// closure, so closures stay attached to their atoms. GroupBegin still marks
/// the left edge of its group and GroupEnd the right edge; the backward
/// matcher simply encounters them in the opposite order.
pub fn mirror(forward: &[Meta]) -> Vec<Meta> {
    debug_assert!(
        matches!(forward.last().map(|m| m.kind), Some(MetaKind::Goal)),
        "Forward list should be Goal-terminated"
    );
    let mut backward: Vec<Meta> = forward[..forward.len() - 1].iter().rev().copied().collect();
    backward.push(Meta::simple(MetaKind::Goal));
    backward
}
