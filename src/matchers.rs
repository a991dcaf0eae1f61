//! Matching of single consuming meta-elements against input codes.

use crate::meta::{CompiledPattern, MetaKind};
use crate::util::DebugCheckIndex;

/// Case-fold a code.
#[inline(always)]
pub fn fold(c: u8) -> u8 {
    c.to_ascii_lowercase()
}

/// \return whether a consuming element matches the code \p c.
/// Literal elements are stored pre-folded when matching is case-insensitive.
#[inline(always)]
pub fn match_one(kind: MetaKind, pat: &CompiledPattern, c: u8) -> bool {
    match kind {
        MetaKind::Literal(lit) => {
            if pat.options.ignore_case {
                fold(c) == lit
            } else {
                c == lit
            }
        }
        MetaKind::AnyChar => c != b'\n',
        MetaKind::Class { index, invert } => {
            let is_member = pat.classes.iat(index).contains(c);
            is_member != invert
        }
        _ => rs_unreachable!("Element does not consume input"),
    }
}
