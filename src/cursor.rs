use crate::indexing::TextInput;

#[derive(Debug, Copy, Clone)]
pub struct Forward;

#[derive(Debug, Copy, Clone)]
pub struct Backward;

pub trait Direction: core::fmt::Debug + Copy + Clone {
    const FORWARD: bool;
    fn new() -> Self;
}

impl Direction for Forward {
    const FORWARD: bool = true;
    #[inline(always)]
    fn new() -> Self {
        Forward {}
    }
}

impl Direction for Backward {
    const FORWARD: bool = false;
    #[inline(always)]
    fn new() -> Self {
        Backward {}
    }
}

/// \return the next code in the scan direction, updating the position.
#[inline(always)]
pub fn next<Input: TextInput, Dir: Direction>(
    input: &Input,
    _dir: Dir,
    pos: &mut Input::Position,
) -> Option<u8> {
    if Dir::FORWARD {
        input.next_right(pos)
    } else {
        input.next_left(pos)
    }
}

/// \return the next code *opposite* the scan direction, updating the position.
#[inline(always)]
pub fn next_back<Input: TextInput, Dir: Direction>(
    input: &Input,
    _dir: Dir,
    pos: &mut Input::Position,
) -> Option<u8> {
    if Dir::FORWARD {
        input.next_left(pos)
    } else {
        input.next_right(pos)
    }
}

/// Try moving the position by \p amt codes in the scan direction.
/// \return false if the input is exhausted first, leaving the position
/// unspecified.
#[inline(always)]
pub fn try_advance<Input: TextInput, Dir: Direction>(
    input: &Input,
    _dir: Dir,
    pos: &mut Input::Position,
    amt: usize,
) -> bool {
    if Dir::FORWARD {
        input.try_move_right(pos, amt)
    } else {
        input.try_move_left(pos, amt)
    }
}
