use core::fmt;

/// A helper function for formatting bitmaps, using - ranges.
fn format_bitmap<Func>(name: &str, f: &mut fmt::Formatter<'_>, contains: Func) -> fmt::Result
where
    Func: Fn(u8) -> bool,
{
    write!(f, "{}[", name)?;
    let mut idx = 0;
    let mut maybe_space = "";
    while idx <= 256 {
        // Compute the next value not contained.
        let mut end = idx;
        while end <= 256 && contains(end as u8) {
            end += 1;
        }
        match end - idx {
            0 => (),
            1 => write!(f, "{}{}", maybe_space, idx)?,
            _ => write!(f, "{}{}-{}", maybe_space, idx, end - 1)?,
        };
        if end > idx {
            maybe_space = " ";
        }
        idx = end + 1
    }
    write!(f, "]")?;
    Ok(())
}

/// A bitmap covering all 256 character codes.
/// This is the compiled form of a character class.
#[derive(Default, Copy, Clone, PartialEq, Eq)]
#[repr(align(4))]
pub struct ClassBits([u16; 16]);

impl ClassBits {
    /// Construct from a sequence of member bytes.
    pub fn new(bytes: &[u8]) -> ClassBits {
        let mut cb = ClassBits::default();
        for &b in bytes {
            cb.set(b)
        }
        cb
    }

    /// \return whether this bitmap contains a given code.
    #[inline(always)]
    pub fn contains(&self, val: u8) -> bool {
        let word = val >> 4;
        let bit = val & 0xF;
        (self.0[word as usize] & (1 << bit)) != 0
    }

    /// Set a bit in this bitmap.
    #[inline(always)]
    pub fn set(&mut self, val: u8) {
        let word = val >> 4;
        let bit = val & 0xF;
        self.0[word as usize] |= 1 << bit;
    }

    /// Clear a bit in this bitmap.
    #[inline(always)]
    pub fn clear(&mut self, val: u8) {
        let word = val >> 4;
        let bit = val & 0xF;
        self.0[word as usize] &= !(1 << bit);
    }

    /// Set all bits in an inclusive range of codes.
    pub fn set_range(&mut self, first: u8, last: u8) {
        debug_assert!(first <= last, "Range endpoints out of order");
        for b in first..=last {
            self.set(b)
        }
    }

    /// Update ourselves from another bitmap, in place.
    pub fn bitor(&mut self, rhs: &ClassBits) {
        for idx in 0..self.0.len() {
            self.0[idx] |= rhs.0[idx];
        }
    }

    /// Invert our bits, in place.
    pub fn bitnot(&mut self) -> &mut Self {
        for val in self.0.iter_mut() {
            *val = !*val;
        }
        self
    }

    /// Count number of set bits.
    pub fn count_bits(&self) -> u32 {
        self.0.iter().map(|v| v.count_ones()).sum()
    }

    /// \return all set codes, as a vec.
    #[allow(clippy::wrong_self_convention)]
    pub fn to_vec(&self) -> Vec<u8> {
        (0..=255).filter(|b| self.contains(*b)).collect()
    }
}

impl fmt::Debug for ClassBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_bitmap("ClassBits", f, |v| self.contains(v))
    }
}
