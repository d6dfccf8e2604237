//! Word values and timestamped word events.
//!
//! This module provides:
//! - [`Word`]: A reconstructed multi-bit word (4 bytes, Copy)
//! - [`WordEvent`]: A word paired with the timestamp its bits shared

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

// ============================================================================
// Word
// ============================================================================

/// A reconstructed digital word (4 bytes, Copy).
///
/// Each set bit marks a bit-line whose transition shared the word's
/// timestamp. A word reconstructed at width `w` always has its value below
/// `2^w`.
///
/// Raw acquisition buffers carry words as `i32`; [`Word::from_raw`] and
/// [`Word::to_raw`] convert bit pattern for bit pattern, so line 31 maps to
/// the sign bit and back without loss.
///
/// # Examples
///
/// ```rust
/// use unstrobed::word::Word;
///
/// let w = Word::EMPTY.insert(0).insert(3);
/// assert_eq!(w.bits(), 0b1001);
/// assert!(w.contains(3));
/// assert!(!w.contains(2));
/// assert_eq!(w.lines().collect::<Vec<_>>(), vec![0, 3]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Word(u32);

impl Word {
    /// Word with no bits set.
    pub const EMPTY: Self = Self(0);

    /// Create from a raw bit pattern.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Create from the signed buffer representation, preserving the bit
    /// pattern.
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw as u32)
    }

    /// Get the raw bit pattern.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Get the signed buffer representation, preserving the bit pattern.
    #[inline]
    pub const fn to_raw(self) -> i32 {
        self.0 as i32
    }

    /// Check whether the bit for `line` is set.
    #[inline]
    pub const fn contains(self, line: usize) -> bool {
        line < 32 && self.0 & (1 << line) != 0
    }

    /// Return a copy with the bit for `line` set.
    ///
    /// `line` must be below 32.
    #[inline]
    pub const fn insert(self, line: usize) -> Self {
        Self(self.0 | (1 << line))
    }

    /// Check whether no bits are set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Count the set bits (the size of the tie group that produced a
    /// reconstructed word).
    #[inline]
    pub const fn count_lines(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate over the indices of set bits, ascending.
    pub fn lines(self) -> impl Iterator<Item = usize> {
        (0..32).filter(move |&line| self.0 & (1 << line) != 0)
    }
}

impl BitOr for Word {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Word {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<u32> for Word {
    #[inline]
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<Word> for u32 {
    #[inline]
    fn from(word: Word) -> Self {
        word.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

impl fmt::Binary for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

// ============================================================================
// WordEvent
// ============================================================================

/// A reconstructed word paired with the timestamp its bit transitions
/// shared.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WordEvent {
    /// The reconstructed word.
    pub word: Word,
    /// Timestamp shared by every bit transition in the word.
    pub timestamp: f32,
}

impl WordEvent {
    /// Create a new word event.
    #[inline]
    pub const fn new(word: Word, timestamp: f32) -> Self {
        Self { word, timestamp }
    }
}

impl fmt::Display for WordEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}s", self.word, self.timestamp)
    }
}
