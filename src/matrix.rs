//! Per-bit event storage and validated matrix views.
//!
//! This module provides:
//! - [`NO_EVENT`]: The exhaustion/padding sentinel timestamp
//! - [`BitMatrix`]: A shape-validated borrowed view over flat storage
//! - [`EventTable`]: Owned, sentinel-padded storage built from ragged lines

use crate::error::{Error, Result};
use tracing::debug;

/// Timestamp sentinel marking "no further event on this line".
///
/// [`BitMatrix::event`] returns it past a line's stored capacity and
/// [`EventTable`] uses it as the padding value. Real event timestamps are
/// always finite, so the sentinel never collides with one.
pub const NO_EVENT: f32 = f32::INFINITY;

// ============================================================================
// BitMatrix
// ============================================================================

/// A borrowed, shape-validated view of per-bit timestamp storage.
///
/// Storage is flat and row-major: line `i` occupies
/// `data[i * capacity .. (i + 1) * capacity]`. Within a line, valid events
/// form an ascending prefix and every slot after that prefix must hold
/// [`NO_EVENT`] (the layout [`EventTable`] produces). Constructing a view
/// only checks the shape; the prefix ordering and the padding are the
/// caller's contract.
///
/// # Examples
///
/// ```rust
/// use unstrobed::matrix::{BitMatrix, NO_EVENT};
///
/// let data = [1.0, 2.0, NO_EVENT, 4.0, 5.0, 6.0];
/// let matrix = BitMatrix::new(&data, 2)?;
///
/// assert_eq!(matrix.lines(), 2);
/// assert_eq!(matrix.capacity(), 3);
/// assert_eq!(matrix.event(1, 0), 4.0);
/// assert_eq!(matrix.event(1, 3), NO_EVENT);
/// # Ok::<(), unstrobed::Error>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct BitMatrix<'a> {
    data: &'a [f32],
    lines: usize,
    capacity: usize,
}

impl<'a> BitMatrix<'a> {
    /// Create a view over flat storage, inferring the per-line capacity
    /// from the storage length.
    ///
    /// Fails with [`Error::Shape`] when `lines` is zero or `data.len()` is
    /// not a multiple of `lines`.
    pub fn new(data: &'a [f32], lines: usize) -> Result<Self> {
        if lines == 0 || data.len() % lines != 0 {
            return Err(Error::Shape {
                len: data.len(),
                lines,
            });
        }
        Ok(Self {
            data,
            lines,
            capacity: data.len() / lines,
        })
    }

    /// Create a view with an explicit per-line capacity.
    ///
    /// Fails with [`Error::Shape`] when `lines` is zero or
    /// `lines * capacity` does not equal `data.len()` exactly.
    pub fn with_capacity(data: &'a [f32], lines: usize, capacity: usize) -> Result<Self> {
        if lines == 0 || lines.checked_mul(capacity) != Some(data.len()) {
            return Err(Error::Shape {
                len: data.len(),
                lines,
            });
        }
        Ok(Self {
            data,
            lines,
            capacity,
        })
    }

    pub(crate) fn from_parts(data: &'a [f32], lines: usize, capacity: usize) -> Self {
        debug_assert_eq!(data.len(), lines * capacity);
        Self {
            data,
            lines,
            capacity,
        }
    }

    /// Number of bit-lines.
    #[inline]
    pub const fn lines(&self) -> usize {
        self.lines
    }

    /// Timestamp slots per line.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The stored slots of one line.
    ///
    /// # Panics
    ///
    /// Panics when `line >= self.lines()`.
    #[inline]
    pub fn line(&self, line: usize) -> &'a [f32] {
        &self.data[line * self.capacity..(line + 1) * self.capacity]
    }

    /// The timestamp at `(line, index)`, or [`NO_EVENT`] once `index` is
    /// past the stored capacity.
    ///
    /// `line` must be below [`lines`](Self::lines); every caller in this
    /// crate guarantees it.
    #[inline]
    pub fn event(&self, line: usize, index: usize) -> f32 {
        debug_assert!(line < self.lines);
        if index < self.capacity {
            self.data[line * self.capacity + index]
        } else {
            NO_EVENT
        }
    }

    /// Count valid events: the leading finite prefix of every line, summed.
    pub fn count_events(&self) -> usize {
        (0..self.lines)
            .map(|line| {
                self.line(line)
                    .iter()
                    .take_while(|t| t.is_finite())
                    .count()
            })
            .sum()
    }

    /// Raw flat storage.
    #[inline]
    pub const fn as_slice(&self) -> &'a [f32] {
        self.data
    }
}

// ============================================================================
// EventTable
// ============================================================================

/// Owned, sentinel-padded per-line event storage.
///
/// Lays ragged per-line timestamp vectors into a rectangular table whose
/// width is the longest line plus one, padding every line with
/// [`NO_EVENT`]. The extra column keeps a sentinel read in bounds after a
/// full-width line's final event.
///
/// Each line must already be ascending; that is the acquisition caller's
/// contract and is not re-checked here.
///
/// # Examples
///
/// ```rust
/// use unstrobed::matrix::EventTable;
///
/// let table = EventTable::from_lines(&[
///     vec![1.0, 5.0],
///     vec![1.0, 3.0],
///     vec![2.0, 4.0],
///     vec![3.0, 6.0],
/// ])?;
///
/// assert_eq!(table.lines(), 4);
/// assert_eq!(table.capacity(), 3);
/// assert_eq!(table.event_count(), 8);
/// # Ok::<(), unstrobed::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct EventTable {
    data: Vec<f32>,
    lines: usize,
    capacity: usize,
    events: usize,
}

impl EventTable {
    /// Build a padded table from ragged per-line event timestamps.
    ///
    /// Fails with [`Error::Shape`] when `lines` is empty and with
    /// [`Error::NonFinite`] when any timestamp is NaN or infinite (such a
    /// value would collide with the padding sentinel).
    pub fn from_lines<L: AsRef<[f32]>>(lines: &[L]) -> Result<Self> {
        if lines.is_empty() {
            return Err(Error::Shape { len: 0, lines: 0 });
        }

        let mut events = 0usize;
        let mut longest = 0usize;
        for (i, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if let Some(index) = line.iter().position(|t| !t.is_finite()) {
                return Err(Error::NonFinite { line: i, index });
            }
            events += line.len();
            longest = longest.max(line.len());
        }

        let capacity = longest + 1;
        let mut data = vec![NO_EVENT; lines.len() * capacity];
        for (i, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            data[i * capacity..i * capacity + line.len()].copy_from_slice(line);
        }

        debug!(lines = lines.len(), capacity, events, "built event table");

        Ok(Self {
            data,
            lines: lines.len(),
            capacity,
            events,
        })
    }

    /// Number of bit-lines.
    #[inline]
    pub const fn lines(&self) -> usize {
        self.lines
    }

    /// Timestamp slots per line (longest input line plus one).
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total valid events across all lines.
    #[inline]
    pub const fn event_count(&self) -> usize {
        self.events
    }

    /// Check whether the table holds no events at all.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.events == 0
    }

    /// A borrowed matrix view of the padded storage.
    #[inline]
    pub fn matrix(&self) -> BitMatrix<'_> {
        BitMatrix::from_parts(&self.data, self.lines, self.capacity)
    }
}
