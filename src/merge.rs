//! The k-way merge that reconstructs words from per-bit event streams.
//!
//! Each bit-line of the matrix is an ascending stream of transition
//! timestamps. One merge step finds the exact minimum among every line's
//! next pending timestamp, collects all lines tied at that minimum, and
//! emits one word: the OR of `1 << line` over the tie group, stamped with
//! the shared timestamp. Tied cursors advance and the loop repeats until
//! the declared event total is consumed.
//!
//! Tie detection is exact `f32` equality. Lines that fired together only
//! group into one word when the acquisition gave them bit-identical
//! timestamps; there is no tolerance window.
//!
//! [`reconstruct_into`] is the zero-allocation core writing into
//! caller-provided buffers; [`reconstruct`] is the allocating wrapper
//! returning [`WordEvent`]s.

use crate::error::{Error, Result};
use crate::matrix::{BitMatrix, EventTable, NO_EVENT};
use crate::word::{Word, WordEvent};
use smallvec::SmallVec;

/// Widest reconstructable word, and the per-line scratch bound.
pub const MAX_WORD_BITS: usize = 32;

/// Reconstruct unstrobed words into caller-provided output buffers.
///
/// `word_bits` must equal `bits.lines()` and lie in `1..=MAX_WORD_BITS`.
/// `total_events` is the caller's count of valid events across every line;
/// the merge consumes exactly that many. Both outputs are write-only and
/// need one slot per merge step. Sizing either to `total_events` is always
/// sufficient, since a step consumes at least one event; the true step
/// count can be as low as `total_events / word_bits` when every step is a
/// full-width tie.
///
/// Returns the number of `(word, timestamp)` pairs written. `words` and
/// `timestamps` line up positionally: slot `n` of each describes merge
/// step `n`.
///
/// # Errors
///
/// - [`Error::WordWidth`] / [`Error::LineCount`] when the width
///   precondition fails, before anything is written.
/// - [`Error::OutputCapacity`] when an output buffer fills with events
///   still unconsumed.
/// - [`Error::EventDeficit`] when `total_events` declares more events than
///   the lines actually hold.
///
/// # Examples
///
/// ```rust
/// use unstrobed::matrix::BitMatrix;
/// use unstrobed::merge::reconstruct_into;
///
/// // Four bit-lines, two events each, row-major.
/// let data = [
///     1.0, 5.0, // line 0
///     1.0, 3.0, // line 1
///     2.0, 4.0, // line 2
///     3.0, 6.0, // line 3
/// ];
/// let bits = BitMatrix::new(&data, 4)?;
/// let mut words = [0i32; 8];
/// let mut timestamps = [0f32; 8];
///
/// let count = reconstruct_into(4, 8, &bits, &mut words, &mut timestamps)?;
///
/// assert_eq!(count, 6);
/// assert_eq!(&words[..count], &[3, 4, 10, 4, 1, 8]);
/// assert_eq!(&timestamps[..count], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// # Ok::<(), unstrobed::Error>(())
/// ```
pub fn reconstruct_into(
    word_bits: usize,
    total_events: usize,
    bits: &BitMatrix<'_>,
    words: &mut [i32],
    timestamps: &mut [f32],
) -> Result<usize> {
    if word_bits == 0 || word_bits > MAX_WORD_BITS {
        return Err(Error::WordWidth { width: word_bits });
    }
    if bits.lines() != word_bits {
        return Err(Error::LineCount {
            expected: word_bits,
            found: bits.lines(),
        });
    }

    let mut cursors = [0usize; MAX_WORD_BITS];
    let mut next = [NO_EVENT; MAX_WORD_BITS];
    for line in 0..word_bits {
        next[line] = bits.event(line, 0);
    }

    let mut tie: SmallVec<[usize; MAX_WORD_BITS]> = SmallVec::new();
    let mut written = 0usize;
    let mut consumed = 0usize;

    while consumed < total_events {
        // Exact-minimum scan; the tie group keeps ascending line order.
        tie.clear();
        tie.push(0);
        let mut step_time = next[0];
        for line in 1..word_bits {
            if step_time > next[line] {
                step_time = next[line];
                tie.clear();
                tie.push(line);
            } else if step_time == next[line] {
                tie.push(line);
            }
        }

        if !step_time.is_finite() {
            return Err(Error::EventDeficit {
                declared: total_events,
                consumed,
            });
        }
        if written == words.len() || written == timestamps.len() {
            return Err(Error::OutputCapacity {
                written,
                remaining: total_events - consumed,
            });
        }

        let mut word = Word::EMPTY;
        for &line in &tie {
            word = word.insert(line);
            cursors[line] += 1;
            next[line] = bits.event(line, cursors[line]);
        }

        words[written] = word.to_raw();
        timestamps[written] = step_time;
        written += 1;
        consumed += tie.len();
    }

    Ok(written)
}

/// Reconstruct every word event from a padded table, allocating the
/// outputs.
///
/// Output buffers are sized to the table's event count (the worst case of
/// one event per step) and the result is truncated to the words actually
/// produced. The word width is the table's line count.
///
/// # Examples
///
/// ```rust
/// use unstrobed::matrix::EventTable;
/// use unstrobed::merge::reconstruct;
///
/// let table = EventTable::from_lines(&[
///     vec![1.0, 5.0],
///     vec![1.0, 3.0],
///     vec![2.0, 4.0],
///     vec![3.0, 6.0],
/// ])?;
///
/// let events = reconstruct(&table)?;
///
/// assert_eq!(events.len(), 6);
/// assert_eq!(events[0].word.bits(), 0b0011);
/// assert_eq!(events[0].timestamp, 1.0);
/// # Ok::<(), unstrobed::Error>(())
/// ```
pub fn reconstruct(table: &EventTable) -> Result<Vec<WordEvent>> {
    let total = table.event_count();
    let mut words = vec![0i32; total];
    let mut timestamps = vec![0f32; total];

    let count = reconstruct_into(
        table.lines(),
        total,
        &table.matrix(),
        &mut words,
        &mut timestamps,
    )?;

    Ok(words[..count]
        .iter()
        .zip(&timestamps[..count])
        .map(|(&word, &timestamp)| WordEvent::new(Word::from_raw(word), timestamp))
        .collect())
}
