//! Chunked reconstruction across acquisition read boundaries.
//!
//! Device polling delivers per-bit events in chunks, and a word whose bit
//! transitions straddle a chunk boundary arrives split: some bits end the
//! one chunk, the rest open the next at the same timestamp. [`WordStream`]
//! reconstructs chunk by chunk and withholds each chunk's trailing word
//! until the following chunk shows whether it gains more bits.

use crate::error::Result;
use crate::matrix::EventTable;
use crate::merge::reconstruct;
use crate::word::WordEvent;
use tracing::{debug, trace};

/// Stitches per-chunk reconstructions into one continuous word sequence.
///
/// Feed each chunk with [`push`](Self::push) (or
/// [`push_lines`](Self::push_lines) for ragged per-line slices) and call
/// [`finish`](Self::finish) after the last chunk to release the held word.
/// The stream is empty again after `finish` and can be reused.
///
/// # Examples
///
/// ```rust
/// use unstrobed::matrix::EventTable;
/// use unstrobed::stream::WordStream;
///
/// let mut stream = WordStream::new();
///
/// // Bit 0 of the word at t=1.0 arrives in the first chunk, bit 1 in the
/// // second.
/// let first = EventTable::from_lines(&[vec![1.0], vec![]])?;
/// let second = EventTable::from_lines(&[vec![], vec![1.0]])?;
///
/// assert!(stream.push(&first)?.is_empty());
/// assert!(stream.push(&second)?.is_empty());
///
/// let event = stream.finish().expect("one word pending");
/// assert_eq!(event.word.bits(), 0b11);
/// assert_eq!(event.timestamp, 1.0);
/// # Ok::<(), unstrobed::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct WordStream {
    held: Option<WordEvent>,
    chunks: u64,
    released: u64,
}

impl WordStream {
    /// Create a stream with no held word.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstruct one chunk and return every word settled by it.
    ///
    /// The returned events continue the sequence of previous calls. A held
    /// word whose timestamp exactly equals the chunk's first word is
    /// OR-merged into it (one physical word split across the boundary);
    /// a held word with any other timestamp is released ahead of the
    /// chunk's words. The chunk's own final word becomes the new held
    /// word. An empty chunk releases the held word as-is: with no newer
    /// events at all, it can no longer gain bits.
    ///
    /// Errors from the inner reconstruction propagate and leave the held
    /// word untouched.
    pub fn push(&mut self, table: &EventTable) -> Result<Vec<WordEvent>> {
        let mut events = reconstruct(table)?;
        self.chunks += 1;

        if events.is_empty() {
            let released: Vec<WordEvent> = self.held.take().into_iter().collect();
            if !released.is_empty() {
                trace!(chunk = self.chunks, "empty chunk released held word");
            }
            self.released += released.len() as u64;
            return Ok(released);
        }

        if let Some(held) = self.held.take() {
            if events[0].timestamp == held.timestamp {
                events[0].word |= held.word;
                debug!(
                    timestamp = held.timestamp,
                    word = events[0].word.bits(),
                    "merged word split across chunk boundary"
                );
            } else {
                events.insert(0, held);
            }
        }

        self.held = events.pop();
        self.released += events.len() as u64;
        Ok(events)
    }

    /// Build a padded table from ragged per-line slices and push it.
    pub fn push_lines<L: AsRef<[f32]>>(&mut self, lines: &[L]) -> Result<Vec<WordEvent>> {
        let table = EventTable::from_lines(lines)?;
        self.push(&table)
    }

    /// Release the held word after the final chunk.
    ///
    /// Returns `None` when nothing is held. The stream starts a fresh
    /// sequence afterwards.
    pub fn finish(&mut self) -> Option<WordEvent> {
        let held = self.held.take();
        if held.is_some() {
            self.released += 1;
        }
        held
    }

    /// The word currently held back, if any.
    pub fn pending(&self) -> Option<&WordEvent> {
        self.held.as_ref()
    }

    /// Get statistics.
    pub fn stats(&self) -> WordStreamStats {
        WordStreamStats {
            chunks: self.chunks,
            released: self.released,
            pending: self.held.is_some(),
        }
    }
}

/// Statistics for a word stream.
#[derive(Debug, Clone, Copy)]
pub struct WordStreamStats {
    /// Chunks reconstructed so far.
    pub chunks: u64,
    /// Word events released to the caller, `finish` included.
    pub released: u64,
    /// Whether a word is currently held back.
    pub pending: bool,
}
