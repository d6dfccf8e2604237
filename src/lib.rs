//! # Unstrobed
//!
//! Reconstruction of unstrobed digital words from per-bit event timestamps.
//!
//! Acquisition hardware reports each bit of a digital word as its own event
//! channel: one timestamped stream of transitions for bit 0, another for
//! bit 1, and so on. Nothing latches the word as a whole, so the word
//! sequence has to be rebuilt by merging the per-bit streams and grouping
//! transitions that share an exact timestamp.
//!
//! ## Features
//!
//! - **Exact-tie k-way merge**: one pass, no allocation in the core loop
//! - **Validated views**: shape-checked matrix access over flat storage,
//!   sentinel-padded tables built from ragged lines
//! - **Checked contracts**: capacity and event-count violations surface as
//!   errors, never as out-of-bounds access
//! - **Chunked streams**: words split across acquisition read boundaries
//!   are stitched back together
//!
//! ## Quick Start
//!
//! ```rust
//! use unstrobed::prelude::*;
//!
//! // Four bit-lines, eight transitions in total.
//! let table = EventTable::from_lines(&[
//!     vec![1.0, 5.0],
//!     vec![1.0, 3.0],
//!     vec![2.0, 4.0],
//!     vec![3.0, 6.0],
//! ])?;
//!
//! let events = reconstruct(&table)?;
//!
//! // Bits 0 and 1 fired together at t=1.0.
//! assert_eq!(events.len(), 6);
//! assert_eq!(events[0].word.bits(), 0b0011);
//! assert_eq!(events[0].timestamp, 1.0);
//! # Ok::<(), unstrobed::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod matrix;
pub mod merge;
pub mod stream;
pub mod word;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::matrix::{BitMatrix, EventTable, NO_EVENT};
    pub use crate::merge::{MAX_WORD_BITS, reconstruct, reconstruct_into};
    pub use crate::stream::WordStream;
    pub use crate::word::{Word, WordEvent};
}

pub use error::{Error, Result};
