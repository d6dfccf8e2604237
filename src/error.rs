//! Error types for word reconstruction.

use thiserror::Error;

/// Result type alias using this crate's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for reconstruction operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Flat timestamp storage does not divide evenly into the requested
    /// number of bit-lines.
    #[error("invalid bit matrix shape: {len} timestamps do not fill {lines} lines evenly")]
    Shape {
        /// Length of the flat storage.
        len: usize,
        /// Requested number of bit-lines.
        lines: usize,
    },

    /// Matrix line count does not match the requested word width.
    #[error("bit-line count mismatch: word width {expected} but matrix has {found} lines")]
    LineCount {
        /// The word width the caller asked for.
        expected: usize,
        /// The line count the matrix actually has.
        found: usize,
    },

    /// Word width outside the supported range.
    #[error("unsupported word width {width}: expected 1 to 32")]
    WordWidth {
        /// The rejected width.
        width: usize,
    },

    /// An input timestamp is NaN or infinite where a finite value is
    /// required.
    #[error("non-finite timestamp at line {line}, index {index}")]
    NonFinite {
        /// Line holding the offending value.
        line: usize,
        /// Position of the offending value within the line.
        index: usize,
    },

    /// An output buffer filled up before the merge consumed every event.
    #[error("output capacity exhausted after {written} words with {remaining} events unconsumed")]
    OutputCapacity {
        /// Words written before the buffers ran out.
        written: usize,
        /// Events still unconsumed at that point.
        remaining: usize,
    },

    /// The declared event total exceeds the events the lines actually hold.
    #[error("event total over-declared: {declared} declared, only {consumed} found")]
    EventDeficit {
        /// The caller's declared event total.
        declared: usize,
        /// Events actually consumed before the lines ran dry.
        consumed: usize,
    },
}
