//! # One-Shot Reconstruction
//!
//! Builds a padded event table from four ragged bit-lines and merges them
//! into the full word sequence.
//!
//! ```text
//! bit 0:  1.0            5.0
//! bit 1:  1.0   3.0
//! bit 2:     2.0   4.0
//! bit 3:        3.0         6.0
//! ```
//!
//! Run: `cargo run --example 01_reconstruct`

use unstrobed::matrix::EventTable;
use unstrobed::merge::reconstruct;
use unstrobed::Result;

fn main() -> Result<()> {
    let table = EventTable::from_lines(&[
        vec![1.0, 5.0],
        vec![1.0, 3.0],
        vec![2.0, 4.0],
        vec![3.0, 6.0],
    ])?;

    println!(
        "{} lines, {} events, {} slots per line",
        table.lines(),
        table.event_count(),
        table.capacity()
    );

    for event in reconstruct(&table)? {
        println!("{}", event);
    }

    Ok(())
}
