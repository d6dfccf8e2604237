//! # Chunked Stream
//!
//! Feeds three acquisition chunks through a word stream. The word at
//! t=2.0 arrives split across the first two chunks and comes out whole.
//!
//! Run: `cargo run --example 02_chunked_stream`

use unstrobed::stream::WordStream;
use unstrobed::Result;

fn main() -> Result<()> {
    let chunks: [&[&[f32]]; 3] = [
        &[&[1.0, 2.0], &[], &[1.0]],
        &[&[], &[2.0, 3.0], &[]],
        &[&[4.0], &[], &[4.0]],
    ];

    let mut stream = WordStream::new();
    for (n, chunk) in chunks.iter().enumerate() {
        let events = stream.push_lines(chunk)?;
        println!("chunk {}: {} words settled", n + 1, events.len());
        for event in events {
            println!("  {}", event);
        }
    }

    if let Some(event) = stream.finish() {
        println!("final: {}", event);
    }

    Ok(())
}
