//! End-to-end tests for unstrobed word reconstruction.

use unstrobed::matrix::{BitMatrix, EventTable};
use unstrobed::merge::{reconstruct, reconstruct_into};
use unstrobed::Error;

/// Naive reference: pop every line sitting at the global minimum, one tie
/// group per step.
fn reference_merge(lines: &[Vec<f32>]) -> Vec<(u32, f32)> {
    let mut cursors = vec![0usize; lines.len()];
    let mut out = Vec::new();

    loop {
        let mut min: Option<f32> = None;
        for (i, line) in lines.iter().enumerate() {
            if let Some(&t) = line.get(cursors[i]) {
                min = Some(match min {
                    Some(m) if m <= t => m,
                    _ => t,
                });
            }
        }
        let min = match min {
            Some(m) => m,
            None => break,
        };

        let mut word = 0u32;
        for (i, line) in lines.iter().enumerate() {
            if line.get(cursors[i]) == Some(&min) {
                word |= 1 << i;
                cursors[i] += 1;
            }
        }
        out.push((word, min));
    }

    out
}

/// Small deterministic PRNG so generated scenarios are reproducible.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

/// Generate per-line event vectors step by step, together with the exact
/// word sequence they must reconstruct to.
///
/// Timestamps advance on a quarter-unit grid, so equal steps compare
/// bit-identically in `f32` and tie groups are exact by construction.
fn random_scenario(seed: u64, word_bits: usize, steps: usize) -> (Vec<Vec<f32>>, Vec<(u32, f32)>) {
    let mut rng = XorShift(seed);
    let mut lines = vec![Vec::new(); word_bits];
    let mut expected = Vec::new();
    let mut quarters = 0u64;

    for _ in 0..steps {
        quarters += 1 + rng.below(8);
        let t = quarters as f32 * 0.25;

        let mask = loop {
            let m = rng.below(1u64 << word_bits) as u32;
            if m != 0 {
                break m;
            }
        };

        for (line, events) in lines.iter_mut().enumerate() {
            if mask & (1 << line) != 0 {
                events.push(t);
            }
        }
        expected.push((mask, t));
    }

    (lines, expected)
}

// Worked example: four lines, eight transitions.

#[test]
fn test_four_line_example_exact_sequence() {
    let data = [
        1.0, 5.0, // line 0
        1.0, 3.0, // line 1
        2.0, 4.0, // line 2
        3.0, 6.0, // line 3
    ];
    let bits = BitMatrix::new(&data, 4).unwrap();
    let mut words = [0i32; 8];
    let mut timestamps = [0f32; 8];

    let count = reconstruct_into(4, 8, &bits, &mut words, &mut timestamps).unwrap();

    assert_eq!(count, 6);
    assert_eq!(&words[..count], &[3, 4, 10, 4, 1, 8]);
    assert_eq!(&timestamps[..count], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_four_line_example_word_events() {
    let table = EventTable::from_lines(&[
        vec![1.0, 5.0],
        vec![1.0, 3.0],
        vec![2.0, 4.0],
        vec![3.0, 6.0],
    ])
    .unwrap();

    let events = reconstruct(&table).unwrap();

    let bits: Vec<u32> = events.iter().map(|e| e.word.bits()).collect();
    assert_eq!(bits, vec![0b0011, 0b0100, 0b1010, 0b0100, 0b0001, 0b1000]);
    assert!(events[2].word.contains(1));
    assert!(events[2].word.contains(3));
    assert_eq!(events[2].word.count_lines(), 2);
}

// Ordering, conservation, and per-line consumption.

#[test]
fn test_timestamps_never_decrease() {
    for &(seed, word_bits) in &[(11u64, 4usize), (12, 7), (13, 16), (14, 32)] {
        let (lines, _) = random_scenario(seed, word_bits, 300);
        let table = EventTable::from_lines(&lines).unwrap();

        let events = reconstruct(&table).unwrap();

        for pair in events.windows(2) {
            assert!(
                pair[0].timestamp <= pair[1].timestamp,
                "timestamps regressed: {} then {}",
                pair[0].timestamp,
                pair[1].timestamp
            );
        }
    }
}

#[test]
fn test_every_event_consumed_exactly_once() {
    let (lines, _) = random_scenario(21, 16, 400);
    let table = EventTable::from_lines(&lines).unwrap();
    let total: usize = lines.iter().map(Vec::len).sum();

    let events = reconstruct(&table).unwrap();

    let consumed: u32 = events.iter().map(|e| e.word.count_lines()).sum();
    assert_eq!(consumed as usize, total);

    for (line, line_events) in lines.iter().enumerate() {
        let appearances = events.iter().filter(|e| e.word.contains(line)).count();
        assert_eq!(
            appearances,
            line_events.len(),
            "line {} consumed the wrong number of times",
            line
        );
    }
}

#[test]
fn test_words_match_generated_tie_groups() {
    let (lines, expected) = random_scenario(31, 8, 500);
    let table = EventTable::from_lines(&lines).unwrap();

    let events = reconstruct(&table).unwrap();

    assert_eq!(events.len(), expected.len());
    for (event, &(mask, t)) in events.iter().zip(&expected) {
        assert_eq!(event.word.bits(), mask);
        assert_eq!(event.timestamp, t);
        assert!(event.word.bits() < 1 << 8);
    }
}

#[test]
fn test_agrees_with_reference_merge() {
    // Irregular hand-built lines, ties included.
    let lines = vec![
        vec![0.5, 1.25, 4.0, 4.5],
        vec![0.5, 2.0, 4.0],
        vec![1.25, 2.0, 2.5],
        vec![],
        vec![2.5, 99.75],
    ];
    let table = EventTable::from_lines(&lines).unwrap();

    let events = reconstruct(&table).unwrap();
    let expected = reference_merge(&lines);

    assert_eq!(events.len(), expected.len());
    for (event, &(mask, t)) in events.iter().zip(&expected) {
        assert_eq!((event.word.bits(), event.timestamp), (mask, t));
    }
}

#[test]
fn test_identical_input_identical_output() {
    let (lines, _) = random_scenario(41, 12, 250);
    let table = EventTable::from_lines(&lines).unwrap();

    let first = reconstruct(&table).unwrap();
    let second = reconstruct(&table).unwrap();
    assert_eq!(first, second);

    // The buffer-writing path produces the same sequence.
    let total = table.event_count();
    let mut words = vec![0i32; total];
    let mut timestamps = vec![0f32; total];
    let count =
        reconstruct_into(table.lines(), total, &table.matrix(), &mut words, &mut timestamps)
            .unwrap();

    assert_eq!(count, first.len());
    for (event, (&raw, &t)) in first.iter().zip(words.iter().zip(&timestamps)) {
        assert_eq!(event.word.to_raw(), raw);
        assert_eq!(event.timestamp, t);
    }
}

// Width extremes.

#[test]
fn test_full_width_tie_collapses_to_one_word() {
    let lines: Vec<Vec<f32>> = (0..32).map(|_| vec![6.5]).collect();
    let table = EventTable::from_lines(&lines).unwrap();

    let events = reconstruct(&table).unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].word.bits(), u32::MAX);
    assert_eq!(events[0].word.to_raw(), -1);
    assert_eq!(events[0].timestamp, 6.5);
}

#[test]
fn test_interleaved_lines_produce_single_bit_words() {
    let table = EventTable::from_lines(&[vec![1.0, 3.0, 5.0], vec![2.0, 4.0]]).unwrap();

    let events = reconstruct(&table).unwrap();

    let raw: Vec<i32> = events.iter().map(|e| e.word.to_raw()).collect();
    assert_eq!(raw, vec![1, 2, 1, 2, 1]);
}

// Rejection paths.

#[test]
fn test_invalid_shape_detected_before_any_output() {
    // Five values cannot form two equal lines.
    let data = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert!(matches!(
        BitMatrix::new(&data, 2),
        Err(Error::Shape { len: 5, lines: 2 })
    ));

    // A mismatched width never touches the outputs.
    let square = [1.0, 2.0, 3.0, 4.0];
    let bits = BitMatrix::new(&square, 2).unwrap();
    let mut words = [i32::MIN; 4];
    let mut timestamps = [f32::MIN; 4];

    assert!(reconstruct_into(4, 4, &bits, &mut words, &mut timestamps).is_err());
    assert_eq!(words, [i32::MIN; 4]);
    assert_eq!(timestamps, [f32::MIN; 4]);
}

#[test]
fn test_caller_contract_violations_are_errors() {
    let data = [1.0, 2.0, 3.0, 4.0];
    let bits = BitMatrix::new(&data, 1).unwrap();

    // Outputs sized below the step count.
    let mut words = [0i32; 2];
    let mut timestamps = [0f32; 2];
    assert!(matches!(
        reconstruct_into(1, 4, &bits, &mut words, &mut timestamps),
        Err(Error::OutputCapacity {
            written: 2,
            remaining: 2
        })
    ));

    // Declared total beyond the stored events.
    let mut words = [0i32; 8];
    let mut timestamps = [0f32; 8];
    assert!(matches!(
        reconstruct_into(1, 6, &bits, &mut words, &mut timestamps),
        Err(Error::EventDeficit {
            declared: 6,
            consumed: 4
        })
    ));
}
