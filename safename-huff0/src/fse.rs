//! FSE decoding of compressed Huffman weights.
//!
//! A table description whose header byte is below 128 carries its weights
//! as an FSE stream: a normalized-count header read forwards, followed by a
//! backwards bitstream decoded with two interleaved states.

use crate::bits::{BitReader, ReverseBitReader};
use crate::error::{Error, Result};

/// Largest accuracy log accepted for weight streams.
pub const MAX_ACCURACY_LOG: u32 = 6;

const MIN_ACCURACY_LOG: u32 = 5;
const MAX_SYMBOL: usize = 255;
const MAX_WEIGHTS: usize = 255;

#[derive(Debug)]
struct NormalizedCounts {
    accuracy_log: u32,
    /// Per-symbol probability; -1 marks a "less than one" probability.
    counts: Vec<i16>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Entry {
    symbol: u8,
    nb_bits: u8,
    base: u16,
}

/// Decodes an FSE-compressed weight block.
pub(crate) fn decode_weights(input: &[u8]) -> Result<Vec<u8>> {
    let (norm, used) = read_counts(input)?;
    let table = build_table(&norm)?;
    let mut reader = ReverseBitReader::new(&input[used..])
        .map_err(|_| Error::Fse("weight bitstream has no end marker"))?;

    let log = norm.accuracy_log;
    let mut state1 = reader.read(log) as usize;
    let mut state2 = reader.read(log) as usize;
    let mut weights = Vec::with_capacity(MAX_WEIGHTS);

    loop {
        if weights.len() + 2 > MAX_WEIGHTS {
            return Err(Error::Fse("too many weights"));
        }
        weights.push(step(&table, &mut state1, &mut reader));
        if reader.overflowed() {
            weights.push(table[state2].symbol);
            break;
        }

        if weights.len() + 2 > MAX_WEIGHTS {
            return Err(Error::Fse("too many weights"));
        }
        weights.push(step(&table, &mut state2, &mut reader));
        if reader.overflowed() {
            weights.push(table[state1].symbol);
            break;
        }
    }

    Ok(weights)
}

#[inline]
fn step(table: &[Entry], state: &mut usize, reader: &mut ReverseBitReader<'_>) -> u8 {
    let entry = table[*state];
    *state = entry.base as usize + reader.read(entry.nb_bits as u32) as usize;
    entry.symbol
}

/// Reads the normalized-count header. Returns the counts and the number of
/// bytes the header occupies.
fn read_counts(input: &[u8]) -> Result<(NormalizedCounts, usize)> {
    if input.is_empty() {
        return Err(Error::Fse("empty count header"));
    }

    let mut reader = BitReader::new(input);
    let accuracy_log = reader.read(4) + MIN_ACCURACY_LOG;
    if accuracy_log > MAX_ACCURACY_LOG {
        return Err(Error::Fse("accuracy log too large"));
    }

    let mut remaining: i32 = (1 << accuracy_log) + 1;
    let mut threshold: i32 = 1 << accuracy_log;
    let mut nb_bits = accuracy_log + 1;
    let mut counts: Vec<i16> = Vec::with_capacity(MAX_SYMBOL + 1);
    let mut previous_zero = false;

    while remaining > 1 && counts.len() <= MAX_SYMBOL {
        if previous_zero {
            let mut zeros = counts.len();
            loop {
                let repeat = reader.read(2) as usize;
                zeros += repeat;
                if repeat != 3 {
                    break;
                }
            }
            if zeros > MAX_SYMBOL {
                return Err(Error::Fse("zero run past last symbol"));
            }
            counts.resize(zeros, 0);
        }

        // Values below `max` fit in one bit less than the full width.
        let max = (2 * threshold - 1) - remaining;
        let low = reader.peek(nb_bits - 1) as i32;
        let value = if low < max {
            reader.consume(nb_bits - 1);
            low
        } else {
            let mut value = reader.peek(nb_bits) as i32;
            if value >= threshold {
                value -= max;
            }
            reader.consume(nb_bits);
            value
        };

        let count = value - 1;
        remaining -= count.abs();
        counts.push(count as i16);
        previous_zero = count == 0;

        while remaining < threshold {
            nb_bits -= 1;
            threshold >>= 1;
        }
    }

    if remaining != 1 {
        return Err(Error::Fse("probabilities do not sum to table size"));
    }
    let used = reader.bytes_consumed();
    if used > input.len() {
        return Err(Error::Fse("count header truncated"));
    }

    Ok((
        NormalizedCounts {
            accuracy_log,
            counts,
        },
        used,
    ))
}

fn build_table(norm: &NormalizedCounts) -> Result<Vec<Entry>> {
    let size = 1usize << norm.accuracy_log;
    let mut table = vec![Entry::default(); size];
    let mut next_state = vec![0u32; norm.counts.len()];

    // Low-probability symbols take the top of the table.
    let mut boundary = size;
    for (symbol, &count) in norm.counts.iter().enumerate() {
        if count == -1 {
            boundary -= 1;
            table[boundary].symbol = symbol as u8;
            next_state[symbol] = 1;
        } else {
            next_state[symbol] = count.max(0) as u32;
        }
    }

    let step = (size >> 1) + (size >> 3) + 3;
    let mask = size - 1;
    let mut position = 0usize;
    for (symbol, &count) in norm.counts.iter().enumerate() {
        for _ in 0..count.max(0) {
            table[position].symbol = symbol as u8;
            position = (position + step) & mask;
            while position >= boundary {
                position = (position + step) & mask;
            }
        }
    }
    if position != 0 {
        return Err(Error::Fse("symbol spread did not return to origin"));
    }

    for entry in table.iter_mut() {
        let symbol = entry.symbol as usize;
        let state = next_state[symbol];
        next_state[symbol] += 1;
        let nb_bits = norm.accuracy_log - (31 - state.leading_zeros());
        entry.nb_bits = nb_bits as u8;
        entry.base = ((state << nb_bits) - size as u32) as u16;
    }

    Ok(table)
}
