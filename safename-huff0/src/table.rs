//! Huffman table descriptions.
//!
//! A table is a list of per-symbol weights. A weight `w > 0` gives the
//! symbol a code of `table_log + 1 - w` bits; weight 0 means the symbol is
//! absent. On the wire the weight of the last symbol is omitted: it is the
//! one value that completes the Kraft sum to a power of two.
//!
//! ## Wire format
//!
//! The first byte `h` selects the representation:
//!
//! - `h >= 128`: `h - 127` weights follow as 4-bit nibbles, high nibble first.
//! - `h < 128`: the next `h` bytes hold FSE-compressed weights.

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{Error, Result};
use crate::{fse, lengths};

/// Largest table log (longest code length) supported.
pub const TABLE_LOG_MAX: u8 = 11;

/// Number of distinct byte symbols.
pub const MAX_SYMBOLS: usize = 256;

/// Most explicit weights the direct (nibble) representation can carry.
const MAX_DIRECT_WEIGHTS: usize = 128;

/// A validated Huffman table description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// One weight per symbol up to and including the last present symbol.
    weights: Vec<u8>,
    table_log: u8,
}

impl Table {
    /// Parses a table description from the start of `input`.
    ///
    /// Returns the table and the number of bytes the description occupies;
    /// the remainder of `input` is left for the compressed stream.
    pub fn read(input: &[u8]) -> Result<(Self, usize)> {
        let (&header, rest) = input.split_first().ok_or(Error::EmptyInput)?;

        let (mut weights, size) = if header >= 128 {
            let count = (header - 127) as usize;
            let size = (count + 1) / 2;
            if rest.len() < size {
                return Err(Error::Truncated {
                    need: 1 + size,
                    have: input.len(),
                });
            }
            let mut weights = Vec::with_capacity(count + 1);
            for i in 0..count {
                let byte = rest[i / 2];
                weights.push(if i % 2 == 0 { byte >> 4 } else { byte & 0x0f });
            }
            (weights, size)
        } else {
            let size = header as usize;
            if rest.len() < size {
                return Err(Error::Truncated {
                    need: 1 + size,
                    have: input.len(),
                });
            }
            (fse::decode_weights(&rest[..size])?, size)
        };

        let table_log = complete_weights(&mut weights)?;
        Ok((Self { weights, table_log }, 1 + size))
    }

    /// Builds a table from a full weight list, including the last symbol.
    ///
    /// Trailing zero weights are ignored.
    pub fn from_weights(weights: &[u8]) -> Result<Self> {
        let end = weights
            .iter()
            .rposition(|&w| w != 0)
            .ok_or(Error::SingleSymbol)?;
        if end + 1 > MAX_SYMBOLS {
            return Err(Error::InvalidTable("more than 256 symbols"));
        }

        let mut explicit = weights[..end].to_vec();
        let table_log = complete_weights(&mut explicit)?;
        if explicit[end] != weights[end] {
            return Err(Error::InvalidTable(
                "weights are not a complete prefix code",
            ));
        }
        Ok(Self {
            weights: explicit,
            table_log,
        })
    }

    /// Builds a length-limited table from symbol frequencies, indexed by
    /// byte value.
    pub fn from_histogram(histogram: &[u32]) -> Result<Self> {
        let lengths = lengths::code_lengths(histogram, TABLE_LOG_MAX)?;
        let max = lengths.iter().copied().max().unwrap_or(0);
        let weights: Vec<u8> = lengths
            .iter()
            .map(|&len| if len == 0 { 0 } else { max + 1 - len })
            .collect();
        Self::from_weights(&weights)
    }

    /// Builds a table fitted to the bytes of `sample`.
    pub fn from_sample(sample: &[u8]) -> Result<Self> {
        let mut histogram = [0u32; MAX_SYMBOLS];
        for &byte in sample {
            histogram[byte as usize] += 1;
        }
        Self::from_histogram(&histogram)
    }

    /// Appends the direct (nibble) representation of the table to `dst`.
    ///
    /// Tables whose last symbol is above 128 need the FSE representation,
    /// which is not produced here.
    pub fn write(&self, dst: &mut Vec<u8>) -> Result<()> {
        let explicit = self.weights.len() - 1;
        if explicit > MAX_DIRECT_WEIGHTS {
            return Err(Error::TooManySymbols(explicit));
        }
        dst.push(127 + explicit as u8);
        for pair in self.weights[..explicit].chunks(2) {
            let high = pair[0] << 4;
            let low = pair.get(1).copied().unwrap_or(0);
            dst.push(high | low);
        }
        Ok(())
    }

    /// Per-symbol weights, up to the last present symbol.
    pub fn weights(&self) -> &[u8] {
        &self.weights
    }

    /// Length of the longest code, in bits.
    pub fn table_log(&self) -> u8 {
        self.table_log
    }

    /// Code length of `symbol` in bits, or `None` if it is absent.
    pub fn code_len(&self, symbol: u8) -> Option<u8> {
        match self.weights.get(symbol as usize) {
            Some(&w) if w > 0 => Some(self.table_log + 1 - w),
            _ => None,
        }
    }

    /// Returns true if every byte of `data` has a code in this table.
    pub fn can_encode(&self, data: &[u8]) -> bool {
        data.iter().all(|&b| self.code_len(b).is_some())
    }

    /// Builds a decoding table.
    pub fn decoder(&self) -> Decoder {
        Decoder::new(self)
    }

    /// Builds an encoding table.
    pub fn encoder(&self) -> Encoder {
        Encoder::new(self)
    }
}

/// Validates explicit weights, appends the implied last weight and returns
/// the table log.
fn complete_weights(weights: &mut Vec<u8>) -> Result<u8> {
    let mut total = 0u32;
    for &w in weights.iter() {
        if w > TABLE_LOG_MAX {
            return Err(Error::WeightTooLarge(w));
        }
        total += (1u32 << w) >> 1;
    }
    if total == 0 {
        return Err(Error::InvalidTable("all weights are zero"));
    }

    let table_log = highbit(total) + 1;
    if table_log > TABLE_LOG_MAX as u32 {
        return Err(Error::InvalidTable("table log too large"));
    }

    let rest = (1u32 << table_log) - total;
    let last = highbit(rest) + 1;
    if 1u32 << (last - 1) != rest {
        return Err(Error::InvalidTable(
            "weights do not complete to a power of two",
        ));
    }
    weights.push(last as u8);

    // The longest codes always come in pairs.
    let longest = weights.iter().filter(|&&w| w == 1).count();
    if longest < 2 || longest % 2 != 0 {
        return Err(Error::InvalidTable("unpaired longest codes"));
    }

    Ok(table_log as u8)
}

#[inline]
fn highbit(value: u32) -> u32 {
    31 - value.leading_zeros()
}
