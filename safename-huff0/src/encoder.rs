//! Single-stream Huffman encoding.

use crate::bits::BitWriter;
use crate::error::{Error, Result};
use crate::table::{Table, MAX_SYMBOLS, TABLE_LOG_MAX};

#[derive(Debug, Clone, Copy, Default)]
struct Code {
    value: u16,
    nb_bits: u8,
}

/// Encoding table for one Huffman table.
#[derive(Debug, Clone)]
pub struct Encoder {
    codes: [Code; MAX_SYMBOLS],
}

impl Encoder {
    pub fn new(table: &Table) -> Self {
        let log = table.table_log();
        let mut rank_count = [0usize; TABLE_LOG_MAX as usize + 2];
        for &w in table.weights() {
            rank_count[w as usize] += 1;
        }
        let mut rank_start = [0usize; TABLE_LOG_MAX as usize + 2];
        let mut next = 0usize;
        for w in 1..=log as usize {
            rank_start[w] = next;
            next += rank_count[w] << (w - 1);
        }

        // Each code is the prefix shared by the decoder entries of its symbol.
        let mut codes = [Code::default(); MAX_SYMBOLS];
        for (symbol, &w) in table.weights().iter().enumerate() {
            if w == 0 {
                continue;
            }
            let w = w as usize;
            codes[symbol] = Code {
                value: (rank_start[w] >> (w - 1)) as u16,
                nb_bits: log + 1 - w as u8,
            };
            rank_start[w] += 1 << (w - 1);
        }
        Self { codes }
    }

    /// Encodes `src` as one stream, terminated by the end marker.
    pub fn compress_1x(&self, src: &[u8]) -> Result<Vec<u8>> {
        let mut writer = BitWriter::with_capacity(src.len() + 1);
        // The decoder reads backwards, so the first symbol goes in last.
        for &byte in src.iter().rev() {
            let code = self.codes[byte as usize];
            if code.nb_bits == 0 {
                return Err(Error::UnknownSymbol(byte));
            }
            writer.write(code.value as u32, code.nb_bits as u32);
        }
        Ok(writer.finish())
    }
}
