//! Single-stream Huffman decoding.
//!
//! A [`Decoder`] is an immutable lookup table indexed by the next
//! `table_log` bits of the stream, so it can be shared freely between
//! threads. A [`Scratch`] wraps one decoder that is rebuilt in place for
//! every embedded table it reads, reusing its allocation.

use crate::bits::ReverseBitReader;
use crate::error::{Error, Result};
use crate::table::{Table, TABLE_LOG_MAX};

/// Default limit on decoded output for a [`Scratch`].
pub const DEFAULT_MAX_DECODED_SIZE: usize = 128 << 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Entry {
    symbol: u8,
    nb_bits: u8,
}

/// Decoding table for one Huffman table.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    entries: Vec<Entry>,
    table_log: u8,
}

impl Decoder {
    pub fn new(table: &Table) -> Self {
        let mut decoder = Self::default();
        decoder.rebuild(table);
        decoder
    }

    /// Replaces the lookup table with one built from `table`.
    pub fn rebuild(&mut self, table: &Table) {
        let log = table.table_log();
        self.entries.clear();
        self.entries.resize(1 << log, Entry::default());

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

        for (symbol, &w) in table.weights().iter().enumerate() {
            if w == 0 {
                continue;
            }
            let span = 1usize << (w - 1);
            let start = rank_start[w as usize];
            self.entries[start..start + span].fill(Entry {
                symbol: symbol as u8,
                nb_bits: log + 1 - w,
            });
            rank_start[w as usize] += span;
        }
        self.table_log = log;
    }

    /// Drops the loaded table. Decoding fails until the next rebuild.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.table_log = 0;
    }

    /// Returns true if a table is loaded.
    pub fn is_loaded(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Decodes one stream, failing once more than `max` bytes would be
    /// produced.
    pub fn decompress_1x(&self, input: &[u8], max: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(max.min(input.len().saturating_mul(8)));
        self.decompress_1x_into(&mut out, input, max)?;
        Ok(out)
    }

    /// Decodes one stream, appending to `dst`. Returns the number of bytes
    /// appended.
    ///
    /// On error `dst` may hold a partial result.
    pub fn decompress_1x_into(&self, dst: &mut Vec<u8>, input: &[u8], max: usize) -> Result<usize> {
        if !self.is_loaded() {
            return Err(Error::InvalidTable("no table loaded"));
        }

        let mut reader = ReverseBitReader::new(input)?;
        let log = self.table_log as u32;
        let start = dst.len();

        while reader.remaining() > 0 {
            let entry = self.entries[reader.peek(log) as usize];
            if entry.nb_bits as isize > reader.remaining() {
                return Err(Error::Overrun);
            }
            reader.consume(entry.nb_bits as u32);
            if dst.len() - start >= max {
                return Err(Error::SizeLimit(max));
            }
            dst.push(entry.symbol);
        }

        Ok(dst.len() - start)
    }
}

/// Reusable decoder for tables embedded in the input.
#[derive(Debug, Clone)]
pub struct Scratch {
    decoder: Decoder,
    /// Upper bound on the output of [`Scratch::decompress_1x`].
    pub max_decoded_size: usize,
}

impl Default for Scratch {
    fn default() -> Self {
        Self::new()
    }
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            decoder: Decoder::default(),
            max_decoded_size: DEFAULT_MAX_DECODED_SIZE,
        }
    }

    /// Reads a table description from the start of `input` and loads it.
    ///
    /// Returns the bytes following the description. On error the previous
    /// table is dropped as well.
    pub fn read_table<'a>(&mut self, input: &'a [u8]) -> Result<&'a [u8]> {
        match Table::read(input) {
            Ok((table, used)) => {
                self.decoder.rebuild(&table);
                Ok(&input[used..])
            }
            Err(err) => {
                self.decoder.clear();
                Err(err)
            }
        }
    }

    /// Decodes one stream with the loaded table.
    pub fn decompress_1x(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.decoder.decompress_1x(input, self.max_decoded_size)
    }
}
