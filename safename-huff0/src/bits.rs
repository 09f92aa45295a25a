//! Bit-level readers and writers.
//!
//! huff0 streams are written least-significant bit first and read back in
//! reverse, starting just below a marker bit in the final byte. FSE count
//! headers are read forwards, least-significant bit first.

use crate::error::{Error, Result};

/// Reads a bitstream backwards, from the end marker towards the first byte.
#[derive(Debug)]
pub struct ReverseBitReader<'a> {
    data: &'a [u8],
    /// Bits left before the start of the stream. Goes negative once a read
    /// has run past the first byte.
    remaining: isize,
}

impl<'a> ReverseBitReader<'a> {
    /// Creates a reader positioned just below the end marker of `data`.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let last = *data.last().ok_or(Error::EmptyInput)?;
        if last == 0 {
            return Err(Error::MissingMarker);
        }
        let marker = 7 - last.leading_zeros() as usize;
        Ok(Self {
            data,
            remaining: ((data.len() - 1) * 8 + marker) as isize,
        })
    }

    /// Bits left to read. Negative after an overrun.
    #[inline]
    pub fn remaining(&self) -> isize {
        self.remaining
    }

    /// Returns true once a read has consumed bits that do not exist.
    #[inline]
    pub fn overflowed(&self) -> bool {
        self.remaining < 0
    }

    /// Returns the next `n` bits (at most 32) without consuming them.
    ///
    /// Bits before the start of the stream read as zero.
    #[inline]
    pub fn peek(&self, n: u32) -> u32 {
        debug_assert!(n <= 32);
        if n == 0 {
            return 0;
        }
        let n = n as isize;
        let available = self.remaining.max(0);
        let (low, pad) = if available >= n {
            (available - n, 0)
        } else {
            (0, n - available)
        };
        let width = (n - pad) as usize;
        if width == 0 {
            return 0;
        }

        let low = low as usize;
        let first = low / 8;
        let last = (low + width - 1) / 8;
        let mut acc = 0u64;
        for (i, &byte) in self.data[first..=last].iter().enumerate() {
            acc |= (byte as u64) << (8 * i);
        }
        let value = (acc >> (low % 8)) & ((1u64 << width) - 1);
        (value << pad) as u32
    }

    #[inline]
    pub fn consume(&mut self, n: u32) {
        self.remaining -= n as isize;
    }

    /// Reads and consumes `n` bits.
    #[inline]
    pub fn read(&mut self, n: u32) -> u32 {
        let value = self.peek(n);
        self.consume(n);
        value
    }
}

/// Forward bit reader used for FSE count headers.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Returns the next `n` bits (at most 32); bytes past the end read as zero.
    pub fn peek(&self, n: u32) -> u32 {
        debug_assert!(n <= 32);
        let mut value = 0u64;
        for i in 0..n as usize {
            let bit = self.position + i;
            let byte = self.data.get(bit / 8).copied().unwrap_or(0);
            value |= (((byte >> (bit % 8)) & 1) as u64) << i;
        }
        value as u32
    }

    pub fn consume(&mut self, n: u32) {
        self.position += n as usize;
    }

    pub fn read(&mut self, n: u32) -> u32 {
        let value = self.peek(n);
        self.consume(n);
        value
    }

    /// Whole bytes touched so far.
    pub fn bytes_consumed(&self) -> usize {
        (self.position + 7) / 8
    }
}

/// Writes bits least-significant first and terminates with a marker bit.
#[derive(Debug, Default)]
pub struct BitWriter {
    out: Vec<u8>,
    acc: u64,
    bits: u32,
}

impl BitWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
            acc: 0,
            bits: 0,
        }
    }

    /// Appends the low `n` bits (at most 32) of `value`.
    #[inline]
    pub fn write(&mut self, value: u32, n: u32) {
        debug_assert!(n <= 32);
        let mask = (1u64 << n) - 1;
        self.acc |= (value as u64 & mask) << self.bits;
        self.bits += n;
        while self.bits >= 8 {
            self.out.push(self.acc as u8);
            self.acc >>= 8;
            self.bits -= 8;
        }
    }

    /// Writes the end marker and returns the stream.
    pub fn finish(mut self) -> Vec<u8> {
        self.write(1, 1);
        if self.bits > 0 {
            self.out.push(self.acc as u8);
        }
        self.out
    }
}
