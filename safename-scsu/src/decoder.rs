//! SCSU decoder state machine.
//!
//! The decoder starts in single-byte mode with dynamic window 0 active and
//! all dynamic windows at their default positions. Tags switch modes,
//! select or redefine windows, or quote a single character.

use crate::error::{Error, Result};

/// Default positions of the eight dynamic windows.
pub const DEFAULT_DYNAMIC_WINDOWS: [u32; 8] = [
    0x0080, 0x00c0, 0x0400, 0x0600, 0x0900, 0x3040, 0x30a0, 0xff00,
];

/// Positions of the eight static windows, reachable only through quoting.
pub const STATIC_WINDOWS: [u32; 8] = [
    0x0000, 0x0080, 0x0100, 0x0300, 0x2000, 0x2080, 0x2100, 0x3000,
];

/// Window positions for offset indices 0xF9..=0xFF.
const SPECIAL_OFFSETS: [u32; 7] = [0x00c0, 0x0250, 0x0370, 0x0530, 0x3040, 0x30a0, 0xff60];

// Single-byte mode tags.
const SQ0: u8 = 0x01;
const SQ7: u8 = 0x08;
const SDX: u8 = 0x0b;
const SRS: u8 = 0x0c;
const SQU: u8 = 0x0e;
const SCU: u8 = 0x0f;
const SC0: u8 = 0x10;
const SC7: u8 = 0x17;
const SD0: u8 = 0x18;
const SD7: u8 = 0x1f;

// Unicode mode tags.
const UC0: u8 = 0xe0;
const UC7: u8 = 0xe7;
const UD0: u8 = 0xe8;
const UD7: u8 = 0xef;
const UQU: u8 = 0xf0;
const UDX: u8 = 0xf1;
const URS: u8 = 0xf2;

/// Resolves a window offset index (the byte after `SDn`/`UDn`) to a window
/// position.
pub fn window_offset(index: u8) -> Option<u32> {
    match index {
        0x01..=0x67 => Some(index as u32 * 0x80),
        0x68..=0xa7 => Some(index as u32 * 0x80 + 0xac00),
        0xf9..=0xff => Some(SPECIAL_OFFSETS[(index - 0xf9) as usize]),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    SingleByte,
    Unicode,
}

/// Streaming SCSU decoder over one input buffer.
#[derive(Debug)]
pub struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
    mode: Mode,
    windows: [u32; 8],
    active: usize,
    /// High surrogate waiting for its pair, with the offset it was read at.
    pending: Option<(u16, usize)>,
    out: String,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            mode: Mode::SingleByte,
            windows: DEFAULT_DYNAMIC_WINDOWS,
            active: 0,
            pending: None,
            out: String::with_capacity(input.len()),
        }
    }

    /// Decodes the whole input.
    pub fn decode(mut self) -> Result<String> {
        while self.pos < self.input.len() {
            match self.mode {
                Mode::SingleByte => self.single_byte()?,
                Mode::Unicode => self.unicode()?,
            }
        }
        if let Some((unit, offset)) = self.pending {
            return Err(Error::UnpairedSurrogate { unit, offset });
        }
        Ok(self.out)
    }

    fn single_byte(&mut self) -> Result<()> {
        let start = self.pos;
        let tag = self.next_byte()?;
        match tag {
            0x00 | 0x09 | 0x0a | 0x0d | 0x20..=0x7f => self.push_scalar(tag as u32, start),
            0x80..=0xff => {
                let code = self.windows[self.active] + (tag - 0x80) as u32;
                self.push_scalar(code, start)
            }
            SQ0..=SQ7 => {
                let window = (tag - SQ0) as usize;
                let byte = self.next_byte()?;
                let code = if byte < 0x80 {
                    STATIC_WINDOWS[window] + byte as u32
                } else {
                    self.windows[window] + (byte - 0x80) as u32
                };
                self.push_scalar(code, start)
            }
            SDX => self.define_extended(),
            SRS => Err(Error::ReservedTag { tag, offset: start }),
            SQU => {
                let unit = self.next_unit()?;
                self.push_unit(unit, start)
            }
            SCU => {
                self.mode = Mode::Unicode;
                Ok(())
            }
            SC0..=SC7 => {
                self.active = (tag - SC0) as usize;
                Ok(())
            }
            SD0..=SD7 => self.define((tag - SD0) as usize),
        }
    }

    fn unicode(&mut self) -> Result<()> {
        let start = self.pos;
        let tag = self.next_byte()?;
        match tag {
            UC0..=UC7 => {
                self.active = (tag - UC0) as usize;
                self.mode = Mode::SingleByte;
                Ok(())
            }
            UD0..=UD7 => {
                self.define((tag - UD0) as usize)?;
                self.mode = Mode::SingleByte;
                Ok(())
            }
            UQU => {
                let unit = self.next_unit()?;
                self.push_unit(unit, start)
            }
            UDX => {
                self.define_extended()?;
                self.mode = Mode::SingleByte;
                Ok(())
            }
            URS => Err(Error::ReservedTag { tag, offset: start }),
            _ => {
                let low = self.next_byte()?;
                self.push_unit(u16::from_be_bytes([tag, low]), start)
            }
        }
    }

    /// `SDn` / `UDn`: moves window `n` and makes it active.
    fn define(&mut self, window: usize) -> Result<()> {
        let offset = self.pos;
        let index = self.next_byte()?;
        let position = window_offset(index).ok_or(Error::ReservedWindow { index, offset })?;
        self.windows[window] = position;
        self.active = window;
        Ok(())
    }

    /// `SDX` / `UDX`: moves a window into the supplementary planes.
    fn define_extended(&mut self) -> Result<()> {
        let value = self.next_unit()?;
        let window = (value >> 13) as usize;
        self.windows[window] = 0x10000 + ((value as u32 & 0x1fff) << 7);
        self.active = window;
        Ok(())
    }

    fn next_byte(&mut self) -> Result<u8> {
        let byte = *self.input.get(self.pos).ok_or(Error::Truncated(self.pos))?;
        self.pos += 1;
        Ok(byte)
    }

    fn next_unit(&mut self) -> Result<u16> {
        let high = self.next_byte()?;
        let low = self.next_byte()?;
        Ok(u16::from_be_bytes([high, low]))
    }

    fn push_unit(&mut self, unit: u16, offset: usize) -> Result<()> {
        match unit {
            0xd800..=0xdbff => {
                if let Some((unit, offset)) = self.pending {
                    return Err(Error::UnpairedSurrogate { unit, offset });
                }
                self.pending = Some((unit, offset));
                Ok(())
            }
            0xdc00..=0xdfff => {
                let (high, _) = self
                    .pending
                    .take()
                    .ok_or(Error::UnpairedSurrogate { unit, offset })?;
                let code = 0x10000 + (((high as u32 - 0xd800) << 10) | (unit as u32 - 0xdc00));
                self.push_scalar(code, offset)
            }
            _ => self.push_scalar(unit as u32, offset),
        }
    }

    fn push_scalar(&mut self, code: u32, offset: usize) -> Result<()> {
        if let Some((unit, offset)) = self.pending {
            return Err(Error::UnpairedSurrogate { unit, offset });
        }
        let ch = char::from_u32(code).ok_or(Error::InvalidCodePoint { code, offset })?;
        self.out.push(ch);
        Ok(())
    }
}
