//! Encoded-name decoder.
//!
//! # Architecture
//!
//! ```text
//! "_aGVsbG8udHh0"
//!   │ selector '_' ──► table id 63
//!   │ base64url    ──► payload bytes
//!   ▼
//! Decoder::decode_table(Table, payload)
//!   ├─ Uncompressed ──► payload
//!   ├─ UnicodePlain ──► SCSU ──► UTF-8
//!   ├─ RunLength    ──► varint count + byte
//!   ├─ Custom       ──► huff0 table from payload (scratch, locked)
//!   ├─ Dictionary   ──► huff0 static table [──► SCSU for slot 62]
//!   └─ Reserved / Unknown ──► Unsupported
//! ```
//!
//! All strategies bound their output by [`MAX_LENGTH`] before or while
//! allocating. Only the custom-table path touches shared mutable state,
//! and it holds the scratch lock for the whole decode.

use crate::dictionary::Dictionaries;
use crate::error::{Error, Result};
use crate::selector;
use crate::table::{Table, MAX_LENGTH};
use crate::varint;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use bytes::Bytes;
use parking_lot::Mutex;
use safename_huff0::Scratch;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

/// base64url, padding optional, non-canonical trailing bits tolerated.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decoder for encoded names.
///
/// Cheap to share: wrap in an `Arc` or use [`Decoder::global`].
pub struct Decoder {
    dictionaries: &'static Dictionaries,
    /// Reused by every custom-table decode.
    scratch: Mutex<Scratch>,
}

impl Decoder {
    pub fn new() -> Self {
        let mut scratch = Scratch::new();
        scratch.max_decoded_size = MAX_LENGTH;
        Self {
            dictionaries: Dictionaries::global(),
            scratch: Mutex::new(scratch),
        }
    }

    /// Process-wide decoder, created on first use.
    pub fn global() -> &'static Decoder {
        static GLOBAL: OnceLock<Decoder> = OnceLock::new();
        GLOBAL.get_or_init(Decoder::new)
    }

    /// Decodes an encoded name: one selector character followed by a
    /// base64url payload.
    pub fn decode(&self, encoded: &str) -> Result<Bytes> {
        let (&first, rest) = encoded.as_bytes().split_first().ok_or_else(|| {
            debug!("rejecting empty name");
            Error::Corrupted
        })?;
        let id = selector::resolve(first).ok_or_else(|| {
            debug!(selector = first, "rejecting unknown selector");
            Error::Corrupted
        })?;
        let table = Table::from_id(id);
        let payload = PAYLOAD_ENGINE
            .decode(rest)
            .map_err(|e| corrupted(table, e))?;
        self.decode_table(table, &payload)
    }

    /// Decodes a raw table id and payload.
    pub fn decode_bytes(&self, id: u8, payload: &[u8]) -> Result<Bytes> {
        self.decode_table(Table::from_id(id), payload)
    }

    /// Decodes `payload` with the strategy selected by `table`.
    pub fn decode_table(&self, table: Table, payload: &[u8]) -> Result<Bytes> {
        match table {
            Table::Uncompressed => Ok(Bytes::copy_from_slice(payload)),
            Table::UnicodePlain => decode_unicode(table, payload),
            Table::RunLength => decode_run_length(table, payload),
            Table::Custom => self.decode_custom(table, payload),
            Table::Dictionary(id) => self.decode_dictionary(table, id, payload),
            Table::Reserved | Table::Unknown(_) => Err(unsupported(table)),
        }
    }

    fn decode_custom(&self, table: Table, payload: &[u8]) -> Result<Bytes> {
        let mut scratch = self.scratch.lock();
        let body = scratch
            .read_table(payload)
            .map_err(|e| corrupted(table, e))?;
        scratch.max_decoded_size = MAX_LENGTH;
        let name = scratch
            .decompress_1x(body)
            .map_err(|e| corrupted(table, e))?;
        Ok(Bytes::from(name))
    }

    fn decode_dictionary(&self, table: Table, id: u8, payload: &[u8]) -> Result<Bytes> {
        let dictionary = self
            .dictionaries
            .get(id)
            .ok_or_else(|| unsupported(table))?;
        let name = dictionary
            .decompress(payload)
            .map_err(|e| corrupted(table, e))?;
        if dictionary.is_unicode() {
            return decode_unicode(table, &name);
        }
        Ok(Bytes::from(name))
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("dictionaries", &self.dictionaries.len())
            .finish_non_exhaustive()
    }
}

fn decode_unicode(table: Table, payload: &[u8]) -> Result<Bytes> {
    let text = safename_scsu::decode(payload).map_err(|e| corrupted(table, e))?;
    Ok(Bytes::from(text))
}

/// Payload is `varint(count) ++ [byte]`.
fn decode_run_length(table: Table, payload: &[u8]) -> Result<Bytes> {
    let (prefix, symbol) = match payload {
        [prefix @ .., symbol] if !prefix.is_empty() => (prefix, *symbol),
        _ => return Err(corrupted(table, "payload shorter than two bytes")),
    };
    let (count, _) = varint::decode(prefix).map_err(|e| corrupted(table, e))?;
    if count > MAX_LENGTH as u64 {
        return Err(corrupted(table, format!("run of {} bytes", count)));
    }
    Ok(Bytes::from(vec![symbol; count as usize]))
}

fn corrupted(table: Table, reason: impl fmt::Display) -> Error {
    debug!(%table, %reason, "rejecting payload");
    Error::Corrupted
}

fn unsupported(table: Table) -> Error {
    debug!(%table, "unsupported table");
    Error::Unsupported
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_uncompressed() {
        let decoder = Decoder::new();
        assert_eq!(decoder.decode("_aGVsbG8udHh0").unwrap(), "hello.txt");
        assert_eq!(decoder.decode("_").unwrap(), "");
    }

    #[test]
    fn test_decode_padding_optional() {
        let decoder = Decoder::new();
        assert_eq!(decoder.decode("_YQ").unwrap(), "a");
        assert_eq!(decoder.decode("_YQ==").unwrap(), "a");
        assert_eq!(decoder.decode("_YR").unwrap(), "a");
    }

    #[test]
    fn test_decode_rejects_bad_transport() {
        let decoder = Decoder::new();
        assert_eq!(decoder.decode(""), Err(Error::Corrupted));
        assert_eq!(decoder.decode("!aGVsbG8"), Err(Error::Corrupted));
        assert_eq!(decoder.decode("+aGVsbG8"), Err(Error::Corrupted));
        assert_eq!(decoder.decode("_a+b/"), Err(Error::Corrupted));
        assert_eq!(decoder.decode("_Y"), Err(Error::Corrupted));
        assert_eq!(decoder.decode("é"), Err(Error::Corrupted));
    }

    #[test]
    fn test_reserved_and_unknown() {
        let decoder = Decoder::new();
        assert_eq!(decoder.decode("6aGVsbG8"), Err(Error::Unsupported));
        assert_eq!(decoder.decode_bytes(58, b""), Err(Error::Unsupported));
        assert_eq!(decoder.decode_bytes(64, b"x"), Err(Error::Unsupported));
        assert_eq!(decoder.decode_bytes(57, b"x"), Err(Error::Unsupported));
    }

    #[test]
    fn test_run_length() {
        let decoder = Decoder::new();
        assert_eq!(decoder.decode_bytes(60, &[0x05, 0x41]).unwrap(), "AAAAA");
        assert_eq!(decoder.decode_bytes(60, &[0x00, 0x41]).unwrap(), "");
        assert_eq!(decoder.decode_bytes(60, &[0x80, 0x02, b'x']).unwrap().len(), 256);
        // Bytes between the varint and the symbol are ignored.
        assert_eq!(decoder.decode_bytes(60, &[0x02, 0x7f, b'z']).unwrap(), "zz");
    }

    #[test]
    fn test_run_length_rejects() {
        let decoder = Decoder::new();
        assert_eq!(decoder.decode_bytes(60, &[]), Err(Error::Corrupted));
        assert_eq!(decoder.decode_bytes(60, &[0x41]), Err(Error::Corrupted));
        assert_eq!(decoder.decode_bytes(60, &[0x81, 0x02, b'x']), Err(Error::Corrupted));
        assert_eq!(decoder.decode_bytes(60, &[0x80, b'x']), Err(Error::Corrupted));
    }

    #[test]
    fn test_unicode_plain() {
        let decoder = Decoder::new();
        let scsu = [0x12, 0x9c, 0xbe, 0xc1, 0xba, 0xb2, 0xb0];
        assert_eq!(decoder.decode_bytes(61, &scsu).unwrap(), "Москва".as_bytes());
        assert_eq!(decoder.decode_bytes(61, &[0x0c]), Err(Error::Corrupted));
    }

    #[test]
    fn test_custom_table() {
        let decoder = Decoder::new();
        // Weights 2, 1, (1) and the stream for bytes 0, 1, 2.
        assert_eq!(
            decoder.decode_bytes(59, &[0x81, 0x21, 0x31]).unwrap(),
            &[0u8, 1, 2][..]
        );
        assert_eq!(decoder.decode_bytes(59, &[]), Err(Error::Corrupted));
        assert_eq!(decoder.decode_bytes(59, &[0x81, 0x22, 0x31]), Err(Error::Corrupted));
        assert_eq!(decoder.decode_bytes(59, &[0x81, 0x21]), Err(Error::Corrupted));
    }

    #[test]
    fn test_debug_output() {
        let decoder = Decoder::new();
        assert!(format!("{:?}", decoder).starts_with("Decoder"));
    }
}
