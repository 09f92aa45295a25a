//! Static Huffman dictionaries.
//!
//! Each dictionary is a fixed huff0 table built from a frequency profile of
//! the names it targets. Every byte value keeps a small base count, so any
//! name can be coded with any dictionary; the profile decides which names
//! come out short.
//!
//! Dictionaries are built once per process and never change afterwards, so
//! they are shared between threads without locking.

use crate::table::{DICTIONARY_SLOTS, MAX_LENGTH, TABLE_SCSU};
use safename_huff0::{Decoder, Table, MAX_SYMBOLS};
use std::sync::OnceLock;
use tracing::{debug, error};

const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const HEX_LOWER: &[u8] = b"0123456789abcdef";
const HEX_UPPER: &[u8] = b"0123456789ABCDEF";

/// Frequency profile for one dictionary slot.
struct Profile {
    id: u8,
    name: &'static str,
    /// Characters and the count added to each of them.
    classes: &'static [(&'static [u8], u32)],
    /// Output is an SCSU stream rather than the name itself.
    unicode: bool,
}

static PROFILES: &[Profile] = &[
    Profile {
        id: 0,
        name: "lower",
        classes: &[
            (LOWER, 40),
            (b"etaoinsr", 60),
            (DIGITS, 20),
            (b".", 50),
            (b"-_", 25),
            (b" ", 15),
            (b"()", 3),
        ],
        unicode: false,
    },
    Profile {
        id: 1,
        name: "upper",
        classes: &[
            (UPPER, 40),
            (b"ETAOINSR", 60),
            (DIGITS, 20),
            (b".", 50),
            (b"-_", 25),
            (b" ", 15),
            (b"()", 3),
        ],
        unicode: false,
    },
    Profile {
        id: 2,
        name: "mixed",
        classes: &[
            (LOWER, 40),
            (b"etaoinsr", 40),
            (UPPER, 12),
            (DIGITS, 15),
            (b" ", 40),
            (b".", 30),
            (b"-_", 12),
            (b"()[]',&!", 3),
        ],
        unicode: false,
    },
    Profile {
        id: 3,
        name: "hex-lower",
        classes: &[(HEX_LOWER, 400), (b".", 10)],
        unicode: false,
    },
    Profile {
        id: 4,
        name: "hex-upper",
        classes: &[(HEX_UPPER, 400), (b".", 10)],
        unicode: false,
    },
    Profile {
        id: 5,
        name: "base64",
        classes: &[(UPPER, 80), (LOWER, 80), (DIGITS, 80), (b"-_+/", 20), (b"=", 10)],
        unicode: false,
    },
    Profile {
        id: 6,
        name: "numeric",
        classes: &[(DIGITS, 300), (b"-._:", 60), (b" ", 10), (b"T", 5)],
        unicode: false,
    },
    Profile {
        id: TABLE_SCSU,
        name: "unicode",
        classes: &[
            (LOWER, 30),
            (b" .-_", 20),
            (DIGITS, 10),
            (UPPER, 5),
            // Window-relative characters.
            (&WINDOW_BYTES, 25),
            // SQn, SQU, SCU, SCn and SDn tags.
            (b"\x01\x02\x03\x04\x05\x06\x07\x08\x0b\x0e\x0f", 4),
            (b"\x10\x11\x12\x13\x14\x15\x16\x17\x18\x19\x1a\x1b\x1c\x1d\x1e\x1f", 4),
        ],
        unicode: true,
    },
];

const WINDOW_BYTES: [u8; 128] = window_bytes();

const fn window_bytes() -> [u8; 128] {
    let mut bytes = [0u8; 128];
    let mut i = 0;
    while i < 128 {
        bytes[i] = 0x80 + i as u8;
        i += 1;
    }
    bytes
}

/// An immutable dictionary table.
#[derive(Debug)]
pub struct Dictionary {
    id: u8,
    name: &'static str,
    table: Table,
    decoder: Decoder,
    unicode: bool,
}

impl Dictionary {
    fn build(profile: &Profile) -> safename_huff0::Result<Self> {
        let mut histogram = [1u32; MAX_SYMBOLS];
        for &(chars, count) in profile.classes {
            for &c in chars {
                histogram[c as usize] += count;
            }
        }
        let table = Table::from_histogram(&histogram)?;
        Ok(Self {
            id: profile.id,
            name: profile.name,
            decoder: table.decoder(),
            table,
            unicode: profile.unicode,
        })
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The Huffman table, for encoders that target this slot.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Returns true if the decompressed bytes are an SCSU stream.
    pub fn is_unicode(&self) -> bool {
        self.unicode
    }

    /// Decompresses one stream, producing at most [`MAX_LENGTH`] bytes.
    pub fn decompress(&self, payload: &[u8]) -> safename_huff0::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(MAX_LENGTH);
        self.decoder.decompress_1x_into(&mut out, payload, MAX_LENGTH)?;
        Ok(out)
    }
}

/// The set of static dictionary slots.
#[derive(Debug)]
pub struct Dictionaries {
    slots: Vec<Option<Dictionary>>,
}

impl Dictionaries {
    /// Builds every configured dictionary.
    ///
    /// A profile that fails to build leaves its slot empty.
    pub fn build() -> Self {
        let mut slots: Vec<Option<Dictionary>> = (0..DICTIONARY_SLOTS).map(|_| None).collect();
        for profile in PROFILES {
            match Dictionary::build(profile) {
                Ok(dictionary) => slots[profile.id as usize] = Some(dictionary),
                Err(e) => error!(id = profile.id, name = profile.name, error = %e, "failed to build dictionary"),
            }
        }
        let dictionaries = Self { slots };
        debug!(count = dictionaries.len(), "static dictionaries built");
        dictionaries
    }

    /// Process-wide dictionaries, built on first use.
    pub fn global() -> &'static Dictionaries {
        static GLOBAL: OnceLock<Dictionaries> = OnceLock::new();
        GLOBAL.get_or_init(Dictionaries::build)
    }

    /// Returns the dictionary in slot `id`, if one is configured.
    pub fn get(&self, id: u8) -> Option<&Dictionary> {
        self.slots.get(id as usize)?.as_ref()
    }

    /// Number of configured dictionaries.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured dictionaries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Dictionary> {
        self.slots.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_slots() {
        let dictionaries = Dictionaries::build();
        assert_eq!(dictionaries.len(), PROFILES.len());
        let ids: Vec<u8> = dictionaries.iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5, 6, TABLE_SCSU]);
        assert!(dictionaries.get(7).is_none());
        assert!(dictionaries.get(57).is_none());
        assert!(dictionaries.get(63).is_none());
        assert!(dictionaries.get(200).is_none());
        assert!(dictionaries.get(TABLE_SCSU).unwrap().is_unicode());
        assert!(!dictionaries.get(0).unwrap().is_unicode());
    }

    #[test]
    fn test_every_byte_is_encodable() {
        let all: Vec<u8> = (0..=255u8).collect();
        for dictionary in Dictionaries::global().iter() {
            assert!(dictionary.table().can_encode(&all), "{}", dictionary.name());
            assert!(dictionary.table().table_log() <= safename_huff0::TABLE_LOG_MAX);
        }
    }

    #[test]
    fn test_profiles_favour_their_alphabet() {
        let dictionaries = Dictionaries::global();
        let hex = dictionaries.get(3).unwrap().table();
        let lower = dictionaries.get(0).unwrap().table();
        assert!(hex.code_len(b'a') < hex.code_len(b'z'));
        assert!(lower.code_len(b'e') < lower.code_len(b'E'));
        assert!(lower.code_len(b'e') <= lower.code_len(b'q'));
    }

    #[test]
    fn test_decompress_round_trip() {
        let dictionary = Dictionaries::global().get(0).unwrap();
        let stream = dictionary
            .table()
            .encoder()
            .compress_1x(b"vacation-notes.txt")
            .unwrap();
        assert_eq!(dictionary.decompress(&stream).unwrap(), b"vacation-notes.txt");
    }

    #[test]
    fn test_decompress_limit() {
        let dictionary = Dictionaries::global().get(6).unwrap();
        let long = vec![b'7'; MAX_LENGTH + 1];
        let stream = dictionary.table().encoder().compress_1x(&long).unwrap();
        assert!(dictionary.decompress(&stream).unwrap_err().is_size_limit());
        let stream = dictionary
            .table()
            .encoder()
            .compress_1x(&long[..MAX_LENGTH])
            .unwrap();
        assert_eq!(dictionary.decompress(&stream).unwrap().len(), MAX_LENGTH);
    }
}
