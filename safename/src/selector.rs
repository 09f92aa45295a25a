//! Selector characters.
//!
//! The first character of an encoded name picks the table. The alphabet is
//! the base64url alphabet; the character at position `i` selects table `i`.

/// Selector alphabet, indexed by table id.
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Byte to table id plus one; zero marks bytes outside the alphabet.
static DECODE_MAP: [u8; 256] = build_decode_map();

const fn build_decode_map() -> [u8; 256] {
    let mut map = [0u8; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        map[ALPHABET[i] as usize] = i as u8 + 1;
        i += 1;
    }
    map
}

/// Returns the table id selected by `byte`.
#[inline]
pub fn resolve(byte: u8) -> Option<u8> {
    match DECODE_MAP[byte as usize] {
        0 => None,
        id => Some(id - 1),
    }
}

/// Returns the selector character for table `id`.
pub fn selector_for(id: u8) -> Option<char> {
    ALPHABET.get(id as usize).map(|&b| b as char)
}
