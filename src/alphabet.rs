/// The base45 alphabet. The position of a character is its numeric value.
pub const ALPHABET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

pub(crate) const BASE: u32 = 45;

/// Sentinel for bytes outside the alphabet.
const INVALID: u8 = 0xff;

const DECODE_TABLE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Returns the numeric value (0 to 44) of an encoded character, or `None` if the byte is not in
/// the alphabet.
#[inline]
pub fn decode_value(character: u8) -> Option<u8> {
    match DECODE_TABLE[usize::from(character)] {
        INVALID => None,
        value => Some(value),
    }
}

#[inline]
pub(crate) fn encode_value(value: u32) -> u8 {
    ALPHABET[(value % BASE) as usize]
}
