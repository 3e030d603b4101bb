//! Conversion of a single block: two raw bytes to three characters, or a final single byte to two
//! characters.

use super::alphabet::{decode_value, encode_value, BASE};
use super::CorruptInputError;

/// Number of raw bytes in a full block.
pub(crate) const CHUNK_SIZE: usize = 2;

/// Number of characters in an encoded full block.
pub(crate) const ENCODED_CHUNK_SIZE: usize = 3;

/// Encodes up to one block of raw bytes into `output`, returning the number of characters
/// written: 3 for two bytes, 2 for a single byte, and 0 for empty input.
///
/// # Panics
///
/// Panics if `input` is longer than two bytes or `output` is too short for the encoded block.
pub fn encode_block(input: &[u8], output: &mut [u8]) -> usize {
    match *input {
        [] => 0,
        [b0] => {
            let value = u32::from(b0);
            output[0] = encode_value(value);
            output[1] = encode_value(value / BASE);
            2
        }
        [b0, b1] => {
            let value = (u32::from(b0) << 8) | u32::from(b1);
            output[0] = encode_value(value);
            output[1] = encode_value(value / BASE);
            output[2] = encode_value(value / (BASE * BASE));
            3
        }
        _ => panic!("block input must be at most {} bytes", CHUNK_SIZE),
    }
}

/// Decodes the block at the head of `input` into `output`, returning the result, the number of
/// characters consumed, and the number of bytes written.
///
/// `offset` is the position of `input[0]` within the whole encoded input and is only used to
/// locate errors. Three or more available characters form a full block; exactly two form a short
/// block that yields one byte.
///
/// A full block whose value exceeds 65535 still writes its two (truncated) bytes and consumes its
/// characters while reporting an error at the offset just past the block, so callers must check
/// the result even when bytes were written. Any other error writes nothing.
///
/// # Panics
///
/// Panics if `output` is too short for the decoded block.
pub fn decode_block(
    input: &[u8],
    offset: usize,
    output: &mut [u8],
) -> (Result<(), CorruptInputError>, usize, usize) {
    let len = input.len().min(ENCODED_CHUNK_SIZE);
    match len {
        0 => return (Ok(()), 0, 0),
        // a single trailing character never forms a block
        1 => return (Err(CorruptInputError::new(offset)), 1, 0),
        _ => {}
    }

    let mut digits = [0u32; ENCODED_CHUNK_SIZE];
    for (i, (digit, &c)) in digits.iter_mut().zip(&input[..len]).enumerate() {
        match decode_value(c) {
            Some(v) => *digit = u32::from(v),
            None => return (Err(CorruptInputError::new(offset + i)), i + 1, 0),
        }
    }

    let value = digits[0] + BASE * digits[1] + BASE * BASE * digits[2];
    if len == 2 {
        output[0] = (value % 256) as u8;
        return (Ok(()), 2, 1);
    }

    output[0] = (value / 256) as u8;
    output[1] = (value % 256) as u8;
    let result = if value > 0xffff {
        Err(CorruptInputError::new(offset + ENCODED_CHUNK_SIZE))
    } else {
        Ok(())
    };
    (result, 3, 2)
}
