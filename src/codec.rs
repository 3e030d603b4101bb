use super::block::{decode_block, encode_block, CHUNK_SIZE, ENCODED_CHUNK_SIZE};
use super::CorruptInputError;

/// Returns the length of the base45 encoding of an input of `n` bytes.
pub const fn encoded_len(n: usize) -> usize {
    n / CHUNK_SIZE * ENCODED_CHUNK_SIZE + if n % CHUNK_SIZE != 0 { 2 } else { 0 }
}

/// Returns the maximum length of the data decoded from `n` characters of base45 input.
pub const fn decoded_len(n: usize) -> usize {
    n / ENCODED_CHUNK_SIZE * CHUNK_SIZE + if n % ENCODED_CHUNK_SIZE != 0 { 1 } else { 0 }
}

/// Encodes `input` into the head of `output`, returning the number of characters written, which
/// is always [`encoded_len`]`(input.len())`. Bytes of `output` past that length are left intact.
///
/// The final odd byte, if any, is encoded as a terminal two-character block, so this function is
/// not suitable for encoding individual pieces of a longer stream. Use [`EncodingWriter`] for that.
///
/// [`EncodingWriter`]: crate::EncodingWriter
///
/// # Panics
///
/// Panics if `output` is shorter than `encoded_len(input.len())`.
pub fn encode_slice(input: &[u8], output: &mut [u8]) -> usize {
    let len = encoded_len(input.len());
    assert!(output.len() >= len, "output buffer too small for encoded data");

    let mut chunks = input.chunks_exact(CHUNK_SIZE);
    let mut written = 0;
    for (chunk, dst) in (&mut chunks).zip(output.chunks_exact_mut(ENCODED_CHUNK_SIZE)) {
        written += encode_block(chunk, dst);
    }
    written += encode_block(chunks.remainder(), &mut output[written..]);
    debug_assert_eq!(written, len);
    written
}

/// Returns the base45 encoding of `input`.
///
/// ```rust
/// assert_eq!(base45_rw::encode("Hello!!"), "%69 VD92EX0");
/// ```
pub fn encode(input: impl AsRef<[u8]>) -> String {
    let input = input.as_ref();
    let mut buf = vec![0; encoded_len(input.len())];
    encode_slice(input, &mut buf);
    buf.into_iter().map(char::from).collect()
}

/// Decodes `input` into the head of `output`, returning the result and the number of bytes
/// written.
///
/// Decoding stops at the first corrupt block. The count then includes the bytes decoded up to
/// that point and, if the block failed only because its value exceeds 65535, the two bytes of that
/// block as well. Error offsets are relative to the start of `input`.
///
/// # Panics
///
/// Panics if `output` is shorter than [`decoded_len`]`(input.len())`.
pub fn decode_slice(input: &[u8], output: &mut [u8]) -> (Result<(), CorruptInputError>, usize) {
    assert!(
        output.len() >= decoded_len(input.len()),
        "output buffer too small for decoded data"
    );

    let (mut consumed, mut written) = (0, 0);
    while consumed < input.len() {
        let (result, c, w) = decode_block(&input[consumed..], consumed, &mut output[written..]);
        consumed += c;
        written += w;
        if result.is_err() {
            return (result, written);
        }
    }
    (Ok(()), written)
}

/// Returns the bytes represented by the base45 input.
///
/// ```rust
/// assert_eq!(base45_rw::decode("UJCLQE7W581").unwrap(), b"base-45");
/// assert_eq!(base45_rw::decode("FaW").unwrap_err().offset(), 1);
/// ```
pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, CorruptInputError> {
    let input = input.as_ref();
    let mut buf = vec![0; decoded_len(input.len())];
    let (result, written) = decode_slice(input, &mut buf);
    result?;
    buf.truncate(written);
    Ok(buf)
}
