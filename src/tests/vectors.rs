use std::io::{self, prelude::*};

use rand::Rng;

use crate::{
    decode, decode_slice, decoded_len, encode, encode_slice, encoded_len, DecodingReader,
    EncodingWriter,
};

/// Tests the one-shot functions against known vectors.
#[test]
fn one_shot_known_vectors() {
    TEST_CASES.with(|cs| {
        for c in cs {
            assert_eq!(encode(c.decoded()).as_bytes(), c.encoded());
            assert_eq!(encoded_len(c.decoded().len()), c.encoded().len());

            let mut dst = vec![0; decoded_len(c.encoded().len())];
            let (result, written) = decode_slice(c.encoded(), &mut dst);
            assert_eq!(result, Ok(()));
            assert_eq!(&dst[..written], c.decoded());
            assert_eq!(decode(c.encoded()).unwrap(), c.decoded());
        }
    });
}

/// Tests the writer's high level API usage.
#[test]
fn writer_high_level_api() {
    TEST_CASES.with(|cs| {
        for c in cs {
            let mut writer = EncodingWriter::new(Vec::new());
            writer.write_all(c.decoded()).unwrap();
            writer.flush().unwrap();
            let (dst, result) = writer.finish();
            result.unwrap();
            assert_eq!(dst, c.encoded());
        }
    });
}

/// Tests the writer for byte-by-byte streaming.
#[test]
fn writer_byte_by_byte() {
    TEST_CASES.with(|cs| {
        for c in cs {
            let mut writer = EncodingWriter::new(Vec::new());
            let mut src = c.decoded();
            while !src.is_empty() {
                match writer.write(&src[..1]) {
                    Ok(1) => src = &src[1..],
                    ret => panic!("assertion failed: {:?}", ret),
                }
            }
            writer.close().unwrap();
            assert_eq!(writer.writer_ref(), c.encoded());
        }
    });
}

/// Tests the reader's high level API usage.
#[test]
fn reader_high_level_api() {
    TEST_CASES.with(|cs| {
        for c in cs {
            let mut reader = DecodingReader::new(c.encoded());
            let mut dst = Vec::new();
            reader.read_to_end(&mut dst).unwrap();
            assert_eq!(dst, c.decoded());
            assert!(matches!(reader.read(&mut [0; 64]), Ok(0)));
        }
    });
}

/// Tests that input made of whole blocks is decoded by a single read call.
#[test]
fn reader_single_read() {
    TEST_CASES.with(|cs| {
        for c in cs.iter().filter(|c| c.encoded().len() % 3 == 0) {
            let mut reader = DecodingReader::new(c.encoded());
            let mut dst = vec![0; decoded_len(c.encoded().len())];
            let n = reader.read(&mut dst).unwrap();
            assert_eq!(&dst[..n], c.decoded());
            assert!(matches!(reader.read(&mut dst), Ok(0)));
        }
    });
}

/// Tests the reader for byte-by-byte streaming on both ends.
#[test]
fn reader_byte_by_byte() {
    TEST_CASES.with(|cs| {
        for c in cs {
            let mut reader = DecodingReader::new(ChunkedReader::new(c.encoded(), 1));
            let mut dst = Vec::with_capacity(c.decoded().len());
            let mut buf = [0u8; 1];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => dst.extend_from_slice(&buf[..n]),
                    ret => panic!("assertion failed: {:?}", ret),
                }
            }
            assert_eq!(dst, c.decoded());
        }
    });
}

/// Tests output buffers of 1 to 12 bytes against a decoded length that is not a multiple of most
/// of them.
#[test]
fn reader_buffering() {
    let expected = decode(LOREM_ENCODED).unwrap();
    assert_eq!(expected, LOREM.as_bytes());
    for size in 1..=12 {
        let mut reader = DecodingReader::new(LOREM_ENCODED.as_bytes());
        let mut dst = vec![0; expected.len() + 12];
        let mut total = 0;
        loop {
            match reader.read(&mut dst[total..total + size]) {
                Ok(0) => break,
                Ok(n) => total += n,
                ret => panic!("buffer size {}: {:?}", size, ret),
            }
        }
        assert_eq!(&dst[..total], expected, "buffer size {}", size);
    }
}

/// Tests a reader with a small carry buffer fed in uneven pieces.
#[test]
fn reader_small_capacity() {
    for chunk in 1..=7 {
        let source = ChunkedReader::new(LOREM_ENCODED.as_bytes(), chunk);
        let mut reader = DecodingReader::with_capacity(0, source);
        let mut dst = Vec::new();
        reader.read_to_end(&mut dst).unwrap();
        assert_eq!(dst, LOREM.as_bytes(), "source chunk {}", chunk);
    }
}

/// Tests that streaming encode then streaming decode reproduces random input regardless of how
/// it is split across calls.
#[test]
fn streaming_round_trip_random_chunks() {
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let blob = generate_blob(&mut rng);

        let mut writer = EncodingWriter::with_capacity(rng.gen_range(0..64), Vec::new());
        let mut src = &blob[..];
        while !src.is_empty() {
            let n = rng.gen_range(1..=src.len().min(17));
            let consumed = writer.write(&src[..n]).unwrap();
            assert!(consumed > 0);
            src = &src[consumed..];
        }
        let (encoded, result) = writer.finish();
        result.unwrap();
        assert_eq!(encoded.len(), encoded_len(blob.len()));
        assert_eq!(encoded, encode(&blob).as_bytes());

        let source = ChunkedReader::new(&encoded, rng.gen_range(1..=10));
        let mut reader = DecodingReader::with_capacity(rng.gen_range(0..64), source);
        let mut decoded = Vec::new();
        let mut buf = [0u8; 16];
        loop {
            let size = rng.gen_range(1..=buf.len());
            match reader.read(&mut buf[..size]) {
                Ok(0) => break,
                Ok(n) => decoded.extend_from_slice(&buf[..n]),
                ret => panic!("assertion failed: {:?}", ret),
            }
        }
        assert_eq!(decoded, blob);
    }
}

#[test]
fn one_shot_round_trip_random() {
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let blob = generate_blob(&mut rng);
        let encoded = encode(&blob);
        assert_eq!(encoded.len(), encoded_len(blob.len()));
        assert!(decoded_len(encoded.len()) >= blob.len());

        // exactly sized buffers on both ends
        let mut enc_buf = vec![0; encoded_len(blob.len())];
        assert_eq!(encode_slice(&blob, &mut enc_buf), enc_buf.len());
        let mut dec_buf = vec![0; decoded_len(enc_buf.len())];
        let (result, written) = decode_slice(&enc_buf, &mut dec_buf);
        assert_eq!(result, Ok(()));
        assert_eq!(&dec_buf[..written], blob);
    }
}

/// Tests a large input encoded in one write call and decoded through `read_to_end`.
#[test]
fn big_round_trip() {
    let raw = pattern(3 * 1000 + 1);
    let mut writer = EncodingWriter::new(Vec::new());
    assert_eq!(writer.write(&raw).unwrap(), raw.len());
    writer.close().unwrap();

    let mut reader = DecodingReader::new(io::Cursor::new(writer.writer_ref()));
    let mut decoded = Vec::new();
    reader.read_to_end(&mut decoded).unwrap();
    assert_eq!(decoded, raw);
}

/// A reader that yields at most `chunk` bytes per call.
struct ChunkedReader<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl<'a> ChunkedReader<'a> {
    fn new(data: &'a [u8], chunk: usize) -> Self {
        Self { data, chunk }
    }
}

impl io::Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.chunk).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn generate_blob(rng: &mut impl Rng) -> Vec<u8> {
    let length = rng.gen_range(0..=100);
    (0..length).map(|_| rng.gen::<u8>()).collect()
}

fn pattern(n: usize) -> Vec<u8> {
    const ALPHA: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    (0..n).map(|i| ALPHA[i % ALPHA.len()]).collect()
}

static LOREM: &str = include_str!("lorem.txt");
static LOREM_ENCODED: &str = include_str!("lorem.b45");

thread_local! {
    static TEST_CASES: Vec<TestCase> = [
        ("", ""),
        ("AB", "BB8"),
        ("Hello!", "%69 VD92E"),
        ("Hello!!", "%69 VD92EX0"),
        ("base-45", "UJCLQE7W581"),
        ("base-45-", "UJCLQE7W5NW6"),
        ("ietf!", "QED8WEX0"),
        (LOREM, LOREM_ENCODED),
    ]
    .into_iter()
    .map(|(decoded, encoded)| TestCase {
        decoded_bytes: decoded.as_bytes().to_vec(),
        encoded_bytes: encoded.as_bytes().to_vec(),
    })
    .chain([0, 1, 2, 255, 256].into_iter().map(|n| {
        let decoded_bytes = pattern(n);
        TestCase {
            encoded_bytes: encode(&decoded_bytes).into_bytes(),
            decoded_bytes,
        }
    }))
    .collect();
}

struct TestCase {
    decoded_bytes: Vec<u8>,
    encoded_bytes: Vec<u8>,
}

impl TestCase {
    fn decoded(&self) -> &[u8] {
        &self.decoded_bytes
    }

    fn encoded(&self) -> &[u8] {
        &self.encoded_bytes
    }
}
