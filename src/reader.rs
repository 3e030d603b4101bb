use std::{io, ops};

use super::block::{CHUNK_SIZE, ENCODED_CHUNK_SIZE};
use super::codec::{decode_slice, decoded_len};
use super::util::{StickyError, DEFAULT_BUF_SIZE};

const MIN_BUF_SIZE: usize = 32 / ENCODED_CHUNK_SIZE * ENCODED_CHUNK_SIZE;

/// A reader wrapper that decodes a base45 input stream into raw bytes.
///
/// This wrapper reads characters from the underlying reader, decodes them, and allows callers to
/// access the decoded bytes through [`std::io::Read`] methods. The output buffer may be of any
/// length: decoded bytes that do not fit are kept in this reader and returned by the next call
/// before the underlying reader is touched again.
///
/// Whole three-character blocks are decoded as they arrive. One or two characters left when the
/// underlying reader indicates EOF are decoded as the terminal short block; a single leftover
/// character is reported as [`std::io::ErrorKind::UnexpectedEof`] wrapping a
/// [`CorruptInputError`]. The underlying reader is expected to have stripped any line breaks.
///
/// This reader reports [`CorruptInputError`] wrapped in an [`std::io::ErrorKind::InvalidData`]
/// error when it encounters invalid input. The offset of the error is relative to the chunk of
/// input decoded by the failing call. Errors are sticky: once reported, every subsequent call
/// fails with the same error. Bytes decoded before the error are returned first, with the error
/// deferred until the next call.
///
/// # Examples
///
/// ```rust
/// use std::io::Read as _;
///
/// use base45_rw::DecodingReader;
///
/// let src: &[u8] = b"UJCLQE7W581";
/// let mut reader = DecodingReader::new(src);
///
/// let mut dst = String::new();
/// reader.read_to_string(&mut dst)?;
/// assert_eq!(dst, "base-45");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct DecodingReader<R> {
    reader: R,
    /// Input carry buffer, a whole number of encoded blocks in length.
    inbuf: Vec<u8>,
    /// Number of undecoded characters at the head of `inbuf`.
    nbuf: usize,
    /// Staging buffer for decoded output that may not fit the caller's buffer.
    outbuf: Vec<u8>,
    /// Range of `outbuf` decoded but not yet returned.
    out: ops::Range<usize>,
    eof: bool,
    /// Storage to carry an error from the underlying reader until the characters read before it
    /// are decoded.
    read_error: Option<io::Error>,
    sticky_error: Option<StickyError>,
}

impl<R: io::Read> DecodingReader<R> {
    /// Creates a new decoding reader from a reader.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(DEFAULT_BUF_SIZE, reader)
    }

    /// Creates a new decoding reader that requests at most about `capacity` characters from the
    /// underlying reader at a time.
    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        let capacity = capacity.max(MIN_BUF_SIZE) / ENCODED_CHUNK_SIZE * ENCODED_CHUNK_SIZE;
        Self {
            reader,
            inbuf: vec![0; capacity],
            nbuf: 0,
            outbuf: vec![0; decoded_len(capacity)],
            out: 0..0,
            eof: false,
            read_error: None,
            sticky_error: None,
        }
    }

    /// Returns a reference to the underlying reader.
    pub fn reader_ref(&self) -> &R {
        &self.reader
    }

    /// Drops this reader, returning the underlying reader. Any characters read but not decoded
    /// and any bytes decoded but not returned are discarded.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads from the underlying reader until the carry buffer holds a whole block or the
    /// underlying reader reports EOF or an error. Requests no more characters than needed to fill
    /// an output buffer of `wanted` bytes.
    fn fill_inbuf(&mut self, wanted: usize) {
        let limit = (wanted / CHUNK_SIZE * ENCODED_CHUNK_SIZE)
            .clamp(ENCODED_CHUNK_SIZE, self.inbuf.len());
        while self.nbuf < ENCODED_CHUNK_SIZE && !self.eof && self.read_error.is_none() {
            match self.reader.read(&mut self.inbuf[self.nbuf..limit]) {
                Ok(0) => self.eof = true,
                Ok(n) => self.nbuf += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => self.read_error = Some(e),
            }
        }
    }

    /// Copies leftover decoded bytes into `buf`, returning the number of bytes copied.
    fn read_leftover(&mut self, buf: &mut [u8]) -> usize {
        let src = &self.outbuf[self.out.clone()];
        let n = src.len().min(buf.len());
        buf[..n].copy_from_slice(&src[..n]);
        self.out.start += n;
        n
    }

    /// Decodes the final one or two characters left at EOF.
    fn read_final_fragment(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        debug_assert!(0 < self.nbuf && self.nbuf < ENCODED_CHUNK_SIZE);
        log::trace!("decoding final fragment of {} characters", self.nbuf);
        let (result, written) = decode_slice(&self.inbuf[..self.nbuf], &mut self.outbuf);
        let dangling = self.nbuf == 1;
        self.nbuf = 0;
        self.out = 0..written;
        let n = self.read_leftover(buf);
        match result {
            Ok(()) => Ok(n),
            Err(e) => {
                let kind = if dangling {
                    io::ErrorKind::UnexpectedEof
                } else {
                    io::ErrorKind::InvalidData
                };
                self.report(e.wrap(kind), n)
            }
        }
    }

    /// Decodes the whole blocks in the carry buffer, directly into `buf` if they fit and through
    /// the staging buffer otherwise.
    fn read_blocks(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let nr = self.nbuf - self.nbuf % ENCODED_CHUNK_SIZE;
        let (result, n) = if decoded_len(nr) > buf.len() {
            let (result, written) = decode_slice(&self.inbuf[..nr], &mut self.outbuf);
            self.out = 0..written;
            (result, self.read_leftover(buf))
        } else {
            decode_slice(&self.inbuf[..nr], buf)
        };
        self.inbuf.copy_within(nr..self.nbuf, 0);
        self.nbuf -= nr;
        match result {
            Ok(()) => Ok(n),
            Err(e) => self.report(e.wrap(io::ErrorKind::InvalidData), n),
        }
    }

    /// Latches `error` and reports it now, or defers it if `n` bytes were already produced.
    fn report(&mut self, error: io::Error, n: usize) -> io::Result<usize> {
        log::debug!("base45 decoder stopped: {}", error);
        self.sticky_error = Some(StickyError::from_io(&error));
        if n > 0 {
            Ok(n)
        } else {
            Err(error)
        }
    }
}

impl<R: io::Read> io::Read for DecodingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            // `io::Read` may return `Ok(0)` if output buffer is 0 bytes in length
            return Ok(0);
        } else if !self.out.is_empty() {
            // return early with leftovers from previous call without touching the reader
            return Ok(self.read_leftover(buf));
        } else if let Some(e) = &self.sticky_error {
            return Err(e.to_io_error());
        }

        self.fill_inbuf(buf.len());
        if self.nbuf >= ENCODED_CHUNK_SIZE {
            return self.read_blocks(buf);
        }
        if let Some(e) = self.read_error.take() {
            return self.report(e, 0);
        }
        debug_assert!(self.eof);
        match self.nbuf {
            0 => Ok(0),
            _ => self.read_final_fragment(buf),
        }
    }
}
