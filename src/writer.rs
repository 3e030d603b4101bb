use std::io;

use super::block::{encode_block, CHUNK_SIZE, ENCODED_CHUNK_SIZE};
use super::codec::encode_slice;
use super::util::{CarryBuffer, StickyError, DEFAULT_BUF_SIZE};

const MIN_BUF_SIZE: usize = 32 / ENCODED_CHUNK_SIZE * ENCODED_CHUNK_SIZE;

/// A writer wrapper that encodes an input byte stream into base45.
///
/// This wrapper accepts bytes through [`std::io::Write`] methods, encodes every complete
/// two-byte block, and writes the encoded characters into the underlying writer. A trailing odd
/// byte is held back until the next write completes its block or until [`close`] encodes it as
/// the terminal two-character block. Callers must call `close` (or [`finish`]) after writing the
/// entire data, as dropping this writer discards the held byte. Writing after `close` produces an
/// invalid stream.
///
/// Once the underlying writer fails, the error is sticky: every subsequent call fails with the
/// same error. To meet the requirements of [`std::io::Write`], a `write` call that has already
/// consumed some input before the failure returns `Ok(n)` and the error is reported at the
/// beginning of the next call.
///
/// [`close`]: Self::close
/// [`finish`]: Self::finish
///
/// # Examples
///
/// ```rust
/// use std::io::Write as _;
///
/// use base45_rw::EncodingWriter;
///
/// let mut writer = EncodingWriter::new(Vec::new());
///
/// write!(writer, "Hel")?;
/// writer.write_all(b"lo!!")?;
/// let (encoded, result) = writer.finish();
/// result?;
/// assert_eq!(encoded, b"%69 VD92EX0");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct EncodingWriter<W: io::Write> {
    writer: W,
    carry: CarryBuffer,
    /// Staging buffer for encoded output, a whole number of encoded blocks in length.
    out: Vec<u8>,
    sticky_error: Option<StickyError>,
}

impl<W: io::Write> EncodingWriter<W> {
    /// Creates a new encoding writer from a writer.
    pub fn new(writer: W) -> Self {
        Self::with_capacity(DEFAULT_BUF_SIZE, writer)
    }

    /// Creates a new encoding writer whose staging buffer holds about `capacity` encoded
    /// characters, limiting how many bytes are passed to each write call on the underlying
    /// writer.
    pub fn with_capacity(capacity: usize, writer: W) -> Self {
        let capacity = capacity.max(MIN_BUF_SIZE) / ENCODED_CHUNK_SIZE * ENCODED_CHUNK_SIZE;
        Self {
            writer,
            carry: CarryBuffer::default(),
            out: vec![0; capacity],
            sticky_error: None,
        }
    }

    /// Returns a reference to the underlying writer.
    pub fn writer_ref(&self) -> &W {
        &self.writer
    }

    /// Encodes the pending odd byte, if any, as the terminal block and writes it into the
    /// underlying writer.
    ///
    /// Calling this method again is harmless as the pending byte is gone, but any further `write`
    /// call makes the output invalid base45. This method does not flush the underlying writer.
    pub fn close(&mut self) -> io::Result<()> {
        self.realize_sticky_error()?;
        if self.carry.is_empty() {
            return Ok(());
        }
        log::trace!("encoding final short block");
        let written = encode_block(self.carry.as_ref(), &mut self.out);
        self.carry.clear();
        self.writer
            .write_all(&self.out[..written])
            .map_err(|e| self.latch(e))
    }

    /// Closes this writer as [`close`](Self::close) does, dropping it and returning the
    /// underlying writer along with the result of closing.
    pub fn finish(mut self) -> (W, io::Result<()>) {
        let result = self.close();
        (self.writer, result)
    }

    fn write_inner(&mut self, mut buf: &[u8]) -> Result<usize, (usize, io::Error)> {
        let mut consumed = 0;

        // leading fringe
        if !self.carry.is_empty() {
            let n = self.carry.fill_from_slice(buf);
            consumed += n;
            buf = &buf[n..];
            if !self.carry.is_full() {
                return Ok(consumed);
            }
            let written = encode_block(self.carry.as_ref(), &mut self.out);
            self.carry.clear();
            self.writer
                .write_all(&self.out[..written])
                .map_err(|e| (consumed, e))?;
        }

        // interior blocks, as many as the staging buffer holds at a time
        let max_chunk = self.out.len() / ENCODED_CHUNK_SIZE * CHUNK_SIZE;
        while buf.len() >= CHUNK_SIZE {
            let n = max_chunk.min(buf.len() - buf.len() % CHUNK_SIZE);
            let written = encode_slice(&buf[..n], &mut self.out);
            self.writer
                .write_all(&self.out[..written])
                .map_err(|e| (consumed, e))?;
            consumed += n;
            buf = &buf[n..];
        }

        // trailing fringe
        consumed += self.carry.fill_from_slice(buf);
        debug_assert!(buf.len() < CHUNK_SIZE);
        Ok(consumed)
    }

    /// Records `error` as the sticky error and hands it back for the current call to report.
    fn latch(&mut self, error: io::Error) -> io::Error {
        log::debug!("base45 encoder failed to write to underlying writer: {}", error);
        self.sticky_error = Some(StickyError::from_io(&error));
        error
    }

    fn realize_sticky_error(&self) -> io::Result<()> {
        match &self.sticky_error {
            None => Ok(()),
            Some(e) => Err(e.to_io_error()),
        }
    }
}

impl<W: io::Write> io::Write for EncodingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.realize_sticky_error()?;
        if buf.is_empty() {
            return Ok(0);
        }
        match self.write_inner(buf) {
            Ok(consumed) => Ok(consumed),
            // defer error until subsequent call because some bytes were consumed successfully
            Err((consumed, e)) => {
                let e = self.latch(e);
                if consumed > 0 {
                    Ok(consumed)
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Flushes the underlying writer. The pending odd byte, if any, stays in this writer because
    /// only [`close`](EncodingWriter::close) may emit a short block.
    fn flush(&mut self) -> io::Result<()> {
        self.realize_sticky_error()?;
        self.writer.flush().map_err(|e| self.latch(e))
    }
}
