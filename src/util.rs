use std::io;

use super::block::CHUNK_SIZE;
use super::CorruptInputError;

// As of Rust 1.73.0: https://github.com/rust-lang/rust/blob/1.73.0/library/std/src/sys_common/io.rs#L3
pub(crate) const DEFAULT_BUF_SIZE: usize = if cfg!(target_os = "espidf") {
    512
} else {
    8 * 1024
};

/// A `Vec`-like struct that holds the raw bytes of at most one unencoded block.
#[derive(Debug, Default)]
pub(crate) struct CarryBuffer {
    len: u8,
    buf: [u8; CHUNK_SIZE],
}

impl AsRef<[u8]> for CarryBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.buf[..self.len()]
    }
}

impl CarryBuffer {
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len.into()
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Copies as many bytes as possible from a slice into the spare capacity, returning the
    /// number of bytes consumed.
    pub fn fill_from_slice(&mut self, buf: &[u8]) -> usize {
        let len = self.len();
        let n = (self.buf.len() - len).min(buf.len());
        self.buf[len..][..n].copy_from_slice(&buf[..n]);
        self.len += n as u8;
        n
    }
}

/// An error latched by a streaming coder and reported again by every subsequent call.
///
/// `io::Error` is not `Clone`, so I/O errors are recorded by kind and message and rebuilt on
/// each report.
#[derive(Debug)]
pub(crate) enum StickyError {
    Corrupt(CorruptInputError),
    UnexpectedEnd(CorruptInputError),
    Io { kind: io::ErrorKind, message: String },
}

impl StickyError {
    pub fn from_io(error: &io::Error) -> Self {
        match CorruptInputError::wrapped_in(error) {
            Some(&e) if error.kind() == io::ErrorKind::UnexpectedEof => Self::UnexpectedEnd(e),
            Some(&e) => Self::Corrupt(e),
            None => Self::Io {
                kind: error.kind(),
                message: error.to_string(),
            },
        }
    }

    pub fn to_io_error(&self) -> io::Error {
        match self {
            Self::Corrupt(e) => e.wrap(io::ErrorKind::InvalidData),
            Self::UnexpectedEnd(e) => e.wrap(io::ErrorKind::UnexpectedEof),
            Self::Io { kind, message } => io::Error::new(*kind, message.as_str()),
        }
    }
}
