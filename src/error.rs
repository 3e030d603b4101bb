use std::{error, fmt, io};

/// The error type reported when an encoded input contains invalid base45 data.
///
/// The offset points at the offending character for a character outside the alphabet or a
/// dangling single trailing character, and just past the block for a three-character block whose
/// value exceeds 65535.
///
/// The one-shot functions return this type directly. The [`Read`] implementation of
/// [`DecodingReader`] reports it in the form of [`std::io::Error`] wrapping an instance of this
/// type; the offset is then relative to the chunk of input the reader was decoding. Callers need
/// to unwrap and downcast the inner error of a reported error, which can be shortcut by
/// [`CorruptInputError::wrapped_in`].
///
/// [`DecodingReader`]: crate::DecodingReader
/// [`Read`]: std::io::Read
///
/// # Examples
///
/// ```rust
/// use base45_rw::{CorruptInputError, DecodingReader};
/// use std::io::Read as _;
///
/// let src: &[u8] = b"BB8FaW";
/// let mut reader = DecodingReader::new(src);
///
/// let mut dst = Vec::new();
/// let io_error = reader.read_to_end(&mut dst).unwrap_err();
/// assert_eq!(dst, b"AB");
/// assert_eq!(CorruptInputError::wrapped_in(&io_error).map(|e| e.offset()), Some(4));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CorruptInputError {
    offset: usize,
}

impl fmt::Display for CorruptInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal base45 data at input byte {}", self.offset)
    }
}

impl error::Error for CorruptInputError {}

impl CorruptInputError {
    /// Creates a new error value.
    pub(crate) fn new(offset: usize) -> Self {
        Self { offset }
    }

    /// Returns the byte offset in the input at which invalid data was found.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns a copy of `self` with the offset moved forward by `base`.
    pub(crate) fn shifted(self, base: usize) -> Self {
        Self::new(base + self.offset)
    }

    /// Wraps `self` in a [`std::io::Error`] of the given kind.
    pub(crate) fn wrap(self, kind: io::ErrorKind) -> io::Error {
        io::Error::new(kind, self)
    }

    /// Returns a reference to the `CorruptInputError` value wrapped by a [`std::io::Error`] if it
    /// contains an inner error whose type is `CorruptInputError`, or returns `None` otherwise.
    #[inline]
    pub fn wrapped_in(io_error: &io::Error) -> Option<&Self> {
        match io_error.get_ref() {
            Some(e) => e.downcast_ref::<Self>(),
            None => None,
        }
    }

    /// Returns `true` if `io_error` reports a base45 stream that ended with a single dangling
    /// character.
    pub fn is_unexpected_end(io_error: &io::Error) -> bool {
        io_error.kind() == io::ErrorKind::UnexpectedEof && Self::wrapped_in(io_error).is_some()
    }
}
