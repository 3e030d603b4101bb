//! Base45 codec with std::io::{Read, Write} wrappers
//!
//! This crate implements the base45 encoding of draft-faltstrom-base45, which maps binary data
//! onto a 45-character alphabet (`0-9`, `A-Z`, and ` $%*+-./:`) that fits the alphanumeric mode
//! of QR codes. Every two bytes become three characters, and a final odd byte becomes two.
//!
//! One-shot functions work on whole buffers:
//!
//! ```rust
//! assert_eq!(base45_rw::encode("base-45"), "UJCLQE7W581");
//! assert_eq!(base45_rw::decode("%69 VD92E")?, b"Hello!");
//! # Ok::<(), base45_rw::CorruptInputError>(())
//! ```
//!
//! [`EncodingWriter`] and [`DecodingReader`] wrap [`std::io::Write`] and [`std::io::Read`]
//! implementations to encode and decode streams through Rust's standard streaming API,
//! accepting writes and reads of any size.
//!
//! ```rust
//! use std::io::{self, prelude::*};
//!
//! use base45_rw::{DecodingReader, EncodingWriter};
//!
//! let mut writer = EncodingWriter::new(Vec::new());
//! writer.write_all(b"Hello!!")?;
//! writer.close()?;
//! assert_eq!(writer.writer_ref(), b"%69 VD92EX0");
//!
//! let mut reader = DecodingReader::new(io::Cursor::new(writer.writer_ref()));
//! let mut decoded = Vec::new();
//! reader.read_to_end(&mut decoded)?;
//! assert_eq!(decoded, b"Hello!!");
//! # Ok::<(), std::io::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod block;

mod alphabet;
mod codec;
mod error;
mod reader;
mod writer;

mod util;

pub use alphabet::{decode_value, ALPHABET};
pub use codec::{decode, decode_slice, decoded_len, encode, encode_slice, encoded_len};
pub use error::CorruptInputError;
pub use reader::DecodingReader;
pub use writer::EncodingWriter;

#[cfg(test)]
mod tests;
