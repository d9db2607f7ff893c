// src/stream/mod.rs

//! Byte and bit level I/O used by the header and body codecs.

pub mod bit_reader;
pub mod bit_writer;
pub mod byte_stream;

pub use bit_reader::BitReader;
pub use bit_writer::{BitWriter, pack_bits};
pub use byte_stream::{CountingWriter, ReadStream, WriteStream};
