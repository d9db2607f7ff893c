// src/codec/mod.rs

//! Stream-level encode and decode.
//!
//! [`Encoder`] needs a seekable input because it reads it twice. [`Decoder`]
//! reads its input once. For data already in memory, [`compress`] and
//! [`decompress`] wrap both.

pub mod decoder;
pub mod encoder;
pub mod params;

pub use decoder::{DecodeSummary, Decoder, unpack_body};
pub use encoder::{EncodeSummary, Encoder, pack_body};
pub use params::CodecParams;

use crate::utils::error::Result;
use std::io::Cursor;

/// Compresses a byte slice.
///
/// # Returns
/// The header followed by the packed body. Empty input fails with
/// `EmptyInput`.
#[inline]
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut compressed = Vec::new();
    Encoder::default().encode(&mut Cursor::new(data), &mut compressed)?;
    Ok(compressed)
}

/// Decompresses a byte slice produced by [`compress`] or [`Encoder`].
#[inline]
pub fn decompress(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    Decoder::default().decode(compressed, &mut data)?;
    Ok(data)
}
