// src/format/mod.rs

//! On-disk layout of a compressed stream.

pub mod header;

pub use header::{Header, read_header, write_header};
