// src/utils/error.rs

use std::io;

use thiserror::Error;

/// The error type for every encode and decode operation in this crate.
///
/// All variants are fatal to the operation that produced them. Nothing here
/// is retried: a corrupt stream or a failing handle will fail the same way
/// on the next attempt.
#[derive(Error, Debug)]
pub enum HuffError {
    /// Reading the input failed while counting or re-scanning it.
    #[error("Input unreadable: {0}")]
    InputUnreadable(#[source] io::Error),

    /// Writing the header or the packed body failed.
    #[error("Output unwritable: {0}")]
    OutputUnwritable(#[source] io::Error),

    /// The code table in the header is inconsistent or truncated.
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// Decoding walked to a child that does not exist.
    #[error("Corrupt tree: {0}")]
    CorruptTree(String),

    /// The input holds no symbols, so no tree can be built.
    #[error("Input is empty")]
    EmptyInput,

    /// The packed body ended before every symbol was decoded.
    #[error("Compressed body truncated: decoded {decoded} of {expected} symbols")]
    TruncatedBody { expected: u64, decoded: u64 },

    /// A code does not fit the one-byte length field of the header.
    #[error("Code length {0} exceeds the 255-bit header limit")]
    CodeTooLong(usize),

    /// The packing pass met a byte the counting pass never saw.
    #[error("Symbol {0:#04x} has no code; the input changed between passes")]
    SymbolNotInTable(u8),
}

impl HuffError {
    /// Classifies an I/O error raised while reading the header.
    ///
    /// Running out of bytes means the header itself is short, which is a
    /// format problem rather than a failing handle.
    pub(crate) fn from_header_read(err: io::Error, what: &str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            HuffError::MalformedHeader(format!("truncated while reading {}", what))
        } else {
            HuffError::InputUnreadable(err)
        }
    }
}

/// A specialized `Result` type for Huffman operations.
pub type Result<T> = std::result::Result<T, HuffError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_header_eof_is_malformed() {
        let err = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        match HuffError::from_header_read(err, "symbol count") {
            HuffError::MalformedHeader(msg) => assert!(msg.contains("symbol count")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_header_io_failure_is_input_error() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let mapped = HuffError::from_header_read(err, "code");
        assert!(matches!(mapped, HuffError::InputUnreadable(_)));
        assert!(mapped.source().is_some());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(HuffError::EmptyInput.to_string(), "Input is empty");
        let truncated = HuffError::TruncatedBody { expected: 10, decoded: 4 };
        assert_eq!(
            truncated.to_string(),
            "Compressed body truncated: decoded 4 of 10 symbols"
        );
        assert_eq!(
            HuffError::SymbolNotInTable(0x41).to_string(),
            "Symbol 0x41 has no code; the input changed between passes"
        );
    }
}
