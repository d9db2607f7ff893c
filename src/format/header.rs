// src/format/header.rs

//! The code-table header that precedes every packed body.
//!
//! Layout:
//!
//! | Field | Size | Meaning |
//! |---|---|---|
//! | symbol_count | 1 | distinct symbols, 0 standing for 256 |
//! | entries | variable | symbol, code length, `ceil(len / 8)` code bytes MSB-first |
//! | total_symbols | 8 | little-endian length of the original stream |

use crate::huffman::builder::MAX_CODE_LENGTH;
use crate::huffman::code::{Code, CodeEntry, CodeTable};
use crate::huffman::frequency::ALPHABET_SIZE;
use crate::stream::{WriteStream, pack_bits};
use crate::utils::error::{HuffError, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, trace};
use std::io::{Read, Write};

/// Size in bytes of the trailing total-symbol field.
pub const TOTAL_FIELD_LEN: usize = 8;

/// A decoded header.
///
/// Frequencies are not stored on the wire, so every entry of `code_table`
/// has a frequency of zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub code_table: CodeTable,
    pub total_symbols: u64,
}

/// Maps a distinct-symbol count onto the one-byte field.
pub fn encode_symbol_count(count: usize) -> Result<u8> {
    match count {
        0 => Err(HuffError::EmptyInput),
        ALPHABET_SIZE => Ok(0),
        n if n < ALPHABET_SIZE => Ok(n as u8),
        n => Err(HuffError::MalformedHeader(format!(
            "{} symbols do not fit a byte alphabet",
            n
        ))),
    }
}

pub fn decode_symbol_count(field: u8) -> usize {
    if field == 0 {
        ALPHABET_SIZE
    } else {
        field as usize
    }
}

/// Number of bytes [`write_header`] produces for `table`.
pub fn header_len(table: &CodeTable) -> usize {
    1 + table
        .iter()
        .map(|(_, entry)| 2 + entry.code_length().div_ceil(8))
        .sum::<usize>()
        + TOTAL_FIELD_LEN
}

/// Writes the header for `table` and returns the number of bytes written.
pub fn write_header<W: Write>(writer: &mut W, table: &CodeTable, total_symbols: u64) -> Result<usize> {
    let count = encode_symbol_count(table.len())?;
    writer.write_byte(count)?;

    let mut written = 1;
    for (symbol, entry) in table.iter() {
        let length = entry.code_length();
        if length == 0 {
            return Err(HuffError::MalformedHeader(format!(
                "symbol {} has an empty code",
                symbol
            )));
        }
        if length > MAX_CODE_LENGTH {
            return Err(HuffError::CodeTooLong(length));
        }
        let packed = pack_bits(&entry.code);
        writer.write_byte(symbol)?;
        writer.write_byte(length as u8)?;
        writer.write_bytes(&packed)?;
        trace!("header entry {:#04x}: {} bits", symbol, length);
        written += 2 + packed.len();
    }

    writer.write_u64_le(total_symbols)?;
    written += TOTAL_FIELD_LEN;

    debug!(
        "wrote header: {} symbols, {} total, {} bytes",
        table.len(),
        total_symbols,
        written
    );
    Ok(written)
}

/// Reads a header written by [`write_header`].
pub fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    let field = reader
        .read_u8()
        .map_err(|e| HuffError::from_header_read(e, "symbol count"))?;
    let count = decode_symbol_count(field);

    let mut code_table = CodeTable::new();
    for _ in 0..count {
        let symbol = reader
            .read_u8()
            .map_err(|e| HuffError::from_header_read(e, "symbol"))?;
        let length = reader
            .read_u8()
            .map_err(|e| HuffError::from_header_read(e, "code length"))? as usize;
        if length == 0 {
            return Err(HuffError::MalformedHeader(format!(
                "symbol {} has a zero-length code",
                symbol
            )));
        }
        if code_table.contains(symbol) {
            return Err(HuffError::MalformedHeader(format!(
                "symbol {} listed twice",
                symbol
            )));
        }

        let mut packed = vec![0u8; length.div_ceil(8)];
        reader
            .read_exact(&mut packed)
            .map_err(|e| HuffError::from_header_read(e, "code bits"))?;
        let mut code = Code::from_vec(packed);
        if code[length..].any() {
            return Err(HuffError::MalformedHeader(format!(
                "code for symbol {} has non-zero padding",
                symbol
            )));
        }
        code.truncate(length);
        trace!("header entry {:#04x}: {} bits", symbol, length);
        code_table.insert(symbol, CodeEntry { code, frequency: 0 });
    }

    let total_symbols = reader
        .read_u64::<LittleEndian>()
        .map_err(|e| HuffError::from_header_read(e, "total symbol count"))?;

    debug!("read header: {} symbols, {} total", count, total_symbols);
    Ok(Header {
        code_table,
        total_symbols,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn entry(bits: &str) -> CodeEntry {
        CodeEntry {
            code: bits.chars().map(|c| c == '1').collect(),
            frequency: 1,
        }
    }

    fn sample() -> CodeTable {
        let mut table = CodeTable::new();
        table.insert(b'a', entry("0"));
        table.insert(b'c', entry("10"));
        table.insert(b'b', entry("11"));
        table
    }

    #[test]
    fn test_header_bytes() {
        let mut out = Vec::new();
        let written = write_header(&mut out, &sample(), 6).unwrap();
        assert_eq!(
            out,
            vec![
                3, b'a', 1, 0x00, b'b', 2, 0xC0, b'c', 2, 0x80, 6, 0, 0, 0, 0, 0, 0, 0
            ]
        );
        assert_eq!(written, out.len());
        assert_eq!(header_len(&sample()), out.len());
    }

    #[test]
    fn test_header_read_back() {
        let mut out = Vec::new();
        write_header(&mut out, &sample(), 6).unwrap();
        out.push(0xEE); // first body byte must stay unread

        let mut cursor = Cursor::new(out);
        let header = read_header(&mut cursor).unwrap();
        assert_eq!(header.total_symbols, 6);
        assert_eq!(header.code_table.len(), 3);
        let codes: Vec<(u8, Code)> = header
            .code_table
            .iter()
            .map(|(s, e)| (s, e.code.clone()))
            .collect();
        let expected: Vec<(u8, Code)> = sample().iter().map(|(s, e)| (s, e.code.clone())).collect();
        assert_eq!(codes, expected);
        assert_eq!(cursor.position(), 18);
    }

    #[test]
    fn test_multi_byte_code() {
        let mut table = CodeTable::new();
        table.insert(7, entry("1111111110"));
        table.insert(8, entry("0"));
        let mut out = Vec::new();
        write_header(&mut out, &table, 2).unwrap();
        assert_eq!(&out[..7], &[2, 7, 10, 0xFF, 0x80, 8, 1]);

        let header = read_header(&mut Cursor::new(out)).unwrap();
        assert_eq!(header.code_table.get(7).unwrap().code, entry("1111111110").code);
    }

    #[test]
    fn test_symbol_count_boundary() {
        assert_eq!(encode_symbol_count(256).unwrap(), 0);
        assert_eq!(encode_symbol_count(255).unwrap(), 255);
        assert_eq!(encode_symbol_count(1).unwrap(), 1);
        assert!(matches!(encode_symbol_count(0), Err(HuffError::EmptyInput)));
        assert!(encode_symbol_count(257).is_err());
        assert_eq!(decode_symbol_count(0), 256);
        assert_eq!(decode_symbol_count(17), 17);
    }

    #[test]
    fn test_truncated_header() {
        let mut out = Vec::new();
        write_header(&mut out, &sample(), 6).unwrap();
        for cut in [0, 1, 3, 9, 12] {
            let err = read_header(&mut Cursor::new(out[..cut].to_vec())).unwrap_err();
            assert!(
                matches!(err, HuffError::MalformedHeader(_)),
                "cut at {cut}: {err:?}"
            );
        }
    }

    #[test]
    fn test_rejects_zero_length_code() {
        let bytes = vec![1, b'a', 0, 1, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            read_header(&mut Cursor::new(bytes)),
            Err(HuffError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_symbol() {
        let bytes = vec![2, b'a', 1, 0x00, b'a', 1, 0x80, 1, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            read_header(&mut Cursor::new(bytes)),
            Err(HuffError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_rejects_dirty_padding() {
        let bytes = vec![1, b'a', 1, 0x01, 1, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            read_header(&mut Cursor::new(bytes)),
            Err(HuffError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let mut out = Vec::new();
        assert!(matches!(
            write_header(&mut out, &CodeTable::new(), 0),
            Err(HuffError::EmptyInput)
        ));
    }
}
