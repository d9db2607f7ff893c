// src/huffman/code.rs

//! Code words and the per-symbol code table.

use crate::huffman::frequency::ALPHABET_SIZE;
use bitvec::prelude::*;
use std::fmt;

/// A code word, first bit first. `0` means "go left".
pub type Code = BitVec<u8, Msb0>;

/// The code assigned to one symbol, with the symbol's occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    pub code: Code,
    pub frequency: u64,
}

impl CodeEntry {
    pub fn code_length(&self) -> usize {
        self.code.len()
    }
}

/// Codes for every symbol present in the input, indexed by byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    entries: Vec<Option<CodeEntry>>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self {
            entries: vec![None; ALPHABET_SIZE],
        }
    }

    pub fn insert(&mut self, symbol: u8, entry: CodeEntry) {
        self.entries[symbol as usize] = Some(entry);
    }

    pub fn get(&self, symbol: u8) -> Option<&CodeEntry> {
        self.entries[symbol as usize].as_ref()
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.entries[symbol as usize].is_some()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_none())
    }

    /// Present symbols in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &CodeEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(symbol, entry)| entry.as_ref().map(|e| (symbol as u8, e)))
    }

    /// Sum of the frequencies of all entries.
    pub fn total_frequency(&self) -> u64 {
        self.iter().map(|(_, e)| e.frequency).sum()
    }

    pub fn max_code_length(&self) -> usize {
        self.iter().map(|(_, e)| e.code_length()).max().unwrap_or(0)
    }

    /// Returns true if no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.iter().map(|(_, e)| &e.code).collect();
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                let shared = a.len().min(b.len());
                if a[..shared] == b[..shared] {
                    return false;
                }
            }
        }
        true
    }

    /// Symbol / frequency / code listing, as printed after encoding a file.
    pub fn report(&self) -> CodeReport<'_> {
        CodeReport { table: self }
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Display adapter returned by [`CodeTable::report`].
pub struct CodeReport<'a> {
    table: &'a CodeTable,
}

impl fmt::Display for CodeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Symbol  Freq    Code")?;
        for (symbol, entry) in self.table.iter() {
            writeln!(
                f,
                "{:<8}{:<8}{}",
                symbol_label(symbol),
                entry.frequency,
                code_string(&entry.code)
            )?;
        }
        write!(f, "Total chars = {}", self.table.total_frequency())
    }
}

/// Printable ASCII as itself, anything else as `=<decimal>`.
pub fn symbol_label(symbol: u8) -> String {
    if (33..=126).contains(&symbol) {
        (symbol as char).to_string()
    } else {
        format!("={}", symbol)
    }
}

pub fn code_string(code: &BitSlice<u8, Msb0>) -> String {
    code.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}
