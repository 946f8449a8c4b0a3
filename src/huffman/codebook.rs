use std::collections::HashMap;
use std::fmt;

use super::tree::{FrequencyTable, HuffmanTree};
use crate::error::{Error, Result};

/// Longest code a [`Code`] can hold.
///
/// A Huffman tree deeper than this needs a total symbol count of at least
/// Fibonacci(66) (about 2.7e13), so no in-memory input reaches it.
pub const MAX_CODE_LENGTH: u8 = 64;

/// A variable-length bit string, stored right-aligned (last bit in the LSB)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// Build a code from its right-aligned `bits` and bit length
    pub fn new(bits: u64, len: u8) -> Result<Self> {
        if len > MAX_CODE_LENGTH {
            return Err(Error::InvalidCodebook(format!(
                "code length {} exceeds {}",
                len, MAX_CODE_LENGTH
            )));
        }
        if len < 64 && bits >> len != 0 {
            return Err(Error::InvalidCodebook(format!(
                "value 0b{:b} does not fit in {} bits",
                bits, len
            )));
        }
        Ok(Self { bits, len })
    }

    /// Parse a code written as `0`/`1` characters
    pub fn parse(text: &str) -> Result<Self> {
        if text.len() > MAX_CODE_LENGTH as usize {
            return Err(Error::InvalidCodebook(format!(
                "code \"{}\" is longer than {} bits",
                text, MAX_CODE_LENGTH
            )));
        }
        let mut code = Self::default();
        for c in text.chars() {
            match c {
                '0' => code = code.push(false),
                '1' => code = code.push(true),
                _ => {
                    return Err(Error::InvalidCodebook(format!(
                        "invalid character {:?} in code \"{}\"",
                        c, text
                    )))
                }
            }
        }
        Ok(code)
    }

    /// This code extended by one bit
    #[inline]
    pub fn push(self, bit: bool) -> Self {
        debug_assert!(self.len < MAX_CODE_LENGTH);
        Self { bits: (self.bits << 1) | bit as u64, len: self.len + 1 }
    }

    #[inline]
    pub fn bits(&self) -> u64 {
        self.bits
    }

    #[inline]
    pub fn len(&self) -> u8 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `self` is a (non-strict) prefix of `other`
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        if self.len == 0 {
            return true;
        }
        other.bits >> (other.len - self.len) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len).rev() {
            f.write_str(if (self.bits >> i) & 1 == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Bidirectional symbol <-> code mapping
///
/// Every codebook is validated on construction: codes are non-empty,
/// unique, and prefix-free, and each symbol appears once.
#[derive(Clone, Debug)]
pub struct Codebook {
    /// Encode table indexed by symbol
    codes: Box<[Option<Code>; 256]>,
    /// Decode table
    symbols: HashMap<Code, u8>,
    max_len: u8,
}

impl Codebook {
    /// An empty codebook (the result for empty input)
    pub fn empty() -> Self {
        Self { codes: Box::new([None; 256]), symbols: HashMap::new(), max_len: 0 }
    }

    /// Build and validate a codebook from explicit entries
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, Code)>,
    {
        let mut book = Self::empty();
        for (symbol, code) in entries {
            if code.is_empty() {
                return Err(Error::InvalidCodebook(format!("symbol {} has an empty code", symbol)));
            }
            if book.codes[symbol as usize].is_some() {
                return Err(Error::InvalidCodebook(format!("symbol {} listed twice", symbol)));
            }
            if let Some(other) = book.symbols.get(&code) {
                return Err(Error::InvalidCodebook(format!(
                    "code {} assigned to both {} and {}",
                    code, other, symbol
                )));
            }
            book.insert(symbol, code);
        }

        if let Some((a, b)) = book.find_prefix_violation() {
            return Err(Error::InvalidCodebook(format!("code {} is a prefix of {}", a, b)));
        }
        Ok(book)
    }

    /// Derive the codebook for a tree: `0` per left edge, `1` per right edge
    ///
    /// A tree with a single leaf gives that symbol the 1-bit code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut book = Self::empty();
        for (symbol, code) in tree.leaf_codes() {
            book.insert(symbol, code);
        }
        book
    }

    /// Build the Huffman codebook for `data` (empty for empty input)
    pub fn from_data(data: &[u8]) -> Self {
        Self::from_frequencies(&FrequencyTable::from_data(data))
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Self {
        match HuffmanTree::build(frequencies) {
            Some(tree) => Self::from_tree(&tree),
            None => Self::empty(),
        }
    }

    fn insert(&mut self, symbol: u8, code: Code) {
        self.codes[symbol as usize] = Some(code);
        self.symbols.insert(code, symbol);
        self.max_len = self.max_len.max(code.len());
    }

    /// Code assigned to `symbol`
    #[inline]
    pub fn code(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Symbol whose code is exactly `code`
    #[inline]
    pub fn symbol(&self, code: &Code) -> Option<u8> {
        self.symbols.get(code).copied()
    }

    /// Number of symbols with a code
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Length of the longest code (0 when empty)
    pub fn max_code_len(&self) -> u8 {
        self.max_len
    }

    /// Entries in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes.iter().enumerate().filter_map(|(sym, code)| code.map(|c| (sym as u8, c)))
    }

    /// Bits needed to encode input with these frequencies
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> Result<u64> {
        let mut total = 0u64;
        for (symbol, count) in frequencies.iter() {
            let code = self.code(symbol).ok_or(Error::MissingSymbol(symbol))?;
            total += count * code.len() as u64;
        }
        Ok(total)
    }

    /// Find a pair of codes where the first is a prefix of the second
    fn find_prefix_violation(&self) -> Option<(Code, Code)> {
        // In lexicographic order a prefix sorts directly before some code it prefixes
        let mut sorted: Vec<(String, Code)> =
            self.symbols.keys().map(|c| (c.to_string(), *c)).collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        sorted
            .windows(2)
            .find(|w| w[0].1.is_prefix_of(&w[1].1))
            .map(|w| (w[0].1, w[1].1))
    }

    /// Whether no code is a prefix of another
    pub fn is_prefix_free(&self) -> bool {
        self.find_prefix_violation().is_none()
    }

    /// Render as `symbol:code` lines in ascending symbol order
    pub fn to_sidecar(&self) -> String {
        let mut out = String::with_capacity(self.len() * 12);
        for (symbol, code) in self.iter() {
            out.push_str(&format!("{}:{}\n", symbol, code));
        }
        out
    }

    /// Parse `symbol:code` lines; blank lines are skipped
    pub fn parse_sidecar(text: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (symbol, code) = line.split_once(':').ok_or_else(|| {
                Error::InvalidCodebook(format!("line {}: expected symbol:code", line_no + 1))
            })?;
            let symbol: u8 = symbol.trim().parse().map_err(|_| {
                Error::InvalidCodebook(format!(
                    "line {}: symbol {:?} is not a byte value",
                    line_no + 1,
                    symbol
                ))
            })?;
            entries.push((symbol, Code::parse(code.trim())?));
        }
        Self::from_entries(entries)
    }
}

impl PartialEq for Codebook {
    fn eq(&self, other: &Self) -> bool {
        self.codes == other.codes
    }
}

impl Eq for Codebook {}

impl Default for Codebook {
    fn default() -> Self {
        Self::empty()
    }
}
