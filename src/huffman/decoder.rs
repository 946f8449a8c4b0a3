use super::codebook::{Code, Codebook};
use crate::bits::BitReader;
use crate::error::{Error, Result};

/// Trailing bits that may be byte padding rather than data
const MAX_PADDING_BITS: usize = 7;

/// Prefix-code decoder driven by a codebook
///
/// Bits are accumulated one at a time; whenever the accumulated string is
/// exactly a codebook entry the symbol is emitted and the accumulator resets.
/// Because the codebook is prefix-free, no backtracking is needed.
pub struct HuffmanDecoder<'a> {
    codebook: &'a Codebook,
}

impl<'a> HuffmanDecoder<'a> {
    pub fn new(codebook: &'a Codebook) -> Self {
        Self { codebook }
    }

    /// Decode the next symbol
    ///
    /// `Ok(None)` means the input ended cleanly between codes.
    fn next_symbol(&self, bits: &mut BitReader<'_>) -> Result<Option<u8>> {
        let mut code = Code::default();
        loop {
            if bits.is_exhausted() {
                return if code.is_empty() {
                    Ok(None)
                } else {
                    Err(Error::TruncatedCode(code.len() as usize))
                };
            }
            if code.len() >= self.codebook.max_code_len() {
                // Longer than every code: nothing can match from here on
                return Err(Error::InvalidHuffmanCode(code.len() as usize + 1));
            }

            code = code.push(bits.read_bit()?);
            if let Some(symbol) = self.codebook.symbol(&code) {
                return Ok(Some(symbol));
            }
        }
    }

    /// Decode exactly the first `bit_len` bits of `data`
    ///
    /// Ending inside a code is an error.
    pub fn decode(&self, data: &[u8], bit_len: usize) -> Result<Vec<u8>> {
        let mut bits = BitReader::with_bit_len(data, bit_len)?;
        let mut output = Vec::with_capacity(bit_len / self.codebook.max_code_len().max(1) as usize);

        while let Some(symbol) = self.next_symbol(&mut bits)? {
            output.push(symbol);
        }

        log::debug!("huffman: decoded {} bits into {} symbols", bit_len, output.len());
        Ok(output)
    }

    /// Decode exactly `count` symbols, ignoring any bits after them
    pub fn decode_symbols(&self, data: &[u8], count: usize) -> Result<Vec<u8>> {
        let mut bits = BitReader::new(data);
        let mut output = Vec::with_capacity(count);

        for _ in 0..count {
            match self.next_symbol(&mut bits)? {
                Some(symbol) => output.push(symbol),
                None => return Err(Error::UnexpectedEof),
            }
        }

        Ok(output)
    }

    /// Decode a byte-padded stream whose exact bit length is unknown
    ///
    /// Consumes every bit. An incomplete code at the end, or an unmatched
    /// run confined to the final padding-sized tail, is dropped as padding.
    /// Padding bits that happen to spell a valid code decode as extra
    /// trailing symbols; use [`decode`](Self::decode) or
    /// [`decode_symbols`](Self::decode_symbols) when the length is known.
    pub fn decode_padded(&self, data: &[u8]) -> Result<Vec<u8>> {
        let total_bits = data.len() * 8;
        let mut bits = BitReader::new(data);
        let mut output = Vec::with_capacity(data.len());

        loop {
            let start = bits.position();
            match self.next_symbol(&mut bits) {
                Ok(Some(symbol)) => output.push(symbol),
                Ok(None) | Err(Error::TruncatedCode(_)) => break,
                Err(Error::InvalidHuffmanCode(_)) if total_bits - start <= MAX_PADDING_BITS => {
                    break
                }
                Err(e) => return Err(e),
            }
        }

        Ok(output)
    }
}
