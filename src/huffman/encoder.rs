use super::codebook::Codebook;
use super::tree::FrequencyTable;
use crate::bits::BitWriter;
use crate::error::{Error, Result};

/// Output of a Huffman encoding pass
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanEncoded {
    /// Packed code bits, zero-padded to a whole byte
    pub data: Vec<u8>,
    /// Meaningful bits in `data` (the rest is padding)
    pub bit_len: usize,
    /// Number of symbols encoded
    pub symbol_count: usize,
    /// Codebook needed to decode `data`
    pub codebook: Codebook,
}

/// Static Huffman encoder bound to one codebook
pub struct HuffmanEncoder {
    codebook: Codebook,
}

impl HuffmanEncoder {
    pub fn new(codebook: Codebook) -> Self {
        Self { codebook }
    }

    /// Build the optimal codebook for `data`
    pub fn for_data(data: &[u8]) -> Self {
        Self::new(Codebook::from_data(data))
    }

    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    /// Append each symbol's code in input order and pad to a byte
    ///
    /// Returns the packed bytes and the number of meaningful bits.
    pub fn encode_bits(&self, data: &[u8]) -> Result<(Vec<u8>, usize)> {
        let freqs = FrequencyTable::from_data(data);
        let bit_len = self.codebook.encoded_bit_len(&freqs)? as usize;

        let mut writer = BitWriter::with_capacity(bit_len.div_ceil(8));
        for &symbol in data {
            let code = self.codebook.code(symbol).ok_or(Error::MissingSymbol(symbol))?;
            writer.write_bits(code.bits(), code.len());
        }
        debug_assert_eq!(writer.bit_len(), bit_len);

        Ok((writer.finish(), bit_len))
    }

    /// Encode `data`, returning the bits together with the codebook
    pub fn encode(self, data: &[u8]) -> Result<HuffmanEncoded> {
        let (encoded, bit_len) = self.encode_bits(data)?;

        log::debug!(
            "huffman: {} symbols ({} distinct) -> {} bits in {} bytes",
            data.len(),
            self.codebook.len(),
            bit_len,
            encoded.len()
        );

        Ok(HuffmanEncoded {
            data: encoded,
            bit_len,
            symbol_count: data.len(),
            codebook: self.codebook,
        })
    }
}
