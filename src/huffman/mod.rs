//! Static Huffman coding.
//!
//! A fresh tree is built for every input from its byte frequencies; the
//! tree is only used to derive a [`Codebook`] and then dropped. The packed
//! bitstream carries no table, so the codebook has to travel with it
//! (see [`Codebook::to_sidecar`] and the framed container).

pub mod codebook;
pub mod decoder;
pub mod encoder;
pub mod tree;

pub use codebook::{Code, Codebook, MAX_CODE_LENGTH};
pub use decoder::HuffmanDecoder;
pub use encoder::{HuffmanEncoded, HuffmanEncoder};
pub use tree::{FrequencyTable, HuffmanTree, Node};

use crate::error::Result;

/// Encode `data` with a codebook built from its own frequencies
pub fn encode(data: &[u8]) -> Result<HuffmanEncoded> {
    HuffmanEncoder::for_data(data).encode(data)
}

/// Decode the first `bit_len` bits of `data` with `codebook`
pub fn decode(data: &[u8], bit_len: usize, codebook: &Codebook) -> Result<Vec<u8>> {
    HuffmanDecoder::new(codebook).decode(data, bit_len)
}
