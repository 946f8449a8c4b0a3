//! LZSS dictionary coding.
//!
//! The packed stream is a sequence of tokens with no header:
//!
//! ```text
//! literal: 0 <8-bit byte>
//! match:   1 <distance_bits distance> <length_bits (length - min_match)>
//! ```
//!
//! Bits are MSB-first and the stream is zero-padded to a whole byte. With
//! the default 12/4 split, the 16 match payload bits are a high byte of
//! `distance >> 4` followed by `(distance & 0xF) << 4 | (length - 3)`.

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod matcher;
pub mod tokens;
pub mod window;

pub use config::LzssConfig;
pub use decoder::{LzssDecoder, TokenParser};
pub use encoder::LzssEncoder;
pub use matcher::find_duplicate;
pub use tokens::{Match, Token, TokenSummary};
pub use window::extract_repeat;

use crate::error::Result;

/// Encode `data` with the default parameters
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    LzssEncoder::default().encode(data)
}

/// Decode a stream produced with the default parameters
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    LzssDecoder::default().decode(data)
}
