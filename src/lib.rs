//! Two-stage lossless compression: LZSS dictionary coding followed by
//! static Huffman coding.
//!
//! The stages can be used on their own ([`lzss`], [`huffman`]) or chained
//! through the framed [`container`] via [`compress`] and [`decompress`].

pub mod bits;
pub mod container;
pub mod error;
pub mod huffman;
pub mod lzss;
pub mod stats;

pub use container::{compress, decompress, is_framed};
pub use error::{Error, Result};
pub use huffman::{Code, Codebook};
pub use lzss::{LzssConfig, Token, TokenSummary};

use std::fmt;
use std::io::{Read, Write};

/// Coding pipeline stored in a frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Method {
    /// LZSS only
    Lzss = 0,
    /// Huffman only
    Huffman = 1,
    /// LZSS, then Huffman over the packed LZSS stream
    #[default]
    LzssHuffman = 2,
}

impl Method {
    /// Identifier written into the frame header
    pub fn id(&self) -> u8 {
        *self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Lzss),
            1 => Some(Self::Huffman),
            2 => Some(Self::LzssHuffman),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Lzss => "lzss",
            Self::Huffman => "huffman",
            Self::LzssHuffman => "lzss-huffman",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "lzss" => Some(Self::Lzss),
            "huffman" => Some(Self::Huffman),
            "lzss-huffman" | "lzss+huffman" => Some(Self::LzssHuffman),
            _ => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for framed compression
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompressConfig {
    pub method: Method,
    /// LZSS parameters, ignored by [`Method::Huffman`]
    pub lzss: LzssConfig,
}

/// Statistics from a compression run
#[derive(Clone, Debug, Default)]
pub struct CompressStats {
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub method: Method,
    /// Token counts when the LZSS stage ran
    pub lzss: Option<TokenSummary>,
    /// Meaningful Huffman bits when the Huffman stage ran
    pub huffman_bits: Option<u64>,
    /// Distinct symbols seen by the Huffman stage
    pub distinct_symbols: Option<usize>,
}

impl CompressStats {
    /// Input size divided by output size
    pub fn ratio(&self) -> f64 {
        stats::compression_ratio(self.input_bytes, self.output_bytes)
    }
}

/// Read all of `input`, compress it into a frame and write it to `output`
pub fn compress_stream<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    config: &CompressConfig,
) -> Result<CompressStats> {
    let mut data = Vec::new();
    input.read_to_end(&mut data)?;
    let (frame, stats) = compress(&data, config)?;
    output.write_all(&frame)?;
    output.flush()?;
    Ok(stats)
}

/// Read a whole frame from `input` and write the original bytes to `output`
///
/// Returns the number of bytes written.
pub fn decompress_stream<R: Read, W: Write>(mut input: R, mut output: W) -> Result<u64> {
    let mut frame = Vec::new();
    input.read_to_end(&mut frame)?;
    let data = decompress(&frame)?;
    output.write_all(&data)?;
    output.flush()?;
    Ok(data.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_ids() {
        for method in [Method::Lzss, Method::Huffman, Method::LzssHuffman] {
            assert_eq!(Method::from_id(method.id()), Some(method));
            assert_eq!(Method::from_name(method.name()), Some(method));
        }
        assert_eq!(Method::from_id(3), None);
        assert_eq!(Method::from_name("deflate"), None);
        assert_eq!(Method::from_name("LZSS+Huffman"), Some(Method::LzssHuffman));
        assert_eq!(Method::default(), Method::LzssHuffman);
    }

    #[test]
    fn test_stream_roundtrip() {
        let data = b"stream me, stream me, stream me again".to_vec();
        let mut frame = Vec::new();
        let stats =
            compress_stream(data.as_slice(), &mut frame, &CompressConfig::default()).unwrap();
        assert_eq!(stats.input_bytes, data.len() as u64);
        assert_eq!(stats.output_bytes, frame.len() as u64);
        let expected = data.len() as f64 / frame.len() as f64;
        assert!((stats.ratio() - expected).abs() < 1e-9);

        let mut restored = Vec::new();
        let written = decompress_stream(frame.as_slice(), &mut restored).unwrap();
        assert_eq!(written, data.len() as u64);
        assert_eq!(restored, data);
    }
}
