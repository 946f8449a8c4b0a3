//! Self-describing frame around the raw LZSS and Huffman streams.
//!
//! The raw formats are zero-padded to a byte and carry no lengths, so a
//! Huffman stream cannot be told apart from its padding. A frame records
//! the original length, a CRC32 of the original bytes and, for Huffman,
//! the codebook and symbol count.

pub mod constants;
pub mod header;
pub mod sections;

pub use constants::*;
pub use header::{is_framed, FrameHeader};

use crate::error::{Error, Result};
use crate::huffman::{self, HuffmanDecoder, HuffmanEncoded};
use crate::lzss::{LzssDecoder, LzssEncoder, TokenSummary};
use crate::{CompressConfig, CompressStats, Method};
use sections::{read_huffman_section, read_lzss_params, write_huffman_section, write_lzss_params};

/// Compress `data` into a frame
pub fn compress(data: &[u8], config: &CompressConfig) -> Result<(Vec<u8>, CompressStats)> {
    let header = FrameHeader::new(config.method, data);
    let mut out = Vec::with_capacity(FRAME_HEADER_SIZE + data.len() / 2);
    header.write(&mut out);

    let mut stats = CompressStats {
        input_bytes: data.len() as u64,
        method: config.method,
        ..Default::default()
    };

    match config.method {
        Method::Lzss => {
            let encoder = LzssEncoder::new(config.lzss)?;
            let tokens = encoder.tokenize(data);
            stats.lzss = Some(TokenSummary::from_tokens(&tokens, &config.lzss));
            write_lzss_params(&mut out, &config.lzss);
            out.extend_from_slice(&encoder.encode_tokens(&tokens)?);
        }
        Method::Huffman => {
            let encoded = huffman::encode(data)?;
            record_huffman(&mut stats, &encoded);
            write_huffman_section(&mut out, &encoded);
        }
        Method::LzssHuffman => {
            let encoder = LzssEncoder::new(config.lzss)?;
            let tokens = encoder.tokenize(data);
            stats.lzss = Some(TokenSummary::from_tokens(&tokens, &config.lzss));
            let packed = encoder.encode_tokens(&tokens)?;

            let encoded = huffman::encode(&packed)?;
            record_huffman(&mut stats, &encoded);
            write_lzss_params(&mut out, &config.lzss);
            write_huffman_section(&mut out, &encoded);
        }
    }

    if let Some(summary) = &stats.lzss {
        log::trace!(
            "frame: {} literals, {} matches, {} lzss bits",
            summary.literals,
            summary.matches,
            summary.bit_len
        );
    }

    stats.output_bytes = out.len() as u64;
    log::debug!(
        "frame: {} -> {} bytes using {}",
        stats.input_bytes,
        stats.output_bytes,
        config.method.name()
    );
    Ok((out, stats))
}

fn record_huffman(stats: &mut CompressStats, encoded: &HuffmanEncoded) {
    stats.huffman_bits = Some(encoded.bit_len as u64);
    stats.distinct_symbols = Some(encoded.codebook.len());
}

/// Decompress a frame, verifying its length and checksum
pub fn decompress(frame: &[u8]) -> Result<Vec<u8>> {
    let mut reader = frame;
    let header = FrameHeader::parse(&mut reader)?;

    let data = match header.method {
        Method::Lzss => {
            let config = read_lzss_params(&mut reader)?;
            LzssDecoder::new(config)?.decode(reader)?
        }
        Method::Huffman => decode_huffman_section(reader)?,
        Method::LzssHuffman => {
            let config = read_lzss_params(&mut reader)?;
            let packed = decode_huffman_section(reader)?;
            LzssDecoder::new(config)?.decode(&packed)?
        }
    };

    header.verify(&data)?;
    log::debug!("frame: {} -> {} bytes using {}", frame.len(), data.len(), header.method.name());
    Ok(data)
}

fn decode_huffman_section(body: &[u8]) -> Result<Vec<u8>> {
    let section = read_huffman_section(body)?;

    // Every code is at least one bit, which bounds a believable count
    let max_symbols = section.payload.len() as u64 * 8;
    if section.symbol_count > max_symbols {
        return Err(Error::UnexpectedEof);
    }

    HuffmanDecoder::new(&section.codebook)
        .decode_symbols(section.payload, section.symbol_count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lzss::LzssConfig;

    fn config(method: Method) -> CompressConfig {
        CompressConfig { method, ..Default::default() }
    }

    const METHODS: [Method; 3] = [Method::Lzss, Method::Huffman, Method::LzssHuffman];

    #[test]
    fn test_roundtrip_all_methods() {
        let data = b"this is an example for huffman encoding, this is an example".to_vec();
        for method in METHODS {
            let (frame, stats) = compress(&data, &config(method)).unwrap();
            assert!(is_framed(&frame));
            assert_eq!(stats.output_bytes, frame.len() as u64);
            assert_eq!(decompress(&frame).unwrap(), data, "method {:?}", method);
        }
    }

    #[test]
    fn test_roundtrip_degenerate_inputs() {
        for data in [&b""[..], b"a", b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", b"ab"] {
            for method in METHODS {
                let (frame, _) = compress(data, &config(method)).unwrap();
                assert_eq!(decompress(&frame).unwrap(), data, "method {:?}", method);
            }
        }
    }

    #[test]
    fn test_huffman_padding_not_decoded() {
        // One distinct symbol: codes are "0", so padding zeros look like data
        let data = b"zzz";
        let (frame, stats) = compress(data, &config(Method::Huffman)).unwrap();
        assert_eq!(stats.huffman_bits, Some(3));
        assert_eq!(stats.distinct_symbols, Some(1));
        assert_eq!(decompress(&frame).unwrap(), data);
    }

    #[test]
    fn test_custom_lzss_params_travel_with_frame() {
        let data = b"abababababababababababab".repeat(4);
        let lzss = LzssConfig { min_match: 2, window_size: 256, distance_bits: 8, length_bits: 6 };
        let cfg = CompressConfig { method: Method::LzssHuffman, lzss };
        let (frame, stats) = compress(&data, &cfg).unwrap();
        assert!(stats.lzss.unwrap().matches > 0);
        assert_eq!(decompress(&frame).unwrap(), data);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let lzss = LzssConfig { min_match: 0, ..Default::default() };
        let cfg = CompressConfig { method: Method::Lzss, lzss };
        assert!(matches!(compress(b"abc", &cfg), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_checksum_detects_corruption() {
        let data = b"the quick brown fox jumps over the lazy dog".to_vec();
        let (mut frame, _) = compress(&data, &config(Method::Lzss)).unwrap();
        // Flip one bit of the recorded CRC
        frame[14] ^= 0x01;
        assert!(matches!(decompress(&frame), Err(Error::ChecksumMismatch { .. })));
    }

    #[test]
    fn test_length_mismatch_detected() {
        let data = b"hello hello hello".to_vec();
        let (mut frame, _) = compress(&data, &config(Method::Huffman)).unwrap();
        frame[6] = frame[6].wrapping_add(1);
        assert!(matches!(decompress(&frame), Err(Error::SizeMismatch { .. })));
    }

    #[test]
    fn test_truncated_frames_fail() {
        let data = b"abracadabra abracadabra abracadabra".to_vec();
        for method in METHODS {
            let (frame, _) = compress(&data, &config(method)).unwrap();
            for cut in 0..frame.len() {
                assert!(decompress(&frame[..cut]).is_err(), "{:?} cut at {}", method, cut);
            }
        }
    }

    #[test]
    fn test_absurd_symbol_count_rejected() {
        let (mut frame, _) = compress(b"abc", &config(Method::Huffman)).unwrap();
        // symbol_count sits just before the payload; saturate its high byte
        let payload_len = 1;
        let high = frame.len() - payload_len - 1;
        frame[high] = 0xFF;
        assert!(matches!(decompress(&frame), Err(Error::UnexpectedEof)));
    }
}
