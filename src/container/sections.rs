use super::constants::*;
use crate::bits::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::huffman::{Code, Codebook, HuffmanEncoded};
use crate::lzss::LzssConfig;
use std::io::Read;

/// Append the LZSS parameters the decoder needs
pub fn write_lzss_params(out: &mut Vec<u8>, config: &LzssConfig) {
    out.push(config.distance_bits);
    out.push(config.length_bits);
    // validate() bounds min_match to a byte
    out.push(config.min_match as u8);
}

/// Read LZSS parameters
///
/// The window size is an encoder-side limit, so the widest window the
/// distance field allows is reported.
pub fn read_lzss_params<R: Read>(reader: &mut R) -> Result<LzssConfig> {
    let mut buf = [0u8; LZSS_PARAMS_SIZE];
    reader.read_exact(&mut buf).map_err(|_| Error::UnexpectedEof)?;

    let distance_bits = buf[0];
    let config = LzssConfig {
        // Checked by validate() before the shift can matter
        window_size: 1usize << distance_bits.min(16),
        min_match: buf[2] as usize,
        distance_bits,
        length_bits: buf[1],
    };
    config.validate()?;
    Ok(config)
}

/// Append a codebook table, symbol count and packed bits
///
/// ```text
/// entry_count u16 LE
/// entry_count x { symbol u8, code_len u8, code bytes (ceil(code_len / 8), MSB-first) }
/// symbol_count u64 LE
/// packed code bits
/// ```
pub fn write_huffman_section(out: &mut Vec<u8>, encoded: &HuffmanEncoded) {
    out.extend_from_slice(&(encoded.codebook.len() as u16).to_le_bytes());
    for (symbol, code) in encoded.codebook.iter() {
        out.push(symbol);
        out.push(code.len());
        let mut writer = BitWriter::with_capacity(8);
        writer.write_bits(code.bits(), code.len());
        out.extend_from_slice(&writer.finish());
    }
    out.extend_from_slice(&(encoded.symbol_count as u64).to_le_bytes());
    out.extend_from_slice(&encoded.data);
}

/// A parsed Huffman section
#[derive(Debug)]
pub struct HuffmanSection<'a> {
    pub codebook: Codebook,
    pub symbol_count: u64,
    /// Packed code bits
    pub payload: &'a [u8],
}

/// Parse a Huffman section occupying the rest of `data`
pub fn read_huffman_section(data: &[u8]) -> Result<HuffmanSection<'_>> {
    let mut reader = data;

    let mut count_buf = [0u8; 2];
    reader.read_exact(&mut count_buf).map_err(|_| Error::UnexpectedEof)?;
    let entry_count = u16::from_le_bytes(count_buf) as usize;
    if entry_count > MAX_CODEBOOK_ENTRIES {
        return Err(Error::InvalidCodebook(format!("{} entries in codebook table", entry_count)));
    }

    let mut entries = Vec::with_capacity(entry_count);
    for _ in 0..entry_count {
        let mut entry = [0u8; 2];
        reader.read_exact(&mut entry).map_err(|_| Error::UnexpectedEof)?;
        let (symbol, code_len) = (entry[0], entry[1]);

        let code_bytes = (code_len as usize).div_ceil(8);
        if reader.len() < code_bytes {
            return Err(Error::UnexpectedEof);
        }
        let (code_data, rest) = reader.split_at(code_bytes);
        reader = rest;

        let bits = BitReader::new(code_data).read_bits(code_len.min(64))?;
        entries.push((symbol, Code::new(bits, code_len)?));
    }
    let codebook = Codebook::from_entries(entries)?;

    let mut symbol_buf = [0u8; 8];
    reader.read_exact(&mut symbol_buf).map_err(|_| Error::UnexpectedEof)?;
    let symbol_count = u64::from_le_bytes(symbol_buf);

    Ok(HuffmanSection { codebook, symbol_count, payload: reader })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman;

    #[test]
    fn test_lzss_params_roundtrip() {
        let config = LzssConfig { min_match: 2, ..Default::default() };
        let mut out = Vec::new();
        write_lzss_params(&mut out, &config);
        assert_eq!(out, vec![12, 4, 2]);

        let parsed = read_lzss_params(&mut out.as_slice()).unwrap();
        assert_eq!(parsed.min_match, 2);
        assert_eq!(parsed.distance_bits, 12);
        assert_eq!(parsed.length_bits, 4);
        assert_eq!(parsed.window_size, 4096);
    }

    #[test]
    fn test_lzss_params_invalid() {
        assert!(read_lzss_params(&mut &[0u8, 4, 3][..]).is_err());
        assert!(read_lzss_params(&mut &[12u8, 4, 0][..]).is_err());
        assert!(read_lzss_params(&mut &[200u8, 4, 3][..]).is_err());
        assert!(matches!(read_lzss_params(&mut &[12u8][..]), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn test_huffman_section_roundtrip() {
        let data = b"this is an example for huffman encoding";
        let encoded = huffman::encode(data).unwrap();
        let mut out = Vec::new();
        write_huffman_section(&mut out, &encoded);

        let section = read_huffman_section(&out).unwrap();
        assert_eq!(section.codebook, encoded.codebook);
        assert_eq!(section.symbol_count, data.len() as u64);
        assert_eq!(section.payload, encoded.data.as_slice());
    }

    #[test]
    fn test_huffman_section_empty() {
        let encoded = huffman::encode(b"").unwrap();
        let mut out = Vec::new();
        write_huffman_section(&mut out, &encoded);
        assert_eq!(out.len(), 2 + 8);

        let section = read_huffman_section(&out).unwrap();
        assert!(section.codebook.is_empty());
        assert_eq!(section.symbol_count, 0);
        assert!(section.payload.is_empty());
    }

    #[test]
    fn test_huffman_section_truncated() {
        let encoded = huffman::encode(b"abcabc").unwrap();
        let mut out = Vec::new();
        write_huffman_section(&mut out, &encoded);

        for cut in [1, 3, 5, out.len() - encoded.data.len() - 1] {
            assert!(read_huffman_section(&out[..cut]).is_err(), "cut at {}", cut);
        }
    }

    #[test]
    fn test_huffman_section_rejects_bad_codebook() {
        // Two entries: symbol 1 -> "1", symbol 2 -> "1" (duplicate code)
        let bytes = [2, 0, 1, 1, 0x80, 2, 1, 0x80, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(read_huffman_section(&bytes), Err(Error::InvalidCodebook(_))));
    }
}
