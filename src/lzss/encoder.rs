use super::config::{LzssConfig, LITERAL_BITS};
use super::matcher::find_duplicate;
use super::tokens::{Token, TokenSummary};
use crate::bits::BitWriter;
use crate::error::{Error, Result};

/// Greedy LZSS encoder
///
/// Each position either starts the longest available match or is emitted
/// as a literal. Tokens are packed as `1 distance length` or `0 byte`,
/// MSB-first, and the stream is zero-padded to a byte boundary.
pub struct LzssEncoder {
    config: LzssConfig,
}

impl LzssEncoder {
    pub fn new(config: LzssConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LzssConfig {
        &self.config
    }

    /// Split `data` into literal and match tokens
    pub fn tokenize(&self, data: &[u8]) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(data.len() / 2 + 1);
        let mut pos = 0;

        while pos < data.len() {
            match find_duplicate(data, pos, &self.config) {
                Some(m) => {
                    pos += m.length;
                    tokens.push(Token::Match(m));
                }
                None => {
                    tokens.push(Token::Literal(data[pos]));
                    pos += 1;
                }
            }
        }

        tokens
    }

    /// Pack tokens into the LZSS bitstream
    pub fn encode_tokens(&self, tokens: &[Token]) -> Result<Vec<u8>> {
        let bit_estimate: usize = tokens.iter().map(|t| t.encoded_bits(&self.config)).sum();
        let mut writer = BitWriter::with_capacity(bit_estimate.div_ceil(8));

        for token in tokens {
            match token {
                Token::Literal(byte) => {
                    writer.write_bit(false);
                    writer.write_bits(*byte as u64, LITERAL_BITS);
                }
                Token::Match(m) => {
                    let length_field = m
                        .length
                        .checked_sub(self.config.min_match)
                        .ok_or(Error::FieldOverflow {
                            field: "length",
                            value: m.length,
                            bits: self.config.length_bits,
                        })?;
                    check_field("distance", m.distance, self.config.distance_bits)?;
                    check_field("length", length_field, self.config.length_bits)?;

                    writer.write_bit(true);
                    writer.write_bits(m.distance as u64, self.config.distance_bits);
                    writer.write_bits(length_field as u64, self.config.length_bits);
                }
            }
        }

        Ok(writer.finish())
    }

    /// Encode `data` into a packed LZSS stream
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let tokens = self.tokenize(data);
        let encoded = self.encode_tokens(&tokens)?;

        if log::log_enabled!(log::Level::Debug) {
            let summary = TokenSummary::from_tokens(&tokens, &self.config);
            log::debug!(
                "lzss: {} bytes -> {} bytes ({} literals, {} matches covering {} bytes)",
                data.len(),
                encoded.len(),
                summary.literals,
                summary.matches,
                summary.matched_bytes
            );
        }

        Ok(encoded)
    }
}

impl Default for LzssEncoder {
    fn default() -> Self {
        Self { config: LzssConfig::default() }
    }
}

/// Reject values that would be silently truncated by a `bits`-wide field
#[inline]
fn check_field(field: &'static str, value: usize, bits: u8) -> Result<()> {
    if value >> bits != 0 {
        return Err(Error::FieldOverflow { field, value, bits });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lzss::tokens::Match;

    #[test]
    fn test_tokenize_repeat() {
        let encoder = LzssEncoder::default();
        let tokens = encoder.tokenize(b"abcabcabc");
        assert_eq!(
            tokens,
            vec![
                Token::Literal(b'a'),
                Token::Literal(b'b'),
                Token::Literal(b'c'),
                Token::Match(Match::new(3, 6)),
            ]
        );
    }

    #[test]
    fn test_encode_literal_layout() {
        let encoder = LzssEncoder::default();
        // 0 0110_0001 -> 0011_0000 1(pad 000_0000)
        assert_eq!(encoder.encode(b"a").unwrap(), vec![0x30, 0x80]);
    }

    #[test]
    fn test_encode_match_layout() {
        let encoder = LzssEncoder::default();
        let tokens = [Token::Match(Match::new(0x123, 7))];
        // 1 | 0001_0010_0011 | 0100 -> 1000_1001 0001_1010 0(pad)
        assert_eq!(encoder.encode_tokens(&tokens).unwrap(), vec![0x89, 0x1A, 0x00]);
    }

    #[test]
    fn test_encode_empty() {
        let encoder = LzssEncoder::default();
        assert!(encoder.encode(b"").unwrap().is_empty());
    }

    #[test]
    fn test_field_overflow() {
        let encoder = LzssEncoder::default();
        let too_far = [Token::Match(Match::new(4096, 3))];
        assert!(matches!(
            encoder.encode_tokens(&too_far),
            Err(Error::FieldOverflow { field: "distance", .. })
        ));

        let too_long = [Token::Match(Match::new(1, 19))];
        assert!(matches!(
            encoder.encode_tokens(&too_long),
            Err(Error::FieldOverflow { field: "length", .. })
        ));

        let too_short = [Token::Match(Match::new(1, 2))];
        assert!(encoder.encode_tokens(&too_short).is_err());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = LzssConfig { window_size: 1 << 13, ..Default::default() };
        assert!(LzssEncoder::new(config).is_err());
    }

    #[test]
    fn test_compresses_repetitive_input() {
        let data: Vec<u8> = b"ABCD".iter().cycle().take(4096).copied().collect();
        let encoded = LzssEncoder::default().encode(&data).unwrap();
        assert!(encoded.len() < data.len() / 4);
    }
}
