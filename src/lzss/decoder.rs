use super::config::{LzssConfig, MIN_TOKEN_BITS};
use super::tokens::{Match, Token};
use super::window::copy_back;
use crate::bits::BitReader;
use crate::error::{Error, Result};

/// Parses tokens out of a packed LZSS stream
///
/// Yields tokens while at least one complete literal's worth of bits
/// remains; a shorter tail is the zero padding written by the encoder.
pub struct TokenParser<'a> {
    bits: BitReader<'a>,
    config: LzssConfig,
    /// Set after an error so iteration stops
    failed: bool,
}

impl<'a> TokenParser<'a> {
    pub fn new(data: &'a [u8], config: LzssConfig) -> Self {
        Self { bits: BitReader::new(data), config, failed: false }
    }

    fn parse_token(&mut self) -> Result<Token> {
        let is_match = self.bits.read_bit()?;
        if !is_match {
            return Ok(Token::Literal(self.bits.read_byte()?));
        }

        let distance = self.bits.read_bits(self.config.distance_bits)? as usize;
        let length_field = self.bits.read_bits(self.config.length_bits)? as usize;
        Ok(Token::Match(Match::new(distance, length_field + self.config.min_match)))
    }
}

impl Iterator for TokenParser<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.bits.remaining() < MIN_TOKEN_BITS {
            return None;
        }
        let token = self.parse_token();
        self.failed = token.is_err();
        Some(token)
    }
}

/// LZSS decoder: the exact inverse of [`LzssEncoder`](super::LzssEncoder)
pub struct LzssDecoder {
    config: LzssConfig,
}

impl LzssDecoder {
    pub fn new(config: LzssConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Parse the token sequence without reconstructing bytes
    pub fn parse_tokens(&self, data: &[u8]) -> Result<Vec<Token>> {
        TokenParser::new(data, self.config).collect()
    }

    /// Decode a packed LZSS stream back into the original bytes
    ///
    /// A match whose distance reaches before the start of the output, or a
    /// match token cut short by the end of the stream, is a format error.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(data.len() * 2);
        let mut tokens = 0u64;

        for token in TokenParser::new(data, self.config) {
            match token? {
                Token::Literal(byte) => output.push(byte),
                Token::Match(m) => copy_back(&mut output, m.distance, m.length)?,
            }
            tokens += 1;
        }

        log::debug!("lzss: decoded {} tokens into {} bytes", tokens, output.len());
        Ok(output)
    }

    /// Decode and verify the output has exactly `expected_len` bytes
    pub fn decode_exact(&self, data: &[u8], expected_len: usize) -> Result<Vec<u8>> {
        let output = self.decode(data)?;
        if output.len() != expected_len {
            return Err(Error::SizeMismatch {
                expected: expected_len as u64,
                found: output.len() as u64,
            });
        }
        Ok(output)
    }
}

impl Default for LzssDecoder {
    fn default() -> Self {
        Self { config: LzssConfig::default() }
    }
}
