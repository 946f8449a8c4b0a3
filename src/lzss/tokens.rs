use super::config::{LzssConfig, LITERAL_BITS};

/// A back-reference found by the match finder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    /// How far back the source run starts (1 = previous byte)
    pub distance: usize,
    /// Number of bytes to copy
    pub length: usize,
}

impl Match {
    pub fn new(distance: usize, length: usize) -> Self {
        Self { distance, length }
    }
}

impl From<(usize, usize)> for Match {
    fn from((distance, length): (usize, usize)) -> Self {
        Self { distance, length }
    }
}

/// Represents a single token in the LZSS stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// A literal byte
    Literal(u8),
    /// A back-reference: copy `length` bytes from `distance` bytes back
    Match(Match),
}

impl Token {
    /// Returns the uncompressed size this token represents
    pub fn uncompressed_size(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Match(m) => m.length,
        }
    }

    /// Number of bits this token occupies in the packed stream, flag included
    pub fn encoded_bits(&self, config: &LzssConfig) -> usize {
        1 + match self {
            Token::Literal(_) => LITERAL_BITS as usize,
            Token::Match(_) => config.match_bits() as usize,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Token::Match(_))
    }
}

/// Token counts for one encoded stream
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenSummary {
    pub literals: u64,
    pub matches: u64,
    /// Bytes covered by matches
    pub matched_bytes: u64,
    /// Packed size in bits, padding excluded
    pub bit_len: u64,
}

impl TokenSummary {
    pub fn from_tokens(tokens: &[Token], config: &LzssConfig) -> Self {
        let mut summary = Self::default();
        for token in tokens {
            match token {
                Token::Literal(_) => summary.literals += 1,
                Token::Match(m) => {
                    summary.matches += 1;
                    summary.matched_bytes += m.length as u64;
                }
            }
            summary.bit_len += token.encoded_bits(config) as u64;
        }
        summary
    }

    /// Total uncompressed bytes represented by the tokens
    pub fn uncompressed_size(&self) -> u64 {
        self.literals + self.matched_bytes
    }
}
