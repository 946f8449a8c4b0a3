use crate::error::{Error, Result};

/// Default sliding window size (addressable with 12 distance bits)
pub const DEFAULT_WINDOW_SIZE: usize = 4096;

/// Shortest run worth encoding as a match
pub const DEFAULT_MIN_MATCH: usize = 3;

/// Width of the distance field in a match token
pub const DEFAULT_DISTANCE_BITS: u8 = 12;

/// Width of the `length - min_match` field in a match token
pub const DEFAULT_LENGTH_BITS: u8 = 4;

/// Bits in a literal payload
pub const LITERAL_BITS: u8 = 8;

/// Smallest complete token: one flag bit plus a literal byte.
///
/// Anything shorter left at the end of a stream is padding.
pub const MIN_TOKEN_BITS: usize = 1 + LITERAL_BITS as usize;

/// LZSS parameters shared by the encoder and the decoder
///
/// The decoder only depends on `min_match`, `distance_bits` and `length_bits`;
/// `window_size` bounds how far back the encoder searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LzssConfig {
    /// Maximum backward distance the match finder may search
    pub window_size: usize,
    /// Minimum match length; shorter repeats are emitted as literals
    pub min_match: usize,
    /// Width of the distance field
    pub distance_bits: u8,
    /// Width of the length field
    pub length_bits: u8,
}

impl LzssConfig {
    /// Longest match the length field can express
    pub fn max_match(&self) -> usize {
        self.min_match + (1usize << self.length_bits) - 1
    }

    /// Largest distance the encoder will emit
    ///
    /// Bounded both by the window and by what the distance field can hold.
    pub fn max_distance(&self) -> usize {
        self.window_size.min((1usize << self.distance_bits) - 1)
    }

    /// Payload bits following a match flag
    pub fn match_bits(&self) -> u8 {
        self.distance_bits + self.length_bits
    }

    /// Check that every bound is representable in its bit field
    pub fn validate(&self) -> Result<()> {
        if self.min_match == 0 || self.min_match > u8::MAX as usize {
            return Err(Error::InvalidConfig(format!(
                "min_match must be in 1..=255, got {}",
                self.min_match
            )));
        }
        if !(1..=16).contains(&self.distance_bits) {
            return Err(Error::InvalidConfig(format!(
                "distance_bits must be in 1..=16, got {}",
                self.distance_bits
            )));
        }
        if !(1..=16).contains(&self.length_bits) {
            return Err(Error::InvalidConfig(format!(
                "length_bits must be in 1..=16, got {}",
                self.length_bits
            )));
        }
        // A match token must never be shorter than the padding at the end of a stream
        if (self.match_bits() as usize) < LITERAL_BITS as usize {
            return Err(Error::InvalidConfig(format!(
                "distance_bits + length_bits must be at least {}, got {}",
                LITERAL_BITS,
                self.match_bits()
            )));
        }
        if self.window_size == 0 || self.window_size > 1usize << self.distance_bits {
            return Err(Error::InvalidConfig(format!(
                "window_size must be in 1..={} for {} distance bits, got {}",
                1usize << self.distance_bits,
                self.distance_bits,
                self.window_size
            )));
        }
        Ok(())
    }
}

impl Default for LzssConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            min_match: DEFAULT_MIN_MATCH,
            distance_bits: DEFAULT_DISTANCE_BITS,
            length_bits: DEFAULT_LENGTH_BITS,
        }
    }
}
