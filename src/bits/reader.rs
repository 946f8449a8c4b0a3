use crate::error::{Error, Result};

/// Bit-level reader over an in-memory buffer
///
/// Reads bits MSB-first, mirroring [`BitWriter`](super::BitWriter).
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Index of the next bit to read (0 = MSB of data[0])
    position: usize,
    /// Bits that may be read; trailing bits past this are ignored
    limit: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0, limit: data.len() * 8 }
    }

    /// Restrict reading to the first `bit_len` bits of `data`
    ///
    /// Fails if `bit_len` points past the end of the buffer.
    pub fn with_bit_len(data: &'a [u8], bit_len: usize) -> Result<Self> {
        if bit_len > data.len() * 8 {
            return Err(Error::UnexpectedEof);
        }
        Ok(Self { data, position: 0, limit: bit_len })
    }

    /// Read `n` bits (0-64) as an unsigned value, MSB-first
    pub fn read_bits(&mut self, n: u8) -> Result<u64> {
        debug_assert!(n <= 64, "Cannot read more than 64 bits at once");

        if (n as usize) > self.remaining() {
            return Err(Error::UnexpectedEof);
        }

        let mut result = 0u64;
        let mut remaining = n;
        while remaining > 0 {
            let byte = self.data[self.position / 8];
            let bit_offset = (self.position % 8) as u8;
            let available = 8 - bit_offset;
            let to_read = remaining.min(available);

            let shift = available - to_read;
            let mask = ((1u16 << to_read) - 1) as u8;
            let chunk = (byte >> shift) & mask;

            result = (result << to_read) | chunk as u64;

            self.position += to_read as usize;
            remaining -= to_read;
        }

        Ok(result)
    }

    /// Read a single bit
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Read 8 bits as a byte
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        self.read_bits(8).map(|v| v as u8)
    }

    /// Number of unread bits before the limit
    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Number of bits consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether all readable bits have been consumed
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bits() {
        // Binary: 11010011 10101010 = 0xD3 0xAA
        let data = [0xD3, 0xAA];
        let mut reader = BitReader::new(&data);

        // MSB first: 110 then 10011
        assert_eq!(reader.read_bits(3).unwrap(), 0b110);
        assert_eq!(reader.read_bits(5).unwrap(), 0b10011);
        assert_eq!(reader.read_bits(8).unwrap(), 0xAA);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_read_bit() {
        let data = [0b10110001];
        let mut reader = BitReader::new(&data);

        let bits: Vec<bool> = (0..8).map(|_| reader.read_bit().unwrap()).collect();
        assert_eq!(bits, vec![true, false, true, true, false, false, false, true]);
    }

    #[test]
    fn test_cross_byte_boundary() {
        let data = [0xAB, 0xCD];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(4).unwrap(), 0xA);
        assert_eq!(reader.read_bits(12).unwrap(), 0xBCD);
    }

    #[test]
    fn test_read_64_bits() {
        let data = [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(64).unwrap(), 0x0123_4567_89AB_CDEF);
    }

    #[test]
    fn test_eof() {
        let data = [0xFF];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(6).unwrap(), 0b111111);
        assert!(matches!(reader.read_bits(3), Err(Error::UnexpectedEof)));
        // A failed read consumes nothing
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn test_bit_len_limit() {
        let data = [0xFF, 0xFF];
        let mut reader = BitReader::with_bit_len(&data, 10).unwrap();
        assert_eq!(reader.remaining(), 10);
        reader.read_bits(8).unwrap();
        assert_eq!(reader.position(), 8);
        assert!(reader.read_bits(3).is_err());

        assert!(BitReader::with_bit_len(&data, 17).is_err());
    }
}
