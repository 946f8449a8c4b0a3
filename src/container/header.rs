use super::constants::*;
use crate::error::{Error, Result};
use crate::Method;
use std::io::Read;

/// Parsed frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub method: Method,
    /// Length of the original (uncompressed) data
    pub original_len: u64,
    /// CRC32 of the original data
    pub crc32: u32,
}

impl FrameHeader {
    pub fn new(method: Method, original: &[u8]) -> Self {
        Self { method, original_len: original.len() as u64, crc32: crc32fast::hash(original) }
    }

    /// Parse a frame header from a reader
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; FRAME_HEADER_SIZE];
        reader.read_exact(&mut buf).map_err(|_| Error::UnexpectedEof)?;

        let magic = [buf[0], buf[1], buf[2], buf[3]];
        if magic != FRAME_MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        let version = buf[4];
        if version != FRAME_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }

        let method = Method::from_id(buf[5]).ok_or(Error::UnsupportedMethod(buf[5]))?;

        let mut len_bytes = [0u8; 8];
        len_bytes.copy_from_slice(&buf[6..14]);
        let original_len = u64::from_le_bytes(len_bytes);
        let crc32 = u32::from_le_bytes([buf[14], buf[15], buf[16], buf[17]]);

        Ok(Self { method, original_len, crc32 })
    }

    /// Append the 18-byte header to `out`
    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&FRAME_MAGIC);
        out.push(FRAME_VERSION);
        out.push(self.method.id());
        out.extend_from_slice(&self.original_len.to_le_bytes());
        out.extend_from_slice(&self.crc32.to_le_bytes());
    }

    /// Check `data` against the recorded length and checksum
    pub fn verify(&self, data: &[u8]) -> Result<()> {
        if data.len() as u64 != self.original_len {
            return Err(Error::SizeMismatch {
                expected: self.original_len,
                found: data.len() as u64,
            });
        }
        let found = crc32fast::hash(data);
        if found != self.crc32 {
            return Err(Error::ChecksumMismatch { expected: self.crc32, found });
        }
        Ok(())
    }
}

/// Quick check for the frame magic
pub fn is_framed(data: &[u8]) -> bool {
    data.len() >= FRAME_HEADER_SIZE && data[..4] == FRAME_MAGIC
}
