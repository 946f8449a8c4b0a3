/// Magic bytes at the start of every frame
pub const FRAME_MAGIC: [u8; 4] = *b"LZHF";

/// Current frame format version
pub const FRAME_VERSION: u8 = 1;

/// Fixed header size: magic, version, method, original length, CRC32
pub const FRAME_HEADER_SIZE: usize = 18;

/// Size of the LZSS parameter block (distance bits, length bits, min match)
pub const LZSS_PARAMS_SIZE: usize = 3;

/// Largest number of codebook entries (one per byte value)
pub const MAX_CODEBOOK_ENTRIES: usize = 256;
