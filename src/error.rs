use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Value {value} does not fit in a {bits}-bit {field} field")]
    FieldOverflow { field: &'static str, value: usize, bits: u8 },

    // LZSS stream errors
    #[error("Back-reference distance {distance} exceeds available output {available}")]
    InvalidBackReference { distance: usize, available: usize },

    // Huffman errors
    #[error("Invalid codebook: {0}")]
    InvalidCodebook(String),

    #[error("Symbol 0x{0:02x} has no code in the codebook")]
    MissingSymbol(u8),

    #[error("No codebook entry matches bit sequence of length {0}")]
    InvalidHuffmanCode(usize),

    #[error("Bitstream ends inside a code ({0} dangling bits)")]
    TruncatedCode(usize),

    // Container errors
    #[error("Invalid container magic: expected \"LZHF\", got {0:02x?}")]
    InvalidMagic([u8; 4]),

    #[error("Unsupported container version: {0}")]
    UnsupportedVersion(u8),

    #[error("Unsupported compression method: {0}")]
    UnsupportedMethod(u8),

    #[error("CRC32 mismatch: expected 0x{expected:08x}, got 0x{found:08x}")]
    ChecksumMismatch { expected: u32, found: u32 },

    #[error("Size mismatch: expected {expected} bytes, got {found}")]
    SizeMismatch { expected: u64, found: u64 },

    // Internal errors
    #[error("Unexpected end of input")]
    UnexpectedEof,
}

pub type Result<T> = std::result::Result<T, Error>;
