#![no_main]

use libfuzzer_sys::fuzz_target;
use lzhuff::{compress, decompress, CompressConfig, Method};

fuzz_target!(|data: &[u8]| {
    for method in [Method::Lzss, Method::Huffman, Method::LzssHuffman] {
        let config = CompressConfig { method, ..Default::default() };
        let (frame, _) = compress(data, &config).expect("compress failed");
        let restored = decompress(&frame).expect("decompress failed");
        assert_eq!(restored, data, "roundtrip mismatch for {}", method);
    }
});
