#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Malformed streams must fail cleanly, never panic
    if let Ok(tokens) = lzhuff::lzss::LzssDecoder::default().parse_tokens(data) {
        let _ = lzhuff::lzss::decode(data);
        assert!(tokens.len() <= data.len() * 8 / 9);
    }
});
