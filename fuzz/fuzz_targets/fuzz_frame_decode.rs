#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Give the header a chance so the body parsers get exercised
    let mut frame = b"LZHF\x01".to_vec();
    frame.extend_from_slice(data);

    let _ = lzhuff::decompress(data);
    let _ = lzhuff::decompress(&frame);
});
