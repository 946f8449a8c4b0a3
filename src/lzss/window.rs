use crate::error::{Error, Result};

/// Append `length` bytes copied from `distance` bytes before the end of `output`.
///
/// Bytes are copied one at a time, so when `distance < length` the freshly
/// appended bytes become the source for the rest of the copy and the
/// pattern repeats.
#[inline]
pub fn copy_back(output: &mut Vec<u8>, distance: usize, length: usize) -> Result<()> {
    if distance == 0 || distance > output.len() {
        return Err(Error::InvalidBackReference { distance, available: output.len() });
    }

    output.reserve(length);
    let start = output.len() - distance;
    if length <= distance {
        // No overlap: the source run is already complete
        output.extend_from_within(start..start + length);
    } else {
        for i in 0..length {
            let byte = output[start + i];
            output.push(byte);
        }
    }
    Ok(())
}

/// Repeat `pattern` cyclically until `length` bytes are produced.
///
/// This is the expansion a match with `distance == pattern.len()` performs.
/// The final repetition may be partial; an empty pattern yields nothing.
pub fn extract_repeat(pattern: &[u8], length: usize) -> Vec<u8> {
    if pattern.is_empty() {
        return Vec::new();
    }
    pattern.iter().cycle().take(length).copied().collect()
}
