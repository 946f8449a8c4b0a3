//! Histogram and entropy measurements for judging how well data compresses.

use std::collections::HashMap;
use std::fmt;

/// Byte value frequencies
pub fn histogram(data: &[u8]) -> [u64; 256] {
    let mut counts = [0u64; 256];
    for &byte in data {
        counts[byte as usize] += 1;
    }
    counts
}

/// Shannon entropy, in bits, of the overlapping blocks of `order + 1` bytes
///
/// Returns 0.0 when `data` is shorter than one block.
pub fn block_entropy(data: &[u8], order: usize) -> f64 {
    let block_size = order + 1;
    if data.len() < block_size {
        return 0.0;
    }

    let total = data.len() - block_size + 1;
    let mut counts: HashMap<&[u8], u64> = HashMap::new();
    for block in data.windows(block_size) {
        *counts.entry(block).or_insert(0) += 1;
    }

    shannon(counts.into_values(), total as u64)
}

fn shannon(counts: impl Iterator<Item = u64>, total: u64) -> f64 {
    let total = total as f64;
    counts
        .filter(|&c| c > 0)
        .map(|c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Compressed bits spent per original symbol
pub fn average_bit_length(compressed_len: u64, symbol_count: u64) -> f64 {
    if symbol_count == 0 {
        return 0.0;
    }
    (compressed_len * 8) as f64 / symbol_count as f64
}

/// Original size divided by compressed size, so higher is better
pub fn compression_ratio(original_len: u64, compressed_len: u64) -> f64 {
    if compressed_len == 0 {
        return 0.0;
    }
    original_len as f64 / compressed_len as f64
}

/// Summary printed by the `stats` subcommand
#[derive(Clone, Debug, PartialEq)]
pub struct StatsReport {
    pub total_bytes: u64,
    pub distinct_bytes: usize,
    /// Most frequent byte and its count
    pub most_common: Option<(u8, u64)>,
    /// `(order, entropy)` pairs, ascending by order
    pub entropies: Vec<(usize, f64)>,
    pub compressed_bytes: Option<u64>,
    pub average_bit_length: Option<f64>,
}

impl StatsReport {
    /// Measure `data` with block entropies for orders `1..=max_order`
    pub fn new(data: &[u8], max_order: usize, compressed_len: Option<u64>) -> Self {
        let counts = histogram(data);
        let distinct_bytes = counts.iter().filter(|&&c| c > 0).count();
        // Ties resolve to the lowest byte value
        let most_common = counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .fold(None, |best: Option<(u8, u64)>, (byte, &count)| match best {
                Some((_, top)) if top >= count => best,
                _ => Some((byte as u8, count)),
            });

        let entropies = (1..=max_order).map(|order| (order, block_entropy(data, order))).collect();

        Self {
            total_bytes: data.len() as u64,
            distinct_bytes,
            most_common,
            entropies,
            compressed_bytes: compressed_len,
            average_bit_length: compressed_len
                .map(|len| average_bit_length(len, data.len() as u64)),
        }
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bytes:              {}", self.total_bytes)?;
        writeln!(f, "Distinct bytes:     {}", self.distinct_bytes)?;
        if let Some((byte, count)) = self.most_common {
            writeln!(f, "Most common:        0x{:02x} ({} times)", byte, count)?;
        }
        if let (Some(compressed), Some(avg)) = (self.compressed_bytes, self.average_bit_length) {
            writeln!(f, "Compressed bytes:   {}", compressed)?;
            writeln!(f, "Average bit length: {:.4} bits/symbol", avg)?;
        }
        for (order, entropy) in &self.entropies {
            writeln!(f, "Block entropy (order {}): {:.4}", order, entropy)?;
        }
        Ok(())
    }
}
