use super::config::LzssConfig;
use super::tokens::Match;

/// Find the longest earlier run matching the bytes at `pos`.
///
/// Searches start positions in `[pos - max_distance, pos)`. A run may extend
/// past `pos` into the lookahead, which the decoder reproduces through its
/// byte-by-byte copy. The run is capped at `max_match` and at the end of
/// `data`; anything shorter than `min_match` is rejected.
///
/// Candidates are visited nearest first and only a strictly longer run
/// replaces the current best, so among runs of the maximum length the one
/// with the smallest distance wins.
pub fn find_duplicate(data: &[u8], pos: usize, config: &LzssConfig) -> Option<Match> {
    if pos == 0 || pos >= data.len() {
        return None;
    }

    let max_len = config.max_match().min(data.len() - pos);
    if max_len < config.min_match {
        return None;
    }

    let start = pos.saturating_sub(config.max_distance());
    let first = data[pos];
    let mut best: Option<Match> = None;

    // memrchr walks backwards from `pos`, i.e. in increasing distance
    for offset in memchr::memrchr_iter(first, &data[start..pos]) {
        let candidate = start + offset;
        let length = match_length(data, candidate, pos, max_len);

        if length >= config.min_match && best.map_or(true, |b| length > b.length) {
            best = Some(Match::new(pos - candidate, length));
            if length == max_len {
                break;
            }
        }
    }

    best
}

/// Length of the common run starting at `candidate` and `pos`, up to `max_len`
#[inline]
fn match_length(data: &[u8], candidate: usize, pos: usize, max_len: usize) -> usize {
    data[candidate..]
        .iter()
        .zip(&data[pos..pos + max_len])
        .take_while(|(a, b)| a == b)
        .count()
}
