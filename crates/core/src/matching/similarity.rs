//! Longest-matching-blocks similarity.
//!
//! The ratio is `2 * M / T`, where `T` is the combined length of both strings
//! and `M` the number of characters covered by matching blocks. Blocks are
//! found by taking the longest common substring, then recursing on the
//! pieces to its left and to its right.

/// Similarity in `0.0..=1.0`. Two empty strings are identical (1.0).
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut matched = 0;

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Returns `(start_in_a, start_in_b, size)`; among equally long blocks the
/// one starting earliest in `a`, then earliest in `b`, wins.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    let width = bhi - blo;
    // run[x + 1] = length of the common run ending at a[i], b[blo + x]
    let mut prev = vec![0usize; width + 1];
    let mut current = vec![0usize; width + 1];

    for i in alo..ahi {
        for x in 0..width {
            current[x + 1] = if a[i] == b[blo + x] { prev[x] + 1 } else { 0 };
            let size = current[x + 1];
            if size > best_size {
                best_i = i + 1 - size;
                best_j = blo + x + 1 - size;
                best_size = size;
            }
        }
        std::mem::swap(&mut prev, &mut current);
    }

    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_identical_strings() {
        assert_close(similarity_ratio("abbey road", "abbey road"), 1.0);
        assert_close(similarity_ratio("", ""), 1.0);
    }

    #[test]
    fn test_disjoint_strings() {
        assert_close(similarity_ratio("abc", "xyz"), 0.0);
        assert_close(similarity_ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_single_insertion() {
        // 10 shared characters out of 21 total.
        assert_close(similarity_ratio("abbey road", "abbey roads"), 20.0 / 21.0);
    }

    #[test]
    fn test_recurses_on_both_sides() {
        // "abcd" vs "bcda": longest block "bcd", nothing left on either side
        // that can still pair up with the leftover 'a's.
        assert_close(similarity_ratio("abcd", "bcda"), 6.0 / 8.0);
        // "qabxcd" vs "abycdf": blocks "ab" and "cd".
        assert_close(similarity_ratio("qabxcd", "abycdf"), 8.0 / 12.0);
    }

    #[test]
    fn test_symmetric_for_simple_cases() {
        assert_close(
            similarity_ratio("kid a", "kid b"),
            similarity_ratio("kid b", "kid a"),
        );
    }
}
