use std::collections::HashMap;

/// Calculates the Shannon entropy of a string in bits/char, over its
/// character frequency distribution.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut char_counts: HashMap<char, usize> = HashMap::new();
    let len = s.chars().count() as f64;

    for c in s.chars() {
        *char_counts.entry(c).or_insert(0) += 1;
    }

    char_counts
        .values()
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Whether a token run looks like secret material: long enough and
/// entropic enough. The token is already constrained to the candidate
/// character class by extraction.
#[must_use]
pub fn is_secret_candidate(token: &str, threshold: f64, min_length: usize) -> bool {
    if token.chars().count() < min_length {
        return false;
    }
    shannon_entropy(token) >= threshold
}
