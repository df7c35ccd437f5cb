// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Fibonacci weights and eviction scoring.

/// The golden ratio, `(1 + √5) / 2`.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Number of precomputed Fibonacci weights.
const WEIGHT_COUNT: usize = 30;

/// Largest index into [`FIBONACCI_WEIGHTS`]; higher access counts are clamped to it.
const MAX_WEIGHT_INDEX: usize = WEIGHT_COUNT - 1;

/// The first 30 Fibonacci numbers, starting `0, 1, 1, 2, 3, ...`.
///
/// An entry with access count `n` weighs `FIBONACCI_WEIGHTS[min(n, 29)]`.
pub const FIBONACCI_WEIGHTS: [u32; WEIGHT_COUNT] = fibonacci_table();

const fn fibonacci_table() -> [u32; WEIGHT_COUNT] {
    let mut table = [0; WEIGHT_COUNT];
    table[1] = 1;
    let mut i = 2;
    while i < WEIGHT_COUNT {
        table[i] = table[i - 1] + table[i - 2];
        i += 1;
    }
    table
}

/// Returns the Fibonacci weight for an access count.
#[must_use]
pub fn weight(access_count: u64) -> u32 {
    let index = usize::try_from(access_count).map_or(MAX_WEIGHT_INDEX, |count| count.min(MAX_WEIGHT_INDEX));
    FIBONACCI_WEIGHTS[index]
}

/// Scores an entry for eviction. Lower scores are evicted first.
///
/// `position` is the entry's 1-based place in least to most recently used order, so the oldest
/// entry is at position 1. The score is `weight(access_count) / position^(φ - 1)`.
///
/// # Examples
///
/// ```
/// use resonance_cache::eviction_score;
///
/// assert!((eviction_score(1, 1) - 1.0).abs() < f64::EPSILON);
///
/// // A newer entry with the same access count scores lower.
/// assert!(eviction_score(1, 2) < eviction_score(1, 1));
///
/// // A few extra hits protect an old entry.
/// assert!(eviction_score(5, 1) > eviction_score(1, 1));
/// ```
#[must_use]
pub fn eviction_score(access_count: u64, position: u32) -> f64 {
    f64::from(weight(access_count)) / f64::from(position).powf(PHI - 1.0)
}

/// Picks the candidate with the lowest score.
///
/// Candidates are compared in iteration order with a strict less-than, so among equal scores the
/// first one wins. Returns `None` when there are no candidates.
///
/// # Examples
///
/// ```
/// use resonance_cache::select_victim;
///
/// assert_eq!(select_victim([("a", 2.0), ("b", 1.0), ("c", 1.0)]), Some("b"));
/// assert_eq!(select_victim(Vec::<(u32, f64)>::new()), None);
/// ```
pub fn select_victim<T, I>(candidates: I) -> Option<T>
where
    I: IntoIterator<Item = (T, f64)>,
{
    let mut lowest: Option<(T, f64)> = None;
    for (candidate, score) in candidates {
        if lowest.as_ref().is_none_or(|(_, lowest_score)| score < *lowest_score) {
            lowest = Some((candidate, score));
        }
    }
    lowest.map(|(candidate, _)| candidate)
}
