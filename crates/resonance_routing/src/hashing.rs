// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Key digests and golden-ratio index reduction.

use sha2::{Digest, Sha256};

/// `⌊2⁶⁴/φ⌋`, the odd multiplier used for Fibonacci hashing.
pub const GOLDEN_MULTIPLIER: u64 = 11_400_714_819_323_198_485;

/// Computes the stable 64-bit digest of a routing key.
///
/// This is the first 8 bytes of the SHA-256 digest of the key's UTF-8 bytes, read big-endian.
/// The value is identical across processes, platforms and restarts.
///
/// # Examples
///
/// ```
/// use resonance_routing::key_digest;
///
/// assert_eq!(key_digest("user1"), 0x0a04_1b94_62ca_a4a3);
/// ```
#[must_use]
pub fn key_digest(key: &str) -> u64 {
    let digest = Sha256::digest(key.as_bytes());
    let mut prefix = [0_u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// Maps a digest onto one of `buckets` slots with golden-ratio multiplicative hashing.
///
/// The digest is multiplied by [`GOLDEN_MULTIPLIER`] modulo 2⁶⁴ and the result is scaled into
/// `0..buckets` by keeping the high 64 bits of the 128-bit product with `buckets`. The returned
/// index is always strictly less than `buckets` when `buckets > 0`, and `0` otherwise.
///
/// # Examples
///
/// ```
/// use resonance_routing::golden_index;
///
/// assert_eq!(golden_index(0, 10), 0);
/// assert!(golden_index(u64::MAX, 7) < 7);
/// ```
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "the high half of scaled * buckets is always below buckets, which is a usize"
)]
pub fn golden_index(digest: u64, buckets: usize) -> usize {
    let scaled = digest.wrapping_mul(GOLDEN_MULTIPLIER);
    ((u128::from(scaled) * buckets as u128) >> 64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_is_odd_and_golden() {
        assert_eq!(GOLDEN_MULTIPLIER % 2, 1);

        let phi = f64::midpoint(1.0, 5.0_f64.sqrt());
        #[expect(clippy::cast_precision_loss, reason = "approximate comparison is intended")]
        let approx = GOLDEN_MULTIPLIER as f64;
        let expected = 2.0_f64.powi(64) / phi;
        assert!((approx - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn digest_matches_sha256_prefix() {
        // SHA-256("") = e3b0c44298fc1c14...
        assert_eq!(key_digest(""), 0xe3b0_c442_98fc_1c14);
        assert_eq!(key_digest("user1"), 0x0a04_1b94_62ca_a4a3);
    }

    #[test]
    fn scaled_value_wraps() {
        // Multiplying by the golden constant overflows for almost any digest; that is the point.
        let digest = key_digest("user1");
        assert_eq!(digest.wrapping_mul(GOLDEN_MULTIPLIER), 10_007_066_617_814_218_079);
    }

    #[test]
    fn index_stays_in_range() {
        for buckets in 1..64 {
            for digest in [0, 1, u64::MAX, u64::MAX / 2, 0xdead_beef_cafe_f00d] {
                assert!(golden_index(digest, buckets) < buckets);
            }
        }
    }

    #[test]
    fn index_with_no_buckets_is_zero() {
        assert_eq!(golden_index(u64::MAX, 0), 0);
    }

    #[test]
    fn single_bucket_always_zero() {
        for digest in [0, 42, u64::MAX] {
            assert_eq!(golden_index(digest, 1), 0);
        }
    }
}
