// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A bounded cache with Fibonacci-weighted, recency-adjusted eviction.
//!
//! [`WeightedCache`] memoizes values under a fixed capacity. Its eviction policy blends recency
//! with access frequency so that entries which keep being revisited stay resident even after they
//! age, unlike plain LRU.
//!
//! # Eviction
//!
//! When a new key arrives at a full cache, every resident entry is scored in least to most
//! recently used order, with 1-based position `i`:
//!
//! ```text
//! score = fib[min(access_count, 29)] / i^(φ - 1)
//! ```
//!
//! The entry with the lowest score is evicted; among equal scores, the oldest one. The position
//! exponent `φ - 1 ≈ 0.618` grows sub-linearly, and the Fibonacci weight grows super-linearly with
//! access count, so a handful of extra hits protects an old entry. See [`eviction_score`] and
//! [`select_victim`].
//!
//! | Operation | Complexity | Notes |
//! | :--- | :--- | :--- |
//! | **Lookup** | $O(1)$ | Hits relink the entry at the most recently used end. |
//! | **Insert** | $O(1)$ | Plus one eviction scan when full. |
//! | **Eviction** | $O(n)$ | Single pass over resident entries. |
//! | **Concurrency** | One `Mutex` | [`SharedWeightedCache`] serializes every operation. |
//!
//! The same Fibonacci foundation drives [`modlo_sequence`], a deterministic generator that
//! wraps Fibonacci steps by a cycle of small moduli.
//!
//! # Storage
//!
//! Entries live in a slab-backed doubly-linked list ordered by recency, indexed by a
//! [`hashbrown`] map from key to slot. Moving an entry to the most recently used end never
//! allocates.
//!
//! # Example
//!
//! ```
//! use resonance_cache::WeightedCache;
//!
//! let mut cache = WeightedCache::new(3)?;
//! cache.put("k1".to_string(), "v1".to_string());
//! cache.put("k2".to_string(), "v2".to_string());
//! cache.put("k3".to_string(), "v3".to_string());
//!
//! cache.put("k4".to_string(), "v4".to_string());
//! assert_eq!(cache.len(), 3);
//! assert_eq!(cache.get("k4").map(String::as_str), Some("v4"));
//! # Ok::<(), resonance_cache::Error>(())
//! ```

mod cache;
mod error;
mod recency;
mod sequence;
mod shared;
mod stats;
mod weights;

pub use cache::{MAX_CAPACITY, WeightedCache};
pub use error::{Error, Result};
pub use sequence::{ModloSequence, modlo_sequence};
pub use shared::SharedWeightedCache;
pub use stats::CacheStats;
pub use weights::{FIBONACCI_WEIGHTS, PHI, eviction_score, select_victim, weight};

#[cfg(test)]
mod tests;
