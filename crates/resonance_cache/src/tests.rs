// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Property tests for the weighted cache.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{WeightedCache, eviction_score, select_victim};

/// Recomputes the expected victim from the cache's current order and counts.
fn expected_victim(cache: &WeightedCache<u32, u32>) -> Option<u32> {
    select_victim(
        cache
            .keys()
            .zip(1_u32..)
            .map(|(key, position)| (*key, eviction_score(cache.access_count(key).unwrap_or(0), position))),
    )
}

#[test]
fn size_never_exceeds_capacity() {
    let mut rng = StdRng::seed_from_u64(3);
    for capacity in [1_usize, 2, 3, 8, 64] {
        let mut cache = WeightedCache::new(capacity).unwrap();
        for _ in 0..2_000 {
            let key = rng.random_range(0_u32..200);
            if rng.random_bool(0.3) {
                let _ = cache.get(&key);
            } else {
                cache.put(key, key * 2);
            }
            assert!(cache.len() <= capacity);
        }
    }
}

#[test]
fn each_overflow_evicts_exactly_the_scored_victim() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut cache = WeightedCache::new(16).unwrap();

    for step in 0..5_000_u32 {
        let key = rng.random_range(0_u32..64);
        if rng.random_bool(0.5) {
            let _ = cache.get(&key);
            continue;
        }

        let was_full = cache.len() == cache.capacity();
        let is_new = !cache.contains_key(&key);
        let expected = (was_full && is_new).then(|| expected_victim(&cache)).flatten();
        let before: Vec<u32> = cache.keys().copied().collect();

        cache.put(key, step);

        let after: Vec<u32> = cache.keys().copied().collect();
        let gone: Vec<u32> = before.iter().copied().filter(|k| !after.contains(k)).collect();

        match expected {
            Some(victim) => assert_eq!(gone, [victim]),
            None => assert!(gone.is_empty()),
        }
        assert_eq!(after.last(), Some(&key));
    }
}

#[test]
fn put_then_get_returns_value() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut cache = WeightedCache::new(32).unwrap();
    for _ in 0..1_000 {
        let key = rng.random::<u32>();
        let value = rng.random::<u32>();
        cache.put(key, value);
        assert_eq!(cache.get(&key), Some(&value));
    }
}

#[test]
fn repeated_get_counts_but_never_changes_value() {
    let mut cache = WeightedCache::new(4).unwrap();
    cache.put(7_u32, 70_u32);

    let mut previous = cache.access_count(&7).unwrap();
    for _ in 0..50 {
        assert_eq!(cache.get(&7), Some(&70));
        let current = cache.access_count(&7).unwrap();
        assert!(current > previous);
        previous = current;
    }
    assert_eq!(previous, 51);
}

#[test]
fn hot_keys_survive_churn() {
    let mut cache = WeightedCache::new(8).unwrap();
    cache.put(0_u32, 0_u32);
    for _ in 0..10 {
        let _ = cache.get(&0);
    }

    for key in 1..1_000 {
        cache.put(key, key);
    }

    assert!(cache.contains_key(&0));
    assert_eq!(cache.len(), 8);
}

#[test]
fn stats_track_activity() {
    let mut cache = WeightedCache::new(2).unwrap();
    cache.put(1_u32, 1_u32);
    cache.put(2, 2);
    cache.put(2, 20);
    cache.put(3, 3);
    let _ = cache.get(&3);
    let _ = cache.get(&99);

    let stats = cache.stats();
    assert_eq!(stats.insertions(), 3);
    assert_eq!(stats.updates(), 1);
    assert_eq!(stats.evictions(), 1);
    assert_eq!(stats.hits(), 1);
    assert_eq!(stats.misses(), 1);
}
