// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Single-owner weighted cache.

use std::hash::{BuildHasher, Hash};
use std::ops::RangeInclusive;

use hashbrown::{DefaultHashBuilder, Equivalent, HashMap};
use tracing::{Level, event};

use crate::recency::{NULL_INDEX, RecencyList, SlotIndex};
use crate::weights::{eviction_score, select_victim};
use crate::{CacheStats, Error, Result};

/// The largest capacity a cache can be created with.
pub const MAX_CAPACITY: usize = NULL_INDEX as usize;

/// 1-based recency positions, enough for a full cache at [`MAX_CAPACITY`].
const POSITIONS: RangeInclusive<u32> = 1..=NULL_INDEX;

/// Upper bound on storage reserved up front; larger caches grow as they fill.
const INITIAL_ALLOCATION_LIMIT: usize = 4096;

/// A bounded cache with Fibonacci-weighted, recency-adjusted eviction.
///
/// Every `get` hit and every `put` counts as an access: the entry's access count goes up by one
/// and it moves to the most recently used end of the order. When a new key arrives while the
/// cache is full, exactly one resident entry is evicted first: the one with the lowest
/// [`eviction_score`](crate::eviction_score), where older positions are penalized and frequent
/// access is rewarded with a Fibonacci weight. Among equal scores the oldest entry goes.
///
/// Lookups are O(1). Eviction scans all resident entries once, so it costs O(capacity); the cache
/// is intended for bounded, moderately sized working sets.
///
/// This type requires `&mut self` for lookups. Use
/// [`SharedWeightedCache`](crate::SharedWeightedCache) to share one cache between threads.
///
/// # Type Parameters
///
/// * `K` - The key type, must implement `Eq + Hash + Clone`.
/// * `V` - The value type.
/// * `S` - The hash builder type, defaults to `DefaultHashBuilder`.
///
/// # Examples
///
/// ```
/// use resonance_cache::WeightedCache;
///
/// let mut cache = WeightedCache::new(2)?;
/// cache.put("a", 1);
/// cache.put("b", 2);
///
/// // Revisit "a" a few times so it outweighs its age.
/// for _ in 0..3 {
///     cache.get("a");
/// }
///
/// cache.put("c", 3);
/// assert!(cache.contains_key("a"));
/// assert!(!cache.contains_key("b"));
/// assert_eq!(cache.len(), 2);
/// # Ok::<(), resonance_cache::Error>(())
/// ```
pub struct WeightedCache<K, V, S = DefaultHashBuilder> {
    /// Key to slot lookup.
    index: HashMap<K, SlotIndex, S>,
    /// Entries in least to most recently used order.
    order: RecencyList<K, V>,
    capacity: usize,
    stats: CacheStats,
}

impl<K, V> WeightedCache<K, V, DefaultHashBuilder>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache that holds at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroCapacity`] if `capacity` is zero and [`Error::CapacityTooLarge`] if
    /// it exceeds [`MAX_CAPACITY`].
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> WeightedCache<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    /// Creates a cache that holds at most `capacity` entries, hashing keys with `hasher`.
    ///
    /// # Errors
    ///
    /// Fails with the same errors as [`WeightedCache::new`].
    pub fn with_hasher(capacity: usize, hasher: S) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        if capacity > MAX_CAPACITY {
            return Err(Error::CapacityTooLarge {
                requested: capacity,
                max: MAX_CAPACITY,
            });
        }

        let reserved = capacity.min(INITIAL_ALLOCATION_LIMIT);
        event!(Level::DEBUG, capacity, "weighted cache created");

        Ok(Self {
            index: HashMap::with_capacity_and_hasher(reserved, hasher),
            order: RecencyList::with_capacity(reserved),
            capacity,
            stats: CacheStats::default(),
        })
    }

    /// Looks up a key, counting the lookup as an access.
    ///
    /// On a hit, the entry's access count is incremented and it becomes the most recently used
    /// entry. A miss has no side effects other than statistics.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let Some(&slot) = self.index.get(key) else {
            self.stats.misses += 1;
            return None;
        };

        self.stats.hits += 1;
        self.order.touch(slot);
        self.order.entry(slot).map(|entry| &entry.value)
    }

    /// Inserts or replaces a value, counting the write as an access.
    ///
    /// If the key is resident, its value is replaced, its access count is incremented and it
    /// becomes the most recently used entry; the previous value is returned. Otherwise the key is
    /// inserted as the most recently used entry with an access count of 1, evicting exactly one
    /// resident entry first when the cache is full.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&slot) = self.index.get(&key) {
            self.stats.updates += 1;
            self.order.touch(slot);
            return self
                .order
                .entry_mut(slot)
                .map(|entry| std::mem::replace(&mut entry.value, value));
        }

        if self.order.len() >= self.capacity {
            self.evict_one();
        }

        let slot = self.order.push_back(key.clone(), value);
        self.index.insert(key, slot);
        self.stats.insertions += 1;
        None
    }

    /// Removes a key, returning its value if it was resident.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let slot = self.index.remove(key)?;
        self.order.remove(slot).map(|entry| entry.value)
    }

    /// Returns the value for a key without counting an access or changing the order.
    #[must_use]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let slot = *self.index.get(key)?;
        self.order.entry(slot).map(|entry| &entry.value)
    }

    /// Returns `true` if the key is resident. Does not count as an access.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Returns how many times a resident key has been accessed, including its insertion.
    #[must_use]
    pub fn access_count<Q>(&self, key: &Q) -> Option<u64>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let slot = *self.index.get(key)?;
        self.order.entry(slot).map(|entry| entry.access_count)
    }

    /// Iterates resident keys from least to most recently used.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.order.iter().map(|(_, entry)| &entry.key)
    }

    /// Evicts the resident entry with the lowest eviction score.
    fn evict_one(&mut self) {
        let victim = select_victim(self.order.iter().zip(POSITIONS).map(|((slot, entry), position)| {
            let score = eviction_score(entry.access_count, position);
            ((slot, position, entry.access_count, score), score)
        }));

        let Some((slot, position, access_count, score)) = victim else {
            return;
        };

        if let Some(entry) = self.order.remove(slot) {
            self.index.remove(&entry.key);
            self.stats.evictions += 1;
            event!(Level::TRACE, position, access_count, score, "evicted cache entry");
        }
    }
}

impl<K, V, S> WeightedCache<K, V, S> {
    /// Returns the number of resident entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns usage counters.
    #[must_use]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Removes every entry. Capacity and statistics are kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }
}

impl<K, V, S> std::fmt::Debug for WeightedCache<K, V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightedCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
