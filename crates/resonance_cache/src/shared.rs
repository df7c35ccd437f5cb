// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Thread-safe handle to a weighted cache.

use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use hashbrown::{DefaultHashBuilder, Equivalent};
use parking_lot::Mutex;

use crate::{CacheStats, Result, WeightedCache};

/// A [`WeightedCache`] shared between threads.
///
/// Both lookups and writes reorder entries and bump access counts, so every operation runs as a
/// single critical section under one exclusive lock. Cloning the handle is cheap and every clone
/// refers to the same cache.
///
/// # Examples
///
/// ```
/// use std::thread;
///
/// use resonance_cache::SharedWeightedCache;
///
/// let cache = SharedWeightedCache::new(128)?;
///
/// thread::scope(|scope| {
///     for worker in 0..4 {
///         let cache = cache.clone();
///         scope.spawn(move || {
///             cache.put(format!("worker-{worker}"), worker);
///         });
///     }
/// });
///
/// assert_eq!(cache.len(), 4);
/// assert_eq!(cache.get("worker-2"), Some(2));
/// # Ok::<(), resonance_cache::Error>(())
/// ```
pub struct SharedWeightedCache<K, V, S = DefaultHashBuilder> {
    inner: Arc<Mutex<WeightedCache<K, V, S>>>,
}

impl<K, V> SharedWeightedCache<K, V, DefaultHashBuilder>
where
    K: Eq + Hash + Clone,
{
    /// Creates a shared cache that holds at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Fails with the same errors as [`WeightedCache::new`].
    pub fn new(capacity: usize) -> Result<Self> {
        WeightedCache::new(capacity).map(Self::from)
    }
}

impl<K, V, S> SharedWeightedCache<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    /// Creates a shared cache that holds at most `capacity` entries, hashing keys with `hasher`.
    ///
    /// # Errors
    ///
    /// Fails with the same errors as [`WeightedCache::new`].
    pub fn with_hasher(capacity: usize, hasher: S) -> Result<Self> {
        WeightedCache::with_hasher(capacity, hasher).map(Self::from)
    }

    /// Looks up a key, counting the lookup as an access. See [`WeightedCache::get`].
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Inserts or replaces a value. See [`WeightedCache::put`].
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().put(key, value)
    }

    /// Removes a key, returning its value if it was resident.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.inner.lock().remove(key)
    }

    /// Returns the value for a key without counting an access.
    #[must_use]
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Returns `true` if the key is resident. Does not count as an access.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.inner.lock().contains_key(key)
    }

    /// Returns how many times a resident key has been accessed, including its insertion.
    #[must_use]
    pub fn access_count<Q>(&self, key: &Q) -> Option<u64>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.inner.lock().access_count(key)
    }

    /// Runs `f` with exclusive access to the cache.
    ///
    /// Use this to make a sequence of operations atomic with respect to other threads, such as
    /// a lookup followed by an insert on a miss.
    ///
    /// # Examples
    ///
    /// ```
    /// use resonance_cache::SharedWeightedCache;
    ///
    /// let cache = SharedWeightedCache::new(8)?;
    /// let value = cache.with_cache(|cache| {
    ///     if let Some(value) = cache.get("answer") {
    ///         return *value;
    ///     }
    ///     cache.put("answer", 42);
    ///     42
    /// });
    /// assert_eq!(value, 42);
    /// assert_eq!(cache.access_count("answer"), Some(1));
    /// # Ok::<(), resonance_cache::Error>(())
    /// ```
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut WeightedCache<K, V, S>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<K, V, S> SharedWeightedCache<K, V, S> {
    /// Returns the number of resident entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the maximum number of entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Returns usage counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl<K, V, S> From<WeightedCache<K, V, S>> for SharedWeightedCache<K, V, S> {
    fn from(cache: WeightedCache<K, V, S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }
}

impl<K, V, S> Clone for SharedWeightedCache<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V, S> std::fmt::Debug for SharedWeightedCache<K, V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tuple = f.debug_tuple("SharedWeightedCache");
        match self.inner.try_lock() {
            Some(cache) => tuple.field(&*cache),
            None => tuple.field(&format_args!("<locked>")),
        };
        tuple.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let cache = SharedWeightedCache::new(4).unwrap();
        let other = cache.clone();

        cache.put("a", 1);
        assert_eq!(other.get("a"), Some(1));
        assert_eq!(cache.access_count("a"), Some(2));
        assert_eq!(other.stats().hits(), 1);
    }

    #[test]
    fn peek_does_not_count() {
        let cache = SharedWeightedCache::new(4).unwrap();
        cache.put("a", 1);
        assert_eq!(cache.peek("a"), Some(1));
        assert_eq!(cache.access_count("a"), Some(1));
        assert!(cache.contains_key("a"));
    }

    #[test]
    fn remove_and_clear() {
        let cache = SharedWeightedCache::new(4).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.remove("a"), Some(1));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 4);
    }

    #[test]
    fn wraps_existing_cache() {
        let mut cache = WeightedCache::new(2).unwrap();
        cache.put(1, "one");
        let shared = SharedWeightedCache::from(cache);
        assert_eq!(shared.get(&1), Some("one"));
    }

    #[test]
    fn debug_shows_inner_summary() {
        let cache: SharedWeightedCache<u32, u32> = SharedWeightedCache::new(3).unwrap();
        let rendered = format!("{cache:?}");
        assert!(rendered.starts_with("SharedWeightedCache(WeightedCache"));
    }

    #[test]
    fn debug_inside_critical_section_does_not_block() {
        let cache: SharedWeightedCache<u32, u32> = SharedWeightedCache::new(3).unwrap();
        let rendered = cache.with_cache(|_| format!("{cache:?}"));
        assert_eq!(rendered, "SharedWeightedCache(<locked>)");
    }

    #[test]
    fn is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedWeightedCache<String, String>>();
    }
}
