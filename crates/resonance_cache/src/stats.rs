// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Counters describing how a cache has been used since it was created.
///
/// Clearing a cache does not reset its statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub(crate) hits: u64,
    pub(crate) misses: u64,
    pub(crate) insertions: u64,
    pub(crate) updates: u64,
    pub(crate) evictions: u64,
}

impl CacheStats {
    /// Lookups that found their key.
    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that did not find their key.
    #[must_use]
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Puts that added a new key.
    #[must_use]
    pub const fn insertions(&self) -> u64 {
        self.insertions
    }

    /// Puts that replaced the value of a resident key.
    #[must_use]
    pub const fn updates(&self) -> u64 {
        self.updates
    }

    /// Entries removed to make room for new keys.
    #[must_use]
    pub const fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Fraction of lookups that were hits, or `None` before the first lookup.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "an approximate ratio is sufficient")]
    pub fn hit_ratio(&self) -> Option<f64> {
        let lookups = self.hits + self.misses;
        (lookups > 0).then(|| self.hits as f64 / lookups as f64)
    }
}
