// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::str::FromStr;

use crate::{Error, HashRouter, Result};

/// Assigns data keys to database shards.
///
/// Resolution is identical to [`HashRouter`]; the separate type keeps shard identifiers from
/// being mixed up with server identifiers.
///
/// # Examples
///
/// ```
/// use resonance_routing::ShardRouter;
///
/// let shards = ShardRouter::new(["shard-0", "shard-1", "shard-2", "shard-3"])?;
/// assert_eq!(shards.resolve_shard("user1"), "shard-3");
/// # Ok::<(), resonance_routing::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardRouter {
    router: HashRouter,
}

impl ShardRouter {
    /// Creates a shard router over the given shard identifiers, in order.
    ///
    /// # Errors
    ///
    /// Fails with the same errors as [`HashRouter::new`].
    pub fn new<I, N>(shards: I) -> Result<Self>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Ok(Self {
            router: HashRouter::new(shards)?,
        })
    }

    /// Returns the shard responsible for `key`.
    #[must_use]
    pub fn resolve_shard(&self, key: &str) -> &str {
        self.router.resolve(key)
    }

    /// Returns the position in [`shards()`](Self::shards) of the shard responsible for `key`.
    #[must_use]
    pub fn resolve_shard_index(&self, key: &str) -> usize {
        self.router.resolve_index(key)
    }

    /// Returns the configured shards in routing order.
    #[must_use]
    pub fn shards(&self) -> &[String] {
        self.router.nodes()
    }

    /// Returns the number of configured shards. Always at least one.
    #[must_use]
    #[expect(clippy::len_without_is_empty, reason = "a shard router is never empty")]
    pub fn len(&self) -> usize {
        self.router.len()
    }
}

impl FromStr for ShardRouter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self { router: s.parse()? })
    }
}
