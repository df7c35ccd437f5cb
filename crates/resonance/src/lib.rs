// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Golden-ratio request routing, shard routing and weighted caching, built from one configuration.
//!
//! A [`Resonance`] bundles the three components a service front end needs:
//!
//! * a [`HashRouter`] that sends each request identifier to the same application server,
//! * a [`ShardRouter`] that maps each data key to the same database shard,
//! * a [`SharedWeightedCache`] of byte blobs that favors frequently requested entries.
//!
//! Settings come from [`ResonanceConfig`], either deserialized with serde or read from the
//! `RESONANCE_*` environment variables.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use resonance::{Resonance, ResonanceConfig};
//!
//! let config = ResonanceConfig::new(["app-1", "app-2", "app-3"], ["db-0", "db-1"]).with_cache_capacity(128);
//! let resonance = Resonance::new(&config)?;
//!
//! let server = resonance.server_for("request-1138");
//! assert_eq!(server, resonance.server_for("request-1138"));
//!
//! resonance.cache().put("report:7".to_string(), Bytes::from_static(b"..."));
//! assert!(resonance.cache().contains_key("report:7"));
//! # Ok::<(), resonance::Error>(())
//! ```
//!
//! Stored blobs can be wrapped with [`frame::encode_raw`] so readers can tell them apart from
//! natively compressed ones.

mod config;
mod error;

pub use bytes::Bytes;
pub use config::{CACHE_CAPACITY_VAR, DEFAULT_CACHE_CAPACITY, ResonanceConfig, SERVERS_VAR, SHARDS_VAR};
pub use error::{Error, Result};
pub use resonance_cache::{CacheStats, SharedWeightedCache, WeightedCache};
pub use resonance_frame as frame;
pub use resonance_routing::{HashRouter, ShardRouter};
use tracing::{Level, event};

/// Routers and cache built from a [`ResonanceConfig`].
///
/// Cloning is cheap and clones share the same cache.
#[derive(Debug, Clone)]
pub struct Resonance {
    servers: HashRouter,
    shards: ShardRouter,
    cache: SharedWeightedCache<String, Bytes>,
}

impl Resonance {
    /// Builds the routers and the cache.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Servers`] or [`Error::Shards`] if a list is empty or holds blank or
    /// duplicate entries, and [`Error::Cache`] if the cache capacity is unusable.
    pub fn new(config: &ResonanceConfig) -> Result<Self> {
        let servers = HashRouter::new(config.servers().iter().cloned()).map_err(Error::Servers)?;
        let shards = ShardRouter::new(config.shards().iter().cloned()).map_err(Error::Shards)?;
        let cache = SharedWeightedCache::new(config.cache_capacity())?;

        event!(
            Level::INFO,
            servers = servers.len(),
            shards = shards.len(),
            cache_capacity = cache.capacity(),
            "resonance components ready"
        );

        Ok(Self { servers, shards, cache })
    }

    /// Builds the components from the `RESONANCE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Fails if the settings cannot be read or the components cannot be built from them.
    #[cfg_attr(test, mutants::skip)] // Thin wrapper over the process environment.
    pub fn from_env() -> Result<Self> {
        Self::new(&ResonanceConfig::from_env()?)
    }

    /// Returns the application server for a request identifier.
    #[must_use]
    pub fn server_for(&self, request_id: &str) -> &str {
        self.servers.resolve(request_id)
    }

    /// Returns the database shard for a data key.
    #[must_use]
    pub fn shard_for(&self, key: &str) -> &str {
        self.shards.resolve_shard(key)
    }

    /// Returns the request router.
    #[must_use]
    pub const fn servers(&self) -> &HashRouter {
        &self.servers
    }

    /// Returns the shard router.
    #[must_use]
    pub const fn shards(&self) -> &ShardRouter {
        &self.shards
    }

    /// Returns the blob cache.
    #[must_use]
    pub const fn cache(&self) -> &SharedWeightedCache<String, Bytes> {
        &self.cache
    }
}
