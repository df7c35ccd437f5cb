// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Settings for the routing and caching components.

use resonance_routing::parse_node_list;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable holding the comma-separated server list.
pub const SERVERS_VAR: &str = "RESONANCE_SERVERS";

/// Environment variable holding the comma-separated shard list.
pub const SHARDS_VAR: &str = "RESONANCE_SHARDS";

/// Environment variable holding the cache capacity.
pub const CACHE_CAPACITY_VAR: &str = "RESONANCE_CACHE_CAPACITY";

/// Cache capacity used when none is configured.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Settings for a [`Resonance`](crate::Resonance).
///
/// Lists are kept exactly as given; validation happens when the components are built.
///
/// # Examples
///
/// ```
/// use resonance::ResonanceConfig;
///
/// let config = ResonanceConfig::new(["app-1", "app-2"], ["db-0", "db-1"]).with_cache_capacity(1024);
/// assert_eq!(config.servers(), ["app-1", "app-2"]);
/// assert_eq!(config.cache_capacity(), 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResonanceConfig {
    servers: Vec<String>,
    shards: Vec<String>,
    #[serde(default = "default_cache_capacity")]
    cache_capacity: usize,
}

const fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl ResonanceConfig {
    /// Creates settings with the given servers and shards and the default cache capacity.
    #[must_use]
    pub fn new<S, T>(servers: impl IntoIterator<Item = S>, shards: impl IntoIterator<Item = T>) -> Self
    where
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            servers: servers.into_iter().map(Into::into).collect(),
            shards: shards.into_iter().map(Into::into).collect(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Reads settings from the process environment.
    ///
    /// See [`from_lookup`](Self::from_lookup) for the variables and their format.
    ///
    /// # Errors
    ///
    /// Fails like [`from_lookup`](Self::from_lookup).
    #[cfg_attr(test, mutants::skip)] // Thin wrapper over the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    ///
    /// * [`SERVERS_VAR`] and [`SHARDS_VAR`] are required comma-separated lists. Whitespace around
    ///   entries is trimmed and empty entries are skipped.
    /// * [`CACHE_CAPACITY_VAR`] is optional and defaults to [`DEFAULT_CACHE_CAPACITY`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSetting`] if a list is not set and [`Error::InvalidSetting`] if the
    /// capacity is not a non-negative integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use resonance::ResonanceConfig;
    ///
    /// let config = ResonanceConfig::from_lookup(|name| match name {
    ///     "RESONANCE_SERVERS" => Some("app-1:8001, app-2:8001".to_string()),
    ///     "RESONANCE_SHARDS" => Some("db-0,db-1".to_string()),
    ///     _ => None,
    /// })?;
    ///
    /// assert_eq!(config.servers(), ["app-1:8001", "app-2:8001"]);
    /// assert_eq!(config.cache_capacity(), 256);
    /// # Ok::<(), resonance::Error>(())
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let list = |name: &'static str| {
            lookup(name)
                .map(|raw| parse_node_list(&raw))
                .ok_or(Error::MissingSetting(name))
        };

        let servers = list(SERVERS_VAR)?;
        let shards = list(SHARDS_VAR)?;

        let cache_capacity = match lookup(CACHE_CAPACITY_VAR) {
            None => DEFAULT_CACHE_CAPACITY,
            Some(raw) => raw.trim().parse::<usize>().map_err(|source| Error::InvalidSetting {
                name: CACHE_CAPACITY_VAR,
                value: raw.clone(),
                source,
            })?,
        };

        Ok(Self {
            servers,
            shards,
            cache_capacity,
        })
    }

    /// Sets the cache capacity.
    #[must_use]
    pub const fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Returns the configured servers, in routing order.
    #[must_use]
    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    /// Returns the configured shards, in routing order.
    #[must_use]
    pub fn shards(&self) -> &[String] {
        &self.shards
    }

    /// Returns the cache capacity.
    #[must_use]
    pub const fn cache_capacity(&self) -> usize {
        self.cache_capacity
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn reads_all_settings() {
        let config = ResonanceConfig::from_lookup(lookup_from(&[
            (SERVERS_VAR, "a,b,c"),
            (SHARDS_VAR, " s0 , s1 "),
            (CACHE_CAPACITY_VAR, " 42 "),
        ]))
        .unwrap();

        assert_eq!(config, ResonanceConfig::new(["a", "b", "c"], ["s0", "s1"]).with_cache_capacity(42));
    }

    #[test]
    fn capacity_defaults() {
        let config = ResonanceConfig::from_lookup(lookup_from(&[(SERVERS_VAR, "a"), (SHARDS_VAR, "s")])).unwrap();
        assert_eq!(config.cache_capacity(), DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn missing_lists_are_reported() {
        let err = ResonanceConfig::from_lookup(lookup_from(&[(SHARDS_VAR, "s")])).unwrap_err();
        assert!(matches!(err, Error::MissingSetting(SERVERS_VAR)));

        let err = ResonanceConfig::from_lookup(lookup_from(&[(SERVERS_VAR, "a")])).unwrap_err();
        assert!(matches!(err, Error::MissingSetting(SHARDS_VAR)));
        assert_eq!(err.to_string(), "required setting RESONANCE_SHARDS is not set");
    }

    #[test]
    fn non_integer_capacity_is_rejected() {
        for raw in ["-5", "lots", "1.5", ""] {
            let err = ResonanceConfig::from_lookup(lookup_from(&[
                (SERVERS_VAR, "a"),
                (SHARDS_VAR, "s"),
                (CACHE_CAPACITY_VAR, raw),
            ]))
            .unwrap_err();
            assert!(
                matches!(&err, Error::InvalidSetting { name, value, .. } if *name == CACHE_CAPACITY_VAR && value == raw),
                "{err:?}"
            );
        }
    }

    #[test]
    fn blank_list_parses_to_empty() {
        let config = ResonanceConfig::from_lookup(lookup_from(&[(SERVERS_VAR, " , "), (SHARDS_VAR, "s")])).unwrap();
        assert!(config.servers().is_empty());
    }
}
