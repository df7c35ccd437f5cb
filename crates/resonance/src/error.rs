// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::num::ParseIntError;

/// The result for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration could not be loaded or the components could not be built from it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A required environment variable is not set.
    #[error("required setting {0} is not set")]
    MissingSetting(&'static str),

    /// An environment variable holds a value that cannot be parsed.
    #[error("setting {name} has invalid value '{value}'")]
    InvalidSetting {
        /// Name of the variable.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Why parsing failed.
        #[source]
        source: ParseIntError,
    },

    /// The server list is unusable.
    #[error("invalid server list")]
    Servers(#[source] resonance_routing::Error),

    /// The shard list is unusable.
    #[error("invalid shard list")]
    Shards(#[source] resonance_routing::Error),

    /// The cache settings are unusable.
    #[error(transparent)]
    Cache(#[from] resonance_cache::Error),
}
