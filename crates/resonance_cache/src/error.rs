// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// The result for fallible cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A cache could not be created with the requested settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The capacity was zero.
    #[error("cache capacity must be at least one entry")]
    ZeroCapacity,

    /// The capacity exceeded what the slot index can address.
    #[error("cache capacity {requested} exceeds the maximum of {max}")]
    CapacityTooLarge {
        /// The capacity that was asked for.
        requested: usize,
        /// The largest supported capacity.
        max: usize,
    },
}
