// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Deterministic request and shard routing built on golden-ratio multiplicative hashing.
//!
//! This crate maps opaque string keys onto a fixed, ordered list of nodes. The same algorithm
//! backs two distinct types:
//!
//! * [`HashRouter`] picks an application server for a request identifier.
//! * [`ShardRouter`] picks a database shard for a data key.
//!
//! Keeping the two as separate types means a shard can never be handed to code expecting a
//! server (and vice versa), even though both resolve keys identically.
//!
//! # Algorithm
//!
//! 1. The key's UTF-8 bytes are hashed with SHA-256 and the first 8 bytes of the digest are
//!    read as a big-endian `u64` (see [`key_digest`]).
//! 2. The digest is multiplied by [`GOLDEN_MULTIPLIER`] (`⌊2⁶⁴/φ⌋`) with wrapping `u64`
//!    arithmetic.
//! 3. The scaled value is reduced to a node index by taking the high 64 bits of the 128-bit
//!    product with the node count (see [`golden_index`]).
//!
//! A process-randomized hasher is never involved, so every process and every restart agrees on
//! where a key goes.
//!
//! | Operation | Complexity | Notes |
//! | :--- | :--- | :--- |
//! | **Construction** | $O(n)$ | Rejects empty lists, blank and duplicate identifiers. |
//! | **Resolution** | $O(1)$ | One SHA-256 digest, no locking, no allocation. |
//!
//! # Resizing
//!
//! Rebuilding a router with a different number of nodes remaps nearly every key. This is not
//! consistent hashing; callers that need minimal-disruption resizing need a different scheme.
//!
//! # Example
//!
//! ```
//! use resonance_routing::{HashRouter, ShardRouter};
//!
//! let servers = HashRouter::new(["a", "b", "c"])?;
//! assert_eq!(servers.resolve("user1"), "b");
//!
//! let shards: ShardRouter = "shard-0, shard-1, shard-2, shard-3".parse()?;
//! assert_eq!(shards.resolve_shard("user1"), "shard-3");
//! # Ok::<(), resonance_routing::Error>(())
//! ```

mod error;
mod hash_router;
mod hashing;
mod node_list;
mod shard_router;

pub use error::{Error, Result};
pub use hash_router::HashRouter;
pub use hashing::{GOLDEN_MULTIPLIER, golden_index, key_digest};
pub use node_list::parse_node_list;
pub use shard_router::ShardRouter;
