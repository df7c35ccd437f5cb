// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// The result for fallible routing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A router could not be built from the supplied node list.
///
/// Construction is all-or-nothing: when any of these is returned, no router exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The node list contained no identifiers.
    #[error("node list must contain at least one identifier")]
    EmptyNodeList,

    /// The same identifier was listed more than once.
    #[error("node list contains duplicate identifier '{node}'")]
    DuplicateNode {
        /// The repeated identifier.
        node: String,
    },

    /// An identifier was empty or consisted only of whitespace.
    #[error("node identifier at position {position} is blank")]
    BlankNode {
        /// Zero-based position of the offending identifier in the list.
        position: usize,
    },
}
