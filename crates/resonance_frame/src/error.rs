// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// A byte sequence is not a well-formed frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FrameError {
    /// Fewer bytes than the header requires.
    #[error("frame is truncated: needed {needed} bytes, {available} available")]
    Truncated {
        /// Minimum number of bytes for the header.
        needed: usize,
        /// Number of bytes supplied.
        available: usize,
    },

    /// The first four bytes are not `PHIC`.
    #[error("frame magic mismatch")]
    BadMagic,

    /// The flags field holds an unknown frame kind.
    #[error("unknown frame flags {0:#06x}")]
    UnknownFlags(u16),

    /// The declared payload length disagrees with the bytes present.
    #[error("raw frame declares {declared} payload bytes but {available} follow the header")]
    LengthMismatch {
        /// Payload length stated in the header.
        declared: u64,
        /// Payload bytes actually present.
        available: usize,
    },
}
