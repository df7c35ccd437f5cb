// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Header inspection and raw fallback framing for `PHIC` compressed blobs.
//!
//! Compressed values carry a small self-describing envelope so a reader can tell a natively
//! encoded blob from a raw fallback copy of the original bytes:
//!
//! | Offset | Size | Field | Meaning |
//! | :--- | :--- | :--- | :--- |
//! | 0 | 4 | magic | ASCII `"PHIC"` |
//! | 4 | 2 | flags | `0x0000` native codec frame, `0x0001` raw fallback frame (little-endian) |
//! | 6 | 8 | length | Little-endian payload length, raw frames only |
//! | 14 | length | payload | The original bytes, raw frames only |
//!
//! The native codec is not part of this crate: a native frame's body is returned as opaque bytes.
//!
//! # Example
//!
//! ```
//! use resonance_frame::{Frame, FrameKind, decode, encode_raw, peek_kind};
//!
//! let framed = encode_raw(b"hello");
//! assert_eq!(peek_kind(&framed), Some(FrameKind::Raw));
//! assert_eq!(decode(&framed)?, Frame::Raw { payload: b"hello" });
//! # Ok::<(), resonance_frame::FrameError>(())
//! ```

mod error;
mod frame;

pub use error::FrameError;
pub use frame::{Frame, FrameKind, HEADER_LEN, MAGIC, RAW_HEADER_LEN, decode, encode_raw, peek_kind};
