// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::FrameError;

/// The four bytes every frame starts with.
pub const MAGIC: [u8; 4] = *b"PHIC";

/// Length of the magic and flags fields shared by all frames.
pub const HEADER_LEN: usize = 6;

/// Length of a raw fallback frame's header, including the payload length field.
pub const RAW_HEADER_LEN: usize = HEADER_LEN + 8;

/// How a frame's body is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Produced by the native codec; the body is opaque here.
    Native,
    /// The original bytes, stored uncompressed with an explicit length.
    Raw,
}

impl FrameKind {
    /// Returns the flags value written for this kind.
    #[must_use]
    pub const fn flags(self) -> u16 {
        match self {
            Self::Native => 0x0000,
            Self::Raw => 0x0001,
        }
    }

    /// Maps a flags value to a frame kind, if it is a known one.
    #[must_use]
    pub const fn from_flags(flags: u16) -> Option<Self> {
        match flags {
            0x0000 => Some(Self::Native),
            0x0001 => Some(Self::Raw),
            _ => None,
        }
    }
}

/// A validated frame, borrowing from the input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    /// A native codec frame. `body` is everything after the flags field.
    Native {
        /// The opaque codec output.
        body: &'a [u8],
    },
    /// A raw fallback frame.
    Raw {
        /// The original, uncompressed bytes.
        payload: &'a [u8],
    },
}

impl Frame<'_> {
    /// Returns the kind of this frame.
    #[must_use]
    pub const fn kind(&self) -> FrameKind {
        match self {
            Self::Native { .. } => FrameKind::Native,
            Self::Raw { .. } => FrameKind::Raw,
        }
    }
}

/// Wraps bytes in a raw fallback frame.
///
/// # Examples
///
/// ```
/// use resonance_frame::encode_raw;
///
/// let framed = encode_raw(b"abc");
/// assert_eq!(&framed[..], b"PHIC\x01\x00\x03\x00\x00\x00\x00\x00\x00\x00abc");
/// ```
#[must_use]
pub fn encode_raw(payload: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(RAW_HEADER_LEN + payload.len());
    buf.put_slice(&MAGIC);
    buf.put_u16_le(FrameKind::Raw.flags());
    buf.put_u64_le(payload.len() as u64);
    buf.put_slice(payload);
    buf.freeze()
}

/// Validates a frame and splits off its body.
///
/// # Errors
///
/// Returns [`FrameError::Truncated`] if the header is incomplete, [`FrameError::BadMagic`] if the
/// magic is wrong, [`FrameError::UnknownFlags`] for an unknown kind, and
/// [`FrameError::LengthMismatch`] if a raw frame's declared length does not match the bytes that
/// follow its header exactly.
pub fn decode(frame: &[u8]) -> Result<Frame<'_>, FrameError> {
    let kind = header_kind(frame)?;
    let mut body = &frame[HEADER_LEN..];

    match kind {
        FrameKind::Native => Ok(Frame::Native { body }),
        FrameKind::Raw => {
            if frame.len() < RAW_HEADER_LEN {
                return Err(FrameError::Truncated {
                    needed: RAW_HEADER_LEN,
                    available: frame.len(),
                });
            }

            let declared = body.get_u64_le();
            if usize::try_from(declared).ok() != Some(body.len()) {
                return Err(FrameError::LengthMismatch {
                    declared,
                    available: body.len(),
                });
            }

            Ok(Frame::Raw { payload: body })
        }
    }
}

/// Reports the kind of a frame from its header alone, without checking the body.
///
/// Returns `None` if the bytes do not start with a recognizable frame header.
#[must_use]
pub fn peek_kind(frame: &[u8]) -> Option<FrameKind> {
    header_kind(frame).ok()
}

fn header_kind(frame: &[u8]) -> Result<FrameKind, FrameError> {
    if frame.len() < HEADER_LEN {
        return Err(FrameError::Truncated {
            needed: HEADER_LEN,
            available: frame.len(),
        });
    }

    let mut header = frame;
    let mut magic = [0_u8; 4];
    header.copy_to_slice(&mut magic);
    if magic != MAGIC {
        return Err(FrameError::BadMagic);
    }

    let flags = header.get_u16_le();
    FrameKind::from_flags(flags).ok_or(FrameError::UnknownFlags(flags))
}
