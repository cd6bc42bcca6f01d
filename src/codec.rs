//! # Clock Frame Codec
//!
//! Pure serialization and parsing of the 10-byte wire frame: a 3-byte
//! `MCK` magic followed by a 56-bit little-endian microsecond timestamp.
//! This module has no dependency on the rest of the crate and performs no
//! I/O, allocation, or logging. It is safe to call from any execution
//! context, including a receive interrupt.

use crate::constants::{FRAME_LEN, FRAME_MAGIC, TIMESTAMP_BYTES, TIMESTAMP_MASK};
use thiserror::Error;

/// Failure to decode a buffer as a clock frame.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// The buffer was not a clock frame: wrong length or bad magic.
    #[error("not a clock frame")]
    NotAFrame,
}

/// Encodes a mesh timestamp into the 10-byte wire frame.
///
/// Only the low 56 bits of `stamp_us` are carried on the wire; the top 8
/// bits are silently truncated. This is intentional: mesh time starts near
/// zero and will not reach 2^56 microseconds (about 2283 years) within the
/// lifetime of any deployment.
pub fn encode(stamp_us: u64) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    frame[0..3].copy_from_slice(&FRAME_MAGIC);

    let truncated = stamp_us & TIMESTAMP_MASK;
    let le = truncated.to_le_bytes();
    frame[3..FRAME_LEN].copy_from_slice(&le[0..TIMESTAMP_BYTES]);

    frame
}

/// Decodes a buffer as a clock frame, returning the 64-bit mesh timestamp.
///
/// Fails with [`CodecError::NotAFrame`] unless the buffer is exactly
/// [`FRAME_LEN`] bytes long and starts with [`FRAME_MAGIC`]. The decoded
/// value is zero-extended from the 56-bit wire field: it is never
/// sign-extended.
pub fn decode(buf: &[u8]) -> Result<u64, CodecError> {
    if buf.len() != FRAME_LEN || buf[0..3] != FRAME_MAGIC {
        return Err(CodecError::NotAFrame);
    }

    let mut le = [0u8; 8];
    le[0..TIMESTAMP_BYTES].copy_from_slice(&buf[3..FRAME_LEN]);
    Ok(u64::from_le_bytes(le))
}
