//! Deterministic byte patterns for exercising buffers and copies.
//!
//! Every generator here is a pure function of `(start, len)`: byte `k` of a
//! byte pattern is `(start + k) as u8`, and integer `k` of an int pattern is
//! `start + k` (wrapping) stored big-endian. A copy that drops, repeats or
//! reorders bytes breaks the pattern, which makes these handy in tests,
//! benches and fuzz targets.
//!
//! # Example
//!
//! ```
//! use directbuf::pattern::{increasing_bytes, is_increasing};
//!
//! let data = increasing_bytes(250, 10);
//! assert_eq!(&data[4..7], &[254, 255, 0]);
//! assert!(is_increasing(250, 10, &data));
//! ```

use crate::buffer::ByteBuffer;

#[inline]
fn pattern_byte(start: i32, k: usize) -> u8 {
    start.wrapping_add(k as i32) as u8
}

/// Returns `len` bytes counting up from `start`, wrapping at 256.
pub fn increasing_bytes(start: i32, len: usize) -> Vec<u8> {
    (0..len).map(|k| pattern_byte(start, k)).collect()
}

/// Returns true if `data` is exactly the pattern `increasing_bytes(start, len)`.
///
/// A slice of any other length is rejected, even if it starts with the
/// pattern.
pub fn is_increasing(start: i32, len: usize, data: &[u8]) -> bool {
    data.len() == len
        && data
            .iter()
            .enumerate()
            .all(|(k, &b)| b == pattern_byte(start, k))
}

/// Returns a heap buffer holding `increasing_bytes(start, len)`, ready to read.
pub fn increasing_buffer(start: i32, len: usize) -> ByteBuffer {
    ByteBuffer::from(increasing_bytes(start, len))
}

/// Returns true if the bytes in `[0, limit)` of `buf` are exactly the
/// pattern `increasing_bytes(start, len)`.
///
/// The position is ignored and left where it is.
pub fn is_increasing_buffer(start: i32, len: usize, buf: &ByteBuffer) -> bool {
    is_increasing(start, len, &buf.as_slice()[..buf.limit()])
}

/// Returns a heap buffer holding `len` big-endian 32-bit integers counting up
/// from `start`, ready to read.
pub fn increasing_int_buffer(start: i32, len: usize) -> ByteBuffer {
    let mut data = Vec::with_capacity(len * 4);
    for k in 0..len {
        data.extend_from_slice(&start.wrapping_add(k as i32).to_be_bytes());
    }
    ByteBuffer::from(data)
}
