//! Value-identical duplication of buffer contents.
//!
//! - [`duplicate`] - Copy one buffer's unread bytes into a new heap buffer
//! - [`duplicate_all`] - Same, for every buffer in a slice
//!
//! The result never shares storage with its source, so either side may be
//! mutated, released or dropped independently.

use crate::buffer::ByteBuffer;

/// Copies the unread remainder of `buf` into a new heap buffer.
///
/// The result holds exactly `buf.remaining()` bytes, with position 0 and
/// limit equal to its capacity. The source is only borrowed, so its markers
/// and content are left untouched. A source with nothing remaining yields an
/// empty buffer.
///
/// # Example
///
/// ```
/// use directbuf::{ByteBuffer, duplicate};
///
/// let mut src = ByteBuffer::copy_from_slice(b"header:payload");
/// src.advance(7)?;
///
/// let copy = duplicate(&src);
/// assert_eq!(copy.remaining_slice(), b"payload");
/// assert_eq!(copy.position(), 0);
/// assert_eq!(src.position(), 7);
/// # Ok::<(), directbuf::BufferError>(())
/// ```
pub fn duplicate(buf: &ByteBuffer) -> ByteBuffer {
    ByteBuffer::copy_from_slice(buf.remaining_slice())
}

/// Duplicates every buffer in `buffers`, preserving order and count.
///
/// # Example
///
/// ```
/// use directbuf::{ByteBuffer, duplicate_all};
///
/// let sources = vec![
///     ByteBuffer::copy_from_slice(b"one"),
///     ByteBuffer::copy_from_slice(b"two"),
/// ];
/// let copies = duplicate_all(&sources);
/// assert_eq!(copies, sources);
/// assert!(duplicate_all(&[]).is_empty());
/// ```
pub fn duplicate_all(buffers: &[ByteBuffer]) -> Vec<ByteBuffer> {
    buffers.iter().map(duplicate).collect()
}
