//! The ByteBuffer type - fixed-capacity bytes with position/limit markers.

use std::fmt;
use std::io::{self, Read};

use bytes::{Buf, Bytes, BytesMut};

use super::direct::DirectRegion;
use crate::error::BufferError;

/// Backing storage of a [`ByteBuffer`].
enum Storage {
    /// Reclaimed when the buffer is dropped, like any owned collection.
    Heap(BytesMut),
    /// Off-heap region; `None` when the capacity is zero.
    Direct(Option<DirectRegion>),
}

impl Storage {
    #[inline]
    fn as_slice(&self) -> &[u8] {
        match self {
            Storage::Heap(bytes) => &bytes[..],
            Storage::Direct(Some(region)) => region.as_slice(),
            Storage::Direct(None) => &[],
        }
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Storage::Heap(bytes) => &mut bytes[..],
            Storage::Direct(Some(region)) => region.as_mut_slice(),
            Storage::Direct(None) => &mut [],
        }
    }
}

/// A contiguous, fixed-capacity byte buffer with read/write markers.
///
/// The three markers always satisfy `0 <= position <= limit <= capacity`:
///
/// - `position` - index of the next byte to read or write
/// - `limit` - end of the readable (or writable) window
/// - `capacity` - total bytes allocated, never changes
///
/// A buffer is either heap-backed or direct (off-heap, see
/// [`ByteBuffer::allocate_direct`]). `ByteBuffer` is intentionally not
/// `Clone`: use [`duplicate`](crate::duplicate) for an independent copy.
///
/// Equality compares the remaining bytes only, regardless of backing.
///
/// # Example
///
/// ```
/// use directbuf::ByteBuffer;
///
/// let mut buf = ByteBuffer::allocate(8);
/// buf.put_slice(b"abc")?;
/// buf.flip();
///
/// assert_eq!(buf.remaining_slice(), b"abc");
/// assert_eq!(buf.get_u8()?, b'a');
/// assert_eq!(buf.remaining(), 2);
/// # Ok::<(), directbuf::BufferError>(())
/// ```
pub struct ByteBuffer {
    storage: Storage,
    position: usize,
    limit: usize,
}

impl ByteBuffer {
    /// Allocates a zero-filled heap buffer.
    ///
    /// Position is 0 and limit equals capacity.
    pub fn allocate(capacity: usize) -> Self {
        Self {
            storage: Storage::Heap(BytesMut::zeroed(capacity)),
            position: 0,
            limit: capacity,
        }
    }

    /// Allocates a zero-filled, page-aligned direct buffer.
    ///
    /// A capacity of zero allocates nothing. Release the buffer early with
    /// [`force_release`](crate::force_release), or let it drop.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] if the capacity cannot be
    /// described as an allocation layout.
    pub fn allocate_direct(capacity: usize) -> Result<Self, BufferError> {
        Ok(Self {
            storage: Storage::Direct(DirectRegion::allocate(capacity)?),
            position: 0,
            limit: capacity,
        })
    }

    /// Creates a heap buffer holding a copy of `data`.
    ///
    /// Position is 0, limit and capacity equal `data.len()`.
    pub fn copy_from_slice(data: &[u8]) -> Self {
        Self {
            storage: Storage::Heap(BytesMut::from(data)),
            position: 0,
            limit: data.len(),
        }
    }

    /// Returns the total number of bytes the buffer can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.as_slice().len()
    }

    /// Returns the index of the next byte to read or write.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the end of the current window.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns `limit - position`.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Returns true if there are bytes between position and limit.
    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    /// Returns true if the buffer is backed by off-heap storage.
    #[inline]
    pub fn is_direct(&self) -> bool {
        matches!(self.storage, Storage::Direct(_))
    }

    /// Returns the whole backing storage, ignoring the markers.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.storage.as_slice()
    }

    /// Returns the bytes between position and limit.
    #[inline]
    pub fn remaining_slice(&self) -> &[u8] {
        &self.storage.as_slice()[self.position..self.limit]
    }

    /// Returns the writable window between position and limit.
    ///
    /// Pair with [`ByteBuffer::advance`] after filling part of it.
    #[inline]
    pub fn unfilled_mut(&mut self) -> &mut [u8] {
        let (position, limit) = (self.position, self.limit);
        &mut self.storage.as_mut_slice()[position..limit]
    }

    /// Moves the position.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] if `position > limit`.
    pub fn set_position(&mut self, position: usize) -> Result<(), BufferError> {
        if position > self.limit {
            return Err(BufferError::InvalidArgument {
                message: "position cannot exceed limit",
            });
        }
        self.position = position;
        Ok(())
    }

    /// Moves the limit, clamping the position if it falls past the new limit.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] if `limit > capacity`.
    pub fn set_limit(&mut self, limit: usize) -> Result<(), BufferError> {
        if limit > self.capacity() {
            return Err(BufferError::InvalidArgument {
                message: "limit cannot exceed capacity",
            });
        }
        self.limit = limit;
        self.position = self.position.min(limit);
        Ok(())
    }

    /// Advances the position by `count` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Underflow`] if fewer than `count` bytes remain.
    pub fn advance(&mut self, count: usize) -> Result<(), BufferError> {
        let remaining = self.remaining();
        if count > remaining {
            return Err(BufferError::Underflow {
                requested: count,
                remaining,
            });
        }
        self.position += count;
        Ok(())
    }

    /// Switches from writing to reading: limit becomes the old position and
    /// position becomes 0.
    pub fn flip(&mut self) {
        self.limit = self.position;
        self.position = 0;
    }

    /// Resets the markers for writing from the start. Content is untouched.
    pub fn clear(&mut self) {
        self.position = 0;
        self.limit = self.capacity();
    }

    /// Sets the position back to 0, keeping the limit.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Discards the bytes before position.
    ///
    /// The unread remainder is moved to the front, position is set just past
    /// it and limit to capacity, leaving the buffer ready to append.
    pub fn compact(&mut self) {
        let (position, limit) = (self.position, self.limit);
        let remaining = limit - position;
        if position > 0 && remaining > 0 {
            self.storage.as_mut_slice().copy_within(position..limit, 0);
        }
        self.position = remaining;
        self.limit = self.capacity();
    }

    /// Writes `data` at position and advances past it.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Overflow`] if `data` does not fit before limit.
    /// Nothing is written in that case.
    pub fn put_slice(&mut self, data: &[u8]) -> Result<(), BufferError> {
        let remaining = self.remaining();
        if data.len() > remaining {
            return Err(BufferError::Overflow {
                requested: data.len(),
                remaining,
            });
        }
        let start = self.position;
        self.storage.as_mut_slice()[start..start + data.len()].copy_from_slice(data);
        self.position += data.len();
        Ok(())
    }

    /// Writes a single byte.
    pub fn put_u8(&mut self, value: u8) -> Result<(), BufferError> {
        self.put_slice(&[value])
    }

    /// Writes a big-endian `u32`.
    pub fn put_u32(&mut self, value: u32) -> Result<(), BufferError> {
        self.put_slice(&value.to_be_bytes())
    }

    /// Fills `dst` from position and advances past the copied bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Underflow`] if fewer than `dst.len()` bytes remain.
    pub fn copy_to_slice(&mut self, dst: &mut [u8]) -> Result<(), BufferError> {
        let remaining = self.remaining();
        if dst.len() > remaining {
            return Err(BufferError::Underflow {
                requested: dst.len(),
                remaining,
            });
        }
        dst.copy_from_slice(&self.remaining_slice()[..dst.len()]);
        self.position += dst.len();
        Ok(())
    }

    /// Reads a single byte.
    pub fn get_u8(&mut self) -> Result<u8, BufferError> {
        let mut byte = [0u8; 1];
        self.copy_to_slice(&mut byte)?;
        Ok(byte[0])
    }

    /// Reads a big-endian `u32`.
    pub fn get_u32(&mut self) -> Result<u32, BufferError> {
        let mut word = [0u8; 4];
        self.copy_to_slice(&mut word)?;
        Ok(u32::from_be_bytes(word))
    }

    /// Issues a single `read` into the unfilled window and advances by the
    /// number of bytes read.
    ///
    /// Returns `Ok(0)` at end of stream, or when the window is empty.
    pub fn read_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<usize> {
        let window = self.remaining();
        let n = reader.read(self.unfilled_mut())?;
        if n > window {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "reader reported more bytes than the buffer window holds",
            ));
        }
        self.position += n;
        Ok(n)
    }

    /// Consumes the buffer, returning its remaining bytes.
    ///
    /// Heap buffers hand over their storage without copying; direct buffers
    /// copy the remainder out and free their region.
    pub fn freeze(self) -> Bytes {
        let (position, limit) = (self.position, self.limit);
        match self.storage {
            Storage::Heap(mut bytes) => {
                bytes.truncate(limit);
                bytes.advance(position);
                bytes.freeze()
            }
            Storage::Direct(region) => match region {
                Some(region) => Bytes::copy_from_slice(&region.as_slice()[position..limit]),
                None => Bytes::new(),
            },
        }
    }

    /// Consumes a direct buffer, returning its off-heap region.
    ///
    /// Returns `None` for heap buffers and for zero-capacity direct buffers,
    /// which own no region. This is the building block for custom
    /// [`ReleaseHookProvider`](crate::ReleaseHookProvider)s.
    pub fn into_direct_region(self) -> Option<DirectRegion> {
        match self.storage {
            Storage::Direct(region) => region,
            Storage::Heap(_) => None,
        }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(data: &[u8]) -> Self {
        Self::copy_from_slice(data)
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::copy_from_slice(&data)
    }
}

impl PartialEq for ByteBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.remaining_slice() == other.remaining_slice()
    }
}

impl Eq for ByteBuffer {}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("direct", &self.is_direct())
            .field("position", &self.position)
            .field("limit", &self.limit)
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_allocate() {
        let buf = ByteBuffer::allocate(16);
        assert_eq!(buf.capacity(), 16);
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.limit(), 16);
        assert!(!buf.is_direct());
        assert!(buf.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_allocate_direct() {
        let buf = ByteBuffer::allocate_direct(16).unwrap();
        assert_eq!(buf.capacity(), 16);
        assert_eq!(buf.limit(), 16);
        assert!(buf.is_direct());
    }

    #[test]
    fn test_allocate_direct_zero() {
        let buf = ByteBuffer::allocate_direct(0).unwrap();
        assert_eq!(buf.capacity(), 0);
        assert!(buf.is_direct());
        assert!(!buf.has_remaining());
        assert!(buf.into_direct_region().is_none());
    }

    #[test]
    fn test_put_flip_get() {
        for mut buf in [
            ByteBuffer::allocate(8),
            ByteBuffer::allocate_direct(8).unwrap(),
        ] {
            buf.put_slice(b"hello").unwrap();
            assert_eq!(buf.position(), 5);
            buf.flip();
            assert_eq!(buf.limit(), 5);
            assert_eq!(buf.remaining_slice(), b"hello");

            let mut out = [0u8; 5];
            buf.copy_to_slice(&mut out).unwrap();
            assert_eq!(&out, b"hello");
            assert!(!buf.has_remaining());
        }
    }

    #[test]
    fn test_put_overflow_writes_nothing() {
        let mut buf = ByteBuffer::allocate(4);
        buf.put_slice(b"ab").unwrap();
        let err = buf.put_slice(b"cde").unwrap_err();
        assert!(matches!(
            err,
            BufferError::Overflow {
                requested: 3,
                remaining: 2
            }
        ));
        assert_eq!(buf.position(), 2);
    }

    #[test]
    fn test_get_underflow() {
        let mut buf = ByteBuffer::copy_from_slice(&[1, 2, 3]);
        assert!(matches!(
            buf.get_u32(),
            Err(BufferError::Underflow {
                requested: 4,
                remaining: 3
            })
        ));
        assert_eq!(buf.position(), 0);
    }

    #[test]
    fn test_u32_is_big_endian() {
        let mut buf = ByteBuffer::allocate(4);
        buf.put_u32(0x0102_0304).unwrap();
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4]);
        buf.flip();
        assert_eq!(buf.get_u32().unwrap(), 0x0102_0304);
    }

    #[test]
    fn test_compact_moves_remainder_to_front() {
        let mut buf = ByteBuffer::allocate(8);
        buf.put_slice(b"abcdef").unwrap();
        buf.flip();
        buf.advance(4).unwrap();
        buf.compact();

        assert_eq!(buf.position(), 2);
        assert_eq!(buf.limit(), 8);
        assert_eq!(&buf.as_slice()[..2], b"ef");
    }

    #[test]
    fn test_compact_when_fully_consumed() {
        let mut buf = ByteBuffer::allocate(4);
        buf.put_slice(b"abcd").unwrap();
        buf.flip();
        buf.advance(4).unwrap();
        buf.compact();
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.limit(), 4);
    }

    #[test]
    fn test_set_position_and_limit() {
        let mut buf = ByteBuffer::allocate(10);
        buf.set_position(6).unwrap();
        buf.set_limit(4).unwrap();
        assert_eq!(buf.limit(), 4);
        assert_eq!(buf.position(), 4);

        assert!(buf.set_position(5).is_err());
        assert!(buf.set_limit(11).is_err());
    }

    #[test]
    fn test_clear_and_rewind() {
        let mut buf = ByteBuffer::copy_from_slice(b"xyz");
        buf.advance(2).unwrap();
        buf.rewind();
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.limit(), 3);

        buf.set_limit(1).unwrap();
        buf.clear();
        assert_eq!(buf.limit(), 3);
    }

    #[test]
    fn test_read_from_appends() {
        let mut src = Cursor::new(b"0123456789".to_vec());
        let mut buf = ByteBuffer::allocate(6);
        assert_eq!(buf.read_from(&mut src).unwrap(), 6);
        assert_eq!(buf.read_from(&mut src).unwrap(), 0);
        buf.flip();
        assert_eq!(buf.remaining_slice(), b"012345");
    }

    #[test]
    fn test_freeze_heap_and_direct() {
        let mut heap = ByteBuffer::copy_from_slice(b"abcdef");
        heap.advance(1).unwrap();
        heap.set_limit(4).unwrap();
        assert_eq!(heap.freeze(), Bytes::from_static(b"bcd"));

        let mut direct = ByteBuffer::allocate_direct(4).unwrap();
        direct.put_slice(b"wxyz").unwrap();
        direct.flip();
        assert_eq!(direct.freeze(), Bytes::from_static(b"wxyz"));
    }

    #[test]
    fn test_equality_uses_remaining_bytes() {
        let mut a = ByteBuffer::copy_from_slice(b"_abc");
        a.advance(1).unwrap();
        let mut b = ByteBuffer::allocate_direct(3).unwrap();
        b.put_slice(b"abc").unwrap();
        b.flip();
        assert_eq!(a, b);
    }

    #[test]
    fn test_debug_does_not_dump_contents() {
        let buf = ByteBuffer::copy_from_slice(b"secret");
        let s = format!("{:?}", buf);
        assert!(s.contains("capacity: 6"));
        assert!(!s.contains("secret"));
    }
}
