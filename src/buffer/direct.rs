//! Off-heap storage backing direct buffers.

use std::alloc::{Layout, alloc_zeroed, dealloc, handle_alloc_error};
use std::fmt;
use std::mem::ManuallyDrop;
use std::ptr::NonNull;
use std::sync::OnceLock;

use crate::error::BufferError;

/// Page size assumed where the OS cannot be asked.
const FALLBACK_PAGE_SIZE: usize = 4096;

/// Returns the system page size, queried once per process.
#[cfg(unix)]
pub(crate) fn page_size() -> usize {
    static PAGE_SIZE: OnceLock<usize> = OnceLock::new();
    *PAGE_SIZE.get_or_init(|| {
        // SAFETY: sysconf has no preconditions; _SC_PAGESIZE is always a valid name.
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        match usize::try_from(size) {
            Ok(size) if size.is_power_of_two() => size,
            _ => FALLBACK_PAGE_SIZE,
        }
    })
}

#[cfg(not(unix))]
pub(crate) fn page_size() -> usize {
    static PAGE_SIZE: OnceLock<usize> = OnceLock::new();
    *PAGE_SIZE.get_or_init(|| FALLBACK_PAGE_SIZE)
}

/// A page-aligned, zero-initialised memory region owned outside any
/// collection type.
///
/// Dropping a region deallocates it. [`DirectRegion::release`] does the same
/// thing explicitly and is what release hooks call. A region is never empty:
/// zero-capacity direct buffers carry no region at all.
pub struct DirectRegion {
    ptr: NonNull<u8>,
    layout: Layout,
}

// SAFETY: DirectRegion uniquely owns its allocation; the pointer is never shared.
unsafe impl Send for DirectRegion {}
// SAFETY: shared access only hands out `&[u8]`; mutation requires `&mut self`.
unsafe impl Sync for DirectRegion {}

impl DirectRegion {
    /// Allocates a zeroed region of `capacity` bytes.
    ///
    /// Returns `Ok(None)` for a zero capacity, nothing is allocated then.
    pub(crate) fn allocate(capacity: usize) -> Result<Option<Self>, BufferError> {
        if capacity == 0 {
            return Ok(None);
        }

        let layout = Layout::from_size_align(capacity, page_size()).map_err(|_| {
            BufferError::InvalidArgument {
                message: "direct buffer capacity is too large",
            }
        })?;

        // SAFETY: layout has a non-zero size and a power-of-two alignment.
        let ptr = unsafe { alloc_zeroed(layout) };
        let Some(ptr) = NonNull::new(ptr) else {
            handle_alloc_error(layout);
        };

        Ok(Some(Self { ptr, layout }))
    }

    /// Returns the size of the region in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.layout.size()
    }

    /// Returns the alignment the region was allocated with.
    #[inline]
    pub fn alignment(&self) -> usize {
        self.layout.align()
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        // SAFETY: ptr is valid for layout.size() initialised bytes for the life of self.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.layout.size()) }
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as above, and `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.layout.size()) }
    }

    /// Frees the region immediately.
    pub fn release(self) {
        let region = ManuallyDrop::new(self);
        // SAFETY: ptr was allocated with this layout in `allocate`, and
        // ManuallyDrop keeps Drop from freeing it a second time.
        unsafe { dealloc(region.ptr.as_ptr(), region.layout) };
    }
}

impl Drop for DirectRegion {
    fn drop(&mut self) {
        // SAFETY: ptr was allocated with this layout in `allocate`.
        unsafe { dealloc(self.ptr.as_ptr(), self.layout) };
    }
}

impl fmt::Debug for DirectRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectRegion")
            .field("capacity", &self.capacity())
            .field("alignment", &self.alignment())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_allocates_nothing() {
        assert!(DirectRegion::allocate(0).unwrap().is_none());
    }

    #[test]
    fn test_region_is_zeroed_and_page_aligned() {
        let region = DirectRegion::allocate(100).unwrap().unwrap();
        assert_eq!(region.capacity(), 100);
        assert_eq!(region.alignment(), page_size());
        assert_eq!(region.as_slice().as_ptr() as usize % page_size(), 0);
        assert!(region.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_write_then_release() {
        let mut region = DirectRegion::allocate(16).unwrap().unwrap();
        region.as_mut_slice().copy_from_slice(&[7u8; 16]);
        assert_eq!(region.as_slice(), &[7u8; 16]);
        region.release();
    }

    #[test]
    fn test_oversized_capacity_is_rejected() {
        assert!(matches!(
            DirectRegion::allocate(usize::MAX),
            Err(BufferError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_page_size_is_power_of_two() {
        assert!(page_size().is_power_of_two());
    }
}
