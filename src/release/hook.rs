//! Release hooks and the seams that find them.
//!
//! - [`ReleaseHook`] - One-shot action that frees a region immediately
//! - [`ReleaseHookProvider`] - Looks up the hook for a particular buffer
//! - [`CleanerDiscovery`] - Finds the provider once per [`Releaser`](super::Releaser)
//!
//! [`SystemCleanerDiscovery`] and [`RegionCleaner`] are the defaults.
//! Substitute either to change how, or whether, buffers are released.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::buffer::{ByteBuffer, DirectRegion};

/// Why a forced release could not be carried out.
///
/// Failures are reported through
/// [`ReleaseOutcome::Failed`](super::ReleaseOutcome::Failed), never as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReleaseFailure {
    /// The buffer's storage is of a kind this provider cannot release.
    #[error("release unsupported: {reason}")]
    Unsupported {
        /// Human-readable detail.
        reason: String,
    },

    /// The release mechanism exists but refused the request.
    #[error("release denied: {reason}")]
    Denied {
        /// Human-readable detail.
        reason: String,
    },

    /// The release mechanism failed internally.
    #[error("release failed: {reason}")]
    Internal {
        /// Human-readable detail.
        reason: String,
    },
}

/// A deallocation action bound to one buffer's storage.
///
/// The action is an `FnOnce`, so a hook can be invoked at most once.
pub struct ReleaseHook {
    release: Box<dyn FnOnce() -> Result<(), ReleaseFailure> + Send>,
}

impl ReleaseHook {
    /// Wraps an arbitrary release action.
    pub fn new<F>(release: F) -> Self
    where
        F: FnOnce() -> Result<(), ReleaseFailure> + Send + 'static,
    {
        Self {
            release: Box::new(release),
        }
    }

    /// Creates a hook that frees `region` when invoked.
    pub fn for_region(region: DirectRegion) -> Self {
        Self::new(move || {
            region.release();
            Ok(())
        })
    }

    /// Runs the release action, consuming the hook.
    pub fn invoke(self) -> Result<(), ReleaseFailure> {
        (self.release)()
    }
}

impl fmt::Debug for ReleaseHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseHook").finish_non_exhaustive()
    }
}

/// Looks up the release hook for a buffer.
///
/// The provider takes ownership of the buffer. Returning `Ok(None)` means
/// the buffer exposes nothing to free; whatever storage it still owns is
/// reclaimed when it drops.
pub trait ReleaseHookProvider: Send + Sync {
    /// Returns the hook that frees `buffer`'s storage, if it has one.
    fn try_get_release_hook(
        &self,
        buffer: ByteBuffer,
    ) -> Result<Option<ReleaseHook>, ReleaseFailure>;
}

/// Finds the [`ReleaseHookProvider`] for the running process.
///
/// Discovery may be expensive; a [`Releaser`](super::Releaser) calls it
/// until it succeeds once and then reuses the result.
pub trait CleanerDiscovery: Send + Sync {
    /// Produces the provider, or explains why none is usable.
    fn discover(&self) -> Result<Arc<dyn ReleaseHookProvider>, ReleaseFailure>;
}

/// Releases the regions this crate allocates for direct buffers.
///
/// Only regions allocated with the page granularity recorded at discovery
/// are claimed.
#[derive(Debug, Clone, Copy)]
pub struct RegionCleaner {
    page_size: usize,
}

impl RegionCleaner {
    /// Creates a cleaner for regions aligned to `page_size`.
    pub fn new(page_size: usize) -> Self {
        Self { page_size }
    }

    /// Returns the alignment this cleaner expects.
    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

impl ReleaseHookProvider for RegionCleaner {
    fn try_get_release_hook(
        &self,
        buffer: ByteBuffer,
    ) -> Result<Option<ReleaseHook>, ReleaseFailure> {
        let Some(region) = buffer.into_direct_region() else {
            return Ok(None);
        };

        if region.alignment() != self.page_size {
            return Err(ReleaseFailure::Unsupported {
                reason: format!(
                    "region aligned to {} bytes, cleaner expects {}",
                    region.alignment(),
                    self.page_size
                ),
            });
        }

        Ok(Some(ReleaseHook::for_region(region)))
    }
}

/// Default discovery: asks the OS for its page size and hands out a
/// [`RegionCleaner`] for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCleanerDiscovery;

impl CleanerDiscovery for SystemCleanerDiscovery {
    fn discover(&self) -> Result<Arc<dyn ReleaseHookProvider>, ReleaseFailure> {
        let page_size = crate::buffer::page_size();
        if !page_size.is_power_of_two() {
            return Err(ReleaseFailure::Unsupported {
                reason: format!("page size {} is not a power of two", page_size),
            });
        }
        Ok(Arc::new(RegionCleaner::new(page_size)))
    }
}
