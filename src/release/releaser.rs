//! Forced release of direct buffers.
//!
//! Dropping a direct [`ByteBuffer`] already frees its region. Forcing the
//! release through a [`Releaser`] does it at a chosen point and reports what
//! happened as a [`ReleaseOutcome`], without ever failing the caller for
//! anything but a misuse (passing a heap buffer).
//!
//! # Example
//!
//! ```
//! use directbuf::{ByteBuffer, ReleaseOutcome, force_release};
//!
//! let buf = ByteBuffer::allocate_direct(1 << 20)?;
//! // ... use the buffer ...
//! let outcome = force_release(buf)?;
//! assert_eq!(outcome, ReleaseOutcome::Released);
//! # Ok::<(), directbuf::BufferError>(())
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock};

use super::hook::{
    CleanerDiscovery, ReleaseFailure, ReleaseHookProvider, SystemCleanerDiscovery,
};
use crate::buffer::ByteBuffer;
use crate::error::BufferError;

/// What a forced release actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The region was freed before the call returned.
    Released,
    /// The buffer exposed nothing to free (for example, zero capacity).
    NoHookAvailable,
    /// Release was attempted and failed; the storage may still be live
    /// until the runtime reclaims it.
    Failed(ReleaseFailure),
}

impl ReleaseOutcome {
    /// Returns true if the storage was freed by this call.
    pub fn is_released(&self) -> bool {
        matches!(self, ReleaseOutcome::Released)
    }
}

/// Service that frees direct buffers on request.
///
/// A releaser asks its [`CleanerDiscovery`] for a [`ReleaseHookProvider`]
/// the first time it is used and keeps the first provider discovered
/// successfully for the rest of its life. Failed discoveries are retried on
/// the next call. Concurrent first calls may each run discovery; exactly one
/// result is kept.
///
/// Most callers use the process-wide instance through
/// [`force_release`]. Build your own with [`Releaser::new`] to substitute
/// the discovery, e.g. in tests.
pub struct Releaser {
    discovery: Box<dyn CleanerDiscovery>,
    provider: OnceLock<Arc<dyn ReleaseHookProvider>>,
}

impl Releaser {
    /// Creates a releaser that finds its provider through `discovery`.
    pub fn new<D>(discovery: D) -> Self
    where
        D: CleanerDiscovery + 'static,
    {
        Self {
            discovery: Box::new(discovery),
            provider: OnceLock::new(),
        }
    }

    /// Returns the process-wide releaser, using [`SystemCleanerDiscovery`].
    pub fn global() -> &'static Releaser {
        static GLOBAL: OnceLock<Releaser> = OnceLock::new();
        GLOBAL.get_or_init(Releaser::default)
    }

    /// Returns true once a provider has been discovered and cached.
    pub fn is_discovered(&self) -> bool {
        self.provider.get().is_some()
    }

    fn provider(&self) -> Result<&Arc<dyn ReleaseHookProvider>, ReleaseFailure> {
        if let Some(provider) = self.provider.get() {
            return Ok(provider);
        }

        let discovered = self.discovery.discover()?;
        tracing::trace!("release hook provider discovered");
        Ok(self.provider.get_or_init(|| discovered))
    }

    /// Frees `buffer`'s off-heap storage now.
    ///
    /// The buffer is consumed whatever the outcome, so it cannot be touched
    /// after its storage may have been freed. Any failure to release is
    /// logged and reported as [`ReleaseOutcome::Failed`]; storage that was
    /// not freed is reclaimed when the last owner of it drops.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] if `buffer` is heap-backed.
    /// Nothing is released in that case.
    pub fn force_release(&self, buffer: ByteBuffer) -> Result<ReleaseOutcome, BufferError> {
        if !buffer.is_direct() {
            return Err(BufferError::InvalidArgument {
                message: "buffer isn't a direct buffer",
            });
        }

        let capacity = buffer.capacity();
        let provider = match self.provider() {
            Ok(provider) => provider,
            Err(e) => {
                tracing::warn!(capacity, error = %e, "failed to discover release hook provider");
                return Ok(ReleaseOutcome::Failed(e));
            }
        };

        let hook = match provider.try_get_release_hook(buffer) {
            Ok(Some(hook)) => hook,
            Ok(None) => {
                if capacity > 0 {
                    tracing::warn!(capacity, "no release hook for direct buffer");
                }
                return Ok(ReleaseOutcome::NoHookAvailable);
            }
            Err(e) => {
                tracing::warn!(capacity, error = %e, "failed to get release hook for direct buffer");
                return Ok(ReleaseOutcome::Failed(e));
            }
        };

        match hook.invoke() {
            Ok(()) => {
                tracing::trace!(capacity, "released direct buffer");
                Ok(ReleaseOutcome::Released)
            }
            Err(e) => {
                tracing::warn!(capacity, error = %e, "failed to release direct buffer");
                Ok(ReleaseOutcome::Failed(e))
            }
        }
    }
}

impl Default for Releaser {
    fn default() -> Self {
        Self::new(SystemCleanerDiscovery)
    }
}

impl fmt::Debug for Releaser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Releaser")
            .field("discovered", &self.is_discovered())
            .finish_non_exhaustive()
    }
}

/// Frees a direct buffer's storage through the process-wide [`Releaser`].
///
/// See [`Releaser::force_release`].
pub fn force_release(buffer: ByteBuffer) -> Result<ReleaseOutcome, BufferError> {
    Releaser::global().force_release(buffer)
}
