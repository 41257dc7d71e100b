//! Transfer digests.
//!
//! - [`ContentHash`] - 32-byte digest of copied bytes
//! - [`Blake3Hasher`] - BLAKE3 implementation (requires `hash-blake3` feature)
//!
//! Copies feed every written byte through a [`HasherState`], which is a
//! no-op unless hashing is both compiled in and enabled in the config.

#[cfg(feature = "hash-blake3")]
mod blake3;
mod digest;

#[cfg(feature = "hash-blake3")]
pub use blake3::Blake3Hasher;
pub use digest::ContentHash;

use crate::config::HashConfig;

/// Optional digest state carried by a copy.
#[cfg(feature = "hash-blake3")]
pub(crate) struct HasherState {
    hasher: Option<Blake3Hasher>,
}

#[cfg(not(feature = "hash-blake3"))]
pub(crate) struct HasherState;

#[cfg(feature = "hash-blake3")]
impl HasherState {
    pub(crate) fn new(config: &HashConfig) -> Self {
        Self {
            hasher: config.enabled.then(Blake3Hasher::new),
        }
    }

    #[inline]
    pub(crate) fn update(&mut self, data: &[u8]) {
        if let Some(hasher) = self.hasher.as_mut() {
            hasher.update(data);
        }
    }

    pub(crate) fn finalize(&self) -> Option<ContentHash> {
        self.hasher.as_ref().map(Blake3Hasher::finalize)
    }
}

#[cfg(not(feature = "hash-blake3"))]
impl HasherState {
    pub(crate) fn new(_config: &HashConfig) -> Self {
        Self
    }

    #[inline]
    pub(crate) fn update(&mut self, _data: &[u8]) {}

    pub(crate) fn finalize(&self) -> Option<ContentHash> {
        None
    }
}
