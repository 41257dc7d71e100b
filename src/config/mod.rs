//! Configuration for copy behavior.
//!
//! This module provides types to configure how streaming copies are performed:
//!
//! - [`CopyConfig`] - Controls the intermediate buffer and digest computation
//! - [`HashConfig`] - Specifies whether to compute a digest of copied bytes
//!
//! # Example
//!
//! ```
//! use directbuf::{CopyConfig, HashConfig};
//!
//! // Custom intermediate buffer size
//! let config = CopyConfig::new(64 * 1024)?;
//!
//! // Heap intermediate buffer with a transfer digest
//! let config = CopyConfig::default()
//!     .with_direct(false)
//!     .with_hash_config(HashConfig::enabled());
//!
//! # Ok::<(), directbuf::BufferError>(())
//! ```

use crate::error::BufferError;

/// Default size of the reused intermediate copy buffer (16 KiB).
pub const DEFAULT_COPY_BUFFER_SIZE: usize = 16 * 1024;

/// Configuration for a streaming copy.
///
/// `CopyConfig` controls the single intermediate buffer used by
/// [`Copier`](crate::Copier):
///
/// - Buffer size (`buffer_size`) - Fixed capacity of the intermediate buffer.
///   Memory use of a copy is bounded by this value no matter how many bytes
///   are transferred.
/// - Backing (`direct`) - Whether the intermediate buffer is allocated
///   off-heap (the default) or as a regular heap buffer.
/// - Hashing (`hash_config`) - Whether a BLAKE3 digest of the transferred
///   bytes is computed.
///
/// # Size Constraints
///
/// The buffer size must be non-zero. Any non-zero size is correct, small
/// sizes only cost more read and write calls.
///
/// # Example
///
/// ```
/// use directbuf::CopyConfig;
///
/// // Use default configuration
/// let config = CopyConfig::default();
/// assert_eq!(config.buffer_size(), 16 * 1024);
///
/// // Builder pattern
/// let config = CopyConfig::default().with_buffer_size(8192);
/// assert_eq!(config.buffer_size(), 8192);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CopyConfig {
    /// Capacity of the intermediate buffer in bytes.
    buffer_size: usize,

    /// Whether the intermediate buffer lives off-heap.
    direct: bool,

    /// Configuration for hashing behavior.
    hash_config: HashConfig,
}

impl CopyConfig {
    /// Creates a new configuration with the given intermediate buffer size.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if `buffer_size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use directbuf::CopyConfig;
    ///
    /// let config = CopyConfig::new(4096)?;
    /// assert_eq!(config.buffer_size(), 4096);
    /// assert!(CopyConfig::new(0).is_err());
    /// # Ok::<(), directbuf::BufferError>(())
    /// ```
    pub fn new(buffer_size: usize) -> Result<Self, BufferError> {
        if buffer_size == 0 {
            return Err(BufferError::InvalidConfig {
                message: "buffer_size must be non-zero",
            });
        }

        Ok(Self {
            buffer_size,
            ..Self::default()
        })
    }

    /// Sets the intermediate buffer size.
    ///
    /// Note: This does not validate the configuration. Use [`CopyConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Sets whether the intermediate buffer is allocated off-heap.
    pub fn with_direct(mut self, direct: bool) -> Self {
        self.direct = direct;
        self
    }

    /// Sets the hash configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use directbuf::{CopyConfig, HashConfig};
    ///
    /// let config = CopyConfig::default()
    ///     .with_hash_config(HashConfig::enabled());
    /// assert!(config.hash_config().enabled);
    /// ```
    pub fn with_hash_config(mut self, config: HashConfig) -> Self {
        self.hash_config = config;
        self
    }

    /// Returns the intermediate buffer size.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Returns true if the intermediate buffer is allocated off-heap.
    pub fn direct(&self) -> bool {
        self.direct
    }

    /// Returns the hash configuration.
    pub fn hash_config(&self) -> &HashConfig {
        &self.hash_config
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use directbuf::CopyConfig;
    ///
    /// let config = CopyConfig::default().with_buffer_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), BufferError> {
        Self::new(self.buffer_size).map(|_| ())
    }
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_COPY_BUFFER_SIZE,
            direct: true,
            hash_config: HashConfig::default(),
        }
    }
}

/// Configuration for the transfer digest.
///
/// `HashConfig` controls whether a BLAKE3 digest is computed over every
/// byte a copy writes. Hashing is disabled by default, copies are on the
/// hot path. It has no effect without the `hash-blake3` feature.
///
/// # Example
///
/// ```
/// use directbuf::HashConfig;
///
/// let config = HashConfig::enabled();
/// assert!(config.enabled);
///
/// let config = HashConfig::disabled();
/// assert!(!config.enabled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HashConfig {
    /// Whether to compute a BLAKE3 digest of copied bytes.
    pub enabled: bool,
}

impl HashConfig {
    /// Creates a new hash configuration.
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Enables hashing.
    pub const fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Disables hashing.
    pub const fn disabled() -> Self {
        Self { enabled: false }
    }
}
