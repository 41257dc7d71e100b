//! Error types for directbuf.

use thiserror::Error;

/// Errors that can occur during buffer and copy operations.
#[derive(Debug, Error)]
pub enum BufferError {
    /// An I/O error occurred on one of the copy endpoints.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The caller passed an argument the operation cannot accept.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// A relative put did not fit in the buffer's remaining window.
    #[error("buffer overflow: {requested} bytes requested, {remaining} remaining")]
    Overflow {
        /// The number of bytes the caller tried to write.
        requested: usize,
        /// The number of bytes left between position and limit.
        remaining: usize,
    },

    /// A relative get asked for more bytes than the buffer holds.
    #[error("buffer underflow: {requested} bytes requested, {remaining} remaining")]
    Underflow {
        /// The number of bytes the caller tried to read.
        requested: usize,
        /// The number of bytes left between position and limit.
        remaining: usize,
    },

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl BufferError {
    /// Returns true if this error came from an endpoint rather than from the caller.
    pub fn is_io(&self) -> bool {
        matches!(self, BufferError::Io(_))
    }
}
