//! Core copy engine - Copier and copy_all.
//!
//! This module implements the synchronous streaming copy. It provides:
//!
//! - [`Copier`] - Configures and runs copies between endpoints
//! - [`copy_all`] - One-shot copy with the default configuration
//!
//! A copy moves every byte from a [`std::io::Read`] source to a
//! [`std::io::Write`] destination through a single intermediate buffer of
//! fixed size. Memory use is bounded by that buffer no matter how much is
//! transferred.
//!
//! # Example
//!
//! ```
//! use directbuf::{Copier, CopyConfig};
//! use std::io::Cursor;
//!
//! let mut src = Cursor::new(vec![7u8; 100_000]);
//! let mut dest: Vec<u8> = Vec::new();
//!
//! let copier = Copier::new(CopyConfig::default().with_buffer_size(4096));
//! let stats = copier.copy(&mut src, &mut dest)?;
//!
//! assert_eq!(stats.bytes_copied, 100_000);
//! assert_eq!(dest.len(), 100_000);
//! # Ok::<(), directbuf::BufferError>(())
//! ```

use std::io::{ErrorKind, Read, Write};

use super::{CopyStats, checked_write_count, transfer_buffer};
use crate::buffer::ByteBuffer;
use crate::config::CopyConfig;
use crate::error::BufferError;
use crate::hash::HasherState;

/// A copier that streams bytes from a source to a destination.
///
/// `Copier` holds a configuration and runs any number of independent
/// copies with it. Each copy allocates its own intermediate buffer.
///
/// # Partial I/O
///
/// - A read may return fewer bytes than asked for; the copier keeps reading.
/// - A write may accept fewer bytes than offered; the unwritten remainder is
///   compacted to the front of the buffer and written on a later pass, and a
///   final drain loop flushes whatever is left after end of stream.
///
/// # Errors
///
/// Any I/O error other than [`ErrorKind::Interrupted`] aborts the copy.
/// Bytes already accepted by the destination stay there.
#[derive(Debug, Clone, Default)]
pub struct Copier {
    config: CopyConfig,
}

impl Copier {
    /// Creates a new copier with the given configuration.
    pub fn new(config: CopyConfig) -> Self {
        Self { config }
    }

    /// Returns the copier's configuration.
    pub fn config(&self) -> &CopyConfig {
        &self.config
    }

    /// Copies every byte from `src` to `dest` until `src` reports end of stream.
    ///
    /// The destination is not flushed.
    ///
    /// # Errors
    ///
    /// - [`BufferError::InvalidConfig`] if the configured buffer size is zero
    /// - [`BufferError::Io`] if either endpoint fails, or if `dest` accepts
    ///   zero bytes while data is pending ([`ErrorKind::WriteZero`])
    pub fn copy<R, W>(&self, src: &mut R, dest: &mut W) -> Result<CopyStats, BufferError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let mut buffer = transfer_buffer(&self.config)?;
        let mut hasher = HasherState::new(self.config.hash_config());
        let mut stats = CopyStats::default();

        loop {
            // Every pass below leaves at least one free byte, so a zero-length
            // read can only mean end of stream.
            debug_assert!(buffer.has_remaining());
            let n = match buffer.read_from(src) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            stats.record_read();
            if n == 0 {
                break;
            }

            buffer.flip();
            write_once(&mut buffer, dest, &mut hasher, &mut stats)?;
            buffer.compact();
        }

        buffer.flip();
        while buffer.has_remaining() {
            write_once(&mut buffer, dest, &mut hasher, &mut stats)?;
        }

        stats.hash = hasher.finalize();
        tracing::debug!(
            bytes = stats.bytes_copied,
            reads = stats.reads,
            writes = stats.writes,
            "copy finished"
        );
        Ok(stats)
    }
}

/// Issues one successful write of the buffer's readable remainder.
fn write_once<W: Write + ?Sized>(
    buffer: &mut ByteBuffer,
    dest: &mut W,
    hasher: &mut HasherState,
    stats: &mut CopyStats,
) -> Result<(), BufferError> {
    loop {
        let pending = buffer.remaining_slice();
        let n = match dest.write(pending) {
            Ok(n) => checked_write_count(n, pending.len())?,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        hasher.update(&pending[..n]);
        buffer.advance(n)?;
        stats.record_write(n);
        return Ok(());
    }
}

/// Copies every byte from `src` to `dest` with [`CopyConfig::default`]:
/// a 16 KiB direct intermediate buffer, no digest.
///
/// # Example
///
/// ```
/// use directbuf::copy_all;
///
/// let mut src: &[u8] = b"hello world";
/// let mut dest: Vec<u8> = Vec::new();
/// let stats = copy_all(&mut src, &mut dest)?;
///
/// assert_eq!(dest, b"hello world");
/// assert_eq!(stats.bytes_copied, 11);
/// # Ok::<(), directbuf::BufferError>(())
/// ```
pub fn copy_all<R, W>(src: &mut R, dest: &mut W) -> Result<CopyStats, BufferError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    Copier::default().copy(src, dest)
}
