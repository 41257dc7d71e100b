//! The CopyStats type - what a finished copy moved.

use std::fmt;

use crate::hash::ContentHash;

/// Summary of a completed copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CopyStats {
    /// Total bytes accepted by the destination.
    pub bytes_copied: u64,

    /// Number of read calls that returned data or end of stream.
    pub reads: u64,

    /// Number of write calls that accepted at least one byte.
    pub writes: u64,

    /// BLAKE3 digest of the copied bytes (if hashing was enabled).
    pub hash: Option<ContentHash>,
}

impl CopyStats {
    #[inline]
    pub(crate) fn record_read(&mut self) {
        self.reads += 1;
    }

    #[inline]
    pub(crate) fn record_write(&mut self, n: usize) {
        self.writes += 1;
        self.bytes_copied += n as u64;
    }
}

impl fmt::Display for CopyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes in {} reads / {} writes",
            self.bytes_copied, self.reads, self.writes
        )?;
        if let Some(hash) = self.hash {
            write!(f, ", hash={}", hash)?;
        }
        Ok(())
    }
}
