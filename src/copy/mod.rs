//! Streaming copy between byte endpoints.
//!
//! - [`Copier`] / [`copy_all`] - Sync copy over `std::io::Read` / `Write`
//! - [`copy_all_async`] - Async copy over `futures-io` (feature `async-io`)
//! - [`CopyStats`] - What a finished copy moved

mod copier;
mod stats;

#[cfg(feature = "async-io")]
mod async_copy;

pub use copier::{Copier, copy_all};
pub use stats::CopyStats;

#[cfg(feature = "async-io")]
pub use async_copy::{CopyAll, copy_all_async};

use std::io;

use crate::buffer::ByteBuffer;
use crate::config::CopyConfig;
use crate::error::BufferError;

/// Allocates the intermediate buffer for one copy.
pub(crate) fn transfer_buffer(config: &CopyConfig) -> Result<ByteBuffer, BufferError> {
    config.validate()?;
    if config.direct() {
        ByteBuffer::allocate_direct(config.buffer_size())
    } else {
        Ok(ByteBuffer::allocate(config.buffer_size()))
    }
}

/// Validates the count returned by a write of `offered` bytes.
pub(crate) fn checked_write_count(n: usize, offered: usize) -> io::Result<usize> {
    if n == 0 {
        return Err(io::Error::new(
            io::ErrorKind::WriteZero,
            "destination accepted no bytes",
        ));
    }
    if n > offered {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "destination reported more bytes than were offered",
        ));
    }
    Ok(n)
}
