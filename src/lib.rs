//! directbuf
//!
//! Off-heap byte buffers, duplication and bounded streaming copy for Rust.
//!
//! `directbuf` covers the small set of buffer chores that sit underneath
//! block stores, data-transfer paths and network plumbing:
//!
//! - releasing an off-heap (direct) buffer's memory right now instead of
//!   waiting for its owner to go out of scope
//! - duplicating buffer contents into independent storage
//! - copying an entire stream between endpoints through one reusable
//!   intermediate buffer, coping with partial reads and writes
//!
//! The crate intentionally:
//! - does NOT pool or reference-count buffers
//! - does NOT open, flush or close endpoints
//! - does NOT spawn threads or tasks
//!
//! # Copy
//!
//! ```no_run
//! use std::fs::File;
//! use directbuf::{copy_all, BufferError};
//!
//! fn main() -> Result<(), BufferError> {
//!     let mut src = File::open("data.bin")?;
//!     let mut dest = File::create("copy.bin")?;
//!
//!     let stats = copy_all(&mut src, &mut dest)?;
//!     println!("copied {}", stats);
//!     Ok(())
//! }
//! ```
//!
//! # Release
//!
//! ```
//! use directbuf::{force_release, ByteBuffer, ReleaseOutcome};
//!
//! let buf = ByteBuffer::allocate_direct(1 << 20)?;
//! assert_eq!(force_release(buf)?, ReleaseOutcome::Released);
//! # Ok::<(), directbuf::BufferError>(())
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use directbuf::{copy_all_async, CopyConfig};
//! use futures_io::{AsyncRead, AsyncWrite};
//!
//! async fn demo<R: AsyncRead, W: AsyncWrite>(r: R, w: W) -> Result<(), directbuf::BufferError> {
//!     let stats = copy_all_async(r, w, CopyConfig::default())?.await?;
//!     println!("copied {}", stats);
//!     Ok(())
//! }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod copy;
mod duplicate;
mod error;
mod release;

mod hash; // internal blake3 impl

pub mod pattern;

//
// Public surface
//

pub use buffer::{ByteBuffer, DirectRegion};
pub use config::{CopyConfig, DEFAULT_COPY_BUFFER_SIZE, HashConfig};
pub use copy::{CopyStats, Copier, copy_all};
pub use duplicate::{duplicate, duplicate_all};
pub use error::BufferError;
pub use hash::ContentHash;
pub use release::{
    CleanerDiscovery, RegionCleaner, ReleaseFailure, ReleaseHook, ReleaseHookProvider,
    ReleaseOutcome, Releaser, SystemCleanerDiscovery, force_release,
};

#[cfg(feature = "hash-blake3")]
pub use hash::Blake3Hasher;

#[cfg(feature = "async-io")]
pub use copy::{CopyAll, copy_all_async};
