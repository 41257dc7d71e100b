//! Async streaming copy.
//!
//! This module provides the asynchronous copy using the `futures-io`
//! `AsyncRead`/`AsyncWrite` traits, making it runtime-agnostic and
//! compatible with tokio, async-std, smol, and other async runtimes.
//!
//! # Example
//!
//! ```ignore
//! use directbuf::{copy_all_async, CopyConfig};
//! use futures_io::{AsyncRead, AsyncWrite};
//!
//! async fn demo<R, W>(reader: R, writer: W) -> Result<(), directbuf::BufferError>
//! where
//!     R: AsyncRead,
//!     W: AsyncWrite,
//! {
//!     let stats = copy_all_async(reader, writer, CopyConfig::default())?.await?;
//!     println!("copied {}", stats);
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::io::{self, ErrorKind};
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures_io::{AsyncRead, AsyncWrite};
use pin_project_lite::pin_project;

use super::{CopyStats, checked_write_count, transfer_buffer};
use crate::buffer::ByteBuffer;
use crate::config::CopyConfig;
use crate::error::BufferError;
use crate::hash::HasherState;

/// Where the copy loop is between polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Appending to the buffer from the reader.
    Reading,
    /// One write of the buffered bytes before reading again.
    Writing,
    /// The reader is exhausted; write until the buffer is empty.
    Draining,
}

pin_project! {
    /// A future that copies every byte from an async reader to an async writer.
    ///
    /// Created by [`copy_all_async`]. It runs the same loop as
    /// [`Copier`](crate::Copier) and keeps its place across `Poll::Pending`,
    /// so a writer that applies back-pressure never causes bytes to be
    /// re-read or dropped.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct CopyAll<R, W> {
        #[pin]
        reader: R,
        #[pin]
        writer: W,
        buffer: ByteBuffer,
        state: State,
        hasher: HasherState,
        stats: CopyStats,
    }
}

impl<R, W> CopyAll<R, W> {
    fn new(reader: R, writer: W, config: &CopyConfig) -> Result<Self, BufferError> {
        Ok(Self {
            reader,
            writer,
            buffer: transfer_buffer(config)?,
            state: State::Reading,
            hasher: HasherState::new(config.hash_config()),
            stats: CopyStats::default(),
        })
    }

    /// Returns the progress made so far.
    pub fn stats(&self) -> &CopyStats {
        &self.stats
    }
}

impl<R: AsyncRead, W: AsyncWrite> Future for CopyAll<R, W> {
    type Output = Result<CopyStats, BufferError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            match *this.state {
                State::Reading => {
                    let window = this.buffer.remaining();
                    let n = match ready!(this.reader.as_mut().poll_read(cx, this.buffer.unfilled_mut())) {
                        Ok(n) => n,
                        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                        Err(e) => return Poll::Ready(Err(e.into())),
                    };
                    if n > window {
                        return Poll::Ready(Err(io::Error::new(
                            ErrorKind::InvalidData,
                            "reader reported more bytes than the buffer window holds",
                        )
                        .into()));
                    }
                    this.stats.record_read();

                    if n == 0 {
                        this.buffer.flip();
                        *this.state = State::Draining;
                        continue;
                    }

                    this.buffer.advance(n)?;
                    this.buffer.flip();
                    *this.state = State::Writing;
                }
                State::Writing | State::Draining => {
                    if !this.buffer.has_remaining() {
                        this.stats.hash = this.hasher.finalize();
                        tracing::debug!(
                            bytes = this.stats.bytes_copied,
                            reads = this.stats.reads,
                            writes = this.stats.writes,
                            "async copy finished"
                        );
                        return Poll::Ready(Ok(*this.stats));
                    }

                    let pending = this.buffer.remaining_slice();
                    let n = match ready!(this.writer.as_mut().poll_write(cx, pending)) {
                        Ok(n) => checked_write_count(n, pending.len())?,
                        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                        Err(e) => return Poll::Ready(Err(e.into())),
                    };
                    this.hasher.update(&pending[..n]);
                    this.buffer.advance(n)?;
                    this.stats.record_write(n);

                    if *this.state == State::Writing {
                        this.buffer.compact();
                        *this.state = State::Reading;
                    }
                }
            }
        }
    }
}

/// Creates a future that copies every byte from `reader` to `writer`.
///
/// Uses `futures_io` traits, so it works with any async runtime. For tokio
/// types, adapt them with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::{TokioAsyncReadCompatExt, TokioAsyncWriteCompatExt};
/// use directbuf::{copy_all_async, CopyConfig};
///
/// let src = tokio::fs::File::open("in.bin").await?;
/// let dest = tokio::fs::File::create("out.bin").await?;
/// let stats = copy_all_async(src.compat(), dest.compat_write(), CopyConfig::default())?.await?;
/// ```
///
/// The writer is not flushed or closed when the copy completes.
///
/// # Errors
///
/// Returns [`BufferError::InvalidConfig`] right away if the configured
/// buffer size is zero. The future itself fails with [`BufferError::Io`]
/// on any endpoint error other than `Interrupted`.
pub fn copy_all_async<R, W>(
    reader: R,
    writer: W,
    config: CopyConfig,
) -> Result<CopyAll<R, W>, BufferError>
where
    R: AsyncRead,
    W: AsyncWrite,
{
    CopyAll::new(reader, writer, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::io::Cursor;

    #[tokio::test]
    async fn test_copy_async_empty() {
        let reader: &[u8] = &[];
        let mut out = Cursor::new(Vec::<u8>::new());
        let stats = copy_all_async(reader, &mut out, CopyConfig::default())
            .unwrap()
            .await
            .unwrap();

        assert_eq!(stats.bytes_copied, 0);
        assert!(out.into_inner().is_empty());
    }

    #[tokio::test]
    async fn test_copy_async_small_buffer() {
        let data: Vec<u8> = (0..10_000).map(|i| (i % 256) as u8).collect();
        let reader: &[u8] = &data;
        let mut out = Cursor::new(Vec::<u8>::new());
        let config = CopyConfig::default().with_buffer_size(97);

        let stats = copy_all_async(reader, &mut out, config)
            .unwrap()
            .await
            .unwrap();

        assert_eq!(stats.bytes_copied, 10_000);
        assert_eq!(out.into_inner(), data);
    }

    #[test]
    fn test_zero_buffer_rejected_eagerly() {
        let reader: &[u8] = b"x";
        let config = CopyConfig::default().with_buffer_size(0);
        assert!(matches!(
            copy_all_async(reader, Cursor::new(Vec::<u8>::new()), config),
            Err(BufferError::InvalidConfig { .. })
        ));
    }
}
