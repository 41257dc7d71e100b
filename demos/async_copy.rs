//! Async copy example.
//!
//! Copies several in-memory streams concurrently on tokio, bridging tokio's
//! I/O traits to `futures-io` with `tokio-util`'s compat layer.
//!
//! Run with:
//!     cargo run --example async_copy --features async-io

use directbuf::pattern::{increasing_bytes, is_increasing};
use directbuf::{CopyConfig, copy_all_async};
use tokio_util::compat::{TokioAsyncReadCompatExt, TokioAsyncWriteCompatExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let streams: Vec<(i32, Vec<u8>)> = (0..3)
        .map(|i| (i * 50_000, increasing_bytes(i * 50_000, 50_000 + i as usize)))
        .collect();

    println!("Copying {} streams concurrently...\n", streams.len());

    let handles: Vec<_> = streams
        .into_iter()
        .enumerate()
        .map(|(stream_id, (start, data))| {
            tokio::spawn(async move {
                let mut dest = Vec::<u8>::new().compat_write();
                let config = CopyConfig::new(8 * 1024)?;
                let stats = copy_all_async((&data[..]).compat(), &mut dest, config)?.await?;
                let out = dest.into_inner();
                let intact = is_increasing(start, data.len(), &out);
                Ok::<_, directbuf::BufferError>((stream_id, stats, intact))
            })
        })
        .collect();

    for handle in handles {
        let (stream_id, stats, intact) = handle.await??;
        println!("Stream {}: {} (intact: {})", stream_id, stats, intact);
    }

    Ok(())
}
