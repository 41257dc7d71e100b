//! Direct buffer lifecycle example.
//!
//! Allocates off-heap buffers, duplicates one into heap storage and frees
//! the originals without waiting for them to drop.
//!
//! Run with:
//!     cargo run --example release_direct

use directbuf::pattern::{increasing_bytes, is_increasing_buffer};
use directbuf::{ByteBuffer, ReleaseOutcome, duplicate, force_release};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sizes = [4 * 1024, 256 * 1024, 8 * 1024 * 1024];

    for size in sizes {
        let mut buf = ByteBuffer::allocate_direct(size)?;
        buf.put_slice(&increasing_bytes(0, size))?;
        buf.flip();
        println!("Allocated {:?}", buf);

        // Keep a heap copy that outlives the region
        let copy = duplicate(&buf);

        match force_release(buf)? {
            ReleaseOutcome::Released => println!("  released {} bytes", size),
            ReleaseOutcome::NoHookAvailable => println!("  nothing to release"),
            ReleaseOutcome::Failed(e) => println!("  release failed: {}", e),
        }

        println!(
            "  heap copy intact: {}",
            is_increasing_buffer(0, size, &copy)
        );
    }

    // Heap buffers are not eligible
    if let Err(e) = force_release(ByteBuffer::allocate(16)) {
        println!("\nHeap buffer rejected: {}", e);
    }

    Ok(())
}
