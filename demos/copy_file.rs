//! File copy example.
//!
//! Run with:
//!     cargo run --example copy_file -- /path/to/src /path/to/dest

use std::env;
use std::fs::File;

use directbuf::{Copier, CopyConfig, HashConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let src_path = args.next().unwrap_or_else(|| "Cargo.toml".to_string());
    let dest_path = args
        .next()
        .unwrap_or_else(|| format!("{}.copy", src_path));

    println!("Copying {} -> {}\n", src_path, dest_path);

    let mut src = File::open(&src_path)?;
    let mut dest = File::create(&dest_path)?;
    println!("Source size: {} bytes", src.metadata()?.len());

    // 64 KiB direct buffer, digest on
    let config = CopyConfig::new(64 * 1024)?.with_hash_config(HashConfig::enabled());
    let stats = Copier::new(config).copy(&mut src, &mut dest)?;

    // The copier never flushes; files want an explicit sync.
    dest.sync_all()?;

    println!("Copied {}", stats);
    if let Some(hash) = stats.hash {
        println!("BLAKE3: {}", hash.to_hex());
    }

    Ok(())
}
