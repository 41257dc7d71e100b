#![no_main]

use std::io::{self, Read, Write};

use directbuf::{Blake3Hasher, Copier, CopyConfig, HashConfig};
use libfuzzer_sys::fuzz_target;

/// Reader whose read sizes are driven by the fuzzer.
struct ScriptedReader<'a> {
    data: &'a [u8],
    sizes: &'a [u8],
    step: usize,
}

impl Read for ScriptedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let want = self.sizes.get(self.step % self.sizes.len().max(1)).copied().unwrap_or(255);
        self.step += 1;
        let n = buf.len().min(usize::from(want).max(1)).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Writer whose write sizes are driven by the fuzzer.
struct ScriptedWriter<'a> {
    out: Vec<u8>,
    sizes: &'a [u8],
    step: usize,
}

impl Write for ScriptedWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let want = self.sizes.get(self.step % self.sizes.len().max(1)).copied().unwrap_or(255);
        self.step += 1;
        let n = buf.len().min(usize::from(want).max(1));
        self.out.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fuzz_target!(|input: (u16, bool, Vec<u8>, Vec<u8>, Vec<u8>)| {
    let (buffer_size, direct, read_sizes, write_sizes, data) = input;
    let buffer_size = usize::from(buffer_size).max(1);

    let config = CopyConfig::new(buffer_size)
        .unwrap()
        .with_direct(direct)
        .with_hash_config(HashConfig::enabled());

    let mut src = ScriptedReader {
        data: &data,
        sizes: &read_sizes,
        step: 0,
    };
    let mut dest = ScriptedWriter {
        out: Vec::new(),
        sizes: &write_sizes,
        step: 0,
    };

    let stats = Copier::new(config).copy(&mut src, &mut dest).unwrap();

    // Verify: every byte arrives once, in order
    assert_eq!(dest.out, data);
    assert_eq!(stats.bytes_copied, data.len() as u64);

    // Verify: digest covers exactly the copied bytes
    assert_eq!(stats.hash, Some(Blake3Hasher::hash(&data)));
});
