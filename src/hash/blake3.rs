//! BLAKE3-based transfer digest implementation.

use super::ContentHash;

/// A hasher that computes BLAKE3 digests incrementally.
#[derive(Debug, Clone)]
pub struct Blake3Hasher {
    state: blake3::Hasher,
}

impl Blake3Hasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self {
            state: blake3::Hasher::new(),
        }
    }

    /// Updates the hasher with more data.
    pub fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Finalizes and returns the digest.
    pub fn finalize(&self) -> ContentHash {
        ContentHash::new(self.state.finalize().into())
    }

    /// Convenience method to hash data in one shot.
    pub fn hash(data: &[u8]) -> ContentHash {
        ContentHash::new(blake3::hash(data).into())
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash() {
        let hash = Blake3Hasher::hash(b"hello world");
        assert_eq!(hash.as_bytes().len(), 32);

        let hash2 = Blake3Hasher::hash(b"hello world");
        assert_eq!(hash, hash2);

        let hash3 = Blake3Hasher::hash(b"hello world!");
        assert_ne!(hash, hash3);
    }

    #[test]
    fn test_incremental_hashing() {
        let mut hasher = Blake3Hasher::new();
        hasher.update(b"hello ");
        hasher.update(b"world");

        assert_eq!(hasher.finalize(), Blake3Hasher::hash(b"hello world"));
    }
}
