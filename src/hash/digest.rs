//! Content digest type.

use std::fmt;

/// A 32-byte digest of the bytes moved by a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// The size of the digest in bytes.
    pub const SIZE: usize = 32;

    /// Creates a digest from a byte array.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a digest from a slice.
    ///
    /// Returns `None` if the slice is not exactly 32 bytes.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; 32] = slice.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Returns the digest as a byte array.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl AsRef<[u8]> for ContentHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice() {
        let bytes = vec![9u8; 32];
        let hash = ContentHash::from_slice(&bytes).unwrap();
        assert_eq!(hash.as_bytes(), &[9u8; 32]);

        assert!(ContentHash::from_slice(&[0u8; 31]).is_none());
        assert!(ContentHash::from_slice(&[0u8; 33]).is_none());
    }

    #[test]
    fn test_to_hex() {
        let mut bytes = [0u8; 32];
        bytes[..4].copy_from_slice(&[0x01, 0x23, 0xAB, 0xEF]);
        let hex = ContentHash::new(bytes).to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("0123abef"));
    }
}
