//! SHA hash functions used by signature schemes and fingerprints

use sha2::{Digest, Sha256 as Sha256Hasher, Sha512 as Sha512Hasher};

// ============================================================================
// Hash Algorithm Selection
// ============================================================================

/// Message digests a signature algorithm may be built on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// SHA-256 (32-byte output)
    #[default]
    Sha256,
    /// SHA-512 (64-byte output)
    Sha512,
}

impl HashAlgorithm {
    /// Digest output length in bytes
    pub fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha512 => 64,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }
}

// ============================================================================
// Generic Hash Functions
// ============================================================================

/// Compute hash of data using specified algorithm
///
/// # Example
/// ```
/// use kmsign_crypto::hash::{hash, HashAlgorithm};
///
/// let data = b"Hello, World!";
/// assert_eq!(hash(data, HashAlgorithm::Sha256).len(), 32);
/// assert_eq!(hash(data, HashAlgorithm::Sha512).len(), 64);
/// ```
pub fn hash(data: &[u8], algorithm: HashAlgorithm) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha256 => sha256(data).to_vec(),
        HashAlgorithm::Sha512 => sha512(data).to_vec(),
    }
}

/// Compute hash and return as hex string
pub fn hash_hex(data: &[u8], algorithm: HashAlgorithm) -> String {
    hex::encode(hash(data, algorithm))
}

// ============================================================================
// Fixed-size helpers
// ============================================================================

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256Hasher::digest(data).into()
}

pub fn sha512(data: &[u8]) -> [u8; 64] {
    Sha512Hasher::digest(data).into()
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}
