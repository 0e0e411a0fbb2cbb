//! Cryptographic hash functions
//!
//! SHA-256 and SHA-512, used as the message digests of the supported
//! signature schemes and for public key fingerprints.

pub mod sha;

pub use sha::HashAlgorithm;
pub use sha::{hash, hash_hex, sha256, sha256_hex, sha512};
