//! kmsign cryptography library
//!
//! Signature primitives for locally held keys (RSA PKCS#1 v1.5 and PSS,
//! ECDSA P-256, Ed25519) and the hybrid RSA-OAEP + AES-KWP wrap used to
//! import private keys into a remote key service.

pub mod error;

// Cryptographic algorithm modules
pub mod asymmetric;
pub mod hash;
pub mod symmetric;
pub mod wrap;

// Re-export commonly used types for convenience
pub use asymmetric::{ed25519::Ed25519, p256::P256, rsa::Rsa};
pub use error::{Error, Result};
pub use hash::{hash, hash_hex, sha256, sha256_hex, sha512, HashAlgorithm};
pub use wrap::{
    unwrap_imported_key, wrap_key_for_import, wrap_key_with_public_key, wrapped_package_len,
    WrappedKeyPackage,
};
