//! Asymmetric cryptography algorithms
//!
//! Signature schemes for the supported local key types, plus the RSA-OAEP
//! transport encryption used when wrapping keys for import.

pub mod ed25519;
pub mod p256;
pub mod rsa;

pub use ed25519::Ed25519;
pub use p256::P256;
pub use rsa::Rsa;
