//! # kmsign
//!
//! Sign through a locally held private key or a cloud KMS behind one
//! interface, and wrap private keys for one-time import into a KMS.
//!
//! ## Crates
//!
//! - `kmsign_crypto` - signature primitives and the RSA-OAEP + AES-KWP key wrap
//! - `kmsign_key` - key configs, signer engines and backend dispatch
//! - `kmsign_kms` - AWS and Google Cloud KMS engines, import tooling
//! - `kmsign-cli` - the `kmsign` command-line tool

// Re-export all sub-crates
pub use kmsign_crypto;
pub use kmsign_key;
pub use kmsign_kms;
