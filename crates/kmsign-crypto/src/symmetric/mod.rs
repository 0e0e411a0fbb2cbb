//! Symmetric key wrapping
//!
//! AES Key Wrap with Padding, used to protect private key material under an
//! ephemeral key during import.

pub mod kwp;

pub use kwp::{unwrap_with_padding, wrap_with_padding, wrapped_len};
