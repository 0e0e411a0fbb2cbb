//! Signing engines
//!
//! A [`SignerEngine`] turns bytes into a signature and hides where the key
//! lives. The local engine is defined here; remote engines live in
//! `kmsign-kms` and are reached through the registry in [`crate::factory`].

pub mod local;

use std::fmt;

use crate::{config::KmsType, error::Result};

pub use local::LocalSignerEngine;

/// Where an engine's key material lives
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Backend {
    Local,
    Kms(KmsType),
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Local => f.write_str("local"),
            Backend::Kms(kms_type) => write!(f, "{kms_type} KMS"),
        }
    }
}

/// Produces raw signatures over arbitrary payloads
///
/// Engines hold no mutable state between calls, so one instance may be shared
/// across threads and invoked any number of times.
pub trait SignerEngine: Send + Sync {
    fn backend(&self) -> Backend;

    /// Sign `data` and return the raw signature bytes
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>>;
}

impl<T: SignerEngine + ?Sized> SignerEngine for Box<T> {
    fn backend(&self) -> Backend {
        (**self).backend()
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        (**self).sign(data)
    }
}
