//! Key configuration and signer engine dispatch
//!
//! A [`KeyConfig`] says where the signing key lives. The
//! [`SignerEngineRegistry`] resolves it into a [`SignerEngine`], either a
//! [`LocalSignerEngine`] over an in-memory [`PrivateKey`] or a remote engine
//! registered for a [`KmsType`].

pub mod algorithm;
pub mod config;
pub mod engine;
pub mod error;
pub mod factory;
pub mod key;

// Re-export core functionality
pub use algorithm::{AlgorithmParameters, SignatureAlgorithm};
pub use config::{KeyConfig, KmsType};
pub use engine::{Backend, LocalSignerEngine, SignerEngine};
pub use error::{BoxError, Error, Result};
pub use factory::{KmsEngineConstructor, SignerEngineRegistry};
pub use key::{
    util::{detect_key_type_from_der, detect_key_type_from_pem},
    KeyType, PrivateKey,
};
