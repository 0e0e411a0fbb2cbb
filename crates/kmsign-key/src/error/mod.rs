use std::time::Duration;

use thiserror::Error;

use crate::config::KmsType;

/// Boxed cause carried by backend failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for key loading, engine dispatch and signing
#[derive(Error, Debug)]
pub enum Error {
    /// No engine constructor is registered for the KMS type
    #[error("Unsupported KMS backend: {0}")]
    UnsupportedBackend(KmsType),

    /// The backend has no mapping for the signature algorithm
    #[error("Signature algorithm {algorithm} not supported by {backend}")]
    UnsupportedAlgorithm { backend: String, algorithm: String },

    /// The algorithm cannot be used with the loaded key type
    #[error("Signature algorithm {algorithm} cannot be used with a {key_type} key")]
    IncompatibleKey {
        key_type: &'static str,
        algorithm: String,
    },

    /// Algorithm parameters that do not apply to the algorithm
    #[error("Invalid algorithm parameters: {0}")]
    InvalidParameters(String),

    #[error("Invalid key alias {alias:?}: {reason}")]
    InvalidKeyAlias { alias: String, reason: String },

    /// Client construction for a remote backend failed
    #[error("Failed to initialize {backend} client: {source}")]
    BackendInit {
        backend: String,
        #[source]
        source: BoxError,
    },

    /// The sign operation itself failed
    #[error("Signing with {backend} failed: {source}")]
    Signing {
        backend: String,
        #[source]
        source: BoxError,
    },

    #[error("Key {alias:?} not found in {backend}")]
    KeyNotFound { backend: String, alias: String },

    #[error("Timed out after {elapsed:?} waiting for {what}")]
    Timeout { what: String, elapsed: Duration },

    /// Key material could not be imported
    #[error("Import error: {0}")]
    ImportError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Crypto error: {0}")]
    Crypto(#[from] kmsign_crypto::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl Error {
    pub fn unsupported_algorithm(backend: impl ToString, algorithm: impl ToString) -> Self {
        Error::UnsupportedAlgorithm {
            backend: backend.to_string(),
            algorithm: algorithm.to_string(),
        }
    }

    pub fn backend_init(backend: impl ToString, source: impl Into<BoxError>) -> Self {
        Error::BackendInit {
            backend: backend.to_string(),
            source: source.into(),
        }
    }

    pub fn signing(backend: impl ToString, source: impl Into<BoxError>) -> Self {
        Error::Signing {
            backend: backend.to_string(),
            source: source.into(),
        }
    }
}

/// Result alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::ImportError("bad PKCS#8".to_string()).to_string(),
            "Import error: bad PKCS#8"
        );
        assert_eq!(
            Error::unsupported_algorithm(KmsType::AWS, "Ed25519").to_string(),
            "Signature algorithm Ed25519 not supported by AWS"
        );
    }
}
