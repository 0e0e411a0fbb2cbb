use thiserror::Error;

/// Error type for the crypto primitives
#[derive(Error, Debug)]
pub enum Error {
    #[error("PKCS8 error: {0}")]
    Pkcs8Error(#[from] pkcs8::Error),

    #[error("SPKI error: {0}")]
    SpkiError(#[from] pkcs8::spki::Error),

    #[error("DER error: {0}")]
    DerError(#[from] pkcs8::der::Error),

    #[error("RSA error: {0}")]
    RsaError(#[from] rsa::Error),

    /// ECDSA and Ed25519 share the `signature` crate error type
    #[error("Signature error: {0}")]
    SignatureError(#[from] p256::ecdsa::Error),

    /// Hybrid key wrap or AES-KWP failure
    #[error("Key wrap error: {0}")]
    KeyWrap(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl Error {
    pub fn key_wrap(err: impl std::fmt::Display) -> Self {
        Error::KeyWrap(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
