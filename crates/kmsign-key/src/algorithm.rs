//! Generic signature algorithm identifiers
//!
//! Callers name algorithms with the JCA-style tokens (`SHA256withRSA`,
//! `SHA512withECDSA`, ...). Each backend maps the subset it supports onto
//! its own codes; a token outside that subset is rejected before anything
//! else happens.

use std::{fmt, str::FromStr};

use kmsign_crypto::HashAlgorithm;

use crate::{
    error::{Error, Result},
    key::KeyType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    Sha256WithRsa,
    Sha512WithRsa,
    Sha256WithRsaPss,
    Sha512WithRsaPss,
    Sha256WithEcdsa,
    Sha512WithEcdsa,
    Ed25519,
}

impl SignatureAlgorithm {
    pub const ALL: [SignatureAlgorithm; 7] = [
        SignatureAlgorithm::Sha256WithRsa,
        SignatureAlgorithm::Sha512WithRsa,
        SignatureAlgorithm::Sha256WithRsaPss,
        SignatureAlgorithm::Sha512WithRsaPss,
        SignatureAlgorithm::Sha256WithEcdsa,
        SignatureAlgorithm::Sha512WithEcdsa,
        SignatureAlgorithm::Ed25519,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Sha256WithRsa => "SHA256withRSA",
            SignatureAlgorithm::Sha512WithRsa => "SHA512withRSA",
            SignatureAlgorithm::Sha256WithRsaPss => "SHA256withRSA/PSS",
            SignatureAlgorithm::Sha512WithRsaPss => "SHA512withRSA/PSS",
            SignatureAlgorithm::Sha256WithEcdsa => "SHA256withECDSA",
            SignatureAlgorithm::Sha512WithEcdsa => "SHA512withECDSA",
            SignatureAlgorithm::Ed25519 => "Ed25519",
        }
    }

    /// Exact, case-sensitive lookup of a generic identifier
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.name() == name)
    }

    /// Message digest, or `None` for Ed25519 which hashes internally
    pub fn digest(&self) -> Option<HashAlgorithm> {
        match self {
            SignatureAlgorithm::Sha256WithRsa
            | SignatureAlgorithm::Sha256WithRsaPss
            | SignatureAlgorithm::Sha256WithEcdsa => Some(HashAlgorithm::Sha256),
            SignatureAlgorithm::Sha512WithRsa
            | SignatureAlgorithm::Sha512WithRsaPss
            | SignatureAlgorithm::Sha512WithEcdsa => Some(HashAlgorithm::Sha512),
            SignatureAlgorithm::Ed25519 => None,
        }
    }

    /// Key family the algorithm requires
    pub fn key_type(&self) -> KeyType {
        match self {
            SignatureAlgorithm::Sha256WithRsa
            | SignatureAlgorithm::Sha512WithRsa
            | SignatureAlgorithm::Sha256WithRsaPss
            | SignatureAlgorithm::Sha512WithRsaPss => KeyType::Rsa,
            SignatureAlgorithm::Sha256WithEcdsa | SignatureAlgorithm::Sha512WithEcdsa => {
                KeyType::P256
            }
            SignatureAlgorithm::Ed25519 => KeyType::Ed25519,
        }
    }

    pub fn is_pss(&self) -> bool {
        matches!(
            self,
            SignatureAlgorithm::Sha256WithRsaPss | SignatureAlgorithm::Sha512WithRsaPss
        )
    }

    /// Algorithm used when a caller only supplies a key
    pub fn default_for(key_type: KeyType) -> Self {
        match key_type {
            KeyType::Rsa => SignatureAlgorithm::Sha256WithRsa,
            KeyType::P256 => SignatureAlgorithm::Sha256WithEcdsa,
            KeyType::Ed25519 => SignatureAlgorithm::Ed25519,
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| Error::unsupported_algorithm("local", s))
    }
}

/// Extra parameters for algorithms that take them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmParameters {
    /// RSASSA-PSS salt length in bytes
    Pss { salt_len: usize },
}

impl AlgorithmParameters {
    /// Check that the parameters apply to `algorithm`
    pub fn validate_for(&self, algorithm: SignatureAlgorithm) -> Result<()> {
        match self {
            AlgorithmParameters::Pss { .. } if algorithm.is_pss() => Ok(()),
            AlgorithmParameters::Pss { .. } => Err(Error::InvalidParameters(format!(
                "PSS parameters given for {algorithm}"
            ))),
        }
    }
}
