//! AWS KMS signing engine

#[cfg(feature = "aws")]
mod sdk;

use std::sync::Arc;

use kmsign_key::{Backend, Error, KmsType, Result, SignatureAlgorithm, SignerEngine};
use tracing::debug;

use crate::client::{KmsConnector, SignRequest};

#[cfg(feature = "aws")]
pub use sdk::AwsSdkConnector;

/// Prefix AWS expects in front of a key alias
pub const ALIAS_PREFIX: &str = "alias/";

/// AWS `SigningAlgorithmSpec` for a generic algorithm identifier
///
/// Returns `None` for anything AWS KMS cannot sign with, including Ed25519
/// and every unknown identifier.
pub fn signing_algorithm_spec(algorithm: &str) -> Option<&'static str> {
    let spec = match SignatureAlgorithm::from_name(algorithm)? {
        SignatureAlgorithm::Sha256WithRsaPss => "RSASSA_PSS_SHA_256",
        SignatureAlgorithm::Sha512WithRsaPss => "RSASSA_PSS_SHA_512",
        SignatureAlgorithm::Sha256WithRsa => "RSASSA_PKCS1_V1_5_SHA_256",
        SignatureAlgorithm::Sha512WithRsa => "RSASSA_PKCS1_V1_5_SHA_512",
        SignatureAlgorithm::Sha256WithEcdsa => "ECDSA_SHA_256",
        SignatureAlgorithm::Sha512WithEcdsa => "ECDSA_SHA_512",
        SignatureAlgorithm::Ed25519 => return None,
    };
    Some(spec)
}

/// Key id sent to AWS for an alias, `alias/` prepended unless already there
pub fn key_id_for_alias(key_alias: &str) -> Result<String> {
    let name = key_alias.strip_prefix(ALIAS_PREFIX).unwrap_or(key_alias);
    if name.is_empty() {
        return Err(Error::InvalidKeyAlias {
            alias: key_alias.to_string(),
            reason: "AWS key alias is empty".to_string(),
        });
    }
    Ok(format!("{ALIAS_PREFIX}{name}"))
}

/// Signs with an AWS KMS asymmetric key addressed by alias
pub struct AwsSignerEngine {
    key_id: String,
    signing_algorithm: &'static str,
    connector: Arc<dyn KmsConnector>,
}

impl AwsSignerEngine {
    /// Fails on a missing or unmapped algorithm or an empty alias; no client is opened
    pub fn new(
        key_alias: &str,
        algorithm: &str,
        connector: Arc<dyn KmsConnector>,
    ) -> Result<Self> {
        if algorithm.is_empty() {
            return Err(Error::InvalidParameters(
                "AWS KMS signing needs a signature algorithm".to_string(),
            ));
        }
        let signing_algorithm = signing_algorithm_spec(algorithm)
            .ok_or_else(|| Error::unsupported_algorithm(KmsType::AWS, algorithm))?;
        let key_id = key_id_for_alias(key_alias)?;

        debug!(%key_id, signing_algorithm, "AWS signer engine ready");
        Ok(Self {
            key_id,
            signing_algorithm,
            connector,
        })
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn signing_algorithm(&self) -> &'static str {
        self.signing_algorithm
    }
}

impl SignerEngine for AwsSignerEngine {
    fn backend(&self) -> Backend {
        Backend::Kms(KmsType::AWS)
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let client = self
            .connector
            .connect()
            .map_err(|e| Error::backend_init(KmsType::AWS, e))?;

        debug!(
            key_id = %self.key_id,
            algorithm = self.signing_algorithm,
            len = data.len(),
            "AWS KMS sign"
        );
        let request = SignRequest {
            key_id: &self.key_id,
            signing_algorithm: Some(self.signing_algorithm),
            message: data,
        };
        client
            .sign(&request)
            .map_err(|e| Error::signing(KmsType::AWS, e))
    }
}

impl std::fmt::Debug for AwsSignerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSignerEngine")
            .field("key_id", &self.key_id)
            .field("signing_algorithm", &self.signing_algorithm)
            .finish_non_exhaustive()
    }
}
