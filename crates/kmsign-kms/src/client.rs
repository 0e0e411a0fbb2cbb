//! Transport seam between the engines and a KMS service
//!
//! Engines never hold a live client. Each `sign` call asks its connector for a
//! fresh [`KmsClient`], issues one request and drops the client before
//! returning, whatever the outcome.

use kmsign_key::BoxError;

/// One remote sign call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignRequest<'a> {
    /// Backend key identifier (AWS key id or alias, GCP resource name)
    pub key_id: &'a str,
    /// Backend algorithm code, for services that pick it per call
    pub signing_algorithm: Option<&'static str>,
    pub message: &'a [u8],
}

/// A connected client scoped to a single operation
pub trait KmsClient {
    fn sign(&self, request: &SignRequest<'_>) -> Result<Vec<u8>, BoxError>;

    /// Whether the backend knows `key_id`; `Ok(false)` only for a definite not-found
    fn key_exists(&self, key_id: &str) -> Result<bool, BoxError> {
        Err(format!("key lookup for {key_id} is not supported by this client").into())
    }
}

/// Opens clients on demand
pub trait KmsConnector: Send + Sync {
    fn connect(&self) -> Result<Box<dyn KmsClient>, BoxError>;
}
