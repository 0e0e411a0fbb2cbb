//! Google Cloud KMS signing engine
//!
//! A Cloud KMS key version is created for exactly one algorithm, so the engine
//! only needs the version's resource name. The generic algorithm identifier is
//! accepted for symmetry with the other backends and otherwise ignored.

pub mod name;
#[cfg(feature = "gcp")]
mod rest;

use std::sync::Arc;

use kmsign_key::{Backend, Error, KmsType, Result, SignerEngine};
use tracing::debug;

use crate::{
    client::{KmsConnector, SignRequest},
    import::KeyDirectory,
};

pub use name::{CryptoKeyVersionName, KeyRingName};
#[cfg(feature = "gcp")]
pub use rest::{GcpRestConnector, ACCESS_TOKEN_ENV, DEFAULT_ENDPOINT};

/// Signs with a Cloud KMS asymmetric key version
pub struct GcpSignerEngine {
    name: CryptoKeyVersionName,
    resource_name: String,
    connector: Arc<dyn KmsConnector>,
}

impl GcpSignerEngine {
    /// `key_alias` must be a full CryptoKeyVersion resource name
    pub fn new(
        key_alias: &str,
        _algorithm: &str,
        connector: Arc<dyn KmsConnector>,
    ) -> Result<Self> {
        let name: CryptoKeyVersionName = key_alias.parse()?;
        let resource_name = name.to_string();

        debug!(%resource_name, "GCP signer engine ready");
        Ok(Self {
            name,
            resource_name,
            connector,
        })
    }

    pub fn name(&self) -> &CryptoKeyVersionName {
        &self.name
    }
}

impl SignerEngine for GcpSignerEngine {
    fn backend(&self) -> Backend {
        Backend::Kms(KmsType::GCP)
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let client = self
            .connector
            .connect()
            .map_err(|e| Error::backend_init(KmsType::GCP, e))?;

        debug!(name = %self.resource_name, len = data.len(), "Cloud KMS asymmetricSign");
        let request = SignRequest {
            key_id: &self.resource_name,
            signing_algorithm: None,
            message: data,
        };
        client
            .sign(&request)
            .map_err(|e| Error::signing(KmsType::GCP, e))
    }
}

impl std::fmt::Debug for GcpSignerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GcpSignerEngine")
            .field("name", &self.resource_name)
            .finish_non_exhaustive()
    }
}

/// Looks up CryptoKeyVersions by resource name
pub struct GcpKeyDirectory {
    connector: Arc<dyn KmsConnector>,
}

impl GcpKeyDirectory {
    pub fn new(connector: Arc<dyn KmsConnector>) -> Self {
        Self { connector }
    }
}

impl KeyDirectory for GcpKeyDirectory {
    fn kms_type(&self) -> KmsType {
        KmsType::GCP
    }

    fn key_exists(&self, key_alias: &str) -> Result<bool> {
        let name: CryptoKeyVersionName = key_alias.parse()?;
        let resource_name = name.to_string();
        let client = self
            .connector
            .connect()
            .map_err(|e| Error::backend_init(KmsType::GCP, e))?;

        debug!(name = %resource_name, "Cloud KMS getCryptoKeyVersion");
        client
            .key_exists(&resource_name)
            .map_err(|e| Error::Other(format!("lookup of {resource_name} failed: {e}")))
    }
}
