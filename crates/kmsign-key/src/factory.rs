//! Engine dispatch: turn a [`KeyConfig`] into a signing engine
//!
//! Local keys get a [`LocalSignerEngine`]. Remote keys are routed through a
//! registry of constructors keyed by KMS type, so new backends plug in without
//! this crate knowing about them. Resolution never touches the network.

use std::{collections::HashMap, fmt};

use tracing::{debug, warn};

use crate::{
    algorithm::AlgorithmParameters,
    config::{KeyConfig, KmsType},
    engine::{LocalSignerEngine, SignerEngine},
    error::{Error, Result},
};

/// Builds a remote engine from `(key_alias, algorithm)`
pub type KmsEngineConstructor =
    Box<dyn Fn(&str, &str) -> Result<Box<dyn SignerEngine>> + Send + Sync>;

/// KMS type to engine constructor mapping
#[derive(Default)]
pub struct SignerEngineRegistry {
    constructors: HashMap<KmsType, KmsEngineConstructor>,
}

impl SignerEngineRegistry {
    /// Empty registry: only local keys resolve
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the constructor for `kms_type`, returning whether one was replaced
    pub fn register<F>(&mut self, kms_type: KmsType, constructor: F) -> bool
    where
        F: Fn(&str, &str) -> Result<Box<dyn SignerEngine>> + Send + Sync + 'static,
    {
        debug!(%kms_type, "registering signer engine constructor");
        self.constructors
            .insert(kms_type, Box::new(constructor))
            .is_some()
    }

    pub fn contains(&self, kms_type: &KmsType) -> bool {
        self.constructors.contains_key(kms_type)
    }

    /// Registered KMS types in sorted order
    pub fn kms_types(&self) -> Vec<KmsType> {
        let mut types: Vec<_> = self.constructors.keys().cloned().collect();
        types.sort();
        types
    }

    /// Build the engine for `key_config`
    ///
    /// For a local key the algorithm and parameters configure the engine. For a
    /// KMS key the algorithm identifier is handed to the backend constructor,
    /// which decides whether it needs it; parameters are not forwarded.
    pub fn resolve(
        &self,
        key_config: KeyConfig,
        algorithm: &str,
        parameters: Option<AlgorithmParameters>,
    ) -> Result<Box<dyn SignerEngine>> {
        match key_config {
            KeyConfig::Local(key) => {
                let engine = LocalSignerEngine::new(key, algorithm, parameters)?;
                Ok(Box::new(engine))
            }
            KeyConfig::Kms {
                kms_type,
                key_alias,
            } => {
                let Some(constructor) = self.constructors.get(&kms_type) else {
                    warn!(%kms_type, "no signer engine registered");
                    return Err(Error::UnsupportedBackend(kms_type));
                };
                if parameters.is_some() {
                    debug!(%kms_type, "algorithm parameters are not used by KMS engines");
                }
                debug!(%kms_type, %key_alias, algorithm, "resolving KMS signer engine");
                constructor(&key_alias, algorithm)
            }
        }
    }
}

impl fmt::Debug for SignerEngineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerEngineRegistry")
            .field("kms_types", &self.kms_types())
            .finish()
    }
}
