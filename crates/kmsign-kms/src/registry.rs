//! Wiring of the cloud engines into a [`SignerEngineRegistry`]

use std::sync::Arc;

use kmsign_key::{KmsType, SignerEngineRegistry};

use crate::{aws::AwsSignerEngine, client::KmsConnector, gcp::GcpSignerEngine};

/// Register the AWS engine under [`KmsType::AWS`], returning whether one was replaced
pub fn register_aws(
    registry: &mut SignerEngineRegistry,
    connector: Arc<dyn KmsConnector>,
) -> bool {
    registry.register(KmsType::AWS, move |key_alias, algorithm| {
        let engine = AwsSignerEngine::new(key_alias, algorithm, connector.clone())?;
        Ok(Box::new(engine))
    })
}

/// Register the GCP engine under [`KmsType::GCP`], returning whether one was replaced
pub fn register_gcp(
    registry: &mut SignerEngineRegistry,
    connector: Arc<dyn KmsConnector>,
) -> bool {
    registry.register(KmsType::GCP, move |key_alias, algorithm| {
        let engine = GcpSignerEngine::new(key_alias, algorithm, connector.clone())?;
        Ok(Box::new(engine))
    })
}

/// Registry with every engine whose transport was compiled in
///
/// The `aws` and `gcp` cargo features enable the SDK and REST transports.
/// Without them the registry is empty and only local keys resolve.
pub fn default_registry() -> SignerEngineRegistry {
    #[allow(unused_mut)]
    let mut registry = SignerEngineRegistry::new();
    #[cfg(feature = "aws")]
    register_aws(&mut registry, Arc::new(crate::aws::AwsSdkConnector::new()));
    #[cfg(feature = "gcp")]
    register_gcp(&mut registry, Arc::new(crate::gcp::GcpRestConnector::new()));
    registry
}
