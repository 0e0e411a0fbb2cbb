pub mod info;
pub mod sign;
pub mod wrap;

use kmsign_key::SignerEngineRegistry;

use crate::settings::Settings;

/// Registry with the KMS transports compiled into this binary
#[cfg_attr(not(any(feature = "aws", feature = "gcp")), allow(unused_variables))]
pub fn registry(settings: &Settings) -> SignerEngineRegistry {
    #[allow(unused_mut)]
    let mut registry = SignerEngineRegistry::new();

    #[cfg(feature = "aws")]
    {
        let mut connector = kmsign_kms::aws::AwsSdkConnector::new();
        if let Some(region) = &settings.aws.region {
            connector = connector.with_region(region);
        }
        if let Some(endpoint_url) = &settings.aws.endpoint_url {
            connector = connector.with_endpoint_url(endpoint_url);
        }
        kmsign_kms::register_aws(&mut registry, std::sync::Arc::new(connector));
    }

    #[cfg(feature = "gcp")]
    {
        let mut connector = kmsign_kms::gcp::GcpRestConnector::new();
        if let Some(endpoint) = &settings.gcp.endpoint {
            connector = connector.with_endpoint(endpoint);
        }
        if let Some(access_token) = &settings.gcp.access_token {
            connector = connector.with_access_token(access_token);
        }
        kmsign_kms::register_gcp(&mut registry, std::sync::Arc::new(connector));
    }

    registry
}
