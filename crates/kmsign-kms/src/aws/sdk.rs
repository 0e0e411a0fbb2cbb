//! AWS SDK transport
//!
//! The SDK is async; each client owns a current-thread runtime and blocks on
//! it so the engine API stays synchronous.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_kms::{
    error::DisplayErrorContext,
    primitives::Blob,
    types::{MessageType, SigningAlgorithmSpec},
};
use kmsign_key::{BoxError, Error, KmsType, Result};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, warn};

use super::key_id_for_alias;
use crate::{
    client::{KmsClient, KmsConnector, SignRequest},
    import::KeyDirectory,
};

/// Connector building SDK clients from the default credential chain
#[derive(Debug, Clone, Default)]
pub struct AwsSdkConnector {
    region: Option<String>,
    endpoint_url: Option<String>,
}

impl AwsSdkConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the region from the environment or profile
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Point the client at a different endpoint (e.g. a local KMS emulator)
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    fn connect_sdk(&self) -> std::result::Result<AwsSdkClient, BoxError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let sdk_config = runtime.block_on(loader.load());
        debug!(region = ?sdk_config.region(), "AWS KMS client configured");

        Ok(AwsSdkClient {
            client: aws_sdk_kms::Client::new(&sdk_config),
            runtime,
        })
    }
}

struct AwsSdkClient {
    client: aws_sdk_kms::Client,
    runtime: Runtime,
}

impl KmsClient for AwsSdkClient {
    fn sign(&self, request: &SignRequest<'_>) -> std::result::Result<Vec<u8>, BoxError> {
        let mut call = self
            .client
            .sign()
            .key_id(request.key_id)
            .message(Blob::new(request.message))
            .message_type(MessageType::Raw);
        if let Some(algorithm) = request.signing_algorithm {
            call = call.signing_algorithm(SigningAlgorithmSpec::from(algorithm));
        }

        let output = self
            .runtime
            .block_on(call.send())
            .map_err(|e| DisplayErrorContext(e).to_string())?;

        output
            .signature()
            .map(|signature| signature.as_ref().to_vec())
            .ok_or_else(|| "KMS sign response carried no signature".into())
    }
}

impl KmsConnector for AwsSdkConnector {
    fn connect(&self) -> std::result::Result<Box<dyn KmsClient>, BoxError> {
        Ok(Box::new(self.connect_sdk()?))
    }
}

impl KeyDirectory for AwsSdkConnector {
    fn kms_type(&self) -> KmsType {
        KmsType::AWS
    }

    fn key_exists(&self, key_alias: &str) -> Result<bool> {
        let key_id = key_id_for_alias(key_alias)?;
        let sdk = self
            .connect_sdk()
            .map_err(|e| Error::backend_init(KmsType::AWS, e))?;

        let result = sdk
            .runtime
            .block_on(sdk.client.describe_key().key_id(&key_id).send());
        match result {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found_exception()) => {
                warn!(%key_id, "requested key alias was not found");
                Ok(false)
            }
            Err(e) => Err(Error::Other(format!(
                "DescribeKey for {key_id} failed: {}",
                DisplayErrorContext(e)
            ))),
        }
    }
}
