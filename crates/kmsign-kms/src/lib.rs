//! Cloud KMS signing engines and key import tooling
//!
//! Engines for AWS KMS and Google Cloud KMS implement
//! [`kmsign_key::SignerEngine`] on top of a small [`KmsConnector`] seam. The
//! real transports sit behind the `aws` and `gcp` cargo features;
//! [`default_registry`] wires in whichever are compiled.

pub mod aws;
pub mod client;
pub mod gcp;
pub mod import;
pub mod registry;

pub use aws::AwsSignerEngine;
pub use client::{KmsClient, KmsConnector, SignRequest};
pub use gcp::{CryptoKeyVersionName, GcpKeyDirectory, GcpSignerEngine, KeyRingName};
pub use import::{prepare_import, require_kms_key, wait_until_ready, KeyDirectory, PollPolicy};
pub use registry::{default_registry, register_aws, register_gcp};
