//! Key configuration: where the signing key lives

use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

use crate::key::PrivateKey;

/// Identifier of a remote key management service
///
/// Open-ended so that new backends can be registered without touching this
/// crate; the well-known values are provided as constants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KmsType(Cow<'static, str>);

impl KmsType {
    pub const AWS: KmsType = KmsType(Cow::Borrowed("AWS"));
    pub const GCP: KmsType = KmsType(Cow::Borrowed("GCP"));
    /// Placeholder type with no engine behind it
    pub const NONE: KmsType = KmsType(Cow::Borrowed("NONE"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KmsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for KmsType {
    fn from(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }
}

impl From<String> for KmsType {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

/// Signing key source: a private key held in memory, or a key in a remote KMS
#[derive(Debug)]
pub enum KeyConfig {
    Local(PrivateKey),
    Kms { kms_type: KmsType, key_alias: String },
}

impl KeyConfig {
    pub fn local(key: PrivateKey) -> Self {
        KeyConfig::Local(key)
    }

    pub fn kms(kms_type: impl Into<KmsType>, key_alias: impl Into<String>) -> Self {
        KeyConfig::Kms {
            kms_type: kms_type.into(),
            key_alias: key_alias.into(),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, KeyConfig::Local(_))
    }
}
