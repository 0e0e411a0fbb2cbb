use p256::{
    ecdsa::{
        signature::hazmat::{PrehashSigner, PrehashVerifier},
        Signature, SigningKey, VerifyingKey,
    },
    PublicKey, SecretKey,
};
use pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};

use crate::{
    error::Result,
    hash::{self, HashAlgorithm},
};

pub struct P256 {
    pub inner: SecretKey,
}

impl From<SecretKey> for P256 {
    fn from(value: SecretKey) -> Self {
        Self { inner: value }
    }
}

impl P256 {
    /// Import from PKCS8 DER format
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let secret_key = SecretKey::from_pkcs8_der(der)?;
        Ok(secret_key.into())
    }

    /// Import from PKCS8 PEM format
    pub fn from_pkcs8_pem(pem: &str) -> Result<Self> {
        let secret_key = SecretKey::from_pkcs8_pem(pem)?;
        Ok(secret_key.into())
    }
}

impl P256 {
    /// Export private key to PKCS8 DER format
    pub fn to_pkcs8_der(&self) -> Result<Vec<u8>> {
        let der = self.inner.to_pkcs8_der()?;
        Ok(der.as_bytes().to_vec())
    }

    /// Export public key to SPKI DER format
    pub fn to_spki_der(&self) -> Result<Vec<u8>> {
        let der = self.inner.public_key().to_public_key_der()?;
        Ok(der.as_bytes().to_vec())
    }

    /// Export public key to SPKI PEM format
    pub fn to_spki_pem(&self) -> Result<String> {
        let pem = self.inner.public_key().to_public_key_pem(LineEnding::LF)?;
        Ok(pem)
    }
}

impl P256 {
    /// Get the public key for this keypair
    pub fn public_key(&self) -> PublicKey {
        self.inner.public_key()
    }

    /// Sign data using ECDSA over the given digest, DER-encoded
    ///
    /// SHA-512 digests are truncated to the curve order size.
    pub fn sign(&self, digest: HashAlgorithm, message: &[u8]) -> Result<Vec<u8>> {
        let signing_key = SigningKey::from(&self.inner);
        let prehash = hash::hash(message, digest);
        let signature: Signature = signing_key.sign_prehash(&prehash)?;
        Ok(signature.to_der().as_bytes().to_vec())
    }
}

/// Verify a DER-encoded P-256 ECDSA signature
pub fn verify(
    public_key: &PublicKey,
    digest: HashAlgorithm,
    message: &[u8],
    signature: &[u8],
) -> bool {
    let verifying_key = VerifyingKey::from(public_key);
    let signature = match Signature::from_der(signature) {
        Ok(sig) => sig,
        Err(_) => return false,
    };
    let prehash = hash::hash(message, digest);
    verifying_key.verify_prehash(&prehash, &signature).is_ok()
}

/// Import public key from SPKI DER format
pub fn public_key_from_spki_der(der: &[u8]) -> Result<PublicKey> {
    PublicKey::from_public_key_der(der).map_err(Into::into)
}

/// Import public key from SPKI PEM format
pub fn public_key_from_spki_pem(pem: &str) -> Result<PublicKey> {
    PublicKey::from_public_key_pem(pem).map_err(Into::into)
}
