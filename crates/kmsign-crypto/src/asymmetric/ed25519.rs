use ed25519_dalek::{
    pkcs8::{DecodePrivateKey, EncodePrivateKey, EncodePublicKey},
    Signature, Signer, SigningKey, Verifier, VerifyingKey,
};
use pkcs8::{DecodePublicKey, LineEnding};

use crate::error::Result;

pub struct Ed25519 {
    pub inner: SigningKey,
}

impl From<SigningKey> for Ed25519 {
    fn from(value: SigningKey) -> Self {
        Self { inner: value }
    }
}

impl Ed25519 {
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let signing_key = SigningKey::from_pkcs8_der(der)?;
        Ok(signing_key.into())
    }

    pub fn from_pkcs8_pem(pem: &str) -> Result<Self> {
        let signing_key = SigningKey::from_pkcs8_pem(pem)?;
        Ok(signing_key.into())
    }
}

impl Ed25519 {
    /// Get the public key for this keypair
    pub fn public_key(&self) -> VerifyingKey {
        self.inner.verifying_key()
    }

    pub fn to_pkcs8_der(&self) -> Result<Vec<u8>> {
        let der = self.inner.to_pkcs8_der()?;
        Ok(der.as_bytes().to_vec())
    }

    pub fn to_spki_der(&self) -> Result<Vec<u8>> {
        let der = self.public_key().to_public_key_der()?;
        Ok(der.as_bytes().to_vec())
    }

    pub fn to_spki_pem(&self) -> Result<String> {
        let pem = self.public_key().to_public_key_pem(LineEnding::LF)?;
        Ok(pem)
    }
}

impl Ed25519 {
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        let signature = self.inner.sign(message);
        signature.to_bytes()
    }
}

/// Verify Ed25519 signature against an SPKI DER public key
pub fn verify_with_spki_der(spki_der: &[u8], message: &[u8], signature: &[u8]) -> Result<bool> {
    let verifying_key = public_key_from_spki_der(spki_der)?;

    let Ok(sig_array) = <[u8; 64]>::try_from(signature) else {
        return Ok(false);
    };
    let signature = Signature::from_bytes(&sig_array);

    Ok(verifying_key.verify(message, &signature).is_ok())
}

pub fn public_key_from_spki_der(der: &[u8]) -> Result<VerifyingKey> {
    VerifyingKey::from_public_key_der(der).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ED25519_PK8: &[u8] = include_bytes!("../../../../testdata/ed25519.pk8");
    const ED25519_SPKI: &[u8] = include_bytes!("../../../../testdata/ed25519.spki.der");

    #[test]
    fn test_import_fixture() {
        let key = Ed25519::from_pkcs8_der(ED25519_PK8).unwrap();
        assert_eq!(key.to_spki_der().unwrap(), ED25519_SPKI);
    }

    #[test]
    fn test_sign_verify() {
        let key = Ed25519::from_pkcs8_der(ED25519_PK8).unwrap();
        let message = b"Hello, Ed25519!";
        let signature = key.sign(message);

        assert!(verify_with_spki_der(ED25519_SPKI, message, &signature).unwrap());
        assert!(!verify_with_spki_der(ED25519_SPKI, b"other", &signature).unwrap());
        assert!(!verify_with_spki_der(ED25519_SPKI, message, &signature[..63]).unwrap());
    }

    #[test]
    fn test_signature_is_deterministic() {
        let key = Ed25519::from_pkcs8_der(ED25519_PK8).unwrap();
        assert_eq!(key.sign(b"same"), key.sign(b"same"));
    }
}
