use pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{traits::PublicKeyParts, Oaep, Pkcs1v15Sign, Pss, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::{
    error::Result,
    hash::{self, HashAlgorithm},
};

pub struct Rsa {
    pub inner: RsaPrivateKey,
}

impl From<RsaPrivateKey> for Rsa {
    fn from(value: RsaPrivateKey) -> Self {
        Self { inner: value }
    }
}

impl Rsa {
    /// Import from PKCS8 DER format
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let private_key = RsaPrivateKey::from_pkcs8_der(der)?;
        Ok(private_key.into())
    }

    /// Import from PKCS8 PEM format
    pub fn from_pkcs8_pem(pem: &str) -> Result<Self> {
        let private_key = RsaPrivateKey::from_pkcs8_pem(pem)?;
        Ok(private_key.into())
    }
}

impl Rsa {
    /// Export private key to PKCS8 DER format
    pub fn to_pkcs8_der(&self) -> Result<Vec<u8>> {
        let der = self.inner.to_pkcs8_der()?;
        Ok(der.as_bytes().to_vec())
    }

    /// Export public key to SPKI DER format
    pub fn to_spki_der(&self) -> Result<Vec<u8>> {
        let der = self.inner.to_public_key().to_public_key_der()?;
        Ok(der.as_bytes().to_vec())
    }

    /// Export public key to SPKI PEM format
    pub fn to_spki_pem(&self) -> Result<String> {
        let pem = self
            .inner
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)?;
        Ok(pem)
    }
}

impl Rsa {
    /// Get the public key for this keypair
    pub fn public_key(&self) -> RsaPublicKey {
        self.inner.to_public_key()
    }

    /// Get key size in bits
    pub fn size(&self) -> usize {
        self.inner.size() * 8
    }

    /// Sign data using PKCS#1 v1.5 over the given digest
    pub fn sign_pkcs1v15(&self, digest: HashAlgorithm, message: &[u8]) -> Result<Vec<u8>> {
        let hashed = hash::hash(message, digest);
        let padding = match digest {
            HashAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
            HashAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
        };
        let signature = self.inner.sign(padding, &hashed)?;
        Ok(signature)
    }

    /// Sign data using RSASSA-PSS (MGF1 with the same digest)
    ///
    /// `salt_len` defaults to the digest output length when `None`.
    pub fn sign_pss(
        &self,
        digest: HashAlgorithm,
        salt_len: Option<usize>,
        message: &[u8],
    ) -> Result<Vec<u8>> {
        let mut rng = rand::thread_rng();
        let hashed = hash::hash(message, digest);
        let salt_len = salt_len.unwrap_or_else(|| digest.output_len());
        let padding = match digest {
            HashAlgorithm::Sha256 => Pss::new_with_salt::<Sha256>(salt_len),
            HashAlgorithm::Sha512 => Pss::new_with_salt::<Sha512>(salt_len),
        };
        let signature = self.inner.sign_with_rng(&mut rng, padding, &hashed)?;
        Ok(signature)
    }

    /// Decrypt an RSA-OAEP (SHA-1, MGF1-SHA-1, empty label) ciphertext
    pub fn decrypt_oaep_sha1(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let plaintext = self.inner.decrypt(Oaep::new::<Sha1>(), ciphertext)?;
        Ok(plaintext)
    }
}

/// Import public key from SPKI DER format
pub fn public_key_from_spki_der(der: &[u8]) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_der(der).map_err(Into::into)
}

/// Import public key from SPKI PEM format
pub fn public_key_from_spki_pem(pem: &str) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem).map_err(Into::into)
}

/// Re-encode an SPKI PEM public key as DER
pub fn spki_pem_to_der(pem: &str) -> Result<Vec<u8>> {
    let der = public_key_from_spki_pem(pem)?.to_public_key_der()?;
    Ok(der.as_bytes().to_vec())
}

/// Modulus length of a public key in bytes (equals every OAEP ciphertext length)
pub fn modulus_len(public_key: &RsaPublicKey) -> usize {
    public_key.size()
}

/// Encrypt data with RSA-OAEP using SHA-1 for both the digest and MGF1, empty label
pub fn encrypt_oaep_sha1(public_key: &RsaPublicKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut rng = rand::thread_rng();
    let ciphertext = public_key.encrypt(&mut rng, Oaep::new::<Sha1>(), plaintext)?;
    Ok(ciphertext)
}

/// Verify a PKCS#1 v1.5 signature
pub fn verify_pkcs1v15(
    public_key: &RsaPublicKey,
    digest: HashAlgorithm,
    message: &[u8],
    signature: &[u8],
) -> bool {
    let hashed = hash::hash(message, digest);
    let padding = match digest {
        HashAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        HashAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
    };
    public_key.verify(padding, &hashed, signature).is_ok()
}

/// Verify an RSASSA-PSS signature produced with the given salt length
pub fn verify_pss(
    public_key: &RsaPublicKey,
    digest: HashAlgorithm,
    salt_len: Option<usize>,
    message: &[u8],
    signature: &[u8],
) -> bool {
    let hashed = hash::hash(message, digest);
    let salt_len = salt_len.unwrap_or_else(|| digest.output_len());
    let padding = match digest {
        HashAlgorithm::Sha256 => Pss::new_with_salt::<Sha256>(salt_len),
        HashAlgorithm::Sha512 => Pss::new_with_salt::<Sha512>(salt_len),
    };
    public_key.verify(padding, &hashed, signature).is_ok()
}
