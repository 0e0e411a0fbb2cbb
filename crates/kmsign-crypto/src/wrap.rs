//! Hybrid key wrapping for key import
//!
//! A private key is wrapped for upload into a remote key service in two layers:
//!
//! ```text
//! [RSA-OAEP(SHA-1) wrapped AES-256 key (modulus bytes)] || [AES-KWP wrapped private key]
//! ```
//!
//! The AES key is freshly drawn for every call and wiped once the package is
//! built. No separator or length prefix sits between the two segments; the
//! boundary is the wrapping key's modulus length.

use base64::{engine::general_purpose, Engine as _};
use rand::{rngs::OsRng, RngCore};
use ::rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use crate::{
    asymmetric::rsa::{self, Rsa},
    error::{Error, Result},
    symmetric::kwp,
};

/// Ephemeral AES key size (AES-256)
pub const EPHEMERAL_KEY_SIZE: usize = kwp::KEK_SIZE;

/// Upload-ready wrapped key blob
#[derive(Clone, PartialEq, Eq)]
pub struct WrappedKeyPackage {
    bytes: Vec<u8>,
    modulus_len: usize,
}

impl WrappedKeyPackage {
    /// Reassemble a package received as raw bytes for a wrapping key of `modulus_len` bytes
    pub fn from_bytes(bytes: Vec<u8>, modulus_len: usize) -> Result<Self> {
        if bytes.len() <= modulus_len {
            return Err(Error::KeyWrap(format!(
                "package of {} bytes is too short for a {}-byte wrapping modulus",
                bytes.len(),
                modulus_len
            )));
        }
        Ok(Self { bytes, modulus_len })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Segment 1: the OAEP-wrapped ephemeral key
    pub fn wrapped_ephemeral_key(&self) -> &[u8] {
        &self.bytes[..self.modulus_len]
    }

    /// Segment 2: the KWP-wrapped private key
    pub fn wrapped_target_key(&self) -> &[u8] {
        &self.bytes[self.modulus_len..]
    }

    /// Standard base64, the form import APIs and CLIs accept
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.bytes)
    }
}

impl std::fmt::Debug for WrappedKeyPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrappedKeyPackage")
            .field("len", &self.bytes.len())
            .field("modulus_len", &self.modulus_len)
            .finish()
    }
}

/// Exact package length for a wrapping modulus and private key size, both in bytes
pub fn wrapped_package_len(modulus_len: usize, key_len: usize) -> usize {
    modulus_len + kwp::wrapped_len(key_len)
}

/// Wrap raw private key bytes under an SPKI DER encoded RSA wrapping key
pub fn wrap_key_for_import(
    private_key: &[u8],
    wrapping_public_key_der: &[u8],
) -> Result<WrappedKeyPackage> {
    let wrapping_key = rsa::public_key_from_spki_der(wrapping_public_key_der)
        .map_err(|e| Error::KeyWrap(format!("invalid wrapping public key: {}", e)))?;
    wrap_key_with_public_key(private_key, &wrapping_key)
}

/// Wrap raw private key bytes under an already parsed RSA wrapping key
pub fn wrap_key_with_public_key(
    private_key: &[u8],
    wrapping_key: &RsaPublicKey,
) -> Result<WrappedKeyPackage> {
    if private_key.is_empty() {
        return Err(Error::KeyWrap("private key material is empty".to_string()));
    }

    let mut ephemeral = Zeroizing::new([0u8; EPHEMERAL_KEY_SIZE]);
    OsRng.fill_bytes(&mut ephemeral[..]);

    let wrapped_target = kwp::wrap_with_padding(&ephemeral, private_key)?;
    let wrapped_ephemeral = rsa::encrypt_oaep_sha1(wrapping_key, &ephemeral[..])
        .map_err(|e| Error::KeyWrap(format!("OAEP wrap of ephemeral key failed: {}", e)))?;

    let modulus_len = wrapped_ephemeral.len();
    let mut bytes = wrapped_ephemeral;
    bytes.extend_from_slice(&wrapped_target);

    Ok(WrappedKeyPackage { bytes, modulus_len })
}

/// Recover the private key bytes from a package using the wrapping private key
pub fn unwrap_imported_key(
    package: &[u8],
    wrapping_key: &RsaPrivateKey,
) -> Result<Zeroizing<Vec<u8>>> {
    let modulus_len = rsa::modulus_len(&wrapping_key.to_public_key());
    let package = WrappedKeyPackage::from_bytes(package.to_vec(), modulus_len)?;

    let unwrapper = Rsa::from(wrapping_key.clone());
    let ephemeral = Zeroizing::new(
        unwrapper
            .decrypt_oaep_sha1(package.wrapped_ephemeral_key())
            .map_err(|e| Error::KeyWrap(format!("OAEP unwrap of ephemeral key failed: {}", e)))?,
    );
    let kek: &[u8; EPHEMERAL_KEY_SIZE] = ephemeral.as_slice().try_into().map_err(|_| {
        Error::KeyWrap(format!(
            "ephemeral key is {} bytes, expected {}",
            ephemeral.len(),
            EPHEMERAL_KEY_SIZE
        ))
    })?;

    let private_key = kwp::unwrap_with_padding(kek, package.wrapped_target_key())?;
    Ok(Zeroizing::new(private_key))
}
