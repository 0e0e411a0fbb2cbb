use tracing::debug;

use super::{Backend, SignerEngine};
use crate::{
    algorithm::{AlgorithmParameters, SignatureAlgorithm},
    error::{Error, Result},
    key::PrivateKey,
};

/// Signs with a private key held in this process
#[derive(Debug)]
pub struct LocalSignerEngine {
    key: PrivateKey,
    algorithm: SignatureAlgorithm,
    parameters: Option<AlgorithmParameters>,
}

impl LocalSignerEngine {
    /// Bind `key` to a generic algorithm identifier
    ///
    /// Fails when the identifier is unknown, when it needs a different key
    /// family, or when the parameters do not apply to it.
    pub fn new(
        key: PrivateKey,
        algorithm: &str,
        parameters: Option<AlgorithmParameters>,
    ) -> Result<Self> {
        let algorithm = SignatureAlgorithm::from_name(algorithm)
            .ok_or_else(|| Error::unsupported_algorithm(Backend::Local, algorithm))?;
        Self::with_algorithm(key, algorithm, parameters)
    }

    pub fn with_algorithm(
        key: PrivateKey,
        algorithm: SignatureAlgorithm,
        parameters: Option<AlgorithmParameters>,
    ) -> Result<Self> {
        if algorithm.key_type() != key.key_type() {
            return Err(Error::IncompatibleKey {
                key_type: key.key_type().name(),
                algorithm: algorithm.name().to_string(),
            });
        }
        if let Some(parameters) = &parameters {
            parameters.validate_for(algorithm)?;
        }

        debug!(
            key_type = %key.key_type(),
            %algorithm,
            "local signer engine ready"
        );
        Ok(Self {
            key,
            algorithm,
            parameters,
        })
    }

    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    pub fn parameters(&self) -> Option<AlgorithmParameters> {
        self.parameters
    }

    pub fn key(&self) -> &PrivateKey {
        &self.key
    }

    fn pss_salt_len(&self) -> Option<usize> {
        self.parameters.map(|params| match params {
            AlgorithmParameters::Pss { salt_len } => salt_len,
        })
    }
}

impl SignerEngine for LocalSignerEngine {
    fn backend(&self) -> Backend {
        Backend::Local
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let signature = match (&self.key, self.algorithm.digest()) {
            (PrivateKey::Rsa(key), Some(digest)) if self.algorithm.is_pss() => {
                key.sign_pss(digest, self.pss_salt_len(), data)
            }
            (PrivateKey::Rsa(key), Some(digest)) => key.sign_pkcs1v15(digest, data),
            (PrivateKey::P256(key), Some(digest)) => key.sign(digest, data),
            (PrivateKey::Ed25519(key), None) => Ok(key.sign(data).to_vec()),
            _ => {
                return Err(Error::IncompatibleKey {
                    key_type: self.key.key_type().name(),
                    algorithm: self.algorithm.name().to_string(),
                })
            }
        }
        .map_err(|e| Error::signing(Backend::Local, e))?;

        debug!(
            algorithm = %self.algorithm,
            len = data.len(),
            "signed payload with local key"
        );
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use kmsign_crypto::asymmetric::{ed25519, p256, rsa};

    use super::*;

    const RSA_PK8: &[u8] = include_bytes!("../../../../testdata/rsa-2048.pk8");
    const RSA_SPKI: &[u8] = include_bytes!("../../../../testdata/rsa-2048.spki.der");
    const EC_PK8: &[u8] = include_bytes!("../../../../testdata/ec-p256.pk8");
    const EC_SPKI: &[u8] = include_bytes!("../../../../testdata/ec-p256.spki.der");
    const ED_PK8: &[u8] = include_bytes!("../../../../testdata/ed25519.pk8");
    const ED_SPKI: &[u8] = include_bytes!("../../../../testdata/ed25519.spki.der");

    fn engine(pk8: &[u8], algorithm: &str) -> LocalSignerEngine {
        let key = PrivateKey::from_pkcs8_der(pk8).unwrap();
        LocalSignerEngine::new(key, algorithm, None).unwrap()
    }

    #[test]
    fn test_rsa_signatures_verify() {
        let public_key = rsa::public_key_from_spki_der(RSA_SPKI).unwrap();
        let data = b"payload for rsa";

        for name in ["SHA256withRSA", "SHA512withRSA"] {
            let engine = engine(RSA_PK8, name);
            let digest = engine.algorithm().digest().unwrap();
            let signature = engine.sign(data).unwrap();
            assert!(rsa::verify_pkcs1v15(&public_key, digest, data, &signature));
        }

        for name in ["SHA256withRSA/PSS", "SHA512withRSA/PSS"] {
            let engine = engine(RSA_PK8, name);
            let digest = engine.algorithm().digest().unwrap();
            let signature = engine.sign(data).unwrap();
            assert!(rsa::verify_pss(&public_key, digest, None, data, &signature));
        }
    }

    #[test]
    fn test_pss_salt_length_is_honoured() {
        let key = PrivateKey::from_pkcs8_der(RSA_PK8).unwrap();
        let engine = LocalSignerEngine::new(
            key,
            "SHA256withRSA/PSS",
            Some(AlgorithmParameters::Pss { salt_len: 0 }),
        )
        .unwrap();
        let public_key = rsa::public_key_from_spki_der(RSA_SPKI).unwrap();
        let digest = engine.algorithm().digest().unwrap();

        let signature = engine.sign(b"data").unwrap();
        assert!(rsa::verify_pss(&public_key, digest, Some(0), b"data", &signature));
        // Zero-length salt makes PSS deterministic
        assert_eq!(signature, engine.sign(b"data").unwrap());
    }

    #[test]
    fn test_ecdsa_signatures_verify() {
        let public_key = p256::public_key_from_spki_der(EC_SPKI).unwrap();
        for name in ["SHA256withECDSA", "SHA512withECDSA"] {
            let engine = engine(EC_PK8, name);
            let digest = engine.algorithm().digest().unwrap();
            let signature = engine.sign(b"ecdsa").unwrap();
            assert!(p256::verify(&public_key, digest, b"ecdsa", &signature));
        }
    }

    #[test]
    fn test_ed25519_signature_verifies() {
        let engine = engine(ED_PK8, "Ed25519");
        let signature = engine.sign(b"eddsa").unwrap();
        assert_eq!(signature.len(), 64);
        assert!(ed25519::verify_with_spki_der(ED_SPKI, b"eddsa", &signature).unwrap());
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let key = PrivateKey::from_pkcs8_der(RSA_PK8).unwrap();
        let err = LocalSignerEngine::new(key, "SHA1withRSA", None).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedAlgorithm { ref algorithm, .. } if algorithm == "SHA1withRSA"
        ));
    }

    #[test]
    fn test_incompatible_key_rejected() {
        let key = PrivateKey::from_pkcs8_der(EC_PK8).unwrap();
        let err = LocalSignerEngine::new(key, "SHA256withRSA", None).unwrap_err();
        assert!(matches!(err, Error::IncompatibleKey { key_type: "EC P-256", .. }));

        let key = PrivateKey::from_pkcs8_der(RSA_PK8).unwrap();
        let err = LocalSignerEngine::new(key, "Ed25519", None).unwrap_err();
        assert!(matches!(err, Error::IncompatibleKey { .. }));
    }

    #[test]
    fn test_pss_parameters_rejected_for_pkcs1() {
        let key = PrivateKey::from_pkcs8_der(RSA_PK8).unwrap();
        let err = LocalSignerEngine::new(
            key,
            "SHA256withRSA",
            Some(AlgorithmParameters::Pss { salt_len: 32 }),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(_)));
    }

    #[test]
    fn test_engine_shared_across_threads() {
        let engine = std::sync::Arc::new(engine(ED_PK8, "Ed25519"));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.sign(&[i as u8; 16]).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().len(), 64);
        }
    }
}
