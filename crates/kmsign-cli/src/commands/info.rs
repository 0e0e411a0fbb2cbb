use std::{fs, path::Path};

use colored::Colorize;
use kmsign_key::{KeyType, PrivateKey, SignatureAlgorithm};

use crate::error::{CliError, CliResult};

/// Signature algorithms a key of `key_type` can be used with
fn compatible_algorithms(key_type: KeyType) -> Vec<&'static str> {
    SignatureAlgorithm::ALL
        .iter()
        .filter(|algorithm| algorithm.key_type() == key_type)
        .map(|algorithm| algorithm.name())
        .collect()
}

pub fn handle(key: &Path) -> CliResult<()> {
    println!("{}", format!("Key info: {}", key.display()).cyan().bold());
    println!();

    if !key.exists() {
        return Err(CliError::FileNotFound(key.display().to_string()));
    }

    let private_key = PrivateKey::load_from_file(key)?;
    let key_type = private_key.key_type();

    println!("{}", "Key type: private".yellow());
    println!("Algorithm: {}", key_type);
    println!("Size: {} bits", private_key.size_bits());
    println!(
        "Signature algorithms: {}",
        compatible_algorithms(key_type).join(", ")
    );
    println!(
        "Default algorithm: {}",
        SignatureAlgorithm::default_for(key_type)
    );

    println!();
    println!("{}", "Public key:".cyan());
    println!("  SPKI SHA-256: {}", private_key.fingerprint_hex()?);
    println!();
    print!("{}", private_key.to_spki_pem()?);

    let metadata = fs::metadata(key)?;
    println!();
    println!("{}", "File info:".cyan());
    println!("  File size: {} bytes", metadata.len());

    println!();
    println!("{}", "⚠ Keep the private key file safe!".yellow().bold());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatible_algorithms_per_key_type() {
        assert_eq!(
            compatible_algorithms(KeyType::Rsa),
            vec![
                "SHA256withRSA",
                "SHA512withRSA",
                "SHA256withRSA/PSS",
                "SHA512withRSA/PSS"
            ]
        );
        assert_eq!(
            compatible_algorithms(KeyType::P256),
            vec!["SHA256withECDSA", "SHA512withECDSA"]
        );
        assert_eq!(compatible_algorithms(KeyType::Ed25519), vec!["Ed25519"]);
    }

    #[test]
    fn test_missing_file() {
        let err = handle(Path::new("/nonexistent/key.pem")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_info_for_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../testdata/ec-p256.pk8");
        handle(&path).unwrap();
    }
}
