use std::{
    fs,
    path::{Path, PathBuf},
};

use colored::Colorize;
use kmsign_key::{key::util::looks_like_pem, PrivateKey};

use crate::error::{CliError, CliResult};

/// Wrapping public key as SPKI DER, accepting DER or PEM files
fn load_wrapping_key(path: &Path) -> CliResult<Vec<u8>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let bytes = fs::read(path)?;
    if !looks_like_pem(&bytes) {
        return Ok(bytes);
    }

    let pem = String::from_utf8(bytes)
        .map_err(|_| CliError::InvalidInput("wrapping key PEM is not UTF-8".to_string()))?;
    if pem.contains("PRIVATE KEY") {
        return Err(CliError::InvalidInput(
            "wrapping key must be a public key".to_string(),
        ));
    }
    Ok(kmsign_crypto::asymmetric::rsa::spki_pem_to_der(&pem)?)
}

pub fn handle(
    key: PathBuf,
    wrapping_key: PathBuf,
    output: Option<PathBuf>,
    base64: bool,
) -> CliResult<()> {
    let output = wrap_file(&key, &wrapping_key, output, base64)?;
    println!("{} Wrapped key written to: {}", "✓".green(), output.display());
    Ok(())
}

/// Wrap `key` for import under `wrapping_key` and write the package
pub fn wrap_file(
    key: &Path,
    wrapping_key: &Path,
    output: Option<PathBuf>,
    base64: bool,
) -> CliResult<PathBuf> {
    println!("{}", format!("Wrapping key: {}", key.display()).cyan());

    if !key.exists() {
        return Err(CliError::FileNotFound(key.display().to_string()));
    }
    let private_key = PrivateKey::load_from_file(key)?;
    let wrapping_der = load_wrapping_key(wrapping_key)?;
    println!("  Key type: {}", private_key.key_type());
    println!("  Wrapping key: {}", wrapping_key.display());

    let package = kmsign_kms::prepare_import(&private_key, &wrapping_der)?;

    let output = output.unwrap_or_else(|| {
        let stem = key.file_stem().unwrap_or_default().to_string_lossy();
        let extension = if base64 { "b64" } else { "bin" };
        key.with_file_name(format!("{stem}.wrapped.{extension}"))
    });
    if base64 {
        fs::write(&output, package.to_base64())?;
    } else {
        fs::write(&output, package.as_bytes())?;
    }

    println!();
    println!("{}", "Wrapped key package:".cyan());
    println!("  Total length: {} bytes", package.len());
    println!(
        "  Wrapped ephemeral key: {} bytes",
        package.wrapped_ephemeral_key().len()
    );
    println!(
        "  Wrapped private key: {} bytes",
        package.wrapped_target_key().len()
    );
    println!("  Encoding: {}", if base64 { "base64" } else { "binary" });

    Ok(output)
}
