use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Args;
use colored::Colorize;
use kmsign_key::{
    AlgorithmParameters, KeyConfig, KmsType, PrivateKey, SignatureAlgorithm, SignerEngineRegistry,
};
use tracing::info;

use crate::{
    error::{CliError, CliResult},
    settings::Settings,
};

#[derive(Debug, Clone, Default, Args)]
pub struct SignArgs {
    /// File to sign
    #[arg(short, long)]
    pub input: PathBuf,

    /// Signature output file (defaults to `<input>.sig`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Local PKCS#8 private key, PEM or DER
    #[arg(short, long, conflicts_with_all = ["kms_type", "key_alias"])]
    pub key: Option<PathBuf>,

    /// KMS backend holding the key (AWS, GCP)
    #[arg(long)]
    pub kms_type: Option<String>,

    /// Key alias inside the KMS
    #[arg(long)]
    pub key_alias: Option<String>,

    /// Signature algorithm, e.g. SHA256withRSA
    #[arg(short, long)]
    pub algorithm: Option<String>,

    /// RSASSA-PSS salt length in bytes
    #[arg(long)]
    pub pss_salt_len: Option<usize>,
}

/// Where the signing key comes from after merging flags and settings
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeySource {
    Local(PathBuf),
    Kms { kms_type: String, key_alias: String },
}

fn key_source(args: &SignArgs, settings: &Settings) -> CliResult<KeySource> {
    if let Some(key) = &args.key {
        return Ok(KeySource::Local(key.clone()));
    }

    let signing = &settings.signing;
    let kms_from_flags = args.kms_type.is_some() || args.key_alias.is_some();
    if !kms_from_flags {
        if let Some(key) = &signing.key {
            return Ok(KeySource::Local(key.clone()));
        }
    }

    let kms_type = args.kms_type.as_ref().or(signing.kms_type.as_ref());
    let key_alias = args.key_alias.as_ref().or(signing.key_alias.as_ref());
    match (kms_type, key_alias) {
        (Some(kms_type), Some(key_alias)) => Ok(KeySource::Kms {
            kms_type: kms_type.clone(),
            key_alias: key_alias.clone(),
        }),
        (Some(_), None) => Err(CliError::InvalidInput(
            "--kms-type needs a --key-alias".to_string(),
        )),
        (None, Some(_)) => Err(CliError::InvalidInput(
            "--key-alias needs a --kms-type".to_string(),
        )),
        (None, None) => Err(CliError::InvalidInput(
            "no signing key: pass --key, or --kms-type with --key-alias".to_string(),
        )),
    }
}

fn default_output(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".sig");
    PathBuf::from(name)
}

pub fn handle(args: SignArgs, settings: &Settings) -> CliResult<()> {
    let registry = super::registry(settings);
    let output = sign_file(&args, settings, &registry)?;
    println!("{} Signature written to: {}", "✓".green(), output.display());
    Ok(())
}

/// Sign `args.input` and write the raw signature, returning the output path
pub fn sign_file(
    args: &SignArgs,
    settings: &Settings,
    registry: &SignerEngineRegistry,
) -> CliResult<PathBuf> {
    println!("{}", format!("Signing file: {}", args.input.display()).cyan());

    if !args.input.exists() {
        return Err(CliError::FileNotFound(args.input.display().to_string()));
    }
    let data = fs::read(&args.input)?;
    println!("  File size: {} bytes", data.len());

    let algorithm = args
        .algorithm
        .clone()
        .or_else(|| settings.signing.algorithm.clone());
    let parameters = args
        .pss_salt_len
        .map(|salt_len| AlgorithmParameters::Pss { salt_len });

    let (key_config, algorithm) = match key_source(args, settings)? {
        KeySource::Local(path) => {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.display().to_string()));
            }
            let key = PrivateKey::load_from_file(&path)?;
            println!("  Private key: {} ({})", path.display(), key.key_type());
            let algorithm = algorithm.unwrap_or_else(|| {
                SignatureAlgorithm::default_for(key.key_type())
                    .name()
                    .to_string()
            });
            (KeyConfig::local(key), algorithm)
        }
        KeySource::Kms {
            kms_type,
            key_alias,
        } => {
            // Backends whose keys fix the algorithm (GCP) accept an empty identifier
            let algorithm = algorithm.unwrap_or_default();
            println!("  KMS key: {} ({})", key_alias, kms_type);
            (KeyConfig::kms(KmsType::new(kms_type), key_alias), algorithm)
        }
    };

    let engine = registry.resolve(key_config, &algorithm, parameters)?;
    println!("{}", "Signing...".cyan());
    let signature = engine.sign(&data)?;
    info!(
        backend = %engine.backend(),
        %algorithm,
        signature_len = signature.len(),
        "signed input"
    );

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.input));
    fs::write(&output, &signature)?;

    println!();
    println!("{}", "Signature:".cyan());
    println!("  Backend: {}", engine.backend());
    if !algorithm.is_empty() {
        println!("  Algorithm: {}", algorithm);
    }
    println!("  Length: {} bytes", signature.len());
    println!("  Prefix: {}", hex::encode(&signature[..signature.len().min(16)]));

    Ok(output)
}
