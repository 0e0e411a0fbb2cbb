//! CLI settings
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. TOML file given with `--config`
//! 3. Environment variables (`KMSIGN_` prefix)
//! 4. Command-line flags, applied by each command

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// Example: `KMSIGN_SIGNING__KEY_ALIAS` -> `signing.key_alias`
const ENV_PREFIX: &str = "KMSIGN_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub signing: SigningSettings,
    pub aws: AwsSettings,
    pub gcp: GcpSettings,
}

/// Defaults for `kmsign sign`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningSettings {
    pub algorithm: Option<String>,
    /// Local PKCS#8 key
    pub key: Option<PathBuf>,
    pub kms_type: Option<String>,
    pub key_alias: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsSettings {
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcpSettings {
    pub endpoint: Option<String>,
    pub access_token: Option<String>,
}

impl Settings {
    /// Load defaults, the optional config file, then environment overrides
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let figment = Self::figment(path)?.merge(Env::prefixed(ENV_PREFIX).split("__"));
        let settings: Settings = figment.extract()?;
        debug!(?settings.signing, "settings loaded");
        Ok(settings)
    }

    fn figment(path: Option<&Path>) -> CliResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));
        if let Some(path) = path {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.display().to_string()));
            }
            info!(path = %path.display(), "loading configuration");
            figment = figment.merge(Toml::file(path));
        }
        Ok(figment)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn from_file(contents: &str) -> CliResult<Settings> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let settings = Settings::figment(Some(file.path()))?.extract()?;
        Ok(settings)
    }

    #[test]
    fn test_defaults_without_file() {
        let settings: Settings = Settings::figment(None).unwrap().extract().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_file_values() {
        let settings = from_file(
            r#"
            [signing]
            algorithm = "SHA256withECDSA"
            kms_type = "AWS"
            key_alias = "release"

            [aws]
            region = "eu-west-1"
            "#,
        )
        .unwrap();

        assert_eq!(settings.signing.algorithm.as_deref(), Some("SHA256withECDSA"));
        assert_eq!(settings.signing.kms_type.as_deref(), Some("AWS"));
        assert_eq!(settings.signing.key_alias.as_deref(), Some("release"));
        assert_eq!(settings.signing.key, None);
        assert_eq!(settings.aws.region.as_deref(), Some("eu-west-1"));
        assert_eq!(settings.gcp, GcpSettings::default());
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = Settings::load(Some(Path::new("/nonexistent/kmsign.toml"))).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let err = from_file("[signing]\nkey_alias = [1, 2]\n").unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
