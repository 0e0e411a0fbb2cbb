//! Cloud KMS resource names

use std::{fmt, str::FromStr};

use kmsign_key::{Error, Result};

/// `projects/{project}/locations/{location}/keyRings/{key_ring}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyRingName {
    pub project: String,
    pub location: String,
    pub key_ring: String,
}

/// `projects/{p}/locations/{l}/keyRings/{r}/cryptoKeys/{k}/cryptoKeyVersions/{v}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CryptoKeyVersionName {
    pub project: String,
    pub location: String,
    pub key_ring: String,
    pub crypto_key: String,
    pub crypto_key_version: String,
}

impl KeyRingName {
    pub fn new(
        project: impl Into<String>,
        location: impl Into<String>,
        key_ring: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            location: location.into(),
            key_ring: key_ring.into(),
        }
    }

    /// Name of a version of a key inside this ring
    pub fn crypto_key_version(
        &self,
        crypto_key: impl Into<String>,
        version: impl Into<String>,
    ) -> CryptoKeyVersionName {
        CryptoKeyVersionName {
            project: self.project.clone(),
            location: self.location.clone(),
            key_ring: self.key_ring.clone(),
            crypto_key: crypto_key.into(),
            crypto_key_version: version.into(),
        }
    }
}

impl CryptoKeyVersionName {
    pub fn key_ring(&self) -> KeyRingName {
        KeyRingName::new(&self.project, &self.location, &self.key_ring)
    }
}

/// Split `name` into the values that follow each of `collections`
fn parse_segments<'a, const N: usize>(
    name: &'a str,
    collections: [&str; N],
) -> Result<[&'a str; N]> {
    let invalid = |reason: &str| Error::InvalidKeyAlias {
        alias: name.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = name.split('/').collect();
    if parts.len() != N * 2 {
        return Err(invalid(&format!(
            "expected {} path segments, found {}",
            N * 2,
            parts.len()
        )));
    }

    let mut values = [""; N];
    for (i, collection) in collections.iter().enumerate() {
        if parts[2 * i] != *collection {
            return Err(invalid(&format!(
                "expected `{collection}` at segment {}",
                2 * i + 1
            )));
        }
        let value = parts[2 * i + 1];
        if value.is_empty() {
            return Err(invalid(&format!("empty `{collection}` id")));
        }
        values[i] = value;
    }
    Ok(values)
}

impl FromStr for KeyRingName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let [project, location, key_ring] =
            parse_segments(s, ["projects", "locations", "keyRings"])?;
        Ok(Self::new(project, location, key_ring))
    }
}

impl FromStr for CryptoKeyVersionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let [project, location, key_ring, crypto_key, version] = parse_segments(
            s,
            [
                "projects",
                "locations",
                "keyRings",
                "cryptoKeys",
                "cryptoKeyVersions",
            ],
        )?;
        Ok(KeyRingName::new(project, location, key_ring).crypto_key_version(crypto_key, version))
    }
}

impl fmt::Display for KeyRingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/locations/{}/keyRings/{}",
            self.project, self.location, self.key_ring
        )
    }
}

impl fmt::Display for CryptoKeyVersionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/cryptoKeys/{}/cryptoKeyVersions/{}",
            self.key_ring(),
            self.crypto_key,
            self.crypto_key_version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION: &str =
        "projects/signing/locations/global/keyRings/release/cryptoKeys/app/cryptoKeyVersions/1";

    #[test]
    fn test_parse_and_format_version() {
        let name: CryptoKeyVersionName = VERSION.parse().unwrap();
        assert_eq!(name.project, "signing");
        assert_eq!(name.location, "global");
        assert_eq!(name.key_ring, "release");
        assert_eq!(name.crypto_key, "app");
        assert_eq!(name.crypto_key_version, "1");
        assert_eq!(name.to_string(), VERSION);
    }

    #[test]
    fn test_key_ring_builds_version_name() {
        let ring: KeyRingName = "projects/signing/locations/global/keyRings/release"
            .parse()
            .unwrap();
        assert_eq!(ring.crypto_key_version("app", "1").to_string(), VERSION);
        assert_eq!(VERSION.parse::<CryptoKeyVersionName>().unwrap().key_ring(), ring);
    }

    #[test]
    fn test_malformed_names_rejected() {
        for bad in [
            "",
            "app",
            "projects/signing/locations/global/keyRings/release/cryptoKeys/app",
            "projects/signing/locations/global/keyRings/release/cryptoKeys/app/versions/1",
            "projects//locations/global/keyRings/release/cryptoKeys/app/cryptoKeyVersions/1",
            "projects/signing/locations/global/keyRings/release/cryptoKeys/app/cryptoKeyVersions/1/",
        ] {
            assert!(
                matches!(
                    bad.parse::<CryptoKeyVersionName>(),
                    Err(Error::InvalidKeyAlias { .. })
                ),
                "{bad}"
            );
        }
    }
}
