//! Key import tooling
//!
//! Helpers used around a one-time import of a local private key into a KMS:
//! check that the target key exists before building a signing config, wrap the
//! key material for upload, and wait for asynchronous provisioning steps
//! (import jobs, key versions) to become ready.

use std::{
    thread,
    time::{Duration, Instant},
};

use kmsign_crypto::WrappedKeyPackage;
use kmsign_key::{Error, KeyConfig, KmsType, PrivateKey, Result};
use tracing::{debug, info, warn};

/// Looks up whether a key alias exists in a KMS
pub trait KeyDirectory {
    fn kms_type(&self) -> KmsType;

    fn key_exists(&self, key_alias: &str) -> Result<bool>;
}

/// Build a KMS key config, failing fast when the alias does not exist
pub fn require_kms_key(directory: &dyn KeyDirectory, key_alias: &str) -> Result<KeyConfig> {
    let kms_type = directory.kms_type();
    if !directory.key_exists(key_alias)? {
        warn!(%kms_type, key_alias, "key alias does not exist");
        return Err(Error::KeyNotFound {
            backend: kms_type.to_string(),
            alias: key_alias.to_string(),
        });
    }
    Ok(KeyConfig::kms(kms_type, key_alias))
}

/// Wrap a private key, PKCS#8 DER encoded, under the KMS wrapping public key
pub fn prepare_import(
    key: &PrivateKey,
    wrapping_public_key_der: &[u8],
) -> Result<WrappedKeyPackage> {
    let der = key.to_pkcs8_der()?;
    let package = kmsign_crypto::wrap_key_for_import(&der, wrapping_public_key_der)?;
    info!(
        key_type = %key.key_type(),
        key_len = der.len(),
        package_len = package.len(),
        "wrapped private key for import"
    );
    Ok(package)
}

/// Polling schedule for provisioning steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollPolicy {
    /// Delay before the second check
    pub interval: Duration,
    /// Upper bound for the delay between checks
    pub max_interval: Duration,
    /// Growth factor applied to the delay after each check
    pub multiplier: f64,
    /// Give up once this much time has passed
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_interval: Duration::from_secs(30),
            multiplier: 2.0,
            timeout: Duration::from_secs(600),
        }
    }
}

impl PollPolicy {
    /// Fixed-interval polling
    pub fn fixed(interval: Duration, timeout: Duration) -> Self {
        Self {
            interval,
            max_interval: interval,
            multiplier: 1.0,
            timeout,
        }
    }

    /// Exponential backoff, rejecting a non-finite multiplier
    pub fn new(
        interval: Duration,
        max_interval: Duration,
        multiplier: f64,
        timeout: Duration,
    ) -> Result<Self> {
        let policy = Self {
            interval,
            max_interval,
            multiplier,
            timeout,
        };
        policy.validate()?;
        Ok(policy)
    }

    fn validate(&self) -> Result<()> {
        if !self.multiplier.is_finite() {
            return Err(Error::InvalidParameters(format!(
                "poll multiplier must be finite, got {}",
                self.multiplier
            )));
        }
        Ok(())
    }

    fn next_interval(&self, current: Duration) -> Duration {
        let multiplier = if self.multiplier.is_finite() {
            self.multiplier.max(1.0)
        } else {
            1.0
        };
        let next = current.as_secs_f64() * multiplier;
        if next >= self.max_interval.as_secs_f64() {
            return self.max_interval;
        }
        Duration::try_from_secs_f64(next)
            .unwrap_or(self.max_interval)
            .min(self.max_interval)
    }
}

/// Call `check` until it reports ready, sleeping between calls per `policy`
///
/// Errors from `check` end the wait immediately. A policy with a non-finite
/// multiplier is rejected before the first check.
pub fn wait_until_ready<F>(policy: &PollPolicy, what: &str, mut check: F) -> Result<()>
where
    F: FnMut() -> Result<bool>,
{
    policy.validate()?;
    let started = Instant::now();
    let mut interval = policy.interval;
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        if check()? {
            info!(what, attempts, elapsed = ?started.elapsed(), "ready");
            return Ok(());
        }

        let elapsed = started.elapsed();
        if elapsed >= policy.timeout {
            warn!(what, attempts, "gave up waiting");
            return Err(Error::Timeout {
                what: what.to_string(),
                elapsed,
            });
        }

        let delay = interval.min(policy.timeout - elapsed);
        debug!(what, attempts, ?delay, "not ready yet");
        thread::sleep(delay);
        interval = policy.next_interval(interval);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, collections::HashSet};

    use super::*;

    const RSA_PK8: &[u8] = include_bytes!("../../../../testdata/rsa-2048.pk8");
    const WRAPPING_PK8: &[u8] = include_bytes!("../../../../testdata/wrapping-rsa-4096.pk8");
    const WRAPPING_SPKI: &[u8] = include_bytes!("../../../../testdata/wrapping-rsa-4096.spki.der");

    struct StaticDirectory {
        aliases: HashSet<&'static str>,
        lookups: Cell<usize>,
    }

    impl StaticDirectory {
        fn new(aliases: &[&'static str]) -> Self {
            Self {
                aliases: aliases.iter().copied().collect(),
                lookups: Cell::new(0),
            }
        }
    }

    impl KeyDirectory for StaticDirectory {
        fn kms_type(&self) -> KmsType {
            KmsType::AWS
        }

        fn key_exists(&self, key_alias: &str) -> Result<bool> {
            self.lookups.set(self.lookups.get() + 1);
            Ok(self.aliases.contains(key_alias))
        }
    }

    #[test]
    fn test_require_existing_key() {
        let directory = StaticDirectory::new(&["release"]);
        let config = require_kms_key(&directory, "release").unwrap();
        assert!(matches!(
            config,
            KeyConfig::Kms { ref kms_type, ref key_alias }
                if *kms_type == KmsType::AWS && key_alias == "release"
        ));
    }

    #[test]
    fn test_missing_key_fails_fast() {
        let directory = StaticDirectory::new(&["release"]);
        let err = require_kms_key(&directory, "debug").unwrap_err();
        assert!(matches!(err, Error::KeyNotFound { ref alias, .. } if alias == "debug"));
        assert_eq!(directory.lookups.get(), 1);
    }

    #[test]
    fn test_prepare_import_round_trip() {
        let key = PrivateKey::from_pkcs8_der(RSA_PK8).unwrap();
        let package = prepare_import(&key, WRAPPING_SPKI).unwrap();
        assert_eq!(
            package.len(),
            kmsign_crypto::wrapped_package_len(512, key.to_pkcs8_der().unwrap().len())
        );

        let wrapping_key = kmsign_crypto::Rsa::from_pkcs8_der(WRAPPING_PK8).unwrap();
        let recovered =
            kmsign_crypto::unwrap_imported_key(package.as_bytes(), &wrapping_key.inner).unwrap();
        let reloaded = PrivateKey::from_pkcs8_der(&recovered).unwrap();
        assert_eq!(reloaded.to_spki_der().unwrap(), key.to_spki_der().unwrap());
    }

    #[test]
    fn test_prepare_import_bad_wrapping_key() {
        let key = PrivateKey::from_pkcs8_der(RSA_PK8).unwrap();
        let err = prepare_import(&key, b"junk").unwrap_err();
        assert!(matches!(err, Error::Crypto(kmsign_crypto::Error::KeyWrap(_))));
    }

    #[test]
    fn test_wait_until_ready_after_retries() {
        let policy = PollPolicy::fixed(Duration::from_millis(1), Duration::from_secs(5));
        let mut calls = 0;
        wait_until_ready(&policy, "import job", || {
            calls += 1;
            Ok(calls == 3)
        })
        .unwrap();
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_wait_until_ready_times_out() {
        let policy = PollPolicy {
            interval: Duration::from_millis(2),
            max_interval: Duration::from_millis(8),
            multiplier: 2.0,
            timeout: Duration::from_millis(40),
        };
        let mut calls = 0;
        let err = wait_until_ready(&policy, "key version", || {
            calls += 1;
            Ok(false)
        })
        .unwrap_err();

        assert!(matches!(err, Error::Timeout { ref what, .. } if what == "key version"));
        assert!(calls >= 2);
    }

    #[test]
    fn test_wait_until_ready_propagates_check_errors() {
        let policy = PollPolicy::default();
        let err = wait_until_ready(&policy, "import job", || {
            Err(Error::Other("permission denied".to_string()))
        })
        .unwrap_err();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = PollPolicy::default();
        let mut interval = policy.interval;
        for _ in 0..10 {
            interval = policy.next_interval(interval);
        }
        assert_eq!(interval, policy.max_interval);
    }

    #[test]
    fn test_non_finite_multiplier_rejected() {
        for multiplier in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let err = PollPolicy::new(
                Duration::from_millis(1),
                Duration::from_millis(5),
                multiplier,
                Duration::from_millis(50),
            )
            .unwrap_err();
            assert!(matches!(err, Error::InvalidParameters(_)));
        }

        let policy = PollPolicy {
            interval: Duration::from_millis(1),
            max_interval: Duration::from_millis(5),
            multiplier: f64::INFINITY,
            timeout: Duration::from_millis(50),
        };
        let mut calls = 0;
        let err = wait_until_ready(&policy, "import job", || {
            calls += 1;
            Ok(false)
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(_)));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_huge_multiplier_clamps_to_max_interval() {
        let policy = PollPolicy::new(
            Duration::from_millis(1),
            Duration::from_millis(5),
            f64::MAX,
            Duration::from_millis(50),
        )
        .unwrap();
        assert_eq!(
            policy.next_interval(Duration::from_secs(u64::MAX)),
            policy.max_interval
        );
        assert_eq!(
            policy.next_interval(Duration::from_millis(1)),
            policy.max_interval
        );

        let unchecked = PollPolicy {
            multiplier: f64::INFINITY,
            ..policy
        };
        assert_eq!(
            unchecked.next_interval(Duration::from_millis(2)),
            Duration::from_millis(2)
        );
    }
}
