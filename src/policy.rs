//! Hash-cost configuration.
//!
//! A [`HashingPolicy`] is built once at startup and handed to every
//! [`CredentialField`](crate::CredentialField) that should hash with it.
//! Test suites build [`HashingPolicy::minimum`] instead of flipping a global.

use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand_core::{OsRng, RngCore};
use serde::Deserialize;

use crate::digest::Digest;
use crate::error::Error;

const SALT_LEN: usize = 16;

/// How expensive each new digest should be.
///
/// Cost only affects digests produced from now on. Every digest records its
/// own parameters, so changing the cost never breaks verification of digests
/// already in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cost {
    /// The argon2 crate's recommended parameters.
    #[default]
    Default,
    /// The cheapest parameters argon2 accepts. For test environments only.
    Minimum,
    /// Explicit Argon2id parameters.
    Custom {
        /// Memory size in KiB
        memory_kib: u32,
        /// Number of passes
        iterations: u32,
        /// Degree of parallelism
        parallelism: u32,
    },
}

impl Cost {
    fn params(self) -> Result<Params, argon2::Error> {
        match self {
            Cost::Default => Ok(Params::default()),
            Cost::Minimum => Params::new(
                Params::MIN_M_COST,
                Params::MIN_T_COST,
                Params::MIN_P_COST,
                None,
            ),
            Cost::Custom {
                memory_kib,
                iterations,
                parallelism,
            } => Params::new(memory_kib, iterations, parallelism, None),
        }
    }
}

#[derive(Deserialize)]
struct PolicyConfig {
    #[serde(default)]
    cost: Cost,
}

/// The Argon2id hashing configuration used to produce digests.
///
/// # Examples
///
/// ```
/// use secure_fields::{Cost, HashingPolicy};
///
/// let policy = HashingPolicy::new(Cost::Minimum).expect("hashing available");
/// let digest = policy.hash("mUc3m00RsqyRe").unwrap();
///
/// assert!(digest.expose_digest().starts_with("$argon2id$"));
/// assert!(policy.verify("password", &digest, "mUc3m00RsqyRe").unwrap());
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "PolicyConfig")]
pub struct HashingPolicy {
    cost: Cost,
    params: Params,
}

impl HashingPolicy {
    /// Builds a policy for the given cost.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the parameters are rejected by
    /// argon2 or the operating system provides no entropy source for salts.
    /// Either way the process cannot store passwords safely and should not
    /// start.
    pub fn new(cost: Cost) -> Result<Self, Error> {
        let params = cost.params().map_err(|e| {
            Error::Configuration(format!("argon2 rejected cost {:?}: {}", cost, e))
        })?;

        // Fail at construction rather than on the first password assignment.
        salt_bytes().map_err(|e| Error::Configuration(entropy_unavailable(e)))?;

        tracing::debug!(
            m_cost = params.m_cost(),
            t_cost = params.t_cost(),
            p_cost = params.p_cost(),
            "argon2id hashing policy ready"
        );

        Ok(Self { cost, params })
    }

    /// Policy with the recommended default cost.
    pub fn secure() -> Result<Self, Error> {
        Self::new(Cost::Default)
    }

    /// Policy with the smallest legal cost, for tests.
    pub fn minimum() -> Result<Self, Error> {
        Self::new(Cost::Minimum)
    }

    /// Returns the configured cost.
    pub fn cost(&self) -> Cost {
        self.cost
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes `plaintext` with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Hashing`] if no salt could be drawn or argon2 fails.
    pub fn hash(&self, plaintext: &str) -> Result<Digest, Error> {
        let salt = generate_salt()?;
        let hash = self
            .hasher()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| Error::Hashing(e.to_string()))?;

        Ok(Digest::new(hash.to_string()))
    }

    /// Checks `candidate` against `digest` using the digest's own parameters.
    ///
    /// `attribute` only labels the error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptDigest`] if `digest` is not a complete argon2
    /// PHC string. A wrong candidate is `Ok(false)`.
    pub fn verify(&self, attribute: &str, digest: &Digest, candidate: &str) -> Result<bool, Error> {
        let parsed = parse(attribute, digest)?;

        match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => {
                tracing::warn!(attribute, error = %e, "stored digest failed verification");
                Err(Error::corrupt_digest(attribute, e))
            }
        }
    }

    /// Returns `true` if `digest` was produced with different parameters
    /// than this policy would use today.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptDigest`] if `digest` cannot be parsed.
    pub fn needs_rehash(&self, attribute: &str, digest: &Digest) -> Result<bool, Error> {
        let parsed = parse(attribute, digest)?;

        if parsed.algorithm.as_str() != Algorithm::Argon2id.as_str() {
            return Ok(true);
        }

        let stored = Params::try_from(&parsed).map_err(|e| Error::corrupt_digest(attribute, e))?;
        Ok(stored.m_cost() != self.params.m_cost()
            || stored.t_cost() != self.params.t_cost()
            || stored.p_cost() != self.params.p_cost())
    }
}

impl TryFrom<PolicyConfig> for HashingPolicy {
    type Error = Error;

    fn try_from(config: PolicyConfig) -> Result<Self, Self::Error> {
        Self::new(config.cost)
    }
}

fn parse<'a>(attribute: &str, digest: &'a Digest) -> Result<PasswordHash<'a>, Error> {
    let parsed =
        PasswordHash::new(digest.expose_digest()).map_err(|e| Error::corrupt_digest(attribute, e))?;

    if parsed.salt.is_none() || parsed.hash.is_none() {
        return Err(Error::corrupt_digest(attribute, "digest has no salt or hash"));
    }

    Ok(parsed)
}

fn salt_bytes() -> Result<[u8; SALT_LEN], rand_core::Error> {
    let mut bytes = [0u8; SALT_LEN];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(bytes)
}

fn entropy_unavailable(e: impl std::fmt::Display) -> String {
    format!(
        "argon2 salts require an operating system entropy source: {}",
        e
    )
}

fn generate_salt() -> Result<SaltString, Error> {
    let bytes = salt_bytes().map_err(|e| Error::Hashing(entropy_unavailable(e)))?;
    SaltString::encode_b64(&bytes).map_err(|e| Error::Hashing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> HashingPolicy {
        HashingPolicy::minimum().expect("minimum cost is valid")
    }

    #[test]
    fn hash_produces_self_describing_digest() {
        let digest = policy().hash("secret").unwrap();
        let encoded = digest.expose_digest();

        assert!(encoded.starts_with("$argon2id$v=19$m=8,t=1,p=1$"));
        assert!(!encoded.contains("secret"));
    }

    #[test]
    fn same_plaintext_gets_different_salts() {
        let p = policy();
        let a = p.hash("secret").unwrap();
        let b = p.hash("secret").unwrap();

        assert_ne!(a.expose_digest(), b.expose_digest());
    }

    #[test]
    fn verify_matches_and_rejects() {
        let p = policy();
        let digest = p.hash("secret").unwrap();

        assert!(p.verify("password", &digest, "secret").unwrap());
        assert!(!p.verify("password", &digest, "Secret").unwrap());
        assert!(!p.verify("password", &digest, "").unwrap());
    }

    #[test]
    fn old_cost_digest_verifies_under_new_policy() {
        let cheap = policy();
        let digest = cheap.hash("secret").unwrap();

        let dearer = HashingPolicy::new(Cost::Custom {
            memory_kib: 64,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();

        assert!(dearer.verify("password", &digest, "secret").unwrap());
        assert!(dearer.needs_rehash("password", &digest).unwrap());
        assert!(!cheap.needs_rehash("password", &digest).unwrap());
    }

    #[test]
    fn garbage_digest_is_corrupt_not_false() {
        let p = policy();
        let digest = Digest::new("not a digest".to_string());

        let err = p.verify("password", &digest, "secret").unwrap_err();
        assert!(err.is_corrupt_digest());
    }

    #[test]
    fn truncated_digest_is_corrupt() {
        let p = policy();
        let digest = Digest::new("$argon2id$v=19$m=8,t=1,p=1".to_string());

        assert!(p.verify("password", &digest, "secret").unwrap_err().is_corrupt_digest());
    }

    #[test]
    fn foreign_algorithm_is_corrupt() {
        let p = policy();
        let digest = Digest::new(
            "$scrypt$ln=4,r=8,p=1$c2FsdHNhbHRzYWx0$aGFzaGhhc2hoYXNoaGFzaA".to_string(),
        );

        assert!(p.verify("password", &digest, "secret").unwrap_err().is_corrupt_digest());
    }

    #[test]
    fn invalid_custom_cost_is_configuration_error() {
        let err = HashingPolicy::new(Cost::Custom {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        })
        .unwrap_err();

        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("argon2"));
    }

    #[test]
    fn entropy_failure_reads_as_single_configuration_error() {
        let err = Error::Configuration(entropy_unavailable("getrandom: unsupported"));

        assert_eq!(
            err.to_string(),
            "Hashing configuration error: argon2 salts require an operating system \
             entropy source: getrandom: unsupported"
        );
    }

    #[test]
    fn deserializes_from_config() {
        let p: HashingPolicy = serde_json::from_str(r#"{ "cost": "minimum" }"#).unwrap();
        assert_eq!(p.cost(), Cost::Minimum);

        let p: HashingPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(p.cost(), Cost::Default);

        let p: HashingPolicy = serde_json::from_str(
            r#"{ "cost": { "custom": { "memory_kib": 64, "iterations": 1, "parallelism": 1 } } }"#,
        )
        .unwrap();
        assert_eq!(
            p.cost(),
            Cost::Custom {
                memory_kib: 64,
                iterations: 1,
                parallelism: 1
            }
        );
    }

    #[test]
    fn invalid_config_fails_to_deserialize() {
        let result: Result<HashingPolicy, _> = serde_json::from_str(
            r#"{ "cost": { "custom": { "memory_kib": 0, "iterations": 0, "parallelism": 0 } } }"#,
        );
        assert!(result.is_err());
    }
}
