//! Secure password storage for one record attribute.

use std::fmt;

use crate::digest::Digest;
use crate::error::Error;
use crate::policy::HashingPolicy;
use crate::secret::Secret;
use crate::validation::{ValidationErrorKind, ValidationErrors};

/// A password-like attribute stored as a salted Argon2id digest.
///
/// The field keeps three values apart:
///
/// - the plaintext, held in memory only between assignment and persistence
/// - the confirmation, used only to check the plaintext was typed twice
/// - the digest, the single value the owning record persists (in the
///   `<attribute>_digest` column)
///
/// A record owns one `CredentialField` per credential attribute. Fields never
/// share state, so `password` and `recovery_password` on the same record are
/// fully independent.
///
/// # Examples
///
/// ```
/// use secure_fields::{CredentialField, HashingPolicy};
///
/// let policy = HashingPolicy::minimum().unwrap();
/// let mut password = CredentialField::new("password", policy);
///
/// password.set_plaintext(Some("mUc3m00RsqyRe")).unwrap();
/// password.set_confirmation(Some("mUc3m00RsqyRe"));
///
/// assert!(password.validate().is_empty());
/// assert!(password.verify("mUc3m00RsqyRe").unwrap());
/// assert!(!password.verify("notright").unwrap());
/// ```
pub struct CredentialField {
    attribute: String,
    policy: HashingPolicy,
    validations: bool,
    plaintext: Option<Secret<String>>,
    confirmation: Option<Secret<String>>,
    digest: Option<Digest>,
}

impl CredentialField {
    /// Creates an empty field for `attribute` with validations enabled.
    pub fn new(attribute: impl Into<String>, policy: HashingPolicy) -> Self {
        Self {
            attribute: attribute.into(),
            policy,
            validations: true,
            plaintext: None,
            confirmation: None,
            digest: None,
        }
    }

    /// Disables [`validate`](Self::validate) for this field.
    #[must_use]
    pub fn without_validations(mut self) -> Self {
        self.validations = false;
        self
    }

    /// Returns the attribute name, e.g. `"password"`.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Returns the storage column that holds the digest.
    pub fn digest_column(&self) -> String {
        format!("{}_digest", self.attribute)
    }

    /// Returns the attribute confirmation errors are reported on.
    pub fn confirmation_attribute(&self) -> String {
        format!("{}_confirmation", self.attribute)
    }

    /// Returns `true` if [`validate`](Self::validate) checks this field.
    pub fn validations_enabled(&self) -> bool {
        self.validations
    }

    /// Returns the policy new digests are produced with.
    pub fn policy(&self) -> &HashingPolicy {
        &self.policy
    }

    /// Returns the current digest, if any.
    pub fn digest(&self) -> Option<&Digest> {
        self.digest.as_ref()
    }

    /// Restores a digest read from storage, unchanged.
    ///
    /// A blank stored value means no password. Transient plaintext and
    /// confirmation are dropped; they belong to an assignment that has not
    /// been persisted.
    pub fn load_digest(&mut self, encoded: Option<String>) {
        self.digest = encoded
            .filter(|e| !e.trim().is_empty())
            .map(Digest::new);
        self.plaintext = None;
        self.confirmation = None;
    }

    /// Returns the transient plaintext from the last assignment.
    pub fn plaintext(&self) -> Option<&Secret<String>> {
        self.plaintext.as_ref()
    }

    /// Assigns a new password.
    ///
    /// - `None` clears the digest: the record has no password.
    /// - `Some("")` changes nothing. This is how an edit form that leaves the
    ///   password box empty keeps the current password.
    /// - Any other value is kept as transient plaintext and hashed
    ///   immediately, replacing the digest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Hashing`] if a digest cannot be computed. The field
    /// is left as it was.
    pub fn set_plaintext(&mut self, value: Option<&str>) -> Result<(), Error> {
        match value {
            None => {
                tracing::debug!(attribute = %self.attribute, "credential cleared");
                self.plaintext = None;
                self.digest = None;
            }
            Some("") => {}
            Some(plaintext) => {
                let digest = self.policy.hash(plaintext)?;
                tracing::debug!(
                    attribute = %self.attribute,
                    cost = ?self.policy.cost(),
                    "credential digest updated"
                );
                self.plaintext = Some(Secret::new(plaintext.to_string()));
                self.digest = Some(digest);
            }
        }
        Ok(())
    }

    /// Stores the confirmation value. The digest is not touched.
    pub fn set_confirmation(&mut self, value: Option<&str>) {
        self.confirmation = value.map(|v| Secret::new(v.to_string()));
    }

    /// Checks the field and returns any field-attributed errors.
    ///
    /// - [`Blank`](ValidationErrorKind::Blank) when there is no digest.
    /// - [`ConfirmationMismatch`](ValidationErrorKind::ConfirmationMismatch),
    ///   reported on `<attribute>_confirmation`, when a password was
    ///   assigned in this cycle and a supplied confirmation differs from it.
    ///
    /// Without a newly assigned password there is nothing to confirm, so an
    /// edit form that leaves the password empty validates whatever the
    /// confirmation box holds. A blank confirmation (`None`, empty, or
    /// whitespace) is treated as "not supplied" and skips the mismatch check.
    /// This is intentional: confirmation is a typing aid, not an
    /// authentication boundary, and forms without a confirmation box must
    /// still validate.
    ///
    /// Returns no errors at all when validations are disabled.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if !self.validations {
            return errors;
        }

        if self.digest.is_none() {
            errors.add(self.attribute.as_str(), ValidationErrorKind::Blank);
        }

        if let (Some(plaintext), Some(confirmation)) = (&self.plaintext, &self.confirmation) {
            let confirmation = confirmation.expose_secret();
            if !confirmation.trim().is_empty() && plaintext.expose_secret() != confirmation {
                errors.add(
                    self.confirmation_attribute(),
                    ValidationErrorKind::ConfirmationMismatch,
                );
            }
        }

        errors
    }

    /// Checks `candidate` against the stored digest.
    ///
    /// Returns `Ok(false)` for a wrong password and when there is no digest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptDigest`] if the stored digest is malformed.
    pub fn verify(&self, candidate: &str) -> Result<bool, Error> {
        match &self.digest {
            Some(digest) => self.policy.verify(&self.attribute, digest, candidate),
            None => Ok(false),
        }
    }

    /// Returns `Some(owner)` if `candidate` matches, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptDigest`] if the stored digest is malformed.
    pub fn authenticate<'r, R: ?Sized>(
        &self,
        owner: &'r R,
        candidate: &str,
    ) -> Result<Option<&'r R>, Error> {
        Ok(self.verify(candidate)?.then_some(owner))
    }

    /// Returns `true` if the stored digest was made with a different cost
    /// than the field's policy. Hosts can rehash after a successful login.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptDigest`] if the stored digest is malformed.
    pub fn needs_rehash(&self) -> Result<bool, Error> {
        match &self.digest {
            Some(digest) => self.policy.needs_rehash(&self.attribute, digest),
            None => Ok(false),
        }
    }

    /// Ends the assignment cycle after the owning record was saved.
    ///
    /// Drops plaintext and confirmation; the digest stays.
    pub fn persisted(&mut self) {
        self.plaintext = None;
        self.confirmation = None;
    }
}

impl fmt::Debug for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialField")
            .field("attribute", &self.attribute)
            .field("validations", &self.validations)
            .field("plaintext", &self.plaintext)
            .field("confirmation", &self.confirmation)
            .field("digest", &self.digest)
            .finish()
    }
}
