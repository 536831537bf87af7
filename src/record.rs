use crate::credential::CredentialField;
use crate::error::Error;
use crate::validation::ValidationErrors;

/// Attribute authenticated by [`SecurePassword::authenticate`].
pub const DEFAULT_ATTRIBUTE: &str = "password";

/// Record-level access to the [`CredentialField`]s a type holds.
///
/// Implementors hold their fields as ordinary members and map attribute
/// names to them; `authenticate` and friends come for free.
///
/// # Examples
///
/// ```
/// use secure_fields::{CredentialField, HashingPolicy, SecurePassword};
///
/// struct User {
///     name: String,
///     password: CredentialField,
///     recovery_password: CredentialField,
/// }
///
/// impl SecurePassword for User {
///     fn credential(&self, attribute: &str) -> Option<&CredentialField> {
///         match attribute {
///             "password" => Some(&self.password),
///             "recovery_password" => Some(&self.recovery_password),
///             _ => None,
///         }
///     }
///
///     fn credentials(&self) -> Vec<&CredentialField> {
///         vec![&self.password, &self.recovery_password]
///     }
/// }
///
/// let policy = HashingPolicy::minimum().unwrap();
/// let mut user = User {
///     name: "david".to_string(),
///     password: CredentialField::new("password", policy.clone()),
///     recovery_password: CredentialField::new("recovery_password", policy)
///         .without_validations(),
/// };
///
/// user.password.set_plaintext(Some("mUc3m00RsqyRe")).unwrap();
/// user.recovery_password.set_plaintext(Some("42password")).unwrap();
///
/// assert!(user.authenticate("notright").unwrap().is_none());
/// assert!(user.authenticate("mUc3m00RsqyRe").unwrap().is_some());
/// assert!(user
///     .authenticate_attribute("recovery_password", "42password")
///     .unwrap()
///     .is_some());
/// ```
pub trait SecurePassword {
    /// Returns the field stored under `attribute`.
    fn credential(&self, attribute: &str) -> Option<&CredentialField>;

    /// Returns every credential field on the record.
    fn credentials(&self) -> Vec<&CredentialField>;

    /// Authenticates against the `password` attribute.
    ///
    /// # Errors
    ///
    /// See [`authenticate_attribute`](Self::authenticate_attribute).
    fn authenticate(&self, candidate: &str) -> Result<Option<&Self>, Error> {
        self.authenticate_attribute(DEFAULT_ATTRIBUTE, candidate)
    }

    /// Returns `Some(self)` if `candidate` matches the digest stored under
    /// `attribute`, `None` if it does not.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAttribute`] if the record has no such field,
    /// and [`Error::CorruptDigest`] if the stored digest is malformed.
    fn authenticate_attribute(&self, attribute: &str, candidate: &str) -> Result<Option<&Self>, Error> {
        let field = self
            .credential(attribute)
            .ok_or_else(|| Error::UnknownAttribute(attribute.to_string()))?;

        let outcome = field.authenticate(self, candidate)?;
        if outcome.is_none() {
            tracing::debug!(attribute, "authentication rejected");
        }
        Ok(outcome)
    }

    /// Validates every credential field and merges the results.
    fn validate_credentials(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for field in self.credentials() {
            errors.merge(field.validate());
        }
        errors
    }
}
