use std::fmt;

/// Errors that can occur while hashing or verifying credentials.
///
/// A wrong password is never an `Error`; it is an ordinary `false`/`None`
/// result. Validation problems (blank password, mismatched confirmation) are
/// reported as [`ValidationErrors`](crate::ValidationErrors) values instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The hashing backend cannot run in this environment or was given
    /// unusable parameters. Hosts should treat this as a startup failure.
    Configuration(String),
    /// Computing a digest failed.
    Hashing(String),
    /// A stored digest could not be parsed or verified.
    ///
    /// This indicates storage corruption for the owning record, not a wrong
    /// guess by the user.
    CorruptDigest {
        /// The credential attribute whose digest is corrupt
        attribute: String,
        /// Why the digest was rejected
        reason: String,
    },
    /// A record was asked about a credential attribute it does not have.
    UnknownAttribute(String),
}

impl Error {
    pub(crate) fn corrupt_digest(attribute: &str, reason: impl fmt::Display) -> Self {
        Error::CorruptDigest {
            attribute: attribute.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` if the error reflects damaged stored data.
    pub fn is_corrupt_digest(&self) -> bool {
        matches!(self, Error::CorruptDigest { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(msg) => write!(f, "Hashing configuration error: {}", msg),
            Error::Hashing(msg) => write!(f, "Password hashing failed: {}", msg),
            Error::CorruptDigest { attribute, reason } => {
                write!(f, "Corrupt digest for '{}': {}", attribute, reason)
            }
            Error::UnknownAttribute(attribute) => {
                write!(f, "Unknown credential attribute '{}'", attribute)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_digest_display_names_attribute() {
        let err = Error::corrupt_digest("password", "invalid PHC string");
        assert!(err.is_corrupt_digest());
        assert_eq!(
            err.to_string(),
            "Corrupt digest for 'password': invalid PHC string"
        );
    }

    #[test]
    fn other_kinds_are_not_corruption() {
        assert!(!Error::Hashing("boom".into()).is_corrupt_digest());
        assert!(!Error::UnknownAttribute("pin".into()).is_corrupt_digest());
    }

    #[test]
    fn configuration_display() {
        let err = Error::Configuration("no entropy".into());
        assert_eq!(err.to_string(), "Hashing configuration error: no entropy");
    }
}
