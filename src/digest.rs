use std::fmt;

use crate::redact::FILTERED;

/// The persisted one-way representation of a credential.
///
/// A `Digest` is an Argon2id PHC string (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`).
/// It carries its own algorithm parameters and salt, so it can be stored in a
/// single string column and verified later without any other state.
///
/// Like [`Secret`](crate::Secret), it never prints its contents.
///
/// # Examples
///
/// ```
/// use secure_fields::Digest;
///
/// let digest = Digest::new("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA".to_string());
/// assert_eq!(format!("{:?}", digest), "Digest([FILTERED])");
/// assert_eq!(digest.to_string(), "[FILTERED]");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Digest {
    encoded: String,
}

impl Digest {
    /// Wraps an encoded digest, typically one read back from storage.
    ///
    /// No parsing happens here; a malformed value is reported when it is
    /// first verified.
    pub fn new(encoded: String) -> Self {
        Self { encoded }
    }

    /// Returns the encoded digest for writing to storage.
    pub fn expose_digest(&self) -> &str {
        &self.encoded
    }

    /// Consumes the digest and returns the encoded string.
    pub fn into_inner(self) -> String {
        self.encoded
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", FILTERED)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(FILTERED)
    }
}
