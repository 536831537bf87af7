use std::fmt;

use crate::redact::FILTERED;

/// A wrapper that keeps transient plaintext out of formatted output.
///
/// `Secret<T>` holds values such as a freshly assigned password or its
/// confirmation for the short window between assignment and persistence.
/// The wrapped value can only be reached through the explicit
/// [`expose_secret`](Self::expose_secret) method.
///
/// # Security Properties
///
/// - Does NOT implement `Deref`, `AsRef`, `Borrow`, `Clone`, or `Copy`
/// - Debug and Display output is always `[FILTERED]`
/// - No type information is leaked in formatted output
///
/// # Examples
///
/// ```
/// use secure_fields::Secret;
///
/// let password = Secret::new("mUc3m00RsqyRe".to_string());
///
/// assert_eq!(format!("{:?}", password), "[FILTERED]");
/// assert_eq!(format!("{}", password), "[FILTERED]");
/// assert_eq!(password.expose_secret(), "mUc3m00RsqyRe");
/// ```
// BREAKING CHANGE WARNING: Do NOT add Clone, Copy, or Default derives.
// These would let plaintext be duplicated outside the owning field.
pub struct Secret<T> {
    // BREAKING CHANGE WARNING: This field MUST remain private (CWE-532).
    inner: T,
}

impl<T> Secret<T> {
    /// Wraps a sensitive value in a `Secret`.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Explicitly exposes the secret value.
    ///
    /// # Security Warning
    ///
    /// The name is deliberately loud. Never pass the result to a logger or
    /// a serializer.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

// BREAKING CHANGE WARNING: Do NOT implement Deref, AsRef, Borrow, or a
// value-revealing Debug/Display. expose_secret() is the only way in.

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(FILTERED)
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(FILTERED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_filters_debug() {
        let password = Secret::new("hunter2".to_string());
        let debug_output = format!("{:?}", password);

        assert_eq!(debug_output, "[FILTERED]");
        assert!(!debug_output.contains("hunter2"));
        assert!(!debug_output.contains("String")); // No type leak
    }

    #[test]
    fn secret_filters_display() {
        let confirmation = Secret::new("hunter2");
        let display_output = format!("{}", confirmation);

        assert_eq!(display_output, "[FILTERED]");
    }

    #[test]
    fn secret_exposes_when_explicit() {
        let secret = Secret::new("42password".to_string());
        assert_eq!(secret.expose_secret(), "42password");
    }

    #[test]
    fn secret_inside_option_stays_filtered() {
        let maybe = Some(Secret::new("hunter2".to_string()));
        assert_eq!(format!("{:?}", maybe), "Some([FILTERED])");
    }
}
