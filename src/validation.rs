use std::fmt;

/// The kind of validation failure on a credential field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No digest is present, so the record has no password.
    Blank,
    /// The confirmation was supplied and differs from the plaintext.
    ///
    /// Reported on the `<attribute>_confirmation` attribute.
    ConfirmationMismatch,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrorKind::Blank => write!(f, "blank"),
            ValidationErrorKind::ConfirmationMismatch => write!(f, "confirmation"),
        }
    }
}

/// A validation failure attributed to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Attribute the error is reported on
    pub attribute: String,
    /// What went wrong
    pub kind: ValidationErrorKind,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(attribute: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            attribute: attribute.into(),
            kind,
        }
    }

    /// Returns an end-user message such as `"Password can't be blank"`.
    pub fn full_message(&self) -> String {
        let label = humanize(&self.attribute);
        match self.kind {
            ValidationErrorKind::Blank => format!("{} can't be blank", label),
            ValidationErrorKind::ConfirmationMismatch => {
                let confirmed = self
                    .attribute
                    .strip_suffix("_confirmation")
                    .unwrap_or(&self.attribute);
                format!("{} doesn't match {}", label, humanize(confirmed))
            }
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_message())
    }
}

/// Field-attributed validation errors, returned as data rather than raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error on `attribute`.
    pub fn add(&mut self, attribute: impl Into<String>, kind: ValidationErrorKind) {
        self.errors.push(FieldError::new(attribute, kind));
    }

    /// Appends every error from `other`.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Returns `true` if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if `attribute` has an error of the given kind.
    pub fn contains(&self, attribute: &str, kind: ValidationErrorKind) -> bool {
        self.errors
            .iter()
            .any(|e| e.attribute == attribute && e.kind == kind)
    }

    /// Iterates over the errors reported on `attribute`.
    pub fn on<'a>(&'a self, attribute: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.attribute == attribute)
    }

    /// Iterates over all errors in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Returns every error as an end-user message.
    pub fn full_messages(&self) -> Vec<String> {
        self.errors.iter().map(FieldError::full_message).collect()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

fn humanize(attribute: &str) -> String {
    let spaced = attribute.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
