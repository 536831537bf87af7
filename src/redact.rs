//! Redaction of sensitive fields at every boundary a record crosses.
//!
//! Each boundary is handled on its own:
//!
//! - generic serialization drops sensitive keys entirely
//!   ([`redact_for_serialization`], [`Redactor::serializable`])
//! - debug inspection lists only the remaining fields ([`Redactor::inspect`])
//! - SQL bind logging replaces sensitive values with the marker
//!   ([`Redactor::redact_for_logging`])

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::bind::{Bind, RenderBind, RenderedBind};

/// Marker written in place of a sensitive value.
pub const FILTERED: &str = "[FILTERED]";

/// Column filtered out of logs and serialization by default.
pub const DEFAULT_FILTERED_COLUMN: &str = "password_digest";

/// Which names are sensitive, and what replaces them.
///
/// # Examples
///
/// ```
/// use secure_fields::RedactionConfig;
///
/// let config: RedactionConfig = serde_json::from_str(
///     r#"{ "filter_parameters": ["password_digest", "recovery_password_digest"] }"#,
/// ).unwrap();
///
/// assert!(config.is_filtered("recovery_password_digest"));
/// assert_eq!(config.marker, "[FILTERED]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RedactionConfig {
    /// Field and column names treated as sensitive
    pub filter_parameters: BTreeSet<String>,
    /// Display value for filtered binds
    pub marker: String,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            filter_parameters: BTreeSet::from([DEFAULT_FILTERED_COLUMN.to_string()]),
            marker: FILTERED.to_string(),
        }
    }
}

impl RedactionConfig {
    /// Creates the default config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sensitive name.
    #[must_use]
    pub fn with_filter(mut self, name: impl Into<String>) -> Self {
        self.filter_parameters.insert(name.into());
        self
    }

    /// Sets a custom marker.
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Returns `true` if `name` is sensitive.
    pub fn is_filtered(&self, name: &str) -> bool {
        self.filter_parameters.contains(name)
    }
}

/// A record that can be turned into a generic field mapping.
pub trait Inspect {
    /// Label used in inspection output, typically the type name.
    fn type_label(&self) -> &str;

    /// All fields, including sensitive ones. Callers redact.
    fn serializable_fields(&self) -> Map<String, Value>;

    /// A richer per-field representation for inspection, if the record has
    /// one. `None` falls back to the value's JSON form.
    fn attribute_for_inspect(&self, _name: &str, _value: &Value) -> Option<String> {
        None
    }
}

/// Copies `fields` without any key listed in `except`.
///
/// Keys are removed, not blanked.
///
/// # Examples
///
/// ```
/// use secure_fields::redact_for_serialization;
/// use serde_json::json;
///
/// let fields = json!({ "name": "bob", "password_digest": "abc" });
/// let fields = fields.as_object().unwrap();
///
/// let redacted = redact_for_serialization(fields, ["password_digest"]);
/// assert_eq!(serde_json::Value::Object(redacted), json!({ "name": "bob" }));
/// ```
pub fn redact_for_serialization<I, S>(fields: &Map<String, Value>, except: I) -> Map<String, Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let except: BTreeSet<String> = except.into_iter().map(|s| s.as_ref().to_string()).collect();
    fields
        .iter()
        .filter(|(key, _)| !except.contains(key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Applies a [`RedactionConfig`] at the serialization, inspection and
/// logging boundaries.
#[derive(Debug, Clone, Default)]
pub struct Redactor {
    config: RedactionConfig,
}

impl Redactor {
    /// Creates a redactor from `config`.
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    /// Returns the active config.
    pub fn config(&self) -> &RedactionConfig {
        &self.config
    }

    /// Returns the record's fields without the sensitive ones.
    pub fn serializable<R: Inspect + ?Sized>(&self, record: &R) -> Map<String, Value> {
        redact_for_serialization(&record.serializable_fields(), &self.config.filter_parameters)
    }

    /// Builds a one-line description such as `#<User name: "bob", id: 1>`.
    ///
    /// Sensitive fields are removed before formatting, so they never appear.
    pub fn inspect<R: Inspect + ?Sized>(&self, record: &R) -> String {
        let inspection: Vec<String> = self
            .serializable(record)
            .iter()
            .map(|(name, value)| {
                let shown = record
                    .attribute_for_inspect(name, value)
                    .unwrap_or_else(|| value.to_string());
                format!("{}: {}", name, shown)
            })
            .collect();

        if inspection.is_empty() {
            format!("#<{}>", record.type_label())
        } else {
            format!("#<{} {}>", record.type_label(), inspection.join(", "))
        }
    }

    /// Renders one bind for a SQL log line.
    ///
    /// List wrappers are unwrapped to their first element. Two rules then
    /// apply, each on its own:
    ///
    /// - a binary-typed parameter with a value shows its size,
    ///   `<48 bytes of binary data>`
    /// - a parameter whose name is sensitive shows the marker
    ///
    /// A sensitive binary parameter therefore shows the marker.
    pub fn redact_for_logging(&self, bind: &Bind) -> RenderedBind {
        let Some(param) = bind.primary() else {
            return RenderedBind {
                name: None,
                value: "NULL".to_string(),
            };
        };

        let mut value = param.value.to_string();

        if param.param_type.is_binary() && !param.value.is_null() {
            value = format!("<{} bytes of binary data>", param.value.byte_len());
        }

        if self.config.is_filtered(&param.name) {
            value = self.config.marker.clone();
        }

        RenderedBind {
            name: Some(param.name.clone()),
            value,
        }
    }
}

impl RenderBind for Redactor {
    fn render_bind(&self, bind: &Bind) -> RenderedBind {
        self.redact_for_logging(bind)
    }
}
