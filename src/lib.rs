//! Secure password fields and sensitive-value redaction for persisted records.
//!
//! This crate provides:
//! - **Credential fields**: plaintext is hashed with salted Argon2id on
//!   assignment and only the self-describing digest is meant to be stored
//! - **Explicit cost policy**: hash cost is configuration passed in at
//!   construction, with a minimum-cost mode for tests
//! - **Redaction**: sensitive fields are removed from generic serialization
//!   and inspection, and filtered from SQL bind logging
//!
//! # Core Types
//!
//! - [`CredentialField`]: set / confirm / validate / verify one password attribute
//! - [`SecurePassword`]: record-level `authenticate` over the fields a type holds
//! - [`HashingPolicy`]: Argon2id cost configuration
//! - [`Redactor`]: applies a [`RedactionConfig`] at serialization, inspection and logging
//! - [`QueryLog`]: SQL log lines built through the [`RenderBind`] hook
//! - [`Secret<T>`] and [`Digest`]: wrappers that always print `[FILTERED]`
//!
//! # Examples
//!
//! ```
//! use secure_fields::{Bind, BoundParameter, CredentialField, HashingPolicy, Redactor};
//!
//! let mut password = CredentialField::new("password", HashingPolicy::minimum().unwrap());
//! password.set_plaintext(Some("mUc3m00RsqyRe")).unwrap();
//!
//! assert!(password.verify("mUc3m00RsqyRe").unwrap());
//! assert!(format!("{:?}", password).contains("[FILTERED]"));
//!
//! let bind: Bind = BoundParameter::text(
//!     password.digest_column(),
//!     password.digest().unwrap().expose_digest(),
//! )
//! .into();
//! assert_eq!(Redactor::default().redact_for_logging(&bind).value, "[FILTERED]");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bind;
mod credential;
mod digest;
mod error;
mod logging;
mod policy;
mod record;
mod redact;
mod secret;
mod validation;

pub use bind::{Bind, BoundParameter, ParamType, ParamValue, RenderBind, RenderedBind};
pub use credential::CredentialField;
pub use digest::Digest;
pub use error::Error;
pub use logging::QueryLog;
pub use policy::{Cost, HashingPolicy};
pub use record::{SecurePassword, DEFAULT_ATTRIBUTE};
pub use redact::{
    redact_for_serialization, Inspect, RedactionConfig, Redactor, DEFAULT_FILTERED_COLUMN,
    FILTERED,
};
pub use secret::Secret;
pub use validation::{FieldError, ValidationErrorKind, ValidationErrors};
