//! Property tests for credential and redaction invariants.
//!
//! Hashing runs at minimum cost, but each case still performs real Argon2id
//! work, so case counts are kept small.

use proptest::prelude::*;
use secure_fields::{
    redact_for_serialization, Bind, BoundParameter, CredentialField, HashingPolicy, Redactor,
    ValidationErrorKind,
};
use serde_json::{Map, Value};

fn field() -> CredentialField {
    CredentialField::new("password", HashingPolicy::minimum().unwrap())
}

// Strategy: non-empty printable passwords
fn arb_password() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ -~]{1,32}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Property: a set password verifies, any other candidate does not
    #[test]
    fn proptest_set_then_authenticate(
        password in arb_password(),
        other in arb_password(),
    ) {
        let mut f = field();
        f.set_plaintext(Some(&password)).unwrap();

        prop_assert!(f.verify(&password).unwrap());
        if other != password {
            prop_assert!(!f.verify(&other).unwrap());
        }
    }

    /// Property: the empty string never changes an existing digest
    #[test]
    fn proptest_empty_is_noop(password in arb_password()) {
        let mut f = field();
        f.set_plaintext(Some(&password)).unwrap();
        let before = f.digest().cloned();

        f.set_plaintext(Some("")).unwrap();

        prop_assert_eq!(f.digest().cloned(), before);
    }

    /// Property: the digest is self-contained and survives a storage round trip
    #[test]
    fn proptest_digest_reload(password in arb_password()) {
        let mut f = field();
        f.set_plaintext(Some(&password)).unwrap();
        let stored = f.digest().unwrap().expose_digest().to_string();

        let mut reloaded = field();
        reloaded.load_digest(Some(stored));
        prop_assert!(reloaded.verify(&password).unwrap());
    }

    /// Property: a non-blank confirmation mismatches exactly when it differs
    #[test]
    fn proptest_confirmation(
        password in arb_password(),
        confirmation in prop::string::string_regex("[a-z]{1,8}").unwrap(),
    ) {
        let mut f = field();
        f.set_plaintext(Some(&password)).unwrap();
        f.set_confirmation(Some(&confirmation));

        let mismatch = f
            .validate()
            .contains("password_confirmation", ValidationErrorKind::ConfirmationMismatch);
        prop_assert_eq!(mismatch, confirmation != password);
    }

    /// Property: Debug output never contains plaintext or digest
    #[test]
    fn proptest_debug_never_leaks(password in "[A-Za-z0-9]{8,24}") {
        let mut f = field();
        f.set_plaintext(Some(&password)).unwrap();
        f.set_confirmation(Some(&password));
        let digest = f.digest().unwrap().expose_digest().to_string();

        let output = format!("{:?}", f);
        prop_assert!(!output.contains(&password));
        prop_assert!(!output.contains(&digest));
    }
}

proptest! {
    /// Property: excluded keys are absent, all others are kept verbatim
    #[test]
    fn proptest_serialization_redaction(
        fields in prop::collection::btree_map("[a-z_]{1,12}", "[a-z0-9]{0,12}", 0..8),
        except in prop::collection::btree_set("[a-z_]{1,12}", 0..4),
    ) {
        let map: Map<String, Value> = fields
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        let redacted = redact_for_serialization(&map, &except);

        for key in &except {
            prop_assert!(!redacted.contains_key(key));
        }
        for (key, value) in &map {
            if !except.contains(key) {
                prop_assert_eq!(redacted.get(key), Some(value));
            }
        }
    }

    /// Property: a sensitive bind is always filtered, whatever its value
    #[test]
    fn proptest_sensitive_bind_filtered(value in ".*") {
        let bind: Bind = BoundParameter::text("password_digest", value).into();
        prop_assert_eq!(Redactor::default().redact_for_logging(&bind).value, "[FILTERED]");
    }

    /// Property: binary binds show only their size
    #[test]
    fn proptest_binary_bind_size(
        name in "[a-z]{1,10}",
        bytes in prop::collection::vec(any::<u8>(), 1..256),
    ) {
        prop_assume!(name != "password_digest");
        let len = bytes.len();
        let bind: Bind = BoundParameter::binary(name, bytes).into();

        prop_assert_eq!(
            Redactor::default().redact_for_logging(&bind).value,
            format!("<{} bytes of binary data>", len)
        );
    }
}
