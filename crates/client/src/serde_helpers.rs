//! Serde helpers for credential fields in service responses.
//!
//! Responsibilities:
//! - Deserialize credential strings straight into `SecretString` so they never
//!   exist as plain `String` fields on model types.
//!
//! Explicitly does NOT handle:
//! - Masking on output (the provider schema and CLI renderer own that).
//!
//! Invariants / assumptions:
//! - JSON `null` and a missing key both map to `None`.

use secrecy::SecretString;
use serde::Deserialize;

pub fn opt_secret_string<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|s| SecretString::new(s.into())))
}

pub fn secret_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(SecretString::new(value.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "opt_secret_string")]
        key: Option<SecretString>,
    }

    #[test]
    fn test_opt_secret_string_present() {
        let holder: Holder = serde_json::from_str(r#"{"key": "s3cr3t"}"#).unwrap();
        assert_eq!(holder.key.unwrap().expose_secret(), "s3cr3t");
    }

    #[test]
    fn test_opt_secret_string_null_and_missing() {
        let holder: Holder = serde_json::from_str(r#"{"key": null}"#).unwrap();
        assert!(holder.key.is_none());

        let holder: Holder = serde_json::from_str("{}").unwrap();
        assert!(holder.key.is_none());
    }

    #[test]
    fn test_opt_secret_string_rejects_non_string() {
        assert!(serde_json::from_str::<Holder>(r#"{"key": 12345}"#).is_err());
    }
}
