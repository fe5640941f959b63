//! Row, create and patch types for every table in the schema.
//!
//! Patches are sparse: a field missing from the request body leaves the column
//! untouched. Nullable columns use `Option<Option<T>>` so that an explicit
//! `null` clears the value.

use serde::{Deserialize, Deserializer};

pub mod candidate;
pub mod client;
pub mod client_invoice;
pub mod invoice;
pub mod open_role;
pub mod transaction;
pub mod user;

/// Distinguishes a missing field (`None`) from an explicit `null` (`Some(None)`).
/// Use together with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Overwrites `slot` when the patch carries a value for it.
pub(crate) fn apply<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct ContactFields {
        #[serde(default, deserialize_with = "double_option")]
        phone: Option<Option<String>>,
    }

    #[test]
    fn test_missing_field_is_none() {
        let p: ContactFields = serde_json::from_str("{}").unwrap();
        assert_eq!(p.phone, None);
    }

    #[test]
    fn test_explicit_null_is_some_none() {
        let p: ContactFields = serde_json::from_str(r#"{"phone": null}"#).unwrap();
        assert_eq!(p.phone, Some(None));
    }

    #[test]
    fn test_value_is_some_some() {
        let p: ContactFields = serde_json::from_str(r#"{"phone": "555-0100"}"#).unwrap();
        assert_eq!(p.phone, Some(Some("555-0100".to_string())));
    }

    #[test]
    fn test_apply_only_overwrites_present_values() {
        let mut slot = Some("old".to_string());
        apply(&mut slot, None);
        assert_eq!(slot.as_deref(), Some("old"));
        apply(&mut slot, Some(None));
        assert_eq!(slot, None);
    }
}
