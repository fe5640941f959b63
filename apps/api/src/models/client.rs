use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{apply, double_option};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientRow {
    pub id: i32,
    pub name: String,
    /// Name of the hiring manager / billing contact at the client.
    pub client_mgr: Option<String>,
    pub client_email: Option<String>,
    pub client_addr: Option<String>,
    pub client_phone: Option<String>,
    pub payment_freq: Option<String>,
    pub client_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub client_mgr: Option<String>,
    pub client_email: Option<String>,
    pub client_addr: Option<String>,
    pub client_phone: Option<String>,
    pub payment_freq: Option<String>,
    pub client_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub client_mgr: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub client_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub client_addr: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub client_phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub payment_freq: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub client_type: Option<Option<String>>,
}

impl ClientRow {
    pub fn merged(mut self, patch: ClientPatch) -> Self {
        apply(&mut self.name, patch.name);
        apply(&mut self.client_mgr, patch.client_mgr);
        apply(&mut self.client_email, patch.client_email);
        apply(&mut self.client_addr, patch.client_addr);
        apply(&mut self.client_phone, patch.client_phone);
        apply(&mut self.payment_freq, patch.payment_freq);
        apply(&mut self.client_type, patch.client_type);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> ClientRow {
        ClientRow {
            id: 7,
            name: "Acme".to_string(),
            client_mgr: Some("Wile".to_string()),
            client_email: Some("ap@acme.test".to_string()),
            client_addr: None,
            client_phone: None,
            payment_freq: Some("monthly".to_string()),
            client_type: None,
        }
    }

    #[test]
    fn test_merge_touches_only_supplied_fields() {
        let patch: ClientPatch =
            serde_json::from_str(r#"{"client_phone": "555-0100", "client_email": null}"#).unwrap();
        let merged = acme().merged(patch);
        assert_eq!(merged.name, "Acme");
        assert_eq!(merged.client_mgr.as_deref(), Some("Wile"));
        assert_eq!(merged.client_phone.as_deref(), Some("555-0100"));
        assert_eq!(merged.client_email, None);
        assert_eq!(merged.payment_freq.as_deref(), Some("monthly"));
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let merged = acme().merged(ClientPatch::default());
        assert_eq!(merged.id, 7);
        assert_eq!(merged.client_email.as_deref(), Some("ap@acme.test"));
    }
}
