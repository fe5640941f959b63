use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::invoice::default_status;
use super::{apply, double_option};

/// The external-facing invoice sent to a client.
///
/// Created with the raw input only; the submission flow later writes
/// `inv_html` and `inv_hash` back onto the same row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientInvoiceRow {
    pub id: i32,
    pub inv_date: NaiveDate,
    pub due_date: NaiveDate,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub client_id: i32,
    pub client_name: String,
    pub client_contact: Option<String>,
    pub client_email: Option<String>,
    pub client_addr: Option<String>,
    pub client_phone: Option<String>,
    /// Pre-rendered line item block inserted into the document.
    pub explain_str: String,
    pub inv_html: Option<String>,
    pub inv_hash: Option<String>,
    pub inv_value: f64,
    pub inv_status: String,
}

/// Raw input of a client invoice, as submitted by billing staff.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewClientInvoice {
    pub inv_date: NaiveDate,
    pub due_date: NaiveDate,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub client_id: i32,
    pub client_name: String,
    pub client_contact: Option<String>,
    pub client_email: Option<String>,
    pub client_addr: Option<String>,
    pub client_phone: Option<String>,
    #[serde(default)]
    pub explain_str: String,
    pub inv_value: f64,
    #[serde(default = "default_status")]
    pub inv_status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientInvoicePatch {
    pub inv_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub period_start: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub period_end: Option<Option<NaiveDate>>,
    pub client_id: Option<i32>,
    pub client_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub client_contact: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub client_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub client_addr: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub client_phone: Option<Option<String>>,
    pub explain_str: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub inv_html: Option<Option<String>>,
    pub inv_value: Option<f64>,
    pub inv_status: Option<String>,
}

impl ClientInvoiceRow {
    /// Applies a staff edit. The public hash is derived and never patched;
    /// an edited `inv_html` is not re-written to the audit copy on disk.
    pub fn merged(mut self, patch: ClientInvoicePatch) -> Self {
        apply(&mut self.inv_date, patch.inv_date);
        apply(&mut self.due_date, patch.due_date);
        apply(&mut self.period_start, patch.period_start);
        apply(&mut self.period_end, patch.period_end);
        apply(&mut self.client_id, patch.client_id);
        apply(&mut self.client_name, patch.client_name);
        apply(&mut self.client_contact, patch.client_contact);
        apply(&mut self.client_email, patch.client_email);
        apply(&mut self.client_addr, patch.client_addr);
        apply(&mut self.client_phone, patch.client_phone);
        apply(&mut self.explain_str, patch.explain_str);
        apply(&mut self.inv_html, patch.inv_html);
        apply(&mut self.inv_value, patch.inv_value);
        apply(&mut self.inv_status, patch.inv_status);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created() -> ClientInvoiceRow {
        ClientInvoiceRow {
            id: 41,
            inv_date: NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 30).unwrap(),
            period_start: None,
            period_end: None,
            client_id: 7,
            client_name: "Acme".to_string(),
            client_contact: None,
            client_email: None,
            client_addr: None,
            client_phone: None,
            explain_str: String::new(),
            inv_html: None,
            inv_hash: None,
            inv_value: 8000.0,
            inv_status: "PRE".to_string(),
        }
    }

    #[test]
    fn test_cleared_html_stays_cleared() {
        let mut row = created();
        row.inv_html = Some("<html></html>".to_string());
        let patch: ClientInvoicePatch = serde_json::from_str(r#"{"inv_html": null}"#).unwrap();
        let row = row.merged(patch);
        assert_eq!(row.inv_html, None);
        assert_eq!(row.inv_value, 8000.0);
    }

    #[test]
    fn test_patch_cannot_touch_hash() {
        let mut row = created();
        row.inv_hash = Some("cd".repeat(32));
        let patch: ClientInvoicePatch =
            serde_json::from_str(r#"{"inv_status": "PAID", "inv_hash": "forged"}"#).unwrap();
        let row = row.merged(patch);
        assert_eq!(row.inv_status, "PAID");
        assert_eq!(row.inv_hash, Some("cd".repeat(32)));
    }
}
