//! Document Renderer: fills a named text template with display-ready values.
//!
//! Substitution is plain literal replacement of every occurrence of every
//! token. Token sets are disjoint, so application order does not matter. A
//! token present in the template but missing from the mapping is left as-is;
//! no error is raised for it.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::documents::content::{DocumentSink, TemplateSource};
use crate::documents::naming::{invoice_filename, work_order_filename};
use crate::errors::AppError;
use crate::models::candidate::CandidateRow;
use crate::models::client::ClientRow;
use crate::models::client_invoice::NewClientInvoice;
use crate::models::transaction::TransactionRow;

pub const INVOICE_TEMPLATE: &str = "invoice_template.html";
pub const WORK_ORDER_TEMPLATE: &str = "work_order_template.html";

/// Ordered token → replacement mapping. Values are final display strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placeholders(Vec<(&'static str, String)>);

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, token: &'static str, value: impl Into<String>) -> Self {
        self.0.push((token, value.into()));
        self
    }
}

/// Replaces every occurrence of every token in `template`.
pub fn fill_template(template: &str, fields: &Placeholders) -> String {
    fields
        .0
        .iter()
        .fold(template.to_string(), |doc, (token, value)| doc.replace(token, value))
}

/// Formats an amount as `$X,XXX.XX`. Negative amounts render as `-$X.XX`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{frac:02}")
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Mapping for a client invoice document.
pub fn invoice_fields(
    inv_id: i32,
    invoice: &NewClientInvoice,
    invoice_title: &str,
    brand_logo: &str,
) -> Placeholders {
    Placeholders::new()
        .set("total_due", format_currency(invoice.inv_value))
        .set("due_date", format_date(invoice.due_date))
        .set("invoice_title", invoice_title)
        .set("invoice_num", inv_id.to_string())
        .set("invoice_date", format_date(invoice.inv_date))
        .set("client_name", invoice.client_name.as_str())
        .set("invoice_table", invoice.explain_str.as_str())
        .set("brand_logo", brand_logo)
}

/// Mapping for a work-order document.
pub fn work_order_fields(
    txn: &TransactionRow,
    client: &ClientRow,
    candidate: &CandidateRow,
    brand_logo: &str,
) -> Placeholders {
    let date_or = |d: Option<NaiveDate>, missing: &str| {
        d.map(format_date).unwrap_or_else(|| missing.to_string())
    };
    Placeholders::new()
        .set("client_name", client.name.as_str())
        .set("txn_date", date_or(txn.txn_date, ""))
        .set("candidate_name", candidate.name.as_str())
        .set("start_date", date_or(txn.start_date, ""))
        .set("end_date", date_or(txn.end_date, "Ongoing"))
        .set(
            "client_price",
            txn.client_price.map(format_currency).unwrap_or_default(),
        )
        .set("client_contact", client.client_mgr.clone().unwrap_or_default())
        .set("brand_logo", brand_logo)
}

/// A rendered document and the name its audit copy was written under.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedDocument {
    pub filename: String,
    pub html: String,
}

/// Renders templates from a `TemplateSource` and writes an audit copy of every
/// output to a `DocumentSink`.
#[derive(Clone)]
pub struct DocumentRenderer {
    templates: Arc<dyn TemplateSource>,
    sink: Arc<dyn DocumentSink>,
    brand_logo: String,
    invoice_title: String,
}

impl DocumentRenderer {
    pub fn new(
        templates: Arc<dyn TemplateSource>,
        sink: Arc<dyn DocumentSink>,
        brand_logo: String,
        invoice_title: String,
    ) -> Self {
        Self {
            templates,
            sink,
            brand_logo,
            invoice_title,
        }
    }

    /// Fills `template_name` with `fields` and stores the result as `filename`.
    pub async fn render(
        &self,
        template_name: &str,
        filename: String,
        fields: &Placeholders,
    ) -> Result<RenderedDocument, AppError> {
        let template = self.templates.read_template(template_name).await?;
        let html = fill_template(&template, fields);
        self.sink.write_document(&filename, &html).await?;
        info!("Rendered {template_name} to {filename}");
        Ok(RenderedDocument { filename, html })
    }

    pub async fn render_invoice(
        &self,
        inv_id: i32,
        invoice: &NewClientInvoice,
    ) -> Result<RenderedDocument, AppError> {
        let fields = invoice_fields(inv_id, invoice, &self.invoice_title, &self.brand_logo);
        let filename = invoice_filename(&invoice.client_name, inv_id);
        self.render(INVOICE_TEMPLATE, filename, &fields).await
    }

    pub async fn render_work_order(
        &self,
        txn: &TransactionRow,
        client: &ClientRow,
        candidate: &CandidateRow,
    ) -> Result<RenderedDocument, AppError> {
        let fields = work_order_fields(txn, client, candidate, &self.brand_logo);
        let filename = work_order_filename(&client.name, &candidate.name, txn.txn_date);
        self.render(WORK_ORDER_TEMPLATE, filename, &fields).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tokens every invoice template is expected to contain.
    const INVOICE_TOKENS: [&str; 8] = [
        "total_due",
        "due_date",
        "invoice_title",
        "invoice_num",
        "invoice_date",
        "client_name",
        "invoice_table",
        "brand_logo",
    ];

    /// Tokens every work-order template is expected to contain.
    const WORK_ORDER_TOKENS: [&str; 8] = [
        "client_name",
        "txn_date",
        "candidate_name",
        "start_date",
        "end_date",
        "client_price",
        "client_contact",
        "brand_logo",
    ];

    impl Placeholders {
        fn get(&self, token: &str) -> Option<&str> {
            self.0
                .iter()
                .find(|(t, _)| *t == token)
                .map(|(_, v)| v.as_str())
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn april_invoice() -> NewClientInvoice {
        NewClientInvoice {
            inv_date: d(2024, 4, 30),
            due_date: d(2024, 5, 30),
            period_start: Some(d(2024, 4, 1)),
            period_end: Some(d(2024, 4, 30)),
            client_id: 7,
            client_name: "Acme".to_string(),
            client_contact: Some("Wile".to_string()),
            client_email: None,
            client_addr: None,
            client_phone: None,
            explain_str: "<table><tr><td>Ada — 160h</td></tr></table>".to_string(),
            inv_value: 1234.56,
            inv_status: "PRE".to_string(),
        }
    }

    #[test]
    fn test_total_due_is_substituted() {
        let fields = Placeholders::new().set("total_due", format_currency(1234.56));
        let out = fill_template("<p>Total: total_due</p>", &fields);
        assert!(out.contains("$1,234.56"));
        assert!(!out.contains("total_due"));
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let fields = Placeholders::new().set("client_name", "Acme");
        let out = fill_template("client_name / client_name", &fields);
        assert_eq!(out, "Acme / Acme");
    }

    #[test]
    fn test_unknown_token_is_left_literal() {
        let fields = Placeholders::new().set("client_name", "Acme");
        let out = fill_template("client_name owes total_due", &fields);
        assert_eq!(out, "Acme owes total_due");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let template = "invoice_num for client_name due due_date: total_due";
        let fields = invoice_fields(41, &april_invoice(), "Technology Services", "logo.jpg");
        assert_eq!(fill_template(template, &fields), fill_template(template, &fields));
    }

    #[test]
    fn test_invoice_fields_cover_every_invoice_token() {
        let fields = invoice_fields(41, &april_invoice(), "Technology Services", "logo.jpg");
        for token in INVOICE_TOKENS {
            assert!(fields.get(token).is_some(), "missing {token}");
        }
        assert_eq!(fields.get("invoice_num"), Some("41"));
        assert_eq!(fields.get("invoice_date"), Some("2024-04-30"));
        assert_eq!(fields.get("due_date"), Some("2024-05-30"));
        assert_eq!(fields.get("total_due"), Some("$1,234.56"));
    }

    #[test]
    fn test_invoice_tokens_are_disjoint() {
        for a in INVOICE_TOKENS {
            for b in INVOICE_TOKENS {
                if a != b {
                    assert!(!a.contains(b), "{a} contains {b}");
                }
            }
        }
        for a in WORK_ORDER_TOKENS {
            for b in WORK_ORDER_TOKENS {
                if a != b {
                    assert!(!a.contains(b), "{a} contains {b}");
                }
            }
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(8000.0), "$8,000.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(50.5), "$50.50");
        assert_eq!(format_currency(-1234.5), "-$1,234.50");
    }

    #[test]
    fn test_work_order_fields_for_ongoing_engagement() {
        let txn = TransactionRow {
            id: 1,
            txn_date: Some(d(2023, 12, 15)),
            candidate_id: Some(3),
            client_id: Some(7),
            recruiter_id: None,
            referral_id: None,
            client_price: Some(95.0),
            referral_price: None,
            recruiter_price: None,
            start_date: Some(d(2024, 1, 2)),
            end_date: None,
            num_payments_received: 0,
            total_client_recv: 0.0,
            total_recruiter_paid: 0.0,
            total_referral_paid: 0.0,
            last_payment_date: None,
        };
        let client = ClientRow {
            id: 7,
            name: "Acme".to_string(),
            client_mgr: Some("Wile".to_string()),
            client_email: None,
            client_addr: None,
            client_phone: None,
            payment_freq: None,
            client_type: None,
        };
        let candidate = CandidateRow {
            id: 3,
            name: "Ada".to_string(),
            role: None,
            location: None,
            candidate_cost: None,
            phone: None,
            email: None,
            feedback: None,
            cv_link: None,
            status: Some("Hired".to_string()),
            client_id: Some(7),
        };
        let fields = work_order_fields(&txn, &client, &candidate, "logo.jpg");
        for token in WORK_ORDER_TOKENS {
            assert!(fields.get(token).is_some(), "missing {token}");
        }
        assert_eq!(fields.get("end_date"), Some("Ongoing"));
        assert_eq!(fields.get("client_price"), Some("$95.00"));
        assert_eq!(fields.get("client_contact"), Some("Wile"));
    }
}
