use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{apply, double_option};

/// Pre-billing draft: the status every generated invoice starts in.
pub const STATUS_PRE: &str = "PRE";

/// One billing period of one transaction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvoiceRow {
    pub id: i32,
    /// Last calendar day of the billing month.
    pub inv_date: NaiveDate,
    pub candidate_id: Option<i32>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub txn_id: i32,
    pub hours_worked: f64,
    pub inv_value: f64,
    pub inv_status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewInvoice {
    pub inv_date: NaiveDate,
    pub candidate_id: Option<i32>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub txn_id: i32,
    pub hours_worked: f64,
    pub inv_value: f64,
    #[serde(default = "default_status")]
    pub inv_status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoicePatch {
    pub inv_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub candidate_id: Option<Option<i32>>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub txn_id: Option<i32>,
    pub hours_worked: Option<f64>,
    pub inv_value: Option<f64>,
    pub inv_status: Option<String>,
}

pub(crate) fn default_status() -> String {
    STATUS_PRE.to_string()
}

impl InvoiceRow {
    pub fn merged(mut self, patch: InvoicePatch) -> Self {
        apply(&mut self.inv_date, patch.inv_date);
        apply(&mut self.candidate_id, patch.candidate_id);
        apply(&mut self.period_start, patch.period_start);
        apply(&mut self.period_end, patch.period_end);
        apply(&mut self.txn_id, patch.txn_id);
        apply(&mut self.hours_worked, patch.hours_worked);
        apply(&mut self.inv_value, patch.inv_value);
        apply(&mut self.inv_status, patch.inv_status);
        self
    }
}
