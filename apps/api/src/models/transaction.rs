use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{apply, double_option};
use crate::errors::AppError;

/// A placement of a candidate at a client with agreed rates and a date range.
/// `end_date = None` means the engagement is ongoing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TransactionRow {
    pub id: i32,
    pub txn_date: Option<NaiveDate>,
    pub candidate_id: Option<i32>,
    pub client_id: Option<i32>,
    pub recruiter_id: Option<i32>,
    pub referral_id: Option<i32>,
    /// Billing rate charged to the client, per hour.
    pub client_price: Option<f64>,
    pub referral_price: Option<f64>,
    pub recruiter_price: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub num_payments_received: i32,
    pub total_client_recv: f64,
    pub total_recruiter_paid: f64,
    pub total_referral_paid: f64,
    pub last_payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub txn_date: Option<NaiveDate>,
    pub candidate_id: Option<i32>,
    pub client_id: Option<i32>,
    pub recruiter_id: Option<i32>,
    pub referral_id: Option<i32>,
    pub client_price: Option<f64>,
    pub referral_price: Option<f64>,
    pub recruiter_price: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub num_payments_received: i32,
    #[serde(default)]
    pub total_client_recv: f64,
    #[serde(default)]
    pub total_recruiter_paid: f64,
    #[serde(default)]
    pub total_referral_paid: f64,
    pub last_payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub txn_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub candidate_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub client_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub recruiter_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub referral_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub client_price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub referral_price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub recruiter_price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<NaiveDate>>,
    pub num_payments_received: Option<i32>,
    pub total_client_recv: Option<f64>,
    pub total_recruiter_paid: Option<f64>,
    pub total_referral_paid: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub last_payment_date: Option<Option<NaiveDate>>,
}

/// Rejects a date range whose end precedes its start.
pub fn check_date_range(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<(), AppError> {
    match (start_date, end_date) {
        (Some(start), Some(end)) if end < start => Err(AppError::Validation(format!(
            "end_date {end} precedes start_date {start}"
        ))),
        _ => Ok(()),
    }
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), AppError> {
        check_date_range(self.start_date, self.end_date)
    }
}

impl TransactionRow {
    pub fn merged(mut self, patch: TransactionPatch) -> Result<Self, AppError> {
        apply(&mut self.txn_date, patch.txn_date);
        apply(&mut self.candidate_id, patch.candidate_id);
        apply(&mut self.client_id, patch.client_id);
        apply(&mut self.recruiter_id, patch.recruiter_id);
        apply(&mut self.referral_id, patch.referral_id);
        apply(&mut self.client_price, patch.client_price);
        apply(&mut self.referral_price, patch.referral_price);
        apply(&mut self.recruiter_price, patch.recruiter_price);
        apply(&mut self.start_date, patch.start_date);
        apply(&mut self.end_date, patch.end_date);
        apply(&mut self.num_payments_received, patch.num_payments_received);
        apply(&mut self.total_client_recv, patch.total_client_recv);
        apply(&mut self.total_recruiter_paid, patch.total_recruiter_paid);
        apply(&mut self.total_referral_paid, patch.total_referral_paid);
        apply(&mut self.last_payment_date, patch.last_payment_date);
        check_date_range(self.start_date, self.end_date)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn placement() -> TransactionRow {
        TransactionRow {
            id: 1,
            txn_date: Some(d(2023, 12, 15)),
            candidate_id: Some(3),
            client_id: Some(7),
            recruiter_id: Some(2),
            referral_id: None,
            client_price: Some(50.0),
            referral_price: None,
            recruiter_price: Some(35.0),
            start_date: Some(d(2024, 1, 1)),
            end_date: Some(d(2024, 3, 31)),
            num_payments_received: 0,
            total_client_recv: 0.0,
            total_recruiter_paid: 0.0,
            total_referral_paid: 0.0,
            last_payment_date: None,
        }
    }

    #[test]
    fn test_open_ended_range_is_valid() {
        assert!(check_date_range(Some(d(2024, 1, 1)), None).is_ok());
    }

    #[test]
    fn test_same_day_range_is_valid() {
        assert!(check_date_range(Some(d(2024, 1, 1)), Some(d(2024, 1, 1))).is_ok());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = check_date_range(Some(d(2024, 2, 1)), Some(d(2024, 1, 1))).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_patch_clearing_end_date_makes_engagement_ongoing() {
        let patch: TransactionPatch = serde_json::from_str(r#"{"end_date": null}"#).unwrap();
        let merged = placement().merged(patch).unwrap();
        assert_eq!(merged.end_date, None);
        assert_eq!(merged.client_price, Some(50.0));
    }

    #[test]
    fn test_patch_producing_inverted_range_is_rejected() {
        let patch: TransactionPatch =
            serde_json::from_str(r#"{"start_date": "2024-05-01"}"#).unwrap();
        assert!(matches!(
            placement().merged(patch),
            Err(AppError::Validation(_))
        ));
    }
}
