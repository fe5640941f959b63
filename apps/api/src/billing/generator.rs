//! Invoice Record Generator: one `PRE` invoice per billing period.
//!
//! Not idempotent: running it twice for the same transaction writes every
//! period twice. Callers invoke it once per transaction.

use tracing::info;

use crate::billing::periods::{billing_periods_for, BillingPeriod};
use crate::billing::store::BillingStore;
use crate::errors::AppError;
use crate::models::invoice::{NewInvoice, STATUS_PRE};
use crate::models::transaction::TransactionRow;

/// Hours billed per period when no override is supplied.
pub const STANDARD_HOURS: f64 = 160.0;

/// Builds the invoice rows for `periods` without persisting them.
pub fn plan_invoices(
    txn: &TransactionRow,
    periods: &[BillingPeriod],
    hours_override: Option<f64>,
) -> Result<Vec<NewInvoice>, AppError> {
    let rate = txn.client_price.ok_or_else(|| {
        AppError::Validation(format!("Transaction {} has no client_price", txn.id))
    })?;
    let hours_worked = hours_override.unwrap_or(STANDARD_HOURS);
    if !hours_worked.is_finite() || hours_worked < 0.0 {
        return Err(AppError::Validation(format!(
            "hours_worked must be a non-negative number, got {hours_worked}"
        )));
    }

    Ok(periods
        .iter()
        .map(|period| NewInvoice {
            inv_date: period.end,
            candidate_id: txn.candidate_id,
            period_start: period.start,
            period_end: period.end,
            txn_id: txn.id,
            hours_worked,
            inv_value: hours_worked * rate,
            inv_status: STATUS_PRE.to_string(),
        })
        .collect())
}

/// Computes the schedule for `txn_id` and persists one invoice per period.
/// Returns the number of rows written.
pub async fn generate_invoices(
    store: &dyn BillingStore,
    txn_id: i32,
    hours_override: Option<f64>,
) -> Result<u64, AppError> {
    let txn = store
        .find_transaction(txn_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Transaction {txn_id} not found")))?;

    let periods = billing_periods_for(&txn)?;
    let invoices = plan_invoices(&txn, &periods, hours_override)?;

    let mut written = 0u64;
    for invoice in &invoices {
        store.insert_invoice(invoice).await?;
        written += 1;
    }

    info!("Generated {written} invoices for transaction {txn_id}");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::billing::store::memory::MemoryBillingStore;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn quarter_placement() -> TransactionRow {
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

    fn store_with(txn: TransactionRow) -> MemoryBillingStore {
        let store = MemoryBillingStore::default();
        store.transactions.lock().unwrap().push(txn);
        store
    }

    #[tokio::test]
    async fn test_quarter_writes_three_standard_invoices() {
        let store = store_with(quarter_placement());

        let written = generate_invoices(&store, 1, None).await.unwrap();
        assert_eq!(written, 3);

        let rows = store.invoices.lock().unwrap();
        assert_eq!(rows.len(), 3);
        for row in rows.iter() {
            assert_eq!(row.hours_worked, 160.0);
            assert_eq!(row.inv_value, 8000.0);
            assert_eq!(row.inv_status, "PRE");
            assert_eq!(row.txn_id, 1);
            assert_eq!(row.candidate_id, Some(3));
            assert_eq!(row.inv_date, row.period_end);
        }
        let dates: Vec<_> = rows.iter().map(|r| r.inv_date).collect();
        assert_eq!(dates, vec![d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 31)]);
    }

    #[tokio::test]
    async fn test_hours_override_changes_value() {
        let store = store_with(quarter_placement());
        generate_invoices(&store, 1, Some(120.0)).await.unwrap();
        let rows = store.invoices.lock().unwrap();
        assert!(rows.iter().all(|r| r.hours_worked == 120.0 && r.inv_value == 6000.0));
    }

    #[tokio::test]
    async fn test_second_run_duplicates_periods() {
        let store = store_with(quarter_placement());
        generate_invoices(&store, 1, None).await.unwrap();
        generate_invoices(&store, 1, None).await.unwrap();
        assert_eq!(store.invoices.lock().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_unknown_transaction_is_not_found() {
        let store = MemoryBillingStore::default();
        let err = generate_invoices(&store, 99, None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_ongoing_engagement_is_rejected_without_writes() {
        let store = store_with(TransactionRow {
            end_date: None,
            ..quarter_placement()
        });
        let err = generate_invoices(&store, 1, None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.invoices.lock().unwrap().is_empty());
    }

    #[test]
    fn test_missing_rate_is_validation_error() {
        let txn = TransactionRow {
            client_price: None,
            ..quarter_placement()
        };
        let periods = billing_periods_for(&txn).unwrap();
        assert!(matches!(
            plan_invoices(&txn, &periods, None),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_negative_hours_rejected() {
        let txn = quarter_placement();
        let periods = billing_periods_for(&txn).unwrap();
        assert!(plan_invoices(&txn, &periods, Some(-1.0)).is_err());
    }
}
