//! Persistence seam of the billing core.
//!
//! `BillingStore` is the only way the calculator, generator and submission flow
//! reach the database. `AppState` carries an `Arc<dyn BillingStore>`; tests swap
//! in the in-memory store below.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::candidate::CandidateRow;
use crate::models::client::ClientRow;
use crate::models::client_invoice::NewClientInvoice;
use crate::models::invoice::NewInvoice;
use crate::models::transaction::TransactionRow;

#[async_trait]
pub trait BillingStore: Send + Sync {
    async fn find_transaction(&self, id: i32) -> Result<Option<TransactionRow>, AppError>;

    async fn find_client(&self, id: i32) -> Result<Option<ClientRow>, AppError>;

    async fn find_candidate(&self, id: i32) -> Result<Option<CandidateRow>, AppError>;

    /// Inserts one invoice row and returns its id.
    async fn insert_invoice(&self, invoice: &NewInvoice) -> Result<i32, AppError>;

    /// Inserts the raw client invoice row. The id is recovered afterwards by
    /// natural key with [`BillingStore::latest_client_invoice_id`].
    async fn insert_client_invoice(&self, invoice: &NewClientInvoice) -> Result<(), AppError>;

    /// Highest client invoice id for `(inv_date, client_id)`, if any.
    async fn latest_client_invoice_id(
        &self,
        inv_date: NaiveDate,
        client_id: i32,
    ) -> Result<Option<i32>, AppError>;

    /// Writes the rendered document and its public hash onto an existing row.
    async fn attach_rendered(&self, id: i32, inv_html: &str, inv_hash: &str)
        -> Result<(), AppError>;

    /// Rendered document of the client invoice whose public hash is `inv_hash`.
    async fn rendered_by_hash(&self, inv_hash: &str) -> Result<Option<String>, AppError>;
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgBillingStore {
    pool: PgPool,
}

impl PgBillingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BillingStore for PgBillingStore {
    async fn find_transaction(&self, id: i32) -> Result<Option<TransactionRow>, AppError> {
        Ok(
            sqlx::query_as::<_, TransactionRow>("SELECT * FROM transactions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_client(&self, id: i32) -> Result<Option<ClientRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ClientRow>("SELECT * FROM clients WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_candidate(&self, id: i32) -> Result<Option<CandidateRow>, AppError> {
        Ok(
            sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert_invoice(&self, invoice: &NewInvoice) -> Result<i32, AppError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO invoices
                (inv_date, candidate_id, period_start, period_end, txn_id,
                 hours_worked, inv_value, inv_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(invoice.inv_date)
        .bind(invoice.candidate_id)
        .bind(invoice.period_start)
        .bind(invoice.period_end)
        .bind(invoice.txn_id)
        .bind(invoice.hours_worked)
        .bind(invoice.inv_value)
        .bind(&invoice.inv_status)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert_client_invoice(&self, invoice: &NewClientInvoice) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO client_invoices
                (inv_date, due_date, period_start, period_end, client_id, client_name,
                 client_contact, client_email, client_addr, client_phone, explain_str,
                 inv_value, inv_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(invoice.inv_date)
        .bind(invoice.due_date)
        .bind(invoice.period_start)
        .bind(invoice.period_end)
        .bind(invoice.client_id)
        .bind(&invoice.client_name)
        .bind(&invoice.client_contact)
        .bind(&invoice.client_email)
        .bind(&invoice.client_addr)
        .bind(&invoice.client_phone)
        .bind(&invoice.explain_str)
        .bind(invoice.inv_value)
        .bind(&invoice.inv_status)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn latest_client_invoice_id(
        &self,
        inv_date: NaiveDate,
        client_id: i32,
    ) -> Result<Option<i32>, AppError> {
        Ok(sqlx::query_scalar(
            "SELECT MAX(id) FROM client_invoices WHERE inv_date = $1 AND client_id = $2",
        )
        .bind(inv_date)
        .bind(client_id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn attach_rendered(
        &self,
        id: i32,
        inv_html: &str,
        inv_hash: &str,
    ) -> Result<(), AppError> {
        let result =
            sqlx::query("UPDATE client_invoices SET inv_html = $1, inv_hash = $2 WHERE id = $3")
                .bind(inv_html)
                .bind(inv_hash)
                .bind(id)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Client invoice {id} not found")));
        }
        Ok(())
    }

    async fn rendered_by_hash(&self, inv_hash: &str) -> Result<Option<String>, AppError> {
        let html: Option<Option<String>> =
            sqlx::query_scalar("SELECT inv_html FROM client_invoices WHERE inv_hash = $1")
                .bind(inv_hash)
                .fetch_optional(&self.pool)
                .await?;
        Ok(html.flatten())
    }
}
