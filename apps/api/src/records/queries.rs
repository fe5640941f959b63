//! Lookups beyond plain id access.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::errors::AppError;
use crate::models::candidate::{CandidateRow, STATUS_HIRED};
use crate::models::client_invoice::ClientInvoiceRow;
use crate::models::transaction::TransactionRow;
use crate::models::user::UserRow;

/// A recruiter's completed placement with the client contact details needed for billing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Placement {
    pub txn_id: i32,
    pub candidate_id: i32,
    pub candidate_name: String,
    pub client_id: i32,
    pub client_name: String,
    pub client_contact: Option<String>,
    pub client_email: Option<String>,
    pub client_addr: Option<String>,
    pub client_phone: Option<String>,
    pub recruiter_price: Option<f64>,
    pub client_price: Option<f64>,
}

pub async fn candidate_by_name(pool: &PgPool, name: &str) -> Result<CandidateRow, AppError> {
    sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate '{name}' not found")))
}

pub async fn user_by_name(pool: &PgPool, name: &str) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{name}' not found")))
}

/// Every placement made at `client_id`.
pub async fn client_transactions(
    pool: &PgPool,
    client_id: i32,
) -> Result<Vec<TransactionRow>, AppError> {
    Ok(sqlx::query_as::<_, TransactionRow>(
        "SELECT * FROM transactions WHERE client_id = $1 ORDER BY id",
    )
    .bind(client_id)
    .fetch_all(pool)
    .await?)
}

/// Client invoices of `client_id`, newest first.
pub async fn client_invoices_for(
    pool: &PgPool,
    client_id: i32,
) -> Result<Vec<ClientInvoiceRow>, AppError> {
    Ok(sqlx::query_as::<_, ClientInvoiceRow>(
        "SELECT * FROM client_invoices WHERE client_id = $1 ORDER BY inv_date DESC, id DESC",
    )
    .bind(client_id)
    .fetch_all(pool)
    .await?)
}

/// Invoice date of the most recently created client invoice of `client_id`.
pub async fn latest_invoice_date(pool: &PgPool, client_id: i32) -> Result<NaiveDate, AppError> {
    sqlx::query_scalar::<_, NaiveDate>(
        "SELECT inv_date FROM client_invoices WHERE client_id = $1 ORDER BY id DESC LIMIT 1",
    )
    .bind(client_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("No client invoices for client {client_id}")))
}

/// Placements of `recruiter_id` whose candidate is hired. Empty is `NotFound`.
pub async fn recruiter_placements(
    pool: &PgPool,
    recruiter_id: i32,
) -> Result<Vec<Placement>, AppError> {
    let placements = sqlx::query_as::<_, Placement>(
        r#"
        SELECT t.id AS txn_id,
               ca.id AS candidate_id,
               ca.name AS candidate_name,
               cl.id AS client_id,
               cl.name AS client_name,
               cl.client_mgr AS client_contact,
               cl.client_email,
               cl.client_addr,
               cl.client_phone,
               t.recruiter_price,
               t.client_price
        FROM transactions t
        JOIN clients cl ON t.client_id = cl.id
        JOIN candidates ca ON t.candidate_id = ca.id
        WHERE t.recruiter_id = $1 AND ca.status = $2
        ORDER BY t.id
        "#,
    )
    .bind(recruiter_id)
    .bind(STATUS_HIRED)
    .fetch_all(pool)
    .await?;

    if placements.is_empty() {
        return Err(AppError::NotFound(format!(
            "No hired placements for recruiter {recruiter_id}"
        )));
    }
    Ok(placements)
}
