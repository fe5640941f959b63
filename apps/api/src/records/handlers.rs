//! Axum route handlers for the Record API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::candidate::CandidateRow;
use crate::models::client_invoice::ClientInvoiceRow;
use crate::models::transaction::TransactionRow;
use crate::models::user::UserRow;
use crate::records::queries::{self, Placement};
use crate::records::{self, Record};
use crate::state::AppState;

/// `GET /` list, `POST /` create, `GET /:id` find, `PATCH /:id` sparse update.
pub fn record_routes<R: Record>() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_list::<R>).post(handle_create::<R>))
        .route("/:id", get(handle_find::<R>).patch(handle_patch::<R>))
}

// ────────────────────────────────────────────────────────────────────────────
// Generic handlers
// ────────────────────────────────────────────────────────────────────────────

pub async fn handle_list<R: Record>(
    State(state): State<AppState>,
) -> Result<Json<Vec<R>>, AppError> {
    Ok(Json(records::list::<R>(&state.db).await?))
}

pub async fn handle_find<R: Record>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<R>, AppError> {
    Ok(Json(records::find::<R>(&state.db, id).await?))
}

pub async fn handle_create<R: Record>(
    State(state): State<AppState>,
    Json(new): Json<R::New>,
) -> Result<(StatusCode, Json<R>), AppError> {
    let row = records::create::<R>(&state.db, &new).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn handle_patch<R: Record>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<R::Patch>,
) -> Result<Json<R>, AppError> {
    Ok(Json(records::patch::<R>(&state.db, id, changes).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Lookups
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LatestInvoiceResponse {
    pub inv_date: NaiveDate,
}

/// GET /api/v1/candidates/by-name/:name
pub async fn handle_candidate_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CandidateRow>, AppError> {
    Ok(Json(queries::candidate_by_name(&state.db, &name).await?))
}

/// GET /api/v1/users/by-name/:name
pub async fn handle_user_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<UserRow>, AppError> {
    Ok(Json(queries::user_by_name(&state.db, &name).await?))
}

/// GET /api/v1/clients/:id/transactions
pub async fn handle_client_transactions(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
) -> Result<Json<Vec<TransactionRow>>, AppError> {
    Ok(Json(queries::client_transactions(&state.db, client_id).await?))
}

/// GET /api/v1/clients/:id/client-invoices
pub async fn handle_client_invoices(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
) -> Result<Json<Vec<ClientInvoiceRow>>, AppError> {
    Ok(Json(queries::client_invoices_for(&state.db, client_id).await?))
}

/// GET /api/v1/clients/:id/latest-invoice
pub async fn handle_latest_invoice(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
) -> Result<Json<LatestInvoiceResponse>, AppError> {
    let inv_date = queries::latest_invoice_date(&state.db, client_id).await?;
    Ok(Json(LatestInvoiceResponse { inv_date }))
}

/// GET /api/v1/recruiters/:id/placements
pub async fn handle_recruiter_placements(
    State(state): State<AppState>,
    Path(recruiter_id): Path<i32>,
) -> Result<Json<Vec<Placement>>, AppError> {
    Ok(Json(queries::recruiter_placements(&state.db, recruiter_id).await?))
}
