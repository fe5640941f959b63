//! Axum route handlers for the Billing API.

use axum::{
    extract::{Path, State},
    Json,
};
use bytes::Bytes;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::billing::generator::generate_invoices;
use crate::billing::submission::{invoice_html_by_hash, submit_client_invoice, SubmittedInvoice};
use crate::billing::work_order::create_work_order;
use crate::documents::renderer::RenderedDocument;
use crate::errors::AppError;
use crate::models::client_invoice::NewClientInvoice;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct GenerateInvoicesRequest {
    pub hours_worked: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct GenerateInvoicesResponse {
    pub invoices_written: u64,
}

#[derive(Debug, Serialize)]
pub struct InvoiceHtmlResponse {
    pub html: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/transactions/:id/invoices
///
/// Writes one `PRE` invoice per billing period of the placement. The body is
/// optional; `hours_worked` overrides the standard 160 hours. A body that is
/// present but does not parse is rejected before anything is written.
pub async fn handle_generate_invoices(
    State(state): State<AppState>,
    Path(txn_id): Path<i32>,
    body: Bytes,
) -> Result<Json<GenerateInvoicesResponse>, AppError> {
    let request = parse_optional_body::<GenerateInvoicesRequest>(&body)?;
    let invoices_written =
        generate_invoices(state.store.as_ref(), txn_id, request.hours_worked).await?;
    Ok(Json(GenerateInvoicesResponse { invoices_written }))
}

/// Empty (or whitespace-only) bodies yield the default request.
fn parse_optional_body<T>(body: &[u8]) -> Result<T, AppError>
where
    T: Default + DeserializeOwned,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
}

/// POST /api/v1/transactions/:id/work-order
pub async fn handle_work_order(
    State(state): State<AppState>,
    Path(txn_id): Path<i32>,
) -> Result<Json<RenderedDocument>, AppError> {
    let doc = create_work_order(state.store.as_ref(), &state.renderer, txn_id).await?;
    Ok(Json(doc))
}

/// POST /api/v1/client-invoices/submit
pub async fn handle_submit_client_invoice(
    State(state): State<AppState>,
    Json(request): Json<NewClientInvoice>,
) -> Result<Json<SubmittedInvoice>, AppError> {
    let submitted = submit_client_invoice(state.store.as_ref(), &state.renderer, request).await?;
    Ok(Json(submitted))
}

/// GET /api/v1/client-invoices/by-hash/:hash
///
/// Public lookup of a rendered invoice by its integrity hash.
pub async fn handle_invoice_by_hash(
    State(state): State<AppState>,
    Path(inv_hash): Path<String>,
) -> Result<Json<InvoiceHtmlResponse>, AppError> {
    let html = invoice_html_by_hash(state.store.as_ref(), &inv_hash).await?;
    Ok(Json(InvoiceHtmlResponse { html }))
}
