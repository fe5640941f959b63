//! Client invoice submission: persist, recover the id, render, hash, write back.
//!
//! The insert and the write-back are separate commits. A failure between them
//! leaves the raw row in the `created` state; nothing is rolled back.

use serde::Serialize;
use tracing::{info, warn};

use crate::billing::hasher::invoice_hash;
use crate::billing::store::BillingStore;
use crate::documents::renderer::DocumentRenderer;
use crate::errors::AppError;
use crate::models::client_invoice::NewClientInvoice;

#[derive(Debug, Clone, Serialize)]
pub struct SubmittedInvoice {
    pub id: i32,
    pub inv_hash: String,
    pub inv_html: String,
}

pub async fn submit_client_invoice(
    store: &dyn BillingStore,
    renderer: &DocumentRenderer,
    input: NewClientInvoice,
) -> Result<SubmittedInvoice, AppError> {
    if input.client_name.trim().is_empty() {
        return Err(AppError::Validation("client_name is required".to_string()));
    }

    store.insert_client_invoice(&input).await?;

    let id = match store
        .latest_client_invoice_id(input.inv_date, input.client_id)
        .await?
    {
        Some(id) => id,
        None => {
            warn!(
                "Client invoice for client {} on {} not found after insert",
                input.client_id, input.inv_date
            );
            return Err(AppError::NotFound(format!(
                "No client invoice for client {} dated {}",
                input.client_id, input.inv_date
            )));
        }
    };

    let rendered = renderer.render_invoice(id, &input).await?;
    let inv_hash = invoice_hash(id, input.client_id, input.inv_date);
    store.attach_rendered(id, &rendered.html, &inv_hash).await?;

    info!("Client invoice {id} rendered as {}", rendered.filename);
    Ok(SubmittedInvoice {
        id,
        inv_hash,
        inv_html: rendered.html,
    })
}

/// Rendered document behind a public invoice hash.
pub async fn invoice_html_by_hash(
    store: &dyn BillingStore,
    inv_hash: &str,
) -> Result<String, AppError> {
    store
        .rendered_by_hash(inv_hash)
        .await?
        .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))
}
