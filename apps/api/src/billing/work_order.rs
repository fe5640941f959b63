//! Work order for a placement: the agreement document sent to the client.

use crate::billing::store::BillingStore;
use crate::documents::renderer::{DocumentRenderer, RenderedDocument};
use crate::errors::AppError;

pub async fn create_work_order(
    store: &dyn BillingStore,
    renderer: &DocumentRenderer,
    txn_id: i32,
) -> Result<RenderedDocument, AppError> {
    let txn = store
        .find_transaction(txn_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Transaction {txn_id} not found")))?;

    let client_id = txn.client_id.ok_or_else(|| {
        AppError::Validation(format!("Transaction {txn_id} has no client"))
    })?;
    let candidate_id = txn.candidate_id.ok_or_else(|| {
        AppError::Validation(format!("Transaction {txn_id} has no candidate"))
    })?;

    let client = store.find_client(client_id).await?.ok_or_else(|| {
        AppError::Validation(format!("Client {client_id} of transaction {txn_id} does not exist"))
    })?;
    let candidate = store.find_candidate(candidate_id).await?.ok_or_else(|| {
        AppError::Validation(format!(
            "Candidate {candidate_id} of transaction {txn_id} does not exist"
        ))
    })?;

    renderer.render_work_order(&txn, &client, &candidate).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::billing::store::memory::MemoryBillingStore;
    use crate::documents::content::{ContentDir, DocumentSink};
    use crate::documents::renderer::WORK_ORDER_TEMPLATE;
    use crate::models::candidate::CandidateRow;
    use crate::models::client::ClientRow;
    use crate::models::transaction::TransactionRow;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn placement() -> TransactionRow {
        TransactionRow {
            id: 1,
            txn_date: Some(d(2024, 1, 2)),
            candidate_id: Some(3),
            client_id: Some(7),
            recruiter_id: None,
            referral_id: None,
            client_price: Some(50.0),
            referral_price: None,
            recruiter_price: None,
            start_date: Some(d(2024, 1, 8)),
            end_date: None,
            num_payments_received: 0,
            total_client_recv: 0.0,
            total_recruiter_paid: 0.0,
            total_referral_paid: 0.0,
            last_payment_date: None,
        }
    }

    fn seeded_store() -> MemoryBillingStore {
        let store = MemoryBillingStore::default();
        store.transactions.lock().unwrap().push(placement());
        store.clients.lock().unwrap().push(ClientRow {
            id: 7,
            name: "Acme".to_string(),
            client_mgr: Some("Wile".to_string()),
            client_email: None,
            client_addr: None,
            client_phone: None,
            payment_freq: None,
            client_type: None,
        });
        store.candidates.lock().unwrap().push(CandidateRow {
            id: 3,
            name: "Ada Lovelace".to_string(),
            role: None,
            location: None,
            candidate_cost: None,
            phone: None,
            email: None,
            feedback: None,
            cv_link: None,
            status: Some("Hired".to_string()),
            client_id: Some(7),
        });
        store
    }

    async fn renderer(dir: &tempfile::TempDir) -> DocumentRenderer {
        let content = Arc::new(ContentDir::open(dir.path()).await.unwrap());
        content
            .write_document(
                WORK_ORDER_TEMPLATE,
                "candidate_name for client_name from start_date to end_date at client_price",
            )
            .await
            .unwrap();
        DocumentRenderer::new(
            content.clone(),
            content,
            "logo.jpg".to_string(),
            "Technology Services".to_string(),
        )
    }

    #[tokio::test]
    async fn test_work_order_renders_ongoing_placement() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = renderer(&dir).await;
        let store = seeded_store();

        let doc = create_work_order(&store, &renderer, 1).await.unwrap();
        assert_eq!(
            doc.html,
            "Ada Lovelace for Acme from 2024-01-08 to Ongoing at $50.00"
        );
        assert!(doc.filename.starts_with("WO_Acme_Ada_Lovelace_20240102_"));
        assert!(dir.path().join(&doc.filename).exists());
    }

    #[tokio::test]
    async fn test_unknown_transaction_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = renderer(&dir).await;
        let err = create_work_order(&seeded_store(), &renderer, 42)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_candidate_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = renderer(&dir).await;
        let store = seeded_store();
        store.candidates.lock().unwrap().clear();

        let err = create_work_order(&store, &renderer, 1).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
