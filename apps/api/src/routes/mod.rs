pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::billing::handlers as billing;
use crate::documents::handlers as files;
use crate::evaluation::handlers as evaluation;
use crate::models::candidate::CandidateRow;
use crate::models::client::ClientRow;
use crate::models::client_invoice::ClientInvoiceRow;
use crate::models::invoice::InvoiceRow;
use crate::models::open_role::{CvSubmissionRow, OpenRoleRow};
use crate::models::transaction::TransactionRow;
use crate::models::user::UserRow;
use crate::records::handlers::{self as records, record_routes};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Record API
        .nest(
            "/api/v1/clients",
            record_routes::<ClientRow>()
                .route("/:id/transactions", get(records::handle_client_transactions))
                .route("/:id/client-invoices", get(records::handle_client_invoices))
                .route("/:id/latest-invoice", get(records::handle_latest_invoice)),
        )
        .nest(
            "/api/v1/candidates",
            record_routes::<CandidateRow>()
                .route("/by-name/:name", get(records::handle_candidate_by_name)),
        )
        .nest(
            "/api/v1/transactions",
            record_routes::<TransactionRow>()
                .route("/:id/invoices", post(billing::handle_generate_invoices))
                .route("/:id/work-order", post(billing::handle_work_order)),
        )
        .nest("/api/v1/invoices", record_routes::<InvoiceRow>())
        .nest(
            "/api/v1/client-invoices",
            record_routes::<ClientInvoiceRow>()
                .route("/submit", post(billing::handle_submit_client_invoice))
                .route("/by-hash/:hash", get(billing::handle_invoice_by_hash)),
        )
        .nest(
            "/api/v1/open-roles",
            record_routes::<OpenRoleRow>()
                .route("/:id/test", post(evaluation::handle_open_role_test)),
        )
        .nest("/api/v1/cv-submissions", record_routes::<CvSubmissionRow>())
        .nest(
            "/api/v1/users",
            record_routes::<UserRow>().route("/by-name/:name", get(records::handle_user_by_name)),
        )
        .route(
            "/api/v1/recruiters/:id/placements",
            get(records::handle_recruiter_placements),
        )
        // Evaluation API
        .route("/api/v1/evaluation/test", post(evaluation::handle_coding_test))
        .route("/api/v1/evaluation/match", post(evaluation::handle_match))
        .route("/api/v1/evaluation/score", post(evaluation::handle_score))
        .route("/api/v1/evaluation/cv", post(evaluation::handle_parse_cv))
        .route(
            "/api/v1/evaluation/cv/upload",
            post(evaluation::handle_upload_cv)
                .layer(DefaultBodyLimit::max(files::UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/api/v1/evaluation/job-description",
            post(evaluation::handle_parse_job_description),
        )
        // Files API
        .route(
            "/api/v1/files",
            post(files::handle_upload_file)
                .layer(DefaultBodyLimit::max(files::UPLOAD_BODY_LIMIT)),
        )
        .route("/api/v1/files/:name", get(files::handle_file_url))
        .with_state(state)
}
