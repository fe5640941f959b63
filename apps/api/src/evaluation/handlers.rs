//! Axum route handlers for the Evaluation API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::documents::handlers::read_upload;
use crate::documents::naming::upload_key;
use crate::errors::AppError;
use crate::evaluation::parsers::{parse_cv, parse_job_description, ParsedCv, ParsedJobDescription};
use crate::evaluation::reports::{
    generate_coding_test, generate_match_report, generate_score_report,
};
use crate::models::open_role::{OpenRolePatch, OpenRoleRow};
use crate::records;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CodingTestRequest {
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub job_description: String,
    pub candidate_cv: String,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub questions: String,
    pub answers: String,
}

#[derive(Debug, Deserialize)]
pub struct ParseCvRequest {
    pub cv_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ParseJobDescriptionRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub evaluation: String,
}

#[derive(Debug, Serialize)]
pub struct ParsedCvResponse {
    pub candidate_info: ParsedCv,
}

#[derive(Debug, Serialize)]
pub struct UploadedCvResponse {
    pub cv_link: String,
    pub candidate_info: ParsedCv,
}

#[derive(Debug, Serialize)]
pub struct ParsedJobDescriptionResponse {
    pub job_desc: ParsedJobDescription,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/evaluation/test
pub async fn handle_coding_test(
    State(state): State<AppState>,
    Json(request): Json<CodingTestRequest>,
) -> Result<Json<EvaluationResponse>, AppError> {
    let evaluation = generate_coding_test(state.llm.as_ref(), &request.job_description).await?;
    Ok(Json(EvaluationResponse { evaluation }))
}

/// POST /api/v1/evaluation/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<EvaluationResponse>, AppError> {
    let evaluation = generate_match_report(
        state.llm.as_ref(),
        &request.job_description,
        &request.candidate_cv,
    )
    .await?;
    Ok(Json(EvaluationResponse { evaluation }))
}

/// POST /api/v1/evaluation/score
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<EvaluationResponse>, AppError> {
    let evaluation =
        generate_score_report(state.llm.as_ref(), &request.questions, &request.answers).await?;
    Ok(Json(EvaluationResponse { evaluation }))
}

/// POST /api/v1/evaluation/cv
pub async fn handle_parse_cv(
    State(state): State<AppState>,
    Json(request): Json<ParseCvRequest>,
) -> Result<Json<ParsedCvResponse>, AppError> {
    let candidate_info = parse_cv(state.llm.as_ref(), &request.cv_text).await?;
    Ok(Json(ParsedCvResponse { candidate_info }))
}

/// POST /api/v1/evaluation/cv/upload
///
/// Stores the PDF in the bucket, extracts its text and parses it.
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadedCvResponse>, AppError> {
    let upload = read_upload(&mut multipart).await?;
    let is_pdf = upload.content_type == "application/pdf"
        || upload.file_name.to_ascii_lowercase().ends_with(".pdf");
    if !is_pdf {
        return Err(AppError::Validation(format!(
            "{} is not a PDF",
            upload.file_name
        )));
    }

    let cv_text = extract_pdf_text(upload.data.clone()).await?;
    let cv_link = state
        .bucket
        .upload(&upload_key(&upload.file_name), upload.data, "application/pdf")
        .await?;
    info!("Stored CV {} at {cv_link}", upload.file_name);

    let candidate_info = parse_cv(state.llm.as_ref(), &cv_text).await?;
    Ok(Json(UploadedCvResponse {
        cv_link,
        candidate_info,
    }))
}

/// POST /api/v1/evaluation/job-description
pub async fn handle_parse_job_description(
    State(state): State<AppState>,
    Json(request): Json<ParseJobDescriptionRequest>,
) -> Result<Json<ParsedJobDescriptionResponse>, AppError> {
    let job_desc = parse_job_description(state.llm.as_ref(), &request.job_description).await?;
    Ok(Json(ParsedJobDescriptionResponse { job_desc }))
}

/// POST /api/v1/open-roles/:id/test
///
/// Generates a coding test from the role's job description and stores it in `test_doc`.
pub async fn handle_open_role_test(
    State(state): State<AppState>,
    Path(role_id): Path<i32>,
) -> Result<Json<OpenRoleRow>, AppError> {
    let role = records::find::<OpenRoleRow>(&state.db, role_id).await?;
    let jd = role
        .jd_doc
        .as_deref()
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| {
            AppError::Validation(format!("Open role {role_id} has no job description"))
        })?;

    let test_doc = generate_coding_test(state.llm.as_ref(), jd).await?;
    let changes = OpenRolePatch {
        test_doc: Some(Some(test_doc)),
        ..Default::default()
    };
    let role = records::patch::<OpenRoleRow>(&state.db, role_id, changes).await?;
    Ok(Json(role))
}

/// Text layer of a PDF. Extraction is CPU-bound and runs on the blocking pool.
async fn extract_pdf_text(data: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}"))
        })?
        .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))?;

    if text.trim().is_empty() {
        return Err(AppError::Validation("PDF has no extractable text".to_string()));
    }
    Ok(text)
}
