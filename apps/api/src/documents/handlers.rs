//! Axum route handlers for the Files API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::documents::naming::upload_key;
use crate::errors::AppError;
use crate::state::AppState;

/// Uploads above this size are rejected.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Request body limit for upload routes: the file cap plus room for multipart framing.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

#[derive(Debug, Serialize)]
pub struct FileUrlResponse {
    pub url: String,
}

/// First file field of a multipart body.
#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

pub async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read multipart field: {e}")))?
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let file_name = field.file_name().unwrap_or("unnamed").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read file bytes: {e}")))?;

    if data.is_empty() {
        return Err(AppError::Validation(format!("{file_name} is empty")));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation("File too large (max 20MB)".to_string()));
    }

    Ok(Upload {
        file_name,
        content_type,
        data,
    })
}

/// POST /api/v1/files
///
/// Stores the uploaded file in the bucket under a unique key.
pub async fn handle_upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<FileUrlResponse>, AppError> {
    let upload = read_upload(&mut multipart).await?;
    let key = upload_key(&upload.file_name);
    let url = state
        .bucket
        .upload(&key, upload.data, &upload.content_type)
        .await?;
    Ok(Json(FileUrlResponse { url }))
}

/// GET /api/v1/files/:name
pub async fn handle_file_url(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FileUrlResponse>, AppError> {
    let url = state
        .bucket
        .public_url(&name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("File {name} not found")))?;
    Ok(Json(FileUrlResponse { url }))
}
