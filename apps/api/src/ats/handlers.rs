//! Axum route handlers for the ATS API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ats::extraction::{extract_document, DocumentKind};
use crate::ats::vocabulary::{ScoringSettings, Vocabulary};
use crate::errors::AppError;
use crate::models::fragment::TextFragment;
use crate::models::report::Report;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub structure_data: Option<Vec<TextFragment>>,
}

#[derive(Debug, Serialize)]
pub struct VocabularyResponse {
    pub vocabulary: Vocabulary,
    pub settings: ScoringSettings,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/score
///
/// Scores already-extracted resume text, with optional JD and layout fragments.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<Report>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let report = state.engine.score(
        &request.resume_text,
        request.job_description.as_deref(),
        request.structure_data.as_deref(),
    );

    Ok(Json(report))
}

/// POST /api/v1/ats/upload
///
/// Multipart upload: `resume_file` (PDF, DOCX or plain text) and optional `job_desc`.
/// Extraction runs on the blocking pool; scoring follows on the request task.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Report>, AppError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut job_desc: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume_file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                file = Some((filename, data));
            }
            Some("job_desc") => {
                job_desc = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let (filename, data) = file
        .filter(|(_, data)| !data.is_empty())
        .ok_or_else(|| AppError::Validation("Please upload a resume.".to_string()))?;
    let kind = DocumentKind::from_filename(&filename)
        .ok_or_else(|| AppError::UnsupportedMedia("Unsupported format.".to_string()))?;

    info!(
        filename = %filename,
        bytes = data.len(),
        kind = ?kind,
        "Extracting uploaded resume"
    );

    let extracted = tokio::task::spawn_blocking(move || extract_document(kind, &data))
        .await
        .map_err(|e| {
            if e.is_panic() {
                AppError::Extraction(format!("document parser panicked on {filename}"))
            } else {
                AppError::Internal(e.into())
            }
        })??;

    if extracted.text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No readable text found in the uploaded resume.".to_string(),
        ));
    }

    let report = state.engine.score(
        &extracted.text,
        job_desc.as_deref(),
        extracted.fragments.as_deref(),
    );

    Ok(Json(report))
}

/// GET /api/v1/ats/vocabulary
///
/// The word lists and settings the engine is running with.
pub async fn handle_vocabulary(State(state): State<AppState>) -> Json<VocabularyResponse> {
    Json(VocabularyResponse {
        vocabulary: state.engine.vocabulary().clone(),
        settings: state.engine.settings().clone(),
    })
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}
