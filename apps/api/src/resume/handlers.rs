use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::resume::bullets::{improve_bullets, BulletSuggestion};
use crate::resume::extractor::{extract_pdf_text, structure_resume};
use crate::resume::keywords::match_keywords;
use crate::resume::models::StructuredResume;
use crate::resume::summary::generate_linkedin_summary;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "resume";

#[derive(Serialize)]
pub struct UploadResponse {
    pub structured: StructuredResume,
}

#[derive(Deserialize)]
pub struct ImproveBulletsRequest {
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Serialize)]
pub struct ImproveBulletsResponse {
    pub results: Vec<BulletSuggestion>,
}

#[derive(Deserialize)]
pub struct MatchKeywordsRequest {
    #[serde(default)]
    pub structured: Value,
    #[serde(default)]
    pub jd: String,
}

#[derive(Serialize)]
pub struct MatchKeywordsResponse {
    pub missing: Vec<String>,
}

#[derive(Deserialize)]
pub struct LinkedinSummaryRequest {
    #[serde(default)]
    pub structured: Value,
}

#[derive(Serialize)]
pub struct LinkedinSummaryResponse {
    pub linkedin_summary: String,
}

/// POST /api/upload
///
/// Multipart form with the PDF in the `resume` field. Responds with the structured resume.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut pdf = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(UPLOAD_FIELD) {
            pdf = Some(field.bytes().await.map_err(multipart_error)?);
            break;
        }
    }
    let pdf = pdf.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let text = extract_pdf_text(pdf).await?;
    info!(chars = text.chars().count(), "Extracted resume text");

    let structured = structure_resume(state.llm.as_ref(), &text).await?;
    Ok(Json(UploadResponse { structured }))
}

/// POST /api/improve-bullets
pub async fn handle_improve_bullets(
    State(state): State<AppState>,
    Json(req): Json<ImproveBulletsRequest>,
) -> Result<Json<ImproveBulletsResponse>, AppError> {
    if req.bullets.is_empty() {
        return Err(AppError::Validation("Invalid bullet list".to_string()));
    }
    let results = improve_bullets(state.llm.as_ref(), &req.bullets).await;
    Ok(Json(ImproveBulletsResponse { results }))
}

/// POST /api/match-keywords
pub async fn handle_match_keywords(
    State(state): State<AppState>,
    Json(req): Json<MatchKeywordsRequest>,
) -> Result<Json<MatchKeywordsResponse>, AppError> {
    if is_blank(&req.structured) || req.jd.trim().is_empty() {
        return Err(AppError::Validation(
            "Missing structured data or job description".to_string(),
        ));
    }
    let missing = match_keywords(state.llm.as_ref(), &req.structured, &req.jd).await?;
    info!(missing = missing.len(), "Keyword gap analysis complete");
    Ok(Json(MatchKeywordsResponse { missing }))
}

/// POST /api/generate-linkedin-summary
pub async fn handle_linkedin_summary(
    State(state): State<AppState>,
    Json(req): Json<LinkedinSummaryRequest>,
) -> Result<Json<LinkedinSummaryResponse>, AppError> {
    if is_blank(&req.structured) {
        return Err(AppError::Validation("Missing structured resume data".to_string()));
    }
    let linkedin_summary = generate_linkedin_summary(state.llm.as_ref(), &req.structured).await?;
    Ok(Json(LinkedinSummaryResponse { linkedin_summary }))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Invalid upload: {}", err.body_text()))
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
