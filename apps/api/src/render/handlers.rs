use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::render::render_resume;
use crate::resume::models::{Modification, StructuredResume};
use crate::state::AppState;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DOWNLOAD_DISPOSITION: &str = "attachment; filename=\"modified_resume.pdf\"";

#[derive(Debug, Deserialize)]
pub struct DownloadResumeRequest {
    /// Kept as raw JSON so shape errors surface as a 400 with the offending path.
    #[serde(default = "empty_resume")]
    pub resume: Value,
    #[serde(default)]
    pub modifications: Vec<Modification>,
}

fn empty_resume() -> Value {
    Value::Object(Default::default())
}

/// POST /api/download-resume
///
/// Renders the (possibly edited) structured resume with improvement annotations and
/// returns it as a PDF attachment.
pub async fn handle_download_resume(
    State(state): State<AppState>,
    Json(request): Json<DownloadResumeRequest>,
) -> Result<Response, AppError> {
    let resume = StructuredResume::try_from(&request.resume)?;
    let modifications = request.modifications;
    let layout = state.layout.clone();

    // Layout and serialization are CPU-bound; keep them off the async workers.
    let pdf = tokio::task::spawn_blocking(move || render_resume(&resume, &modifications, &layout))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    Ok((
        [
            (header::CONTENT_TYPE, PDF_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, DOWNLOAD_DISPOSITION),
        ],
        Bytes::from(pdf),
    )
        .into_response())
}
