//! Resume intake: PDF bytes → plain text → LLM-structured section tree.

use bytes::Bytes;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{complete_json, LlmBackend};
use crate::resume::models::StructuredResume;
use crate::resume::prompts::{STRUCTURE_PARAMS, STRUCTURE_PROMPT_TEMPLATE, STRUCTURE_SYSTEM};

/// Extracts the text layer of an uploaded PDF.
///
/// Parsing is CPU-bound and runs on the blocking pool. Unreadable documents and
/// documents without any text (scans) are caller errors.
pub async fn extract_pdf_text(pdf: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| {
            // pdf-extract panics on some malformed documents instead of returning an error.
            if e.is_panic() {
                AppError::Validation("Could not read PDF".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}"))
            }
        })?
        .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))?;

    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "No text could be extracted from the uploaded PDF".to_string(),
        ));
    }
    Ok(text)
}

/// Asks the LLM to split raw resume text into ordered sections.
///
/// A reply that is not JSON, or JSON that does not fit the section-tree shape, is an
/// LLM failure rather than a caller error.
pub async fn structure_resume(
    llm: &dyn LlmBackend,
    resume_text: &str,
) -> Result<StructuredResume, AppError> {
    let prompt = STRUCTURE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let value: Value = complete_json(llm, &prompt, STRUCTURE_SYSTEM, STRUCTURE_PARAMS)
        .await
        .map_err(|e| AppError::Llm(format!("Resume structuring failed: {e}")))?;

    let structured = StructuredResume::try_from(&value)
        .map_err(|e| AppError::Llm(format!("Resume structuring returned an unusable shape: {e}")))?;
    if structured.is_empty() {
        return Err(AppError::Llm("Resume structuring found no sections".to_string()));
    }

    info!(
        sections = structured.sections().len(),
        bullets = structured.bullets().len(),
        "Structured uploaded resume"
    );
    Ok(structured)
}
