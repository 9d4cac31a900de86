//! LinkedIn "About" summary generation.

use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::prompts::{resume_json_for_prompt, RESUME_JSON_PLACEHOLDER};
use crate::llm_client::LlmBackend;
use crate::resume::prompts::{
    LINKEDIN_SUMMARY_PARAMS, LINKEDIN_SUMMARY_PROMPT_TEMPLATE, LINKEDIN_SUMMARY_SYSTEM,
};

pub async fn generate_linkedin_summary(
    llm: &dyn LlmBackend,
    structured: &Value,
) -> Result<String, AppError> {
    let prompt = LINKEDIN_SUMMARY_PROMPT_TEMPLATE
        .replace(RESUME_JSON_PLACEHOLDER, &resume_json_for_prompt(structured));

    let raw = llm
        .complete(&prompt, LINKEDIN_SUMMARY_SYSTEM, LINKEDIN_SUMMARY_PARAMS)
        .await
        .map_err(|e| AppError::Llm(format!("LinkedIn summary generation failed: {e}")))?;

    let summary = clean_summary(&raw);
    if summary.is_empty() {
        return Err(AppError::Llm("LinkedIn summary was empty".to_string()));
    }
    Ok(summary.to_string())
}

/// Trims the reply and drops one pair of wrapping quotes, which models sometimes add.
fn clean_summary(raw: &str) -> &str {
    let trimmed = raw.trim();
    ['"', '“']
        .iter()
        .zip(['"', '”'])
        .find_map(|(open, close)| {
            trimmed
                .strip_prefix(*open)
                .and_then(|s| s.strip_suffix(close))
        })
        .map(str::trim)
        .unwrap_or(trimmed)
}
