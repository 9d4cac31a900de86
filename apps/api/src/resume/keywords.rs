//! Keyword gap analysis: technical keywords a job description wants that the resume lacks.

use std::collections::HashSet;

use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::prompts::{
    resume_json_for_prompt, JSON_ONLY_SYSTEM, RESUME_JSON_PLACEHOLDER,
};
use crate::llm_client::{strip_json_fences, LlmBackend};
use crate::resume::prompts::{KEYWORD_MATCH_PARAMS, KEYWORD_MATCH_PROMPT_TEMPLATE};

/// Keywords from `jd_text` that `structured` does not cover, in the model's order.
///
/// A reply that is not a JSON array of strings is an `AppError::Llm` (502), never a
/// placeholder list.
pub async fn match_keywords(
    llm: &dyn LlmBackend,
    structured: &Value,
    jd_text: &str,
) -> Result<Vec<String>, AppError> {
    let prompt = KEYWORD_MATCH_PROMPT_TEMPLATE
        .replace(RESUME_JSON_PLACEHOLDER, &resume_json_for_prompt(structured))
        .replace("{jd_text}", jd_text);

    let raw = llm
        .complete(&prompt, JSON_ONLY_SYSTEM, KEYWORD_MATCH_PARAMS)
        .await
        .map_err(|e| AppError::Llm(format!("Keyword matching failed: {e}")))?;

    parse_keyword_list(&raw)
}

/// Parses the model's JSON array of keywords.
///
/// Entries are trimmed, blanks dropped, and case-insensitive duplicates collapsed onto
/// their first spelling.
pub fn parse_keyword_list(raw: &str) -> Result<Vec<String>, AppError> {
    let keywords: Vec<String> = serde_json::from_str(strip_json_fences(raw))
        .map_err(|e| AppError::Llm(format!("Could not parse keyword list: {e}")))?;

    let mut seen = HashSet::new();
    Ok(keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty() && seen.insert(k.to_lowercase()))
        .collect())
}
