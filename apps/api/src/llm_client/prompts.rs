// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// this file holds the pieces they have in common.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Placeholder substituted with the pretty-printed structured resume.
pub const RESUME_JSON_PLACEHOLDER: &str = "{resume_json}";

/// Renders a resume value the way prompts embed it.
pub fn resume_json_for_prompt(resume: &serde_json::Value) -> String {
    serde_json::to_string_pretty(resume).unwrap_or_else(|_| resume.to_string())
}
