//! Bullet review. One LLM call per bullet suggests a rewrite with feedback and scores.
//!
//! A failed or malformed reply degrades that bullet's result instead of failing the batch:
//! the caller always gets one suggestion per input bullet, in input order.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::llm_client::{strip_json_fences, LlmBackend};
use crate::resume::prompts::{
    BULLET_REVIEW_PARAMS, BULLET_REVIEW_PROMPT_TEMPLATE, BULLET_REVIEW_SYSTEM,
};

const NO_FEEDBACK: &str = "No feedback available.";

/// 1–10 ratings of the original bullet. `None` when the model did not provide a usable one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulletScores {
    #[serde(default, deserialize_with = "lenient_score")]
    pub clarity: Option<u8>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub impact: Option<u8>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub conciseness: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletSuggestion {
    pub original: String,
    pub suggested: String,
    pub feedback: String,
    pub scores: BulletScores,
}

/// Shape the review prompt asks for. A field of the wrong type reads as missing, so one
/// bad value never discards the rest of the reply.
#[derive(Debug, Deserialize)]
struct BulletReview {
    #[serde(default, deserialize_with = "lenient_text")]
    suggested: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    feedback: Option<String>,
    #[serde(default, deserialize_with = "lenient_scores")]
    scores: BulletScores,
}

/// Integer from 1 to 10, anything else is `None`.
fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .filter(|n| (1..=10).contains(n))
        .and_then(|n| u8::try_from(n).ok()))
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_scores<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BulletScores, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(BulletScores::deserialize(value).unwrap_or_default())
}

/// Reviews each bullet in order. Never fails as a whole.
pub async fn improve_bullets(llm: &dyn LlmBackend, bullets: &[String]) -> Vec<BulletSuggestion> {
    let mut results = Vec::with_capacity(bullets.len());
    for bullet in bullets {
        let prompt = BULLET_REVIEW_PROMPT_TEMPLATE.replace("{bullet}", bullet);
        let suggestion = match llm
            .complete(&prompt, BULLET_REVIEW_SYSTEM, BULLET_REVIEW_PARAMS)
            .await
        {
            Ok(raw) => parse_bullet_review(bullet, &raw),
            Err(e) => {
                warn!(error = %e, "Bullet review failed; returning original bullet");
                BulletSuggestion {
                    original: bullet.clone(),
                    suggested: bullet.clone(),
                    feedback: format!("Suggestion unavailable: {e}"),
                    scores: BulletScores::default(),
                }
            }
        };
        results.push(suggestion);
    }
    results
}

/// Turns a raw review reply into a suggestion.
///
/// Valid JSON fills whatever fields it has (missing suggestion → original bullet).
/// Anything else is treated as a bare rewrite.
pub fn parse_bullet_review(original: &str, raw: &str) -> BulletSuggestion {
    match serde_json::from_str::<BulletReview>(strip_json_fences(raw)) {
        Ok(review) => BulletSuggestion {
            original: original.to_string(),
            suggested: review
                .suggested
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| original.to_string()),
            feedback: review
                .feedback
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| NO_FEEDBACK.to_string()),
            scores: review.scores,
        },
        Err(_) => BulletSuggestion {
            original: original.to_string(),
            suggested: raw.trim().to_string(),
            feedback: NO_FEEDBACK.to_string(),
            scores: BulletScores::default(),
        },
    }
}
