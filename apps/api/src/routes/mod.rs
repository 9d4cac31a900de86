pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::render::handlers::handle_download_resume;
use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/upload",
            post(handlers::handle_upload).layer(upload_limit),
        )
        .route("/api/improve-bullets", post(handlers::handle_improve_bullets))
        .route("/api/match-keywords", post(handlers::handle_match_keywords))
        .route(
            "/api/generate-linkedin-summary",
            post(handlers::handle_linkedin_summary),
        )
        .route("/api/download-resume", post(handle_download_resume))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::testing::ScriptedLlm;
    use crate::render::handlers::{DOWNLOAD_DISPOSITION, PDF_CONTENT_TYPE};
    use crate::render::letter_layout;
    use crate::render::test_support::text_runs;

    const BODY_LIMIT: usize = 16 * 1024 * 1024;

    fn test_state(llm: Arc<ScriptedLlm>) -> AppState {
        AppState {
            llm,
            config: Config {
                anthropic_api_key: "test-key".to_string(),
                port: 0,
                rust_log: "info".to_string(),
                max_upload_bytes: 1024 * 1024,
                render_empty_subheadings: true,
            },
            layout: letter_layout(),
        }
    }

    async fn post_json(llm: Arc<ScriptedLlm>, uri: &str, body: Value) -> Response {
        build_router(test_state(llm))
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = build_router(test_state(Arc::default()))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resumate-api");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_download_resume_returns_pdf_attachment() {
        let body = json!({
            "resume": {
                "EXPERIENCE": {"Acme Corp": ["Built APIs.", "Led team."]}
            },
            "modifications": [
                {"original": "Built APIs.", "improved": "Designed and shipped 12 REST APIs."}
            ]
        });
        let response = post_json(Arc::default(), "/api/download-resume", body).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], PDF_CONTENT_TYPE);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            DOWNLOAD_DISPOSITION
        );

        let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        // heading, subheading, two bullets, one improvement
        assert_eq!(text_runs(&bytes).len(), 5);
    }

    #[tokio::test]
    async fn test_download_resume_without_body_fields_renders_blank_page() {
        let response = post_json(Arc::default(), "/api/download-resume", json!({})).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
        assert!(text_runs(&bytes).is_empty());
    }

    #[tokio::test]
    async fn test_download_resume_rejects_bad_shape() {
        let body = json!({"resume": {"SKILLS": {"": [42]}}, "modifications": []});
        let response = post_json(Arc::default(), "/api/download-resume", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("SKILLS.[0]"));
    }

    #[tokio::test]
    async fn test_improve_bullets() {
        let llm = Arc::new(ScriptedLlm::replying([
            r#"{"suggested": "Shipped 12 APIs.", "feedback": "Quantified.", "scores": {"clarity": 6}}"#,
        ]));
        let response = post_json(
            llm.clone(),
            "/api/improve-bullets",
            json!({"bullets": ["Built APIs."]}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["results"][0]["original"], "Built APIs.");
        assert_eq!(body["results"][0]["suggested"], "Shipped 12 APIs.");
        assert_eq!(body["results"][0]["scores"]["clarity"], 6);
        assert_eq!(body["results"][0]["scores"]["impact"], Value::Null);
        assert_eq!(llm.prompt_count(), 1);
    }

    #[tokio::test]
    async fn test_improve_bullets_rejects_empty_list() {
        let llm: Arc<ScriptedLlm> = Arc::default();
        let response = post_json(llm.clone(), "/api/improve-bullets", json!({"bullets": []})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["message"], "Invalid bullet list");
        assert_eq!(llm.prompt_count(), 0);
    }

    #[tokio::test]
    async fn test_match_keywords() {
        let llm = Arc::new(ScriptedLlm::replying([r#"["Docker", "docker", "Redux"]"#]));
        let body = json!({
            "structured": {"SKILLS": {"": ["React.js."]}},
            "jd": "React, Redux and Docker required."
        });
        let response = post_json(llm, "/api/match-keywords", body).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"missing": ["Docker", "Redux"]}));
    }

    #[tokio::test]
    async fn test_match_keywords_requires_job_description() {
        let body = json!({"structured": {"SKILLS": {"": ["Rust."]}}, "jd": "   "});
        let response = post_json(Arc::default(), "/api/match-keywords", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_match_keywords_unparsable_reply_is_bad_gateway() {
        let llm = Arc::new(ScriptedLlm::replying(["Docker, Redux"]));
        let body = json!({"structured": {"SKILLS": {"": ["Rust."]}}, "jd": "Docker"});
        let response = post_json(llm, "/api/match-keywords", body).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_linkedin_summary() {
        let llm = Arc::new(ScriptedLlm::replying(["\"I build reliable backends.\""]));
        let response = post_json(
            llm,
            "/api/generate-linkedin-summary",
            json!({"structured": {"SUMMARY": {"": ["Backend engineer."]}}}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"linkedin_summary": "I build reliable backends."})
        );
    }

    #[tokio::test]
    async fn test_linkedin_summary_requires_structured_resume() {
        let response = post_json(
            Arc::default(),
            "/api/generate-linkedin-summary",
            json!({"structured": {}}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_without_resume_field_is_rejected() {
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"other\"\r\n\
             \r\n\
             hello\r\n\
             --{boundary}--\r\n"
        );
        let llm: Arc<ScriptedLlm> = Arc::default();
        let response = build_router(test_state(llm.clone()))
            .oneshot(
                Request::post("/api/upload")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["message"], "No file uploaded");
        assert_eq!(llm.prompt_count(), 0);
    }
}
