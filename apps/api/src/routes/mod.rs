pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ats::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // ATS API
        .route("/api/v1/ats/score", post(handlers::handle_score))
        .route("/api/v1/ats/upload", post(handlers::handle_upload))
        .route("/api/v1/ats/vocabulary", get(handlers::handle_vocabulary))
        .layer(DefaultBodyLimit::max(upload_limit))
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
    use crate::ats::docx::fixtures::build_docx;
    use crate::ats::engine::AtsEngine;
    use crate::ats::vocabulary::{ScoringSettings, Vocabulary};
    use crate::config::Config;

    const BOUNDARY: &str = "ats-test-boundary";

    fn app_with_limit(max_upload_bytes: usize) -> Router {
        let engine = AtsEngine::new(Vocabulary::default(), ScoringSettings::default()).unwrap();
        build_router(AppState {
            config: Config {
                port: 0,
                rust_log: "debug".to_string(),
                max_upload_bytes,
                scoring: ScoringSettings::default(),
            },
            engine: Arc::new(engine),
        })
    }

    fn app() -> Router {
        app_with_limit(1024 * 1024)
    }

    async fn read_json(response: Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn json_request(uri: &str, payload: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body: Vec<u8> = Vec::new();
        for (name, filename, content) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            let disposition = match filename {
                Some(filename) => format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                ),
                None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"),
            };
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::post("/api/v1/ats/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "ats-api");
    }

    #[tokio::test]
    async fn test_score_returns_report() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/ats/score",
                json!({
                    "resume_text": "Developed and implemented a new system, increased revenue by 20%",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["categories"]["formatting"]["score"], 70);
        assert_eq!(body["categories"]["tailoring"]["score"], 75);
        assert_eq!(body["categories"]["tailoring"]["checks"][0]["status"], "pass");
        assert!(body["total_score"].as_u64().unwrap() <= 100);
        assert!(body["improvements"].as_array().is_some());
    }

    #[tokio::test]
    async fn test_score_accepts_extractor_fragment_keys() {
        let fragments: Vec<Value> = (0..12)
            .map(|_| json!({"text": "line", "x": 72, "y": 700, "size": 11, "font": "Arial"}))
            .collect();
        let response = app()
            .oneshot(json_request(
                "/api/v1/ats/score",
                json!({
                    "resume_text": "Experience Education Skills Summary",
                    "job_description": "Rust engineer",
                    "structure_data": fragments,
                }),
            ))
            .await
            .unwrap();
        let body = read_json(response).await;
        assert_eq!(body["categories"]["formatting"]["score"], 100);
        assert_eq!(body["categories"]["sections"]["score"], 100);
        assert_eq!(body["missing_keywords"], json!(["engineer", "rust"]));
    }

    #[tokio::test]
    async fn test_score_rejects_blank_resume() {
        let response = app()
            .oneshot(json_request("/api/v1/ats/score", json!({"resume_text": "   "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_plain_text_resume() {
        let response = app()
            .oneshot(multipart_request(&[
                (
                    "resume_file",
                    Some("resume.txt"),
                    b"SUMMARY\nEngineer. EXPERIENCE\nLed and built a python platform.",
                ),
                ("job_desc", None, b"Python developer"),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["categories"]["layout"]["score"], 70);
        assert_eq!(body["categories"]["tailoring"]["score"], 50);
        assert_eq!(body["missing_keywords"], json!(["developer"]));
    }

    #[tokio::test]
    async fn test_upload_docx_resume() {
        let docx = build_docx(concat!(
            r#"<w:p><w:r><w:rPr><w:rFonts w:ascii="Calibri"/><w:sz w:val="24"/></w:rPr><w:t>SUMMARY</w:t></w:r></w:p>"#,
            r#"<w:p/>"#,
            r#"<w:p><w:r><w:t>Led and built a python platform.</w:t></w:r></w:p>"#,
        ));
        let response = app()
            .oneshot(multipart_request(&[
                ("resume_file", Some("resume.docx"), docx.as_slice()),
                ("job_desc", None, b"Python developer"),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        // Fragments exist, so no fallback scores; none are placed, so no column checks.
        assert_eq!(body["categories"]["formatting"]["score"], 100);
        assert_eq!(body["categories"]["layout"]["score"], 100);
        assert_eq!(body["categories"]["layout"]["checks"], json!([]));
        assert_eq!(body["categories"]["tailoring"]["score"], 50);
        assert_eq!(body["missing_keywords"], json!(["developer"]));
    }

    #[tokio::test]
    async fn test_upload_corrupt_docx_is_unprocessable() {
        let response = app()
            .oneshot(multipart_request(&[(
                "resume_file",
                Some("resume.docx"),
                b"not really a zip archive",
            )]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "EXTRACTION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_unsupported_format() {
        let response = app()
            .oneshot(multipart_request(&[(
                "resume_file",
                Some("resume.odt"),
                b"PK binary",
            )]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body = read_json(response).await;
        assert_eq!(body["error"]["message"], "Unsupported format.");
    }

    #[tokio::test]
    async fn test_upload_without_file_is_rejected() {
        let response = app()
            .oneshot(multipart_request(&[("job_desc", None, b"Rust")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_blank_text_file_is_unprocessable() {
        let response = app()
            .oneshot(multipart_request(&[("resume_file", Some("resume.txt"), b"  \n ")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_rejected() {
        let big = "word ".repeat(400);
        let response = app_with_limit(256)
            .oneshot(multipart_request(&[("resume_file", Some("resume.txt"), big.as_bytes())]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_vocabulary_endpoint() {
        let response = app()
            .oneshot(Request::get("/api/v1/ats/vocabulary").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["settings"]["page_width_estimate"], 600.0);
        assert_eq!(body["vocabulary"]["sections"].as_array().unwrap().len(), 4);
    }
}
