pub mod auth;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // AI API (requires X-API-Key)
    let ai = Router::new()
        .route("/ocr-resume", post(handlers::handle_ocr_resume))
        .route(
            "/classify-portfolio",
            post(handlers::handle_classify_portfolio),
        )
        .route("/match-summary", post(handlers::handle_match_summary))
        .route("/models", get(handlers::handle_list_models))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/", get(health::info_handler))
        .route("/health", get(health::health_handler))
        .nest("/api/v1/ai", ai)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::pipeline::Pipeline;
    use crate::config::Config;
    use crate::extraction::{ImageCrateDecoder, LocalTextExtractor, TesseractOcr};

    const BOUNDARY: &str = "X-CANDIDATE-AI-BOUNDARY";

    fn app() -> Router {
        app_with(Config::for_tests())
    }

    fn app_with(config: Config) -> Router {
        let pipeline = Pipeline::new(
            Arc::new(LocalTextExtractor::new(TesseractOcr::new("tesseract", "eng"))),
            Arc::new(ImageCrateDecoder),
        );
        build_router(AppState {
            config,
            pipeline: Arc::new(pipeline),
        })
    }

    fn multipart_body(field: &str, file_name: &str, content: &[u8]) -> Body {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        Body::from(body)
    }

    fn upload(uri: &str, field: &str, file_name: &str, content: &[u8]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("x-api-key", "test-key")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(multipart_body(field, file_name, content))
            .unwrap()
    }

    fn json_post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("x-api-key", "test-key")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image::RgbImage::new(width, height)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[tokio::test]
    async fn test_health_needs_no_key() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_unauthorized() {
        let response = app()
            .oneshot(Request::get("/api/v1/ai/models").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(read_json(response).await["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_wrong_api_key_is_unauthorized() {
        let request = Request::get("/api/v1/ai/models")
            .header("X-API-Key", "nope")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_models_listed() {
        let request = Request::get("/api/v1/ai/models")
            .header("X-API-Key", "test-key")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(3));
        assert_eq!(body[0]["type"], "OCR");
    }

    #[tokio::test]
    async fn test_match_summary_identical_texts() {
        let text = "Backend engineer building Rust services on Kubernetes";
        let response = app()
            .oneshot(json_post(
                "/api/v1/ai/match-summary",
                json!({ "candidateId": "42", "resumeText": text, "jobDescription": text }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body["compatibilityScore"], 100);
        assert!(!body["relevantFeatures"].as_array().unwrap().is_empty());
        assert_eq!(body["suggestions"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_match_summary_requires_resume_text() {
        let response = app()
            .oneshot(json_post(
                "/api/v1/ai/match-summary",
                json!({ "jobDescription": "Rust engineer" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_ocr_resume_plain_text_upload() {
        let resume = b"Joao Souza\nEmail: joao@example.com\nWork experience with Python and SQL";
        let response = app()
            .oneshot(upload("/api/v1/ai/ocr-resume", "file", "cv.txt", resume))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body["sourceFormat"], "plain-text");
        assert_eq!(body["fields"]["name"]["value"], "Joao Souza");
        assert_eq!(body["fields"]["email"]["value"], "joao@example.com");
        assert_eq!(body["fields"]["email"]["confidence"], 0.99);
        assert_eq!(body["classification"]["hasExperience"], true);
        assert_eq!(body["degraded"], false);
    }

    #[tokio::test]
    async fn test_ocr_resume_unreadable_pdf_degrades() {
        let response = app()
            .oneshot(upload("/api/v1/ai/ocr-resume", "file", "cv.pdf", b"not really a pdf"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["degraded"], true);
    }

    #[tokio::test]
    async fn test_ocr_resume_rejects_unknown_extension() {
        let response = app()
            .oneshot(upload("/api/v1/ai/ocr-resume", "file", "cv.docx", b"PK\x03\x04"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_ocr_resume_requires_file_field() {
        let response = app()
            .oneshot(upload("/api/v1/ai/ocr-resume", "attachment", "cv.txt", b"hello"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_ocr_resume_rejects_empty_file() {
        let response = app()
            .oneshot(upload("/api/v1/ai/ocr-resume", "file", "cv.txt", b""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_upload_is_payload_too_large() {
        let config = Config {
            max_upload_bytes: 1024,
            ..Config::for_tests()
        };
        let resume = "Python developer with SQL experience\n".repeat(200);
        let response = app_with(config)
            .oneshot(upload("/api/v1/ai/ocr-resume", "file", "cv.txt", resume.as_bytes()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_classify_portfolio_png() {
        let response = app()
            .oneshot(upload(
                "/api/v1/ai/classify-portfolio",
                "file",
                "certificate.png",
                &png(500, 400),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        let names: Vec<_> = body["detectedObjects"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Logo", "Certificate"]);
        assert_eq!(body["degraded"], false);
    }

    #[tokio::test]
    async fn test_classify_portfolio_small_png_is_document() {
        let response = app()
            .oneshot(upload(
                "/api/v1/ai/classify-portfolio",
                "file",
                "badge.png",
                &png(50, 50),
            ))
            .await
            .unwrap();
        let body = read_json(response).await;
        assert_eq!(body["detectedObjects"][0]["name"], "Document");
        assert_eq!(body["detectedObjects"].as_array().unwrap().len(), 1);
    }
}
