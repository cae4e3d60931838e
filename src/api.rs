//! HTTP front end for the analyzer.
//!
//! Every analysis endpoint answers 200 with an `AnalysisResult`; failures are
//! reported inside the result, never as an HTTP error.

use crate::analyzer::EmailAnalyzer;
use crate::config::ApiConfig;
use crate::ingest::UploadedFile;
use crate::result::{AnalysisResult, CONTENT_ERROR_SUMMARY, FILE_ERROR_PREFIX, NO_FILE_SUMMARY};
use axum::{
    body::Bytes,
    extract::{
        multipart::MultipartRejection, rejection::BytesRejection, DefaultBodyLimit, Multipart,
        State,
    },
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Multipart field carrying the uploaded email
pub const UPLOAD_FIELD: &str = "emailFile";

#[derive(Clone)]
pub struct ApiState {
    pub analyzer: Arc<EmailAnalyzer>,
}

impl ApiState {
    pub fn new(analyzer: EmailAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn create_router(state: ApiState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/v1/analyze/email-content", post(analyze_email_content))
        .route("/api/v1/analyze/email", post(analyze_email_file))
        .route("/api/v1/health", get(health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

pub async fn run_api_server(config: &ApiConfig, state: ApiState) -> anyhow::Result<()> {
    let addr = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("Analysis API listening on http://{}", addr);
    log::info!("Upload limit: {} bytes", config.max_upload_bytes);

    let router = create_router(state, config.max_upload_bytes);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Analysis API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Received shutdown signal, draining connections...");
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn analyze_email_content(
    State(state): State<ApiState>,
    body: Result<Bytes, BytesRejection>,
) -> Json<AnalysisResult> {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            log::warn!("Rejected content request: {}", e);
            return Json(AnalysisResult::error(CONTENT_ERROR_SUMMARY));
        }
    };

    let content = String::from_utf8_lossy(&body).into_owned();
    let analyzer = state.analyzer.clone();

    let result = run_blocking(
        move || analyzer.analyze_email_content(content.as_str()),
        |_| CONTENT_ERROR_SUMMARY.to_string(),
    )
    .await;
    Json(result)
}

async fn analyze_email_file(
    State(state): State<ApiState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Json<AnalysisResult> {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(e) => {
            log::warn!("Rejected upload request: {}", e);
            return Json(AnalysisResult::error(NO_FILE_SUMMARY));
        }
    };

    let upload = match read_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err(e) => {
            log::error!("Failed to read upload: {}", e);
            return Json(AnalysisResult::error(format!("{}{}", FILE_ERROR_PREFIX, e)));
        }
    };

    let analyzer = state.analyzer.clone();
    let result = run_blocking(
        move || analyzer.analyze_email(upload.as_ref()),
        |detail| format!("{}{}", FILE_ERROR_PREFIX, detail),
    )
    .await;
    Json(result)
}

/// First `emailFile` field of the form, if any
async fn read_upload(
    multipart: &mut Multipart,
) -> Result<Option<UploadedFile>, axum::extract::multipart::MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?;
        return Ok(Some(UploadedFile::new(filename, bytes.to_vec())));
    }

    Ok(None)
}

/// Analysis is CPU-bound (PDF parsing in particular), so keep it off the async workers
async fn run_blocking<F, M>(analyze: F, on_failure: M) -> AnalysisResult
where
    F: FnOnce() -> AnalysisResult + Send + 'static,
    M: FnOnce(String) -> String,
{
    match tokio::task::spawn_blocking(analyze).await {
        Ok(result) => result,
        Err(e) => {
            log::error!("Analysis task failed: {}", e);
            AnalysisResult::error(on_failure(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    const BOUNDARY: &str = "phishhawk-test-boundary";

    fn app() -> Router {
        create_router(ApiState::new(EmailAnalyzer::new()), 1024 * 1024)
    }

    async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>) {
        send_to(app(), request).await
    }

    async fn send_to(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    fn multipart_body(field: &str, filename: &str, content: &str) -> String {
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n{content}\r\n--{b}--\r\n",
            b = BOUNDARY
        )
    }

    fn upload_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/analyze/email")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_analyze_text_endpoint() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analyze/email-content")
            .header("content-type", "text/plain")
            .body(Body::from(
                "From: a@x.com\nReturn-Path: <b@y.com>\n\nClick here: https://x.com/offer",
            ))
            .unwrap();

        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["fromHeader"], "a@x.com");
        assert_eq!(json["returnPathHeader"], "<b@y.com>");
        assert_eq!(json["suspicious"], true);
        assert_eq!(json["foundUrls"][0], "https://x.com/offer");
        let summary = json["analysisSummary"].as_str().unwrap();
        assert!(summary.contains("Header spoofing detected."));
        assert!(summary.contains("click here"));
    }

    #[tokio::test]
    async fn test_empty_text_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analyze/email-content")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        let result: AnalysisResult = serde_json::from_slice(&body).unwrap();
        assert!(result.suspicious);
        assert_eq!(result.analysis_summary, "Error: No content provided.");
        assert!(result.found_urls.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_text_body() {
        let app = create_router(ApiState::new(EmailAnalyzer::new()), 16);
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analyze/email-content")
            .header("content-type", "text/plain")
            .body(Body::from("From: a@x.com\nthis body is well past sixteen bytes"))
            .unwrap();

        let (status, body) = send_to(app, request).await;
        assert_eq!(status, StatusCode::OK);
        let result: AnalysisResult = serde_json::from_slice(&body).unwrap();
        assert!(result.suspicious);
        assert_eq!(result.analysis_summary, "Error processing content.");
        assert_eq!(result.from_header, "Not Found");
    }

    #[tokio::test]
    async fn test_file_upload() {
        let body = multipart_body(
            UPLOAD_FIELD,
            "mail.eml",
            "From: promo@casino.example\r\nWin the JACKPOT with free spins",
        );

        let (status, body) = send(upload_request(body)).await;
        assert_eq!(status, StatusCode::OK);
        let result: AnalysisResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.from_header, "promo@casino.example");
        assert_eq!(
            result.analysis_summary,
            "Suspicious Content: Found common scam phrases: free spins, jackpot"
        );
    }

    #[tokio::test]
    async fn test_upload_without_file_field() {
        let body = multipart_body("somethingElse", "mail.eml", "From: a@x.com");
        let (status, body) = send(upload_request(body)).await;
        assert_eq!(status, StatusCode::OK);
        let result: AnalysisResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.analysis_summary, "Error: No file was provided.");
    }

    #[tokio::test]
    async fn test_upload_without_multipart_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analyze/email")
            .header("content-type", "text/plain")
            .body(Body::from("From: a@x.com"))
            .unwrap();

        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        let result: AnalysisResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.analysis_summary, "Error: No file was provided.");
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/api/v1/health")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }
}
