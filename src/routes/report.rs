//! Report generation endpoint
//!
//! `POST` a `{ "companyData": [...] }` body and receive the paginated PDF.
//! Every other method is rejected before the body is read.
//!
//! The response is not sent page by page. `printpdf` only serialises a
//! finished document, so the whole PDF is built in memory on a blocking
//! thread and then streamed in fixed-size frames. A failed render never
//! leaves a truncated download behind.

use axum::{
    body::{Body, Bytes},
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::Response,
    routing::post,
    Json, Router,
};
use futures::stream;

use crate::error::{AppError, Result};
use crate::report::{ReportHeader, ReportRequest};
use crate::state::AppState;

/// Size of the frames the finished document is streamed in
const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// Create the report router
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(generate_report).fallback(method_not_allowed))
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Generate the service order report
async fn generate_report(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ReportRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let companies = request
        .into_companies()
        .ok_or_else(|| AppError::BadRequest("companyData is missing or empty".to_string()))?;

    let report = &state.config().report;
    let header = ReportHeader::new(report.organization.clone(), chrono::Local::now().date_naive());
    let backend = state.backend();
    let company_count = companies.len();

    let bytes = tokio::task::spawn_blocking(move || backend.render(&header, &companies))
        .await
        .map_err(|e| AppError::Internal(format!("Report worker failed: {}", e)))??;

    tracing::info!(
        companies = company_count,
        bytes = bytes.len(),
        "PDF File generated successfully"
    );

    document_response(bytes, state.backend().content_type(), &report.file_name)
}

/// Stream a finished document back as an attachment
fn document_response(bytes: Vec<u8>, content_type: &str, file_name: &str) -> Result<Response> {
    let len = bytes.len();
    let bytes = Bytes::from(bytes);
    let frames: Vec<std::result::Result<Bytes, std::io::Error>> = (0..len)
        .step_by(STREAM_CHUNK_SIZE)
        .map(|start| Ok(bytes.slice(start..(start + STREAM_CHUNK_SIZE).min(len))))
        .collect();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, len)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", file_name),
        )
        .body(Body::from_stream(stream::iter(frames)))
        .map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_document_response_headers() {
        let response = document_response(vec![b'%'; 10], "application/pdf", "Report.pdf").unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "10");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=Report.pdf"
        );
    }

    #[tokio::test]
    async fn test_document_response_streams_all_bytes() {
        let payload: Vec<u8> = (0..(STREAM_CHUNK_SIZE * 2 + 17)).map(|i| (i % 251) as u8).collect();
        let response = document_response(payload.clone(), "application/pdf", "Report.pdf").unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.as_ref(), payload.as_slice());
    }

    #[tokio::test]
    async fn test_finished_document_is_sent_in_fixed_frames() {
        use futures::StreamExt;

        let payload = vec![0u8; STREAM_CHUNK_SIZE * 2 + 17];
        let response = document_response(payload, "application/pdf", "Report.pdf").unwrap();

        let mut frames = response.into_body().into_data_stream();
        let mut sizes = Vec::new();
        while let Some(frame) = frames.next().await {
            sizes.push(frame.unwrap().len());
        }
        assert_eq!(sizes, vec![STREAM_CHUNK_SIZE, STREAM_CHUNK_SIZE, 17]);
    }
}
