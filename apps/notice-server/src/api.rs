//! API handlers for the notice server

use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use notice_pdf::format::notice_file_name;
use notice_types::MeetingNoticeRequest;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::ServerError;
use crate::AppState;

/// Service banner
#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

/// Handler: GET /
pub async fn handle_root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Meeting Notice PDF Generator API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET|HEAD /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "meeting-notice-pdf-generator",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler: POST /meeting-notice/generate-pdf
///
/// The body is parsed by hand so malformed JSON and schema violations share
/// one error shape.
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ServerError> {
    let request = MeetingNoticeRequest::from_json_slice(&body).map_err(|e| {
        warn!("Rejected meeting notice request: {}", e);
        ServerError::from(e)
    })?;

    let meeting_id = request.meeting.id.clone();
    info!("Generating PDF for meeting ID: {}", meeting_id);

    let pdf = render_with_timeout(&state, request).await.map_err(|e| {
        error!("Error generating PDF for meeting ID {}: {}", meeting_id, e);
        e
    })?;

    info!(
        "PDF generated successfully for meeting ID: {} ({} bytes)",
        meeting_id,
        pdf.len()
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", notice_file_name(&meeting_id)),
            ),
        ],
        pdf,
    )
        .into_response())
}

async fn render_with_timeout(
    state: &AppState,
    request: MeetingNoticeRequest,
) -> Result<Vec<u8>, ServerError> {
    let renderer = state.renderer.clone();
    let result = tokio::time::timeout(
        Duration::from_millis(state.timeout_ms),
        tokio::task::spawn_blocking(move || renderer.render(&request)),
    )
    .await;

    match result {
        Ok(Ok(rendered)) => Ok(rendered?),
        Ok(Err(join_error)) => Err(ServerError::Internal(format!(
            "Render task panicked: {}",
            join_error
        ))),
        Err(_timeout) => Err(ServerError::Timeout(state.timeout_ms)),
    }
}
