//! Report document route handler.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use rdoc_core::{RdocError, RdocResult, ReportRequest};
use serde::Serialize;
use tracing::{error, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

use crate::state::AppState;

/// Successful response body.
#[derive(Debug, Serialize)]
pub struct DocResponse {
    #[serde(rename = "docUrl")]
    pub doc_url: String,
}

/// Failure response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Render the posted report into a Word document.
///
/// The body is read raw so malformed JSON, and a body over the size cap, get
/// the same error shape as any other failure.
pub async fn create_report_doc(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let span = info_span!("create_report_doc", request_id = %Uuid::new_v4());

    async move {
        match generate(&state, body).await {
            Ok(doc_url) => {
                info!(size = doc_url.len(), "Report document generated");
                (StatusCode::OK, Json(DocResponse { doc_url })).into_response()
            }
            Err(e) => {
                if e.is_input_error() {
                    warn!(error = %e, "Rejected report request");
                } else {
                    error!(error = %e, "Error in create-report-doc");
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { error: e.to_string() }),
                )
                    .into_response()
            }
        }
    }
    .instrument(span)
    .await
}

async fn generate(state: &AppState, body: Result<Bytes, BytesRejection>) -> RdocResult<String> {
    let body = body.map_err(|rejection| RdocError::invalid_input(rejection.body_text()))?;
    let request = ReportRequest::from_slice(&body)?;
    let formatter = state.formatter.clone();
    let generated_on = Local::now().date_naive();
    let span = Span::current();

    tokio::task::spawn_blocking(move || span.in_scope(|| formatter.generate(&request, generated_on)))
        .await
        .map_err(|e| RdocError::processing(format!("render task failed: {}", e)))?
}
