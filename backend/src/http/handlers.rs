//! HTTP handlers for the upload and report pages.
//!
//! Each handler corresponds to an endpoint and delegates to the service layer
//! for the actual work.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use super::dto::HealthResponse;
use super::error::{AppError, UploadRejection};
use super::state::AppState;
use crate::services::{self, UPLOAD_PAGE};

/// Multipart field carrying the spreadsheet.
pub const FILE_FIELD: &str = "file";

/// GET /
///
/// Upload form.
pub async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_PAGE)
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.config.forecast.model.to_string(),
    })
}

/// The `file` part of an upload: `None` when absent, otherwise its file name
/// (empty when the browser sent no file) and contents.
async fn read_file_part(multipart: &mut Multipart) -> Result<Option<(String, Bytes)>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        // A plain form value named `file` is not a file part.
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        return Ok(Some((file_name, data)));
    }
    Ok(None)
}

/// POST /visualize
///
/// Run the forecast pipeline on the uploaded spreadsheet and return the
/// report page. Missing uploads are answered with a plain-text message.
pub async fn visualize(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let upload = match multipart {
        Ok(mut multipart) => read_file_part(&mut multipart).await?,
        Err(rejection) => {
            warn!("Request to /visualize is not a multipart upload: {}", rejection);
            None
        }
    };

    let Some((file_name, data)) = upload else {
        warn!("Upload rejected: no file part");
        return Ok(UploadRejection::NoFilePart.into_response());
    };
    if file_name.is_empty() {
        warn!("Upload rejected: empty file name");
        return Ok(UploadRejection::NoSelectedFile.into_response());
    }

    info!("Received upload '{}' ({} bytes)", file_name, data.len());

    let settings = state.settings.clone();
    let html = tokio::task::spawn_blocking(move || services::visualize(&file_name, &data, &settings))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(|e| {
            warn!("Forecast pipeline failed: {}", e);
            AppError::from(e)
        })?;

    Ok(Html(html).into_response())
}
