//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::PipelineError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Upload form problems answered with a bare text body and status 200,
/// the way the upload page has always reported them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadRejection {
    /// The request carried no `file` part
    NoFilePart,
    /// The `file` part had an empty file name
    NoSelectedFile,
}

impl UploadRejection {
    pub fn message(&self) -> &'static str {
        match self {
            UploadRejection::NoFilePart => "No file part",
            UploadRejection::NoSelectedFile => "No selected file",
        }
    }
}

impl IntoResponse for UploadRejection {
    fn into_response(self) -> Response {
        (StatusCode::OK, self.message()).into_response()
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (malformed multipart body)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Failure inside the forecast pipeline
    Pipeline(PipelineError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg)),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Pipeline(PipelineError::Ingest(e)) if e.is_unreadable() => (
                StatusCode::BAD_REQUEST,
                ApiError::new("UNREADABLE_UPLOAD", "Uploaded file could not be read")
                    .with_details(e.to_string()),
            ),
            AppError::Pipeline(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("PIPELINE_ERROR", e.to_string()),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        AppError::Pipeline(err)
    }
}
