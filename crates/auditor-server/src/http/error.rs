//! HTTP error responses.
//!
//! Handlers return `Result<_, ApiError>`. Client mistakes are answered with a
//! specific message; pipeline failures are logged with full detail and
//! answered with a generic message that never carries filesystem paths.

use auditor_core::AuditError;
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;
use tokio::task::JoinError;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable description.
    pub message: String,
}

/// Failure of an API request.
#[derive(Debug)]
pub enum ApiError {
    /// The multipart body had no `repo` field.
    MissingUpload,

    /// The `repo` field was sent more than once.
    DuplicateUpload,

    /// The multipart body could not be read.
    Multipart(MultipartError),

    /// A JSON request body was malformed.
    InvalidBody(String),

    /// Extraction of an upload failed.
    Upload(AuditError),

    /// A scan or its advisor failed.
    Scan(AuditError),

    /// A blocking task panicked or was cancelled.
    Task(JoinError),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingUpload | Self::DuplicateUpload | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Multipart(err) => err.status(),
            Self::Upload(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Scan(err) => match err {
                AuditError::InvalidRepositoryName { .. } => StatusCode::BAD_REQUEST,
                AuditError::RepositoryNotFound { .. } => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Message sent to the client.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::MissingUpload => "No file uploaded".to_string(),
            Self::DuplicateUpload => "Only one file may be uploaded in field 'repo'".to_string(),
            Self::Multipart(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                "Upload too large".to_string()
            }
            Self::Multipart(_) => "Malformed upload".to_string(),
            Self::InvalidBody(message) => message.clone(),
            Self::Upload(_) => "Upload failed".to_string(),
            Self::Scan(err) if err.is_client_error() => err.to_string(),
            Self::Scan(_) | Self::Task(_) => "Scan failed".to_string(),
        }
    }

    fn log(&self, status: StatusCode) {
        match self {
            Self::Upload(err) | Self::Scan(err) if status.is_server_error() => {
                tracing::error!(
                    error = %err,
                    code = err.code(),
                    security = err.is_security_violation(),
                    "request failed"
                );
            }
            Self::Task(err) => {
                tracing::error!(error = %err, "blocking task failed");
            }
            Self::Multipart(err) => {
                tracing::warn!(error = %err.body_text(), "rejected multipart body");
            }
            _ => {
                tracing::debug!(status = status.as_u16(), message = %self.client_message(), "client error");
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        self.log(status);

        let body = ErrorResponse {
            message: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}
