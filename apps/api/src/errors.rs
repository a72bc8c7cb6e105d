use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractError;
use crate::llm_client::LlmError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("File size exceeds {} limit", size_label(.limit_bytes))]
    FileTooLarge { limit_bytes: usize },

    #[error("Could not extract text from resume")]
    EmptyResumeText,

    #[error(transparent)]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Whole MiB as "10MB", whole KiB as "512KB", otherwise the exact byte count.
fn size_label(bytes: &usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * KIB;
    match *bytes {
        b if b >= MIB && b % MIB == 0 => format!("{}MB", b / MIB),
        b if b >= KIB && b % KIB == 0 => format!("{}KB", b / KIB),
        b => format!("{b} bytes"),
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::FileTooLarge { .. } => (StatusCode::BAD_REQUEST, "FILE_TOO_LARGE"),
            AppError::EmptyResumeText => (StatusCode::BAD_REQUEST, "EMPTY_RESUME_TEXT"),
            AppError::Multipart(e) => (e.status(), "MULTIPART_ERROR"),
            AppError::Extract(ExtractError::UnsupportedFormat) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "UNSUPPORTED_FORMAT")
            }
            AppError::Extract(_) => (StatusCode::INTERNAL_SERVER_ERROR, "EXTRACT_ERROR"),
            AppError::Llm(LlmError::Secret(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SECRET_ERROR")
            }
            AppError::Llm(_) => (StatusCode::INTERNAL_SERVER_ERROR, "LLM_ERROR"),
            AppError::Render(_) => (StatusCode::INTERNAL_SERVER_ERROR, "RENDER_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match &self {
            AppError::Multipart(e) => e.body_text(),
            other => other.to_string(),
        };

        if status.is_server_error() {
            tracing::error!("Error processing resume ({code}): {self:?}");
        } else {
            tracing::warn!("Rejected request ({code}): {message}");
        }

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::SecretError;

    #[test]
    fn test_validation_branches_are_bad_request() {
        for err in [
            AppError::Validation("Resume file and job description are required".to_string()),
            AppError::FileTooLarge {
                limit_bytes: 10 * 1024 * 1024,
            },
            AppError::EmptyResumeText,
        ] {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_file_too_large_message_names_limit() {
        let err = AppError::FileTooLarge {
            limit_bytes: 10 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "File size exceeds 10MB limit");
    }

    #[test]
    fn test_file_too_large_message_for_uneven_limits() {
        let message = |limit_bytes| AppError::FileTooLarge { limit_bytes }.to_string();
        assert_eq!(message(512 * 1024), "File size exceeds 512KB limit");
        assert_eq!(message(1536 * 1024), "File size exceeds 1536KB limit");
        assert_eq!(message(16), "File size exceeds 16 bytes limit");
    }

    #[test]
    fn test_downstream_failures_are_server_errors() {
        for err in [
            AppError::Extract(ExtractError::UnsupportedFormat),
            AppError::Llm(LlmError::EmptyContent),
            AppError::Llm(LlmError::Secret(SecretError::Missing)),
            AppError::Internal(anyhow::anyhow!("worker panicked")),
        ] {
            assert_eq!(
                err.into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }

    #[test]
    fn test_downstream_message_is_surfaced() {
        let err = AppError::Llm(LlmError::Secret(SecretError::Missing));
        assert_eq!(err.to_string(), "OpenAI API key not found in Secrets Manager");
        assert_eq!(
            AppError::Extract(ExtractError::UnsupportedFormat).to_string(),
            "Unsupported file format"
        );
    }
}
