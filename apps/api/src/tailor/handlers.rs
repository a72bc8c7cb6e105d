//! Axum route handler for the tailoring API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::errors::AppError;
use crate::extract::{extract_text, ExtractError, ResumeFormat};
use crate::render::render_resume;
use crate::state::AppState;
use crate::tailor::tailor_resume;
use crate::tailor::upload::read_tailor_form;

pub const DOWNLOAD_DISPOSITION: &str = "attachment; filename=\"tailored-resume.pdf\"";

/// POST /api/tailor-resume
///
/// Multipart form: `resume` (PDF or DOCX file) and `jobDescription` (text).
/// Responds with the tailored resume as a PDF attachment.
pub async fn handle_tailor_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    info!("Tailor resume API called");

    let max_upload_bytes = state.config.max_upload_bytes;
    let request = read_tailor_form(multipart, max_upload_bytes)
        .await?
        .validate(max_upload_bytes)?;
    let resume = request.resume;

    info!(
        "Received resume {:?} ({} bytes, {:?})",
        resume.file_name,
        resume.bytes.len(),
        resume.content_type
    );

    let format = ResumeFormat::detect(resume.content_type.as_deref(), resume.file_name.as_deref())
        .ok_or(ExtractError::UnsupportedFormat)?;

    let bytes = resume.bytes;
    let resume_text = run_blocking(move || extract_text(format, &bytes)).await??;

    if resume_text.trim().is_empty() {
        return Err(AppError::EmptyResumeText);
    }
    info!("Extracted {} characters of resume text", resume_text.len());

    let tailored = tailor_resume(&state.llm, &resume_text, &request.job_description).await?;

    let pdf = run_blocking(move || render_resume(&tailored)).await??;
    info!("Rendered tailored resume ({} bytes)", pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, DOWNLOAD_DISPOSITION),
        ],
        pdf,
    )
        .into_response())
}

/// Runs CPU-bound work on the blocking pool. A panic inside `f` becomes an internal error.
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(anyhow::Error::new(e).context("Background task failed")))
}
