//! Multipart form parsing and input validation for the tailoring endpoint.

use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::StatusCode,
};
use bytes::Bytes;

use crate::errors::AppError;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "jobDescription";

#[derive(Debug)]
pub struct ResumeFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Raw form fields as received; either may be missing.
#[derive(Debug, Default)]
pub struct TailorForm {
    pub resume: Option<ResumeFile>,
    pub job_description: Option<String>,
}

/// A form that passed validation.
#[derive(Debug)]
pub struct TailorRequest {
    pub resume: ResumeFile,
    pub job_description: String,
}

/// Reads the known fields and ignores the rest.
///
/// A body cut off by the route's size limit is reported as an oversized file,
/// the same as a file that arrived whole but exceeds `max_upload_bytes`.
pub async fn read_tailor_form(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<TailorForm, AppError> {
    let oversized = |e: MultipartError| too_large(e, max_upload_bytes);
    let mut form = TailorForm::default();

    while let Some(field) = multipart.next_field().await.map_err(oversized)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let file_name = field.file_name().map(str::to_owned);
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field.bytes().await.map_err(oversized)?;
                form.resume = Some(ResumeFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                form.job_description = Some(field.text().await.map_err(oversized)?);
            }
            _ => {}
        }
    }

    Ok(form)
}

fn too_large(err: MultipartError, limit_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge { limit_bytes }
    } else {
        AppError::Multipart(err)
    }
}

impl TailorForm {
    /// Checks required fields and the upload ceiling.
    ///
    /// A file part with no name and no content is what browsers send for an
    /// empty file input, so it counts as missing.
    pub fn validate(self, max_upload_bytes: usize) -> Result<TailorRequest, AppError> {
        let resume = self.resume.filter(|f| {
            !f.bytes.is_empty() || f.file_name.as_deref().is_some_and(|n| !n.is_empty())
        });
        let job_description = self.job_description.filter(|jd| !jd.trim().is_empty());

        let (Some(resume), Some(job_description)) = (resume, job_description) else {
            return Err(AppError::Validation(
                "Resume file and job description are required".to_string(),
            ));
        };

        if resume.bytes.len() > max_upload_bytes {
            return Err(AppError::FileTooLarge {
                limit_bytes: max_upload_bytes,
            });
        }

        Ok(TailorRequest {
            resume,
            job_description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(bytes: &'static [u8]) -> ResumeFile {
        ResumeFile {
            file_name: Some("cv.pdf".to_string()),
            content_type: Some("application/pdf".to_string()),
            bytes: Bytes::from_static(bytes),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let form = TailorForm {
            resume: Some(file(b"%PDF")),
            job_description: Some("Rust engineer".to_string()),
        };
        let request = form.validate(1024).unwrap();
        assert_eq!(request.job_description, "Rust engineer");
        assert_eq!(request.resume.bytes.len(), 4);
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        for form in [
            TailorForm {
                resume: None,
                job_description: Some("jd".to_string()),
            },
            TailorForm {
                resume: Some(file(b"%PDF")),
                job_description: None,
            },
            TailorForm {
                resume: Some(file(b"%PDF")),
                job_description: Some("   ".to_string()),
            },
        ] {
            assert!(matches!(form.validate(1024), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn test_empty_file_input_counts_as_missing() {
        let form = TailorForm {
            resume: Some(ResumeFile {
                file_name: Some(String::new()),
                content_type: Some("application/octet-stream".to_string()),
                bytes: Bytes::new(),
            }),
            job_description: Some("jd".to_string()),
        };
        assert!(matches!(form.validate(1024), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_file_at_limit_passes_and_above_fails() {
        let at_limit = TailorForm {
            resume: Some(file(b"12345678")),
            job_description: Some("jd".to_string()),
        };
        assert!(at_limit.validate(8).is_ok());

        let over = TailorForm {
            resume: Some(file(b"123456789")),
            job_description: Some("jd".to_string()),
        };
        assert!(matches!(
            over.validate(8),
            Err(AppError::FileTooLarge { limit_bytes: 8 })
        ));
    }
}
