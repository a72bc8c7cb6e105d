// Resume PDF renderer.
// Layout is computed as a list of draw ops first, then serialized with lopdf.
// Rendering is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod layout;
pub mod pdf;
pub mod wrap;

use thiserror::Error;

use crate::models::resume::Resume;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders the tailored resume to PDF bytes (US Letter, single page).
pub fn render_resume(resume: &Resume) -> Result<Vec<u8>, RenderError> {
    let ops = layout::layout_resume(resume);
    pdf::write_pdf(&ops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Experience, Skills};

    #[test]
    fn test_rendered_resume_is_readable_pdf() {
        let resume = Resume {
            name: Some("Jane Doe".to_string()),
            experience: vec![Experience {
                title: Some("Platform Engineer".to_string()),
                company: Some("Acme".to_string()),
                bullets: vec!["Cut deploy times by 60% with incremental builds".to_string()],
                ..Experience::default()
            }],
            skills: Some(Skills::List(vec!["Rust".to_string(), "Kubernetes".to_string()])),
            ..Resume::default()
        };

        let bytes = render_resume(&resume).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);

        let text = pdf_extract::extract_text_from_mem(&bytes).unwrap();
        assert!(text.contains("EXPERIENCE"), "extracted: {text}");
        assert!(text.contains("Platform Engineer"), "extracted: {text}");
    }
}
