//! Plain-text extraction from uploaded resumes (PDF or DOCX).
//!
//! Extraction is synchronous and CPU-bound; handlers call it through
//! `spawn_blocking`.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Main body part inside a WordprocessingML package.
const DOCX_BODY_PART: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format")]
    UnsupportedFormat,

    #[error("Failed to read PDF: {0}")]
    Pdf(String),

    #[error("Failed to open DOCX archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Failed to parse DOCX body: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Failed to read DOCX body: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
}

impl ResumeFormat {
    /// Chooses a format from the declared MIME type, falling back to the file extension.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());
        let name = file_name.map(str::to_ascii_lowercase);
        let has_ext = |ext: &str| name.as_deref().is_some_and(|n| n.ends_with(ext));

        if mime.as_deref() == Some(PDF_MIME) || has_ext(".pdf") {
            Some(ResumeFormat::Pdf)
        } else if mime.as_deref() == Some(DOCX_MIME) || has_ext(".docx") {
            Some(ResumeFormat::Docx)
        } else {
            None
        }
    }
}

/// Extracts plain text from the document bytes.
pub fn extract_text(format: ResumeFormat, bytes: &[u8]) -> Result<String, ExtractError> {
    match format {
        ResumeFormat::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
        }
        ResumeFormat::Docx => extract_docx_text(bytes),
    }
}

/// Reads run text from `word/document.xml`.
///
/// Paragraph ends and explicit breaks become newlines and tabs inside a run
/// become `\t`. Tab stops declared in paragraph properties are not tabs.
/// Only `w:t` run text is collected, so field codes and deleted text are skipped.
fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCX_BODY_PART)?.read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_run_text = false;
    let mut run_depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"r" => run_depth += 1,
                b"t" => in_run_text = true,
                b"tab" if run_depth > 0 => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" if run_depth > 0 => text.push('\t'),
                b"br" | b"cr" | b"p" => text.push('\n'),
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_run_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_run_text => text.push_str(&e.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

/// Builds a minimal DOCX package with one paragraph per entry.
#[cfg(test)]
pub(crate) fn docx_fixture(paragraphs: &[&str]) -> Vec<u8> {
    use std::io::Write;

    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>"))
        .collect();
    let document = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    );

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file(DOCX_BODY_PART, zip::write::SimpleFileOptions::default())
        .unwrap();
    zip.write_all(document.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_mime_type() {
        assert_eq!(
            ResumeFormat::detect(Some("application/pdf"), Some("upload")),
            Some(ResumeFormat::Pdf)
        );
        assert_eq!(
            ResumeFormat::detect(Some(DOCX_MIME), None),
            Some(ResumeFormat::Docx)
        );
    }

    #[test]
    fn test_detect_by_extension_when_mime_is_generic() {
        assert_eq!(
            ResumeFormat::detect(Some("application/octet-stream"), Some("Resume.PDF")),
            Some(ResumeFormat::Pdf)
        );
        assert_eq!(
            ResumeFormat::detect(None, Some("cv.docx")),
            Some(ResumeFormat::Docx)
        );
    }

    #[test]
    fn test_detect_rejects_other_types() {
        assert_eq!(ResumeFormat::detect(Some("text/plain"), Some("cv.txt")), None);
        assert_eq!(ResumeFormat::detect(Some("application/msword"), Some("cv.doc")), None);
        assert_eq!(ResumeFormat::detect(None, None), None);
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let bytes = docx_fixture(&["Jane Doe", "Senior Engineer &amp; Mentor"]);
        let text = extract_text(ResumeFormat::Docx, &bytes).unwrap();
        assert_eq!(text, "Jane Doe\nSenior Engineer & Mentor\n");
    }

    #[test]
    fn test_docx_tabs_and_breaks() {
        let xml = "<w:document xmlns:w=\"w\"><w:body><w:p>\
                   <w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t></w:r>\
                   <w:r><w:instrText>PAGE</w:instrText></w:r>\
                   </w:p></w:body></w:document>";
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file(DOCX_BODY_PART, zip::write::SimpleFileOptions::default())
            .unwrap();
        std::io::Write::write_all(&mut zip, xml.as_bytes()).unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let text = extract_text(ResumeFormat::Docx, &bytes).unwrap();
        assert_eq!(text, "A\tB\nC\n");
    }

    #[test]
    fn test_docx_tab_stops_are_not_text() {
        let xml = "<w:document xmlns:w=\"w\"><w:body><w:p>\
                   <w:pPr><w:tabs><w:tab w:val=\"right\" w:pos=\"9360\"/>\
                   <w:tab w:val=\"left\" w:pos=\"720\"/></w:tabs></w:pPr>\
                   <w:r><w:t>Engineer</w:t><w:tab/><w:t>2020</w:t></w:r>\
                   </w:p></w:body></w:document>";
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file(DOCX_BODY_PART, zip::write::SimpleFileOptions::default())
            .unwrap();
        std::io::Write::write_all(&mut zip, xml.as_bytes()).unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let text = extract_text(ResumeFormat::Docx, &bytes).unwrap();
        assert_eq!(text, "Engineer\t2020\n");
    }

    #[test]
    fn test_docx_without_body_part_is_error() {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("other.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        assert!(matches!(
            extract_text(ResumeFormat::Docx, &bytes),
            Err(ExtractError::Archive(_))
        ));
    }

    #[test]
    fn test_garbage_docx_is_error() {
        assert!(extract_text(ResumeFormat::Docx, b"not a zip").is_err());
    }

    #[test]
    fn test_pdf_text_round_trips_through_renderer() {
        let resume = crate::models::resume::Resume {
            name: Some("Jane Doe".to_string()),
            ..Default::default()
        };
        let pdf = crate::render::render_resume(&resume).unwrap();
        let text = extract_text(ResumeFormat::Pdf, &pdf).unwrap();
        assert!(text.contains("Jane Doe"), "extracted: {text:?}");
    }
}
