//! Text extraction: raw document bytes + declared media type -> plain text.
//!
//! Dispatch is by the client-declared MIME type only; bytes are never sniffed.
//! A mislabeled upload takes the path its label claims and fails there.

use thiserror::Error;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DOC_MIME: &str = "application/msword";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Word document extraction failed: {0}")]
    Docx(String),

    #[error("file is not valid UTF-8 text: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Converts document bytes into plain text according to the declared media
/// type. Anything that is not a PDF or Word type falls through to the UTF-8
/// passthrough path. Pure over its inputs; always a string (possibly empty)
/// or an [`ExtractionError`].
pub fn extract_text(data: &[u8], media_type: &str) -> Result<String, ExtractionError> {
    match media_type {
        PDF_MIME => extract_pdf(data),
        DOCX_MIME | DOC_MIME => extract_docx(data),
        _ => Ok(String::from_utf8(data.to_vec())?),
    }
}

fn extract_pdf(data: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

/// Walks every paragraph in the document body and joins the text runs,
/// one line per paragraph. Tables, headers, and footers are ignored.
fn extract_docx(data: &[u8]) -> Result<String, ExtractionError> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let docx = docx_rs::read_docx(data).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut paragraphs: Vec<String> = Vec::new();
    for child in docx.document.children.iter() {
        if let DocumentChild::Paragraph(para) = child {
            let text: String = para
                .children
                .iter()
                .filter_map(|pc| match pc {
                    ParagraphChild::Run(run) => Some(
                        run.children
                            .iter()
                            .filter_map(|rc| match rc {
                                RunChild::Text(t) => Some(t.text.as_str()),
                                _ => None,
                            })
                            .collect::<Vec<_>>()
                            .join(""),
                    ),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("");

            if !text.is_empty() {
                paragraphs.push(text);
            }
        }
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_passed_through_unchanged() {
        let text = "Jane Doe, Software Engineer";
        let out = extract_text(text.as_bytes(), "text/plain").unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn test_unknown_media_type_uses_passthrough() {
        let out = extract_text(b"plain bytes", "application/octet-stream").unwrap();
        assert_eq!(out, "plain bytes");
    }

    #[test]
    fn test_empty_upload_extracts_to_empty_string() {
        let out = extract_text(b"", "text/plain").unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_invalid_utf8_on_passthrough_path_fails() {
        let result = extract_text(&[0xff, 0xfe, 0x80], "text/plain");
        assert!(matches!(result, Err(ExtractionError::Utf8(_))));
    }

    #[test]
    fn test_pdf_media_type_never_falls_through_to_passthrough() {
        // Bytes that are invalid UTF-8: a passthrough would fail with Utf8,
        // so a Pdf error proves the PDF path handled the request.
        let result = extract_text(&[0xff, 0xfe, 0x80], PDF_MIME);
        assert!(matches!(result, Err(ExtractionError::Pdf(_))));
    }

    #[test]
    fn test_garbage_bytes_with_docx_media_type_fail_as_docx() {
        let result = extract_text(b"not a zip archive", DOCX_MIME);
        assert!(matches!(result, Err(ExtractionError::Docx(_))));
    }

    #[test]
    fn test_legacy_doc_media_type_dispatches_to_word_path() {
        let result = extract_text(b"not a word document", DOC_MIME);
        assert!(matches!(result, Err(ExtractionError::Docx(_))));
    }
}
