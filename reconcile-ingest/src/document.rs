//! Document text acquisition: statement file in, one newline-separated text blob out.

use std::any::Any;
use std::fs;
use std::panic;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to extract PDF text from {}: {message}", .path.display())]
    Pdf { path: PathBuf, message: String },
}

/// Supplies the full text of a statement.
///
/// An empty string is a valid answer and means "no transactions".
pub trait TextProvider {
    fn provide_text(&self, source: &Path) -> Result<String, DocumentError>;
}

/// Extracts the text layer of a PDF statement.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextProvider;

impl TextProvider for PdfTextProvider {
    fn provide_text(&self, source: &Path) -> Result<String, DocumentError> {
        ensure_file(source)?;
        // pdf-extract panics on some malformed font dictionaries
        let extracted = panic::catch_unwind(|| pdf_extract::extract_text(source)).map_err(|payload| {
            DocumentError::Pdf {
                path: source.to_path_buf(),
                message: format!("PDF extraction panicked: {}", panic_message(payload.as_ref())),
            }
        })?;
        extracted.map_err(|e| DocumentError::Pdf {
            path: source.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Reads text that was already extracted from a statement.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextProvider;

impl TextProvider for PlainTextProvider {
    fn provide_text(&self, source: &Path) -> Result<String, DocumentError> {
        ensure_file(source)?;
        let bytes = fs::read(source).map_err(|source_err| DocumentError::Io {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Pick a provider by file extension: `.pdf` goes through PDF extraction,
/// anything else is read as text.
pub fn provider_for(path: &Path) -> Box<dyn TextProvider> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        Box::new(PdfTextProvider)
    } else {
        Box::new(PlainTextProvider)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause")
}

fn ensure_file(path: &Path) -> Result<(), DocumentError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(DocumentError::NotFound(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_plain_text_round_trip() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "123 ^ 03/10 $500.00").unwrap();
        let text = PlainTextProvider.provide_text(f.path()).unwrap();
        assert_eq!(text.trim(), "123 ^ 03/10 $500.00");
    }

    #[test]
    fn test_empty_file_is_empty_text() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let text = PlainTextProvider.provide_text(f.path()).unwrap();
        assert!(text.is_empty());
    }

    /// One page showing "Hi" with font /F1 set to `font`.
    fn single_page_pdf(font: &str) -> Vec<u8> {
        let content = "BT /F1 12 Tf 72 720 Td (Hi) Tj ET";
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
                .to_string(),
            format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content),
            font.to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }
        let xref = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for off in offsets {
            pdf.extend_from_slice(format!("{:010} 00000 n \n", off).as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref
            )
            .as_bytes(),
        );
        pdf
    }

    fn write_pdf(font: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        f.write_all(&single_page_pdf(font)).unwrap();
        f
    }

    #[test]
    fn test_pdf_with_standard_font_extracts() {
        let f = write_pdf("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>");
        assert!(PdfTextProvider.provide_text(f.path()).is_ok());
    }

    #[test]
    fn test_broken_font_is_an_error_not_a_crash() {
        let f = write_pdf("<< /Type /Font /Subtype /Type0 /BaseFont /Broken /Encoding /Identity-H >>");
        let err = provider_for(f.path()).provide_text(f.path()).unwrap_err();
        match err {
            DocumentError::Pdf { message, .. } => assert!(message.contains("panicked"), "{message}"),
            other => panic!("expected a PDF error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = PlainTextProvider
            .provide_text(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));

        let err = PdfTextProvider
            .provide_text(Path::new("/definitely/not/here.pdf"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));
    }
}
