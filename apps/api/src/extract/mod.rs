//! Document text extraction — turns an uploaded resume file into plain text
//! suitable for the structural parser.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AppError;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]+>").expect("valid regex"));

static RTF_CONTROL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[a-zA-Z]+-?\d*\s?|[{}]|\\'[0-9a-fA-F]{2}").expect("valid regex"));

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Supported source formats, resolved from filename extension with the
/// declared content type as a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceFormat {
    Pdf,
    PlainText,
    Html,
    Rtf,
    LegacyWord,
    Unknown,
}

fn format_from_extension(filename: &str) -> Option<SourceFormat> {
    let ext = filename.rsplit_once('.').map(|(_, e)| e.to_lowercase())?;
    match ext.as_str() {
        "pdf" => Some(SourceFormat::Pdf),
        "txt" | "text" | "md" | "markdown" => Some(SourceFormat::PlainText),
        "html" | "htm" => Some(SourceFormat::Html),
        "rtf" => Some(SourceFormat::Rtf),
        "doc" | "docx" => Some(SourceFormat::LegacyWord),
        _ => None,
    }
}

fn format_from_content_type(content_type: &str) -> SourceFormat {
    let ct = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    match ct.as_str() {
        "application/pdf" => SourceFormat::Pdf,
        "text/plain" | "text/markdown" => SourceFormat::PlainText,
        "text/html" => SourceFormat::Html,
        "application/rtf" | "text/rtf" => SourceFormat::Rtf,
        "application/msword"
        | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
            SourceFormat::LegacyWord
        }
        _ => SourceFormat::Unknown,
    }
}

fn resolve_format(filename: &str, content_type: &str) -> SourceFormat {
    format_from_extension(filename).unwrap_or_else(|| format_from_content_type(content_type))
}

/// Strips NUL bytes, normalizes carriage returns, and collapses runs of
/// blank lines so downstream segmentation sees stable input.
fn clean_text(text: &str) -> String {
    let text = text.replace('\u{0}', " ").replace("\r\n", "\n").replace('\r', "\n");
    EXCESS_NEWLINES.replace_all(&text, "\n\n").trim().to_string()
}

fn extract_pdf(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        tracing::warn!("PDF extraction failed: {e}");
        AppError::UnprocessableEntity(
            "Could not extract text from PDF; the file may be scanned or secured".to_string(),
        )
    })
}

fn extract_html(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    HTML_TAG.replace_all(&text, " ").to_string()
}

fn extract_rtf(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    RTF_CONTROL.replace_all(&text, "").to_string()
}

/// Extracts plain text from an uploaded document.
///
/// Legacy Word formats are rejected with 415; anything that extracts to an
/// empty string is rejected with 422.
pub fn extract_text(filename: &str, content_type: &str, bytes: &[u8]) -> Result<String, AppError> {
    let format = resolve_format(filename, content_type);
    let text = match format {
        SourceFormat::Pdf => extract_pdf(bytes)?,
        SourceFormat::PlainText | SourceFormat::Unknown => {
            String::from_utf8_lossy(bytes).into_owned()
        }
        SourceFormat::Html => extract_html(bytes),
        SourceFormat::Rtf => extract_rtf(bytes),
        SourceFormat::LegacyWord => {
            return Err(AppError::UnsupportedMediaType(
                "Word documents are not supported; upload PDF or plain text".to_string(),
            ))
        }
    };

    let cleaned = clean_text(&text);
    if cleaned.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "Document contained no extractable text".to_string(),
        ));
    }
    Ok(cleaned)
}
