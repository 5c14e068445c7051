//! # todocx
//!
//! Markdown and PDF conversion to Word documents.
//!
//! This library converts Markdown sources and PDF documents into `.docx`
//! files. Markdown goes through a CommonMark parser; PDFs go through a
//! best-effort text extraction and line-reconstruction pass. Both paths
//! meet in a shared block model that the HTML renderer (for previews)
//! and the DOCX encoder consume. An optional remote conversion client
//! (the "premium" path) is available behind the `remote` feature.
//!
//! ## Quick Start
//!
//! ```no_run
//! use todocx::{convert_file, preview_html};
//!
//! // Convert a file (format detected from the extension)
//! let docx = convert_file("notes.md")?;
//! std::fs::write("notes.docx", docx)?;
//!
//! // Styled HTML preview
//! let html = preview_html("notes.md")?;
//! # Ok::<(), todocx::Error>(())
//! ```
//!
//! ## Format-Specific APIs
//!
//! ```no_run
//! use todocx::markdown::MarkdownParser;
//! use todocx::pdf::PdfParser;
//! use todocx::docx::DocxEncoder;
//!
//! let doc = MarkdownParser::new("# Hello").parse()?;
//! let bytes = DocxEncoder::new().encode(&doc)?;
//!
//! let doc = PdfParser::open("paper.pdf")?.parse()?;
//! let bytes = DocxEncoder::new().encode(&doc)?;
//! # Ok::<(), todocx::Error>(())
//! ```
//!
//! ## Features
//!
//! - `remote`: remote conversion API client (reqwest; callers supply
//!   the async runtime)

pub mod config;
pub mod detect;
pub mod docx;
pub mod error;
pub mod markdown;
pub mod model;
pub mod naming;
pub mod pdf;
pub mod render;
pub mod session;

#[cfg(feature = "remote")]
pub mod remote;

// Re-exports
pub use config::Config;
pub use detect::{detect_format_from_bytes, detect_format_from_path, InputFormat};
pub use error::{Error, Result};
pub use model::{Block, Document, HeadingLevel, Paragraph, Table, TextAlignment, TextRun, TextStyle};
pub use naming::{output_filename, OutputKind};
pub use session::{Progress, SelectedInput, Session};

#[cfg(feature = "remote")]
pub use remote::{RemoteConverter, RemoteOutcome};

use std::path::Path;

/// Convert a file to `.docx` bytes.
///
/// The format is detected from the file extension; PDFs take the local
/// heuristic path.
///
/// # Example
///
/// ```no_run
/// use todocx::convert_file;
///
/// let docx = convert_file("notes.md")?;
/// std::fs::write("notes.docx", docx)?;
/// # Ok::<(), todocx::Error>(())
/// ```
pub fn convert_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let format = detect_format_from_path(path)?;
    let data = std::fs::read(path)?;
    convert_bytes(&data, format)
}

/// Convert in-memory bytes to `.docx` bytes.
pub fn convert_bytes(data: &[u8], format: InputFormat) -> Result<Vec<u8>> {
    let doc = parse_bytes(data, format)?;
    docx::DocxEncoder::new().encode(&doc)
}

/// Parse input bytes into the block model.
pub fn parse_bytes(data: &[u8], format: InputFormat) -> Result<Document> {
    match format {
        InputFormat::Markdown => markdown::MarkdownParser::from_bytes(data)?.parse(),
        InputFormat::Pdf => pdf::PdfParser::from_bytes(data)?.parse(),
    }
}

/// Render a styled HTML preview of a file.
///
/// Markdown previews use the parser's native HTML rendering; PDF
/// previews show the reconstructed document.
pub fn preview_html(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let format = detect_format_from_path(path)?;
    let data = std::fs::read(path)?;
    let title = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Document".to_string());

    match format {
        InputFormat::Markdown => {
            let source = std::str::from_utf8(&data)
                .map_err(|e| Error::Encoding(format!("input is not valid UTF-8: {e}")))?;
            let fragment = markdown::to_preview_html(source);
            Ok(render::wrap_html_document(&fragment, &title))
        }
        InputFormat::Pdf => {
            let doc = pdf::PdfParser::from_bytes(&data)?.parse()?;
            render::to_html(&doc, &render::RenderOptions::new().with_title(title))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_markdown_bytes() {
        let bytes = convert_bytes(b"# Title\n\nBody.", InputFormat::Markdown).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_parse_bytes_markdown() {
        let doc = parse_bytes(b"# Title\n\nBody.", InputFormat::Markdown).unwrap();
        assert_eq!(doc.title.as_deref(), Some("Title"));
        assert_eq!(doc.blocks.len(), 2);
    }

    #[test]
    fn test_convert_invalid_pdf_fails() {
        let result = convert_bytes(b"not a pdf", InputFormat::Pdf);
        assert!(result.is_err());
    }
}
