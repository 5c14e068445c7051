//! Input format detection for conversion sources.

use crate::error::{Error, Result};
use std::path::Path;

/// PDF file magic bytes: `%PDF-`
const PDF_MAGIC: [u8; 5] = [0x25, 0x50, 0x44, 0x46, 0x2D];

/// File extensions accepted in Markdown mode.
const MARKDOWN_EXTENSIONS: [&str; 3] = ["md", "markdown", "txt"];

/// Detected conversion input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Markdown source (.md, .markdown, .txt)
    Markdown,
    /// PDF document (.pdf)
    Pdf,
}

impl InputFormat {
    /// Returns the canonical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            InputFormat::Markdown => "md",
            InputFormat::Pdf => "pdf",
        }
    }

    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            InputFormat::Markdown => "Markdown",
            InputFormat::Pdf => "PDF Document",
        }
    }

    /// Extensions accepted for this format, without the leading dot.
    pub fn accepted_extensions(&self) -> &'static [&'static str] {
        match self {
            InputFormat::Markdown => &MARKDOWN_EXTENSIONS,
            InputFormat::Pdf => &["pdf"],
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the input format from a file path by extension.
///
/// # Example
///
/// ```
/// use todocx::detect::{detect_format_from_path, InputFormat};
///
/// let format = detect_format_from_path("notes.md")?;
/// assert_eq!(format, InputFormat::Markdown);
/// # Ok::<(), todocx::Error>(())
/// ```
pub fn detect_format_from_path(path: impl AsRef<Path>) -> Result<InputFormat> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .ok_or(Error::UnknownFormat)?;

    if MARKDOWN_EXTENSIONS.contains(&ext.as_str()) {
        Ok(InputFormat::Markdown)
    } else if ext == "pdf" {
        Ok(InputFormat::Pdf)
    } else {
        Err(Error::UnsupportedInput(format!(".{ext}")))
    }
}

/// Detect the input format from raw bytes.
///
/// PDF is recognized by its magic bytes. Anything else that decodes as
/// UTF-8 is treated as Markdown, since Markdown has no signature.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    if is_pdf_file(data) {
        return Ok(InputFormat::Pdf);
    }
    if std::str::from_utf8(data).is_ok() {
        return Ok(InputFormat::Markdown);
    }
    Err(Error::UnknownFormat)
}

/// Check if data starts with the PDF magic bytes.
pub fn is_pdf_file(data: &[u8]) -> bool {
    data.len() >= 5 && data[..5] == PDF_MAGIC
}

/// Validate that a filename is acceptable for the given mode.
///
/// Returns `Error::UnsupportedInput` when the extension is outside the
/// mode's accepted set. This is the synchronous rejection path: the
/// caller's state must not change when this fails.
pub fn validate_extension(name: &str, format: InputFormat) -> Result<()> {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if format.accepted_extensions().contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(Error::UnsupportedInput(format!(".{ext}")))
    }
}
