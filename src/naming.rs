//! Output filename construction.

use std::path::Path;

/// Which conversion produced the output, reflected in the filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Markdown conversion: plain `.docx`
    Markdown,
    /// Remote API conversion: `_premium.docx`
    Premium,
    /// Remote API conversion with OCR: `_ocr.docx`
    Ocr,
    /// Local PDF fallback conversion: `_converted.docx`
    Converted,
}

impl OutputKind {
    /// Filename suffix, including the extension.
    pub fn suffix(&self) -> &'static str {
        match self {
            OutputKind::Markdown => ".docx",
            OutputKind::Premium => "_premium.docx",
            OutputKind::Ocr => "_ocr.docx",
            OutputKind::Converted => "_converted.docx",
        }
    }
}

/// Build the output filename from the input name: the original stem plus
/// a kind-dependent suffix.
pub fn output_filename(input: impl AsRef<Path>, kind: OutputKind) -> String {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    format!("{}{}", stem, kind.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixes() {
        assert_eq!(output_filename("notes.md", OutputKind::Markdown), "notes.docx");
        assert_eq!(
            output_filename("paper.pdf", OutputKind::Premium),
            "paper_premium.docx"
        );
        assert_eq!(
            output_filename("scan.pdf", OutputKind::Ocr),
            "scan_ocr.docx"
        );
        assert_eq!(
            output_filename("paper.pdf", OutputKind::Converted),
            "paper_converted.docx"
        );
    }

    #[test]
    fn test_path_with_directories() {
        assert_eq!(
            output_filename("/tmp/in/report.final.pdf", OutputKind::Converted),
            "report.final_converted.docx"
        );
    }

    #[test]
    fn test_missing_stem() {
        assert_eq!(output_filename("", OutputKind::Markdown), "output.docx");
    }
}
