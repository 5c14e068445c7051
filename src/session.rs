//! Conversion session state.
//!
//! A [`Session`] replaces ad-hoc globals: it owns the currently selected
//! input, the active mode, and the progress indicator. At most one input
//! and one mode are active at a time, and conversion steps refuse to run
//! before an input has been accepted.

use crate::config::Config;
use crate::detect::{validate_extension, InputFormat};
use crate::error::{Error, Result};

/// The currently selected input file.
#[derive(Debug, Clone)]
pub struct SelectedInput {
    /// Original filename
    pub name: String,
    /// Raw file bytes
    pub data: Vec<u8>,
}

impl SelectedInput {
    /// Input size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Presentational progress state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    /// Completion percentage, 0-100
    pub percent: u8,
    /// Status line shown to the user
    pub status: String,
}

/// A single-user conversion session.
#[derive(Debug)]
pub struct Session {
    config: Config,
    mode: InputFormat,
    input: Option<SelectedInput>,
    progress: Progress,
}

impl Session {
    /// Create a session in the given mode.
    pub fn new(config: Config, mode: InputFormat) -> Self {
        Self {
            config,
            mode,
            input: None,
            progress: Progress::default(),
        }
    }

    /// The active mode.
    pub fn mode(&self) -> InputFormat {
        self.mode
    }

    /// The session configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current progress state.
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// The accepted input, if any.
    pub fn input(&self) -> Option<&SelectedInput> {
        self.input.as_ref()
    }

    /// Switch mode, discarding any selected input and progress.
    pub fn set_mode(&mut self, mode: InputFormat) {
        if mode != self.mode {
            self.mode = mode;
            self.reset();
        }
    }

    /// Offer a file to the session.
    ///
    /// The file is validated against the active mode's accepted
    /// extensions and the configured size limit. On rejection the
    /// session state is unchanged.
    pub fn select_file(&mut self, name: impl Into<String>, data: Vec<u8>) -> Result<()> {
        let name = name.into();
        validate_extension(&name, self.mode)?;

        let limit = self.config.max_file_size_bytes();
        let size = data.len() as u64;
        if size > limit {
            return Err(Error::FileTooLarge { size, limit });
        }

        self.input = Some(SelectedInput { name, data });
        self.progress = Progress::default();
        Ok(())
    }

    /// Get the accepted input, or fail if none has been selected.
    pub fn require_input(&self) -> Result<&SelectedInput> {
        self.input.as_ref().ok_or(Error::NoInput)
    }

    /// Update the progress indicator.
    pub fn set_progress(&mut self, percent: u8, status: impl Into<String>) {
        self.progress = Progress {
            percent: percent.min(100),
            status: status.into(),
        };
    }

    /// Discard the selected input and progress.
    pub fn reset(&mut self) {
        self.input = None;
        self.progress = Progress::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(mode: InputFormat) -> Session {
        Session::new(Config::default(), mode)
    }

    #[test]
    fn test_select_valid_file() {
        let mut s = session(InputFormat::Markdown);
        s.select_file("notes.md", b"# hi".to_vec()).unwrap();
        assert_eq!(s.input().unwrap().name, "notes.md");
    }

    #[test]
    fn test_reject_wrong_extension_keeps_state() {
        let mut s = session(InputFormat::Markdown);
        s.select_file("notes.md", b"# hi".to_vec()).unwrap();

        let result = s.select_file("paper.pdf", b"%PDF-".to_vec());
        assert!(matches!(result, Err(Error::UnsupportedInput(_))));
        // Previous selection is untouched.
        assert_eq!(s.input().unwrap().name, "notes.md");
    }

    #[test]
    fn test_reject_oversized_file() {
        let config = Config::default().with_max_file_size_mb(0);
        let mut s = Session::new(config, InputFormat::Markdown);
        let result = s.select_file("big.md", vec![b'x'; 1024]);
        assert!(matches!(result, Err(Error::FileTooLarge { .. })));
        assert!(s.input().is_none());
    }

    #[test]
    fn test_require_input_before_conversion() {
        let s = session(InputFormat::Pdf);
        assert!(matches!(s.require_input(), Err(Error::NoInput)));
    }

    #[test]
    fn test_mode_switch_discards_state() {
        let mut s = session(InputFormat::Markdown);
        s.select_file("notes.md", b"# hi".to_vec()).unwrap();
        s.set_progress(50, "Converting...");

        s.set_mode(InputFormat::Pdf);
        assert!(s.input().is_none());
        assert_eq!(s.progress().percent, 0);

        // Setting the same mode again is a no-op.
        s.select_file("paper.pdf", b"%PDF-".to_vec()).unwrap();
        s.set_mode(InputFormat::Pdf);
        assert!(s.input().is_some());
    }

    #[test]
    fn test_progress_clamped() {
        let mut s = session(InputFormat::Markdown);
        s.set_progress(150, "done");
        assert_eq!(s.progress().percent, 100);
        assert_eq!(s.progress().status, "done");
    }
}
