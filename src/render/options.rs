//! Rendering options configuration.

/// Options for rendering documents to HTML.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Document title override. Falls back to the document's own title,
    /// then to the source filename.
    pub title: Option<String>,

    /// Emit only the content fragment, without the styled document shell.
    pub fragment_only: bool,
}

impl RenderOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Emit only the content fragment.
    pub fn fragment_only(mut self) -> Self {
        self.fragment_only = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = RenderOptions::new().with_title("Report");
        assert_eq!(options.title.as_deref(), Some("Report"));
        assert!(!options.fragment_only);
    }
}
