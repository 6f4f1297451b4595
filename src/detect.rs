//! Source format detection by file extension.

use std::path::Path;

/// Extensions treated as Markdown (compared case-insensitively).
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Detected source format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceFormat {
    /// Plain text split into blank-line separated paragraphs
    #[default]
    PlainText,
    /// CommonMark Markdown
    Markdown,
}

impl SourceFormat {
    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::PlainText => "Plain Text",
            SourceFormat::Markdown => "Markdown",
        }
    }

    /// Detect the format from a path's extension.
    ///
    /// Unknown or missing extensions are treated as plain text.
    ///
    /// # Example
    ///
    /// ```
    /// use pagepack::SourceFormat;
    ///
    /// assert_eq!(SourceFormat::from_path("notes.MD"), SourceFormat::Markdown);
    /// assert_eq!(SourceFormat::from_path("notes.rst"), SourceFormat::PlainText);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = path.as_ref().extension().and_then(|e| e.to_str());
        match ext {
            Some(ext)
                if MARKDOWN_EXTENSIONS
                    .iter()
                    .any(|m| ext.eq_ignore_ascii_case(m)) =>
            {
                SourceFormat::Markdown
            }
            _ => SourceFormat::PlainText,
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
