//! Fixed document header configuration.

/// Namespace of the `sl:` document elements.
pub const SL_NAMESPACE: &str = "http://developer.apple.com/namespaces/sl";

/// Namespace of the `sf:` shared-format attributes.
pub const SF_NAMESPACE: &str = "http://developer.apple.com/namespaces/sf";

/// Namespace of the `sfa:` shared-format attributes.
pub const SFA_NAMESPACE: &str = "http://developer.apple.com/namespaces/sfa";

/// Values written into the document header of `index.xml`.
///
/// None of these come from the wall clock or the input, so the serialized
/// document depends only on the blocks and the style catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHeader {
    /// Document format version identifier
    pub version: String,

    /// Author recorded in the metadata block
    pub author: String,

    /// Creation date recorded in the metadata block (ISO 8601)
    pub creation_date: String,

    /// Layout style referenced by the body section
    pub layout_style: String,
}

impl Default for DocumentHeader {
    fn default() -> Self {
        Self {
            version: "72028102400000000".to_string(),
            author: "Pages Converter".to_string(),
            creation_date: "2024-01-01T12:00:00Z".to_string(),
            layout_style: "layout-style-0".to_string(),
        }
    }
}

impl DocumentHeader {
    /// Create the default header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the author name.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the fixed creation date.
    pub fn with_creation_date(mut self, date: impl Into<String>) -> Self {
        self.creation_date = date.into();
        self
    }
}
