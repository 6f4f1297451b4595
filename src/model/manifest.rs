//! Fixed auxiliary members written into every bundle.

/// Archive path of the serialized document body.
pub const INDEX_XML_PATH: &str = "index.xml";

/// Archive path of the version-history property list.
pub const VERSION_HISTORY_PATH: &str = "buildVersionHistory.plist";

/// Archive path of the preview thumbnail.
pub const THUMBNAIL_PATH: &str = "QuickLook/Thumbnail.jpg";

/// Minimal 1x1 baseline JPEG used as the QuickLook preview.
pub const PLACEHOLDER_THUMBNAIL: [u8; 256] = [
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01,
    0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xDB, 0x00, 0x43,
    0x00, 0x08, 0x06, 0x06, 0x07, 0x06, 0x05, 0x08, 0x07, 0x07, 0x07, 0x09,
    0x09, 0x08, 0x0A, 0x0C, 0x14, 0x0D, 0x0C, 0x0B, 0x0B, 0x0C, 0x19, 0x12,
    0x13, 0x0F, 0x14, 0x1D, 0x1A, 0x1F, 0x1E, 0x1D, 0x1A, 0x1C, 0x1C, 0x20,
    0x24, 0x2E, 0x27, 0x20, 0x22, 0x2C, 0x23, 0x1C, 0x1C, 0x28, 0x37, 0x29,
    0x2C, 0x30, 0x31, 0x34, 0x34, 0x34, 0x1F, 0x27, 0x39, 0x3D, 0x38, 0x32,
    0x3C, 0x2E, 0x33, 0x34, 0x32, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x01,
    0x00, 0x01, 0x03, 0x01, 0x22, 0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01,
    0xFF, 0xC4, 0x00, 0x15, 0x00, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08, 0xFF,
    0xC4, 0x00, 0x14, 0x10, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xC4, 0x00,
    0x14, 0x11, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xC4, 0x00, 0x14, 0x12,
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xC4, 0x00, 0x14, 0x13, 0x01, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x01, 0x00, 0x01,
    0x03, 0x01, 0x11, 0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01, 0xFF, 0xDA,
    0x00, 0x0C, 0x03, 0x01, 0x00, 0x02, 0x11, 0x03, 0x11, 0x00, 0x3F, 0x00,
    0xB2, 0xC0, 0xFF, 0xD9,
];

/// Fixed members that accompany `index.xml` in every bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleManifest {
    /// Value of the `BuildVersion` key
    pub build_version: String,
    /// Value of the `ProductVersion` key
    pub product_version: String,
    /// Thumbnail image bytes
    pub thumbnail: Vec<u8>,
}

impl Default for BundleManifest {
    fn default() -> Self {
        Self {
            build_version: "192".to_string(),
            product_version: "4.0".to_string(),
            thumbnail: PLACEHOLDER_THUMBNAIL.to_vec(),
        }
    }
}

impl BundleManifest {
    /// Render the version-history property list.
    pub fn version_history(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>BuildVersion</key>
    <string>{}</string>
    <key>ProductVersion</key>
    <string>{}</string>
</dict>
</plist>"#,
            crate::render::escape_xml(&self.build_version),
            crate::render::escape_xml(&self.product_version),
        )
    }

    /// Auxiliary members as `(archive path, bytes)` pairs.
    pub fn members(&self) -> Vec<(&'static str, Vec<u8>)> {
        vec![
            (VERSION_HISTORY_PATH, self.version_history().into_bytes()),
            (THUMBNAIL_PATH, self.thumbnail.clone()),
        ]
    }
}
