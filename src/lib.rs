//! # pagepack
//!
//! Deterministic conversion of plain text and Markdown into Pages '09
//! document bundles.
//!
//! A bundle is a deflate-compressed ZIP archive holding `index.xml`, a
//! version-history property list and a QuickLook thumbnail. For the same
//! input and options the archive bytes are always identical.
//!
//! ## Quick Start
//!
//! ```no_run
//! // Convert a single file and print its fingerprint
//! let fingerprint = pagepack::convert_file("notes.md", "out/notes.pages")?;
//! println!("Output hash: {}", fingerprint);
//!
//! // Convert a directory tree, mirroring it under `pages/`
//! let report = pagepack::batch_convert("docs", "pages");
//! println!("Converted {} files", report.converted);
//! # Ok::<(), pagepack::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! ```no_run
//! use pagepack::{bundle, parse, reader, render, SourceFormat};
//! use pagepack::model::{BundleManifest, StyleCatalogue};
//!
//! let text = reader::read_text("notes.txt")?;
//! let blocks = parse::parse(&text, SourceFormat::PlainText);
//! let xml = render::to_xml(&blocks, &StyleCatalogue::default(), &render::DocumentHeader::default());
//! bundle::write_bundle(&xml, &BundleManifest::default(), "notes.pages")?;
//! # Ok::<(), pagepack::Error>(())
//! ```
//!
//! ## Features
//!
//! - `markdown` (default): Markdown sources via pulldown-cmark; without it
//!   Markdown files are read as plain text.

pub mod bundle;
pub mod convert;
pub mod detect;
pub mod error;
pub mod hash;
pub mod model;
pub mod parse;
pub mod reader;
pub mod render;

// Re-exports
pub use convert::{BatchReport, ConversionResult, ConvertOptions, Converter};
pub use detect::SourceFormat;
pub use error::{Error, Result};
pub use hash::{fingerprint_bytes, fingerprint_file};
pub use model::{Block, BlockKind, BundleManifest, ParagraphStyle, StyleCatalogue};

use std::path::Path;

/// Convert one file with default options and return the bundle fingerprint.
///
/// # Example
///
/// ```no_run
/// let fingerprint = pagepack::convert_file("notes.txt", "notes.pages")?;
/// assert_eq!(fingerprint.len(), 16);
/// # Ok::<(), pagepack::Error>(())
/// ```
pub fn convert_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<String> {
    Converter::default().convert_file(input, output)
}

/// Convert every file under `input_dir` with default options.
///
/// # Example
///
/// ```no_run
/// let report = pagepack::batch_convert("docs", "pages");
/// for failure in report.failures() {
///     eprintln!("{}: {:?}", failure.input.display(), failure.error);
/// }
/// ```
pub fn batch_convert(input_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> BatchReport {
    Converter::default().batch_convert(input_dir, output_dir)
}
