//! Output rendering for block sequences.
//!
//! This module turns the block model into the `index.xml` document body of a
//! Pages bundle.
//!
//! # Example
//!
//! ```
//! use pagepack::model::{Block, StyleCatalogue};
//! use pagepack::render::{to_xml, DocumentHeader};
//!
//! let blocks = vec![Block::heading("HELLO WORLD"), Block::body("This is body text.")];
//! let xml = to_xml(&blocks, &StyleCatalogue::default(), &DocumentHeader::default());
//! assert!(xml.contains("<sf:text>HELLO WORLD</sf:text>"));
//! ```

mod options;
mod xml;

pub use options::{DocumentHeader, SFA_NAMESPACE, SF_NAMESPACE, SL_NAMESPACE};
pub use xml::{escape_xml, is_xml_char, read_paragraphs, to_xml, RenderedParagraph};
