//! Intermediate document model.
//!
//! This module defines the block sequence built from source text, the fixed
//! style catalogue the blocks reference, and the auxiliary members shipped
//! with every bundle. Builders in [`crate::parse`] produce these structures and
//! the renderer and archiver consume them.

mod block;
mod manifest;
mod style;

pub use block::*;
pub use manifest::*;
pub use style::*;
