//! Data model: text elements, outlines, and collection results.

mod collection;
mod element;
mod outline;

pub use collection::{
    CollectionOutput, CollectionRequest, DocumentRef, RankedSection, RunMetadata, Subsection,
};
pub use element::{BBox, DocumentText, TextElement, FLAG_BOLD, FLAG_ITALIC};
pub use outline::{DocumentOutline, OutlineEntry};
