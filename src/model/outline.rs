//! Outline pipeline output types.

use serde::{Deserialize, Serialize};

/// One classified heading in a document outline.
///
/// `level` is `"H1"`, `"H2"`, ... in descending significance. Within one
/// document, level assignment is monotonic with font-size rank, and
/// duplicates by `(level, text)` collapse to the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level label
    pub level: String,
    /// Heading text, whitespace-normalized
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: impl Into<String>, text: impl Into<String>, page: u32) -> Self {
        Self {
            level: level.into(),
            text: text.into(),
            page,
        }
    }
}

/// The structural outline of one document: a title and leveled headings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title
    pub title: String,
    /// Headings in first-seen order
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    /// Create a new outline.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// An outline with a title and no headings, used when layout
    /// extraction fails.
    pub fn title_only(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }
}
