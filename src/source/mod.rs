//! Layout sources: where text elements come from.
//!
//! The analysis pipelines are pure functions over [`TextElement`] data;
//! this module is the seam where a backend supplies that data. The crate
//! ships [`PdfSource`] as the default backend, and anything that can
//! produce positioned spans (a test fixture, another parser) can plug in
//! through [`TextLayoutSource`].

mod pdf;

pub use pdf::PdfSource;

use crate::error::Result;
use crate::model::{DocumentText, TextElement};

/// A producer of per-page ordered text elements for one document.
pub trait TextLayoutSource {
    /// Title supplied by the document's own metadata, if any.
    fn metadata_title(&self) -> Option<String> {
        None
    }

    /// Extract all pages' elements, in page order.
    fn extract(&self) -> Result<Vec<Vec<TextElement>>>;

    /// Extract the full document text, metadata title included.
    fn document_text(&self) -> Result<DocumentText> {
        Ok(DocumentText {
            metadata_title: self.metadata_title(),
            pages: self.extract()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    struct FixtureSource;

    impl TextLayoutSource for FixtureSource {
        fn metadata_title(&self) -> Option<String> {
            Some("Fixture".to_string())
        }

        fn extract(&self) -> Result<Vec<Vec<TextElement>>> {
            Ok(vec![vec![TextElement::new(
                "Hello",
                "Helvetica",
                12.0,
                0,
                1,
                BBox::new(72.0, 72.0, 120.0, 84.0),
                612.0,
                792.0,
            )]])
        }
    }

    #[test]
    fn test_document_text_default_impl() {
        let doc = FixtureSource.document_text().unwrap();
        assert_eq!(doc.metadata_title.as_deref(), Some("Fixture"));
        assert_eq!(doc.elements().count(), 1);
    }
}
