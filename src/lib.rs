//! # docsift
//!
//! Persona-aware document outline and relevance extraction.
//!
//! docsift infers the structural outline of a typeset document (title and
//! leveled headings) from low-level layout signals, and selects the
//! content of a document collection most relevant to a stated reader
//! persona and task. It operates on text spans with typographic and
//! geometric metadata; a lopdf-backed [`PdfSource`] supplies those spans
//! for PDF files, and any [`TextLayoutSource`] implementation can stand
//! in for other backends or tests.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::{outline_file, PipelineConfig};
//!
//! fn main() -> docsift::Result<()> {
//!     let outline = outline_file("document.pdf", &PipelineConfig::default())?;
//!     println!("{}", outline.title);
//!     for heading in &outline.outline {
//!         println!("{} {} (p{})", heading.level, heading.text, heading.page);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Collection processing
//!
//! ```no_run
//! use docsift::{process_collection_in_dir, CollectionRequest, DocumentRef, PipelineConfig};
//!
//! let request = CollectionRequest::new(
//!     vec![DocumentRef::new("cities.pdf"), DocumentRef::new("cuisine.pdf")],
//!     "Travel Planner",
//!     "Plan a trip of 4 days for a group of 10 college friends.",
//! );
//! let output = process_collection_in_dir(&request, "./pdfs", &PipelineConfig::default());
//! println!("{} sections", output.extracted_sections.len());
//! ```

pub mod analyze;
pub mod error;
pub mod model;
pub mod persona;
pub mod pipeline;
pub mod relevance;
pub mod source;

// Re-export commonly used types
pub use analyze::{clean_text, FontStatistics, HeadingClassifier, TextHeuristics, TitleDetector};
pub use error::{Error, Result};
pub use model::{
    BBox, CollectionOutput, CollectionRequest, DocumentOutline, DocumentRef, DocumentText,
    OutlineEntry, RankedSection, RunMetadata, Subsection, TextElement, FLAG_BOLD, FLAG_ITALIC,
};
pub use persona::{PersonaCategory, PersonaProfile};
pub use pipeline::{
    extract_outline, fallback_title_from_name, outline_document, process_collection,
    PipelineConfig,
};
pub use source::{PdfSource, TextLayoutSource};

use std::path::Path;

/// Run the outline pipeline over a PDF file.
///
/// A missing file is an error; a file that exists but fails layout
/// extraction degrades to a filename-derived title with an empty
/// outline, so batch callers keep going.
pub fn outline_file<P: AsRef<Path>>(path: P, config: &PipelineConfig) -> Result<DocumentOutline> {
    let path = path.as_ref();
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    match PdfSource::open(path) {
        Ok(source) => Ok(outline_document(&source, &filename, config)),
        Err(Error::MissingSource(p)) => Err(Error::MissingSource(p)),
        Err(err) => {
            log::warn!("failed to open {}: {err}", path.display());
            Ok(DocumentOutline::title_only(fallback_title_from_name(
                &filename,
            )))
        }
    }
}

/// Run the collection pipeline over PDFs resolved against a directory.
pub fn process_collection_in_dir<P: AsRef<Path>>(
    request: &CollectionRequest,
    pdf_dir: P,
    config: &PipelineConfig,
) -> CollectionOutput {
    let dir = pdf_dir.as_ref();
    process_collection(
        request,
        |filename| PdfSource::open(dir.join(filename))?.document_text(),
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_file_missing_is_error() {
        let result = outline_file("no/such/file.pdf", &PipelineConfig::default());
        assert!(matches!(result, Err(Error::MissingSource(_))));
    }

    #[test]
    fn test_collection_in_dir_all_missing_yields_empty_results() {
        let request = CollectionRequest::new(
            vec![DocumentRef::new("ghost.pdf")],
            "Travel Planner",
            "Plan a trip",
        );
        let output = process_collection_in_dir(
            &request,
            "no/such/dir",
            &PipelineConfig::default().sequential(),
        );
        assert!(output.extracted_sections.is_empty());
        assert!(output.subsection_analysis.is_empty());
        assert_eq!(output.metadata.input_documents, vec!["ghost.pdf"]);
    }
}
