//! Collection pipeline request and output types.

use serde::{Deserialize, Serialize};

/// A document named by a collection request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Source filename, used as the document identifier in results
    pub filename: String,
}

impl DocumentRef {
    /// Create a document reference.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

/// A collection-processing request: the documents to read, the reader
/// persona, and the task the selection should serve.
#[derive(Debug, Clone)]
pub struct CollectionRequest {
    /// Documents to process, in request order
    pub documents: Vec<DocumentRef>,
    /// Persona role, free text (e.g., "Travel Planner")
    pub persona: String,
    /// Task description, free text
    pub task: String,
}

impl CollectionRequest {
    /// Create a collection request.
    pub fn new(
        documents: Vec<DocumentRef>,
        persona: impl Into<String>,
        task: impl Into<String>,
    ) -> Self {
        Self {
            documents,
            persona: persona.into(),
            task: task.into(),
        }
    }
}

/// Run metadata echoed into the collection output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Filenames of all requested documents, including skipped ones
    pub input_documents: Vec<String>,
    /// Persona role as given in the request
    pub persona: String,
    /// Task description as given in the request
    pub job_to_be_done: String,
    /// ISO-8601 timestamp of the run
    pub processing_timestamp: String,
}

/// A section selected for the persona, with its global importance rank.
///
/// Ranks are 1-based and form a gap-free permutation over all ranked
/// sections of a run; smaller is more important.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedSection {
    /// Source document filename
    pub document: String,
    /// Section title as found on the page
    pub section_title: String,
    /// Page the title appears on (1-indexed)
    pub page_number: u32,
    /// 1-based importance rank, 1 = most important
    pub importance_rank: u32,
}

/// A refined text block relevant to the persona.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subsection {
    /// Source document filename
    pub document: String,
    /// At most two persona-relevant sentences, or a truncated fallback
    pub refined_text: String,
    /// Page the block appears on (1-indexed)
    pub page_number: u32,
}

/// Output of one collection-processing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionOutput {
    /// Run metadata
    pub metadata: RunMetadata,
    /// Up to 5 selected sections
    pub extracted_sections: Vec<RankedSection>,
    /// Up to 5 refined subsections
    pub subsection_analysis: Vec<Subsection>,
}
