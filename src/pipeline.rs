//! End-to-end orchestration of the outline and collection pipelines.
//!
//! Both pipelines are pure over in-memory [`DocumentText`] values;
//! documents are independent until the final cross-document ranking and
//! selection, so collection runs fan out across documents with rayon and
//! join at that barrier.

use chrono::Utc;
use log::{debug, warn};
use rayon::prelude::*;

use crate::analyze::{FontStatistics, HeadingClassifier, TextHeuristics, TitleDetector};
use crate::error::{Error, Result};
use crate::model::{
    CollectionOutput, CollectionRequest, DocumentOutline, DocumentText, OutlineEntry, RunMetadata,
    Subsection,
};
use crate::persona::PersonaProfile;
use crate::relevance::{
    extract_section_candidates, extract_subsections, rank_sections, select_sections,
    select_subsections, SectionCandidate,
};
use crate::source::TextLayoutSource;

/// Configuration threaded through pipeline calls.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Emit heuristic traces through the `log` facade
    pub debug: bool,
    /// Process collection documents in parallel
    pub parallel: bool,
}

impl PipelineConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable heuristic traces.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debug: false,
            parallel: true,
        }
    }
}

/// Derive a fallback title from a filename: extension dropped,
/// separators replaced with spaces, words title-cased.
pub fn fallback_title_from_name(filename: &str) -> String {
    let stem = match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    };
    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fold detected H1 headings into the title, the way the outline output
/// absorbs the document's top heading tier.
fn fold_h1_into_title(title: String, h1_headings: &[OutlineEntry]) -> String {
    if h1_headings.is_empty() {
        return title;
    }
    let joined = h1_headings
        .iter()
        .map(|h| h.text.as_str())
        .collect::<Vec<_>>()
        .join(" | ");
    if title.is_empty() {
        joined
    } else {
        format!("{title} - {joined}")
    }
}

/// Infer the outline of one document's text.
///
/// `fallback_title` is used when no detection strategy succeeds,
/// typically derived from the filename via [`fallback_title_from_name`].
pub fn extract_outline(
    doc: &DocumentText,
    fallback_title: &str,
    config: &PipelineConfig,
) -> DocumentOutline {
    let heuristics = TextHeuristics::new();
    let stats = FontStatistics::from_elements(doc.elements());

    if config.debug {
        debug!(
            "font stats: body={} median={} significant={:?}",
            stats.body_size(),
            stats.median_size(),
            stats.significant_sizes()
        );
    }

    let detected = TitleDetector::new(&heuristics).detect(doc);
    let classifier = HeadingClassifier::new(&heuristics);
    let (headings, h1_headings) = classifier.extract(doc, &stats, detected.as_deref());

    if config.debug {
        debug!(
            "detected title={:?}, {} headings, {} folded into title",
            detected,
            headings.len(),
            h1_headings.len()
        );
    }

    let base_title = detected.unwrap_or_else(|| fallback_title.to_string());
    let title = fold_h1_into_title(base_title, &h1_headings);

    DocumentOutline::new(title, headings)
}

/// Run the outline pipeline over a layout source.
///
/// Extraction failures are not fatal: the document degrades to a
/// filename-derived title with an empty outline.
pub fn outline_document<S: TextLayoutSource + ?Sized>(
    source: &S,
    filename: &str,
    config: &PipelineConfig,
) -> DocumentOutline {
    match source.document_text() {
        Ok(doc) => extract_outline(&doc, &fallback_title_from_name(filename), config),
        Err(err) => {
            warn!("outline extraction failed for {filename}: {err}");
            DocumentOutline::title_only(fallback_title_from_name(filename))
        }
    }
}

/// Run the collection pipeline over a set of documents.
///
/// `open` resolves a request filename to its extracted text; a
/// [`Error::MissingSource`] or parse failure skips that document with a
/// warning and the run continues. Cross-document ranking and diversity
/// selection happen once every document's candidates are in.
pub fn process_collection<F>(
    request: &CollectionRequest,
    open: F,
    config: &PipelineConfig,
) -> CollectionOutput
where
    F: Fn(&str) -> Result<DocumentText> + Sync,
{
    let profile = PersonaProfile::resolve(&request.persona, &request.task);
    let heuristics = TextHeuristics::new();

    if config.debug {
        debug!(
            "persona category {:?} for role {:?}",
            profile.category(),
            request.persona
        );
    }

    let process_one = |doc_ref: &crate::model::DocumentRef| -> Option<(
        Vec<SectionCandidate>,
        Vec<Subsection>,
    )> {
        let doc = match open(&doc_ref.filename) {
            Ok(doc) => doc,
            Err(Error::MissingSource(path)) => {
                warn!("document not found, skipping: {}", path.display());
                return None;
            }
            Err(err) => {
                warn!("failed to process {}, skipping: {err}", doc_ref.filename);
                return None;
            }
        };

        let sections =
            extract_section_candidates(&doc, &doc_ref.filename, &profile, &heuristics);
        let subsections = extract_subsections(&doc, &doc_ref.filename, &profile);
        if config.debug {
            debug!(
                "{}: {} section candidates, {} subsections",
                doc_ref.filename,
                sections.len(),
                subsections.len()
            );
        }
        Some((sections, subsections))
    };

    // Order-preserving collect keeps results deterministic regardless of
    // worker scheduling.
    let per_document: Vec<Option<(Vec<SectionCandidate>, Vec<Subsection>)>> = if config.parallel {
        request.documents.par_iter().map(process_one).collect()
    } else {
        request.documents.iter().map(process_one).collect()
    };

    let mut all_sections = Vec::new();
    let mut all_subsections = Vec::new();
    for (sections, subsections) in per_document.into_iter().flatten() {
        all_sections.extend(sections);
        all_subsections.extend(subsections);
    }

    let ranked = rank_sections(all_sections, &profile);
    let extracted_sections = select_sections(&ranked);
    let subsection_analysis = select_subsections(&all_subsections);

    CollectionOutput {
        metadata: RunMetadata {
            input_documents: request
                .documents
                .iter()
                .map(|d| d.filename.clone())
                .collect(),
            persona: request.persona.clone(),
            job_to_be_done: request.task.clone(),
            processing_timestamp: Utc::now().to_rfc3339(),
        },
        extracted_sections,
        subsection_analysis,
    }
}
