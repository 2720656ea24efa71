//! Subsection extraction and persona-driven text refinement.

use regex::Regex;

use crate::analyze::clean_text;
use crate::model::{DocumentText, Subsection};
use crate::persona::PersonaProfile;

/// Minimum cleaned length for a block to qualify as a subsection.
const MIN_BLOCK_LEN: usize = 30;

/// Sentence fragments shorter than this are dropped during refinement.
const MIN_SENTENCE_LEN: usize = 20;

/// Cap on the truncation fallback.
const MAX_FALLBACK_LEN: usize = 400;

/// How many blocks survive per document.
const TOP_BLOCKS: usize = 5;

/// How many matching sentences the refined text keeps.
const MAX_SENTENCES: usize = 2;

/// Find the most persona-relevant text blocks in one document.
///
/// Blocks are ranked by keyword match count; blocks with no matches are
/// dropped entirely, so short irrelevant text never reaches the fallback
/// truncation path.
pub fn extract_subsections(
    doc: &DocumentText,
    document_name: &str,
    profile: &PersonaProfile,
) -> Vec<Subsection> {
    let mut relevant: Vec<(usize, String, u32)> = Vec::new();

    for element in doc.elements() {
        let text = clean_text(&element.text);
        if text.chars().count() < MIN_BLOCK_LEN {
            continue;
        }

        let relevance = profile.keyword_matches(&text);
        if relevance == 0 {
            continue;
        }

        relevant.push((relevance, text, element.page));
    }

    relevant.sort_by(|a, b| b.0.cmp(&a.0));
    relevant.truncate(TOP_BLOCKS);

    relevant
        .into_iter()
        .map(|(_, text, page)| Subsection {
            document: document_name.to_string(),
            refined_text: refine_text(&text, profile),
            page_number: page,
        })
        .collect()
}

/// Condense a block to its persona-relevant sentences.
///
/// Keeps the first two sentences matching any profile pattern, joined
/// with `". "` and a trailing period. Falls back to the cleaned block
/// truncated to 400 characters (with an ellipsis marker) when no
/// sentence matches.
pub fn refine_text(text: &str, profile: &PersonaProfile) -> String {
    let refined = clean_text(text);

    let terminator = Regex::new(r"[.!?]+").unwrap();
    let mut matching: Vec<&str> = Vec::new();
    for sentence in terminator.split(&refined) {
        let sentence = sentence.trim();
        if sentence.chars().count() < MIN_SENTENCE_LEN {
            continue;
        }
        if profile.matches_any_pattern(sentence) {
            matching.push(sentence);
            if matching.len() == MAX_SENTENCES {
                break;
            }
        }
    }

    if !matching.is_empty() {
        return format!("{}.", matching.join(". "));
    }

    if refined.chars().count() > MAX_FALLBACK_LEN {
        let truncated: String = refined.chars().take(MAX_FALLBACK_LEN).collect();
        format!("{truncated}...")
    } else {
        refined
    }
}
