//! Shared text heuristics used by both pipelines.
//!
//! The outline and collection pipelines judge the same kinds of spans
//! (title-like, heading-like, numeric noise), so the pattern tables live
//! here once and are parameterized by purpose at the call sites.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Normalize text: NFC form, whitespace runs collapsed to single spaces,
/// leading/trailing whitespace trimmed. Idempotent.
pub fn clean_text(text: &str) -> String {
    let normalized: String = text.nfc().collect();
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compiled pattern set shared by title, heading, and section judgments.
#[derive(Debug)]
pub struct TextHeuristics {
    /// Capitalized run of letters/spaces/hyphen/colon
    title_case: Regex,
    /// Starts with a capital, ends with a letter
    alpha_bounded: Regex,
    /// Numbered heading: "3. Results", "12 Overview"
    numbered: Regex,
    /// All capital letters and spaces
    all_caps: Regex,
    /// Subsection number prefix: "2.1 ", "4.10. "
    subsection_numbered: Regex,
    /// Only digits, whitespace, and list punctuation
    numeric_noise: Regex,
    /// At least one ASCII letter
    has_letter: Regex,
}

impl TextHeuristics {
    /// Compile the pattern set.
    pub fn new() -> Self {
        Self {
            title_case: Regex::new(r"^[A-Z][a-zA-Z\s\-:]+$").unwrap(),
            alpha_bounded: Regex::new(r"^[A-Z][a-zA-Z\s\-:]*[a-zA-Z]$").unwrap(),
            numbered: Regex::new(r"^\d+\.?\s+[A-Z]").unwrap(),
            all_caps: Regex::new(r"^[A-Z\s]+$").unwrap(),
            subsection_numbered: Regex::new(r"^\d+\.\d+\.?\s+").unwrap(),
            numeric_noise: Regex::new(r"^[\d\s\.\-\(\)]+$").unwrap(),
            has_letter: Regex::new(r"[a-zA-Z]").unwrap(),
        }
    }

    /// Whether the text reads like a document title.
    pub fn is_title_like(&self, text: &str) -> bool {
        self.title_case.is_match(text) || self.alpha_bounded.is_match(text)
    }

    /// Whether the text reads like a heading (numbered, title case,
    /// all caps, or subsection-numbered).
    pub fn is_heading_like(&self, text: &str) -> bool {
        self.numbered.is_match(text)
            || self.title_case.is_match(text)
            || self.all_caps.is_match(text)
            || self.subsection_numbered.is_match(text)
    }

    /// Whether the text reads like a section title.
    pub fn is_section_like(&self, text: &str) -> bool {
        self.title_case.is_match(text)
            || self.all_caps.is_match(text)
            || self.alpha_bounded.is_match(text)
    }

    /// Whether the text is only digits, whitespace, and punctuation.
    pub fn is_numeric_noise(&self, text: &str) -> bool {
        self.numeric_noise.is_match(text)
    }

    /// Whether the text contains at least one letter.
    pub fn has_letter(&self, text: &str) -> bool {
        self.has_letter.is_match(text)
    }
}

impl Default for TextHeuristics {
    fn default() -> Self {
        Self::new()
    }
}
