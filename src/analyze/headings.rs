//! Heading candidate filtering and level classification.

use std::collections::HashSet;

use crate::analyze::font_stats::FontStatistics;
use crate::analyze::text::{clean_text, TextHeuristics};
use crate::model::{DocumentText, OutlineEntry, TextElement};

/// Words that show up styled like headings but never are one.
const STOPLIST: [&str; 6] = ["page", "chapter", "section", "figure", "table", "appendix"];

/// Classifies heading candidates into levels and assembles the outline.
///
/// Returns headings with the top tier folded out: the detected H1 set is
/// handed back separately for the caller to absorb into the title, and
/// the remaining levels shift up one tier (H2 becomes H1, and so on).
pub struct HeadingClassifier<'a> {
    heuristics: &'a TextHeuristics,
}

impl<'a> HeadingClassifier<'a> {
    /// Create a classifier over a shared pattern set.
    pub fn new(heuristics: &'a TextHeuristics) -> Self {
        Self { heuristics }
    }

    /// Multi-factor heading candidacy check.
    pub fn is_heading_candidate(&self, element: &TextElement, stats: &FontStatistics) -> bool {
        let text = clean_text(&element.text);
        let len = text.chars().count();

        if !(3..=200).contains(&len) {
            return false;
        }

        let significant_size = stats.is_significant(element.size);
        let bold_and_large = element.is_bold() && element.size > stats.body_size();
        if !(significant_size || bold_and_large) {
            return false;
        }

        if self.heuristics.is_numeric_noise(&text) {
            return false;
        }
        if !self.heuristics.has_letter(&text) {
            return false;
        }
        if STOPLIST.contains(&text.to_lowercase().as_str()) {
            return false;
        }

        self.heuristics.is_heading_like(&text) || element.relative_x() < 0.2
    }

    /// Level for a candidate size: the nearest significant size's tier,
    /// ties toward the larger size. Sizes outside the known significant
    /// set fall back to a threshold ladder.
    fn level_for_size(&self, size: f32, stats: &FontStatistics) -> Option<String> {
        let significant = stats.significant_sizes();
        if significant.is_empty() {
            return None;
        }

        if let Some(nearest) = stats.nearest_significant(size) {
            if let Some(index) = significant.iter().position(|&s| s == nearest) {
                return Some(format!("H{}", index + 1));
            }
        }

        if size >= significant[0] {
            Some("H1".to_string())
        } else if significant.len() > 1 && size >= significant[1] {
            Some("H2".to_string())
        } else {
            Some("H3".to_string())
        }
    }

    /// Extract the outline of a document.
    ///
    /// Candidates equal to `title` are dropped. Returns
    /// `(shifted_headings, h1_headings)`: the first list is deduplicated
    /// by `(level, text)` in first-seen order with every level shifted up
    /// one tier, the second is the absorbed-into-title H1 set.
    pub fn extract(
        &self,
        doc: &DocumentText,
        stats: &FontStatistics,
        title: Option<&str>,
    ) -> (Vec<OutlineEntry>, Vec<OutlineEntry>) {
        if stats.significant_sizes().is_empty() {
            return (Vec::new(), Vec::new());
        }

        let mut classified: Vec<OutlineEntry> = Vec::new();
        for element in doc.elements() {
            if !self.is_heading_candidate(element, stats) {
                continue;
            }
            let text = clean_text(&element.text);
            if title == Some(text.as_str()) {
                continue;
            }
            if let Some(level) = self.level_for_size(element.size, stats) {
                classified.push(OutlineEntry::new(level, text, element.page));
            }
        }

        let mut h1_headings = Vec::new();
        let mut others = Vec::new();
        for heading in classified {
            if heading.level == "H1" {
                h1_headings.push(heading);
            } else {
                others.push(heading);
            }
        }

        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut shifted = Vec::new();
        for heading in others {
            let key = (heading.level.clone(), heading.text.clone());
            if !seen.insert(key) {
                continue;
            }
            shifted.push(OutlineEntry::new(
                shift_level(&heading.level),
                heading.text,
                heading.page,
            ));
        }

        (shifted, h1_headings)
    }
}

/// Shift a level up one tier; levels past H4 keep their label.
fn shift_level(level: &str) -> String {
    match level {
        "H2" => "H1".to_string(),
        "H3" => "H2".to_string(),
        "H4" => "H3".to_string(),
        other => other.to_string(),
    }
}
