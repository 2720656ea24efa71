//! Title detection.

use crate::analyze::text::{clean_text, TextHeuristics};
use crate::model::{DocumentText, TextElement};

/// Acceptance threshold for [`TitleDetector::is_title_candidate`].
const CANDIDATE_THRESHOLD: i32 = 4;

/// Chooses a single title string for a document.
///
/// Strategy chain, first success wins: document metadata, then scored
/// first-page candidates, then the largest-size outlier near the top of
/// the first page. When every strategy fails the caller supplies a
/// filename-derived fallback.
pub struct TitleDetector<'a> {
    heuristics: &'a TextHeuristics,
}

impl<'a> TitleDetector<'a> {
    /// Create a detector over a shared pattern set.
    pub fn new(heuristics: &'a TextHeuristics) -> Self {
        Self { heuristics }
    }

    /// Detect the document title, if any strategy succeeds.
    pub fn detect(&self, doc: &DocumentText) -> Option<String> {
        // Metadata wins outright when it carries a real title.
        if let Some(meta) = doc.metadata_title.as_deref() {
            let meta = meta.trim();
            if meta.chars().count() > 3 {
                return Some(meta.to_string());
            }
        }

        let first_page = doc.first_page();

        if let Some(title) = self.best_scored_candidate(first_page) {
            return Some(title);
        }

        self.largest_size_outlier(first_page)
    }

    /// Highest-scoring title candidate on the first page; ties keep the
    /// first element in document order.
    fn best_scored_candidate(&self, first_page: &[TextElement]) -> Option<String> {
        let mut best: Option<(f32, String)> = None;

        for element in first_page {
            if !self.is_title_candidate(element, true) {
                continue;
            }
            let text = clean_text(&element.text);
            let mut score = element.size + (1.0 - element.relative_y()) * 10.0;
            if element.is_bold() {
                score += 5.0;
            }
            if best.as_ref().map_or(true, |(s, _)| score > *s) {
                best = Some((score, text));
            }
        }

        best.map(|(_, text)| text)
    }

    /// Fallback: text within 1 pt of the page's maximum size in the top
    /// 40%, first by size descending.
    fn largest_size_outlier(&self, first_page: &[TextElement]) -> Option<String> {
        let max_size = first_page
            .iter()
            .map(|e| e.size)
            .fold(f32::NEG_INFINITY, f32::max);
        if !max_size.is_finite() {
            return None;
        }

        let mut candidates: Vec<(f32, String)> = first_page
            .iter()
            .filter(|e| e.size >= max_size - 1.0 && e.relative_y() < 0.4)
            .filter_map(|e| {
                let text = clean_text(&e.text);
                let len = text.chars().count();
                (5..=150).contains(&len).then_some((e.size, text))
            })
            .collect();

        candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        candidates.into_iter().next().map(|(_, text)| text)
    }

    /// Multi-factor title candidacy check.
    pub fn is_title_candidate(&self, element: &TextElement, is_first_page: bool) -> bool {
        let text = clean_text(&element.text);
        let len = text.chars().count();

        if !(5..=150).contains(&len) {
            return false;
        }
        if element.relative_y() > 0.3 {
            return false;
        }
        // Titles rarely end in a period, ellipses excepted.
        if text.ends_with('.') && !text.ends_with("...") {
            return false;
        }

        let mut score = 0i32;

        if element.size > 16.0 {
            score += 3;
        } else if element.size > 14.0 {
            score += 2;
        } else if element.size > 12.0 {
            score += 1;
        }

        if element.relative_y() < 0.15 {
            score += 3;
        } else if element.relative_y() < 0.25 {
            score += 2;
        }

        if element.is_bold() {
            score += 2;
        }

        if self.heuristics.is_title_like(&text) {
            score += 2;
        }

        let center = element.center_x();
        if center > 0.3 && center < 0.7 {
            score += 1;
        }

        if is_first_page {
            score += 1;
        }

        score >= CANDIDATE_THRESHOLD
    }
}
