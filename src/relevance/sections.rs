//! Section candidate extraction and importance ranking.

use crate::analyze::{clean_text, TextHeuristics};
use crate::model::{DocumentText, RankedSection};
use crate::persona::PersonaProfile;

/// Minimum font size for a span to be considered a section title.
const MIN_TITLE_SIZE: f32 = 12.0;

/// A section title found in one document, before ranking.
#[derive(Debug, Clone)]
pub struct SectionCandidate {
    /// Source document filename
    pub document: String,
    /// Section title as found on the page
    pub section_title: String,
    /// Page the title appears on (1-indexed)
    pub page_number: u32,
}

/// Find persona-relevant section titles in one document.
///
/// Candidates are scored by size, boldness, vertical position, and title
/// length, then emitted in score order with exact-duplicate titles
/// collapsed to their first (highest-scoring) occurrence.
pub fn extract_section_candidates(
    doc: &DocumentText,
    document_name: &str,
    profile: &PersonaProfile,
    heuristics: &TextHeuristics,
) -> Vec<SectionCandidate> {
    let mut scored: Vec<(f32, SectionCandidate)> = Vec::new();

    for element in doc.elements() {
        let text = clean_text(&element.text);
        let len = text.chars().count();

        if !(5..=100).contains(&len) {
            continue;
        }
        if element.size < MIN_TITLE_SIZE {
            continue;
        }

        let section_like = heuristics.is_section_like(&text);
        let has_keywords = profile.contains_keyword(&text);
        let well_positioned = element.relative_y() < 0.3 || element.relative_x() < 0.2;

        if !((section_like || has_keywords) && well_positioned) {
            continue;
        }

        let mut score = element.size;
        if element.is_bold() {
            score += 5.0;
        }
        score += (1.0 - element.relative_y()) * 10.0;
        if (10..=50).contains(&len) {
            score += 3.0;
        }

        scored.push((
            score,
            SectionCandidate {
                document: document_name.to_string(),
                section_title: text,
                page_number: element.page,
            },
        ));
    }

    // Stable sort keeps document order for equal scores.
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut seen = std::collections::HashSet::new();
    scored
        .into_iter()
        .filter(|(_, c)| seen.insert(c.section_title.clone()))
        .map(|(_, c)| c)
        .collect()
}

/// Score one section title for the persona.
fn importance_score(candidate: &SectionCandidate, profile: &PersonaProfile) -> i32 {
    let title_lower = candidate.section_title.to_lowercase();

    let mut score = 2 * profile.keyword_matches(&candidate.section_title) as i32;

    if title_lower.contains("comprehensive") || title_lower.contains("guide") {
        score += 5;
    }
    if candidate.page_number <= 3 {
        score += 3;
    }
    if candidate.section_title.chars().count() > 30 {
        score += 2;
    }
    if profile
        .category()
        .title_bonus_keywords()
        .iter()
        .any(|k| title_lower.contains(k))
    {
        score += 5;
    }

    score
}

/// Rank section candidates by persona relevance.
///
/// Assigns `importance_rank` 1..N in descending score order; ties keep
/// candidate order, so repeated runs produce identical rankings.
pub fn rank_sections(candidates: Vec<SectionCandidate>, profile: &PersonaProfile) -> Vec<RankedSection> {
    let mut scored: Vec<(i32, SectionCandidate)> = candidates
        .into_iter()
        .map(|c| (importance_score(&c, profile), c))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (_, c))| RankedSection {
            document: c.document,
            section_title: c.section_title,
            page_number: c.page_number,
            importance_rank: (i + 1) as u32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, TextElement, FLAG_BOLD};
    use crate::persona::{PersonaCategory, PersonaProfile};

    fn element(text: &str, size: f32, page: u32, flags: u32, rel_y: f32) -> TextElement {
        let y0 = rel_y * 792.0;
        TextElement::new(
            text,
            "Helvetica",
            size,
            flags,
            page,
            BBox::new(72.0, y0, 300.0, y0 + size),
            612.0,
            792.0,
        )
    }

    fn travel() -> PersonaProfile {
        PersonaProfile::for_category(PersonaCategory::Travel)
    }

    #[test]
    fn test_extraction_filters() {
        let heuristics = TextHeuristics::new();
        let profile = travel();
        let doc = DocumentText::new(vec![vec![
            // Admitted: section-like pattern, well positioned.
            element("Coastal Adventures", 16.0, 1, FLAG_BOLD, 0.1),
            // Too small a font.
            element("Beach Getaways", 10.0, 1, 0, 0.1),
            // Poorly positioned and off the left margin.
            {
                let mut e = element("Wine Tours", 16.0, 1, 0, 0.8);
                e.bbox.x0 = 300.0;
                e.bbox.x1 = 500.0;
                e
            },
            // Keyword hit without a title pattern still qualifies.
            element("planning your packing list", 14.0, 2, 0, 0.05),
        ]]);

        let sections = extract_section_candidates(&doc, "guide.pdf", &profile, &heuristics);
        let titles: Vec<&str> = sections.iter().map(|s| s.section_title.as_str()).collect();
        assert_eq!(titles, vec!["Coastal Adventures", "planning your packing list"]);
        assert_eq!(sections[0].document, "guide.pdf");
    }

    #[test]
    fn test_duplicate_titles_keep_best() {
        let heuristics = TextHeuristics::new();
        let profile = travel();
        let doc = DocumentText::new(vec![vec![
            element("Coastal Adventures", 14.0, 4, 0, 0.2),
            element("Coastal Adventures", 20.0, 1, FLAG_BOLD, 0.05),
        ]]);

        let sections = extract_section_candidates(&doc, "guide.pdf", &profile, &heuristics);
        assert_eq!(sections.len(), 1);
        // The higher-scoring occurrence (page 1) survives.
        assert_eq!(sections[0].page_number, 1);
    }

    #[test]
    fn test_rank_is_gap_free_permutation() {
        let profile = travel();
        let candidates = vec![
            SectionCandidate {
                document: "a.pdf".into(),
                section_title: "Notes".into(),
                page_number: 9,
            },
            SectionCandidate {
                document: "a.pdf".into(),
                section_title: "Comprehensive Guide to Coastal Cities".into(),
                page_number: 1,
            },
            SectionCandidate {
                document: "b.pdf".into(),
                section_title: "Packing Tips".into(),
                page_number: 2,
            },
        ];

        let ranked = rank_sections(candidates, &profile);
        let mut ranks: Vec<u32> = ranked.iter().map(|s| s.importance_rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3]);

        assert_eq!(
            ranked[0].section_title,
            "Comprehensive Guide to Coastal Cities"
        );
        assert_eq!(ranked[0].importance_rank, 1);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let profile = PersonaProfile::for_category(PersonaCategory::General);
        let candidates = vec![
            SectionCandidate {
                document: "a.pdf".into(),
                section_title: "Alpha".into(),
                page_number: 9,
            },
            SectionCandidate {
                document: "b.pdf".into(),
                section_title: "Bravo".into(),
                page_number: 9,
            },
        ];

        let ranked = rank_sections(candidates, &profile);
        assert_eq!(ranked[0].section_title, "Alpha");
        assert_eq!(ranked[1].section_title, "Bravo");
    }
}
