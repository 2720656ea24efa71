//! Diversity-constrained selection of top sections and subsections.
//!
//! The first pass takes at most one item per source document so the
//! selection spreads across the collection before going deeper into any
//! single document; a fill pass tops the list up from the leftovers of
//! already-used documents when fewer than five documents contribute.
//!
//! Group ordering key: the numerically largest member rank of each
//! group, descending, with ties resolved by first-encountered document
//! order. See DESIGN.md for the rationale behind this ordering.

use crate::model::{RankedSection, Subsection};

/// Hard cap on selected items.
const MAX_SELECTED: usize = 5;

/// Group items by document, preserving first-encountered document order.
fn group_by_document<T, F>(items: &[T], document: F) -> Vec<(String, Vec<&T>)>
where
    F: Fn(&T) -> &str,
{
    let mut groups: Vec<(String, Vec<&T>)> = Vec::new();
    for item in items {
        let doc = document(item);
        match groups.iter_mut().find(|(name, _)| name == doc) {
            Some((_, members)) => members.push(item),
            None => groups.push((doc.to_string(), vec![item])),
        }
    }
    groups
}

/// Select up to five sections, one best per document first.
pub fn select_sections(ranked: &[RankedSection]) -> Vec<RankedSection> {
    let mut groups = group_by_document(ranked, |s| s.document.as_str());

    // Order groups by their worst member's rank, descending; the stable
    // sort keeps first-encountered order for equal keys.
    groups.sort_by(|a, b| {
        let worst_a = a.1.iter().map(|s| s.importance_rank).max().unwrap_or(0);
        let worst_b = b.1.iter().map(|s| s.importance_rank).max().unwrap_or(0);
        worst_b.cmp(&worst_a)
    });

    let mut selected: Vec<RankedSection> = Vec::new();
    let mut leftovers: Vec<&RankedSection> = Vec::new();
    for (_, members) in &groups {
        if selected.len() >= MAX_SELECTED {
            break;
        }
        let best_rank = members.iter().map(|s| s.importance_rank).min().unwrap_or(0);
        for &member in members {
            if member.importance_rank == best_rank && selected.len() < MAX_SELECTED {
                selected.push(member.clone());
            } else {
                leftovers.push(member);
            }
        }
    }

    if selected.len() < MAX_SELECTED {
        leftovers.sort_by_key(|s| s.importance_rank);
        for item in leftovers {
            if selected.len() >= MAX_SELECTED {
                break;
            }
            selected.push(item.clone());
        }
    }

    selected
}

/// Select up to five subsections, one best per document first. The
/// analogue of [`select_sections`] keyed on refined-text length, longest
/// first; the first maximal member of a group wins ties.
pub fn select_subsections(subsections: &[Subsection]) -> Vec<Subsection> {
    let mut groups = group_by_document(subsections, |s| s.document.as_str());

    groups.sort_by(|a, b| {
        let longest = |members: &Vec<&Subsection>| {
            members
                .iter()
                .map(|s| s.refined_text.chars().count())
                .max()
                .unwrap_or(0)
        };
        longest(&b.1).cmp(&longest(&a.1))
    });

    let mut selected: Vec<Subsection> = Vec::new();
    let mut leftovers: Vec<&Subsection> = Vec::new();
    for (_, members) in &groups {
        if selected.len() >= MAX_SELECTED {
            break;
        }
        let mut best_index = 0usize;
        let mut best_len = 0usize;
        for (i, member) in members.iter().enumerate() {
            let len = member.refined_text.chars().count();
            if i == 0 || len > best_len {
                best_index = i;
                best_len = len;
            }
        }
        for (i, &member) in members.iter().enumerate() {
            if i == best_index {
                selected.push(member.clone());
            } else {
                leftovers.push(member);
            }
        }
    }

    if selected.len() < MAX_SELECTED {
        leftovers.sort_by(|a, b| {
            b.refined_text
                .chars()
                .count()
                .cmp(&a.refined_text.chars().count())
        });
        for item in leftovers {
            if selected.len() >= MAX_SELECTED {
                break;
            }
            selected.push(item.clone());
        }
    }

    selected
}
