//! Persona-relevance pipeline: section candidates, ranking, subsection
//! refinement, and diversity-constrained selection.

mod diversity;
mod sections;
mod subsections;

pub use diversity::{select_sections, select_subsections};
pub use sections::{extract_section_candidates, rank_sections, SectionCandidate};
pub use subsections::{extract_subsections, refine_text};
