//! Persona profiles: keyword and pattern sets governing relevance
//! judgments for one class of document consumer.
//!
//! Resolution is a total categorical dispatch over the persona role and
//! task text. The priority order is part of the contract: travel, then
//! HR, then food, then the general fallback.

use regex::Regex;

/// The recognized persona classes, in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonaCategory {
    /// Trip and itinerary planning
    Travel,
    /// HR / forms and signature workflows
    Hr,
    /// Catering and menu planning
    Food,
    /// Fallback for everything else
    General,
}

impl PersonaCategory {
    /// Resolve a category from free-text persona role and task
    /// description. Total: always yields a category.
    ///
    /// Priority table (first match wins):
    ///
    /// | category | role contains        | task contains |
    /// |----------|----------------------|---------------|
    /// | Travel   | "travel"             | "trip"        |
    /// | Hr       | "hr", "professional" | "forms"       |
    /// | Food     | "food", "contractor" | "menu"        |
    /// | General  | anything else        |               |
    pub fn resolve(persona_role: &str, task: &str) -> Self {
        let role = persona_role.to_lowercase();
        let task = task.to_lowercase();

        if role.contains("travel") || task.contains("trip") {
            PersonaCategory::Travel
        } else if role.contains("hr") || role.contains("professional") || task.contains("forms") {
            PersonaCategory::Hr
        } else if role.contains("food") || role.contains("contractor") || task.contains("menu") {
            PersonaCategory::Food
        } else {
            PersonaCategory::General
        }
    }

    /// Title keywords that earn the category-specific ranking bonus.
    pub fn title_bonus_keywords(&self) -> &'static [&'static str] {
        match self {
            PersonaCategory::Hr => &["form", "fill", "sign"],
            PersonaCategory::Travel => &["city", "guide", "coastal"],
            PersonaCategory::Food => &["recipe", "menu", "cuisine"],
            PersonaCategory::General => &[],
        }
    }
}

/// The keyword set and sentence patterns for one persona category.
/// Immutable once resolved for a request.
#[derive(Debug)]
pub struct PersonaProfile {
    category: PersonaCategory,
    keywords: &'static [&'static str],
    patterns: Vec<Regex>,
}

impl PersonaProfile {
    /// Resolve the profile for a persona role and task description.
    pub fn resolve(persona_role: &str, task: &str) -> Self {
        Self::for_category(PersonaCategory::resolve(persona_role, task))
    }

    /// The fixed profile of a category.
    pub fn for_category(category: PersonaCategory) -> Self {
        let (keywords, pattern_tokens) = match category {
            PersonaCategory::Travel => (TRAVEL_KEYWORDS, TRAVEL_PATTERNS),
            PersonaCategory::Hr => (HR_KEYWORDS, HR_PATTERNS),
            PersonaCategory::Food => (FOOD_KEYWORDS, FOOD_PATTERNS),
            PersonaCategory::General => (GENERAL_KEYWORDS, GENERAL_PATTERNS),
        };

        let patterns = pattern_tokens
            .iter()
            .map(|token| Regex::new(token).unwrap())
            .collect();

        Self {
            category,
            keywords,
            patterns,
        }
    }

    /// The category this profile was resolved from.
    pub fn category(&self) -> PersonaCategory {
        self.category
    }

    /// The profile's keyword set.
    pub fn keywords(&self) -> &[&'static str] {
        self.keywords
    }

    /// Count how many profile keywords occur in the text as substrings,
    /// case-insensitive.
    pub fn keyword_matches(&self, text: &str) -> usize {
        let lower = text.to_lowercase();
        self.keywords.iter().filter(|k| lower.contains(**k)).count()
    }

    /// Whether at least one profile keyword occurs in the text.
    pub fn contains_keyword(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(*k))
    }

    /// Whether any sentence pattern matches the lowercased text.
    pub fn matches_any_pattern(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.patterns.iter().any(|p| p.is_match(&lower))
    }
}

const TRAVEL_KEYWORDS: &[&str] = &[
    "cities",
    "guide",
    "comprehensive",
    "major",
    "coastal",
    "adventures",
    "culinary",
    "experiences",
    "packing",
    "tips",
    "tricks",
    "nightlife",
    "entertainment",
    "restaurants",
    "hotels",
    "cuisine",
    "activities",
    "beach",
    "coast",
    "mediterranean",
    "france",
    "south",
    "travel",
    "sea",
    "nice",
    "antibes",
    "saint-tropez",
    "marseille",
    "cassis",
    "calanques",
    "porquerolles",
    "port-cros",
    "cannes",
    "menton",
    "cooking",
    "classes",
    "wine",
    "tours",
    "vineyards",
    "bouillabaisse",
    "ratatouille",
    "tarte",
    "monaco",
    "jazz",
    "cocktails",
    "bars",
    "lounges",
    "nightclubs",
    "dancing",
    "dj",
    "water",
    "sports",
    "jet",
    "skiing",
    "parasailing",
    "scuba",
    "diving",
    "sailing",
    "yacht",
    "windsurfing",
    "kitesurfing",
    "paddleboard",
    "snorkeling",
    "layering",
    "clothing",
    "toiletries",
    "documents",
    "passport",
    "insurance",
];

const TRAVEL_PATTERNS: &[&str] = &[
    "coast",
    "beach",
    "mediterranean",
    "sea",
    "nice",
    "antibes",
    "saint-tropez",
    "marseille",
    "cassis",
    "cannes",
    "monaco",
    "cooking",
    "wine",
    "bars",
    "nightclubs",
    "water",
    "sports",
    "packing",
    "clothing",
    "documents",
];

const HR_KEYWORDS: &[&str] = &[
    "forms",
    "fillable",
    "interactive",
    "fields",
    "text",
    "checkbox",
    "radio",
    "signature",
    "sign",
    "e-signature",
    "request",
    "recipients",
    "email",
    "acrobat",
    "pdf",
    "create",
    "convert",
    "edit",
    "export",
    "share",
    "prepare",
    "tools",
    "fill",
    "document",
    "compliance",
    "onboarding",
    "flat",
    "form",
    "comb",
    "buttons",
    "toolbar",
    "position",
    "size",
    "signatures",
    "window",
    "mail",
    "message",
    "subject",
    "addresses",
    "order",
    "signed",
];

const HR_PATTERNS: &[&str] = &[
    "form",
    "fill",
    "sign",
    "field",
    "acrobat",
    "pdf",
    "create",
    "convert",
    "edit",
    "export",
    "share",
    "prepare",
    "tool",
    "interactive",
    "signature",
    "request",
    "recipient",
    "email",
    "document",
    "compliance",
    "onboarding",
];

const FOOD_KEYWORDS: &[&str] = &[
    "recipe",
    "ingredients",
    "cooking",
    "preparation",
    "vegetarian",
    "buffet",
    "dinner",
    "lunch",
    "breakfast",
    "menu",
    "food",
    "cuisine",
    "dishes",
    "meals",
    "catering",
    "corporate",
    "gathering",
    "gluten",
    "free",
    "dietary",
    "restrictions",
    "nutrition",
    "calories",
    "serving",
    "portions",
];

const FOOD_PATTERNS: &[&str] = &[
    "recipe",
    "ingredient",
    "cooking",
    "preparation",
    "vegetarian",
    "buffet",
    "dinner",
    "lunch",
    "breakfast",
    "menu",
    "food",
    "cuisine",
    "dish",
    "meal",
    "catering",
    "corporate",
];

const GENERAL_KEYWORDS: &[&str] = &[
    "guide",
    "comprehensive",
    "major",
    "experiences",
    "tips",
    "tricks",
    "activities",
    "create",
    "manage",
    "tools",
    "document",
    "process",
    "analysis",
    "review",
    "research",
    "study",
    "learn",
    "understand",
];

const GENERAL_PATTERNS: &[&str] = &[
    "guide",
    "comprehensive",
    "major",
    "experience",
    "tip",
    "trick",
    "activity",
    "create",
    "manage",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_priority() {
        assert_eq!(
            PersonaCategory::resolve("Travel Planner", "Plan a 4 day trip"),
            PersonaCategory::Travel
        );
        assert_eq!(
            PersonaCategory::resolve("HR Professional", "prepare onboarding forms"),
            PersonaCategory::Hr
        );
        assert_eq!(
            PersonaCategory::resolve("Food Contractor", "prepare a buffet menu"),
            PersonaCategory::Food
        );
        assert_eq!(
            PersonaCategory::resolve("Research Analyst", "summarize findings"),
            PersonaCategory::General
        );
    }

    #[test]
    fn test_travel_outranks_hr_on_mixed_input() {
        // "professional" would match HR, but travel is checked first.
        assert_eq!(
            PersonaCategory::resolve("Professional Travel Agent", "book a trip"),
            PersonaCategory::Travel
        );
    }

    #[test]
    fn test_task_only_signals() {
        assert_eq!(
            PersonaCategory::resolve("Assistant", "collect signed forms"),
            PersonaCategory::Hr
        );
        assert_eq!(
            PersonaCategory::resolve("Planner", "draft the dinner menu"),
            PersonaCategory::Food
        );
    }

    #[test]
    fn test_resolution_is_total() {
        let profile = PersonaProfile::resolve("", "");
        assert_eq!(profile.category(), PersonaCategory::General);
        assert!(!profile.keywords().is_empty());
    }

    #[test]
    fn test_keyword_matching() {
        let profile = PersonaProfile::for_category(PersonaCategory::Travel);
        assert!(profile.contains_keyword("Coastal Adventures Await"));
        assert_eq!(profile.keyword_matches("Beach bars on the coast"), 3);
        assert!(!profile.contains_keyword("quarterly earnings report"));
    }

    #[test]
    fn test_pattern_matching() {
        let profile = PersonaProfile::for_category(PersonaCategory::Hr);
        assert!(profile.matches_any_pattern("Open the PDF and fill each field"));
        assert!(!profile.matches_any_pattern("the weather was sunny"));
    }

    #[test]
    fn test_keyword_sets_are_deduplicated() {
        for category in [
            PersonaCategory::Travel,
            PersonaCategory::Hr,
            PersonaCategory::Food,
            PersonaCategory::General,
        ] {
            let profile = PersonaProfile::for_category(category);
            let mut seen = std::collections::HashSet::new();
            for keyword in profile.keywords() {
                assert!(seen.insert(*keyword), "duplicate keyword: {keyword}");
            }
        }
    }
}
