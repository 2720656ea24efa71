//! Integration tests for the collection pipeline.

use std::collections::HashMap;

use docsift::{
    process_collection, BBox, CollectionRequest, DocumentRef, DocumentText, Error, PersonaCategory,
    PersonaProfile, PipelineConfig, Result, TextElement, FLAG_BOLD,
};

fn heading(text: &str, page: u32) -> TextElement {
    TextElement::new(
        text,
        "Helvetica-Bold",
        16.0,
        FLAG_BOLD,
        page,
        BBox::new(72.0, 40.0, 72.0 + 8.0 * text.len() as f32, 56.0),
        612.0,
        792.0,
    )
}

fn body(text: &str, page: u32) -> TextElement {
    TextElement::new(
        text,
        "Helvetica",
        11.0,
        0,
        page,
        BBox::new(72.0, 300.0, 540.0, 380.0),
        612.0,
        792.0,
    )
}

fn config() -> PipelineConfig {
    PipelineConfig::default().sequential()
}

fn fixtures(docs: Vec<(&str, DocumentText)>) -> HashMap<String, DocumentText> {
    docs.into_iter()
        .map(|(name, doc)| (name.to_string(), doc))
        .collect()
}

fn opener(fixtures: &HashMap<String, DocumentText>) -> impl Fn(&str) -> Result<DocumentText> + '_ {
    move |filename| {
        fixtures
            .get(filename)
            .cloned()
            .ok_or_else(|| Error::MissingSource(filename.into()))
    }
}

/// Six travel documents, each with one keyword-bearing section title and
/// one long relevant body block.
fn travel_collection() -> HashMap<String, DocumentText> {
    let specs: [(&str, &str, &str); 6] = [
        (
            "cities.pdf",
            "Guide to Major Cities",
            "The guide covers each coastal city with notes on beach access and nightlife for visitors.",
        ),
        (
            "cuisine.pdf",
            "Culinary Experiences",
            "Cooking classes and wine tours anchor the culinary calendar along the coast each season.",
        ),
        (
            "hotels.pdf",
            "Hotels and Restaurants",
            "Restaurants near the sea fill quickly, so hotels recommend booking dinner ahead.",
        ),
        (
            "things.pdf",
            "Coastal Adventures",
            "Water sports from jet skiing to parasailing and scuba diving run from the marina.",
        ),
        (
            "packing.pdf",
            "Packing Tips and Tricks",
            "Packing means layering clothing for sea winds and keeping documents and passport handy.",
        ),
        (
            "history.pdf",
            "Traditions and Culture",
            "Festivals trace coastal traditions and the nightlife of the old harbor quarter.",
        ),
    ];

    fixtures(
        specs
            .into_iter()
            .map(|(name, title, text)| {
                (
                    name,
                    DocumentText::new(vec![vec![heading(title, 1)], vec![body(text, 2)]]),
                )
            })
            .collect(),
    )
}

fn travel_request(docs: &HashMap<String, DocumentText>) -> CollectionRequest {
    let mut names: Vec<&String> = docs.keys().collect();
    names.sort();
    CollectionRequest::new(
        names.into_iter().map(DocumentRef::new).collect(),
        "Travel Planner",
        "Plan a trip of 4 days for a group of 10 college friends.",
    )
}

#[test]
fn selection_caps_at_five_and_covers_distinct_documents() {
    let docs = travel_collection();
    let output = process_collection(&travel_request(&docs), opener(&docs), &config());

    assert_eq!(output.extracted_sections.len(), 5);
    assert_eq!(output.subsection_analysis.len(), 5);

    let mut section_docs: Vec<&str> = output
        .extracted_sections
        .iter()
        .map(|s| s.document.as_str())
        .collect();
    section_docs.sort_unstable();
    section_docs.dedup();
    assert_eq!(
        section_docs.len(),
        5,
        "with six contributing documents every selected section comes from a distinct one"
    );
}

#[test]
fn importance_ranks_form_a_permutation() {
    let docs = travel_collection();
    let output = process_collection(&travel_request(&docs), opener(&docs), &config());

    let mut ranks: Vec<u32> = output
        .extracted_sections
        .iter()
        .map(|s| s.importance_rank)
        .collect();
    ranks.sort_unstable();
    ranks.dedup();
    assert_eq!(ranks.len(), output.extracted_sections.len());
    assert!(ranks.iter().all(|&r| r >= 1));
}

#[test]
fn hr_persona_resolves_to_hr_profile() {
    let profile = PersonaProfile::resolve("HR Professional", "prepare onboarding forms");
    assert_eq!(profile.category(), PersonaCategory::Hr);
    assert!(profile.contains_keyword("fillable form fields"));
    assert!(!profile.contains_keyword("beach"));
}

#[test]
fn hr_collection_prefers_form_sections() {
    let docs = fixtures(vec![(
        "acrobat.pdf",
        DocumentText::new(vec![
            vec![
                heading("Fill and Sign Forms", 1),
                heading("Travel Reimbursement", 2),
            ],
            vec![body(
                "Open the form in the editor, fill each field, and request a signature from every recipient by email.",
                3,
            )],
        ]),
    )]);

    let request = CollectionRequest::new(
        vec![DocumentRef::new("acrobat.pdf")],
        "HR Professional",
        "Create and manage fillable forms for onboarding and compliance.",
    );

    let output = process_collection(&request, opener(&docs), &config());

    assert_eq!(output.extracted_sections[0].section_title, "Fill and Sign Forms");
    assert_eq!(output.extracted_sections[0].importance_rank, 1);

    // Subsection refinement keeps the persona-relevant sentence.
    assert_eq!(output.subsection_analysis.len(), 1);
    assert!(output.subsection_analysis[0].refined_text.contains("fill each field"));
}

#[test]
fn short_irrelevant_blocks_never_surface() {
    let docs = fixtures(vec![(
        "notes.pdf",
        DocumentText::new(vec![vec![
            // 25 characters, zero keyword matches: dropped outright.
            body("nothing relevant in here.", 1),
        ]]),
    )]);

    let request = CollectionRequest::new(
        vec![DocumentRef::new("notes.pdf")],
        "Travel Planner",
        "Plan a trip.",
    );

    let output = process_collection(&request, opener(&docs), &config());
    assert!(output.subsection_analysis.is_empty());
}

#[test]
fn missing_documents_are_skipped_not_fatal() {
    let docs = travel_collection();
    let mut request = travel_request(&docs);
    request.documents.push(DocumentRef::new("missing.pdf"));

    let output = process_collection(&request, opener(&docs), &config());

    assert_eq!(output.metadata.input_documents.len(), 7);
    assert!(output
        .extracted_sections
        .iter()
        .all(|s| s.document != "missing.pdf"));
}

#[test]
fn metadata_echoes_request() {
    let docs = travel_collection();
    let request = travel_request(&docs);
    let output = process_collection(&request, opener(&docs), &config());

    assert_eq!(output.metadata.persona, "Travel Planner");
    assert_eq!(
        output.metadata.job_to_be_done,
        "Plan a trip of 4 days for a group of 10 college friends."
    );
    // RFC 3339 timestamp shape.
    assert!(output.metadata.processing_timestamp.contains('T'));
}

#[test]
fn repeated_runs_are_identical_modulo_timestamp() {
    let docs = travel_collection();
    let request = travel_request(&docs);

    let strip = |mut output: docsift::CollectionOutput| {
        output.metadata.processing_timestamp.clear();
        serde_json::to_string(&output).unwrap()
    };

    let first = strip(process_collection(&request, opener(&docs), &config()));
    let second = strip(process_collection(&request, opener(&docs), &config()));
    assert_eq!(first, second);
}

#[test]
fn parallel_and_sequential_agree() {
    let docs = travel_collection();
    let request = travel_request(&docs);

    let strip = |mut output: docsift::CollectionOutput| {
        output.metadata.processing_timestamp.clear();
        serde_json::to_string(&output).unwrap()
    };

    let sequential = strip(process_collection(&request, opener(&docs), &config()));
    let parallel = strip(process_collection(
        &request,
        opener(&docs),
        &PipelineConfig::default(),
    ));
    assert_eq!(sequential, parallel);
}
