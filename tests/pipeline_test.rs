//! Integration tests for end-to-end extraction workflows
//!
//! These tests feed raw text and OCR blocks through the full coordinator and
//! validate the aggregate output across modules working together.

use docstruct::{
    BoundingBox, DocumentType, ExtractionOptions, StructuredTextExtractor, TextBlock,
};
use pretty_assertions::assert_eq;

const CARD_TEXT: &str = "John Smith\nSenior Director\nAcme Corp\n(555) 123-4567\njohn@acme.com";

#[test]
fn test_business_card_end_to_end() {
    let extractor = StructuredTextExtractor::new();
    let data = extractor.extract(CARD_TEXT, &[], None, &ExtractionOptions::comprehensive());

    assert_eq!(data.document_type, DocumentType::BusinessCard);

    let card = data.business_card.as_ref().expect("card detected");
    let name = card.name.as_ref().expect("name extracted");
    assert_eq!(name.full_name, "John Smith");
    assert!(card.title.as_deref().expect("title").contains("Director"));
    assert_eq!(card.company.as_deref(), Some("Acme Corp"));

    for expected in ["business_card", "networking", "contact", "acme corp"] {
        assert!(
            data.tags.iter().any(|t| t == expected),
            "missing tag {expected:?} in {:?}",
            data.tags
        );
    }
    assert!(data.tags.len() <= 8);

    let summary = data.summary.as_deref().expect("summary generated");
    assert!(summary.starts_with("Business Card - "));
    assert!(summary.contains("Contact: John Smith"));
    assert!(summary.contains("Company: Acme Corp"));

    assert!(data
        .action_items
        .iter()
        .any(|item| item == "Add contact to CRM"));
    assert!(data
        .action_items
        .iter()
        .any(|item| item == "Send follow-up email"));
}

#[test]
fn test_narrative_text_is_not_a_business_card() {
    let sentence = "the committee reviewed the quarterly budget and agreed to revisit the plan ";
    let narrative = sentence.repeat(13); // ~150 words, no contact info
    let extractor = StructuredTextExtractor::new();
    let data = extractor.extract(&narrative, &[], None, &ExtractionOptions::comprehensive());
    assert!(data.business_card.is_none());
    assert_ne!(data.document_type, DocumentType::BusinessCard);
}

#[test]
fn test_receipt_workflow() {
    let text = "CORNER STORE RECEIPT\nCoffee $3.50\nBagel $2.25\nSubtotal $5.75\nTax $0.50\nTotal $6.25";
    let extractor = StructuredTextExtractor::new();
    let data = extractor.extract(text, &[], None, &ExtractionOptions::comprehensive());

    assert_eq!(data.document_type, DocumentType::Receipt);
    let entities = data.extracted_entities.as_ref().expect("entities extracted");
    assert!(!entities.currencies.is_empty());
    let summary = data.summary.as_deref().expect("summary");
    assert!(summary.contains("$6.25"), "summary was {summary:?}");
    assert!(data.tags.iter().any(|t| t == "receipt"));
}

#[test]
fn test_form_workflow() {
    let text = "Rental Application\nPlease fill out all fields below.\nSignature: ____________";
    let extractor = StructuredTextExtractor::new();
    let data = extractor.extract(text, &[], None, &ExtractionOptions::comprehensive());

    assert_eq!(data.document_type, DocumentType::Form);
    assert_eq!(data.summary.as_deref(), Some("Form - Requires completion"));
    assert_eq!(
        data.action_items,
        vec!["Complete form".to_string(), "Submit completed form".to_string()]
    );
}

#[test]
fn test_layout_analysis_through_pipeline() {
    let blocks = vec![
        TextBlock::new("MEETING AGENDA", BoundingBox::new(0.35, 0.95, 0.30, 0.04), 0.98),
        TextBlock::new("Overview", BoundingBox::new(0.05, 0.88, 0.20, 0.03), 0.95),
        TextBlock::new("Numbers came in flat.", BoundingBox::new(0.05, 0.84, 0.60, 0.03), 0.92),
        TextBlock::new("Next Steps", BoundingBox::new(0.05, 0.78, 0.20, 0.03), 0.94),
        TextBlock::new("1. Budget review", BoundingBox::new(0.05, 0.72, 0.50, 0.03), 0.93),
        TextBlock::new("2. Hiring plan", BoundingBox::new(0.05, 0.68, 0.50, 0.03), 0.91),
    ];
    let text = blocks
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let extractor = StructuredTextExtractor::new();
    let data = extractor.extract(&text, &blocks, None, &ExtractionOptions::comprehensive());

    let layout = data.document_layout.as_ref().expect("layout analyzed");
    assert_eq!(layout.title.as_deref(), Some("MEETING AGENDA"));
    assert!(layout.sections.len() >= 2);
    assert_eq!(layout.numbered_lists.len(), 1);
    assert!(layout.is_structured);
}

#[test]
fn test_empty_input_produces_default_aggregate() {
    let extractor = StructuredTextExtractor::new();
    let data = extractor.extract("", &[], None, &ExtractionOptions::comprehensive());
    assert_eq!(data.document_type, DocumentType::Generic);
    assert!(data.contact_info.is_none());
    assert!(data.business_card.is_none());
    assert!(data.document_layout.is_none());
    assert!(data.extracted_entities.is_none());
    assert!(data.summary.is_none());
    assert!(data.tags.is_empty());
    assert!((data.processing_confidence - 0.5).abs() < 1e-9);
}

#[test]
fn test_minimal_preset_classifies_without_extraction() {
    let extractor = StructuredTextExtractor::new();
    let text = "Dear Ms. Doe,\nThank you for writing.\nSincerely,\nJohn";
    let data = extractor.extract(text, &[], None, &ExtractionOptions::minimal());

    assert_eq!(data.document_type, DocumentType::Letter);
    assert!(data.contact_info.is_none());
    assert!(data.document_layout.is_none());
    assert!(data.extracted_entities.is_none());
}

#[test]
fn test_business_card_preset_skips_layout_and_entities() {
    let extractor = StructuredTextExtractor::new();
    let data = extractor.extract(CARD_TEXT, &[], None, &ExtractionOptions::business_card());

    assert_eq!(data.document_type, DocumentType::BusinessCard);
    assert!(data.business_card.is_some());
    assert!(data.contact_info.is_some());
    assert!(data.document_layout.is_none());
    assert!(data.extracted_entities.is_none());
}

#[test]
fn test_processing_confidence_in_bounds() {
    let extractor = StructuredTextExtractor::new();
    for text in [CARD_TEXT, "short note", "NOTICE\nAttention residents"] {
        let data = extractor.extract(text, &[], None, &ExtractionOptions::comprehensive());
        assert!((0.0..=1.0).contains(&data.processing_confidence));
    }
}

#[test]
fn test_aggregate_serializes_to_json() {
    let extractor = StructuredTextExtractor::new();
    let data = extractor.extract(CARD_TEXT, &[], None, &ExtractionOptions::comprehensive());

    let json = serde_json::to_string(&data).expect("serialize");
    let back: docstruct::StructuredTextData = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, data);
}
