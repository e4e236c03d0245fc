//! Keyword-based document-type classification
//!
//! Each candidate type has a weighted keyword table; the highest-scoring type
//! wins if it clears a minimum score, otherwise the document stays generic.
//! Business cards are not scored here: the card processor's strict gate is
//! authoritative and the coordinator lets it take priority.

use crate::model::DocumentType;

/// Minimum winning score; anything below classifies as generic.
const MIN_SCORE: u32 = 2;

const NOTICE_KEYWORDS: &[(&str, u32)] = &[
    ("notice", 2),
    ("attention", 2),
    ("announcement", 2),
    ("reminder", 1),
    ("effective immediately", 2),
    ("posted", 1),
    ("warning", 1),
];

const FORM_KEYWORDS: &[(&str, u32)] = &[
    ("application", 2),
    ("form", 2),
    ("fill out", 2),
    ("signature", 1),
    ("applicant", 1),
    ("date of birth", 1),
    ("please print", 1),
];

const RECEIPT_KEYWORDS: &[(&str, u32)] = &[
    ("receipt", 2),
    ("subtotal", 2),
    ("total", 1),
    ("tax", 1),
    ("change due", 2),
    ("cash", 1),
    ("thank you for your purchase", 2),
];

const LETTER_KEYWORDS: &[(&str, u32)] = &[
    ("dear", 2),
    ("sincerely", 2),
    ("regards", 2),
    ("to whom it may concern", 2),
    ("yours truly", 2),
];

const FLYER_KEYWORDS: &[(&str, u32)] = &[
    ("sale", 1),
    ("% off", 2),
    ("discount", 1),
    ("free", 1),
    ("join us", 2),
    ("limited time", 2),
    ("grand opening", 2),
];

const MENU_KEYWORDS: &[(&str, u32)] = &[
    ("menu", 2),
    ("appetizer", 2),
    ("entree", 2),
    ("dessert", 1),
    ("beverage", 1),
    ("served with", 1),
    ("daily special", 2),
];

pub(crate) fn classify_document_type(text: &str) -> DocumentType {
    let lower = text.to_lowercase();
    let candidates = [
        (DocumentType::Notice, NOTICE_KEYWORDS),
        (DocumentType::Form, FORM_KEYWORDS),
        (DocumentType::Receipt, RECEIPT_KEYWORDS),
        (DocumentType::Letter, LETTER_KEYWORDS),
        (DocumentType::Flyer, FLYER_KEYWORDS),
        (DocumentType::Menu, MENU_KEYWORDS),
    ];

    let mut best = (DocumentType::Generic, 0u32);
    for (doc_type, table) in candidates {
        let score = score_keywords(&lower, table);
        if score > best.1 {
            best = (doc_type, score);
        }
    }
    if best.1 >= MIN_SCORE {
        tracing::debug!(doc_type = ?best.0, score = best.1, "classified document");
        best.0
    } else {
        DocumentType::Generic
    }
}

fn score_keywords(lower: &str, table: &[(&str, u32)]) -> u32 {
    table
        .iter()
        .filter(|(keyword, _)| lower.contains(keyword))
        .map(|(_, weight)| weight)
        .sum()
}
