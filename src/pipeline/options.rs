//! Extraction toggles and named presets

/// Selects which extraction stages run.
///
/// The default is [`ExtractionOptions::comprehensive`]. Classification may
/// force business-card extraction on even when the toggle is off; the toggles
/// otherwise gate stages independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionOptions {
    pub extract_contact_info: bool,
    pub detect_business_card: bool,
    pub analyze_layout: bool,
    pub extract_entities: bool,
    pub classify_document_type: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self::comprehensive()
    }
}

impl ExtractionOptions {
    /// Every stage enabled.
    pub fn comprehensive() -> Self {
        Self {
            extract_contact_info: true,
            detect_business_card: true,
            analyze_layout: true,
            extract_entities: true,
            classify_document_type: true,
        }
    }

    /// Contact details and card identity only; layout geometry is skipped.
    pub fn business_card() -> Self {
        Self {
            extract_contact_info: true,
            detect_business_card: true,
            analyze_layout: false,
            extract_entities: false,
            classify_document_type: true,
        }
    }

    /// Layout structure and entities for posted notices and announcements.
    pub fn notice() -> Self {
        Self {
            extract_contact_info: true,
            detect_business_card: false,
            analyze_layout: true,
            extract_entities: true,
            classify_document_type: true,
        }
    }

    /// Classification only; no extraction stages.
    pub fn minimal() -> Self {
        Self {
            extract_contact_info: false,
            detect_business_card: false,
            analyze_layout: false,
            extract_entities: false,
            classify_document_type: true,
        }
    }
}
