//! Extraction coordinator
//!
//! Straight-line pipeline with no back-edges: classify, fan the independent
//! extractors out across scoped threads, aggregate, then generate the derived
//! summary/action-items/tags keyed off the document type. All state lives in
//! the immutable result being assembled.
//!
//! # Usage
//!
//! ```rust
//! use docstruct::pipeline::{ExtractionOptions, StructuredTextExtractor};
//!
//! let extractor = StructuredTextExtractor::new();
//! let data = extractor.extract(
//!     "John Smith\nSenior Director\nAcme Corp\n(555) 123-4567\njohn@acme.com",
//!     &[],
//!     None,
//!     &ExtractionOptions::comprehensive(),
//! );
//! assert_eq!(data.document_type, docstruct::DocumentType::BusinessCard);
//! ```

mod classify;
mod generate;
mod options;

pub use options::ExtractionOptions;

use crate::annotator::{RuleBasedAnnotator, TextAnnotator};
use crate::business_card::BusinessCardProcessor;
use crate::contact::ContactInfoExtractor;
use crate::entities::EntityExtractor;
use crate::geometry::ImageSize;
use crate::layout::DocumentLayoutAnalyzer;
use crate::model::{DocumentType, StructuredTextData, TextBlock};
use std::sync::Arc;
use std::thread;

/// Confidence reported when no extractor produced one.
const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Orchestrates the extractors into one [`StructuredTextData`] per call.
pub struct StructuredTextExtractor {
    contact_extractor: ContactInfoExtractor,
    card_processor: BusinessCardProcessor,
    layout_analyzer: DocumentLayoutAnalyzer,
    entity_extractor: EntityExtractor,
}

impl Default for StructuredTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuredTextExtractor {
    pub fn new() -> Self {
        Self::with_annotator(Arc::new(RuleBasedAnnotator::new()))
    }

    /// Builds the pipeline around one shared annotator.
    pub fn with_annotator(annotator: Arc<dyn TextAnnotator>) -> Self {
        Self {
            contact_extractor: ContactInfoExtractor::with_annotator(annotator.clone()),
            card_processor: BusinessCardProcessor::with_annotator(annotator.clone()),
            layout_analyzer: DocumentLayoutAnalyzer::new(),
            entity_extractor: EntityExtractor::with_annotator(annotator),
        }
    }

    /// Runs the stages selected by `options` and aggregates their results.
    ///
    /// Empty input short-circuits every stage; the result is the default
    /// aggregate with the default confidence.
    pub fn extract(
        &self,
        text: &str,
        blocks: &[TextBlock],
        image_size: Option<ImageSize>,
        options: &ExtractionOptions,
    ) -> StructuredTextData {
        if text.trim().is_empty() && blocks.is_empty() {
            return StructuredTextData {
                processing_confidence: DEFAULT_CONFIDENCE,
                ..StructuredTextData::default()
            };
        }
        tracing::debug!(blocks = blocks.len(), "starting extraction");

        // Contact, layout, and entity extraction are pure and mutually
        // independent; run them on scoped threads and join before anything
        // that consumes their output.
        let (contact_info, document_layout, extracted_entities) = thread::scope(|scope| {
            let contact_handle = options
                .extract_contact_info
                .then(|| scope.spawn(|| self.contact_extractor.extract(text)));
            let layout_handle = options
                .analyze_layout
                .then(|| scope.spawn(|| self.layout_analyzer.analyze(blocks, image_size)));
            let entity_handle = options
                .extract_entities
                .then(|| scope.spawn(|| self.entity_extractor.extract(text)));
            (
                contact_handle.map(join_or_propagate),
                layout_handle.map(join_or_propagate),
                entity_handle.map(join_or_propagate),
            )
        });

        // The card processor's strict gate is the classification authority
        // for business cards, so it runs whenever classification is on.
        let business_card = if options.detect_business_card || options.classify_document_type {
            self.card_processor.detect(text, contact_info.as_ref())
        } else {
            None
        };

        let document_type = if !options.classify_document_type {
            DocumentType::Generic
        } else if business_card.is_some() {
            DocumentType::BusinessCard
        } else {
            classify::classify_document_type(text)
        };
        tracing::debug!(?document_type, "classification complete");

        let business_card = business_card.filter(|_| {
            options.detect_business_card || document_type == DocumentType::BusinessCard
        });

        let mut confidences = Vec::new();
        if !blocks.is_empty() {
            let mean = blocks.iter().map(|b| b.confidence).sum::<f64>() / blocks.len() as f64;
            confidences.push(mean);
        }
        if let Some(card) = &business_card {
            confidences.push(card.confidence);
        }
        if let Some(layout) = &document_layout {
            confidences.push(layout.confidence);
        }
        if let Some(entities) = &extracted_entities {
            confidences.push(entities.confidence);
        }
        let processing_confidence = if confidences.is_empty() {
            DEFAULT_CONFIDENCE
        } else {
            confidences.iter().sum::<f64>() / confidences.len() as f64
        };

        let summary = generate::generate_summary(
            document_type,
            business_card.as_ref(),
            document_layout.as_ref(),
            extracted_entities.as_ref(),
        );
        let action_items = generate::generate_action_items(
            document_type,
            business_card.as_ref(),
            extracted_entities.as_ref(),
        )
        .into_iter()
        .map(|item| item.title)
        .collect();
        let presence_contact = contact_info
            .as_ref()
            .or_else(|| business_card.as_ref().map(|c| &c.contact_info));
        let tags = generate::generate_smart_tags(
            document_type,
            presence_contact,
            extracted_entities.as_ref(),
        );

        StructuredTextData {
            contact_info,
            business_card,
            document_layout,
            extracted_entities,
            document_type,
            processing_confidence,
            summary: Some(summary),
            action_items,
            tags,
        }
    }
}

fn join_or_propagate<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
