use thiserror::Error;

/// Errors surfaced at the pluggable annotation boundary.
///
/// The extraction pipeline itself has no fatal surface: absence of evidence is
/// modeled as `None` or an empty collection, never as an error. This type
/// exists for [`TextAnnotator`](crate::annotator::TextAnnotator)
/// implementations backed by external services, which may legitimately fail;
/// callers fall back to empty annotations when they do.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Annotator not available: {0}")]
    AnnotatorUnavailable(String),

    #[error("Annotation failed: {0}")]
    AnnotationFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
