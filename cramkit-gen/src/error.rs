use thiserror::Error;

/// Pipeline failures. Every stage fails fast; the first failure aborts the
/// whole invocation and partial results are never returned.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("could not extract sufficient text from the document; ensure the file contains readable text")]
    InsufficientText,
    #[error("text extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("model returned an invalid response: {0}")]
    MalformedResponse(String),
    #[error("no valid flashcards could be generated from the content")]
    NoValidCards,
    #[error("hosted model request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
