//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidInput`] thrown when user input is malformed (empty name,
//!   negative or non-numeric amount).
//! - [`KeyNotFound`] thrown when a participant or an item is not in the session.
//! - [`Extraction`] thrown when the receipt extractor could not produce items.
//! - [`Publish`] thrown when the summary sink rejected a document.
//! - [`SummaryNotFound`] thrown when a published summary cannot be retrieved.
//!
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Extraction`]: EngineError::Extraction
//!  [`Publish`]: EngineError::Publish
//!  [`SummaryNotFound`]: EngineError::SummaryNotFound
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Extraction failed: {0}")]
    Extraction(String),
    #[error("Publish failed: {0}")]
    Publish(String),
    #[error("Summary \"{0}\" not found")]
    SummaryNotFound(String),
}
