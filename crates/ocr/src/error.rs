use engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR API error: {0}")]
    Status(u16),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Processing(String),
    #[error("No text found in the image")]
    NoText,
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

impl From<OcrError> for EngineError {
    fn from(err: OcrError) -> Self {
        EngineError::Extraction(err.to_string())
    }
}
