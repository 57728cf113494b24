//! Receipt extraction through the OCR.space API.

pub use client::{DEFAULT_ENDPOINT, DEFAULT_ENGINE, DEFAULT_LANGUAGE, OcrSpaceClient};
pub use error::OcrError;
pub use parser::parse_receipt_text;

mod client;
mod error;
mod parser;
