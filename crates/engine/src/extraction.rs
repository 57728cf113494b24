//! Contract with the receipt extraction service.
//!
//! The engine only consumes a list of `{ name, price }` candidates. How they
//! are produced (OCR plus text heuristics, a vision model, ...) is up to the
//! [`ReceiptExtractor`] implementation.

use serde::{Deserialize, Serialize};

use crate::ResultEngine;

/// A raw `{ name, price }` pair as returned by an extractor.
///
/// `price` is a major-unit float straight from the service; it becomes money
/// only when the candidate is committed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractedItem {
    pub name: String,
    pub price: f64,
}

/// An uploaded receipt photo.
#[derive(Clone, Debug)]
pub struct ReceiptImage {
    pub bytes: Vec<u8>,
    /// MIME type, e.g. `image/jpeg`.
    pub content_type: String,
    /// Language/locale hint for the recognizer.
    pub language: Option<String>,
}

impl ReceiptImage {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
            language: None,
        }
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Something that turns a receipt image into item candidates.
///
/// Implementations return `Ok(vec![])` when the image was readable but held
/// no priced items, and [`EngineError::Extraction`] for every other failure.
///
/// [`EngineError::Extraction`]: crate::EngineError::Extraction
pub trait ReceiptExtractor {
    fn extract(
        &self,
        image: &ReceiptImage,
    ) -> impl Future<Output = ResultEngine<Vec<ExtractedItem>>> + Send;
}

/// Terminal result of one extraction call.
#[derive(Clone, Debug, PartialEq)]
pub enum ExtractionOutcome {
    Items(Vec<ExtractedItem>),
    /// Recognized, but nothing with a price was found.
    Empty,
    Failed(String),
}

impl ExtractionOutcome {
    /// User-facing banner text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Items(items) => format!(
                "Successfully extracted {} items from your receipt!",
                items.len()
            ),
            Self::Empty => "No items with prices were found in the receipt. \
                You can add items manually below."
                .to_string(),
            Self::Failed(reason) => reason.clone(),
        }
    }
}

/// Runs `extractor` and folds every failure into [`ExtractionOutcome::Failed`].
pub async fn extract_receipt<E: ReceiptExtractor>(
    extractor: &E,
    image: &ReceiptImage,
) -> ExtractionOutcome {
    match extractor.extract(image).await {
        Ok(items) if items.is_empty() => ExtractionOutcome::Empty,
        Ok(items) => {
            tracing::info!(count = items.len(), "receipt extraction succeeded");
            ExtractionOutcome::Items(items)
        }
        Err(err) => {
            tracing::warn!("receipt extraction failed: {err}");
            let reason = match err {
                crate::EngineError::Extraction(reason) => reason,
                other => other.to_string(),
            };
            ExtractionOutcome::Failed(reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;

    struct Fixed(ResultEngine<Vec<ExtractedItem>>);

    impl ReceiptExtractor for Fixed {
        async fn extract(&self, _image: &ReceiptImage) -> ResultEngine<Vec<ExtractedItem>> {
            self.0.clone()
        }
    }

    fn image() -> ReceiptImage {
        ReceiptImage::new(vec![0xFF, 0xD8], "image/jpeg").language("eng")
    }

    #[tokio::test]
    async fn empty_list_is_not_an_error() {
        let outcome = extract_receipt(&Fixed(Ok(vec![])), &image()).await;
        assert_eq!(outcome, ExtractionOutcome::Empty);
        assert!(outcome.message().starts_with("No items with prices"));
    }

    #[tokio::test]
    async fn failures_keep_their_reason() {
        let outcome = extract_receipt(
            &Fixed(Err(EngineError::Extraction("No text found in the image".into()))),
            &image(),
        )
        .await;
        assert_eq!(
            outcome,
            ExtractionOutcome::Failed("No text found in the image".to_string())
        );
    }

    #[tokio::test]
    async fn items_are_passed_through() {
        let items = vec![ExtractedItem {
            name: "Latte".to_string(),
            price: 4.5,
        }];
        let outcome = extract_receipt(&Fixed(Ok(items.clone())), &image()).await;
        assert_eq!(outcome.message(), "Successfully extracted 1 items from your receipt!");
        assert_eq!(outcome, ExtractionOutcome::Items(items));
    }
}
