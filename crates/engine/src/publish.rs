//! Publishing summaries to a shareable store.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::{EngineError, ResultEngine, SummaryDocument};

/// Storage for published summary documents.
///
/// `publish` returns the id under which the document can be fetched back.
/// Documents are insert-only: publishing never overwrites.
pub trait SummarySink {
    fn publish(
        &self,
        document: &SummaryDocument,
    ) -> impl Future<Output = ResultEngine<String>> + Send;

    fn fetch(&self, id: &str) -> impl Future<Output = ResultEngine<SummaryDocument>> + Send;
}

/// In-process sink holding the serialized documents.
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: Mutex<HashMap<String, String>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SummarySink for MemorySink {
    async fn publish(&self, document: &SummaryDocument) -> ResultEngine<String> {
        let json = serde_json::to_string(document)
            .map_err(|err| EngineError::Publish(err.to_string()))?;
        let id = document.id.to_string();
        let mut documents = self
            .documents
            .lock()
            .map_err(|_| EngineError::Publish("summary store poisoned".to_string()))?;
        if documents.contains_key(&id) {
            return Err(EngineError::Publish(format!("summary {id} already published")));
        }
        documents.insert(id.clone(), json);
        Ok(id)
    }

    async fn fetch(&self, id: &str) -> ResultEngine<SummaryDocument> {
        let json = {
            let documents = self
                .documents
                .lock()
                .map_err(|_| EngineError::Publish("summary store poisoned".to_string()))?;
            documents
                .get(id)
                .cloned()
                .ok_or_else(|| EngineError::SummaryNotFound(id.to_string()))?
        };
        serde_json::from_str(&json).map_err(|err| EngineError::Publish(err.to_string()))
    }
}
