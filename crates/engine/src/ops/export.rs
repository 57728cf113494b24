use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, LineItem, Participant, ResultEngine, SummaryDocument, SummarySink,
    build_summary,
};

use super::Session;

/// Saved copy of a session, as written to and read from a file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExport {
    pub people: Vec<Participant>,
    pub receipt_items: Vec<LineItem>,
    pub export_date: DateTime<Utc>,
}

impl SessionExport {
    /// Suggested download name, e.g. `money-split-2024-05-01.json`.
    #[must_use]
    pub fn file_name(&self) -> String {
        export_file_name(self.export_date.date_naive())
    }
}

#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("money-split-{}.json", date.format("%Y-%m-%d"))
}

impl Session {
    /// Rebuild a session from participants and items received from outside.
    pub fn restore(people: Vec<Participant>, items: Vec<LineItem>) -> ResultEngine<Session> {
        Session::builder().participants(people).items(items).build()
    }

    #[must_use]
    pub fn export(&self) -> SessionExport {
        SessionExport {
            people: self.participants().to_vec(),
            receipt_items: self.items().to_vec(),
            export_date: Utc::now(),
        }
    }

    pub fn export_json(&self) -> ResultEngine<String> {
        serde_json::to_string_pretty(&self.export())
            .map_err(|err| EngineError::InvalidInput(err.to_string()))
    }

    /// Replace the whole session with an exported one.
    ///
    /// Nothing changes unless the document parses and every allocation refers
    /// to a participant of the document.
    pub fn import_json(&mut self, json: &str) -> ResultEngine<()> {
        let export: SessionExport = serde_json::from_str(json).map_err(|err| {
            tracing::debug!("import rejected: {err}");
            EngineError::InvalidInput("Invalid file format".to_string())
        })?;
        *self = Session::restore(export.people, export.receipt_items)?;
        tracing::info!(
            participants = self.participants().len(),
            items = self.items().len(),
            "session imported"
        );
        Ok(())
    }

    /// Snapshot the session as a summary document.
    pub fn summary(&self, title: Option<&str>) -> ResultEngine<SummaryDocument> {
        build_summary(title, self.participants(), self.items())
    }

    /// Build a summary and hand it to `sink`. The session is left unchanged
    /// whatever the outcome, so a failed publish can simply be retried.
    pub async fn publish<S: SummarySink>(
        &self,
        sink: &S,
        title: Option<&str>,
    ) -> ResultEngine<String> {
        let document = self.summary(title)?;
        match sink.publish(&document).await {
            Ok(id) => {
                tracing::info!(summary_id = %id, "summary published");
                Ok(id)
            }
            Err(err) => {
                tracing::warn!("summary publish failed: {err}");
                Err(err)
            }
        }
    }
}
