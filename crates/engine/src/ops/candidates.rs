use crate::{CandidateList, EngineError, ExtractionOutcome, ResultEngine};

use super::Session;

impl Session {
    /// Load extraction results as editable candidates.
    ///
    /// Found items replace the candidate list and their count is returned.
    /// An empty result returns zero and a failure returns
    /// [`EngineError::Extraction`]; neither touches the session.
    pub fn apply_extraction(&mut self, outcome: ExtractionOutcome) -> ResultEngine<usize> {
        match outcome {
            ExtractionOutcome::Items(items) => {
                self.candidates = CandidateList::from_extracted(items);
                Ok(self.candidates.len())
            }
            ExtractionOutcome::Empty => Ok(0),
            ExtractionOutcome::Failed(reason) => Err(EngineError::Extraction(reason)),
        }
    }

    /// Append every candidate to the items as unsplit, or none of them.
    ///
    /// Returns how many items were added. The candidate list is emptied on
    /// success and left as is on error.
    pub fn commit_candidates(&mut self) -> ResultEngine<usize> {
        let items = self.candidates.to_line_items()?;
        let count = items.len();
        for item in items {
            self.items.push(item);
        }
        self.candidates.clear();
        tracing::debug!(count, "candidates committed");
        Ok(count)
    }
}
