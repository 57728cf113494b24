use crate::{Participant, ParticipantId, ResultEngine};

use super::Session;

impl Session {
    /// Add a participant at the end of the list.
    pub fn add_participant(&mut self, name: &str) -> ResultEngine<ParticipantId> {
        let id = self.registry.add(name)?;
        tracing::debug!(participant_id = %id, "participant added");
        Ok(id)
    }

    /// Remove a participant and retract them from every allocation.
    ///
    /// Individual assignments to them revert to unsplit; they leave equal sets
    /// and custom splits. Other participants' data is untouched.
    pub fn remove_participant(&mut self, id: ParticipantId) -> ResultEngine<Participant> {
        let participant = self.registry.remove(id)?;
        let changed = self.items.retract_participant(id);
        tracing::debug!(
            participant_id = %id,
            items = changed.len(),
            "participant removed"
        );
        Ok(participant)
    }
}
