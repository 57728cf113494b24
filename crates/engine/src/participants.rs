//! The module contains `Participant` and the insertion-ordered `Registry`.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Stable identifier of a participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A person among whom the bill is divided.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    /// Creates a participant with a fresh id.
    ///
    /// The name is trimmed and must not be empty.
    pub fn new(name: &str) -> ResultEngine<Self> {
        Ok(Self {
            id: ParticipantId::new(),
            name: normalize_name(name)?,
        })
    }
}

fn normalize_name(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(
            "participant name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Participants of the current bill, in the order they were added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    participants: Vec<Participant>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from already existing participants (e.g. an import).
    ///
    /// Names are re-validated and ids must be unique.
    pub fn from_participants(participants: Vec<Participant>) -> ResultEngine<Self> {
        let mut registry = Self::new();
        for participant in participants {
            if registry.contains(participant.id) {
                return Err(EngineError::InvalidInput(format!(
                    "duplicate participant id {}",
                    participant.id
                )));
            }
            registry.participants.push(Participant {
                id: participant.id,
                name: normalize_name(&participant.name)?,
            });
        }
        Ok(registry)
    }

    /// Adds a participant and returns its id.
    pub fn add(&mut self, name: &str) -> ResultEngine<ParticipantId> {
        let participant = Participant::new(name)?;
        let id = participant.id;
        self.participants.push(participant);
        Ok(id)
    }

    /// Removes a participant from the registry.
    ///
    /// This does not touch items: use [`Session::remove_participant`] to
    /// retract the participant's shares as well.
    ///
    /// [`Session::remove_participant`]: crate::Session::remove_participant
    pub fn remove(&mut self, id: ParticipantId) -> ResultEngine<Participant> {
        match self.participants.iter().position(|p| p.id == id) {
            Some(index) => Ok(self.participants.remove(index)),
            None => Err(EngineError::KeyNotFound(id.to_string())),
        }
    }

    #[must_use]
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ParticipantId) -> bool {
        self.get(id).is_some()
    }

    /// Returns an error unless `id` is a current participant.
    pub fn require(&self, id: ParticipantId) -> ResultEngine<&Participant> {
        self.get(id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))
    }

    #[must_use]
    pub fn ids(&self) -> Vec<ParticipantId> {
        self.participants.iter().map(|p| p.id).collect()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Participant] {
        &self.participants
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
