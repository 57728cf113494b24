use crate::{CandidateList, LineItem, LineItemStore, Participant, Registry, ResultEngine};

mod candidates;
mod export;
mod items;
mod participants;

pub use export::{SessionExport, export_file_name};

/// The state of one bill being split.
///
/// All commands go through `&mut self` and run to completion before the next
/// one starts; queries borrow immutable slices and recompute everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    registry: Registry,
    items: LineItemStore,
    candidates: CandidateList,
}

impl Session {
    /// Return an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a builder for `Session`. Help to start from existing data.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        self.registry.as_slice()
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.items.as_slice()
    }

    #[must_use]
    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    pub fn candidates_mut(&mut self) -> &mut CandidateList {
        &mut self.candidates
    }
}

/// The builder for `Session`
#[derive(Default)]
pub struct SessionBuilder {
    participants: Vec<Participant>,
    items: Vec<LineItem>,
}

impl SessionBuilder {
    /// Pass the participants, in display order
    pub fn participants(mut self, participants: Vec<Participant>) -> SessionBuilder {
        self.participants = participants;
        self
    }

    /// Pass the line items
    pub fn items(mut self, items: Vec<LineItem>) -> SessionBuilder {
        self.items = items;
        self
    }

    /// Construct `Session`, checking every allocation against the participants.
    pub fn build(self) -> ResultEngine<Session> {
        let registry = Registry::from_participants(self.participants)?;
        let items = LineItemStore::from_items(self.items, &registry)?;
        Ok(Session {
            registry,
            items,
            candidates: CandidateList::new(),
        })
    }
}
