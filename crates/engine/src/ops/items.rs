use crate::{
    Allocation, AllocationStatus, BreakdownLine, Classification, ItemId, LineItem, MoneyCents,
    ParticipantId, ResultEngine, SplitDraft, Totals, aggregate_totals, allocation_status,
    classify, grand_total, items_by_participant, participant_breakdown,
};

use super::Session;

impl Session {
    /// Add an unsplit item.
    pub fn add_item(&mut self, name: &str, price: MoneyCents) -> ResultEngine<ItemId> {
        let id = self.items.add(name, price)?;
        tracing::debug!(item_id = %id, price = %price, "item added");
        Ok(id)
    }

    pub fn remove_item(&mut self, id: ItemId) -> ResultEngine<LineItem> {
        let item = self.items.remove(id)?;
        tracing::debug!(item_id = %id, "item removed");
        Ok(item)
    }

    /// Replace the allocation of an item. Prior split data is discarded.
    pub fn set_allocation(&mut self, id: ItemId, allocation: Allocation) -> ResultEngine<()> {
        let kind = allocation.kind();
        self.items.set_allocation(id, allocation, &self.registry)?;
        tracing::debug!(item_id = %id, split = kind.as_str(), "allocation set");
        Ok(())
    }

    /// Give the whole item to one participant.
    pub fn assign_individual(
        &mut self,
        id: ItemId,
        participant_id: ParticipantId,
    ) -> ResultEngine<()> {
        self.set_allocation(id, Allocation::Individual { participant_id })
    }

    /// Move the item back to the unsplit pool.
    pub fn reset_item(&mut self, id: ItemId) -> ResultEngine<()> {
        self.set_allocation(id, Allocation::Unsplit)
    }

    pub fn update_unequal_share(
        &mut self,
        id: ItemId,
        participant: ParticipantId,
        amount: MoneyCents,
    ) -> ResultEngine<()> {
        self.items
            .update_unequal_share(id, participant, amount, &self.registry)
    }

    pub fn toggle_equal_participant(
        &mut self,
        id: ItemId,
        participant: ParticipantId,
        included: bool,
    ) -> ResultEngine<()> {
        self.items
            .toggle_equal_participant(id, participant, included, &self.registry)
    }

    pub fn select_all_for_equal(&mut self, id: ItemId, select_all: bool) -> ResultEngine<()> {
        self.items.select_all_for_equal(id, select_all, &self.registry)
    }

    /// Start an equal split of `id` with every participant selected.
    pub fn draft_equal_split(&self, id: ItemId) -> ResultEngine<SplitDraft> {
        Ok(SplitDraft::equal(self.items.require(id)?, &self.registry))
    }

    /// Start a custom split of `id` with every amount at zero.
    pub fn draft_unequal_split(&self, id: ItemId) -> ResultEngine<SplitDraft> {
        Ok(SplitDraft::unequal(self.items.require(id)?, &self.registry))
    }

    /// Commit a draft as the item's allocation, refusing invalid drafts.
    pub fn confirm_split(&mut self, draft: SplitDraft) -> ResultEngine<()> {
        let (id, allocation) = draft.into_allocation()?;
        self.set_allocation(id, allocation)
    }

    pub fn totals(&self) -> ResultEngine<Totals> {
        aggregate_totals(self.items(), self.participants())
    }

    pub fn grand_total(&self) -> ResultEngine<MoneyCents> {
        grand_total(self.items())
    }

    pub fn classify(&self) -> ResultEngine<Classification<'_>> {
        classify(self.items())
    }

    pub fn allocation_status(&self, id: ItemId) -> ResultEngine<AllocationStatus> {
        Ok(allocation_status(self.items.require(id)?))
    }

    pub fn participant_breakdown(
        &self,
        participant: ParticipantId,
    ) -> ResultEngine<Vec<BreakdownLine<'_>>> {
        self.registry.require(participant)?;
        Ok(participant_breakdown(participant, self.items()))
    }

    #[must_use]
    pub fn items_by_participant(&self) -> Vec<(ParticipantId, Vec<&LineItem>)> {
        items_by_participant(self.items(), self.participants())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Allocation, AllocationStatus, EngineError, MoneyCents, Session};

    #[test]
    fn confirm_split_requires_a_valid_draft() {
        let mut session = Session::new();
        let a = session.add_participant("A").unwrap();
        let b = session.add_participant("B").unwrap();
        let item = session.add_item("Wine", MoneyCents::new(2000)).unwrap();

        let mut draft = session.draft_unequal_split(item).unwrap();
        draft.set_amount(a, MoneyCents::new(1500)).unwrap();
        assert_eq!(
            session.confirm_split(draft.clone()),
            Err(EngineError::InvalidInput(
                "Split total (15.00) must equal item price (20.00)".to_string()
            ))
        );
        assert_eq!(session.items()[0].allocation, Allocation::Unsplit);

        draft.set_amount(b, MoneyCents::new(500)).unwrap();
        session.confirm_split(draft).unwrap();
        assert_eq!(
            session.allocation_status(item).unwrap(),
            AllocationStatus::Full
        );
    }

    #[test]
    fn incomplete_custom_splits_can_be_stored() {
        let mut session = Session::new();
        let a = session.add_participant("A").unwrap();
        let item = session.add_item("Wine", MoneyCents::new(2000)).unwrap();
        session
            .set_allocation(item, Allocation::unequal(Vec::new()).unwrap())
            .unwrap();
        session
            .update_unequal_share(item, a, MoneyCents::new(500))
            .unwrap();
        assert_eq!(
            session.allocation_status(item).unwrap(),
            AllocationStatus::Partial
        );

        session.update_unequal_share(item, a, MoneyCents::ZERO).unwrap();
        assert_eq!(
            session.items()[0].allocation,
            Allocation::unequal(Vec::new()).unwrap()
        );
    }

    #[test]
    fn unknown_participant_cannot_be_assigned() {
        let mut session = Session::new();
        let item = session.add_item("Tea", MoneyCents::new(300)).unwrap();
        let stranger = crate::ParticipantId::new();
        assert!(matches!(
            session.assign_individual(item, stranger),
            Err(EngineError::KeyNotFound(_))
        ));
    }

    #[test]
    fn reset_returns_item_to_pool() {
        let mut session = Session::new();
        let a = session.add_participant("A").unwrap();
        let item = session.add_item("Tea", MoneyCents::new(300)).unwrap();
        session.assign_individual(item, a).unwrap();
        assert_eq!(session.classify().unwrap().split.len(), 1);
        session.reset_item(item).unwrap();
        assert_eq!(session.classify().unwrap().unsplit.len(), 1);
        assert!(session.totals().unwrap().get(a).unwrap().is_zero());
    }
}
