//! Split drafts: the confirm step of dropping an item on a split area.
//!
//! A draft is edited freely and only becomes the item's allocation through
//! [`Session::confirm_split`](crate::Session::confirm_split), which refuses
//! drafts that do not validate. Dropping the draft cancels it.

use crate::{
    Allocation, EngineError, ItemId, LineItem, MoneyCents, ParticipantId, Registry,
    ResultEngine, Share,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DraftSplit {
    Equal { participants: Vec<ParticipantId> },
    /// Zero amounts are allowed while editing.
    Unequal { shares: Vec<Share> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitDraft {
    item_id: ItemId,
    price: MoneyCents,
    split: DraftSplit,
}

impl SplitDraft {
    /// Equal split with every current participant selected.
    #[must_use]
    pub fn equal(item: &LineItem, registry: &Registry) -> Self {
        Self {
            item_id: item.id,
            price: item.price,
            split: DraftSplit::Equal {
                participants: registry.ids(),
            },
        }
    }

    /// Custom split with a zero amount for every current participant.
    #[must_use]
    pub fn unequal(item: &LineItem, registry: &Registry) -> Self {
        Self {
            item_id: item.id,
            price: item.price,
            split: DraftSplit::Unequal {
                shares: registry
                    .ids()
                    .into_iter()
                    .map(|id| Share::new(id, MoneyCents::ZERO))
                    .collect(),
            },
        }
    }

    #[must_use]
    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    #[must_use]
    pub fn split(&self) -> &DraftSplit {
        &self.split
    }

    pub fn toggle(&mut self, participant: ParticipantId, included: bool) -> ResultEngine<()> {
        let DraftSplit::Equal { participants } = &mut self.split else {
            return Err(EngineError::InvalidInput(
                "draft is not an equal split".to_string(),
            ));
        };
        if included {
            if !participants.contains(&participant) {
                participants.push(participant);
            }
        } else {
            participants.retain(|p| *p != participant);
        }
        Ok(())
    }

    pub fn set_amount(&mut self, participant: ParticipantId, amount: MoneyCents) -> ResultEngine<()> {
        amount.non_negative("share amount")?;
        let DraftSplit::Unequal { shares } = &mut self.split else {
            return Err(EngineError::InvalidInput(
                "draft is not an unequal split".to_string(),
            ));
        };
        match shares.iter_mut().find(|s| s.participant_id == participant) {
            Some(share) => share.amount = amount,
            None => shares.push(Share::new(participant, amount)),
        }
        Ok(())
    }

    /// Sum of the custom amounts entered so far (zero for equal drafts).
    #[must_use]
    pub fn assigned_total(&self) -> MoneyCents {
        match &self.split {
            DraftSplit::Equal { .. } => MoneyCents::ZERO,
            DraftSplit::Unequal { shares } => {
                MoneyCents::saturating_total(shares.iter().map(|s| s.amount))
            }
        }
    }

    /// Why the draft cannot be confirmed yet, if anything.
    #[must_use]
    pub fn validation_message(&self) -> Option<String> {
        match &self.split {
            DraftSplit::Equal { participants } if participants.is_empty() => {
                Some("Please select at least one person".to_string())
            }
            DraftSplit::Equal { .. } => None,
            DraftSplit::Unequal { .. } => {
                let total = self.assigned_total();
                (total != self.price).then(|| {
                    format!(
                        "Split total ({total}) must equal item price ({})",
                        self.price
                    )
                })
            }
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation_message().is_none()
    }

    /// Turns a valid draft into the allocation to store.
    pub fn into_allocation(self) -> ResultEngine<(ItemId, Allocation)> {
        if let Some(message) = self.validation_message() {
            return Err(EngineError::InvalidInput(message));
        }
        let allocation = match self.split {
            DraftSplit::Equal { participants } => Allocation::equal(participants),
            DraftSplit::Unequal { shares } => Allocation::unequal(shares)?,
        };
        Ok((self.item_id, allocation))
    }
}
