//! The module contains `LineItem` and the `LineItemStore`.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Allocation, EngineError, MoneyCents, ParticipantId, Registry, ResultEngine, Share,
};

/// Stable identifier of a line item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
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

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One purchased good or service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ItemId,
    pub name: String,
    pub price: MoneyCents,
    #[serde(flatten)]
    pub allocation: Allocation,
}

impl LineItem {
    /// Creates an unsplit item with a fresh id.
    pub fn new(name: &str, price: MoneyCents) -> ResultEngine<Self> {
        Self::with_id(ItemId::new(), name, price)
    }

    pub fn with_id(id: ItemId, name: &str, price: MoneyCents) -> ResultEngine<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidInput(
                "item name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            price: price.non_negative("item price")?,
            allocation: Allocation::Unsplit,
        })
    }
}

/// Receipt items of the current bill, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineItemStore {
    items: Vec<LineItem>,
}

impl LineItemStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from existing items, checking every allocation against
    /// `registry`.
    ///
    /// Custom splits are normalized (zero shares dropped). Items may have an
    /// empty name here: imported drafts are kept as they were.
    pub fn from_items(items: Vec<LineItem>, registry: &Registry) -> ResultEngine<Self> {
        let mut store = Self::new();
        for mut item in items {
            if store.get(item.id).is_some() {
                return Err(EngineError::InvalidInput(format!(
                    "duplicate item id {}",
                    item.id
                )));
            }
            item.price.non_negative("item price")?;
            item.allocation = checked_allocation(item.allocation, registry)?;
            store.items.push(item);
        }
        Ok(store)
    }

    /// Adds a new unsplit item and returns its id.
    pub fn add(&mut self, name: &str, price: MoneyCents) -> ResultEngine<ItemId> {
        let item = LineItem::new(name, price)?;
        let id = item.id;
        self.items.push(item);
        Ok(id)
    }

    pub(crate) fn push(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// Deletes an item. Nothing else references items, so there is no cascade.
    pub fn remove(&mut self, id: ItemId) -> ResultEngine<LineItem> {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) => Ok(self.items.remove(index)),
            None => Err(EngineError::KeyNotFound(id.to_string())),
        }
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns an error unless `id` is a stored item.
    pub fn require(&self, id: ItemId) -> ResultEngine<&LineItem> {
        self.get(id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))
    }

    fn require_mut(&mut self, id: ItemId) -> ResultEngine<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))
    }

    /// Replaces an item's allocation wholesale.
    ///
    /// Every referenced participant must be in `registry`. Custom splits may
    /// be incomplete (not summing to the price).
    pub fn set_allocation(
        &mut self,
        id: ItemId,
        allocation: Allocation,
        registry: &Registry,
    ) -> ResultEngine<()> {
        let allocation = checked_allocation(allocation, registry)?;
        self.require_mut(id)?.allocation = allocation;
        Ok(())
    }

    /// Upserts one participant's custom amount.
    ///
    /// `amount > 0` inserts or updates, `amount == 0` removes the entry and a
    /// negative amount is rejected. The item must already be split unequally.
    pub fn update_unequal_share(
        &mut self,
        id: ItemId,
        participant: ParticipantId,
        amount: MoneyCents,
        registry: &Registry,
    ) -> ResultEngine<()> {
        amount.non_negative("share amount")?;
        registry.require(participant)?;
        let item = self.require_mut(id)?;
        let Allocation::Unequal { shares } = &mut item.allocation else {
            return Err(EngineError::InvalidInput(format!(
                "item {id} is not split unequally"
            )));
        };

        match shares.iter().position(|s| s.participant_id == participant) {
            Some(index) if amount.is_zero() => {
                shares.remove(index);
            }
            Some(index) => shares[index].amount = amount,
            None if amount.is_zero() => {}
            None => shares.push(Share::new(participant, amount)),
        }
        Ok(())
    }

    /// Adds or removes a member of an equal split.
    ///
    /// The item stays an equal split even when the last member leaves.
    pub fn toggle_equal_participant(
        &mut self,
        id: ItemId,
        participant: ParticipantId,
        included: bool,
        registry: &Registry,
    ) -> ResultEngine<()> {
        if included {
            registry.require(participant)?;
        }
        let item = self.require_mut(id)?;
        let Allocation::Equal { participants } = &mut item.allocation else {
            return Err(EngineError::InvalidInput(format!(
                "item {id} is not split equally"
            )));
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

    /// Sets the equal-split members to every current participant, or to none.
    pub fn select_all_for_equal(
        &mut self,
        id: ItemId,
        select_all: bool,
        registry: &Registry,
    ) -> ResultEngine<()> {
        let item = self.require_mut(id)?;
        let Allocation::Equal { participants } = &mut item.allocation else {
            return Err(EngineError::InvalidInput(format!(
                "item {id} is not split equally"
            )));
        };
        *participants = if select_all { registry.ids() } else { Vec::new() };
        Ok(())
    }

    /// Removes `participant` from every allocation. Returns the ids of the
    /// items that changed.
    pub fn retract_participant(&mut self, participant: ParticipantId) -> Vec<ItemId> {
        self.items
            .iter_mut()
            .filter_map(|item| item.allocation.retract(participant).then_some(item.id))
            .collect()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Validates references and normalizes an allocation before it is stored.
fn checked_allocation(allocation: Allocation, registry: &Registry) -> ResultEngine<Allocation> {
    for participant in allocation.participants() {
        registry.require(participant)?;
    }
    match allocation {
        Allocation::Equal { participants } => Ok(Allocation::equal(participants)),
        Allocation::Unequal { shares } => Allocation::unequal(shares),
        other => Ok(other),
    }
}
