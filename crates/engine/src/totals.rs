//! Read-side queries over participants and items.
//!
//! Everything here is a pure function of its arguments: nothing is cached, so
//! results always reflect the current items and participants.

use serde::{Deserialize, Serialize};

use crate::{
    Allocation, Liability, LineItem, MoneyCents, Participant, ParticipantId, ResultEngine,
    SplitKind,
};

/// What `participant` owes for `item`.
#[must_use]
pub fn liability_of(participant: ParticipantId, item: &LineItem) -> Liability {
    item.allocation.liability_of(participant, item.price)
}

/// Per-participant totals, in registry order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    entries: Vec<(ParticipantId, Liability)>,
}

impl Totals {
    /// Total owed by `participant`, `None` if it is not a current participant.
    #[must_use]
    pub fn get(&self, participant: ParticipantId) -> Option<Liability> {
        self.entries
            .iter()
            .find(|(id, _)| *id == participant)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, Liability)> + '_ {
        self.entries.iter().copied()
    }

    /// Sum of all participants' totals.
    pub fn sum(&self) -> ResultEngine<Liability> {
        Liability::total(self.entries.iter().map(|(_, total)| *total))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sums every participant's liability across all items.
///
/// Every participant appears, with zero when they owe nothing. Shares held by
/// ids that are not in `participants` are ignored.
///
/// Fails with `InvalidInput` when a total cannot be represented exactly.
pub fn aggregate_totals(items: &[LineItem], participants: &[Participant]) -> ResultEngine<Totals> {
    let entries = participants
        .iter()
        .map(|participant| {
            let total =
                Liability::total(items.iter().map(|item| liability_of(participant.id, item)))?;
            Ok((participant.id, total))
        })
        .collect::<ResultEngine<_>>()?;
    Ok(Totals { entries })
}

/// Sum of all item prices, whatever their allocation state.
pub fn grand_total(items: &[LineItem]) -> ResultEngine<MoneyCents> {
    MoneyCents::total(items.iter().map(|item| item.price))
}

/// Items partitioned by whether an allocation decision was made.
#[derive(Clone, Debug)]
pub struct Classification<'a> {
    pub unsplit: Vec<&'a LineItem>,
    pub split: Vec<&'a LineItem>,
    pub grand_total: MoneyCents,
}

/// Partitions items into `Unsplit` ones and all the others.
pub fn classify(items: &[LineItem]) -> ResultEngine<Classification<'_>> {
    let (unsplit, split): (Vec<&LineItem>, Vec<&LineItem>) = items
        .iter()
        .partition(|item| item.allocation == Allocation::Unsplit);
    Ok(Classification {
        unsplit,
        split,
        grand_total: grand_total(items)?,
    })
}

/// How much of an item's price is covered by its allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    /// Nobody owes anything for the item.
    Unallocated,
    /// A custom split that does not add up to the price.
    Partial,
    /// The whole price is assigned.
    Full,
}

#[must_use]
pub fn allocation_status(item: &LineItem) -> AllocationStatus {
    match &item.allocation {
        Allocation::Unsplit => AllocationStatus::Unallocated,
        Allocation::Individual { .. } => AllocationStatus::Full,
        Allocation::Equal { participants } if participants.is_empty() => {
            AllocationStatus::Unallocated
        }
        Allocation::Equal { .. } => AllocationStatus::Full,
        Allocation::Unequal { shares } if shares.is_empty() => {
            if item.price.is_zero() {
                AllocationStatus::Full
            } else {
                AllocationStatus::Unallocated
            }
        }
        Allocation::Unequal { .. } => {
            if validate_unequal_complete(item) {
                AllocationStatus::Full
            } else {
                AllocationStatus::Partial
            }
        }
    }
}

/// `true` iff the item is a custom split whose amounts add up to the price.
///
/// Amounts are whole cents, so the 0.01 tolerance on 2-decimal values is an
/// exact comparison.
#[must_use]
pub fn validate_unequal_complete(item: &LineItem) -> bool {
    unequal_remaining(item).is_some_and(MoneyCents::is_zero)
}

/// Price minus the custom amounts (negative when over-assigned), `None` when
/// the item is not a custom split.
#[must_use]
pub fn unequal_remaining(item: &LineItem) -> Option<MoneyCents> {
    item.allocation
        .shares_total()
        .map(|assigned| item.price.saturating_sub(assigned))
}

/// One item as seen from a single participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakdownLine<'a> {
    pub item: &'a LineItem,
    pub amount: Liability,
    pub kind: SplitKind,
}

/// Items `participant` takes part in, with what they owe for each.
#[must_use]
pub fn participant_breakdown(
    participant: ParticipantId,
    items: &[LineItem],
) -> Vec<BreakdownLine<'_>> {
    items
        .iter()
        .filter(|item| item.allocation.involves(participant))
        .map(|item| BreakdownLine {
            item,
            amount: liability_of(participant, item),
            kind: item.allocation.kind(),
        })
        .collect()
}

/// Items grouped under every current participant (possibly with none).
///
/// An item shared by several participants appears under each of them.
#[must_use]
pub fn items_by_participant<'a>(
    items: &'a [LineItem],
    participants: &[Participant],
) -> Vec<(ParticipantId, Vec<&'a LineItem>)> {
    participants
        .iter()
        .map(|participant| {
            let owned = items
                .iter()
                .filter(|item| item.allocation.involves(participant.id))
                .collect();
            (participant.id, owned)
        })
        .collect()
}
