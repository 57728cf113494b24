//! Allocation of a line item price among participants.
//!
//! An [`Allocation`] is exactly one of four strategies. Switching strategy
//! replaces the whole value, so data from the previous strategy can never
//! leak into the new one.
//!
//! Serialized form (flattened into the item):
//!
//! ```json
//! { "splitType": "unsplit" }
//! { "splitType": "individual", "assignedTo": "<id>" }
//! { "splitType": "equal", "equalSplitPeople": ["<id>", "<id>"] }
//! { "splitType": "unequal", "unequalSplit": [{ "personId": "<id>", "amount": 12.0 }] }
//! ```

use serde::{Deserialize, Serialize};

use crate::{EngineError, Liability, MoneyCents, ParticipantId, ResultEngine};

/// One participant's explicit amount in a custom split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    #[serde(rename = "personId")]
    pub participant_id: ParticipantId,
    pub amount: MoneyCents,
}

impl Share {
    #[must_use]
    pub const fn new(participant_id: ParticipantId, amount: MoneyCents) -> Self {
        Self {
            participant_id,
            amount,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "splitType", rename_all = "lowercase")]
pub enum Allocation {
    /// No decision yet.
    #[default]
    Unsplit,
    /// One participant owns the whole price.
    Individual {
        #[serde(rename = "assignedTo")]
        participant_id: ParticipantId,
    },
    /// The price is divided evenly among the members.
    ///
    /// Members are unique. The set may be empty after its last member was
    /// removed; an empty set owes nothing.
    Equal {
        #[serde(rename = "equalSplitPeople")]
        participants: Vec<ParticipantId>,
    },
    /// Explicit per-participant amounts. No entry is ever zero.
    Unequal {
        #[serde(rename = "unequalSplit")]
        shares: Vec<Share>,
    },
}

/// Strategy tag of an [`Allocation`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitKind {
    Unsplit,
    Individual,
    Equal,
    Unequal,
}

impl SplitKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unsplit => "unsplit",
            Self::Individual => "individual",
            Self::Equal => "equal",
            Self::Unequal => "unequal",
        }
    }
}

impl Allocation {
    /// Builds an equal split, dropping repeated ids.
    #[must_use]
    pub fn equal(participants: impl IntoIterator<Item = ParticipantId>) -> Self {
        let mut members: Vec<ParticipantId> = Vec::new();
        for id in participants {
            if !members.contains(&id) {
                members.push(id);
            }
        }
        Self::Equal {
            participants: members,
        }
    }

    /// Builds a custom split.
    ///
    /// Zero amounts are dropped, negative amounts and repeated participants
    /// are rejected.
    pub fn unequal(shares: impl IntoIterator<Item = Share>) -> ResultEngine<Self> {
        let mut kept: Vec<Share> = Vec::new();
        for share in shares {
            share.amount.non_negative("share amount")?;
            if kept.iter().any(|s| s.participant_id == share.participant_id) {
                return Err(EngineError::InvalidInput(format!(
                    "participant {} appears twice in the split",
                    share.participant_id
                )));
            }
            if !share.amount.is_zero() {
                kept.push(share);
            }
        }
        Ok(Self::Unequal { shares: kept })
    }

    #[must_use]
    pub fn kind(&self) -> SplitKind {
        match self {
            Self::Unsplit => SplitKind::Unsplit,
            Self::Individual { .. } => SplitKind::Individual,
            Self::Equal { .. } => SplitKind::Equal,
            Self::Unequal { .. } => SplitKind::Unequal,
        }
    }

    /// What `participant` owes for an item costing `price`.
    ///
    /// Equal shares are recomputed from the current member count on every
    /// call and are not rounded.
    #[must_use]
    pub fn liability_of(&self, participant: ParticipantId, price: MoneyCents) -> Liability {
        match self {
            Self::Unsplit => Liability::ZERO,
            Self::Individual { participant_id } => {
                if *participant_id == participant {
                    Liability::from_cents(price)
                } else {
                    Liability::ZERO
                }
            }
            Self::Equal { participants } => {
                if participants.contains(&participant) {
                    Liability::split(price, participants.len())
                } else {
                    Liability::ZERO
                }
            }
            Self::Unequal { shares } => shares
                .iter()
                .find(|s| s.participant_id == participant)
                .map(|s| Liability::from_cents(s.amount))
                .unwrap_or(Liability::ZERO),
        }
    }

    /// Participants referenced by this allocation, in stored order.
    #[must_use]
    pub fn participants(&self) -> Vec<ParticipantId> {
        match self {
            Self::Unsplit => Vec::new(),
            Self::Individual { participant_id } => vec![*participant_id],
            Self::Equal { participants } => participants.clone(),
            Self::Unequal { shares } => shares.iter().map(|s| s.participant_id).collect(),
        }
    }

    #[must_use]
    pub fn involves(&self, participant: ParticipantId) -> bool {
        match self {
            Self::Unsplit => false,
            Self::Individual { participant_id } => *participant_id == participant,
            Self::Equal { participants } => participants.contains(&participant),
            Self::Unequal { shares } => shares.iter().any(|s| s.participant_id == participant),
        }
    }

    /// Sum of custom amounts, `None` for other strategies.
    ///
    /// Clamped at `i64::MAX`; see [`MoneyCents::saturating_total`].
    #[must_use]
    pub fn shares_total(&self) -> Option<MoneyCents> {
        match self {
            Self::Unequal { shares } => {
                Some(MoneyCents::saturating_total(shares.iter().map(|s| s.amount)))
            }
            _ => None,
        }
    }

    /// Removes every trace of `participant`.
    ///
    /// An individual assignment reverts to [`Allocation::Unsplit`]; equal
    /// members and custom shares of other participants are left untouched.
    /// Returns `true` if anything changed.
    pub fn retract(&mut self, participant: ParticipantId) -> bool {
        match self {
            Self::Unsplit => false,
            Self::Individual { participant_id } => {
                if *participant_id == participant {
                    *self = Self::Unsplit;
                    true
                } else {
                    false
                }
            }
            Self::Equal { participants } => {
                let before = participants.len();
                participants.retain(|id| *id != participant);
                participants.len() != before
            }
            Self::Unequal { shares } => {
                let before = shares.len();
                shares.retain(|s| s.participant_id != participant);
                shares.len() != before
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (ParticipantId, ParticipantId, ParticipantId) {
        (ParticipantId::new(), ParticipantId::new(), ParticipantId::new())
    }

    #[test]
    fn unsplit_owes_nothing() {
        let (a, _, _) = ids();
        assert_eq!(
            Allocation::Unsplit.liability_of(a, MoneyCents::new(1000)),
            Liability::ZERO
        );
    }

    #[test]
    fn individual_owes_full_price() {
        let (a, b, _) = ids();
        let alloc = Allocation::Individual { participant_id: a };
        let price = MoneyCents::new(1234);
        assert_eq!(alloc.liability_of(a, price), Liability::from_cents(price));
        assert_eq!(alloc.liability_of(b, price), Liability::ZERO);
    }

    #[test]
    fn equal_divides_by_current_member_count() {
        let (a, b, c) = ids();
        let mut alloc = Allocation::equal([a, b, c]);
        let price = MoneyCents::new(999);
        assert_eq!(alloc.liability_of(a, price).round_cents().cents(), 333);

        alloc.retract(c);
        assert_eq!(alloc.liability_of(a, price), Liability::split(price, 2));
        assert_eq!(alloc.liability_of(c, price), Liability::ZERO);
    }

    #[test]
    fn equal_dedupes_members() {
        let (a, b, _) = ids();
        assert_eq!(
            Allocation::equal([a, b, a]),
            Allocation::Equal {
                participants: vec![a, b]
            }
        );
    }

    #[test]
    fn empty_equal_never_divides_by_zero() {
        let (a, _, _) = ids();
        let alloc = Allocation::equal(Vec::new());
        assert_eq!(alloc.liability_of(a, MoneyCents::new(1000)), Liability::ZERO);
    }

    #[test]
    fn unequal_drops_zero_and_rejects_negative() {
        let (a, b, c) = ids();
        let alloc = Allocation::unequal([
            Share::new(a, MoneyCents::new(500)),
            Share::new(b, MoneyCents::ZERO),
        ])
        .unwrap();
        assert_eq!(alloc.participants(), vec![a]);

        assert!(Allocation::unequal([Share::new(c, MoneyCents::new(-1))]).is_err());
        assert!(
            Allocation::unequal([
                Share::new(a, MoneyCents::new(1)),
                Share::new(a, MoneyCents::new(2)),
            ])
            .is_err()
        );
    }

    #[test]
    fn retract_individual_reverts_to_unsplit() {
        let (a, b, _) = ids();
        let mut alloc = Allocation::Individual { participant_id: a };
        assert!(!alloc.retract(b));
        assert!(alloc.retract(a));
        assert_eq!(alloc, Allocation::Unsplit);
    }

    #[test]
    fn retract_keeps_other_shares_untouched() {
        let (a, b, c) = ids();
        let mut alloc = Allocation::unequal([
            Share::new(a, MoneyCents::new(100)),
            Share::new(b, MoneyCents::new(200)),
            Share::new(c, MoneyCents::new(300)),
        ])
        .unwrap();
        alloc.retract(b);
        assert_eq!(
            alloc,
            Allocation::Unequal {
                shares: vec![
                    Share::new(a, MoneyCents::new(100)),
                    Share::new(c, MoneyCents::new(300)),
                ]
            }
        );
    }

    #[test]
    fn serializes_with_split_type_tag() {
        let a = ParticipantId::new();
        let json = serde_json::to_value(Allocation::Individual { participant_id: a }).unwrap();
        assert_eq!(json["splitType"], "individual");
        assert_eq!(json["assignedTo"], a.to_string());

        let json = serde_json::to_value(Allocation::Unsplit).unwrap();
        assert_eq!(json, serde_json::json!({ "splitType": "unsplit" }));
    }
}
