//! Summary documents: detached snapshots of a finished bill.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    LineItem, MoneyCents, Participant, ParticipantId, ResultEngine, aggregate_totals,
    grand_total,
};

pub const DEFAULT_TITLE: &str = "Unnamed Receipt";

/// Immutable snapshot of participants, items and computed totals.
///
/// The document owns copies of everything it shows, so later edits to the
/// session never reach an already built (or published) document.
///
/// `totals` are per-participant amounts in major units, not rounded to cents;
/// readers round them once, for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDocument {
    pub id: Uuid,
    pub title: String,
    pub people: Vec<Participant>,
    pub items: Vec<LineItem>,
    pub totals: BTreeMap<ParticipantId, f64>,
    pub grand_total: MoneyCents,
    pub created_at: DateTime<Utc>,
}

/// Builds a summary with a fresh id, stamped now.
pub fn build_summary(
    title: Option<&str>,
    participants: &[Participant],
    items: &[LineItem],
) -> ResultEngine<SummaryDocument> {
    build_summary_at(title, participants, items, Uuid::new_v4(), Utc::now())
}

/// Same as [`build_summary`] with caller-provided id and timestamp.
pub fn build_summary_at(
    title: Option<&str>,
    participants: &[Participant],
    items: &[LineItem],
    id: Uuid,
    created_at: DateTime<Utc>,
) -> ResultEngine<SummaryDocument> {
    let totals = aggregate_totals(items, participants)?
        .iter()
        .map(|(id, total)| (id, total.to_major()))
        .collect();
    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_string();

    Ok(SummaryDocument {
        id,
        title,
        people: participants.to_vec(),
        items: items.to_vec(),
        totals,
        grand_total: grand_total(items)?,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Allocation, Liability};

    #[test]
    fn blank_title_falls_back_to_default() {
        let doc = build_summary(Some("  "), &[], &[]).unwrap();
        assert_eq!(doc.title, DEFAULT_TITLE);
        let doc = build_summary(Some(" Dinner "), &[], &[]).unwrap();
        assert_eq!(doc.title, "Dinner");
    }

    #[test]
    fn every_build_gets_a_new_id() {
        let first = build_summary(None, &[], &[]).unwrap();
        let second = build_summary(None, &[], &[]).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn json_uses_published_field_names() {
        let alice = Participant::new("Alice").unwrap();
        let mut item = LineItem::new("Cake", MoneyCents::new(999)).unwrap();
        item.allocation = Allocation::Individual {
            participant_id: alice.id,
        };
        let doc = build_summary(Some("Party"), &[alice.clone()], &[item]).unwrap();

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["title"], "Party");
        assert_eq!(json["grandTotal"], 9.99);
        assert_eq!(json["totals"][alice.id.to_string()], 9.99);
        assert_eq!(json["people"][0]["name"], "Alice");
        assert_eq!(json["items"][0]["splitType"], "individual");
        assert_eq!(json["items"][0]["price"], 9.99);
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn totals_keep_half_cents_for_the_reader_to_round() {
        let people: Vec<_> = ["A", "B"]
            .iter()
            .map(|n| Participant::new(n).unwrap())
            .collect();
        let mut item = LineItem::new("Soda", MoneyCents::new(201)).unwrap();
        item.allocation = Allocation::equal(people.iter().map(|p| p.id));
        let doc = build_summary(None, &people, &[item]).unwrap();

        let half = Liability::split(MoneyCents::new(201), 2);
        assert_eq!(half.round_cents().cents(), 101);
        for person in &people {
            assert_eq!(doc.totals[&person.id], half.to_major());
        }
    }

    #[test]
    fn unrepresentable_totals_fail_the_build() {
        let items = vec![
            LineItem::new("Gold", MoneyCents::new(i64::MAX)).unwrap(),
            LineItem::new("Gum", MoneyCents::new(1)).unwrap(),
        ];
        assert!(build_summary(None, &[], &items).is_err());
    }
}
