//! Conversions between the JSON surface and engine types.

use api_types::receipt::{Person, ReceiptItem, SharedReceipt, SplitType, UnequalShare};
use api_types::totals::ItemStatus;
use engine::{
    Allocation, AllocationStatus, EngineError, ItemId, LineItem, MoneyCents, Participant,
    ParticipantId, ResultEngine, Session, Share, SummaryDocument,
};

pub fn person_from_engine(participant: &Participant) -> Person {
    Person {
        id: participant.id.as_uuid(),
        name: participant.name.clone(),
    }
}

fn person_to_engine(person: Person) -> Participant {
    Participant {
        id: ParticipantId::from_uuid(person.id),
        name: person.name,
    }
}

pub fn item_from_engine(item: &LineItem) -> ReceiptItem {
    let mut wire = ReceiptItem {
        id: item.id.as_uuid(),
        name: item.name.clone(),
        price: item.price.to_major(),
        split_type: SplitType::Unsplit,
        assigned_to: None,
        equal_split_people: None,
        unequal_split: None,
    };
    match &item.allocation {
        Allocation::Unsplit => {}
        Allocation::Individual { participant_id } => {
            wire.split_type = SplitType::Individual;
            wire.assigned_to = Some(participant_id.as_uuid());
        }
        Allocation::Equal { participants } => {
            wire.split_type = SplitType::Equal;
            wire.equal_split_people = Some(participants.iter().map(|p| p.as_uuid()).collect());
        }
        Allocation::Unequal { shares } => {
            wire.split_type = SplitType::Unequal;
            wire.unequal_split = Some(
                shares
                    .iter()
                    .map(|share| UnequalShare {
                        person_id: share.participant_id.as_uuid(),
                        amount: share.amount.to_major(),
                    })
                    .collect(),
            );
        }
    }
    wire
}

fn item_to_engine(item: ReceiptItem) -> ResultEngine<LineItem> {
    let id = ItemId::from_uuid(item.id);
    let price = MoneyCents::from_major(item.price)?.non_negative("item price")?;
    let allocation = match item.split_type {
        SplitType::Unsplit => Allocation::Unsplit,
        SplitType::Individual => {
            let assignee = item.assigned_to.ok_or_else(|| {
                EngineError::InvalidInput(format!("item {id} has no assignee"))
            })?;
            Allocation::Individual {
                participant_id: ParticipantId::from_uuid(assignee),
            }
        }
        SplitType::Equal => Allocation::equal(
            item.equal_split_people
                .unwrap_or_default()
                .into_iter()
                .map(ParticipantId::from_uuid),
        ),
        SplitType::Unequal => {
            let shares = item
                .unequal_split
                .unwrap_or_default()
                .into_iter()
                .map(|share| {
                    Ok(Share::new(
                        ParticipantId::from_uuid(share.person_id),
                        MoneyCents::from_major(share.amount)?,
                    ))
                })
                .collect::<ResultEngine<Vec<_>>>()?;
            Allocation::unequal(shares)?
        }
    };
    Ok(LineItem {
        id,
        name: item.name,
        price,
        allocation,
    })
}

/// Rebuilds a session from request data, with the same checks as an import.
///
/// A reference to a person missing from `people` is a malformed request.
pub fn session_from_wire(people: Vec<Person>, items: Vec<ReceiptItem>) -> ResultEngine<Session> {
    let people = people.into_iter().map(person_to_engine).collect();
    let items = items
        .into_iter()
        .map(item_to_engine)
        .collect::<ResultEngine<Vec<_>>>()?;
    Session::restore(people, items).map_err(|err| match err {
        EngineError::KeyNotFound(id) => EngineError::InvalidInput(format!("unknown person {id}")),
        other => other,
    })
}

pub fn shared_receipt(document: &SummaryDocument) -> SharedReceipt {
    SharedReceipt {
        id: document.id,
        title: document.title.clone(),
        people: document.people.iter().map(person_from_engine).collect(),
        items: document.items.iter().map(item_from_engine).collect(),
        totals: document
            .totals
            .iter()
            .map(|(id, total)| (id.as_uuid(), *total))
            .collect(),
        grand_total: document.grand_total.to_major(),
        created_at: document.created_at,
    }
}

pub fn item_status(status: AllocationStatus) -> ItemStatus {
    match status {
        AllocationStatus::Unallocated => ItemStatus::Unallocated,
        AllocationStatus::Partial => ItemStatus::Partial,
        AllocationStatus::Full => ItemStatus::Full,
    }
}
