use engine::{
    Allocation, EngineError, Liability, MemorySink, MoneyCents, ParticipantId, Session, Share,
    SummarySink, aggregate_totals, liability_of,
};

fn cents(value: i64) -> MoneyCents {
    MoneyCents::new(value)
}

fn total_of(session: &Session, id: ParticipantId) -> Liability {
    session.totals().unwrap().get(id).unwrap()
}

#[test]
fn equal_split_between_two() {
    let mut session = Session::new();
    let a = session.add_participant("A").unwrap();
    let b = session.add_participant("B").unwrap();
    let item = session.add_item("Pizza", cents(1000)).unwrap();
    session.set_allocation(item, Allocation::equal([a, b])).unwrap();

    assert_eq!(total_of(&session, a).round_cents(), cents(500));
    assert_eq!(total_of(&session, b).round_cents(), cents(500));
    assert_eq!(session.grand_total().unwrap(), cents(1000));
}

#[test]
fn thirds_are_summed_before_rounding() {
    let mut session = Session::new();
    let ids: Vec<_> = ["A", "B", "C"]
        .iter()
        .map(|name| session.add_participant(name).unwrap())
        .collect();
    let item = session.add_item("Cake", cents(999)).unwrap();
    session
        .set_allocation(item, Allocation::equal(ids.clone()))
        .unwrap();

    let share = total_of(&session, ids[0]);
    assert_eq!(share.round_cents(), cents(333));
    assert!(!share.is_whole_cents());
    assert_eq!(
        session.totals().unwrap().sum().unwrap(),
        Liability::from_cents(cents(999))
    );

    // Two items of 10.00 over three: each share is 3.333..., rounded per item
    // that would be 6.66, summed first it is 6.67.
    let mut session = Session::new();
    let ids: Vec<_> = ["A", "B", "C"]
        .iter()
        .map(|name| session.add_participant(name).unwrap())
        .collect();
    for name in ["Soup", "Salad"] {
        let item = session.add_item(name, cents(1000)).unwrap();
        session
            .set_allocation(item, Allocation::equal(ids.clone()))
            .unwrap();
    }
    assert_eq!(total_of(&session, ids[0]).round_cents(), cents(667));
}

#[test]
fn totals_are_additive() {
    let mut session = Session::new();
    let a = session.add_participant("A").unwrap();
    let b = session.add_participant("B").unwrap();
    let c = session.add_participant("C").unwrap();
    let first = session.add_item("Bread", cents(450)).unwrap();
    session.assign_individual(first, a).unwrap();
    let before = session.totals().unwrap();

    let second = session.add_item("Wine", cents(2999)).unwrap();
    session
        .set_allocation(second, Allocation::equal([a, b, c]))
        .unwrap();
    let after = session.totals().unwrap();
    let added = session.items().last().unwrap();

    for id in [a, b, c] {
        assert_eq!(
            after.get(id).unwrap(),
            before
                .get(id)
                .unwrap()
                .checked_add(liability_of(id, added))
                .unwrap()
        );
    }
}

#[test]
fn liabilities_never_exceed_price() {
    let mut session = Session::new();
    let a = session.add_participant("A").unwrap();
    let b = session.add_participant("B").unwrap();
    let items = [
        (cents(1000), Allocation::Individual { participant_id: b }),
        (cents(1001), Allocation::equal([a, b])),
        (
            cents(2000),
            Allocation::unequal([Share::new(a, cents(1200)), Share::new(b, cents(800))]).unwrap(),
        ),
        (cents(700), Allocation::Unsplit),
    ];
    for (price, allocation) in items {
        let id = session.add_item("x", price).unwrap();
        session.set_allocation(id, allocation).unwrap();
    }

    for item in session.items() {
        let covered =
            Liability::total(session.participants().iter().map(|p| liability_of(p.id, item)))
                .unwrap();
        if item.allocation == Allocation::Unsplit {
            assert!(covered.is_zero());
        } else {
            assert_eq!(covered, Liability::from_cents(item.price));
        }
    }
}

#[test]
fn removing_sole_assignee_only_drops_their_part() {
    let mut session = Session::new();
    let a = session.add_participant("A").unwrap();
    let b = session.add_participant("B").unwrap();
    let c = session.add_participant("C").unwrap();
    let x = session.add_item("X", cents(1500)).unwrap();
    session.assign_individual(x, b).unwrap();
    let y = session.add_item("Y", cents(900)).unwrap();
    session.set_allocation(y, Allocation::equal([a, c])).unwrap();

    let grand_before = session.grand_total().unwrap();
    let a_before = total_of(&session, a);
    let c_before = total_of(&session, c);
    let y_before = session.items()[1].clone();

    session.remove_participant(b).unwrap();

    assert_eq!(session.items()[0].allocation, Allocation::Unsplit);
    assert_eq!(session.items()[1], y_before);
    assert_eq!(session.grand_total().unwrap(), grand_before);
    assert_eq!(total_of(&session, a), a_before);
    assert_eq!(total_of(&session, c), c_before);
    assert_eq!(session.totals().unwrap().get(b), None);
}

#[test]
fn empty_equal_set_owes_nothing() {
    let mut session = Session::new();
    let a = session.add_participant("A").unwrap();
    let item = session.add_item("Tea", cents(300)).unwrap();
    session.set_allocation(item, Allocation::equal([a])).unwrap();
    session.remove_participant(a).unwrap();

    assert_eq!(session.items()[0].allocation, Allocation::equal(Vec::new()));
    let b = session.add_participant("B").unwrap();
    assert!(total_of(&session, b).is_zero());
    assert_eq!(session.classify().unwrap().split.len(), 1);
}

/// One 1.00 item per group size `n`, split over the first `n` people.
fn staircase(people: usize) -> (Session, Vec<ParticipantId>) {
    let mut session = Session::new();
    let ids: Vec<_> = (0..people)
        .map(|i| session.add_participant(&format!("P{i}")).unwrap())
        .collect();
    for n in 1..=people {
        let item = session.add_item(&format!("Round {n}"), cents(100)).unwrap();
        session
            .set_allocation(item, Allocation::equal(ids[..n].to_vec()))
            .unwrap();
    }
    (session, ids)
}

#[test]
fn large_groups_of_mixed_sizes_never_panic() {
    let (session, ids) = staircase(90);
    assert_eq!(session.grand_total().unwrap(), cents(9000));
    match session.totals() {
        Ok(totals) => {
            assert_eq!(totals.get(ids[89]), Some(Liability::split(cents(100), 90)));
        }
        Err(err) => assert!(matches!(err, EngineError::InvalidInput(_))),
    }

    let (session, _) = staircase(120);
    assert!(matches!(
        session.totals(),
        Err(EngineError::InvalidInput(_))
    ));
    assert!(matches!(
        session.summary(None),
        Err(EngineError::InvalidInput(_))
    ));
}

#[test]
fn select_none_is_idempotent() {
    let mut session = Session::new();
    session.add_participant("A").unwrap();
    session.add_participant("B").unwrap();
    let item = session.add_item("Fries", cents(400)).unwrap();
    session
        .set_allocation(item, Allocation::equal(Vec::new()))
        .unwrap();
    session.select_all_for_equal(item, true).unwrap();
    assert_eq!(session.items()[0].allocation.participants().len(), 2);

    session.select_all_for_equal(item, false).unwrap();
    let once = session.items()[0].allocation.clone();
    session.select_all_for_equal(item, false).unwrap();
    assert_eq!(session.items()[0].allocation, once);
    assert!(once.participants().is_empty());
}

#[test]
fn negative_amounts_are_invalid() {
    let mut session = Session::new();
    let a = session.add_participant("A").unwrap();
    assert!(matches!(
        session.add_item("Refund", cents(-100)),
        Err(EngineError::InvalidInput(_))
    ));
    let item = session.add_item("Soup", cents(100)).unwrap();
    session
        .set_allocation(item, Allocation::unequal(Vec::new()).unwrap())
        .unwrap();
    assert!(matches!(
        session.update_unequal_share(item, a, cents(-1)),
        Err(EngineError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn published_summary_round_trips() {
    let mut session = Session::new();
    let ids: Vec<_> = ["A", "B", "C"]
        .iter()
        .map(|name| session.add_participant(name).unwrap())
        .collect();
    let cake = session.add_item("Cake", cents(999)).unwrap();
    session
        .set_allocation(cake, Allocation::equal(ids.clone()))
        .unwrap();
    let wine = session.add_item("Wine", cents(2000)).unwrap();
    session
        .set_allocation(
            wine,
            Allocation::unequal([Share::new(ids[0], cents(1250)), Share::new(ids[2], cents(750))])
                .unwrap(),
        )
        .unwrap();
    session.add_item("Bread", cents(300)).unwrap();

    let sink = MemorySink::new();
    let before = session.summary(Some("Dinner")).unwrap();
    let id = sink.publish(&before).await.unwrap();
    let after = sink.fetch(&id).await.unwrap();

    assert_eq!(after.totals, before.totals);
    assert_eq!(after.grand_total, before.grand_total);
    assert_eq!(after, before);

    let expected = aggregate_totals(session.items(), session.participants()).unwrap();
    for (participant, total) in expected.iter() {
        assert_eq!(after.totals[&participant], total.to_major());
    }
    assert_eq!(after.grand_total, cents(3299));
}

#[tokio::test]
async fn missing_summary_is_not_found() {
    let sink = MemorySink::new();
    let err = sink.fetch("3f1b0e4c-0000-4000-8000-000000000000").await;
    assert!(matches!(err, Err(EngineError::SummaryNotFound(_))));
}
