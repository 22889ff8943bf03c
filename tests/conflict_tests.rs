//! Commit-time conflict guard, including the concurrent-confirmation race.

mod fixtures;

use std::sync::Arc;
use std::thread;

use booking_engine::conflict::{InMemorySlotStore, SlotStore, confirm_booking};
use booking_engine::error::EngineError;
use booking_engine::geo::Coordinates;
use booking_engine::model::{Booking, BookingId, BookingStatus, ClientId, PhotographerId, ServiceId};

use fixtures::{monday, time};

fn draft(id: &str) -> Booking {
    Booking::draft(
        BookingId::new(id),
        ClientId::new("c1"),
        vec![ServiceId::new("foto")],
        Coordinates::new(0.0, 0.0),
    )
}

#[test]
fn racing_confirms_have_exactly_one_winner() {
    let store = Arc::new(InMemorySlotStore::new(
        vec![draft("b1"), draft("b2")],
        Vec::new(),
    ));

    let handles: Vec<_> = ["b1", "b2"]
        .into_iter()
        .map(|id| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                confirm_booking(
                    &*store,
                    &BookingId::new(id),
                    &PhotographerId::new("p1"),
                    monday(),
                    time(9, 0),
                    60,
                )
            })
        })
        .collect();

    let outcomes: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let winners = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    assert_eq!(winners, 1, "exactly one confirmation must win the slot");
    assert!(outcomes.iter().any(|outcome| matches!(
        outcome,
        Err(EngineError::SlotConflict { .. })
    )));
}

#[test]
fn cancelled_slot_can_be_reclaimed() {
    let store = InMemorySlotStore::new(vec![draft("b1"), draft("b2")], Vec::new());
    let p = PhotographerId::new("p1");

    confirm_booking(&store, &BookingId::new("b1"), &p, monday(), time(9, 0), 60).unwrap();
    store.cancel(&BookingId::new("b1")).unwrap();

    let reclaimed =
        confirm_booking(&store, &BookingId::new("b2"), &p, monday(), time(9, 0), 60).unwrap();
    assert_eq!(reclaimed.status, BookingStatus::Confirmed);
    assert_eq!(
        store.booking(&BookingId::new("b1")).unwrap().status,
        BookingStatus::Cancelled
    );
}

#[test]
fn time_off_blocks_commit_even_when_no_booking_overlaps() {
    let away = fixtures::time_off(
        "t1",
        "p1",
        monday().and_time(time(0, 0)),
        monday().and_time(time(23, 0)),
    );
    let store = InMemorySlotStore::new(vec![draft("b1")], vec![away]);

    let err = confirm_booking(
        &store,
        &BookingId::new("b1"),
        &PhotographerId::new("p1"),
        monday(),
        time(9, 0),
        60,
    )
    .unwrap_err();
    assert!(matches!(err, EngineError::SlotConflict { .. }));
}

#[test]
fn different_photographers_do_not_contend() {
    let store = InMemorySlotStore::new(vec![draft("b1"), draft("b2")], Vec::new());

    confirm_booking(
        &store,
        &BookingId::new("b1"),
        &PhotographerId::new("p1"),
        monday(),
        time(9, 0),
        60,
    )
    .unwrap();
    confirm_booking(
        &store,
        &BookingId::new("b2"),
        &PhotographerId::new("p2"),
        monday(),
        time(9, 0),
        60,
    )
    .unwrap();
}

#[test]
fn confirming_twice_is_an_invalid_transition() {
    let store = InMemorySlotStore::new(vec![draft("b1")], Vec::new());
    let p = PhotographerId::new("p1");

    confirm_booking(&store, &BookingId::new("b1"), &p, monday(), time(9, 0), 60).unwrap();
    let err =
        confirm_booking(&store, &BookingId::new("b1"), &p, monday(), time(11, 0), 60).unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition { .. }));
}
