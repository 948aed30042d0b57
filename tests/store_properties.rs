mod common;

use chrono::NaiveDate;
use proptest::prelude::*;
use proptest::sample::Index;
use std::collections::{BTreeSet, HashMap};

use common::{fake_attendee, store};
use training_booking::error::BookingError;
use training_booking::models::SeatId;
use training_booking::store::{BookingStore, NewBooking};

const HALLS: [&str; 2] = ["1", "2"];
const SLOTS: [&str; 2] = ["1", "2"];

#[derive(Debug, Clone)]
enum Op {
    Create {
        hall: usize,
        slot: usize,
        day: u32,
        seats: BTreeSet<usize>,
    },
    Cancel {
        booking: Index,
        mask: Vec<bool>,
    },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..2usize, 0..2usize, 1..3u32, prop::collection::btree_set(0..50usize, 1..6))
            .prop_map(|(hall, slot, day, seats)| Op::Create { hall, slot, day, seats }),
        2 => (any::<Index>(), prop::collection::vec(any::<bool>(), 1..8))
            .prop_map(|(booking, mask)| Op::Cancel { booking, mask }),
    ]
}

fn seat_ids(store: &BookingStore, hall: &str, picks: &BTreeSet<usize>) -> Vec<SeatId> {
    let all: Vec<SeatId> = store.catalog().hall(hall).unwrap().seat_ids().collect();
    picks.iter().map(|&i| all[i].clone()).collect()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}

// Занятые места совпадают с объединением мест броней, ни одно место не занято дважды
fn check_invariants(store: &BookingStore) {
    let mut owners: HashMap<(String, NaiveDate, String, SeatId), usize> = HashMap::new();
    for booking in store.bookings() {
        assert!(!booking.seats.is_empty());
        assert_eq!(booking.seats.len(), booking.attendees.len());
        let unique: BTreeSet<&SeatId> = booking.seats.iter().collect();
        assert_eq!(unique.len(), booking.seats.len());

        for seat in &booking.seats {
            let key = (
                booking.hall_id.clone(),
                booking.date,
                booking.time_slot_id.clone(),
                seat.clone(),
            );
            *owners.entry(key).or_default() += 1;
        }
    }
    assert!(owners.values().all(|&n| n == 1), "seat booked twice");

    for hall in HALLS {
        for slot in SLOTS {
            for day in 1..3 {
                let expected: BTreeSet<SeatId> = store
                    .bookings()
                    .iter()
                    .filter(|b| b.matches_slot(hall, date(day), slot))
                    .flat_map(|b| b.seats.iter().cloned())
                    .collect();
                assert_eq!(store.occupied_seats(hall, date(day), slot), expected);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn occupancy_always_matches_current_bookings(ops in prop::collection::vec(op(), 1..40)) {
        let mut store = store();

        for op in ops {
            match op {
                Op::Create { hall, slot, day, seats } => {
                    let hall_id = HALLS[hall];
                    let slot_id = SLOTS[slot];
                    let seats = seat_ids(&store, hall_id, &seats);
                    let occupied = store.occupied_seats(hall_id, date(day), slot_id);
                    let overlap = seats.iter().any(|s| occupied.contains(s));
                    let before = store.len();

                    let result = store.create_booking(NewBooking {
                        hall_id: hall_id.to_string(),
                        date: date(day),
                        time_slot_id: slot_id.to_string(),
                        user_id: "1".to_string(),
                        attendees: seats.iter().map(|_| fake_attendee()).collect(),
                        seats,
                    });

                    if overlap {
                        prop_assert!(matches!(result, Err(BookingError::Conflict(_))));
                        prop_assert_eq!(store.len(), before);
                    } else {
                        prop_assert!(result.is_ok());
                        prop_assert_eq!(store.len(), before + 1);
                    }
                }
                Op::Cancel { booking, mask } => {
                    if store.is_empty() {
                        continue;
                    }
                    let target = store.bookings()[booking.index(store.len())].clone();
                    let mut chosen: Vec<SeatId> = target
                        .seats
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| mask[i % mask.len()])
                        .map(|(_, s)| s.clone())
                        .collect();
                    if chosen.is_empty() {
                        chosen.push(target.seats[0].clone());
                    }

                    store.cancel_booking(&target.id, &chosen).unwrap();

                    if chosen.len() == target.seats.len() {
                        prop_assert!(store.find_booking(&target.id).is_err());
                    } else {
                        let after = store.find_booking(&target.id).unwrap();
                        prop_assert_eq!(&after.id, &target.id);
                        prop_assert_eq!(&after.hall_id, &target.hall_id);
                        prop_assert_eq!(after.date, target.date);
                        prop_assert_eq!(&after.time_slot_id, &target.time_slot_id);
                        prop_assert_eq!(&after.user_id, &target.user_id);
                        prop_assert_eq!(&after.created_at, &target.created_at);
                        // оставшиеся пары (место, участник) совпадают с исходными
                        let expected: Vec<_> = target
                            .seats
                            .iter()
                            .zip(&target.attendees)
                            .filter(|(s, _)| !chosen.contains(s))
                            .collect();
                        let actual: Vec<_> = after.seats.iter().zip(&after.attendees).collect();
                        prop_assert_eq!(actual, expected);
                    }
                }
            }
            check_invariants(&store);
        }
    }
}
