#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use fake::faker::address::en::CountryName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use std::sync::Arc;

use training_booking::catalog::Catalog;
use training_booking::clock::FixedClock;
use training_booking::config::{BookingConfig, Config};
use training_booking::models::{Attendee, SeatId};
use training_booking::store::{BookingStore, NewBooking};
use training_booking::AppState;

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 5, 1, 9, 30, 0).unwrap()))
}

pub fn booking_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

pub fn store() -> BookingStore {
    BookingStore::with_clock(
        Arc::new(Catalog::training_center().unwrap()),
        BookingConfig::default(),
        fixed_clock(),
    )
}

pub fn app() -> AppState {
    AppState::with_clock(Config::default(), fixed_clock()).unwrap()
}

pub fn fake_attendee() -> Attendee {
    Attendee {
        name: Name().fake(),
        age: (18..70).fake::<u32>(),
        date_of_birth: NaiveDate::from_ymd_opt((1960..2005).fake::<i32>(), 4, 12).unwrap(),
        nationality: CountryName().fake(),
        contact_number: format!("+971 5{} {:07}", (0..9).fake::<u8>(), (0..9_999_999).fake::<u32>()),
        email: SafeEmail().fake(),
    }
}

pub fn seats(ids: &[&str]) -> Vec<SeatId> {
    ids.iter().map(|s| s.parse().unwrap()).collect()
}

pub fn new_booking(user_id: &str, ids: &[&str]) -> NewBooking {
    NewBooking {
        hall_id: "1".to_string(),
        date: booking_date(),
        time_slot_id: "1".to_string(),
        user_id: user_id.to_string(),
        seats: seats(ids),
        attendees: ids.iter().map(|_| fake_attendee()).collect(),
    }
}
