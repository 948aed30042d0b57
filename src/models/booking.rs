use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::models::{Attendee, SeatId};

/// Непрозрачный идентификатор брони, уникальный в пределах сессии.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    pub fn generate() -> Self {
        BookingId(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BookingId {
    fn from(value: &str) -> Self {
        BookingId(value.to_string())
    }
}

impl From<String> for BookingId {
    fn from(value: String) -> Self {
        BookingId(value)
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Бронь: места и участники идут парами, attendees[i] сидит на seats[i].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub hall_id: String,
    pub date: NaiveDate,
    pub time_slot_id: String,
    pub seats: Vec<SeatId>,
    pub attendees: Vec<Attendee>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn matches_slot(&self, hall_id: &str, date: NaiveDate, time_slot_id: &str) -> bool {
        self.hall_id == hall_id && self.date == date && self.time_slot_id == time_slot_id
    }

    pub fn has_seat(&self, seat: &SeatId) -> bool {
        self.seats.contains(seat)
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Участник, сидящий на указанном месте.
    pub fn attendee_for(&self, seat: &SeatId) -> Option<&Attendee> {
        let idx = self.seats.iter().position(|s| s == seat)?;
        self.attendees.get(idx)
    }

    pub fn covers_all(&self, seats: &[SeatId]) -> bool {
        let requested: HashSet<&SeatId> = seats.iter().collect();
        self.seats.iter().all(|s| requested.contains(s))
    }

    /// Убирает места и участников с теми же индексами, сохраняя порядок остальных.
    /// Возвращает количество удаленных мест.
    pub(crate) fn remove_seats(&mut self, seats: &[SeatId]) -> usize {
        let to_remove: HashSet<&SeatId> = seats.iter().collect();
        let before = self.seats.len();

        let (kept_seats, kept_attendees): (Vec<_>, Vec<_>) = std::mem::take(&mut self.seats)
            .into_iter()
            .zip(std::mem::take(&mut self.attendees))
            .filter(|(seat, _)| !to_remove.contains(seat))
            .unzip();

        self.seats = kept_seats;
        self.attendees = kept_attendees;
        before - self.seats.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendee(name: &str) -> Attendee {
        Attendee {
            name: name.into(),
            age: 30,
            date_of_birth: NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(),
            nationality: "UAE".into(),
            contact_number: "0501234567".into(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    fn booking() -> Booking {
        Booking {
            id: BookingId::from("b1"),
            hall_id: "1".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            time_slot_id: "1".into(),
            seats: vec!["A1".parse().unwrap(), "A2".parse().unwrap(), "A3".parse().unwrap()],
            attendees: vec![attendee("Ali"), attendee("Bea"), attendee("Cem")],
            user_id: "1".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn remove_seats_keeps_pairs_aligned() {
        let mut b = booking();
        let removed = b.remove_seats(&["A2".parse().unwrap()]);
        assert_eq!(removed, 1);
        assert_eq!(b.seats, vec!["A1".parse::<SeatId>().unwrap(), "A3".parse().unwrap()]);
        assert_eq!(b.attendees[0].name, "Ali");
        assert_eq!(b.attendees[1].name, "Cem");
        assert_eq!(b.attendee_for(&"A3".parse().unwrap()).unwrap().name, "Cem");
    }

    #[test]
    fn covers_all_detects_full_cancellation() {
        let b = booking();
        let all: Vec<SeatId> = b.seats.iter().rev().cloned().collect();
        assert!(b.covers_all(&all));
        assert!(!b.covers_all(&all[..2]));
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = BookingId::generate();
        let b = BookingId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn serializes_with_original_shape() {
        let json = serde_json::to_value(booking()).unwrap();
        assert_eq!(json["hallId"], "1");
        assert_eq!(json["timeSlotId"], "1");
        assert_eq!(json["date"], "2025-06-01");
        assert_eq!(json["seats"][1], "A2");
    }
}
