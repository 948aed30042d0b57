use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::BookingError;
use crate::models::SeatId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hall {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    pub hall_code: String,
    pub rows: Vec<String>,
    pub seats_per_row: u32,
}

impl Hall {
    /// Все места зала построчно: A1..A10, B1..B10, ...
    pub fn seat_ids(&self) -> impl Iterator<Item = SeatId> + '_ {
        self.rows
            .iter()
            .flat_map(move |row| (1..=self.seats_per_row).map(move |n| SeatId::new(row, n)))
    }

    pub fn contains_seat(&self, seat: &SeatId) -> bool {
        let column = seat.column();
        column >= 1
            && column <= self.seats_per_row
            && self.rows.iter().any(|row| row == seat.row())
    }

    /// rows x seatsPerRow; `None` при переполнении u32.
    pub fn layout_capacity(&self) -> Option<u32> {
        u32::try_from(self.rows.len())
            .ok()
            .and_then(|rows| rows.checked_mul(self.seats_per_row))
    }

    // Проверка справочных данных: вместимость должна совпадать с сеткой мест
    pub fn validate(&self) -> Result<(), BookingError> {
        let invalid = |reason: String| BookingError::InvalidHall {
            hall_id: self.id.clone(),
            reason,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("empty id".to_string()));
        }
        if self.rows.is_empty() {
            return Err(invalid("no rows".to_string()));
        }
        if self.seats_per_row == 0 {
            return Err(invalid("seatsPerRow must be at least 1".to_string()));
        }

        let mut seen = HashSet::new();
        for row in &self.rows {
            if row.is_empty() || !row.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(invalid(format!("bad row label {:?}", row)));
            }
            if !seen.insert(row.as_str()) {
                return Err(invalid(format!("duplicate row label {}", row)));
            }
        }

        let layout = self.layout_capacity().ok_or_else(|| {
            invalid(format!(
                "{} rows x {} seats overflows seat count",
                self.rows.len(),
                self.seats_per_row
            ))
        })?;
        if self.capacity != layout {
            return Err(invalid(format!(
                "capacity {} does not match {} rows x {} seats",
                self.capacity,
                self.rows.len(),
                self.seats_per_row
            )));
        }

        Ok(())
    }
}
