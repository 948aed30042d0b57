use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BookingError;

/// Идентификатор места: буква ряда + номер места с единицы ("A1", "E10").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatId(String);

impl SeatId {
    pub fn new(row: &str, column: u32) -> Self {
        SeatId(format!("{}{}", row, column))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Метка ряда (буквенный префикс).
    pub fn row(&self) -> &str {
        let split = self.split_at();
        &self.0[..split]
    }

    /// Номер места в ряду, начиная с 1.
    pub fn column(&self) -> u32 {
        // валидируется в from_str, поэтому парсинг здесь не падает
        self.0[self.split_at()..].parse().unwrap_or(0)
    }

    fn split_at(&self) -> usize {
        self.0
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(self.0.len())
    }
}

impl FromStr for SeatId {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s.find(|c: char| c.is_ascii_digit()).unwrap_or(s.len());
        let (row, column) = s.split_at(split);

        if row.is_empty() || !row.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(BookingError::MalformedSeat(s.to_string()));
        }
        if column.is_empty() || !column.chars().all(|c| c.is_ascii_digit()) {
            return Err(BookingError::MalformedSeat(s.to_string()));
        }
        match column.parse::<u32>() {
            Ok(n) if n >= 1 && !column.starts_with('0') => Ok(SeatId::new(row, n)),
            _ => Err(BookingError::MalformedSeat(s.to_string())),
        }
    }
}

impl TryFrom<String> for SeatId {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeatId> for String {
    fn from(value: SeatId) -> Self {
        value.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Разбирает список мест через запятую: "A1,A2, B3".
pub fn parse_seat_list(input: &str) -> Result<Vec<SeatId>, BookingError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}
