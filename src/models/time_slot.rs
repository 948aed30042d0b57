use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::BookingError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub label: String,
}

impl TimeSlot {
    pub fn new(id: &str, start: (u32, u32), end: (u32, u32), label: &str) -> Result<Self, BookingError> {
        let time = |(h, m): (u32, u32)| {
            NaiveTime::from_hms_opt(h, m, 0).ok_or_else(|| BookingError::InvalidTimeSlot {
                slot_id: id.to_string(),
                reason: format!("{:02}:{:02} is not a valid time", h, m),
            })
        };
        let slot = TimeSlot {
            id: id.to_string(),
            start_time: time(start)?,
            end_time: time(end)?,
            label: label.to_string(),
        };
        slot.validate()?;
        Ok(slot)
    }

    pub fn validate(&self) -> Result<(), BookingError> {
        if self.id.trim().is_empty() {
            return Err(BookingError::InvalidTimeSlot {
                slot_id: self.id.clone(),
                reason: "empty id".to_string(),
            });
        }
        if self.end_time <= self.start_time {
            return Err(BookingError::InvalidTimeSlot {
                slot_id: self.id.clone(),
                reason: "end time must be after start time".to_string(),
            });
        }
        Ok(())
    }

    /// "09:00 - 12:00"
    pub fn window(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

// Время в справочнике хранится как "HH:MM"
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
