use std::collections::HashSet;
use tracing::debug;

use crate::error::{BookingError, Result};
use crate::models::{Hall, TimeSlot};

/// Справочник залов и временных слотов. После создания не меняется.
#[derive(Debug, Clone)]
pub struct Catalog {
    halls: Vec<Hall>,
    time_slots: Vec<TimeSlot>,
}

impl Catalog {
    pub fn new(halls: Vec<Hall>, time_slots: Vec<TimeSlot>) -> Result<Self> {
        if halls.is_empty() {
            return Err(BookingError::Config("catalog has no halls".to_string()));
        }

        let mut hall_ids = HashSet::new();
        for hall in &halls {
            hall.validate()?;
            if !hall_ids.insert(hall.id.as_str()) {
                return Err(BookingError::InvalidHall {
                    hall_id: hall.id.clone(),
                    reason: "duplicate id".to_string(),
                });
            }
        }

        let mut slot_ids = HashSet::new();
        for slot in &time_slots {
            slot.validate()?;
            if !slot_ids.insert(slot.id.as_str()) {
                return Err(BookingError::InvalidTimeSlot {
                    slot_id: slot.id.clone(),
                    reason: "duplicate id".to_string(),
                });
            }
        }

        debug!(halls = halls.len(), time_slots = time_slots.len(), "Catalog loaded");
        Ok(Self { halls, time_slots })
    }

    /// Справочник учебного центра по умолчанию: два зала 5x10 и четыре сессии в день.
    pub fn training_center() -> Result<Self> {
        let rows: Vec<String> = ["A", "B", "C", "D", "E"].iter().map(|r| r.to_string()).collect();
        let halls = vec![
            Hall {
                id: "1".to_string(),
                name: "Main Training Hall".to_string(),
                capacity: 50,
                hall_code: "MTH-001".to_string(),
                rows: rows.clone(),
                seats_per_row: 10,
            },
            Hall {
                id: "2".to_string(),
                name: "Executive Training Room".to_string(),
                capacity: 50,
                hall_code: "ETR-002".to_string(),
                rows,
                seats_per_row: 10,
            },
        ];
        let time_slots = vec![
            TimeSlot::new("1", (9, 0), (12, 0), "Morning Session (9 AM - 12 PM)")?,
            TimeSlot::new("2", (12, 0), (15, 0), "Afternoon Session 1 (12 PM - 3 PM)")?,
            TimeSlot::new("3", (15, 0), (18, 0), "Afternoon Session 2 (3 PM - 6 PM)")?,
            TimeSlot::new("4", (18, 0), (21, 0), "Evening Session (6 PM - 9 PM)")?,
        ];
        Self::new(halls, time_slots)
    }

    pub fn halls(&self) -> &[Hall] {
        &self.halls
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    pub fn hall(&self, id: &str) -> Option<&Hall> {
        self.halls.iter().find(|h| h.id == id)
    }

    pub fn time_slot(&self, id: &str) -> Option<&TimeSlot> {
        self.time_slots.iter().find(|t| t.id == id)
    }

    // Экран бронирования показывает только первый зал
    pub fn default_hall(&self) -> &Hall {
        &self.halls[0]
    }

    pub fn require_hall(&self, id: &str) -> Result<&Hall> {
        self.hall(id)
            .ok_or_else(|| BookingError::UnknownHall(id.to_string()))
    }

    pub fn require_time_slot(&self, id: &str) -> Result<&TimeSlot> {
        self.time_slot(id)
            .ok_or_else(|| BookingError::UnknownTimeSlot(id.to_string()))
    }
}
