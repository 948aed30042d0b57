use chrono::NaiveDate;
use serde::Serialize;

use crate::config::BookingConfig;
use crate::error::Result;
use crate::models::{Hall, SeatId};
use crate::store::BookingStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityLevel {
    Open,
    Limited,
    Critical,
}

impl AvailabilityLevel {
    pub fn from_available(available: u32, rules: &BookingConfig) -> Self {
        if available <= rules.critical_threshold {
            AvailabilityLevel::Critical
        } else if available <= rules.limited_threshold {
            AvailabilityLevel::Limited
        } else {
            AvailabilityLevel::Open
        }
    }
}

/// Заполненность зала на конкретную дату и слот.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HallOccupancy {
    pub hall_id: String,
    pub date: NaiveDate,
    pub time_slot_id: String,
    pub capacity: u32,
    pub occupied: u32,
    pub available: u32,
    pub percentage: f64,
    pub level: AvailabilityLevel,
}

impl HallOccupancy {
    pub fn compute(
        store: &BookingStore,
        hall_id: &str,
        date: NaiveDate,
        time_slot_id: &str,
    ) -> Result<Self> {
        let hall = store.catalog().require_hall(hall_id)?;
        store.catalog().require_time_slot(time_slot_id)?;

        // Пересчитываем каждый раз, без отдельного счетчика
        let occupied = store.occupied_seats(hall_id, date, time_slot_id).len() as u32;
        let available = hall.capacity.saturating_sub(occupied);
        let percentage = if hall.capacity == 0 {
            0.0
        } else {
            f64::from(occupied) * 100.0 / f64::from(hall.capacity)
        };

        Ok(HallOccupancy {
            hall_id: hall.id.clone(),
            date,
            time_slot_id: time_slot_id.to_string(),
            capacity: hall.capacity,
            occupied,
            available,
            percentage,
            level: AvailabilityLevel::from_available(available, store.rules()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Booked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatCell {
    pub seat: SeatId,
    pub status: SeatStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatRow {
    pub label: String,
    pub seats: Vec<SeatCell>,
}

/// Схема зала для выбора мест: занятые места недоступны для клика.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMap {
    pub hall_id: String,
    pub date: NaiveDate,
    pub time_slot_id: String,
    pub rows: Vec<SeatRow>,
}

impl SeatMap {
    pub fn build(
        store: &BookingStore,
        hall_id: &str,
        date: NaiveDate,
        time_slot_id: &str,
    ) -> Result<Self> {
        let hall = store.catalog().require_hall(hall_id)?;
        store.catalog().require_time_slot(time_slot_id)?;
        let occupied = store.occupied_seats(hall_id, date, time_slot_id);

        let rows = hall
            .rows
            .iter()
            .map(|label| SeatRow {
                label: label.clone(),
                seats: (1..=hall.seats_per_row)
                    .map(|n| {
                        let seat = SeatId::new(label, n);
                        let status = if occupied.contains(&seat) {
                            SeatStatus::Booked
                        } else {
                            SeatStatus::Available
                        };
                        SeatCell { seat, status }
                    })
                    .collect(),
            })
            .collect();

        Ok(SeatMap {
            hall_id: hall.id.clone(),
            date,
            time_slot_id: time_slot_id.to_string(),
            rows,
        })
    }

    pub fn is_available(&self, seat: &SeatId) -> bool {
        self.cells()
            .any(|c| &c.seat == seat && c.status == SeatStatus::Available)
    }

    pub fn cells(&self) -> impl Iterator<Item = &SeatCell> {
        self.rows.iter().flat_map(|r| r.seats.iter())
    }

    /// Текстовая схема: "[ ]" свободно, "[x]" занято.
    pub fn render(&self, hall: &Hall) -> String {
        let width = hall.rows.iter().map(String::len).max().unwrap_or(1);
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&format!("{:>width$} ", row.label, width = width));
            for cell in &row.seats {
                out.push_str(match cell.status {
                    SeatStatus::Available => "[ ]",
                    SeatStatus::Booked => "[x]",
                });
            }
            out.push('\n');
        }
        out
    }
}
