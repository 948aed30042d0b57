use chrono::NaiveDate;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock};
use crate::config::BookingConfig;
use crate::error::{BookingError, Result, SeatConflict};
use crate::models::{Attendee, Booking, BookingId, SeatId};

/// Запрос на бронирование: всё, что UI собирает до подтверждения.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub hall_id: String,
    pub date: NaiveDate,
    pub time_slot_id: String,
    pub user_id: String,
    pub seats: Vec<SeatId>,
    pub attendees: Vec<Attendee>,
}

/// Результат отмены.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cancellation {
    /// Бронь удалена целиком
    Removed,
    /// Часть мест снята, бронь осталась
    Reduced { remaining: usize },
}

/// Хранилище броней в памяти. Единственная точка изменения состояния броней.
///
/// Занятые места никогда не кешируются: `occupied_seats` каждый раз
/// собирается из текущих броней, поэтому отмена видна сразу.
pub struct BookingStore {
    catalog: Arc<Catalog>,
    clock: Arc<dyn Clock>,
    rules: BookingConfig,
    bookings: Vec<Booking>,
}

impl BookingStore {
    pub fn new(catalog: Arc<Catalog>, rules: BookingConfig) -> Self {
        Self::with_clock(catalog, rules, Arc::new(SystemClock))
    }

    pub fn with_clock(catalog: Arc<Catalog>, rules: BookingConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            clock,
            rules,
            bookings: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> &BookingConfig {
        &self.rules
    }

    /// Объединение мест всех броней на этот зал/дату/слот.
    pub fn occupied_seats(&self, hall_id: &str, date: NaiveDate, time_slot_id: &str) -> BTreeSet<SeatId> {
        let occupied: BTreeSet<SeatId> = self
            .bookings_for_slot(hall_id, date, time_slot_id)
            .flat_map(|b| b.seats.iter().cloned())
            .collect();
        debug!(hall_id, %date, time_slot_id, occupied = occupied.len(), "Occupied seats computed");
        occupied
    }

    pub fn bookings_for_slot<'a>(
        &'a self,
        hall_id: &'a str,
        date: NaiveDate,
        time_slot_id: &'a str,
    ) -> impl Iterator<Item = &'a Booking> + 'a {
        self.bookings
            .iter()
            .filter(move |b| b.matches_slot(hall_id, date, time_slot_id))
    }

    /// Создать бронь. Либо проходит целиком, либо хранилище не меняется.
    pub fn create_booking(&mut self, request: NewBooking) -> Result<Booking> {
        self.validate_request(&request)?;

        let occupied = self.occupied_seats(&request.hall_id, request.date, &request.time_slot_id);
        let taken: Vec<SeatId> = request
            .seats
            .iter()
            .filter(|s| occupied.contains(*s))
            .cloned()
            .collect();

        if !taken.is_empty() {
            warn!(
                hall_id = %request.hall_id,
                date = %request.date,
                time_slot_id = %request.time_slot_id,
                seats = ?taken,
                "Rejected booking: seats already taken"
            );
            return Err(BookingError::Conflict(SeatConflict {
                hall_id: request.hall_id,
                date: request.date,
                time_slot_id: request.time_slot_id,
                seats: taken,
            }));
        }

        let booking = Booking {
            id: BookingId::generate(),
            hall_id: request.hall_id,
            date: request.date,
            time_slot_id: request.time_slot_id,
            seats: request.seats,
            attendees: request.attendees,
            user_id: request.user_id,
            created_at: self.clock.now(),
        };

        info!(
            booking_id = %booking.id,
            hall_id = %booking.hall_id,
            date = %booking.date,
            time_slot_id = %booking.time_slot_id,
            seats = booking.seat_count(),
            "Booking created"
        );
        self.bookings.push(booking.clone());
        Ok(booking)
    }

    /// Отменить места брони. Если отменяются все места, бронь удаляется, иначе снимаются
    /// только указанные места вместе с участниками на тех же позициях.
    pub fn cancel_booking(&mut self, booking_id: &BookingId, seats_to_cancel: &[SeatId]) -> Result<Cancellation> {
        if seats_to_cancel.is_empty() {
            return Err(BookingError::EmptyCancellation);
        }

        let idx = self
            .bookings
            .iter()
            .position(|b| &b.id == booking_id)
            .ok_or_else(|| BookingError::BookingNotFound(booking_id.clone()))?;

        let mut seen = HashSet::new();
        for seat in seats_to_cancel {
            if !seen.insert(seat) {
                return Err(BookingError::DuplicateSeat(seat.clone()));
            }
            if !self.bookings[idx].has_seat(seat) {
                return Err(BookingError::SeatNotInBooking {
                    booking_id: booking_id.clone(),
                    seat: seat.clone(),
                });
            }
        }

        if self.bookings[idx].covers_all(seats_to_cancel) {
            let removed = self.bookings.remove(idx);
            info!(booking_id = %removed.id, seats = removed.seat_count(), "Booking cancelled");
            return Ok(Cancellation::Removed);
        }

        let booking = &mut self.bookings[idx];
        let released = booking.remove_seats(seats_to_cancel);
        info!(
            booking_id = %booking.id,
            released,
            remaining = booking.seat_count(),
            "Booking partially cancelled"
        );
        Ok(Cancellation::Reduced {
            remaining: booking.seat_count(),
        })
    }

    /// Брони пользователя в порядке создания.
    pub fn bookings_for_user(&self, user_id: &str) -> Vec<&Booking> {
        self.bookings.iter().filter(|b| b.user_id == user_id).collect()
    }

    pub fn find_booking(&self, booking_id: &BookingId) -> Result<&Booking> {
        self.bookings
            .iter()
            .find(|b| &b.id == booking_id)
            .ok_or_else(|| BookingError::BookingNotFound(booking_id.clone()))
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    // Проверки запроса до поиска конфликтов
    fn validate_request(&self, request: &NewBooking) -> Result<()> {
        if request.user_id.trim().is_empty() {
            return Err(BookingError::InvalidUserId(request.user_id.clone()));
        }

        let hall = self.catalog.require_hall(&request.hall_id)?;
        self.catalog.require_time_slot(&request.time_slot_id)?;

        if !self.rules.allow_past_dates && request.date < self.clock.today() {
            return Err(BookingError::PastDate(request.date));
        }

        if request.seats.is_empty() {
            return Err(BookingError::EmptySeatSelection);
        }
        if request.seats.len() > self.rules.max_seats_per_booking {
            return Err(BookingError::TooManySeats {
                requested: request.seats.len(),
                max: self.rules.max_seats_per_booking,
            });
        }

        let mut seen = HashSet::new();
        for seat in &request.seats {
            if !seen.insert(seat) {
                return Err(BookingError::DuplicateSeat(seat.clone()));
            }
            if !hall.contains_seat(seat) {
                return Err(BookingError::SeatNotInHall {
                    hall_id: hall.id.clone(),
                    seat: seat.clone(),
                });
            }
        }

        if request.seats.len() != request.attendees.len() {
            return Err(BookingError::AttendeeCountMismatch {
                seats: request.seats.len(),
                attendees: request.attendees.len(),
            });
        }

        let today = self.clock.today();
        for attendee in &request.attendees {
            attendee.validate_as_of(today)?;
        }

        Ok(())
    }
}
