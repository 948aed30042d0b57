use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{BookingId, SeatId};

/// Coarse classification the UI layer switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Conflict,
    Validation,
    NotFound,
    Auth,
    Config,
}

/// Seats already taken in the requested hall/date/slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatConflict {
    pub hall_id: String,
    pub date: NaiveDate,
    pub time_slot_id: String,
    pub seats: Vec<SeatId>,
}

impl std::fmt::Display for SeatConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let seats: Vec<&str> = self.seats.iter().map(SeatId::as_str).collect();
        write!(
            f,
            "seats [{}] already booked in hall {} on {} (slot {})",
            seats.join(", "),
            self.hall_id,
            self.date,
            self.time_slot_id
        )
    }
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("booking conflict: {0}")]
    Conflict(SeatConflict),

    #[error("invalid attendee: {0}")]
    InvalidAttendee(#[from] validator::ValidationErrors),

    #[error("seat/attendee count mismatch: {seats} seats, {attendees} attendees")]
    AttendeeCountMismatch { seats: usize, attendees: usize },

    #[error("no seats selected")]
    EmptySeatSelection,

    #[error("too many seats: {requested} requested, at most {max} allowed")]
    TooManySeats { requested: usize, max: usize },

    #[error("seat {0} selected more than once")]
    DuplicateSeat(SeatId),

    #[error("invalid seat id: {0:?}")]
    MalformedSeat(String),

    #[error("seat {seat} does not exist in hall {hall_id}")]
    SeatNotInHall { hall_id: String, seat: SeatId },

    #[error("unknown hall: {0}")]
    UnknownHall(String),

    #[error("unknown time slot: {0}")]
    UnknownTimeSlot(String),

    #[error("date {0} is in the past")]
    PastDate(NaiveDate),

    #[error("invalid user id: {0:?}")]
    InvalidUserId(String),

    #[error("no seats selected for cancellation")]
    EmptyCancellation,

    #[error("seat {seat} is not part of booking {booking_id}")]
    SeatNotInBooking { booking_id: BookingId, seat: SeatId },

    #[error("invalid hall {hall_id}: {reason}")]
    InvalidHall { hall_id: String, reason: String },

    #[error("invalid time slot {slot_id}: {reason}")]
    InvalidTimeSlot { slot_id: String, reason: String },

    #[error("booking not found: {0}")]
    BookingNotFound(BookingId),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid booking link: {0}")]
    InvalidLink(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not logged in")]
    Unauthenticated,

    #[error("booking {0} belongs to another user")]
    Forbidden(BookingId),

    #[error("config error: {0}")]
    Config(String),
}

impl BookingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::BookingNotFound(_) => ErrorKind::NotFound,
            Self::InvalidCredentials | Self::Unauthenticated | Self::Forbidden(_) => {
                ErrorKind::Auth
            }
            Self::Config(_) => ErrorKind::Config,
            Self::InvalidAttendee(_)
            | Self::AttendeeCountMismatch { .. }
            | Self::EmptySeatSelection
            | Self::TooManySeats { .. }
            | Self::DuplicateSeat(_)
            | Self::MalformedSeat(_)
            | Self::SeatNotInHall { .. }
            | Self::UnknownHall(_)
            | Self::UnknownTimeSlot(_)
            | Self::PastDate(_)
            | Self::InvalidUserId(_)
            | Self::EmptyCancellation
            | Self::SeatNotInBooking { .. }
            | Self::InvalidHall { .. }
            | Self::InvalidTimeSlot { .. }
            | Self::InvalidInput(_)
            | Self::InvalidLink(_) => ErrorKind::Validation,
        }
    }
}

impl From<config::ConfigError> for BookingError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T, E = BookingError> = std::result::Result<T, E>;
