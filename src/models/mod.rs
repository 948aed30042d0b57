pub mod attendee;
pub mod booking;
pub mod hall;
pub mod seat;
pub mod time_slot;
pub mod user;

pub use attendee::Attendee;
pub use booking::{Booking, BookingId};
pub use hall::Hall;
pub use seat::{parse_seat_list, SeatId};
pub use time_slot::TimeSlot;
pub use user::User;
