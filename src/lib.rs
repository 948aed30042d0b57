pub mod auth;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod deep_link;
pub mod error;
pub mod models;
pub mod occupancy;
pub mod store;

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

use auth::{Authenticator, MockAuthenticator, Session};
use catalog::Catalog;
use clock::{Clock, SystemClock};
use error::{BookingError, Result};
use models::{Attendee, Booking, BookingId, SeatId, User};
use occupancy::{HallOccupancy, SeatMap};
use store::{BookingStore, Cancellation, NewBooking};

// Состояние приложения, которым владеет UI: конфиг, справочник, брони, сессия
pub struct AppState {
    pub config: crate::config::Config,
    pub catalog: Arc<Catalog>,
    store: BookingStore,
    session: Session,
    authenticator: Box<dyn Authenticator>,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: crate::config::Config, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let catalog = Arc::new(Catalog::training_center()?);
        let store = BookingStore::with_clock(catalog.clone(), config.booking.clone(), clock);
        let authenticator = Box::new(MockAuthenticator::new(&config.auth));

        info!(
            environment = %config.app.environment,
            halls = catalog.halls().len(),
            time_slots = catalog.time_slots().len(),
            "Booking app initialised"
        );

        Ok(Self {
            config,
            catalog,
            store,
            session: Session::default(),
            authenticator,
        })
    }

    pub fn with_authenticator(mut self, authenticator: Box<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }

    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<&User> {
        let user = self.authenticator.login(email, password)?;
        self.session.sign_in(user);
        self.session.require_user()
    }

    pub fn logout(&mut self) -> Option<User> {
        self.session.sign_out()
    }

    /// Бронь от имени вошедшего пользователя.
    pub fn book(
        &mut self,
        hall_id: &str,
        date: NaiveDate,
        time_slot_id: &str,
        seats: Vec<SeatId>,
        attendees: Vec<Attendee>,
    ) -> Result<Booking> {
        let user_id = self.session.require_user()?.id.clone();
        self.store.create_booking(NewBooking {
            hall_id: hall_id.to_string(),
            date,
            time_slot_id: time_slot_id.to_string(),
            user_id,
            seats,
            attendees,
        })
    }

    /// Отмена доступна только владельцу брони.
    pub fn cancel(&mut self, booking_id: &BookingId, seats: &[SeatId]) -> Result<Cancellation> {
        let user = self.session.require_user()?;
        let booking = self.store.find_booking(booking_id)?;
        if booking.user_id != user.id {
            warn!(booking_id = %booking_id, user_id = %user.id, "Cancellation of foreign booking refused");
            return Err(BookingError::Forbidden(booking_id.clone()));
        }
        self.store.cancel_booking(booking_id, seats)
    }

    /// "Мои брони". При scope_bookings_to_user = false показываются все брони.
    pub fn my_bookings(&self) -> Result<Vec<&Booking>> {
        let user = self.session.require_user()?;
        if self.config.booking.scope_bookings_to_user {
            Ok(self.store.bookings_for_user(&user.id))
        } else {
            Ok(self.store.bookings().iter().collect())
        }
    }

    /// Просмотр по ссылке работает и без входа в систему.
    pub fn booking_from_link(&self, link: &str) -> Result<Option<&Booking>> {
        match deep_link::parse_booking_link(link)? {
            Some(id) => self.store.find_booking(&id).map(Some),
            None => Ok(None),
        }
    }

    pub fn find_booking(&self, booking_id: &BookingId) -> Result<&Booking> {
        self.store.find_booking(booking_id)
    }

    pub fn share_url(&self, booking_id: &BookingId) -> Result<String> {
        deep_link::share_url(&self.config.links.base_url, booking_id)
    }

    pub fn occupancy(&self, hall_id: &str, date: NaiveDate, time_slot_id: &str) -> Result<HallOccupancy> {
        HallOccupancy::compute(&self.store, hall_id, date, time_slot_id)
    }

    pub fn seat_map(&self, hall_id: &str, date: NaiveDate, time_slot_id: &str) -> Result<SeatMap> {
        SeatMap::build(&self.store, hall_id, date, time_slot_id)
    }
}
