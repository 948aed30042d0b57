use serde::Deserialize;
use std::collections::HashMap;
use std::env;

use crate::error::{BookingError, Result};

const ENV_PREFIX: &str = "BOOKING";

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub booking: BookingConfig,
    pub auth: AuthConfig,
    pub links: LinkConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

// Правила бронирования
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    pub max_seats_per_booking: usize,
    pub allow_past_dates: bool,
    /// "Мои брони" показывают только брони текущего пользователя
    pub scope_bookings_to_user: bool,
    pub critical_threshold: u32,
    pub limited_threshold: u32,
}

// Заглушка авторизации: любой логин получает этот идентификатор
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub mock_user_id: String,
    pub mock_user_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkConfig {
    pub base_url: String,
}

impl Config {
    /// Значения по умолчанию, поверх них переменные BOOKING__SECTION__KEY.
    pub fn from_env() -> Result<Self> {
        Self::load(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
    }

    /// То же, что from_env, но переменные берутся из переданной карты.
    pub fn from_map(vars: HashMap<String, String>) -> Result<Self> {
        Self::load(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .source(Some(vars)),
        )
    }

    fn load(source: config::Environment) -> Result<Self> {
        let config: Config = config::Config::builder()
            .set_default("app.environment", "development")?
            .set_default("app.rust_log", "training_booking=info")?
            .set_default("app.log_format", "pretty")?
            .set_default("booking.max_seats_per_booking", 50)?
            .set_default("booking.allow_past_dates", true)?
            .set_default("booking.scope_bookings_to_user", true)?
            .set_default("booking.critical_threshold", 10)?
            .set_default("booking.limited_threshold", 20)?
            .set_default("auth.mock_user_id", "1")?
            .set_default("auth.mock_user_name", "Test User")?
            .set_default("links.base_url", "http://localhost:5173")?
            .set_override_option("app.rust_log", env::var("RUST_LOG").ok())?
            .add_source(source.try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.booking.max_seats_per_booking == 0 {
            return Err(BookingError::Config(
                "booking.max_seats_per_booking must be at least 1".to_string(),
            ));
        }
        if self.booking.critical_threshold > self.booking.limited_threshold {
            return Err(BookingError::Config(
                "booking.critical_threshold must not exceed booking.limited_threshold".to_string(),
            ));
        }
        if self.auth.mock_user_id.trim().is_empty() {
            return Err(BookingError::Config("auth.mock_user_id must be set".to_string()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                environment: "development".to_string(),
                rust_log: "training_booking=info".to_string(),
                log_format: LogFormat::Pretty,
            },
            booking: BookingConfig::default(),
            auth: AuthConfig {
                mock_user_id: "1".to_string(),
                mock_user_name: "Test User".to_string(),
            },
            links: LinkConfig {
                base_url: "http://localhost:5173".to_string(),
            },
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        BookingConfig {
            max_seats_per_booking: 50,
            allow_past_dates: true,
            scope_bookings_to_user: true,
            critical_threshold: 10,
            limited_threshold: 20,
        }
    }
}
