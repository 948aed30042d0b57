use tracing::info;

use crate::config::AuthConfig;
use crate::error::{BookingError, Result};
use crate::models::User;

/// Внешний сервис авторизации. Ядро бронирования от него не зависит.
pub trait Authenticator: Send + Sync {
    fn login(&self, email: &str, password: &str) -> Result<User>;
}

/// Заглушка: принимает любые непустые логин и пароль и выдает
/// одного и того же пользователя из конфигурации.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    user_id: String,
    user_name: String,
}

impl MockAuthenticator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            user_id: config.mock_user_id.clone(),
            user_name: config.mock_user_name.clone(),
        }
    }
}

impl Authenticator for MockAuthenticator {
    fn login(&self, email: &str, password: &str) -> Result<User> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(BookingError::InvalidCredentials);
        }
        Ok(User {
            id: self.user_id.clone(),
            email: email.trim().to_string(),
            name: self.user_name.clone(),
        })
    }
}

/// Текущая сессия UI: либо никто не вошел, либо один пользователь.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn sign_in(&mut self, user: User) {
        info!(user_id = %user.id, email = %user.email, "User logged in");
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) -> Option<User> {
        let user = self.user.take();
        if let Some(ref u) = user {
            info!(user_id = %u.id, "User logged out");
        }
        user
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn require_user(&self) -> Result<&User> {
        self.user.as_ref().ok_or(BookingError::Unauthenticated)
    }
}
