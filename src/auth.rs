//! Hardcoded-credential login gate.
//!
//! The gate compares the submitted form against the configured credentials
//! after an artificial delay and hands back a local [`Session`]. It performs
//! no server-side authentication and never validates the session later.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::LoginConfig,
    controller::interact::{Notification, Notify},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("user name is required")]
    MissingUserName,
    #[error("password is required")]
    MissingPassword,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("invalid username or password")]
    InvalidCredentials,
}

/// Submitted login form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    /// User name.
    pub user_name: String,
    /// Password.
    pub password: String,
    /// "Remember me" checkbox; carried but unused.
    pub remember_me: bool,
}

impl LoginForm {
    /// Field validation run before any credential check.
    pub fn validate(&self, min_password_len: usize) -> Result<(), LoginError> {
        if self.user_name.is_empty() {
            return Err(LoginError::MissingUserName);
        }
        if self.password.is_empty() {
            return Err(LoginError::MissingPassword);
        }
        if self.password.chars().count() < min_password_len {
            return Err(LoginError::PasswordTooShort {
                min: min_password_len,
            });
        }
        Ok(())
    }
}

/// Local session created by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Logged-in user name.
    pub user_name: String,
    /// Profile email.
    pub email: String,
    /// Profile role.
    pub role: String,
    /// Placeholder bearer token.
    pub token: String,
}

/// Entry gate of the console.
pub struct LoginGate {
    config: LoginConfig,
    notify: Arc<dyn Notify>,
}

impl LoginGate {
    pub fn new(config: LoginConfig, notify: Arc<dyn Notify>) -> Self {
        Self { config, notify }
    }

    /// Validates `form`, waits the configured delay, then checks credentials.
    ///
    /// Validation failures return immediately without a notification.
    pub async fn submit(&self, form: &LoginForm) -> Result<Session, LoginError> {
        form.validate(self.config.min_password_len)?;

        if self.config.simulated_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.simulated_delay_ms)).await;
        }

        if form.user_name != self.config.username || form.password != self.config.password {
            warn!(user = %form.user_name, "login rejected");
            self.notify.notify(Notification::error(
                "Login Failed",
                "Invalid username or password",
            ));
            return Err(LoginError::InvalidCredentials);
        }

        let session = Session {
            user_name: form.user_name.clone(),
            email: self.config.email.clone(),
            role: self.config.role.clone(),
            token: format!("mock-jwt-token-{}", Utc::now().timestamp_millis()),
        };
        info!(user = %session.user_name, "login accepted");
        self.notify.notify(Notification::success(
            "Login Successful",
            format!("Welcome {}!", session.user_name),
        ));
        Ok(session)
    }
}
