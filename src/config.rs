//! Console configuration, loadable from TOML.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::api::Resource;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("page_size must be at least 1 for the {0} view")]
    ZeroPageSize(&'static str),
}

/// Per-view list settings.
///
/// Inside [`ConsoleConfig`] a partial table is completed from that view's own
/// preset, not from [`ViewConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Rows per page.
    pub page_size: usize,
    /// Jump back to page 1 whenever the search term changes or a record is
    /// deleted.
    pub reset_page_on_search: bool,
}

impl ViewConfig {
    /// Booking view: 10 rows, page kept across searches.
    pub fn bookings() -> Self {
        Self {
            page_size: 10,
            reset_page_on_search: false,
        }
    }

    /// Customer view: 5 rows, search returns to page 1.
    pub fn customers() -> Self {
        Self {
            page_size: 5,
            reset_page_on_search: true,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::bookings()
    }
}

/// View table as written in TOML; unset keys come from a preset.
#[derive(Deserialize)]
struct ViewOverrides {
    page_size: Option<usize>,
    reset_page_on_search: Option<bool>,
}

impl ViewOverrides {
    fn over(self, preset: ViewConfig) -> ViewConfig {
        ViewConfig {
            page_size: self.page_size.unwrap_or(preset.page_size),
            reset_page_on_search: self
                .reset_page_on_search
                .unwrap_or(preset.reset_page_on_search),
        }
    }
}

fn bookings_view<'de, D: Deserializer<'de>>(de: D) -> Result<ViewConfig, D::Error> {
    ViewOverrides::deserialize(de).map(|o| o.over(ViewConfig::bookings()))
}

fn customers_view<'de, D: Deserializer<'de>>(de: D) -> Result<ViewConfig, D::Error> {
    ViewOverrides::deserialize(de).map(|o| o.over(ViewConfig::customers()))
}

/// Channel bounds of the per-view driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Bound of the command queue.
    pub command_queue_bound: usize,
    /// Capacity of the broadcast event channel.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_capacity: 1024,
        }
    }
}

/// Hardcoded login gate settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    /// Accepted user name.
    pub username: String,
    /// Accepted password.
    pub password: String,
    /// Minimum password length accepted by form validation.
    pub min_password_len: usize,
    /// Email placed on the local session.
    pub email: String,
    /// Role placed on the local session.
    pub role: String,
    /// Artificial delay before the credential check.
    pub simulated_delay_ms: u64,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            min_password_len: 4,
            email: "admin@restaurant.com".to_string(),
            role: "admin".to_string(),
            simulated_delay_ms: 1000,
        }
    }
}

/// Top-level console configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Base URL of the admin API.
    pub api_base_url: String,
    /// Booking view settings.
    #[serde(deserialize_with = "bookings_view")]
    pub bookings: ViewConfig,
    /// Customer view settings.
    #[serde(deserialize_with = "customers_view")]
    pub customers: ViewConfig,
    /// Driver channel bounds.
    pub runtime: RuntimeConfig,
    /// Login gate.
    pub login: LoginConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://localhost:7239/api".to_string(),
            bookings: ViewConfig::bookings(),
            customers: ViewConfig::customers(),
            runtime: RuntimeConfig::default(),
            login: LoginConfig::default(),
        }
    }
}

impl ConsoleConfig {
    /// Parses TOML, filling unset keys from the defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects settings the views cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bookings.page_size == 0 {
            return Err(ConfigError::ZeroPageSize("bookings"));
        }
        if self.customers.page_size == 0 {
            return Err(ConfigError::ZeroPageSize("customers"));
        }
        Ok(())
    }

    /// Full URL of `resource`.
    pub fn endpoint(&self, resource: Resource) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), resource.path())
    }
}
