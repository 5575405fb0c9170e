//! Wire payloads exchanged with the remote admin API.

use serde::{Deserialize, Serialize};

use crate::gateway::{GatewayError, GatewayResult};

/// Remote resource served by the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// `GET /Bookings`.
    Bookings,
    /// `GET /Customer`.
    Customers,
    /// `GET /Analytics`.
    Analytics,
    /// `POST /Login`.
    Login,
}

impl Resource {
    /// Path relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Bookings => "/Bookings",
            Self::Customers => "/Customer",
            Self::Analytics => "/Analytics",
            Self::Login => "/Login",
        }
    }

    /// Message used when a failed envelope carries none.
    pub fn fallback_failure(self) -> &'static str {
        match self {
            Self::Bookings | Self::Analytics => "Failed to fetch Bookings",
            Self::Customers => "Failed to fetch customers",
            Self::Login => "Login failed",
        }
    }
}

/// `{ data, isSuccess, statusCode, message }` wrapper around list payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Payload; may be absent on failure.
    #[serde(default)]
    pub data: Option<T>,
    /// Server-side success flag.
    pub is_success: bool,
    /// HTTP-like status code echoed by the server.
    #[serde(default)]
    pub status_code: u16,
    /// Human-readable server message.
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful envelope around `data`.
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            is_success: true,
            status_code: 200,
            message: None,
        }
    }

    /// Failed envelope carrying `message`.
    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            data: None,
            is_success: false,
            status_code,
            message: Some(message.into()),
        }
    }
}

impl<T: Default> Envelope<T> {
    /// Unwraps the payload, turning a non-success envelope into an error.
    ///
    /// A successful envelope without data yields an empty payload.
    pub fn into_data(self, resource: Resource) -> GatewayResult<T> {
        if self.is_success {
            return Ok(self.data.unwrap_or_default());
        }
        let message = self
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| resource.fallback_failure().to_string());
        Err(GatewayError::Rejected {
            resource,
            status_code: self.status_code,
            message,
        })
    }
}

/// Status code as the API sends it: number or string, interchangeably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCode {
    /// Integer code.
    Int(i64),
    /// Non-integer JSON number.
    Float(f64),
    /// Textual code.
    Text(String),
    /// Any other JSON shape.
    Other(serde_json::Value),
}

impl RawCode {
    /// Integer value of the code, if it has a canonical one.
    ///
    /// Text only counts when it is the plain decimal spelling (`"3"`, not
    /// `"03"` or `" 3"`).
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            Self::Text(s) => s.parse::<i64>().ok().filter(|n| n.to_string() == *s),
            _ => None,
        }
    }
}

impl From<i64> for RawCode {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for RawCode {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Identifier as the API sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Integer id.
    Int(i64),
    /// Non-integer JSON number.
    Float(f64),
    /// Textual id.
    Text(String),
}

impl RawId {
    /// Display form used as the canonical booking id.
    pub fn render(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 => (*f as i64).to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl Default for RawId {
    fn default() -> Self {
        Self::Int(0)
    }
}

/// Booking exactly as `GET /Bookings` returns it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawBooking {
    /// Source id.
    pub id: RawId,
    /// Customer name.
    pub customer_name: Option<String>,
    /// Customer email.
    pub customer_email: Option<String>,
    /// Status code (`1..=4`).
    pub status: Option<RawCode>,
    /// Amount.
    pub amount: Option<f64>,
    /// Payment code (`1..=3`).
    pub payment_status: Option<RawCode>,
    /// Appointment date text.
    pub appointment_date: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Customer exactly as `GET /Customer` returns it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCustomer {
    /// Source id.
    pub id: i64,
    /// Name.
    pub name: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
}

/// Daily analytics row from `GET /Analytics`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    /// Row id.
    pub id: i64,
    /// Revenue for the day.
    pub total_revenue: f64,
    /// Bookings for the day.
    pub total_bookings: u64,
    /// Day as sent by the server.
    pub date: String,
}

/// `POST /Login` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// User name.
    pub name: String,
    /// Password.
    pub password: String,
}

/// `POST /Login` response; not wrapped in an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// User id.
    pub id: i64,
    /// User name.
    pub name: String,
    /// Echoed password.
    pub password: String,
    /// Bearer token.
    pub token: String,
}
