//! Shared primitive IDs and booking-related enums.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Booking identifier, rendered from the API's numeric id.
pub type BookingId = String;
/// Customer identifier.
pub type CustomerId = i64;

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Appointment confirmed.
    Confirmed,
    /// Awaiting confirmation. Also the fallback for unmapped codes.
    Pending,
    /// Appointment cancelled.
    Cancelled,
    /// Appointment took place.
    Completed,
}

impl BookingStatus {
    /// Lowercase label used for display, sorting and export.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Amount collected.
    Paid,
    /// Awaiting payment. Also the fallback for unmapped codes.
    Pending,
    /// Amount returned to the customer.
    Refunded,
}

impl PaymentStatus {
    /// Lowercase label used for display, sorting and export.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction of a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}
