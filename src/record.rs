//! Canonical booking and customer records plus their sparse patches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{BookingId, BookingStatus, CustomerId, PaymentStatus};

/// Normalized booking, independent of the API's code representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Stable booking identifier.
    pub id: BookingId,
    /// Customer display name.
    pub customer_name: String,
    /// Customer contact email.
    pub customer_email: String,
    /// Appointment instant.
    pub appointment_date: DateTime<Utc>,
    /// True when `appointment_date` is a load-time placeholder rather than
    /// a value from the source. Placeholders are fit for display only.
    pub appointment_placeholder: bool,
    /// Booking lifecycle status.
    pub status: BookingStatus,
    /// Payment status.
    pub payment_status: PaymentStatus,
    /// Booking amount, never negative.
    pub amount: f64,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Normalized customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Unique customer identifier.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
}

/// Sparse patch where each `Some` field overwrites the booking value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookingPatch {
    /// Optional replacement for status.
    pub status: Option<BookingStatus>,
    /// Optional replacement for payment status.
    pub payment_status: Option<PaymentStatus>,
    /// Optional replacement for notes. `Some(None)` clears them.
    pub notes: Option<Option<String>>,
}

impl BookingPatch {
    /// Patch that only changes the status.
    pub fn status(status: BookingStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Returns true when no fields are set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies this patch in place to `rec`.
    pub fn apply_to(&self, rec: &mut BookingRecord) {
        if let Some(v) = self.status {
            rec.status = v;
        }
        if let Some(v) = self.payment_status {
            rec.payment_status = v;
        }
        if let Some(v) = &self.notes {
            rec.notes = v.clone();
        }
    }
}

/// Sparse patch where each `Some` field overwrites the customer value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerPatch {
    /// Optional replacement for name.
    pub name: Option<String>,
    /// Optional replacement for email.
    pub email: Option<String>,
    /// Optional replacement for phone.
    pub phone: Option<String>,
}

impl CustomerPatch {
    /// Returns true when no fields are set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies this patch in place to `rec`.
    pub fn apply_to(&self, rec: &mut CustomerRecord) {
        if let Some(v) = &self.name {
            rec.name = v.clone();
        }
        if let Some(v) = &self.email {
            rec.email = v.clone();
        }
        if let Some(v) = &self.phone {
            rec.phone = v.clone();
        }
    }
}
