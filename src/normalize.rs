//! Maps raw API payloads into canonical records.
//!
//! Every function here is total: unmapped codes fall back to `pending`, a
//! missing or unreadable appointment date falls back to the load instant,
//! and a negative amount becomes zero.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::{
    api::{RawBooking, RawCode, RawCustomer},
    record::{BookingRecord, CustomerRecord},
    types::{BookingStatus, PaymentStatus},
};

/// Booking status for a raw code: `1→completed, 2→pending, 3→confirmed,
/// 4→cancelled`, anything else pending.
pub fn booking_status(code: Option<&RawCode>) -> BookingStatus {
    match code.and_then(RawCode::as_int) {
        Some(1) => BookingStatus::Completed,
        Some(2) => BookingStatus::Pending,
        Some(3) => BookingStatus::Confirmed,
        Some(4) => BookingStatus::Cancelled,
        _ => {
            debug!(?code, "unmapped booking status code, using pending");
            BookingStatus::Pending
        }
    }
}

/// Payment status for a raw code: `1→paid, 2→pending, 3→refunded`,
/// anything else pending.
pub fn payment_status(code: Option<&RawCode>) -> PaymentStatus {
    match code.and_then(RawCode::as_int) {
        Some(1) => PaymentStatus::Paid,
        Some(2) => PaymentStatus::Pending,
        Some(3) => PaymentStatus::Refunded,
        _ => {
            debug!(?code, "unmapped payment status code, using pending");
            PaymentStatus::Pending
        }
    }
}

/// Parses the date shapes the API is known to send.
///
/// Accepts RFC 3339, zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) and
/// a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Normalizes a booking using the current instant as the date fallback.
///
/// The fallback makes the result non-deterministic; use
/// [`normalize_booking_at`] where repeatability matters.
pub fn normalize_booking(raw: RawBooking) -> BookingRecord {
    normalize_booking_at(raw, Utc::now())
}

/// Normalizes a booking, substituting `now` for a missing or unreadable date.
pub fn normalize_booking_at(raw: RawBooking, now: DateTime<Utc>) -> BookingRecord {
    let parsed = raw.appointment_date.as_deref().and_then(parse_date);
    if parsed.is_none() {
        debug!(
            id = %raw.id.render(),
            source = ?raw.appointment_date,
            "appointment date missing or unreadable, using load instant"
        );
    }

    BookingRecord {
        id: raw.id.render(),
        customer_name: raw.customer_name.unwrap_or_default(),
        customer_email: raw.customer_email.unwrap_or_default(),
        appointment_date: parsed.unwrap_or(now),
        appointment_placeholder: parsed.is_none(),
        status: booking_status(raw.status.as_ref()),
        payment_status: payment_status(raw.payment_status.as_ref()),
        amount: sanitize_amount(raw.amount),
        notes: raw.notes.filter(|n| !n.is_empty()),
    }
}

/// Normalizes a customer; missing strings become empty.
pub fn normalize_customer(raw: RawCustomer) -> CustomerRecord {
    CustomerRecord {
        id: raw.id,
        name: raw.name.unwrap_or_default(),
        email: raw.email.unwrap_or_default(),
        phone: raw.phone_number.unwrap_or_default(),
    }
}

fn sanitize_amount(amount: Option<f64>) -> f64 {
    match amount {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}
