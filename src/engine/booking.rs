use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    api::RawBooking,
    core::{sort::SortValue, store::Keyed},
    export::{ColumnSpec, columns},
    normalize::normalize_booking_at,
    record::{BookingPatch, BookingRecord},
    types::{BookingId, BookingStatus, PaymentStatus},
};

use super::{query::SortSpec, traits::ListEntity};

/// Sortable booking columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingSortKey {
    /// Booking id, compared as text.
    Id,
    /// Customer name.
    CustomerName,
    /// Customer email.
    CustomerEmail,
    /// Appointment instant.
    AppointmentDate,
    /// Status label.
    Status,
    /// Amount.
    Amount,
    /// Payment status label.
    PaymentStatus,
    /// Notes; unset on most bookings.
    Notes,
}

/// Categorical booking filters; `None` passes everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookingFilters {
    /// Exact status match.
    pub status: Option<BookingStatus>,
    /// Exact payment status match.
    pub payment_status: Option<PaymentStatus>,
}

/// Summary cards of the booking view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookingStats {
    /// Filtered booking count.
    pub total_bookings: usize,
    /// Sum of amounts over paid bookings.
    pub total_revenue: f64,
    /// Bookings with status pending.
    pub pending_bookings: usize,
    /// Bookings with status completed.
    pub completed_bookings: usize,
    /// Bookings whose payment is still pending.
    pub pending_payments: usize,
}

impl Keyed for BookingRecord {
    type Id = BookingId;

    fn id(&self) -> &BookingId {
        &self.id
    }
}

impl ListEntity for BookingRecord {
    type Raw = RawBooking;
    type SortKey = BookingSortKey;
    type Filters = BookingFilters;
    type Patch = BookingPatch;
    type Stats = BookingStats;

    const NOUN: &'static str = "booking";
    const EXPORT_FILE_NAME: &'static str = "booking-history.csv";

    fn normalize(raw: RawBooking, now: DateTime<Utc>) -> Self {
        normalize_booking_at(raw, now)
    }

    fn default_sort() -> SortSpec<BookingSortKey> {
        SortSpec::desc(BookingSortKey::AppointmentDate)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.customer_name.as_str(), self.customer_email.as_str()]
    }

    fn matches_filters(&self, filters: &BookingFilters) -> bool {
        filters.status.is_none_or(|s| s == self.status)
            && filters.payment_status.is_none_or(|p| p == self.payment_status)
    }

    fn relevant_date(&self) -> Option<DateTime<Utc>> {
        Some(self.appointment_date)
    }

    fn sort_value(&self, key: BookingSortKey) -> SortValue<'_> {
        match key {
            BookingSortKey::Id => SortValue::Text(&self.id),
            BookingSortKey::CustomerName => SortValue::Text(&self.customer_name),
            BookingSortKey::CustomerEmail => SortValue::Text(&self.customer_email),
            BookingSortKey::AppointmentDate => SortValue::Date(self.appointment_date),
            BookingSortKey::Status => SortValue::Text(self.status.as_str()),
            BookingSortKey::Amount => SortValue::Number(self.amount),
            BookingSortKey::PaymentStatus => SortValue::Text(self.payment_status.as_str()),
            BookingSortKey::Notes => self
                .notes
                .as_deref()
                .map_or(SortValue::Missing, SortValue::Text),
        }
    }

    fn apply_patch(&mut self, patch: &BookingPatch) {
        patch.apply_to(self);
    }

    fn aggregate(filtered: &[Self]) -> BookingStats {
        filtered.iter().fold(
            BookingStats {
                total_bookings: filtered.len(),
                ..BookingStats::default()
            },
            |mut acc, b| {
                if b.payment_status == PaymentStatus::Paid {
                    acc.total_revenue += b.amount;
                }
                if b.payment_status == PaymentStatus::Pending {
                    acc.pending_payments += 1;
                }
                match b.status {
                    BookingStatus::Pending => acc.pending_bookings += 1,
                    BookingStatus::Completed => acc.completed_bookings += 1,
                    _ => {}
                }
                acc
            },
        )
    }

    fn export_columns() -> Vec<ColumnSpec<Self>> {
        columns::booking_columns()
    }
}
