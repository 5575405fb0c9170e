use std::sync::Arc;

use crate::{
    api::{RawBooking, RawCustomer},
    config::ConsoleConfig,
    engine::booking::BookingFilters,
    gateway::RecordSource,
    record::{BookingPatch, BookingRecord, CustomerRecord},
    types::{BookingId, BookingStatus, PaymentStatus},
};

use super::{
    interact::{Confirm, Notify},
    list::{ControllerResult, ListController},
};

/// Booking history page.
pub type BookingView = ListController<BookingRecord>;
/// Customer directory page.
pub type CustomerView = ListController<CustomerRecord>;

impl ListController<BookingRecord> {
    /// Booking view wired with the configured page settings.
    pub fn bookings(
        source: Arc<dyn RecordSource<RawBooking>>,
        confirm: Arc<dyn Confirm>,
        notify: Arc<dyn Notify>,
        config: &ConsoleConfig,
    ) -> Self {
        Self::new(source, confirm, notify, config.bookings)
    }

    /// Sets the booking status locally.
    ///
    /// Nothing is sent to the gateway; the change lasts until the next load.
    pub fn update_status(&mut self, id: &BookingId, status: BookingStatus) -> ControllerResult<()> {
        self.update(id, &BookingPatch::status(status))
    }

    /// Status dropdown; `None` shows every status.
    pub fn set_status_filter(&mut self, status: Option<BookingStatus>) {
        let filters = BookingFilters {
            status,
            ..self.query().filters
        };
        self.set_filters(filters);
    }

    /// Payment dropdown; `None` shows every payment status.
    pub fn set_payment_filter(&mut self, payment_status: Option<PaymentStatus>) {
        let filters = BookingFilters {
            payment_status,
            ..self.query().filters
        };
        self.set_filters(filters);
    }
}

impl ListController<CustomerRecord> {
    /// Customer view wired with the configured page settings.
    pub fn customers(
        source: Arc<dyn RecordSource<RawCustomer>>,
        confirm: Arc<dyn Confirm>,
        notify: Arc<dyn Notify>,
        config: &ConsoleConfig,
    ) -> Self {
        Self::new(source, confirm, notify, config.customers)
    }
}
