use crate::record::{BookingRecord, CustomerRecord};

use super::ColumnSpec;

/// `ID,Customer Name,Email,Appointment Date,Status,Amount,Payment Status`.
pub fn booking_columns() -> Vec<ColumnSpec<BookingRecord>> {
    vec![
        ColumnSpec::plain("ID", |b: &BookingRecord| b.id.clone()),
        ColumnSpec::quoted("Customer Name", |b: &BookingRecord| b.customer_name.clone()),
        ColumnSpec::plain("Email", |b: &BookingRecord| b.customer_email.clone()),
        ColumnSpec::plain("Appointment Date", |b: &BookingRecord| {
            b.appointment_date.format("%-m/%-d/%Y").to_string()
        }),
        ColumnSpec::plain("Status", |b: &BookingRecord| b.status.to_string()),
        ColumnSpec::plain("Amount", |b: &BookingRecord| b.amount.to_string()),
        ColumnSpec::plain("Payment Status", |b: &BookingRecord| b.payment_status.to_string()),
    ]
}

/// `ID,Name,Email,Phone`, text columns always quoted.
pub fn customer_columns() -> Vec<ColumnSpec<CustomerRecord>> {
    vec![
        ColumnSpec::plain("ID", |c: &CustomerRecord| c.id.to_string()),
        ColumnSpec::quoted("Name", |c: &CustomerRecord| c.name.clone()),
        ColumnSpec::quoted("Email", |c: &CustomerRecord| c.email.clone()),
        ColumnSpec::quoted("Phone", |c: &CustomerRecord| c.phone.clone()),
    ]
}
