use std::collections::BTreeMap;

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use bookdesk::{
    core::sort::compare_values,
    engine::{
        booking::{BookingFilters, BookingSortKey},
        evaluate::evaluate,
        query::QueryState,
        traits::ListEntity,
    },
    record::BookingRecord,
    types::{BookingStatus, PaymentStatus},
};

const NAMES: [&str; 6] = ["ann", "Ann", "bob", "Cy", "dee", "Eve"];
const STATUSES: [BookingStatus; 4] = [
    BookingStatus::Confirmed,
    BookingStatus::Pending,
    BookingStatus::Cancelled,
    BookingStatus::Completed,
];
const PAYMENTS: [PaymentStatus; 3] = [
    PaymentStatus::Paid,
    PaymentStatus::Pending,
    PaymentStatus::Refunded,
];
const KEYS: [BookingSortKey; 8] = [
    BookingSortKey::Id,
    BookingSortKey::CustomerName,
    BookingSortKey::CustomerEmail,
    BookingSortKey::AppointmentDate,
    BookingSortKey::Status,
    BookingSortKey::Amount,
    BookingSortKey::PaymentStatus,
    BookingSortKey::Notes,
];

fn record_strategy() -> impl Strategy<Value = (u8, u8, u8, u8, u16, Option<u8>)> {
    (
        0u8..6,
        0u8..4,
        0u8..3,
        0u8..30,
        0u16..500,
        proptest::option::of(0u8..6),
    )
}

fn build(rows: Vec<(u8, u8, u8, u8, u16, Option<u8>)>) -> Vec<BookingRecord> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    rows.into_iter()
        .enumerate()
        .map(|(i, (name, status, payment, day, amount, note))| {
            let name = NAMES[usize::from(name)];
            BookingRecord {
                id: i.to_string(),
                customer_name: name.to_string(),
                customer_email: format!("{}@example.com", name.to_lowercase()),
                appointment_date: base + Duration::days(i64::from(day)),
                appointment_placeholder: false,
                status: STATUSES[usize::from(status)],
                payment_status: PAYMENTS[usize::from(payment)],
                amount: f64::from(amount),
                notes: note.map(|n| NAMES[usize::from(n)].to_string()),
            }
        })
        .collect()
}

fn ids(records: &[BookingRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

proptest! {
    #[test]
    fn unfiltered_view_keeps_every_record_in_input_order(
        rows in prop::collection::vec(record_strategy(), 0..60),
        key in 0usize..8,
    ) {
        let records = build(rows);
        let mut state = QueryState::<BookingRecord>::new(10);
        state.sort_by(KEYS[key]);
        prop_assert!(state.is_unfiltered());

        let view = evaluate(&records, &state);
        prop_assert_eq!(ids(&view.filtered), ids(&records));
        prop_assert_eq!(view.stats.total_bookings, records.len());
    }

    #[test]
    fn sort_is_a_stable_permutation_of_the_filtered_rows(
        rows in prop::collection::vec(record_strategy(), 0..60),
        key in 0usize..8,
        flip in any::<bool>(),
        status in proptest::option::of(0u8..4),
    ) {
        let records = build(rows);
        let mut state = QueryState::<BookingRecord>::new(10);
        state.sort_by(KEYS[key]);
        if flip {
            state.sort_by(KEYS[key]);
        }
        state.filters = BookingFilters {
            status: status.map(|s| STATUSES[usize::from(s)]),
            payment_status: None,
        };

        let view = evaluate(&records, &state);

        let mut sorted_ids = ids(&view.sorted);
        let mut filtered_ids = ids(&view.filtered);
        sorted_ids.sort();
        filtered_ids.sort();
        prop_assert_eq!(sorted_ids, filtered_ids);

        // Equal keys keep their input order: ids were assigned ascending.
        let position: BTreeMap<String, usize> = ids(&records)
            .into_iter()
            .enumerate()
            .map(|(i, id)| (id, i))
            .collect();
        for pair in view.sorted.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let (ka, kb) = (a.sort_value(KEYS[key]), b.sort_value(KEYS[key]));
            let tie = compare_values(&ka, &kb, state.sort.direction).is_eq();
            if tie {
                prop_assert!(position[&a.id] < position[&b.id]);
            }
        }
    }

    #[test]
    fn evaluation_is_idempotent(
        rows in prop::collection::vec(record_strategy(), 0..40),
        needle in "[a-e]{0,2}",
        page in 0usize..10,
    ) {
        let records = build(rows);
        let mut state = QueryState::<BookingRecord>::new(4);
        state.search = needle;
        state.page = page;

        let first = evaluate(&records, &state);
        let second = evaluate(&records, &state);
        prop_assert_eq!(&first, &second);

        // Re-evaluating the filtered rows with search and filters cleared
        // reproduces the same ordering.
        let cleared = state.without_filters();
        prop_assert!(cleared.is_unfiltered());
        let again = evaluate(&first.filtered, &cleared);
        prop_assert_eq!(ids(&again.sorted), ids(&first.sorted));
    }

    #[test]
    fn current_page_is_always_in_range(
        rows in prop::collection::vec(record_strategy(), 0..80),
        page_size in 1usize..12,
        page in 0usize..100,
    ) {
        let records = build(rows);
        let mut state = QueryState::<BookingRecord>::new(page_size);
        state.page = page;

        let view = evaluate(&records, &state);
        let p = view.pagination;
        prop_assert!(p.total_pages >= 1);
        prop_assert!(p.page >= 1 && p.page <= p.total_pages);
        prop_assert_eq!(p.total_pages, records.len().div_ceil(page_size).max(1));
        prop_assert!(view.page_items().len() <= page_size);

        let window = view.page_window();
        prop_assert!(window.len() <= 5);
        prop_assert!(window.contains(&p.page));
        prop_assert_eq!(window.len(), p.total_pages.min(5));
    }
}
