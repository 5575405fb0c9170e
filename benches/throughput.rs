use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use bookdesk::{
    api::{RawBooking, RawCode, RawId},
    engine::{booking::BookingSortKey, evaluate::evaluate, query::QueryState},
    normalize::normalize_booking_at,
    record::BookingRecord,
};

fn raw(i: u64) -> RawBooking {
    RawBooking {
        id: RawId::Int(i as i64),
        customer_name: Some(format!("Guest {i}")),
        customer_email: Some(format!("guest{i}@example.com")),
        status: Some(RawCode::Int((i % 4 + 1) as i64)),
        amount: Some((i % 500) as f64 + 0.5),
        payment_status: Some(RawCode::Text(((i % 3) + 1).to_string())),
        appointment_date: Some(format!("2024-{:02}-{:02}T12:00:00Z", i % 12 + 1, i % 28 + 1)),
        notes: (i % 7 == 0).then(|| format!("note {i}")),
    }
}

fn bookings(n: u64) -> Vec<BookingRecord> {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    (0..n).map(|i| normalize_booking_at(raw(i), now)).collect()
}

fn bench_normalize(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    c.bench_function("normalize_50k", |b| {
        b.iter(|| {
            for i in 0..50_000u64 {
                let _ = normalize_booking_at(raw(i), now);
            }
        });
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let records = bookings(50_000);
    let mut group = c.benchmark_group("evaluate_50k");

    let default_state = QueryState::<BookingRecord>::new(10);
    group.bench_function(BenchmarkId::new("default_sort", 50_000), |b| {
        b.iter(|| evaluate(&records, &default_state));
    });

    let mut by_name = QueryState::<BookingRecord>::new(10);
    by_name.sort_by(BookingSortKey::CustomerName);
    group.bench_function(BenchmarkId::new("text_sort", 50_000), |b| {
        b.iter(|| evaluate(&records, &by_name));
    });

    let mut searched = QueryState::<BookingRecord>::new(10);
    searched.search = "guest 12".to_string();
    searched.date_from =
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap() + Duration::days(1));
    group.bench_function(BenchmarkId::new("search_and_bound", 50_000), |b| {
        b.iter(|| evaluate(&records, &searched));
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_evaluate);
criterion_main!(benches);
