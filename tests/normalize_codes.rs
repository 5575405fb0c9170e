use chrono::{TimeZone, Utc};

use bookdesk::{
    api::{RawBooking, RawCode, RawCustomer, RawId},
    normalize::{
        booking_status, normalize_booking_at, normalize_customer, parse_date, payment_status,
    },
    types::{BookingStatus, PaymentStatus},
};

#[test]
fn string_and_numeric_status_codes_map_identically() {
    let cases = [
        (1, BookingStatus::Completed),
        (2, BookingStatus::Pending),
        (3, BookingStatus::Confirmed),
        (4, BookingStatus::Cancelled),
    ];
    for (code, expected) in cases {
        assert_eq!(booking_status(Some(&RawCode::Int(code))), expected);
        assert_eq!(booking_status(Some(&RawCode::Text(code.to_string()))), expected);
    }
}

#[test]
fn unmapped_status_codes_fall_back_to_pending() {
    for code in [
        RawCode::Int(0),
        RawCode::Int(5),
        RawCode::Text("confirmed".to_string()),
        RawCode::Text("03".to_string()),
        RawCode::Text(" 3".to_string()),
        RawCode::Other(serde_json::json!(true)),
    ] {
        assert_eq!(booking_status(Some(&code)), BookingStatus::Pending, "{code:?}");
    }
    assert_eq!(booking_status(None), BookingStatus::Pending);
}

#[test]
fn payment_codes_map_with_pending_fallback() {
    assert_eq!(payment_status(Some(&RawCode::Int(1))), PaymentStatus::Paid);
    assert_eq!(payment_status(Some(&RawCode::Text("2".into()))), PaymentStatus::Pending);
    assert_eq!(payment_status(Some(&RawCode::Text("3".into()))), PaymentStatus::Refunded);
    assert_eq!(payment_status(Some(&RawCode::Int(4))), PaymentStatus::Pending);
    assert_eq!(payment_status(None), PaymentStatus::Pending);
}

#[test]
fn whole_float_codes_count_as_integers() {
    assert_eq!(booking_status(Some(&RawCode::Float(3.0))), BookingStatus::Confirmed);
    assert_eq!(booking_status(Some(&RawCode::Float(3.5))), BookingStatus::Pending);
}

#[test]
fn codes_deserialize_from_either_json_shape() {
    let raw: RawBooking = serde_json::from_str(
        r#"{"id":7,"customerName":"Bo","customerEmail":"bo@x.io","status":"4","amount":12.5,"paymentStatus":3,"appointmentDate":null}"#,
    )
    .expect("decode");
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let rec = normalize_booking_at(raw, now);

    assert_eq!(rec.id, "7");
    assert_eq!(rec.status, BookingStatus::Cancelled);
    assert_eq!(rec.payment_status, PaymentStatus::Refunded);
    assert_eq!(rec.amount, 12.5);
}

#[test]
fn missing_or_garbage_date_uses_the_load_instant() {
    let now = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();

    let missing = normalize_booking_at(RawBooking::default(), now);
    assert_eq!(missing.appointment_date, now);
    assert!(missing.appointment_placeholder);

    let garbage = normalize_booking_at(
        RawBooking {
            appointment_date: Some("not a date".to_string()),
            ..RawBooking::default()
        },
        now,
    );
    assert_eq!(garbage.appointment_date, now);
    assert!(garbage.appointment_placeholder);
}

#[test]
fn known_date_shapes_parse() {
    let expected = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
    assert_eq!(parse_date("2024-06-01T09:30:00Z"), Some(expected));
    assert_eq!(parse_date("2024-06-01T11:30:00+02:00"), Some(expected));
    assert_eq!(parse_date("2024-06-01T09:30:00"), Some(expected));
    assert_eq!(parse_date("2024-06-01T09:30:00.000"), Some(expected));
    assert_eq!(
        parse_date("2024-06-01"),
        Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(parse_date(""), None);
}

#[test]
fn negative_amounts_are_floored_at_zero() {
    let now = Utc::now();
    let rec = normalize_booking_at(
        RawBooking {
            id: RawId::Int(1),
            amount: Some(-20.0),
            ..RawBooking::default()
        },
        now,
    );
    assert_eq!(rec.amount, 0.0);

    let nan = normalize_booking_at(
        RawBooking {
            amount: Some(f64::NAN),
            ..RawBooking::default()
        },
        now,
    );
    assert_eq!(nan.amount, 0.0);
}

#[test]
fn customer_phone_number_becomes_phone_and_nulls_become_empty() {
    let raw: RawCustomer =
        serde_json::from_str(r#"{"id":3,"name":"Cy","email":null,"phoneNumber":"555-0101"}"#)
            .expect("decode");
    let rec = normalize_customer(raw);

    assert_eq!(rec.id, 3);
    assert_eq!(rec.name, "Cy");
    assert_eq!(rec.email, "");
    assert_eq!(rec.phone, "555-0101");
}
