//! List engine and view controllers for a bookings/customers admin console.
//!
//! # Examples
//!
//! Pure evaluation with [`engine::evaluate::evaluate`]:
//! ```
//! use bookdesk::{
//!     api::{RawBooking, RawCode, RawId},
//!     engine::{booking::BookingSortKey, evaluate::evaluate, query::QueryState},
//!     normalize::normalize_booking,
//!     record::BookingRecord,
//! };
//!
//! let records = vec![normalize_booking(RawBooking {
//!     id: RawId::Int(1),
//!     customer_name: Some("Ada Lovelace".to_string()),
//!     customer_email: Some("ada@example.com".to_string()),
//!     status: Some(RawCode::Int(3)),
//!     amount: Some(40.0),
//!     payment_status: Some(RawCode::Text("1".to_string())),
//!     appointment_date: Some("2024-05-01T10:00:00Z".to_string()),
//!     notes: None,
//! })];
//!
//! let mut state = QueryState::<BookingRecord>::new(10);
//! state.search = "ADA".to_string();
//! state.sort_by(BookingSortKey::Amount);
//! let view = evaluate(&records, &state);
//! assert_eq!(view.page_items().len(), 1);
//! assert_eq!(view.stats.total_revenue, 40.0);
//! ```
//!
//! Driving a view on its own task:
//! ```no_run
//! use std::sync::Arc;
//!
//! use bookdesk::{
//!     api::Resource,
//!     config::ConsoleConfig,
//!     controller::{
//!         interact::{AutoConfirm, SilentNotifier},
//!         views::CustomerView,
//!     },
//!     gateway::fixture::StaticGateway,
//!     runtime::{events::ViewEvent, handle::spawn_view},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = ConsoleConfig::default();
//! let gateway = StaticGateway::new().with_body(
//!     Resource::Customers,
//!     r#"{"data":[{"id":1,"name":"Ann","email":"ann@x.io","phoneNumber":"555"}],"isSuccess":true,"statusCode":200,"message":""}"#,
//! );
//! let view = CustomerView::customers(
//!     Arc::new(gateway),
//!     Arc::new(AutoConfirm(true)),
//!     Arc::new(SilentNotifier),
//!     &config,
//! );
//! let handle = spawn_view(view, config.runtime);
//! let mut events = handle.subscribe();
//! handle.activate().await.expect("activate");
//! while let Ok(event) = events.recv().await {
//!     if matches!(event, ViewEvent::Loaded { .. }) {
//!         break;
//!     }
//! }
//! handle.search("ann").await.expect("search");
//! handle.teardown().await.expect("teardown");
//! # }
//! ```
#![warn(missing_docs)]

/// Dashboard KPIs over analytics rows.
pub mod analytics;
/// Wire payloads of the admin API.
pub mod api;
/// Hardcoded-credential login gate.
pub mod auth;
/// Configuration loading and defaults.
pub mod config;
/// View controllers and their collaborator capabilities.
pub mod controller;
/// Collection, sort and paging primitives.
pub mod core;
/// List query engine.
pub mod engine;
/// CSV export.
pub mod export;
/// Gateway traits and the canned gateway.
pub mod gateway;
/// Raw payload to canonical record mapping.
pub mod normalize;
/// Canonical records and patches.
pub mod record;
/// Single-writer view driver and events.
pub mod runtime;
/// Shared primitive types and enums.
pub mod types;
