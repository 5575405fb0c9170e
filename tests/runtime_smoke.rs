use std::{sync::Arc, time::Duration};

use bookdesk::{
    api::{RawBooking, RawCode, RawId, Resource},
    config::{ConsoleConfig, RuntimeConfig},
    controller::{
        interact::{AutoConfirm, SilentNotifier},
        list::ControllerError,
        load::LoadState,
        views::BookingView,
    },
    engine::booking::BookingSortKey,
    export::CsvDialect,
    gateway::fixture::StaticGateway,
    runtime::{
        events::ViewEvent,
        handle::{RuntimeError, ViewHandle, spawn_view},
    },
    record::BookingRecord,
    types::BookingStatus,
};
use tokio::sync::broadcast;

fn raw(id: i64, name: &str, status: i64) -> RawBooking {
    RawBooking {
        id: RawId::Int(id),
        customer_name: Some(name.to_string()),
        customer_email: Some(format!("{}@example.com", name.to_lowercase())),
        status: Some(RawCode::Int(status)),
        amount: Some(10.0 * id as f64),
        payment_status: Some(RawCode::Int(1)),
        appointment_date: Some(format!("2024-02-{id:02}")),
        notes: None,
    }
}

fn gateway(delay: Duration) -> Arc<StaticGateway> {
    let raws = vec![raw(1, "Ann", 2), raw(2, "Ben", 3), raw(3, "Cat", 2)];
    Arc::new(
        StaticGateway::new()
            .with_records(Resource::Bookings, &raws)
            .expect("encode")
            .with_delay(delay),
    )
}

fn spawn(gateway: Arc<StaticGateway>, confirm: bool) -> ViewHandle<BookingRecord> {
    let config = ConsoleConfig::default();
    let view = BookingView::bookings(
        gateway,
        Arc::new(AutoConfirm(confirm)),
        Arc::new(SilentNotifier),
        &config,
    );
    spawn_view(view, config.runtime)
}

async fn next_event(sub: &mut broadcast::Receiver<ViewEvent<String>>) -> ViewEvent<String> {
    tokio::time::timeout(Duration::from_secs(1), sub.recv())
        .await
        .expect("event")
        .expect("recv")
}

#[tokio::test]
async fn activation_and_edits_emit_ordered_events() {
    let handle = spawn(gateway(Duration::ZERO), true);
    let mut sub = handle.subscribe();

    handle.activate().await.expect("activate");
    assert_eq!(next_event(&mut sub).await, ViewEvent::LoadStarted { generation: 1 });
    assert_eq!(next_event(&mut sub).await, ViewEvent::Loaded { count: 3 });

    handle.search("n").await.expect("search");
    assert_eq!(
        next_event(&mut sub).await,
        ViewEvent::Recomputed {
            filtered: 2,
            page: 1,
            total_pages: 1
        }
    );

    handle
        .update_status("2".to_string(), BookingStatus::Completed)
        .await
        .expect("update");
    assert_eq!(next_event(&mut sub).await, ViewEvent::Updated { id: "2".to_string() });
    assert!(matches!(next_event(&mut sub).await, ViewEvent::Recomputed { .. }));

    assert!(handle.delete("1".to_string()).await.expect("delete"));
    assert_eq!(next_event(&mut sub).await, ViewEvent::Deleted { id: "1".to_string() });
    assert_eq!(
        next_event(&mut sub).await,
        ViewEvent::Recomputed {
            filtered: 1,
            page: 1,
            total_pages: 1
        }
    );

    let snap = handle.snapshot().await.expect("snapshot");
    assert_eq!(snap.load_state, LoadState::Loaded);
    assert_eq!(snap.query.search, "n");
    assert_eq!(snap.result.stats.completed_bookings, 1);

    handle.teardown().await.expect("teardown");
}

#[tokio::test]
async fn second_activation_while_loading_is_rejected() {
    let handle = spawn(gateway(Duration::from_millis(100)), true);
    let mut sub = handle.subscribe();

    handle.activate().await.expect("activate");
    let err = handle.activate().await.expect_err("duplicate");
    assert!(matches!(err, RuntimeError::Controller(ControllerError::AlreadyLoading)));

    assert_eq!(next_event(&mut sub).await, ViewEvent::LoadStarted { generation: 1 });
    assert_eq!(next_event(&mut sub).await, ViewEvent::Loaded { count: 3 });
    handle.teardown().await.expect("teardown");
}

#[tokio::test]
async fn queries_stay_responsive_while_a_fetch_is_outstanding() {
    let handle = spawn(gateway(Duration::from_millis(200)), true);
    handle.activate().await.expect("activate");

    handle.sort_by(BookingSortKey::Amount).await.expect("sort");
    let snap = handle.snapshot().await.expect("snapshot");
    assert!(snap.load_state.is_loading());
    assert!(snap.result.sorted.is_empty());
    handle.teardown().await.expect("teardown");
}

#[tokio::test]
async fn teardown_during_fetch_drops_the_result_and_stops_the_driver() {
    let gw = gateway(Duration::from_millis(150));
    let handle = spawn(gw.clone(), true);
    let mut sub = handle.subscribe();

    handle.activate().await.expect("activate");
    assert_eq!(next_event(&mut sub).await, ViewEvent::LoadStarted { generation: 1 });
    handle.teardown().await.expect("teardown");

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(gw.calls(Resource::Bookings), 1);
    assert!(matches!(
        sub.try_recv(),
        Err(broadcast::error::TryRecvError::Closed | broadcast::error::TryRecvError::Empty)
    ));
    assert!(matches!(handle.snapshot().await, Err(RuntimeError::ChannelClosed)));
    assert!(matches!(handle.search("x").await, Err(RuntimeError::ChannelClosed)));
}

#[tokio::test]
async fn failed_load_can_be_retried_through_the_handle() {
    let gw = Arc::new(StaticGateway::new().with_transport_failure(Resource::Bookings, "offline"));
    let handle = spawn(gw.clone(), true);
    let mut sub = handle.subscribe();

    handle.activate().await.expect("activate");
    assert!(matches!(next_event(&mut sub).await, ViewEvent::LoadStarted { .. }));
    assert_eq!(
        next_event(&mut sub).await,
        ViewEvent::LoadFailed {
            message: "Failed to load bookings. Please try again.".to_string()
        }
    );

    handle.retry().await.expect("retry");
    assert_eq!(next_event(&mut sub).await, ViewEvent::LoadStarted { generation: 2 });
    assert!(matches!(next_event(&mut sub).await, ViewEvent::LoadFailed { .. }));
    assert_eq!(gw.calls(Resource::Bookings), 2);
    handle.teardown().await.expect("teardown");
}

#[tokio::test]
async fn detail_modal_and_export_through_the_handle() {
    let handle = spawn(gateway(Duration::ZERO), false);
    let mut sub = handle.subscribe();
    handle.activate().await.expect("activate");
    next_event(&mut sub).await;
    next_event(&mut sub).await;

    let rec = handle.open_details("2".to_string()).await.expect("open");
    assert_eq!(rec.customer_name, "Ben");
    assert!(handle.snapshot().await.expect("snapshot").selected.is_some());

    assert!(!handle.delete("2".to_string()).await.expect("declined"));
    handle.close_details().await.expect("close");
    assert!(handle.snapshot().await.expect("snapshot").selected.is_none());

    assert!(matches!(
        handle.open_details("nope".to_string()).await,
        Err(RuntimeError::Controller(ControllerError::NotFound(_)))
    ));

    let csv = handle.export_csv(CsvDialect::Legacy).await.expect("export");
    assert_eq!(csv.lines().count(), 4);
    handle.teardown().await.expect("teardown");
}

#[tokio::test]
async fn custom_runtime_bounds_are_honoured() {
    let config = ConsoleConfig::default();
    let view = BookingView::bookings(
        gateway(Duration::ZERO),
        Arc::new(AutoConfirm(true)),
        Arc::new(SilentNotifier),
        &config,
    );
    let handle = spawn_view(
        view,
        RuntimeConfig {
            command_queue_bound: 1,
            event_capacity: 1,
        },
    );
    for page in 1..=5 {
        handle.go_to_page(page).await.expect("page");
    }
    assert_eq!(handle.snapshot().await.expect("snapshot").query.page, 1);
    handle.teardown().await.expect("teardown");
}
