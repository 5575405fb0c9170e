use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use crate::{
    config::RuntimeConfig,
    controller::{
        list::{ControllerError, ListController},
        load::{LoadOutcome, LoadState, LoadTicket},
    },
    engine::{evaluate::ViewResult, query::QueryState, traits::ListEntity},
    export::CsvDialect,
    gateway::GatewayResult,
    record::{BookingPatch, BookingRecord},
    types::{BookingId, BookingStatus},
};

use super::events::ViewEvent;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Controller(#[from] ControllerError),
    #[error("view driver has stopped")]
    ChannelClosed,
}

/// Point-in-time copy of a view's state.
#[derive(Debug, Clone)]
pub struct ViewSnapshot<E: ListEntity> {
    pub load_state: LoadState,
    pub query: QueryState<E>,
    pub result: ViewResult<E>,
    pub selected: Option<E>,
}

pub struct ViewHandle<E: ListEntity> {
    cmd_tx: mpsc::Sender<Command<E>>,
    events_tx: broadcast::Sender<ViewEvent<E::Id>>,
}

impl<E: ListEntity> Clone for ViewHandle<E> {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

type Reply<T> = oneshot::Sender<Result<T, RuntimeError>>;
type Fetched<E> = (LoadTicket, GatewayResult<Vec<<E as ListEntity>::Raw>>);

enum Command<E: ListEntity> {
    Activate { resp: Reply<()> },
    Retry { resp: Reply<()> },
    Search { term: String, resp: Reply<()> },
    Filters { filters: E::Filters, resp: Reply<()> },
    DateFrom { bound: Option<DateTime<Utc>>, resp: Reply<()> },
    SortBy { key: E::SortKey, resp: Reply<()> },
    GoToPage { page: usize, resp: Reply<()> },
    OpenDetails { id: E::Id, resp: Reply<E> },
    CloseDetails { resp: Reply<()> },
    Delete { id: E::Id, resp: Reply<bool> },
    Update { id: E::Id, patch: E::Patch, resp: Reply<()> },
    Export { dialect: CsvDialect, resp: Reply<String> },
    Snapshot { resp: Reply<ViewSnapshot<E>> },
    Teardown { resp: Reply<()> },
}

/// Runs `controller` on its own task and returns the handle driving it.
///
/// Commands are handled one at a time, to completion, in arrival order.
/// Fetches run on a separate task and re-enter the loop tagged with their
/// load ticket. After `teardown` the loop exits and any fetch still in
/// flight has nowhere to deliver its result, so it is dropped.
pub fn spawn_view<E: ListEntity>(
    controller: ListController<E>,
    config: RuntimeConfig,
) -> ViewHandle<E> {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command<E>>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<ViewEvent<E::Id>>(config.event_capacity.max(1));
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<Fetched<E>>();

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut controller = controller;

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    let Some(cmd) = cmd else { break; };
                    let done =
                        handle_command(cmd, &mut controller, &events_tx_loop, &fetch_tx).await;
                    if done {
                        break;
                    }
                }
                fetched = fetch_rx.recv() => {
                    if let Some((ticket, result)) = fetched {
                        apply_fetch(&mut controller, ticket, result, &events_tx_loop);
                    }
                }
            }
        }

        controller.teardown();
        debug!(noun = E::NOUN, "view driver stopped");
    });

    ViewHandle { cmd_tx, events_tx }
}

impl<E: ListEntity> ViewHandle<E> {
    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent<E::Id>> {
        self.events_tx.subscribe()
    }

    /// Starts the initial fetch. Completion is reported as an event.
    pub async fn activate(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Activate { resp }).await
    }

    /// Restarts a failed fetch. Completion is reported as an event.
    pub async fn retry(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Retry { resp }).await
    }

    pub async fn search(&self, term: impl Into<String>) -> Result<(), RuntimeError> {
        let term = term.into();
        self.request(|resp| Command::Search { term, resp }).await
    }

    pub async fn set_filters(&self, filters: E::Filters) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Filters { filters, resp }).await
    }

    pub async fn set_date_from(&self, bound: Option<DateTime<Utc>>) -> Result<(), RuntimeError> {
        self.request(|resp| Command::DateFrom { bound, resp }).await
    }

    pub async fn sort_by(&self, key: E::SortKey) -> Result<(), RuntimeError> {
        self.request(|resp| Command::SortBy { key, resp }).await
    }

    pub async fn go_to_page(&self, page: usize) -> Result<(), RuntimeError> {
        self.request(|resp| Command::GoToPage { page, resp }).await
    }

    pub async fn open_details(&self, id: E::Id) -> Result<E, RuntimeError> {
        self.request(|resp| Command::OpenDetails { id, resp }).await
    }

    pub async fn close_details(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::CloseDetails { resp }).await
    }

    /// Deletes after confirmation; false when the user declined.
    pub async fn delete(&self, id: E::Id) -> Result<bool, RuntimeError> {
        self.request(|resp| Command::Delete { id, resp }).await
    }

    pub async fn update(&self, id: E::Id, patch: E::Patch) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Update { id, patch, resp }).await
    }

    pub async fn export_csv(&self, dialect: CsvDialect) -> Result<String, RuntimeError> {
        self.request(|resp| Command::Export { dialect, resp }).await
    }

    pub async fn snapshot(&self) -> Result<ViewSnapshot<E>, RuntimeError> {
        self.request(|resp| Command::Snapshot { resp }).await
    }

    /// Disposes the view and stops its loop.
    pub async fn teardown(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Teardown { resp }).await
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Reply<T>) -> Command<E>,
    ) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }
}

impl ViewHandle<BookingRecord> {
    /// Sets a booking's status locally.
    pub async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<(), RuntimeError> {
        self.update(id, BookingPatch::status(status)).await
    }
}

async fn handle_command<E: ListEntity>(
    cmd: Command<E>,
    controller: &mut ListController<E>,
    events_tx: &broadcast::Sender<ViewEvent<E::Id>>,
    fetch_tx: &mpsc::UnboundedSender<Fetched<E>>,
) -> bool {
    match cmd {
        Command::Activate { resp } => {
            let res = controller
                .begin_activate()
                .map(|ticket| start_fetch(controller, ticket, events_tx, fetch_tx))
                .map_err(RuntimeError::from);
            let _ = resp.send(res);
        }
        Command::Retry { resp } => {
            let res = controller
                .begin_retry()
                .map(|ticket| start_fetch(controller, ticket, events_tx, fetch_tx))
                .map_err(RuntimeError::from);
            let _ = resp.send(res);
        }
        Command::Search { term, resp } => {
            controller.set_search(term);
            announce_recompute(controller, events_tx);
            let _ = resp.send(Ok(()));
        }
        Command::Filters { filters, resp } => {
            controller.set_filters(filters);
            announce_recompute(controller, events_tx);
            let _ = resp.send(Ok(()));
        }
        Command::DateFrom { bound, resp } => {
            controller.set_date_from(bound);
            announce_recompute(controller, events_tx);
            let _ = resp.send(Ok(()));
        }
        Command::SortBy { key, resp } => {
            controller.sort_by(key);
            announce_recompute(controller, events_tx);
            let _ = resp.send(Ok(()));
        }
        Command::GoToPage { page, resp } => {
            controller.go_to_page(page);
            announce_recompute(controller, events_tx);
            let _ = resp.send(Ok(()));
        }
        Command::OpenDetails { id, resp } => {
            let res = controller
                .open_details(&id)
                .cloned()
                .map_err(RuntimeError::from);
            let _ = resp.send(res);
        }
        Command::CloseDetails { resp } => {
            controller.close_details();
            let _ = resp.send(Ok(()));
        }
        Command::Delete { id, resp } => {
            let res = controller.delete(&id).await.map_err(RuntimeError::from);
            if let Ok(true) = res {
                let _ = events_tx.send(ViewEvent::Deleted { id });
                announce_recompute(controller, events_tx);
            }
            let _ = resp.send(res);
        }
        Command::Update { id, patch, resp } => {
            let res = controller.update(&id, &patch).map_err(RuntimeError::from);
            if res.is_ok() {
                let _ = events_tx.send(ViewEvent::Updated { id });
                announce_recompute(controller, events_tx);
            }
            let _ = resp.send(res);
        }
        Command::Export { dialect, resp } => {
            let _ = resp.send(controller.export_csv(dialect).map_err(RuntimeError::from));
        }
        Command::Snapshot { resp } => {
            let _ = resp.send(Ok(ViewSnapshot {
                load_state: controller.load_state().clone(),
                query: controller.query().clone(),
                result: controller.result().clone(),
                selected: controller.selected().cloned(),
            }));
        }
        Command::Teardown { resp } => {
            controller.teardown();
            let _ = resp.send(Ok(()));
            return true;
        }
    }

    false
}

fn start_fetch<E: ListEntity>(
    controller: &ListController<E>,
    ticket: LoadTicket,
    events_tx: &broadcast::Sender<ViewEvent<E::Id>>,
    fetch_tx: &mpsc::UnboundedSender<Fetched<E>>,
) {
    let source = controller.source();
    let tx = fetch_tx.clone();
    let _ = events_tx.send(ViewEvent::LoadStarted {
        generation: ticket.generation(),
    });

    tokio::spawn(async move {
        let result = source.fetch().await;
        if tx.send((ticket, result)).is_err() {
            debug!(generation = ticket.generation(), "view gone, dropping fetch result");
        }
    });
}

fn apply_fetch<E: ListEntity>(
    controller: &mut ListController<E>,
    ticket: LoadTicket,
    result: GatewayResult<Vec<E::Raw>>,
    events_tx: &broadcast::Sender<ViewEvent<E::Id>>,
) {
    let event = match controller.complete_load(ticket, result) {
        LoadOutcome::Loaded { count } => ViewEvent::Loaded { count },
        LoadOutcome::Failed => ViewEvent::LoadFailed {
            message: match controller.load_state() {
                LoadState::Failed { message } => message.clone(),
                _ => String::new(),
            },
        },
        LoadOutcome::Discarded => ViewEvent::LoadDiscarded {
            generation: ticket.generation(),
        },
    };
    let _ = events_tx.send(event);
}

fn announce_recompute<E: ListEntity>(
    controller: &ListController<E>,
    events_tx: &broadcast::Sender<ViewEvent<E::Id>>,
) {
    let pagination = controller.result().pagination;
    let _ = events_tx.send(ViewEvent::Recomputed {
        filtered: controller.result().filtered.len(),
        page: pagination.page,
        total_pages: pagination.total_pages,
    });
}
