use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    config::ViewConfig,
    core::store::{RecordSet, StoreError},
    engine::{
        evaluate::{ViewResult, evaluate},
        query::QueryState,
        traits::ListEntity,
    },
    export::{self, CsvDialect, ExportError},
    gateway::{GatewayResult, RecordSource},
};

use super::{
    interact::{Confirm, Notification, Notify},
    load::{LoadOutcome, LoadState, LoadTicket},
};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("a fetch is already outstanding for this view")]
    AlreadyLoading,
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
    #[error("view has been torn down")]
    Disposed,
    #[error("no record with id {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Query state, loaded records and derived view of one list page.
///
/// Every mutation of the query or of the records recomputes the
/// [`ViewResult`] synchronously before returning.
pub struct ListController<E: ListEntity> {
    source: Arc<dyn RecordSource<E::Raw>>,
    confirm: Arc<dyn Confirm>,
    notify: Arc<dyn Notify>,
    settings: ViewConfig,
    load_state: LoadState,
    generation: u64,
    disposed: bool,
    records: RecordSet<E>,
    query: QueryState<E>,
    result: ViewResult<E>,
    selected: Option<E::Id>,
}

impl<E: ListEntity> ListController<E> {
    pub fn new(
        source: Arc<dyn RecordSource<E::Raw>>,
        confirm: Arc<dyn Confirm>,
        notify: Arc<dyn Notify>,
        settings: ViewConfig,
    ) -> Self {
        let query = QueryState::new(settings.page_size);
        let result = ViewResult::empty(&query);
        Self {
            source,
            confirm,
            notify,
            settings,
            load_state: LoadState::Idle,
            generation: 0,
            disposed: false,
            records: RecordSet::new(),
            query,
            result,
            selected: None,
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn query(&self) -> &QueryState<E> {
        &self.query
    }

    pub fn result(&self) -> &ViewResult<E> {
        &self.result
    }

    pub fn records(&self) -> &[E] {
        self.records.as_slice()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Gateway handle, for drivers that run the fetch themselves.
    pub fn source(&self) -> Arc<dyn RecordSource<E::Raw>> {
        Arc::clone(&self.source)
    }

    /// `Idle → Loading`.
    pub fn begin_activate(&mut self) -> ControllerResult<LoadTicket> {
        match self.load_state {
            LoadState::Idle => self.begin_load(),
            LoadState::Loading => Err(ControllerError::AlreadyLoading),
            _ => Err(ControllerError::InvalidTransition {
                action: "activate",
                state: self.load_state.name(),
            }),
        }
    }

    /// `Failed → Loading`.
    pub fn begin_retry(&mut self) -> ControllerResult<LoadTicket> {
        match self.load_state {
            LoadState::Failed { .. } => self.begin_load(),
            LoadState::Loading => Err(ControllerError::AlreadyLoading),
            _ => Err(ControllerError::InvalidTransition {
                action: "retry",
                state: self.load_state.name(),
            }),
        }
    }

    /// Applies a fetch result if `ticket` is still current.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        fetched: GatewayResult<Vec<E::Raw>>,
    ) -> LoadOutcome {
        self.complete_load_at(ticket, fetched, Utc::now())
    }

    /// [`complete_load`](Self::complete_load) with an explicit fallback instant.
    pub fn complete_load_at(
        &mut self,
        ticket: LoadTicket,
        fetched: GatewayResult<Vec<E::Raw>>,
        now: DateTime<Utc>,
    ) -> LoadOutcome {
        if self.disposed || ticket.generation != self.generation || !self.load_state.is_loading() {
            debug!(
                noun = E::NOUN,
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale fetch result"
            );
            return LoadOutcome::Discarded;
        }

        match fetched {
            Ok(raw) => {
                self.records =
                    RecordSet::from_records(raw.into_iter().map(|r| E::normalize(r, now)));
                self.query = QueryState::new(self.settings.page_size);
                self.selected = None;
                self.load_state = LoadState::Loaded;
                self.recompute();
                let count = self.records.len();
                info!(noun = E::NOUN, count, "records loaded");
                LoadOutcome::Loaded { count }
            }
            Err(err) => {
                warn!(noun = E::NOUN, %err, "fetch failed");
                let message = format!("Failed to load {}s. Please try again.", E::NOUN);
                self.notify.notify(Notification::error("Load failed", message.clone()));
                self.load_state = LoadState::Failed { message };
                LoadOutcome::Failed
            }
        }
    }

    /// Activates the view and awaits the fetch in place.
    pub async fn activate(&mut self) -> ControllerResult<LoadOutcome> {
        let ticket = self.begin_activate()?;
        let fetched = self.source.fetch().await;
        Ok(self.complete_load(ticket, fetched))
    }

    /// Retries a failed fetch in place.
    pub async fn retry(&mut self) -> ControllerResult<LoadOutcome> {
        let ticket = self.begin_retry()?;
        let fetched = self.source.fetch().await;
        Ok(self.complete_load(ticket, fetched))
    }

    /// Disposes the view; later fetch results are discarded.
    pub fn teardown(&mut self) {
        self.disposed = true;
        self.selected = None;
        debug!(noun = E::NOUN, "view torn down");
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search = term.into();
        if self.settings.reset_page_on_search {
            self.query.page = 1;
        }
        self.recompute();
    }

    pub fn set_filters(&mut self, filters: E::Filters) {
        self.query.filters = filters;
        self.recompute();
    }

    pub fn set_date_from(&mut self, bound: Option<DateTime<Utc>>) {
        self.query.date_from = bound;
        self.recompute();
    }

    /// Header click on `key`.
    pub fn sort_by(&mut self, key: E::SortKey) {
        self.query.sort_by(key);
        self.recompute();
    }

    /// Requests `page`; the recompute clamps it into range.
    pub fn go_to_page(&mut self, page: usize) {
        self.query.page = page;
        self.recompute();
    }

    pub fn open_details(&mut self, id: &E::Id) -> ControllerResult<&E> {
        let rec = self
            .records
            .get(id)
            .ok_or_else(|| ControllerError::NotFound(id.to_string()))?;
        self.selected = Some(id.clone());
        Ok(rec)
    }

    pub fn close_details(&mut self) {
        self.selected = None;
    }

    /// Record shown in the detail modal, if any.
    pub fn selected(&self) -> Option<&E> {
        self.selected.as_ref().and_then(|id| self.records.get(id))
    }

    /// Deletes after the user confirms. Returns false when declined.
    ///
    /// The deletion is local; nothing is sent to the gateway. Views that
    /// reset the page on search also return to page 1 here.
    pub async fn delete(&mut self, id: &E::Id) -> ControllerResult<bool> {
        if !self.records.contains(id) {
            return Err(ControllerError::NotFound(id.to_string()));
        }
        let prompt = format!("Are you sure you want to delete this {}?", E::NOUN);
        if !self.confirm.confirm(&prompt).await {
            debug!(noun = E::NOUN, %id, "delete declined");
            return Ok(false);
        }

        self.records.remove(id)?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        if self.settings.reset_page_on_search {
            self.query.page = 1;
        }
        self.recompute();
        info!(noun = E::NOUN, %id, "record deleted locally");
        Ok(true)
    }

    /// Applies `patch` to one record in place. Local only.
    pub fn update(&mut self, id: &E::Id, patch: &E::Patch) -> ControllerResult<()> {
        self.records.update(id, |rec| rec.apply_patch(patch))?;
        self.recompute();
        debug!(noun = E::NOUN, %id, ?patch, "record patched locally");
        Ok(())
    }

    /// CSV of the current filtered, sorted rows.
    pub fn export_csv(&self, dialect: CsvDialect) -> ControllerResult<String> {
        Ok(export::render(&self.result.sorted, &E::export_columns(), dialect)?)
    }

    /// Writes the export file into `dir`.
    pub fn write_export(
        &self,
        dir: impl AsRef<Path>,
        dialect: CsvDialect,
    ) -> ControllerResult<PathBuf> {
        Ok(export::write_export(dir, &self.result.sorted, dialect)?)
    }

    fn begin_load(&mut self) -> ControllerResult<LoadTicket> {
        if self.disposed {
            return Err(ControllerError::Disposed);
        }
        self.generation += 1;
        self.load_state = LoadState::Loading;
        debug!(noun = E::NOUN, generation = self.generation, "fetch started");
        Ok(LoadTicket {
            generation: self.generation,
        })
    }

    fn recompute(&mut self) {
        self.result = evaluate(self.records.as_slice(), &self.query);
        self.query.page = self.result.pagination.page;
    }
}
