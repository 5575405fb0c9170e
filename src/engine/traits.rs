use std::{fmt::Debug, hash::Hash};

use chrono::{DateTime, Utc};

use crate::{
    core::{sort::SortValue, store::Keyed},
    export::ColumnSpec,
};

use super::query::SortSpec;

/// Record type a list view can load, query, mutate and export.
///
/// One implementation per view keeps the pipeline in
/// [`evaluate`](super::evaluate::evaluate) generic: the entity decides which
/// fields are searchable, how a sort key maps to a value, which categorical
/// filters exist and what the summary row contains.
pub trait ListEntity: Keyed + Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Payload shape received from the gateway.
    type Raw: Send + 'static;
    /// Sortable column.
    type SortKey: Copy + Eq + Hash + Debug + Send + Sync + 'static;
    /// Categorical filters; `Default` means nothing selected.
    type Filters: Clone + Default + PartialEq + Debug + Send + Sync + 'static;
    /// Sparse local mutation.
    type Patch: Clone + Debug + Send + 'static;
    /// Aggregates over a filtered collection.
    type Stats: Clone + Default + PartialEq + Debug + Send + Sync + 'static;

    /// Singular noun used in prompts and messages.
    const NOUN: &'static str;

    /// File name used when the filtered view is exported.
    const EXPORT_FILE_NAME: &'static str;

    /// Canonical record for `raw`; `now` is the fallback instant.
    fn normalize(raw: Self::Raw, now: DateTime<Utc>) -> Self;

    /// Sort applied when a view is activated.
    fn default_sort() -> SortSpec<Self::SortKey>;

    /// Text fields matched by the free-text search.
    fn search_fields(&self) -> Vec<&str>;

    /// True when the record passes every active categorical filter.
    fn matches_filters(&self, filters: &Self::Filters) -> bool;

    /// Date compared against the query's lower bound.
    fn relevant_date(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Value of `key` on this record.
    fn sort_value(&self, key: Self::SortKey) -> SortValue<'_>;

    /// Applies a local patch.
    fn apply_patch(&mut self, patch: &Self::Patch);

    /// Summary over the filtered, unpaginated collection.
    fn aggregate(filtered: &[Self]) -> Self::Stats;

    /// Columns written by the CSV export.
    fn export_columns() -> Vec<ColumnSpec<Self>>;
}
