use crate::core::{page::Pagination, sort::compare_values};

use super::{
    query::{QueryState, SortSpec},
    traits::ListEntity,
};

/// Derived output of one recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewResult<E: ListEntity> {
    /// Records passing every predicate, in input order.
    pub filtered: Vec<E>,
    /// `filtered` after the stable sort.
    pub sorted: Vec<E>,
    /// Clamped page and page count.
    pub pagination: Pagination,
    /// Aggregates over `filtered`.
    pub stats: E::Stats,
}

impl<E: ListEntity> ViewResult<E> {
    /// Result for an empty collection.
    pub fn empty(state: &QueryState<E>) -> Self {
        evaluate(&[], state)
    }

    /// Rows on the current page.
    pub fn page_items(&self) -> &[E] {
        &self.sorted[self.pagination.range()]
    }

    /// Pager window around the current page.
    pub fn page_window(&self) -> Vec<usize> {
        self.pagination.window()
    }
}

/// Filter, sort, paginate and aggregate `records` under `state`.
///
/// Pure: the result depends only on the arguments.
pub fn evaluate<E: ListEntity>(records: &[E], state: &QueryState<E>) -> ViewResult<E> {
    let needle = state.search.to_lowercase();
    let filtered: Vec<E> = records
        .iter()
        .filter(|rec| matches(*rec, state, &needle))
        .cloned()
        .collect();

    let mut sorted = filtered.clone();
    sort_records(&mut sorted, state.sort);

    let pagination = Pagination::resolve(sorted.len(), state.page_size, state.page);
    let stats = E::aggregate(&filtered);

    ViewResult {
        filtered,
        sorted,
        pagination,
        stats,
    }
}

/// Stable in-place sort with the shared comparator.
pub fn sort_records<E: ListEntity>(records: &mut [E], sort: SortSpec<E::SortKey>) {
    records.sort_by(|a, b| {
        compare_values(
            &a.sort_value(sort.key),
            &b.sort_value(sort.key),
            sort.direction,
        )
    });
}

fn matches<E: ListEntity>(rec: &E, state: &QueryState<E>, needle: &str) -> bool {
    let search_ok = needle.is_empty()
        || rec
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle));

    let date_ok = match state.date_from {
        None => true,
        Some(bound) => rec.relevant_date().is_some_and(|d| d >= bound),
    };

    search_ok && rec.matches_filters(&state.filters) && date_ok
}
