use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::SortDirection;

use super::traits::ListEntity;

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec<K> {
    /// Column being sorted.
    pub key: K,
    /// Direction for that column.
    pub direction: SortDirection,
}

impl<K: Copy + Eq> SortSpec<K> {
    /// Ascending sort on `key`.
    pub fn asc(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on `key`.
    pub fn desc(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }

    /// Header click: the same key flips direction, a new key starts ascending.
    pub fn toggle(&mut self, key: K) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            *self = Self::asc(key);
        }
    }
}

/// Search, filter, sort and page parameters of one view.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<E: ListEntity> {
    /// Free-text search term; empty matches everything.
    pub search: String,
    /// Categorical filters.
    pub filters: E::Filters,
    /// Inclusive lower bound on the record's relevant date.
    pub date_from: Option<DateTime<Utc>>,
    /// Active sort.
    pub sort: SortSpec<E::SortKey>,
    /// Requested page, 1-based. Clamped on every recompute.
    pub page: usize,
    /// Rows per page, fixed per view.
    pub page_size: usize,
}

impl<E: ListEntity> QueryState<E> {
    /// Fresh state with the entity's default sort on page 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            filters: E::Filters::default(),
            date_from: None,
            sort: E::default_sort(),
            page: 1,
            page_size,
        }
    }

    /// Header click on `key`.
    pub fn sort_by(&mut self, key: E::SortKey) {
        self.sort.toggle(key);
    }

    /// True when no search, categorical filter or date bound is active.
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.filters == E::Filters::default() && self.date_from.is_none()
    }

    /// Copy of this state with search, filters and date bound cleared.
    pub fn without_filters(&self) -> Self {
        Self {
            search: String::new(),
            filters: E::Filters::default(),
            date_from: None,
            ..self.clone()
        }
    }
}
