use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Most page numbers a pager shows at once.
pub const PAGE_WINDOW: usize = 5;

/// Resolved pagination for one recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page after clamping, 1-based.
    pub page: usize,
    /// Total pages, at least 1.
    pub total_pages: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Number of rows being paged.
    pub total_items: usize,
}

impl Pagination {
    /// Clamps `requested` into `[1, total_pages]` for `total_items` rows.
    ///
    /// A zero page size is treated as one row per page.
    pub fn resolve(total_items: usize, page_size: usize, requested: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size).max(1);
        Self {
            page: requested.clamp(1, total_pages),
            total_pages,
            page_size,
            total_items,
        }
    }

    /// Index range of the current page's rows.
    pub fn range(&self) -> Range<usize> {
        let start = (self.page.saturating_sub(1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    /// Pager window around the current page.
    pub fn window(&self) -> Vec<usize> {
        page_window(self.page, self.total_pages)
    }
}

/// Up to [`PAGE_WINDOW`] page numbers centred on `current`.
///
/// Near either edge the window slides inward so it stays full whenever
/// `total_pages` allows.
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);
    let mut start = current.saturating_sub(PAGE_WINDOW / 2).max(1);
    let end = (start + PAGE_WINDOW - 1).min(total_pages);
    if end - start + 1 < PAGE_WINDOW {
        start = (end + 1).saturating_sub(PAGE_WINDOW).max(1);
    }
    (start..=end).collect()
}
