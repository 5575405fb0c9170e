//! Collection, ordering and paging primitives shared by every list view.

/// Pagination arithmetic and the pager window.
pub mod page;
/// Typed sort values and the shared comparator.
pub mod sort;
/// Ordered, id-indexed record collection.
pub mod store;
