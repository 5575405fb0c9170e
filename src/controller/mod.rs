//! View controllers: load lifecycle, query state and local mutations.

/// Confirmation and notification capabilities.
pub mod interact;
/// Generic list controller.
pub mod list;
/// Load state machine types.
pub mod load;
/// Booking and customer specializations.
pub mod views;
