//! Single-writer async driver for a view and its event stream.

/// Event stream types emitted by the driver.
pub mod events;
/// Handle and command loop implementation.
pub mod handle;
