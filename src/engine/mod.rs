//! List query engine: filter, sort, paginate and aggregate.

/// Booking entity wiring.
pub mod booking;
/// Customer entity wiring.
pub mod customer;
/// The evaluate pipeline and its result.
pub mod evaluate;
/// Query state and sort specification.
pub mod query;
/// Entity trait the pipeline is generic over.
pub mod traits;
