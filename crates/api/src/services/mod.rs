//! Request-scoped domain services.
//!
//! Services compose repositories into the units of work behind the route
//! handlers, in the fixed order: authorize, validate target state, mutate,
//! re-rank, propagate.

pub mod authorization;
pub mod membership;
pub mod scoring;
