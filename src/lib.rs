//! League simulation and prediction engine.
//!
//! Four pure components do the real work: the round-robin fixture scheduler
//! ([`schedule`]), the Poisson match simulator ([`simulate`]), the standings
//! aggregator ([`standings`]) and the final-table projector ([`predict`]).
//! [`league`] wraps them in an in-memory season for callers that want the
//! whole workflow (generate, simulate week by week, edit, reset) without
//! wiring the pieces themselves. Nothing here persists anything; callers own
//! storage and snapshot isolation.

pub mod error;
pub mod league;
pub mod predict;
pub mod schedule;
pub mod seed;
pub mod simulate;
pub mod standings;
pub mod state;
