//! Ship AI for STARFALL.
//!
//! Implements intercept-prediction geometry, the per-ship combat/navigation
//! controller, and fleet order classification. Everything here is pure:
//! decisions are computed from a `SectorView` built at the start of the
//! tick and returned as plain data for the engine to apply. No ECS
//! dependency.

pub mod controller;
pub mod fleet;
pub mod geometry;
pub mod view;

pub use starfall_core as core;

#[cfg(test)]
mod tests;
