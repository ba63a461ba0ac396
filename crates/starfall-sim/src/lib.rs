//! Sector engine for STARFALL.
//!
//! Owns the hecs ECS world, the fleet commands, and the reinforcement
//! schedule; runs all systems at a fixed tick rate and produces
//! `SectorSnapshot`s. Completely headless, enabling deterministic testing.

pub mod control;
pub mod engine;
pub mod fleet;
pub mod physics;
pub mod sector_setup;
pub mod systems;

pub use engine::SectorEngine;
pub use starfall_core as core;
