//! ECS systems that operate on the sector world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for
//! read-only work). They do not own state; persistent state lives in
//! components or on the engine.

pub mod ai_control;
pub mod cleanup;
pub mod fleet_command;
pub mod reinforcements;
pub mod ship_systems;
pub mod snapshot;
