//! Core types and definitions for the STARFALL combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, factions, and constants.
//! It has no dependency on any runtime framework or on the ECS.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod factions;
pub mod state;
pub mod types;
