//! Commands sent into the sector engine.
//!
//! Commands are queued and consumed at the next tick boundary; nothing
//! mutates the world mid-tick.

use serde::{Deserialize, Serialize};

use crate::components::ShipId;
use crate::enums::EngagementStyle;

/// What kind of controller a ship should run.
/// Resolved into a live controller by the engine when the swap applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrainSpec {
    /// No decisions; ship coasts (docked or externally scripted).
    Dormant,
    /// Full AI behavior with the given engagement style.
    Ai { style: EngagementStyle },
}

/// All actions accepted by the sector engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SectorCommand {
    // --- Controller management ---
    /// Suspend or resume a ship's controller (manual formation override).
    SuspendController { ship: ShipId, on: bool },
    /// Replace a ship's controller. Takes effect at the start of the
    /// next tick, never mid-tick.
    SwitchController { ship: ShipId, brain: BrainSpec },

    // --- Reinforcements ---
    /// Append a fleet to the pending reinforcement queue.
    QueueFleet {
        friendly: bool,
        ship_count: u32,
        style: EngagementStyle,
    },

    // --- Simulation control ---
    /// Begin ticking the sector.
    Start,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Set time scale (1.0 = normal, 0.0 = paused).
    SetTimeScale { scale: f64 },
}
