//! Sector state snapshot — the complete visible state produced each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::components::ShipId;
use crate::enums::*;
use crate::events::{CombatEvent, Notification};
use crate::factions::FactionId;
use crate::types::SimTime;

/// Complete sector state built after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectorSnapshot {
    pub time: SimTime,
    pub phase: SectorPhase,
    pub ships: Vec<ShipView>,
    pub fleets: Vec<FleetView>,
    pub events: Vec<CombatEvent>,
    pub notifications: Vec<Notification>,
}

/// One ship as seen on the tactical display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub id: ShipId,
    pub faction: FactionId,
    pub position: DVec2,
    pub heading: f64,
    pub velocity: DVec2,
    pub order: FleetOrder,
    pub destroyed: bool,
    /// Current AI target, if the ship runs an AI controller with a lock.
    pub target: Option<ShipId>,
}

/// One fleet command's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetView {
    pub leader: ShipId,
    pub followers: Vec<ShipId>,
    /// Whether at least one member ship is still alive.
    pub active: bool,
}
