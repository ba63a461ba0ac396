//! Events emitted by the simulation for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::components::ShipId;
use crate::enums::AddonKind;

/// Per-tick combat events, drained into the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A weapon passed its fire gate this tick.
    WeaponFired {
        shooter: ShipId,
        target: ShipId,
        weapon_index: usize,
    },
    /// A controller locked a new target.
    TargetAcquired { ship: ShipId, target: ShipId },
    /// An addon activated.
    AddonActivated { ship: ShipId, kind: AddonKind },
    /// A ramming charge triggered.
    RammingCharge { ship: ShipId },
}

/// User-facing notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notification {
    /// A reinforcement fleet spawned into the sector.
    ReinforcementsArrived {
        /// Whether the fleet is hostile to the player.
        hostile_to_player: bool,
        ship_count: u32,
    },
    /// A fleet's leader was destroyed; the formation dissolved.
    FleetLeaderLost { leader: ShipId },
}
