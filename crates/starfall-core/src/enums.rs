//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Behavioral order assigned to a ship by its fleet command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FleetOrder {
    /// Seek and attack hostile ships.
    Engage,
    /// Wander between randomized waypoints.
    #[default]
    Patrol,
    /// Hold the assigned formation slot relative to the leader.
    StickToFormation,
}

/// How an AI controller fights once ordered to engage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementStyle {
    /// Close straight-line distance until inside weapon range; may ram.
    #[default]
    Assault,
    /// Orbit the target at preferred weapon range.
    Kiter,
}

/// Docking state of a ship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DockState {
    /// Free-flying.
    #[default]
    Undocked,
    /// Approaching a berth; motion is externally driven.
    Docking,
    /// Berthed.
    Docked,
}

/// Result of the fleet leader's hostile scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyPresence {
    /// At least one hostile within the leader's scan range.
    InRange,
    /// Hostiles exist in the sector but none within scan range.
    OutOfRange,
    /// No hostiles anywhere in the sector.
    None,
}

/// Weapon mounting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WeaponMount {
    /// Bore-sighted; aims wherever the hull points.
    Fixed,
    /// Independently slewing mount.
    Turret {
        /// Slew rate (rad/s).
        traverse_rate: f64,
    },
}

/// Addon module category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddonKind {
    /// Restores module health; gates on stored energy.
    Repair,
    /// Treated as a fixed-range weapon for the "has usable weapons" check.
    ParticleAccelerator,
    /// Quantum state alternator: ticks on its own cadence.
    StateAlternator,
    /// Generic opportunistic ability.
    Booster,
}

/// Sector lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectorPhase {
    #[default]
    Idle,
    Active,
    Paused,
}
