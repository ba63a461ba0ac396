//! ECS components for ship entities.
//!
//! Components are plain data structs with no decision logic.
//! Controllers and systems read them, decide, and write back.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::factions::FactionId;

/// Stable ship identity, assigned once at spawn and never reused.
/// Back-references between ships (targets, fleet membership) use this id
/// so a destroyed ship can be cheaply probed instead of dereferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipId(pub u32);

/// Identity component: who this ship is and which side it fights for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShipTag {
    pub id: ShipId,
    pub faction: FactionId,
}

/// Rigid-body state plus the command inputs controllers write each tick.
/// The physics collaborator integrates this; nothing else mutates
/// position/velocity directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RigidBody {
    pub position: DVec2,
    /// Heading angle in radians (0 = +X, counter-clockwise).
    pub heading: f64,
    pub linear_velocity: DVec2,
    /// Angular velocity (rad/s, counter-clockwise positive).
    pub angular_velocity: f64,
    /// Bounding circle radius for ray probes (units).
    pub bounding_radius: f64,
    /// Forward thrust command, 0.0 or 1.0.
    pub thrust: f64,
    /// Steering command, -1.0 (clockwise), 0.0, or 1.0.
    pub steer: f64,
}

impl RigidBody {
    pub fn forward(&self) -> DVec2 {
        crate::types::heading_vec(self.heading)
    }

    /// Right-hand basis vector (perpendicular to forward).
    pub fn right(&self) -> DVec2 {
        let f = self.forward();
        DVec2::new(f.y, -f.x)
    }

    /// Probe origin just ahead of the nose.
    pub fn nose_point(&self) -> DVec2 {
        self.position + self.forward() * self.bounding_radius
    }
}

/// Status flags consumed by targeting and movement decisions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShipStatus {
    pub destroyed: bool,
    /// Death sequence started; still present in the world but not a
    /// valid target.
    pub terminating: bool,
    pub dock: DockState,
    /// Mid-hyperspace-jump.
    pub jumping: bool,
    pub engines_disrupted: bool,
    /// Whether the command point module is intact. Ships without a tower
    /// are never targeted.
    pub has_tower: bool,
    /// Local-frame offset of the tower from the body origin.
    pub tower_offset: DVec2,
}

impl ShipStatus {
    /// World position of the tower, the reference point for all
    /// targeting math.
    pub fn tower_position(&self, body: &RigidBody) -> DVec2 {
        body.position + body.right() * self.tower_offset.x + body.forward() * self.tower_offset.y
    }
}

/// Stored energy shared by weapons and addons.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnergyPool {
    pub stored: f64,
    pub capacity: f64,
    pub regen_per_sec: f64,
}

/// A single weapon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub mount: WeaponMount,
    pub destroyed: bool,
    /// Scalar projectile speed; 0.0 means hitscan/beam.
    pub projectile_speed: f64,
    pub range: f64,
    /// Current aim direction (unit vector, world frame).
    pub aim: DVec2,
    /// Seconds until ready to fire again.
    pub cooldown_secs: f64,
    /// Cooldown applied after each shot.
    pub fire_interval_secs: f64,
    /// Angular tolerance within which the weapon may fire (radians).
    pub fire_cone: f64,
}

impl Weapon {
    pub fn ready(&self) -> bool {
        self.cooldown_secs <= 0.0
    }
}

/// All weapons on a ship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponRack {
    pub weapons: Vec<Weapon>,
}

/// A single addon/ability module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Addon {
    pub kind: AddonKind,
    pub destroyed: bool,
    /// Energy drawn on activation.
    pub energy_cost: f64,
    /// Seconds until usable again.
    pub cooldown_secs: f64,
    /// Cooldown applied after each activation.
    pub recharge_secs: f64,
    /// Effective range when counted as a weapon (particle accelerator).
    pub effect_range: f64,
}

impl Addon {
    pub fn usable(&self) -> bool {
        !self.destroyed && self.cooldown_secs <= 0.0
    }
}

/// All addons on a ship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddonRack {
    pub addons: Vec<Addon>,
}

/// Module health fractions, consumed by the repair-need predicate.
/// Damage resolution itself happens outside this core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleRack {
    pub health: Vec<f64>,
}

/// Ramming-charge hull feature.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RamDrive {
    pub installed: bool,
    /// Seconds until the charge may trigger again.
    pub cooldown_secs: f64,
    /// Seconds of high-thrust charge remaining once triggered.
    pub active_secs: f64,
}

impl RamDrive {
    pub fn charged(&self) -> bool {
        self.installed && self.cooldown_secs <= 0.0
    }
}

/// Fleet order plus formation target, written by the fleet command each tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderState {
    pub order: FleetOrder,
    pub formation_position: DVec2,
    /// Desired heading once settled into the formation slot.
    pub formation_heading: DVec2,
}

impl Default for OrderState {
    fn default() -> Self {
        Self {
            order: FleetOrder::default(),
            formation_position: DVec2::ZERO,
            formation_heading: DVec2::X,
        }
    }
}

/// Marks the player's ship. AI thrust is withheld while it docks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip;
