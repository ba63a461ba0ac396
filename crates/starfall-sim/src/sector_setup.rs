//! Entity spawn factories for populating the sector.
//!
//! Builds ship entities with full component bundles and assembles fleets
//! in line-abreast formation around a leader.

use glam::DVec2;
use hecs::World;

use starfall_core::commands::BrainSpec;
use starfall_core::components::*;
use starfall_core::enums::*;
use starfall_core::factions::FactionId;
use starfall_core::types::heading_vec;

use crate::control::ControllerSlot;
use crate::fleet::FleetCommand;
use starfall_ai::controller::Controller;

/// Lateral spacing between fleet members in a line-abreast formation.
const FORMATION_SPACING: f64 = 120.0;

/// Parameters for spawning a single ship.
#[derive(Debug, Clone)]
pub struct ShipParams {
    pub faction: FactionId,
    pub position: DVec2,
    /// Heading angle in radians.
    pub heading: f64,
    pub brain: BrainSpec,
    pub player: bool,
}

impl Default for ShipParams {
    fn default() -> Self {
        Self {
            faction: FactionId::Imperial,
            position: DVec2::ZERO,
            heading: 0.0,
            brain: BrainSpec::Ai {
                style: EngagementStyle::Assault,
            },
            player: false,
        }
    }
}

/// Spawn a single ship with the default frigate loadout.
pub fn spawn_ship(
    world: &mut World,
    next_ship_id: &mut u32,
    params: &ShipParams,
) -> (hecs::Entity, ShipId) {
    let id = ShipId(*next_ship_id);
    *next_ship_id += 1;

    let body = RigidBody {
        position: params.position,
        heading: params.heading,
        linear_velocity: DVec2::ZERO,
        angular_velocity: 0.0,
        bounding_radius: 12.0,
        thrust: 0.0,
        steer: 0.0,
    };

    let status = ShipStatus {
        destroyed: false,
        terminating: false,
        dock: DockState::Undocked,
        jumping: false,
        engines_disrupted: false,
        has_tower: true,
        tower_offset: DVec2::new(0.0, 4.0),
    };

    let energy = EnergyPool {
        stored: 100.0,
        capacity: 100.0,
        regen_per_sec: 5.0,
    };

    let ram = RamDrive {
        installed: params.faction.ramming_eligible(),
        cooldown_secs: 0.0,
        active_secs: 0.0,
    };

    let entity = world.spawn((
        ShipTag {
            id,
            faction: params.faction,
        },
        body,
        status,
        energy,
        WeaponRack {
            weapons: default_weapon_loadout(),
        },
        AddonRack {
            addons: default_addon_loadout(),
        },
        ModuleRack {
            health: vec![1.0; 4],
        },
        ram,
        OrderState::default(),
        ControllerSlot::new(Controller::from_spec(params.brain)),
    ));

    if params.player {
        // Bundle limit; attached separately.
        let _ = world.insert_one(entity, PlayerShip);
    }

    (entity, id)
}

/// Default frigate loadout: one beam turret and one fixed cannon.
fn default_weapon_loadout() -> Vec<Weapon> {
    vec![
        Weapon {
            mount: WeaponMount::Turret {
                traverse_rate: std::f64::consts::PI,
            },
            destroyed: false,
            projectile_speed: 0.0,
            range: 350.0,
            aim: DVec2::X,
            cooldown_secs: 0.0,
            fire_interval_secs: 1.5,
            fire_cone: 0.1,
        },
        Weapon {
            mount: WeaponMount::Fixed,
            destroyed: false,
            projectile_speed: 220.0,
            range: 500.0,
            aim: DVec2::X,
            cooldown_secs: 0.0,
            fire_interval_secs: 0.8,
            fire_cone: 0.1,
        },
    ]
}

fn default_addon_loadout() -> Vec<Addon> {
    vec![Addon {
        kind: AddonKind::Repair,
        destroyed: false,
        energy_cost: 40.0,
        cooldown_secs: 0.0,
        recharge_secs: 12.0,
        effect_range: 0.0,
    }]
}

/// Spawn a fleet: leader at `center`, followers line abreast alternating
/// to port and starboard, all facing `heading`. Formation offsets are
/// recorded before the first tick.
pub fn spawn_fleet(
    world: &mut World,
    next_ship_id: &mut u32,
    faction: FactionId,
    ship_count: u32,
    style: EngagementStyle,
    center: DVec2,
    heading: f64,
) -> FleetCommand {
    let brain = BrainSpec::Ai { style };
    let forward = heading_vec(heading);
    let right = DVec2::new(forward.y, -forward.x);

    let (leader, leader_id) = spawn_ship(
        world,
        next_ship_id,
        &ShipParams {
            faction,
            position: center,
            heading,
            brain,
            player: false,
        },
    );
    let mut fleet = FleetCommand::new(faction, leader, leader_id);

    for i in 1..ship_count {
        // Slots alternate port and starboard: +1, -1, +2, -2, ...
        let rank = ((i + 1) / 2) as f64;
        let side = if i % 2 == 1 { 1.0 } else { -1.0 };
        let position = center + right * (rank * FORMATION_SPACING * side);
        let (follower, follower_id) = spawn_ship(
            world,
            next_ship_id,
            &ShipParams {
                faction,
                position,
                heading,
                brain,
                player: false,
            },
        );
        fleet.assign_ship(follower, follower_id);
    }

    fleet.setup_relationships(world);
    fleet
}
