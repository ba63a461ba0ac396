//! AI control system: builds the start-of-tick sector view, runs every
//! ship's controller, and applies the resulting decisions.
//!
//! Decisions are collected first and applied second so every controller
//! this tick sees the same pre-tick world.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use starfall_core::components::*;
use starfall_core::constants::*;
use starfall_core::enums::{AddonKind, DockState};
use starfall_core::events::CombatEvent;
use starfall_core::types::heading_vec;

use starfall_ai::controller::{self, AiDecision, ShipContext};
use starfall_ai::view::{SectorView, ShipInfo};

use crate::control::ControllerSlot;
use crate::physics::{self, ObstacleBody};

/// Hull fraction restored per repair-addon activation.
const REPAIR_AMOUNT: f64 = 0.25;

/// Snapshot every ship into the read-only view controllers resolve
/// targets against.
pub fn build_sector_view(world: &World) -> SectorView {
    let mut ships = Vec::new();
    for (_entity, (tag, body, status)) in world.query::<(&ShipTag, &RigidBody, &ShipStatus)>().iter()
    {
        ships.push(ShipInfo {
            id: tag.id,
            faction: tag.faction,
            tower: status.tower_position(body),
            velocity: body.linear_velocity,
            destroyed: status.destroyed,
            terminating: status.terminating,
            dock: status.dock,
            jumping: status.jumping,
            has_tower: status.has_tower,
        });
    }
    SectorView { ships }
}

pub fn run(
    world: &mut World,
    view: &SectorView,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<CombatEvent>,
) {
    let obstacles = collect_obstacles(world);
    let player_docking = player_is_docking(world);

    let decisions = collect_decisions(world, view, &obstacles, player_docking, rng);
    apply_decisions(world, decisions, events);
}

fn collect_obstacles(world: &World) -> Vec<ObstacleBody> {
    let mut bodies = Vec::new();
    for (_entity, (tag, body, status)) in world.query::<(&ShipTag, &RigidBody, &ShipStatus)>().iter()
    {
        if status.destroyed {
            continue;
        }
        bodies.push(ObstacleBody {
            id: tag.id,
            position: body.position,
            radius: body.bounding_radius,
        });
    }
    bodies
}

fn player_is_docking(world: &World) -> bool {
    world
        .query::<(&PlayerShip, &ShipStatus)>()
        .iter()
        .any(|(_, (_, status))| status.dock != DockState::Undocked)
}

/// Probe two short rays fanned out from the nose. A hit on either side
/// reports an obstacle ahead.
fn obstacle_ahead(obstacles: &[ObstacleBody], body: &RigidBody, own: ShipId) -> bool {
    let nose = body.nose_point();
    for side in [-1.0, 1.0] {
        let dir = heading_vec(body.heading + side * OBSTACLE_PROBE_ANGLE);
        let dest = nose + dir * OBSTACLE_PROBE_LENGTH;
        if physics::raycast(obstacles, nose, dest, own).is_some() {
            return true;
        }
    }
    false
}

fn collect_decisions(
    world: &mut World,
    view: &SectorView,
    obstacles: &[ObstacleBody],
    player_docking: bool,
    rng: &mut ChaCha8Rng,
) -> Vec<(Entity, AiDecision)> {
    let entities: Vec<Entity> = world
        .query::<&ControllerSlot>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    let mut decisions = Vec::with_capacity(entities.len());
    for entity in entities {
        let Ok((tag, body, status, energy, weapons, addons, modules, ram, order, slot)) =
            world.query_one_mut::<(
                &ShipTag,
                &RigidBody,
                &ShipStatus,
                &EnergyPool,
                &WeaponRack,
                &AddonRack,
                &ModuleRack,
                &RamDrive,
                &OrderState,
                &mut ControllerSlot,
            )>(entity)
        else {
            continue;
        };
        if status.destroyed || status.dock != DockState::Undocked || status.jumping {
            continue;
        }

        let ctx = ShipContext {
            id: tag.id,
            faction: tag.faction,
            body: *body,
            tower: status.tower_position(body),
            order: *order,
            energy: energy.stored,
            weapons: &weapons.weapons,
            addons: &addons.addons,
            modules: &modules.health,
            ram: *ram,
            engines_disrupted: status.engines_disrupted,
            obstacle_ahead: obstacle_ahead(obstacles, body, tag.id),
            player_docking,
        };

        let decision = controller::update(&mut slot.active, &ctx, view, rng, DT);
        decisions.push((entity, decision));
    }
    decisions
}

fn apply_decisions(
    world: &mut World,
    decisions: Vec<(Entity, AiDecision)>,
    events: &mut Vec<CombatEvent>,
) {
    for (entity, decision) in decisions {
        let Ok((tag, body, status, energy, weapons, addons, modules, ram)) = world
            .query_one_mut::<(
                &ShipTag,
                &mut RigidBody,
                &ShipStatus,
                &mut EnergyPool,
                &mut WeaponRack,
                &mut AddonRack,
                &mut ModuleRack,
                &mut RamDrive,
            )>(entity)
        else {
            continue;
        };
        if status.destroyed {
            continue;
        }

        body.thrust = decision.thrust;
        body.steer = decision.steer;

        if let Some(target) = decision.target_acquired {
            events.push(CombatEvent::TargetAcquired {
                ship: tag.id,
                target,
            });
        }

        for command in &decision.weapons {
            let Some(weapon) = weapons.weapons.get_mut(command.index) else {
                continue;
            };
            weapon.aim = command.aim;
            if let Some(target) = command.fire_at {
                weapon.cooldown_secs = weapon.fire_interval_secs;
                events.push(CombatEvent::WeaponFired {
                    shooter: tag.id,
                    target,
                    weapon_index: command.index,
                });
            }
        }

        for &index in &decision.addon_activations {
            let Some(addon) = addons.addons.get_mut(index) else {
                continue;
            };
            // Re-checked at apply time; an earlier activation this tick
            // may have drained the pool.
            if !addon.usable() || energy.stored < addon.energy_cost {
                continue;
            }
            energy.stored -= addon.energy_cost;
            addon.cooldown_secs = addon.recharge_secs;
            if addon.kind == AddonKind::Repair {
                apply_repair(&mut modules.health);
            }
            events.push(CombatEvent::AddonActivated {
                ship: tag.id,
                kind: addon.kind,
            });
        }

        if decision.trigger_ram && ram.charged() {
            ram.active_secs = RAM_ACTIVE_SECS;
            ram.cooldown_secs = RAM_RECHARGE_SECS;
            events.push(CombatEvent::RammingCharge { ship: tag.id });
        }
    }
}

/// Restore the most damaged module.
fn apply_repair(health: &mut [f64]) {
    let mut worst: Option<(usize, f64)> = None;
    for (index, &h) in health.iter().enumerate() {
        if h < 1.0 && worst.map_or(true, |(_, w)| h < w) {
            worst = Some((index, h));
        }
    }
    if let Some((index, h)) = worst {
        health[index] = (h + REPAIR_AMOUNT).min(1.0);
    }
}
