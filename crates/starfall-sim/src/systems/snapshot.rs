//! Snapshot system: queries the ECS world and builds a complete
//! `SectorSnapshot`. Read-only over the world.

use hecs::World;

use starfall_core::components::*;
use starfall_core::enums::SectorPhase;
use starfall_core::events::{CombatEvent, Notification};
use starfall_core::state::{FleetView, SectorSnapshot, ShipView};
use starfall_core::types::SimTime;

use crate::control::ControllerSlot;
use crate::fleet::FleetCommand;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: SectorPhase,
    fleets: &[FleetCommand],
    events: Vec<CombatEvent>,
    notifications: Vec<Notification>,
) -> SectorSnapshot {
    SectorSnapshot {
        time: *time,
        phase,
        ships: build_ships(world),
        fleets: build_fleets(world, fleets),
        events,
        notifications,
    }
}

fn build_ships(world: &World) -> Vec<ShipView> {
    let mut ships = Vec::new();
    for (_entity, (tag, body, status, order, slot)) in world
        .query::<(&ShipTag, &RigidBody, &ShipStatus, &OrderState, &ControllerSlot)>()
        .iter()
    {
        ships.push(ShipView {
            id: tag.id,
            faction: tag.faction,
            position: body.position,
            heading: body.heading,
            velocity: body.linear_velocity,
            order: order.order,
            destroyed: status.destroyed,
            target: slot.active.target(),
        });
    }
    // World iteration order is unstable across spawns; id order is not.
    ships.sort_by_key(|s| s.id.0);
    ships
}

fn build_fleets(world: &World, fleets: &[FleetCommand]) -> Vec<FleetView> {
    fleets
        .iter()
        .map(|fleet| FleetView {
            leader: fleet.leader_id,
            followers: fleet.follower_ids.clone(),
            active: fleet.is_active(world),
        })
        .collect()
}
