//! Fleet command system: each tick, classify enemy presence around the
//! leader and write orders and formation slots into follower `OrderState`s.

use hecs::World;

use starfall_core::components::{OrderState, RigidBody, ShipStatus};
use starfall_core::enums::FleetOrder;
use starfall_core::events::Notification;

use starfall_ai::fleet::{classify_enemy_presence, follower_order, formation_slot, leader_order};
use starfall_ai::view::SectorView;

use crate::fleet::{ship_alive, FleetCommand};

pub fn run(
    world: &mut World,
    fleets: &mut [FleetCommand],
    view: &SectorView,
    notifications: &mut Vec<Notification>,
) {
    for fleet in fleets.iter_mut() {
        if !fleet.relationships_ready {
            fleet.setup_relationships(world);
        }

        if !ship_alive(world, fleet.leader) {
            dissolve(world, fleet, notifications);
            continue;
        }

        let (leader_body, leader_dock, scan_center) = {
            let Ok(body) = world.get::<&RigidBody>(fleet.leader) else {
                continue;
            };
            let Ok(status) = world.get::<&ShipStatus>(fleet.leader) else {
                continue;
            };
            (*body, status.dock, status.tower_position(&body))
        };

        let presence = classify_enemy_presence(view, fleet.faction, scan_center);

        if let Ok(mut order) = world.get::<&mut OrderState>(fleet.leader) {
            order.order = leader_order(presence);
        }

        let right = leader_body.right();
        let forward = leader_body.forward();
        let uses_formations = fleet.faction.uses_formations();

        for (index, &follower) in fleet.followers.iter().enumerate() {
            if !ship_alive(world, follower) {
                continue;
            }
            let Ok(mut order) = world.get::<&mut OrderState>(follower) else {
                continue;
            };
            order.order = follower_order(presence, leader_dock, uses_formations);
            if order.order == FleetOrder::StickToFormation {
                let offset = fleet.offsets.get(index).copied().unwrap_or_default();
                order.formation_position =
                    formation_slot(leader_body.position, right, forward, offset);
                order.formation_heading = forward;
            }
        }
    }
}

/// Leader gone: every surviving follower falls back to independent
/// engagement. The notification fires once per fleet.
fn dissolve(world: &mut World, fleet: &mut FleetCommand, notifications: &mut Vec<Notification>) {
    if !fleet.leader_lost_reported {
        fleet.leader_lost_reported = true;
        notifications.push(Notification::FleetLeaderLost {
            leader: fleet.leader_id,
        });
    }
    for &follower in &fleet.followers {
        if !ship_alive(world, follower) {
            continue;
        }
        if let Ok(mut order) = world.get::<&mut OrderState>(follower) {
            order.order = FleetOrder::Engage;
        }
    }
}
