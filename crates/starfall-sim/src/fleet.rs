//! Fleet command: a leader, its followers, and their formation offsets.

use glam::DVec2;
use hecs::{Entity, World};

use starfall_core::components::{RigidBody, ShipId, ShipStatus};
use starfall_core::factions::FactionId;

/// Coordination object assigning behavioral orders to a leader ship and
/// its followers each tick. Holds ships by entity handle, never by
/// ownership; a despawned handle reads as destroyed. Stable ids are kept
/// alongside the handles so notifications and snapshots can still name a
/// ship after it despawns.
pub struct FleetCommand {
    pub faction: FactionId,
    pub leader: Entity,
    pub leader_id: ShipId,
    pub followers: Vec<Entity>,
    pub follower_ids: Vec<ShipId>,
    /// Per-follower offset in the leader's right/forward basis,
    /// index-aligned with `followers`. Computed exactly once.
    pub offsets: Vec<DVec2>,
    pub relationships_ready: bool,
    /// The leader-lost notification fired already.
    pub leader_lost_reported: bool,
}

impl FleetCommand {
    pub fn new(faction: FactionId, leader: Entity, leader_id: ShipId) -> Self {
        Self {
            faction,
            leader,
            leader_id,
            followers: Vec::new(),
            follower_ids: Vec::new(),
            offsets: Vec::new(),
            relationships_ready: false,
            leader_lost_reported: false,
        }
    }

    pub fn assign_ship(&mut self, ship: Entity, id: ShipId) {
        self.followers.push(ship);
        self.follower_ids.push(id);
    }

    pub fn assign_leader(&mut self, leader: Entity, id: ShipId) {
        self.leader = leader;
        self.leader_id = id;
    }

    /// Record each follower's offset from the leader, expressed in the
    /// leader's current right/forward basis. Must be called exactly once,
    /// after all followers are assigned and before the first update.
    pub fn setup_relationships(&mut self, world: &World) {
        let leader_body = match world.get::<&RigidBody>(self.leader) {
            Ok(body) => *body,
            Err(_) => return,
        };
        let right = leader_body.right();
        let forward = leader_body.forward();

        self.offsets.clear();
        for &follower in &self.followers {
            let offset = match world.get::<&RigidBody>(follower) {
                Ok(body) => {
                    let delta = body.position - leader_body.position;
                    DVec2::new(delta.dot(right), delta.dot(forward))
                }
                Err(_) => DVec2::ZERO,
            };
            self.offsets.push(offset);
        }

        debug_assert_eq!(self.followers.len(), self.offsets.len());
        self.relationships_ready = true;
    }

    /// Whether at least one member ship is still alive.
    pub fn is_active(&self, world: &World) -> bool {
        std::iter::once(self.leader)
            .chain(self.followers.iter().copied())
            .any(|ship| ship_alive(world, ship))
    }
}

pub(crate) fn ship_alive(world: &World, ship: Entity) -> bool {
    world
        .get::<&ShipStatus>(ship)
        .map(|status| !status.destroyed)
        .unwrap_or(false)
}
