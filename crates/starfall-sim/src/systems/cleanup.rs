//! Cleanup system: despawns destroyed ships.
//! Uses a pre-allocated buffer to avoid per-tick allocation. Entity
//! handles held by fleet commands go stale here and read as dead.

use hecs::{Entity, World};

use starfall_core::components::ShipStatus;

pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, status) in world.query_mut::<&ShipStatus>() {
        if status.destroyed {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
