//! Minimal physics collaborator: ray probes and kinematic integration.
//!
//! This module implements only the surface the controllers touch: a
//! segment-vs-ship ray query and a damped thrust/steer integrator.

use glam::DVec2;
use hecs::World;

use starfall_core::components::{RamDrive, RigidBody, ShipId, ShipStatus};
use starfall_core::constants::*;
use starfall_core::enums::DockState;

/// A ship as seen by the ray query.
#[derive(Debug, Clone, Copy)]
pub struct ObstacleBody {
    pub id: ShipId,
    pub position: DVec2,
    pub radius: f64,
}

/// Cast a segment from `origin` to `dest` and return the first ship hit,
/// skipping `ignore` (the probing ship itself). Hits are tested against
/// bounding circles; iteration order breaks ties.
pub fn raycast(
    bodies: &[ObstacleBody],
    origin: DVec2,
    dest: DVec2,
    ignore: ShipId,
) -> Option<ShipId> {
    let dir = dest - origin;
    let len_sq = dir.length_squared();

    for body in bodies {
        if body.id == ignore {
            continue;
        }
        let to_center = body.position - origin;
        // Closest point on the segment to the circle center.
        let t = if len_sq > f64::EPSILON {
            (to_center.dot(dir) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let closest = origin + dir * t;
        if closest.distance_squared(body.position) <= body.radius * body.radius {
            return Some(body.id);
        }
    }
    None
}

/// Integrate thrust/steer commands into motion for one tick.
///
/// Docked and docking ships are externally driven and skip integration;
/// destroyed ships drift. A live ramming charge overrides thrust with a
/// multiplied burn.
pub fn integrate(world: &mut World) {
    for (_entity, (body, status, ram)) in
        world.query_mut::<(&mut RigidBody, &ShipStatus, &RamDrive)>()
    {
        if status.dock != DockState::Undocked {
            continue;
        }

        let thrust = if status.engines_disrupted || status.destroyed {
            0.0
        } else if ram.active_secs > 0.0 {
            RAM_THRUST_MULT
        } else {
            body.thrust.clamp(0.0, 1.0)
        };

        let forward = body.forward();
        body.linear_velocity += forward * (THRUST_ACCEL * thrust * DT);
        body.linear_velocity *= 1.0 - LINEAR_DRAG * DT;
        let speed_cap = if ram.active_secs > 0.0 {
            MAX_LINEAR_SPEED * RAM_THRUST_MULT
        } else {
            MAX_LINEAR_SPEED
        };
        body.linear_velocity = body.linear_velocity.clamp_length_max(speed_cap);
        body.position += body.linear_velocity * DT;

        let steer = if status.destroyed {
            0.0
        } else {
            body.steer.clamp(-1.0, 1.0)
        };
        body.angular_velocity += steer * STEER_ACCEL * DT;
        body.angular_velocity *= 1.0 - ANGULAR_DAMPING * DT;
        body.heading = starfall_core::types::wrap_angle(body.heading + body.angular_velocity * DT);
    }
}
