//! Fundamental simulation types and angle helpers.
//!
//! All spatial math is 2D (the sector plane) using `glam::DVec2`.
//! Headings are angles in radians, 0 = +X, counter-clockwise positive.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Wrap an angle into (-pi, pi].
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(std::f64::consts::TAU);
    if wrapped > std::f64::consts::PI {
        wrapped - std::f64::consts::TAU
    } else {
        wrapped
    }
}

/// Unit vector for a heading angle.
pub fn heading_vec(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin())
}

/// Signed shortest rotation from heading `from` to the direction of `to`,
/// wrapped into (-pi, pi]. Returns 0.0 when `to` is degenerate.
pub fn signed_angle_to(from_heading: f64, to: DVec2) -> f64 {
    if to.length_squared() < f64::EPSILON {
        return 0.0;
    }
    wrap_angle(to.y.atan2(to.x) - from_heading)
}
