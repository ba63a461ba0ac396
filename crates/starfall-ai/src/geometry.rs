//! Quadratic solving and projectile intercept prediction.

use glam::DVec2;

/// Near-zero threshold for the degenerate-coefficient checks.
/// Deliberately the denormal floor rather than a scaled epsilon; the
/// original fire-control math compares against the float minimum and the
/// behavior is preserved as-is.
const COEFF_EPS: f64 = f64::MIN_POSITIVE;

/// Real roots of a quadratic, in no particular order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots {
    None,
    One(f64),
    Two(f64, f64),
}

/// Solve `a*t^2 + b*t + c = 0` over the reals.
///
/// Degenerate cases: with both `a` and `b` near zero the equation is
/// constant — solvable (root 0) only when `c` is near zero too. With only
/// `a` near zero it is linear with root `c / b`. A repeated root is
/// reported as `Two` with equal values.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> QuadraticRoots {
    if a.abs() < COEFF_EPS {
        if b.abs() < COEFF_EPS {
            if c.abs() < COEFF_EPS {
                return QuadraticRoots::One(0.0);
            }
            return QuadraticRoots::None;
        }
        return QuadraticRoots::One(c / b);
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return QuadraticRoots::None;
    }

    let sqrt_d = discriminant.sqrt();
    QuadraticRoots::Two((-b - sqrt_d) / (2.0 * a), (-b + sqrt_d) / (2.0 * a))
}

/// Predict where a constant-speed projectile fired from `shooter` meets a
/// target moving at constant velocity. Returns the world-space intercept
/// point, or `None` when the projectile can never catch the target.
///
/// Root selection: the smaller root wins when both are positive; a lone
/// positive root wins over a negative one; two non-positive roots mean no
/// solution.
pub fn predict_intercept(
    shooter: DVec2,
    target_pos: DVec2,
    target_vel: DVec2,
    projectile_speed: f64,
) -> Option<DVec2> {
    let to_target = target_pos - shooter;
    let a = target_vel.length_squared() - projectile_speed * projectile_speed;
    let b = 2.0 * target_vel.dot(to_target);
    let c = to_target.length_squared();

    let t = match solve_quadratic(a, b, c) {
        QuadraticRoots::None => return None,
        QuadraticRoots::One(t) => {
            if t < 0.0 {
                return None;
            }
            t
        }
        QuadraticRoots::Two(t0, t1) => {
            let (lo, hi) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            if lo >= 0.0 {
                lo
            } else if hi > 0.0 {
                hi
            } else {
                return None;
            }
        }
    };

    Some(target_pos + target_vel * t)
}
