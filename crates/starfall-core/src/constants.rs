//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Target acquisition ---

/// Minimum re-acquisition cooldown (seconds).
pub const TARGET_REACQUIRE_MIN_SECS: f64 = 3.5;

/// Maximum re-acquisition cooldown (seconds).
pub const TARGET_REACQUIRE_MAX_SECS: f64 = 5.0;

// --- Fire control ---

/// Lower bound of the aim-accuracy blend factor.
pub const ACCURACY_BLEND_MIN: f64 = 0.6;

/// Upper bound of the aim-accuracy blend factor.
pub const ACCURACY_BLEND_MAX: f64 = 0.9;

/// Period of the accuracy oscillation cosine cycle (seconds).
pub const ACCURACY_PERIOD_SECS: f64 = 3.0;

/// Forgiveness margin added to weapon range for the fire gate (units).
pub const WEAPON_RANGE_SLACK: f64 = 10.0;

/// Distance of the idle aim point turrets track when no target exists (units).
pub const TURRET_IDLE_AIM_DISTANCE: f64 = 100_000.0;

// --- Movement ---

/// Length of the forward obstacle probe rays (units).
pub const OBSTACLE_PROBE_LENGTH: f64 = 70.0;

/// Half-angle of the obstacle probe fan (radians, 30 degrees).
pub const OBSTACLE_PROBE_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// Range inside which a bad approach angle forces a course correction (units).
pub const COURSE_CORRECTION_RANGE: f64 = 300.0;

/// Heading error that triggers a course correction (radians, 30 degrees).
pub const COURSE_CORRECTION_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// Steering dead-band (radians, 2 degrees). Below this, hold heading.
pub const STEER_DEAD_BAND: f64 = 2.0 * std::f64::consts::PI / 180.0;

// --- Orders ---

/// Goal radius for formation-keeping and patrol movement (units).
pub const FORMATION_GOAL_RADIUS: f64 = 60.0;

/// Half-extent of the patrol waypoint square around the origin (units).
pub const PATROL_AREA_HALF_EXTENT: f64 = 2000.0;

/// Minimum dwell at a patrol waypoint before re-routing (seconds).
pub const PATROL_DWELL_MIN_SECS: f64 = 3.0;

/// Maximum dwell at a patrol waypoint before re-routing (seconds).
pub const PATROL_DWELL_MAX_SECS: f64 = 6.0;

/// Assault style closes to this fraction of its minimum weapon range.
pub const ASSAULT_RANGE_FACTOR: f64 = 0.85;

/// Kiter style orbits at this fraction of its minimum weapon range.
/// Tightened below 1.0 to counteract orbital drift from momentum.
pub const KITER_ORBIT_FACTOR: f64 = 0.90;

// --- Fleet command ---

/// Radius of the leader's hostile scan (units).
pub const FLEET_SCAN_RANGE: f64 = 1000.0;

// --- Reinforcements ---

/// Default cap on concurrently active fleet commands.
pub const MAX_ACTIVE_FLEETS: usize = 10;

/// Default stricter cap on active friendly/imperial fleet commands.
pub const MAX_FRIENDLY_FLEETS: usize = 8;

/// Minimum reinforcement countdown after a spawn (seconds).
pub const REINFORCEMENT_MIN_SECS: f64 = 10.0;

/// Maximum reinforcement countdown after a spawn (seconds).
pub const REINFORCEMENT_MAX_SECS: f64 = 15.0;

/// Distance from the sector origin at which reinforcements arrive.
pub const REINFORCEMENT_SPAWN_RADIUS: f64 = 2500.0;

// --- Abilities ---

/// Cadence of the quantum state alternator ability (seconds).
pub const ALTERNATOR_PERIOD_SECS: f64 = 4.0;

/// Duration of a ramming charge once triggered (seconds).
pub const RAM_ACTIVE_SECS: f64 = 3.0;

/// Ramming charge cooldown (seconds).
pub const RAM_RECHARGE_SECS: f64 = 20.0;

/// Thrust multiplier applied while a ramming charge is live.
pub const RAM_THRUST_MULT: f64 = 3.0;

/// Module health fraction below which repair is needed while in combat.
pub const REPAIR_COMBAT_THRESHOLD: f64 = 0.5;

// --- Physics stand-in ---

/// Forward acceleration at full thrust (units/s^2).
pub const THRUST_ACCEL: f64 = 60.0;

/// Maximum linear speed (units/s).
pub const MAX_LINEAR_SPEED: f64 = 120.0;

/// Linear drag coefficient (1/s).
pub const LINEAR_DRAG: f64 = 0.4;

/// Angular acceleration at full steer (rad/s^2).
pub const STEER_ACCEL: f64 = 2.0;

/// Angular damping coefficient (1/s).
pub const ANGULAR_DAMPING: f64 = 3.0;
