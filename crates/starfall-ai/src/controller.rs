//! Per-ship combat and navigation controller.
//!
//! One `Controller` is owned by exactly one ship. Each tick the engine
//! calls [`update`] with a context describing the ship and the
//! start-of-tick [`SectorView`]; the controller mutates its own state and
//! returns an [`AiDecision`] for the engine to apply. The phase order is
//! fixed: addons, target acquisition, fire control, neutral movement,
//! order dispatch, timers, alternator.

use glam::DVec2;
use rand::Rng;

use starfall_core::commands::BrainSpec;
use starfall_core::components::{Addon, OrderState, RamDrive, RigidBody, ShipId, Weapon};
use starfall_core::constants::*;
use starfall_core::enums::{AddonKind, EngagementStyle, FleetOrder, WeaponMount};
use starfall_core::factions::FactionId;
use starfall_core::types::{heading_vec, signed_angle_to, wrap_angle};

use crate::geometry::predict_intercept;
use crate::view::SectorView;

/// The behavior unit attached to a ship.
#[derive(Debug, Clone)]
pub struct Controller {
    /// True while the ship is under external override (e.g. manual
    /// formation control); fire control still runs, movement does not.
    pub suspended: bool,
    pub brain: Brain,
}

/// What drives the ship.
#[derive(Debug, Clone)]
pub enum Brain {
    /// No decisions at all; the ship coasts.
    Dormant,
    /// Full AI behavior.
    Ai(AiState),
}

impl Controller {
    pub fn ai(style: EngagementStyle) -> Self {
        Self {
            suspended: false,
            brain: Brain::Ai(AiState::new(style)),
        }
    }

    pub fn dormant() -> Self {
        Self {
            suspended: false,
            brain: Brain::Dormant,
        }
    }

    pub fn from_spec(spec: BrainSpec) -> Self {
        match spec {
            BrainSpec::Dormant => Self::dormant(),
            BrainSpec::Ai { style } => Self::ai(style),
        }
    }

    /// Current AI target, if any.
    pub fn target(&self) -> Option<ShipId> {
        match &self.brain {
            Brain::Ai(state) => state.target,
            Brain::Dormant => None,
        }
    }
}

/// Mutable AI controller state, carried between ticks.
#[derive(Debug, Clone)]
pub struct AiState {
    pub style: EngagementStyle,
    /// Current target. Re-validated against the view every tick; a stale
    /// id is never fired upon or steered toward.
    pub target: Option<ShipId>,
    /// Seconds until the next target re-acquisition scan.
    pub reacquire_timer: f64,
    /// Clock driving the aim-accuracy oscillation.
    pub accuracy_secs: f64,
    /// Minimum effective weapon range observed this tick.
    pub min_weapon_range: f64,
    pub has_usable_weapons: bool,
    pub patrol_point: Option<DVec2>,
    /// Dwell remaining at the current patrol waypoint once reached.
    pub patrol_timer: f64,
    /// Seconds until the state alternator fires again.
    pub alternator_timer: f64,
    /// Energy is reserved for a pending repair this tick; weapons hold.
    pub divert_power: bool,
}

impl AiState {
    pub fn new(style: EngagementStyle) -> Self {
        Self {
            style,
            target: None,
            reacquire_timer: 0.0,
            accuracy_secs: 0.0,
            min_weapon_range: f64::INFINITY,
            has_usable_weapons: false,
            patrol_point: None,
            patrol_timer: 0.0,
            alternator_timer: 0.0,
            divert_power: false,
        }
    }
}

/// Everything the controller may read about its own ship this tick.
pub struct ShipContext<'a> {
    pub id: ShipId,
    pub faction: FactionId,
    pub body: RigidBody,
    /// Own tower world position.
    pub tower: DVec2,
    pub order: OrderState,
    pub energy: f64,
    pub weapons: &'a [Weapon],
    pub addons: &'a [Addon],
    /// Module health fractions.
    pub modules: &'a [f64],
    pub ram: RamDrive,
    pub engines_disrupted: bool,
    /// Result of this tick's forward obstacle probes (resolved by the
    /// engine against the physics collaborator).
    pub obstacle_ahead: bool,
    /// The player's ship is currently docking or docked.
    pub player_docking: bool,
}

/// New aim and fire result for one weapon.
#[derive(Debug, Clone, Copy)]
pub struct WeaponCommand {
    pub index: usize,
    pub aim: DVec2,
    /// Target the weapon fires at this tick, if the fire gate passed.
    pub fire_at: Option<ShipId>,
}

/// Output of one controller update, applied by the engine.
#[derive(Debug, Clone, Default)]
pub struct AiDecision {
    pub thrust: f64,
    pub steer: f64,
    pub weapons: Vec<WeaponCommand>,
    /// Addon indices to activate (energy is spent at apply time).
    pub addon_activations: Vec<usize>,
    pub trigger_ram: bool,
    /// Newly acquired target, for event emission.
    pub target_acquired: Option<ShipId>,
}

/// Run one controller tick.
pub fn update<R: Rng>(
    controller: &mut Controller,
    ctx: &ShipContext,
    view: &SectorView,
    rng: &mut R,
    dt: f64,
) -> AiDecision {
    let suspended = controller.suspended;
    match &mut controller.brain {
        Brain::Dormant => AiDecision::default(),
        Brain::Ai(state) => ai_update(state, suspended, ctx, view, rng, dt),
    }
}

fn ai_update<R: Rng>(
    state: &mut AiState,
    suspended: bool,
    ctx: &ShipContext,
    view: &SectorView,
    rng: &mut R,
    dt: f64,
) -> AiDecision {
    let mut decision = AiDecision::default();

    manage_addons(state, ctx, &mut decision);
    acquire_target(state, ctx, view, rng, &mut decision);
    fire_control(state, ctx, view, &mut decision, dt);

    decision.thrust = 0.0;
    decision.steer = 0.0;
    if !suspended {
        dispatch_order(state, ctx, view, rng, dt, &mut decision);
    }

    state.reacquire_timer -= dt;
    state.accuracy_secs += dt;

    tick_alternator(state, ctx, dt, &mut decision);

    decision
}

// ---- Phase 1: addons ----

fn manage_addons(state: &mut AiState, ctx: &ShipContext, decision: &mut AiDecision) {
    state.divert_power = false;

    // In combat the hull can degrade further before repair becomes worth
    // the energy; out of combat anything short of full health qualifies.
    let threshold = if state.target.is_some() {
        REPAIR_COMBAT_THRESHOLD
    } else {
        1.0
    };
    let needs_repair = ctx.modules.iter().any(|h| *h < threshold);

    for (index, addon) in ctx.addons.iter().enumerate() {
        if addon.destroyed {
            continue;
        }
        match addon.kind {
            AddonKind::Repair => {
                if needs_repair && addon.usable() {
                    if ctx.energy >= addon.energy_cost {
                        decision.addon_activations.push(index);
                    } else {
                        // Not enough stored energy: hold weapon fire this
                        // tick so the pool regenerates toward the repair.
                        state.divert_power = true;
                    }
                }
            }
            // Ticks on its own cadence, not in this pass.
            AddonKind::StateAlternator => {}
            _ => {
                if addon.usable() && ctx.energy >= addon.energy_cost {
                    decision.addon_activations.push(index);
                }
            }
        }
    }
}

// ---- Phase 2: target acquisition ----

fn acquire_target<R: Rng>(
    state: &mut AiState,
    ctx: &ShipContext,
    view: &SectorView,
    rng: &mut R,
    decision: &mut AiDecision,
) {
    let current_valid = state
        .target
        .and_then(|id| view.ship(id))
        .map(|s| !s.destroyed && !s.terminating)
        .unwrap_or(false);

    if current_valid && state.reacquire_timer > 0.0 {
        return;
    }

    let previous = state.target;
    let mut best: Option<(ShipId, f64)> = None;
    for candidate in &view.ships {
        if candidate.id == ctx.id || !candidate.targetable_by(ctx.faction) {
            continue;
        }
        let dist_sq = ctx.tower.distance_squared(candidate.tower);
        // Strict less-than: the first candidate found wins ties.
        if best.map_or(true, |(_, d)| dist_sq < d) {
            best = Some((candidate.id, dist_sq));
        }
    }

    state.target = best.map(|(id, _)| id);
    state.reacquire_timer = rng.gen_range(TARGET_REACQUIRE_MIN_SECS..TARGET_REACQUIRE_MAX_SECS);

    if let Some(target) = state.target {
        if previous != Some(target) {
            decision.target_acquired = Some(target);
        }
    }
}

// ---- Phase 3: fire control ----

/// Aim-accuracy blend factor: how far the aim point leans toward the
/// predicted intercept rather than the raw target position. Oscillates
/// between 0.6 and 0.9 over a 3-second cosine cycle.
fn accuracy_factor(elapsed_secs: f64) -> f64 {
    let mid = (ACCURACY_BLEND_MIN + ACCURACY_BLEND_MAX) * 0.5;
    let amp = (ACCURACY_BLEND_MAX - ACCURACY_BLEND_MIN) * 0.5;
    mid - amp * (std::f64::consts::TAU * elapsed_secs / ACCURACY_PERIOD_SECS).cos()
}

fn fire_control(
    state: &mut AiState,
    ctx: &ShipContext,
    view: &SectorView,
    decision: &mut AiDecision,
    dt: f64,
) {
    state.has_usable_weapons = false;
    state.min_weapon_range = f64::INFINITY;

    // A live particle accelerator counts as a fixed-range weapon for the
    // "can this ship fight at all" question.
    for addon in ctx.addons {
        if !addon.destroyed && addon.kind == AddonKind::ParticleAccelerator {
            state.has_usable_weapons = true;
            state.min_weapon_range = state.min_weapon_range.min(addon.effect_range);
        }
    }

    let target = state.target.and_then(|id| view.ship(id)).copied();
    let blend = accuracy_factor(state.accuracy_secs);

    for (index, weapon) in ctx.weapons.iter().enumerate() {
        if weapon.destroyed {
            continue;
        }
        state.has_usable_weapons = true;

        let Some(target) = target else {
            // Idle turrets track a far-off point ahead of the ship so the
            // mounts do not freeze mid-slew.
            if let WeaponMount::Turret { traverse_rate } = weapon.mount {
                let idle = ctx.tower + ctx.body.forward() * TURRET_IDLE_AIM_DISTANCE;
                let aim = slew_toward(weapon.aim, idle - ctx.tower, traverse_rate, dt);
                decision.weapons.push(WeaponCommand {
                    index,
                    aim,
                    fire_at: None,
                });
            }
            continue;
        };

        state.min_weapon_range = state.min_weapon_range.min(weapon.range);

        let predicted = if weapon.projectile_speed > 0.0 {
            predict_intercept(
                ctx.tower,
                target.tower,
                target.velocity,
                weapon.projectile_speed,
            )
        } else {
            // Hitscan: aim where the target is now.
            Some(target.tower)
        };

        let (aim_point, has_solution) = match predicted {
            Some(point) => (target.tower + (point - target.tower) * blend, true),
            None => (target.tower, false),
        };

        let desired = aim_point - ctx.tower;
        let aim = match weapon.mount {
            WeaponMount::Fixed => ctx.body.forward(),
            WeaponMount::Turret { traverse_rate } => {
                slew_toward(weapon.aim, desired, traverse_rate, dt)
            }
        };

        let in_range =
            ctx.tower.distance(target.tower) <= weapon.range + WEAPON_RANGE_SLACK;
        let aligned = aim_error(aim, desired) <= weapon.fire_cone;
        let fire = weapon.ready() && !state.divert_power && has_solution && in_range && aligned;

        decision.weapons.push(WeaponCommand {
            index,
            aim,
            fire_at: fire.then_some(target.id),
        });
    }
}

/// Rotate `current` toward the direction of `desired` by at most
/// `rate * dt` radians.
fn slew_toward(current: DVec2, desired: DVec2, rate: f64, dt: f64) -> DVec2 {
    if desired.length_squared() < f64::EPSILON {
        return current;
    }
    let desired_angle = desired.y.atan2(desired.x);
    if current.length_squared() < f64::EPSILON {
        return heading_vec(desired_angle);
    }
    let current_angle = current.y.atan2(current.x);
    let delta = wrap_angle(desired_angle - current_angle);
    let step = delta.clamp(-rate * dt, rate * dt);
    heading_vec(current_angle + step)
}

/// Unsigned angle between an aim direction and a desired direction.
fn aim_error(aim: DVec2, desired: DVec2) -> f64 {
    if desired.length_squared() < f64::EPSILON {
        return 0.0;
    }
    let aim_angle = aim.y.atan2(aim.x);
    signed_angle_to(aim_angle, desired).abs()
}

// ---- Phase 5: order dispatch ----

fn dispatch_order<R: Rng>(
    state: &mut AiState,
    ctx: &ShipContext,
    view: &SectorView,
    rng: &mut R,
    dt: f64,
    decision: &mut AiDecision,
) {
    match ctx.order.order {
        FleetOrder::StickToFormation => {
            move_to_position(
                ctx,
                ctx.order.formation_position,
                FORMATION_GOAL_RADIUS,
                Some(ctx.order.formation_heading),
                decision,
            );
        }
        FleetOrder::Patrol => handle_patrol(state, ctx, rng, dt, decision),
        FleetOrder::Engage => handle_engage(state, ctx, view, decision),
    }
}

fn handle_patrol<R: Rng>(
    state: &mut AiState,
    ctx: &ShipContext,
    rng: &mut R,
    dt: f64,
    decision: &mut AiDecision,
) {
    let goal = match state.patrol_point {
        Some(point) => point,
        None => {
            let point = roll_patrol_point(rng);
            state.patrol_point = Some(point);
            state.patrol_timer = rng.gen_range(PATROL_DWELL_MIN_SECS..PATROL_DWELL_MAX_SECS);
            point
        }
    };

    let reached = move_to_position(ctx, goal, FORMATION_GOAL_RADIUS, None, decision);

    // Arrival alone does not re-route; the dwell timer has to run out
    // first, which keeps ships from jittering at the goal boundary.
    if reached {
        state.patrol_timer -= dt;
        if state.patrol_timer <= 0.0 {
            state.patrol_point = Some(roll_patrol_point(rng));
            state.patrol_timer = rng.gen_range(PATROL_DWELL_MIN_SECS..PATROL_DWELL_MAX_SECS);
        }
    }
}

fn roll_patrol_point<R: Rng>(rng: &mut R) -> DVec2 {
    DVec2::new(
        rng.gen_range(-PATROL_AREA_HALF_EXTENT..PATROL_AREA_HALF_EXTENT),
        rng.gen_range(-PATROL_AREA_HALF_EXTENT..PATROL_AREA_HALF_EXTENT),
    )
}

fn handle_engage(
    state: &AiState,
    ctx: &ShipContext,
    view: &SectorView,
    decision: &mut AiDecision,
) {
    let Some(target) = state.target.and_then(|id| view.ship(id)) else {
        return;
    };

    let preferred_range = if state.min_weapon_range.is_finite() {
        state.min_weapon_range
    } else {
        0.0
    };

    match state.style {
        EngagementStyle::Assault => {
            let in_range = move_to_position(
                ctx,
                target.tower,
                preferred_range * ASSAULT_RANGE_FACTOR,
                None,
                decision,
            );
            if in_range
                && ctx.ram.charged()
                && ctx.faction.ramming_eligible()
                && !ctx.engines_disrupted
            {
                decision.trigger_ram = true;
            }
        }
        EngagementStyle::Kiter => {
            let to_target = target.tower - ctx.tower;
            let orbit_point = if to_target.length_squared() > f64::EPSILON {
                let dir = to_target.normalize();
                let perp = DVec2::new(dir.y, -dir.x);
                target.tower + perp * (preferred_range * KITER_ORBIT_FACTOR)
            } else {
                target.tower
            };
            // Zero goal radius: keep chasing the rotating orbit point
            // instead of stopping on it.
            move_to_position(ctx, orbit_point, 0.0, None, decision);
        }
    }
}

/// Steer and thrust toward `goal`. Returns true once within `radius`.
///
/// Thrust is withheld while an obstacle probe is hot, while a close-range
/// course correction is pending, or while the player's ship is docking.
/// Once arrived, `arrival_heading` (when given) replaces face-the-goal so
/// ships settle into formation facing the leader's heading.
pub fn move_to_position(
    ctx: &ShipContext,
    goal: DVec2,
    radius: f64,
    arrival_heading: Option<DVec2>,
    decision: &mut AiDecision,
) -> bool {
    if ctx.player_docking {
        decision.thrust = 0.0;
        decision.steer = 0.0;
        return false;
    }

    let to_goal = goal - ctx.body.position;
    let distance = to_goal.length();
    let reached = distance <= radius;

    let heading_error = signed_angle_to(ctx.body.heading, to_goal);
    let course_correction =
        distance < COURSE_CORRECTION_RANGE && heading_error.abs() >= COURSE_CORRECTION_ANGLE;

    decision.thrust = if ctx.obstacle_ahead || course_correction || reached {
        0.0
    } else {
        1.0
    };

    let desired = match arrival_heading {
        Some(heading) if reached => heading,
        _ => to_goal,
    };

    let theta = signed_angle_to(ctx.body.heading, desired);
    // The rotational controller is damped; commanding a turn while the
    // body already spins faster than the remaining error overshoots.
    if theta.abs() > STEER_DEAD_BAND && ctx.body.angular_velocity.abs() < theta.abs() {
        decision.steer = theta.signum();
    } else {
        decision.steer = 0.0;
    }

    reached
}

// ---- Phase 7: alternator ----

fn tick_alternator(state: &mut AiState, ctx: &ShipContext, dt: f64, decision: &mut AiDecision) {
    state.alternator_timer -= dt;
    if state.alternator_timer > 0.0 {
        return;
    }
    for (index, addon) in ctx.addons.iter().enumerate() {
        if addon.kind == AddonKind::StateAlternator
            && addon.usable()
            && ctx.energy >= addon.energy_cost
        {
            decision.addon_activations.push(index);
            state.alternator_timer = ALTERNATOR_PERIOD_SECS;
            break;
        }
    }
}
