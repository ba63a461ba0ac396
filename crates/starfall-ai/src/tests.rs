#[cfg(test)]
mod tests {
    use glam::DVec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use starfall_core::components::*;
    use starfall_core::constants::*;
    use starfall_core::enums::*;
    use starfall_core::factions::FactionId;

    use crate::controller::{
        move_to_position, update, AiDecision, Brain, Controller, ShipContext,
    };
    use crate::fleet;
    use crate::geometry::{predict_intercept, solve_quadratic, QuadraticRoots};
    use crate::view::{SectorView, ShipInfo};

    // ---- Quadratic solver ----

    #[test]
    fn test_quadratic_all_near_zero() {
        assert_eq!(solve_quadratic(0.0, 0.0, 0.0), QuadraticRoots::One(0.0));
    }

    #[test]
    fn test_quadratic_constant_nonzero() {
        assert_eq!(solve_quadratic(0.0, 0.0, 5.0), QuadraticRoots::None);
    }

    #[test]
    fn test_quadratic_linear() {
        match solve_quadratic(0.0, 2.0, 6.0) {
            QuadraticRoots::One(t) => assert!((t - 3.0).abs() < 1e-12),
            other => panic!("expected one root, got {:?}", other),
        }
    }

    #[test]
    fn test_quadratic_negative_discriminant() {
        // t^2 + 1 = 0
        assert_eq!(solve_quadratic(1.0, 0.0, 1.0), QuadraticRoots::None);
    }

    #[test]
    fn test_quadratic_two_roots_match_formula() {
        // (t - 2)(t - 5) = t^2 - 7t + 10
        match solve_quadratic(1.0, -7.0, 10.0) {
            QuadraticRoots::Two(a, b) => {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                assert!((lo - 2.0).abs() < 1e-9);
                assert!((hi - 5.0).abs() < 1e-9);
            }
            other => panic!("expected two roots, got {:?}", other),
        }
    }

    #[test]
    fn test_quadratic_repeated_root() {
        // (t - 3)^2 = t^2 - 6t + 9: reported as Two with equal values.
        match solve_quadratic(1.0, -6.0, 9.0) {
            QuadraticRoots::Two(a, b) => {
                assert!((a - 3.0).abs() < 1e-9);
                assert!((b - 3.0).abs() < 1e-9);
            }
            other => panic!("expected two roots, got {:?}", other),
        }
    }

    // ---- Intercept prediction ----

    #[test]
    fn test_intercept_stationary_target() {
        // Stationary target: predicted point is the target itself.
        let hit = predict_intercept(DVec2::ZERO, DVec2::new(300.0, 0.0), DVec2::ZERO, 100.0)
            .expect("stationary target must be interceptable");
        assert!((hit - DVec2::new(300.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_intercept_two_positive_roots_takes_smaller() {
        // Slow projectile, target closing head-on: both roots positive.
        // a = 300, b = -4000, c = 10000 -> t = 10/3 (smaller) or 10.
        let target_pos = DVec2::new(100.0, 0.0);
        let target_vel = DVec2::new(-20.0, 0.0);
        let hit = predict_intercept(DVec2::ZERO, target_pos, target_vel, 10.0)
            .expect("closing target must be interceptable");
        let expected = target_pos + target_vel * (10.0 / 3.0);
        assert!((hit - expected).length() < 1e-9);
    }

    #[test]
    fn test_intercept_negative_root_falls_back_to_positive() {
        // Fast projectile chasing a receding target: roots straddle zero.
        let target_pos = DVec2::new(100.0, 0.0);
        let target_vel = DVec2::new(5.0, 0.0);
        let hit = predict_intercept(DVec2::ZERO, target_pos, target_vel, 10.0)
            .expect("faster projectile must catch the target");
        // t = 20: target at x=200, projectile covers 10 * 20 = 200.
        assert!((hit - DVec2::new(200.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_intercept_unreachable_target() {
        // Target outrunning the projectile directly away: both roots negative.
        let hit = predict_intercept(
            DVec2::ZERO,
            DVec2::new(100.0, 0.0),
            DVec2::new(20.0, 0.0),
            10.0,
        );
        assert_eq!(hit, None);
    }

    // ---- Context builders ----

    fn make_body(position: DVec2, heading: f64) -> RigidBody {
        RigidBody {
            position,
            heading,
            linear_velocity: DVec2::ZERO,
            angular_velocity: 0.0,
            bounding_radius: 10.0,
            thrust: 0.0,
            steer: 0.0,
        }
    }

    fn make_ctx<'a>(
        body: RigidBody,
        weapons: &'a [Weapon],
        addons: &'a [Addon],
        modules: &'a [f64],
    ) -> ShipContext<'a> {
        ShipContext {
            id: ShipId(0),
            faction: FactionId::Imperial,
            body,
            tower: body.position,
            order: OrderState::default(),
            energy: 100.0,
            weapons,
            addons,
            modules,
            ram: RamDrive::default(),
            engines_disrupted: false,
            obstacle_ahead: false,
            player_docking: false,
        }
    }

    fn hostile_info(id: u32, tower: DVec2) -> ShipInfo {
        ShipInfo {
            id: ShipId(id),
            faction: FactionId::Raider,
            tower,
            velocity: DVec2::ZERO,
            destroyed: false,
            terminating: false,
            dock: DockState::Undocked,
            jumping: false,
            has_tower: true,
        }
    }

    fn beam_turret(range: f64) -> Weapon {
        Weapon {
            mount: WeaponMount::Turret {
                traverse_rate: 100.0,
            },
            destroyed: false,
            projectile_speed: 0.0,
            range,
            aim: DVec2::X,
            cooldown_secs: 0.0,
            fire_interval_secs: 1.0,
            fire_cone: 0.2,
        }
    }

    // ---- Movement primitive ----

    #[test]
    fn test_move_to_position_monotonic_arrival() {
        // Ship at origin facing the goal; simple Euler integration using
        // the primitive's thrust command must close monotonically and
        // eventually report arrival.
        let goal = DVec2::new(1000.0, 0.0);
        let mut body = make_body(DVec2::ZERO, 0.0);
        let mut last_distance = body.position.distance(goal);
        let mut reached = false;

        for _ in 0..3000 {
            let ctx = make_ctx(body, &[], &[], &[]);
            let mut decision = AiDecision::default();
            reached = move_to_position(&ctx, goal, 60.0, None, &mut decision);
            if reached {
                break;
            }
            let accel = body.forward() * (decision.thrust * THRUST_ACCEL);
            body.linear_velocity += accel * DT;
            body.linear_velocity = body.linear_velocity.clamp_length_max(MAX_LINEAR_SPEED);
            body.position += body.linear_velocity * DT;

            let distance = body.position.distance(goal);
            assert!(
                distance < last_distance + 1e-9,
                "distance to goal must not increase"
            );
            last_distance = distance;
        }

        assert!(reached, "ship never arrived at the goal");
    }

    #[test]
    fn test_move_to_position_dead_band_holds_heading() {
        // Within 2 degrees of the goal direction: no steer command.
        let body = make_body(DVec2::ZERO, 0.01);
        let ctx = make_ctx(body, &[], &[], &[]);
        let mut decision = AiDecision::default();
        move_to_position(&ctx, DVec2::new(1000.0, 0.0), 60.0, None, &mut decision);
        assert_eq!(decision.steer, 0.0);
        assert_eq!(decision.thrust, 1.0);
    }

    #[test]
    fn test_move_to_position_course_correction_withholds_thrust() {
        // Close to the goal at a bad angle: no thrust, full steer.
        let body = make_body(DVec2::ZERO, std::f64::consts::FRAC_PI_2);
        let ctx = make_ctx(body, &[], &[], &[]);
        let mut decision = AiDecision::default();
        let reached =
            move_to_position(&ctx, DVec2::new(200.0, 0.0), 60.0, None, &mut decision);
        assert!(!reached);
        assert_eq!(decision.thrust, 0.0);
        assert!(decision.steer != 0.0);
    }

    #[test]
    fn test_move_to_position_obstacle_withholds_thrust() {
        let body = make_body(DVec2::ZERO, 0.0);
        let mut ctx = make_ctx(body, &[], &[], &[]);
        ctx.obstacle_ahead = true;
        let mut decision = AiDecision::default();
        move_to_position(&ctx, DVec2::new(1000.0, 0.0), 60.0, None, &mut decision);
        assert_eq!(decision.thrust, 0.0);
    }

    #[test]
    fn test_move_to_position_player_docking_stops() {
        let body = make_body(DVec2::ZERO, 0.0);
        let mut ctx = make_ctx(body, &[], &[], &[]);
        ctx.player_docking = true;
        let mut decision = AiDecision::default();
        decision.thrust = 1.0;
        let reached =
            move_to_position(&ctx, DVec2::new(10.0, 0.0), 60.0, None, &mut decision);
        assert!(!reached, "docking guard reports not-reached");
        assert_eq!(decision.thrust, 0.0);
    }

    #[test]
    fn test_move_to_position_arrival_heading() {
        // Arrived inside the radius: faces the supplied heading, not the goal.
        let body = make_body(DVec2::new(0.0, 0.0), 0.0);
        let ctx = make_ctx(body, &[], &[], &[]);
        let mut decision = AiDecision::default();
        let reached = move_to_position(
            &ctx,
            DVec2::new(10.0, 0.0),
            60.0,
            Some(DVec2::Y),
            &mut decision,
        );
        assert!(reached);
        assert_eq!(decision.thrust, 0.0);
        // Desired heading +Y from heading 0 => positive (counter-clockwise) steer.
        assert_eq!(decision.steer, 1.0);
    }

    // ---- Controller end-to-end ----

    #[test]
    fn test_acquires_nearest_eligible_target() {
        let mut controller = Controller::ai(EngagementStyle::Assault);
        let weapons = [beam_turret(500.0)];
        let ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &weapons, &[], &[]);

        let mut far = hostile_info(1, DVec2::new(900.0, 0.0));
        far.velocity = DVec2::ZERO;
        let near = hostile_info(2, DVec2::new(400.0, 0.0));
        let mut destroyed = hostile_info(3, DVec2::new(100.0, 0.0));
        destroyed.destroyed = true;
        let mut docked = hostile_info(4, DVec2::new(50.0, 0.0));
        docked.dock = DockState::Docked;
        let mut jumping = hostile_info(5, DVec2::new(60.0, 0.0));
        jumping.jumping = true;
        let mut towerless = hostile_info(6, DVec2::new(70.0, 0.0));
        towerless.has_tower = false;
        let friendly = ShipInfo {
            faction: FactionId::Colonial,
            ..hostile_info(7, DVec2::new(30.0, 0.0))
        };

        let view = SectorView {
            ships: vec![far, near, destroyed, docked, jumping, towerless, friendly],
        };

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let decision = update(&mut controller, &ctx, &view, &mut rng, DT);

        assert_eq!(controller.target(), Some(ShipId(2)));
        assert_eq!(decision.target_acquired, Some(ShipId(2)));
    }

    #[test]
    fn test_keeps_target_until_cooldown_expires() {
        let mut controller = Controller::ai(EngagementStyle::Assault);
        let weapons = [beam_turret(500.0)];
        let ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &weapons, &[], &[]);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let view = SectorView {
            ships: vec![hostile_info(1, DVec2::new(400.0, 0.0))],
        };
        update(&mut controller, &ctx, &view, &mut rng, DT);
        assert_eq!(controller.target(), Some(ShipId(1)));

        // A closer hostile appears, but the cooldown has not expired.
        let view = SectorView {
            ships: vec![
                hostile_info(1, DVec2::new(400.0, 0.0)),
                hostile_info(2, DVec2::new(100.0, 0.0)),
            ],
        };
        update(&mut controller, &ctx, &view, &mut rng, DT);
        assert_eq!(controller.target(), Some(ShipId(1)));
    }

    #[test]
    fn test_drops_invalid_target_immediately() {
        let mut controller = Controller::ai(EngagementStyle::Assault);
        let weapons = [beam_turret(500.0)];
        let ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &weapons, &[], &[]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let view = SectorView {
            ships: vec![hostile_info(1, DVec2::new(400.0, 0.0))],
        };
        update(&mut controller, &ctx, &view, &mut rng, DT);
        assert_eq!(controller.target(), Some(ShipId(1)));

        // Target destroyed mid-cooldown: rescans at once, finds the other.
        let mut dead = hostile_info(1, DVec2::new(400.0, 0.0));
        dead.destroyed = true;
        let view = SectorView {
            ships: vec![dead, hostile_info(2, DVec2::new(600.0, 0.0))],
        };
        update(&mut controller, &ctx, &view, &mut rng, DT);
        assert_eq!(controller.target(), Some(ShipId(2)));
    }

    #[test]
    fn test_fires_beam_in_range_and_cone() {
        let mut controller = Controller::ai(EngagementStyle::Assault);
        let weapons = [beam_turret(500.0)];
        let ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &weapons, &[], &[]);
        let view = SectorView {
            ships: vec![hostile_info(1, DVec2::new(300.0, 0.0))],
        };
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let decision = update(&mut controller, &ctx, &view, &mut rng, DT);

        let cmd = decision
            .weapons
            .iter()
            .find(|w| w.index == 0)
            .expect("weapon command expected");
        assert_eq!(cmd.fire_at, Some(ShipId(1)));
    }

    #[test]
    fn test_holds_fire_out_of_range() {
        let mut controller = Controller::ai(EngagementStyle::Assault);
        let weapons = [beam_turret(100.0)];
        let ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &weapons, &[], &[]);
        let view = SectorView {
            ships: vec![hostile_info(1, DVec2::new(300.0, 0.0))],
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let decision = update(&mut controller, &ctx, &view, &mut rng, DT);

        let cmd = decision.weapons.iter().find(|w| w.index == 0).unwrap();
        assert_eq!(cmd.fire_at, None);
    }

    #[test]
    fn test_range_slack_forgives_near_misses() {
        // Distance 105 against range 100: inside the forgiveness margin.
        let mut controller = Controller::ai(EngagementStyle::Assault);
        let weapons = [beam_turret(100.0)];
        let ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &weapons, &[], &[]);
        let view = SectorView {
            ships: vec![hostile_info(1, DVec2::new(105.0, 0.0))],
        };
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let decision = update(&mut controller, &ctx, &view, &mut rng, DT);

        let cmd = decision.weapons.iter().find(|w| w.index == 0).unwrap();
        assert_eq!(cmd.fire_at, Some(ShipId(1)));
    }

    #[test]
    fn test_unreachable_intercept_skips_weapon() {
        // Projectile slower than a receding target: no fire solution.
        let mut controller = Controller::ai(EngagementStyle::Assault);
        let mut weapon = beam_turret(10_000.0);
        weapon.projectile_speed = 10.0;
        let weapons = [weapon];
        let ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &weapons, &[], &[]);
        let mut runner = hostile_info(1, DVec2::new(300.0, 0.0));
        runner.velocity = DVec2::new(50.0, 0.0);
        let view = SectorView {
            ships: vec![runner],
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let decision = update(&mut controller, &ctx, &view, &mut rng, DT);

        let cmd = decision.weapons.iter().find(|w| w.index == 0).unwrap();
        assert_eq!(cmd.fire_at, None);
    }

    #[test]
    fn test_repair_energy_shortfall_diverts_power() {
        // Damaged ship, repair addon too expensive: weapons hold fire.
        let mut controller = Controller::ai(EngagementStyle::Assault);
        let weapons = [beam_turret(500.0)];
        let addons = [Addon {
            kind: AddonKind::Repair,
            destroyed: false,
            energy_cost: 500.0,
            cooldown_secs: 0.0,
            recharge_secs: 10.0,
            effect_range: 0.0,
        }];
        let modules = [0.3];
        let mut ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &weapons, &addons, &modules);
        ctx.energy = 10.0;
        let view = SectorView {
            ships: vec![hostile_info(1, DVec2::new(300.0, 0.0))],
        };
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        // First tick establishes the target; repair gating reads the
        // previous tick's combat state, so run two ticks.
        update(&mut controller, &ctx, &view, &mut rng, DT);
        let decision = update(&mut controller, &ctx, &view, &mut rng, DT);

        assert!(decision.addon_activations.is_empty());
        let cmd = decision.weapons.iter().find(|w| w.index == 0).unwrap();
        assert_eq!(cmd.fire_at, None, "power diverted to repair, hold fire");
    }

    #[test]
    fn test_repair_activates_when_affordable() {
        let mut controller = Controller::ai(EngagementStyle::Assault);
        let addons = [Addon {
            kind: AddonKind::Repair,
            destroyed: false,
            energy_cost: 20.0,
            cooldown_secs: 0.0,
            recharge_secs: 10.0,
            effect_range: 0.0,
        }];
        let modules = [0.8];
        let ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &[], &addons, &modules);
        let view = SectorView::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let decision = update(&mut controller, &ctx, &view, &mut rng, DT);

        // Out of combat, 0.8 < 1.0 qualifies.
        assert_eq!(decision.addon_activations, vec![0]);
    }

    #[test]
    fn test_repair_combat_threshold() {
        // In combat, 0.8 health does not qualify for repair.
        let mut controller = Controller::ai(EngagementStyle::Assault);
        let weapons = [beam_turret(500.0)];
        let addons = [Addon {
            kind: AddonKind::Repair,
            destroyed: false,
            energy_cost: 20.0,
            cooldown_secs: 0.0,
            recharge_secs: 10.0,
            effect_range: 0.0,
        }];
        let modules = [0.8];
        let ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &weapons, &addons, &modules);
        let view = SectorView {
            ships: vec![hostile_info(1, DVec2::new(300.0, 0.0))],
        };
        let mut rng = ChaCha8Rng::seed_from_u64(10);

        update(&mut controller, &ctx, &view, &mut rng, DT);
        let decision = update(&mut controller, &ctx, &view, &mut rng, DT);
        assert!(decision.addon_activations.is_empty());
    }

    #[test]
    fn test_alternator_ticks_on_own_cadence() {
        let mut controller = Controller::ai(EngagementStyle::Assault);
        let addons = [Addon {
            kind: AddonKind::StateAlternator,
            destroyed: false,
            energy_cost: 5.0,
            cooldown_secs: 0.0,
            recharge_secs: 0.0,
            effect_range: 0.0,
        }];
        let ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &[], &addons, &[]);
        let view = SectorView::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let decision = update(&mut controller, &ctx, &view, &mut rng, DT);
        assert_eq!(decision.addon_activations, vec![0]);

        // Immediately after firing, the cadence timer blocks reactivation.
        let decision = update(&mut controller, &ctx, &view, &mut rng, DT);
        assert!(decision.addon_activations.is_empty());
    }

    #[test]
    fn test_suspended_controller_does_not_move() {
        let mut controller = Controller::ai(EngagementStyle::Assault);
        controller.suspended = true;
        let weapons = [beam_turret(500.0)];
        let mut ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &weapons, &[], &[]);
        ctx.order.order = FleetOrder::Engage;
        let view = SectorView {
            ships: vec![hostile_info(1, DVec2::new(2000.0, 0.0))],
        };
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let decision = update(&mut controller, &ctx, &view, &mut rng, DT);

        assert_eq!(decision.thrust, 0.0);
        assert_eq!(decision.steer, 0.0);
        // Fire control still ran.
        assert!(!decision.weapons.is_empty());
    }

    #[test]
    fn test_assault_closes_and_kiter_orbits() {
        let weapons = [beam_turret(1000.0)];
        let view = SectorView {
            ships: vec![hostile_info(1, DVec2::new(2000.0, 0.0))],
        };
        let mut rng = ChaCha8Rng::seed_from_u64(13);

        // Assault: far outside 85% of range, thrust toward the target.
        let mut assault = Controller::ai(EngagementStyle::Assault);
        let mut ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &weapons, &[], &[]);
        ctx.order.order = FleetOrder::Engage;
        let decision = update(&mut assault, &ctx, &view, &mut rng, DT);
        assert_eq!(decision.thrust, 1.0);

        // Kiter at the target's range: still thrusts, chasing the orbit
        // point (zero goal radius never reports arrival).
        let mut kiter = Controller::ai(EngagementStyle::Kiter);
        let mut ctx = make_ctx(make_body(DVec2::new(1100.0, 0.0), 0.0), &weapons, &[], &[]);
        ctx.tower = ctx.body.position;
        ctx.order.order = FleetOrder::Engage;
        let decision = update(&mut kiter, &ctx, &view, &mut rng, DT);
        assert_eq!(decision.thrust, 1.0);
    }

    #[test]
    fn test_assault_triggers_ram_in_range() {
        let weapons = [beam_turret(1000.0)];
        let view = SectorView {
            ships: vec![hostile_info(1, DVec2::new(500.0, 0.0))],
        };
        let mut rng = ChaCha8Rng::seed_from_u64(14);

        let mut controller = Controller::ai(EngagementStyle::Assault);
        let mut ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &weapons, &[], &[]);
        ctx.faction = FactionId::Ravager;
        ctx.order.order = FleetOrder::Engage;
        ctx.ram = RamDrive {
            installed: true,
            cooldown_secs: 0.0,
            active_secs: 0.0,
        };
        // Target list must be hostile to Ravager.
        let view = SectorView {
            ships: view
                .ships
                .iter()
                .map(|s| ShipInfo {
                    faction: FactionId::Imperial,
                    ..*s
                })
                .collect(),
        };
        let decision = update(&mut controller, &ctx, &view, &mut rng, DT);
        assert!(decision.trigger_ram, "charged ram in range must trigger");
    }

    #[test]
    fn test_ram_blocked_by_disrupted_engines() {
        let weapons = [beam_turret(1000.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(15);

        let mut controller = Controller::ai(EngagementStyle::Assault);
        let mut ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &weapons, &[], &[]);
        ctx.faction = FactionId::Ravager;
        ctx.order.order = FleetOrder::Engage;
        ctx.engines_disrupted = true;
        ctx.ram = RamDrive {
            installed: true,
            cooldown_secs: 0.0,
            active_secs: 0.0,
        };
        let view = SectorView {
            ships: vec![ShipInfo {
                faction: FactionId::Imperial,
                ..hostile_info(1, DVec2::new(500.0, 0.0))
            }],
        };
        let decision = update(&mut controller, &ctx, &view, &mut rng, DT);
        assert!(!decision.trigger_ram);
    }

    #[test]
    fn test_patrol_dwell_before_reroute() {
        let mut controller = Controller::ai(EngagementStyle::Assault);
        let mut rng = ChaCha8Rng::seed_from_u64(16);
        let view = SectorView::default();

        // First patrol tick rolls a waypoint.
        let mut ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &[], &[], &[]);
        ctx.order.order = FleetOrder::Patrol;
        update(&mut controller, &ctx, &view, &mut rng, DT);

        let first = match &controller.brain {
            Brain::Ai(state) => state.patrol_point.expect("waypoint rolled"),
            Brain::Dormant => unreachable!(),
        };
        assert!(first.x.abs() <= PATROL_AREA_HALF_EXTENT);
        assert!(first.y.abs() <= PATROL_AREA_HALF_EXTENT);

        // Park the ship on the waypoint: dwell must hold for a while.
        let mut ctx = make_ctx(make_body(first, 0.0), &[], &[], &[]);
        ctx.tower = first;
        ctx.order.order = FleetOrder::Patrol;
        update(&mut controller, &ctx, &view, &mut rng, DT);
        let after_one = match &controller.brain {
            Brain::Ai(state) => state.patrol_point.unwrap(),
            Brain::Dormant => unreachable!(),
        };
        assert_eq!(after_one, first, "one tick of dwell must not re-route");

        // Exhaust the dwell timer.
        for _ in 0..((PATROL_DWELL_MAX_SECS / DT) as usize + 2) {
            update(&mut controller, &ctx, &view, &mut rng, DT);
        }
        let rerouted = match &controller.brain {
            Brain::Ai(state) => state.patrol_point.unwrap(),
            Brain::Dormant => unreachable!(),
        };
        assert_ne!(rerouted, first, "dwell expiry must pick a new waypoint");
    }

    #[test]
    fn test_particle_accelerator_counts_as_weapon() {
        let mut controller = Controller::ai(EngagementStyle::Assault);
        let addons = [Addon {
            kind: AddonKind::ParticleAccelerator,
            destroyed: false,
            energy_cost: 0.0,
            cooldown_secs: 5.0,
            recharge_secs: 5.0,
            effect_range: 250.0,
        }];
        let ctx = make_ctx(make_body(DVec2::ZERO, 0.0), &[], &addons, &[]);
        let view = SectorView {
            ships: vec![hostile_info(1, DVec2::new(300.0, 0.0))],
        };
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        update(&mut controller, &ctx, &view, &mut rng, DT);

        match &controller.brain {
            Brain::Ai(state) => {
                assert!(state.has_usable_weapons);
                assert!((state.min_weapon_range - 250.0).abs() < 1e-12);
            }
            Brain::Dormant => unreachable!(),
        }
    }

    // ---- Fleet order classification ----

    #[test]
    fn test_classify_enemy_presence() {
        let view = SectorView {
            ships: vec![hostile_info(1, DVec2::new(500.0, 0.0))],
        };
        assert_eq!(
            fleet::classify_enemy_presence(&view, FactionId::Imperial, DVec2::ZERO),
            EnemyPresence::InRange
        );
        assert_eq!(
            fleet::classify_enemy_presence(&view, FactionId::Imperial, DVec2::new(5000.0, 0.0)),
            EnemyPresence::OutOfRange
        );
        assert_eq!(
            fleet::classify_enemy_presence(&SectorView::default(), FactionId::Imperial, DVec2::ZERO),
            EnemyPresence::None
        );
    }

    #[test]
    fn test_order_matrix() {
        use fleet::{follower_order, leader_order};

        assert_eq!(leader_order(EnemyPresence::InRange), FleetOrder::Engage);
        assert_eq!(leader_order(EnemyPresence::OutOfRange), FleetOrder::Engage);
        assert_eq!(leader_order(EnemyPresence::None), FleetOrder::Patrol);

        assert_eq!(
            follower_order(EnemyPresence::None, DockState::Undocked, true),
            FleetOrder::StickToFormation
        );
        assert_eq!(
            follower_order(EnemyPresence::OutOfRange, DockState::Undocked, true),
            FleetOrder::StickToFormation
        );
        assert_eq!(
            follower_order(EnemyPresence::InRange, DockState::Undocked, true),
            FleetOrder::Engage
        );
        assert_eq!(
            follower_order(EnemyPresence::None, DockState::Docking, true),
            FleetOrder::Engage
        );
        assert_eq!(
            follower_order(EnemyPresence::None, DockState::Undocked, false),
            FleetOrder::Engage
        );
    }

    #[test]
    fn test_formation_slot_basis() {
        // Leader at origin facing +Y: right = +X, forward = +Y.
        let slot = fleet::formation_slot(DVec2::ZERO, DVec2::X, DVec2::Y, DVec2::new(100.0, 50.0));
        assert!((slot - DVec2::new(100.0, 50.0)).length() < 1e-12);
    }
}
