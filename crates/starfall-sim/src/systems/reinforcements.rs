//! Reinforcement scheduler: drains queued fleet specs into the sector on
//! a randomized countdown, subject to the active-fleet caps.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starfall_core::constants::*;
use starfall_core::enums::EngagementStyle;
use starfall_core::events::Notification;
use starfall_core::factions::FactionId;
use starfall_core::types::wrap_angle;

use crate::fleet::FleetCommand;
use crate::sector_setup;

/// One queued fleet waiting to arrive.
#[derive(Debug, Clone, Copy)]
pub struct FleetSpec {
    pub faction: FactionId,
    pub style: EngagementStyle,
    pub ship_count: u32,
}

/// Pending reinforcements plus the arrival clock.
#[derive(Debug)]
pub struct ReinforcementSchedule {
    pub friendly_pending: VecDeque<FleetSpec>,
    pub hostile_pending: VecDeque<FleetSpec>,
    /// Seconds until the next arrival attempt. Stays at or below zero
    /// while arrivals are blocked, so a freed cap admits a fleet on the
    /// next tick rather than after a fresh countdown.
    pub countdown_secs: f64,
    pub max_active_fleets: usize,
    pub max_friendly_fleets: usize,
}

impl Default for ReinforcementSchedule {
    fn default() -> Self {
        Self {
            friendly_pending: VecDeque::new(),
            hostile_pending: VecDeque::new(),
            countdown_secs: REINFORCEMENT_MAX_SECS,
            max_active_fleets: MAX_ACTIVE_FLEETS,
            max_friendly_fleets: MAX_FRIENDLY_FLEETS,
        }
    }
}

impl ReinforcementSchedule {
    /// Queue a fleet. Friendly fleets arrive as Colonial; hostile fleets
    /// arrive as Ravager rammers when assault-doctrine, Raider otherwise.
    pub fn queue(&mut self, friendly: bool, ship_count: u32, style: EngagementStyle) {
        if friendly {
            self.friendly_pending.push_back(FleetSpec {
                faction: FactionId::Colonial,
                style,
                ship_count,
            });
        } else {
            let faction = match style {
                EngagementStyle::Assault => FactionId::Ravager,
                EngagementStyle::Kiter => FactionId::Raider,
            };
            self.hostile_pending.push_back(FleetSpec {
                faction,
                style,
                ship_count,
            });
        }
    }
}

pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    schedule: &mut ReinforcementSchedule,
    fleets: &mut Vec<FleetCommand>,
    next_ship_id: &mut u32,
    notifications: &mut Vec<Notification>,
) {
    schedule.countdown_secs -= DT;

    while schedule.countdown_secs <= 0.0 {
        let active = fleets.iter().filter(|f| f.is_active(world)).count();
        if active >= schedule.max_active_fleets {
            break;
        }
        let friendly_active = fleets
            .iter()
            .filter(|f| f.is_active(world) && f.faction.friendly_to_player())
            .count();

        // Friendly arrivals take priority while under their own cap.
        let spec = if friendly_active < schedule.max_friendly_fleets {
            schedule
                .friendly_pending
                .pop_front()
                .or_else(|| schedule.hostile_pending.pop_front())
        } else {
            schedule.hostile_pending.pop_front()
        };
        let Some(spec) = spec else {
            break;
        };

        let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        let center = DVec2::new(angle.cos(), angle.sin()) * REINFORCEMENT_SPAWN_RADIUS;
        let heading = wrap_angle(angle + std::f64::consts::PI);

        let fleet = sector_setup::spawn_fleet(
            world,
            next_ship_id,
            spec.faction,
            spec.ship_count,
            spec.style,
            center,
            heading,
        );
        fleets.push(fleet);

        notifications.push(Notification::ReinforcementsArrived {
            hostile_to_player: !spec.faction.friendly_to_player(),
            ship_count: spec.ship_count,
        });

        schedule.countdown_secs = rng.gen_range(REINFORCEMENT_MIN_SECS..REINFORCEMENT_MAX_SECS);
    }
}
