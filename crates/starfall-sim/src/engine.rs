//! Sector engine.
//!
//! `SectorEngine` owns the hecs ECS world, processes queued commands,
//! runs all systems at the fixed tick rate, and produces
//! `SectorSnapshot`s. Completely headless, enabling deterministic
//! testing.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starfall_core::commands::SectorCommand;
use starfall_core::components::{ShipId, ShipTag};
use starfall_core::enums::{EngagementStyle, SectorPhase};
use starfall_core::events::{CombatEvent, Notification};
use starfall_core::factions::FactionId;
use starfall_core::state::SectorSnapshot;
use starfall_core::types::SimTime;

use starfall_ai::controller::Controller;

use crate::control::{self, ControllerSlot};
use crate::fleet::FleetCommand;
use crate::physics;
use crate::sector_setup::{self, ShipParams};
use crate::systems;
use crate::systems::reinforcements::ReinforcementSchedule;

/// Configuration for starting a new sector.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
        }
    }
}

/// The sector engine. Owns the ECS world and all sim state.
pub struct SectorEngine {
    world: World,
    time: SimTime,
    phase: SectorPhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    next_ship_id: u32,
    command_queue: VecDeque<SectorCommand>,
    fleets: Vec<FleetCommand>,
    schedule: ReinforcementSchedule,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<CombatEvent>,
    notifications: Vec<Notification>,
}

impl SectorEngine {
    /// Create a new sector engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: SectorPhase::default(),
            time_scale: config.time_scale,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_ship_id: 0,
            command_queue: VecDeque::new(),
            fleets: Vec::new(),
            schedule: ReinforcementSchedule::default(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            notifications: Vec::new(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SectorCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SectorCommand>) {
        self.command_queue.extend(commands);
    }

    /// Spawn a single ship into the sector.
    pub fn spawn_ship(&mut self, params: &ShipParams) -> ShipId {
        let (_entity, id) = sector_setup::spawn_ship(&mut self.world, &mut self.next_ship_id, params);
        id
    }

    /// Spawn a fleet and register its command. Returns the leader's id.
    pub fn spawn_fleet(
        &mut self,
        faction: FactionId,
        ship_count: u32,
        style: EngagementStyle,
        center: DVec2,
        heading: f64,
    ) -> ShipId {
        let fleet = sector_setup::spawn_fleet(
            &mut self.world,
            &mut self.next_ship_id,
            faction,
            ship_count,
            style,
            center,
            heading,
        );
        let leader = fleet.leader_id;
        self.fleets.push(fleet);
        leader
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Order within the tick is fixed: staged controller swaps install
    /// first, then queued commands apply, then systems run. A swap queued
    /// during tick N is staged by N's command processing and installs at
    /// the top of tick N+1.
    pub fn tick(&mut self) -> SectorSnapshot {
        control::apply_pending_swaps(&mut self.world);
        self.process_commands();

        if self.phase == SectorPhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        let notifications = std::mem::take(&mut self.notifications);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.fleets,
            events,
            notifications,
        )
    }

    /// Get the current sector phase.
    pub fn phase(&self) -> SectorPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a mutable reference to the ECS world (for tests).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Get a read-only reference to the fleet commands.
    #[cfg(test)]
    pub fn fleets(&self) -> &[FleetCommand] {
        &self.fleets
    }

    /// Get a read-only reference to the reinforcement schedule.
    #[cfg(test)]
    pub fn schedule(&self) -> &ReinforcementSchedule {
        &self.schedule
    }

    /// Get a mutable reference to the reinforcement schedule (for tests).
    #[cfg(test)]
    pub fn schedule_mut(&mut self) -> &mut ReinforcementSchedule {
        &mut self.schedule
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: SectorCommand) {
        match command {
            SectorCommand::SuspendController { ship, on } => {
                if let Some(entity) = self.find_ship(ship) {
                    if let Ok(mut slot) = self.world.get::<&mut ControllerSlot>(entity) {
                        slot.active.suspended = on;
                    }
                }
            }
            SectorCommand::SwitchController { ship, brain } => {
                if let Some(entity) = self.find_ship(ship) {
                    if let Ok(mut slot) = self.world.get::<&mut ControllerSlot>(entity) {
                        // One pending slot; a newer request overwrites an
                        // uninstalled older one.
                        slot.pending = Some(Controller::from_spec(brain));
                    }
                }
            }
            SectorCommand::QueueFleet {
                friendly,
                ship_count,
                style,
            } => {
                self.schedule.queue(friendly, ship_count, style);
            }
            SectorCommand::Start => {
                if self.phase == SectorPhase::Idle {
                    self.phase = SectorPhase::Active;
                    self.time = SimTime::default();
                }
            }
            SectorCommand::Pause => {
                if self.phase == SectorPhase::Active {
                    self.phase = SectorPhase::Paused;
                }
            }
            SectorCommand::Resume => {
                if self.phase == SectorPhase::Paused {
                    self.phase = SectorPhase::Active;
                }
            }
            SectorCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
        }
    }

    fn find_ship(&self, ship: ShipId) -> Option<hecs::Entity> {
        self.world
            .query::<&ShipTag>()
            .iter()
            .find(|(_, tag)| tag.id == ship)
            .map(|(entity, _)| entity)
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Reinforcement arrivals
        systems::reinforcements::run(
            &mut self.world,
            &mut self.rng,
            &mut self.schedule,
            &mut self.fleets,
            &mut self.next_ship_id,
            &mut self.notifications,
        );
        // 2. Start-of-tick view shared by fleets and controllers
        let view = systems::ai_control::build_sector_view(&self.world);
        // 3. Fleet command (orders + formation slots)
        systems::fleet_command::run(
            &mut self.world,
            &mut self.fleets,
            &view,
            &mut self.notifications,
        );
        // 4. Resource clocks (energy, weapon/addon/ram cooldowns)
        systems::ship_systems::run(&mut self.world);
        // 5. Ship controllers (decide + apply)
        systems::ai_control::run(&mut self.world, &view, &mut self.rng, &mut self.events);
        // 6. Motion integration
        physics::integrate(&mut self.world);
        // 7. Cleanup (despawn destroyed)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}
