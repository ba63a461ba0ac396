//! Fleet order classification.
//!
//! Pure helpers the fleet command system uses to turn a hostile scan into
//! per-ship orders and formation slots.

use glam::DVec2;

use starfall_core::constants::FLEET_SCAN_RANGE;
use starfall_core::enums::{DockState, EnemyPresence, FleetOrder};
use starfall_core::factions::FactionId;

use crate::view::SectorView;

/// Scan the sector for ships hostile to `faction` and classify them
/// relative to `scan_center` (the leader's tower).
pub fn classify_enemy_presence(
    view: &SectorView,
    faction: FactionId,
    scan_center: DVec2,
) -> EnemyPresence {
    let mut any = false;
    for ship in &view.ships {
        if ship.destroyed || ship.terminating || !faction.is_hostile_to(ship.faction) {
            continue;
        }
        any = true;
        if scan_center.distance(ship.tower) <= FLEET_SCAN_RANGE {
            return EnemyPresence::InRange;
        }
    }
    if any {
        EnemyPresence::OutOfRange
    } else {
        EnemyPresence::None
    }
}

/// The leader engages whenever hostiles exist anywhere in the sector.
pub fn leader_order(presence: EnemyPresence) -> FleetOrder {
    match presence {
        EnemyPresence::InRange | EnemyPresence::OutOfRange => FleetOrder::Engage,
        EnemyPresence::None => FleetOrder::Patrol,
    }
}

/// Followers hold formation until enemies close in or the leader berths;
/// factions without formation doctrine always engage.
pub fn follower_order(
    presence: EnemyPresence,
    leader_dock: DockState,
    uses_formations: bool,
) -> FleetOrder {
    if !uses_formations {
        return FleetOrder::Engage;
    }
    let leader_berthing = matches!(leader_dock, DockState::Docking | DockState::Docked);
    if presence == EnemyPresence::InRange || leader_berthing {
        FleetOrder::Engage
    } else {
        FleetOrder::StickToFormation
    }
}

/// World-space formation slot for a follower: the leader's position plus
/// the recorded offset expressed in the leader's current right/forward
/// basis.
pub fn formation_slot(
    leader_position: DVec2,
    leader_right: DVec2,
    leader_forward: DVec2,
    offset: DVec2,
) -> DVec2 {
    leader_position + leader_right * offset.x + leader_forward * offset.y
}
