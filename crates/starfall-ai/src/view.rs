//! Read-only sector view built once at the start of each tick.
//!
//! Controllers resolve target references against this snapshot rather
//! than against live world state, so a ship removed mid-frame can never
//! be targeted after removal.

use glam::DVec2;

use starfall_core::components::ShipId;
use starfall_core::enums::DockState;
use starfall_core::factions::FactionId;

/// One ship as visible to other controllers.
#[derive(Debug, Clone, Copy)]
pub struct ShipInfo {
    pub id: ShipId,
    pub faction: FactionId,
    /// Tower (command point) world position; all targeting math uses this.
    pub tower: DVec2,
    pub velocity: DVec2,
    pub destroyed: bool,
    pub terminating: bool,
    pub dock: DockState,
    pub jumping: bool,
    pub has_tower: bool,
}

impl ShipInfo {
    /// Whether this ship is a legal target for a ship of `attacker` faction.
    pub fn targetable_by(&self, attacker: FactionId) -> bool {
        attacker.is_hostile_to(self.faction)
            && self.has_tower
            && !self.destroyed
            && !self.terminating
            && self.dock == DockState::Undocked
            && !self.jumping
    }
}

/// Start-of-tick snapshot of every ship in the sector.
#[derive(Debug, Clone, Default)]
pub struct SectorView {
    pub ships: Vec<ShipInfo>,
}

impl SectorView {
    /// Look up a ship by id. `None` once the ship has left the sector.
    pub fn ship(&self, id: ShipId) -> Option<&ShipInfo> {
        self.ships.iter().find(|s| s.id == id)
    }

    /// Whether any ship hostile to `faction` exists in the sector.
    pub fn any_hostiles(&self, faction: FactionId) -> bool {
        self.ships
            .iter()
            .any(|s| !s.destroyed && !s.terminating && faction.is_hostile_to(s.faction))
    }
}
