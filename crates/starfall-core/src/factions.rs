//! Faction identities and the static relation table.
//!
//! The diplomacy model proper lives outside this core; controllers and
//! fleet commands only consume the hostility predicate and two per-faction
//! behavior flags.

use serde::{Deserialize, Serialize};

/// Faction identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactionId {
    /// Imperial navy — the player's side, formation-flying.
    Imperial,
    /// Colonial militia — allied with the Imperials.
    Colonial,
    /// Raider clans — loose packs, no formations.
    Raider,
    /// Ravager swarm — ramming-doctrine hostiles.
    Ravager,
}

impl FactionId {
    /// Whether ships of `self` treat ships of `other` as hostile.
    pub fn is_hostile_to(self, other: FactionId) -> bool {
        self.side() != other.side()
    }

    /// Whether this faction flies leader-relative formations.
    pub fn uses_formations(self) -> bool {
        matches!(self, FactionId::Imperial | FactionId::Colonial)
    }

    /// Whether this faction's doctrine permits ramming charges.
    pub fn ramming_eligible(self) -> bool {
        matches!(self, FactionId::Ravager)
    }

    /// Whether this faction is friendly to the player's faction.
    pub fn friendly_to_player(self) -> bool {
        self.side() == FactionId::Imperial.side()
    }

    fn side(self) -> u8 {
        match self {
            FactionId::Imperial | FactionId::Colonial => 0,
            FactionId::Raider | FactionId::Ravager => 1,
        }
    }
}
