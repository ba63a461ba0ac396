//! Controller ownership and the deferred-swap contract.

use hecs::World;

use starfall_ai::controller::Controller;

/// The one controller a ship runs, plus the one-slot pending replacement.
///
/// A ship has at most one active controller. Replacements are staged in
/// `pending` and consumed at the top of the next tick, never mid-tick, so
/// a swap requested during a tick cannot affect that tick's decisions.
pub struct ControllerSlot {
    pub active: Controller,
    pub pending: Option<Controller>,
}

impl ControllerSlot {
    pub fn new(active: Controller) -> Self {
        Self {
            active,
            pending: None,
        }
    }
}

/// Install all staged controller replacements. Runs first in the tick.
pub fn apply_pending_swaps(world: &mut World) {
    for (_entity, slot) in world.query_mut::<&mut ControllerSlot>() {
        if let Some(next) = slot.pending.take() {
            slot.active = next;
        }
    }
}
