//! Housekeeping for per-ship resources: energy regeneration and the
//! weapon, addon, and ram-drive clocks.
//!
//! Runs before the controllers so a weapon whose cooldown expires this
//! tick is already fireable when fire control evaluates it.

use hecs::World;

use starfall_core::components::{AddonRack, EnergyPool, RamDrive, ShipStatus, WeaponRack};
use starfall_core::constants::DT;

pub fn run(world: &mut World) {
    for (_entity, (status, energy, weapons, addons, ram)) in world.query_mut::<(
        &ShipStatus,
        &mut EnergyPool,
        &mut WeaponRack,
        &mut AddonRack,
        &mut RamDrive,
    )>() {
        if status.destroyed {
            continue;
        }

        energy.stored = (energy.stored + energy.regen_per_sec * DT).min(energy.capacity);

        for weapon in &mut weapons.weapons {
            if weapon.cooldown_secs > 0.0 {
                weapon.cooldown_secs -= DT;
            }
        }
        for addon in &mut addons.addons {
            if addon.cooldown_secs > 0.0 {
                addon.cooldown_secs -= DT;
            }
        }

        if ram.active_secs > 0.0 {
            ram.active_secs -= DT;
        }
        if ram.cooldown_secs > 0.0 {
            ram.cooldown_secs -= DT;
        }
    }
}
