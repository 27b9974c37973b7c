//! Gas pocket harvesting.
//!
//! Per-tick extraction clamped to the pocket's remaining volume. The
//! pocket drains by the unrounded amount while each harvester accrues a
//! fractional carry, so whole units reach cargo no matter how small the
//! per-call dt is. Depletion completes the site exactly once.

use hecs::{Entity, World};

use outrider_core::components::{Anomaly, CargoHold, DespawnTimer};
use outrider_core::constants::{GAS_DESPAWN_DELAY_SECS, GAS_HARVEST_RATE};
use outrider_core::enums::SiteKind;

use crate::events::{Reward, SimEvent};
use crate::world::is_alive;

use super::EncounterDirector;

impl EncounterDirector {
    /// Harvest from a gas pocket for `dt` seconds. Non-gas sites, dead
    /// ships, and depleted pockets are silent no-ops.
    pub fn harvest_gas(
        &mut self,
        world: &mut World,
        events: &mut Vec<SimEvent>,
        anomaly: Entity,
        ship: Entity,
        dt: f64,
    ) {
        if self.completed.contains(anomaly) {
            return;
        }
        if !is_alive(world, anomaly) || !is_alive(world, ship) {
            return;
        }

        let mut depleted = false;
        let mut extracted = 0.0;
        let mut good = None;
        match world.get::<&mut Anomaly>(anomaly) {
            Ok(mut a) => match a.kind {
                SiteKind::GasPocket { gas, amount } if amount > 0.0 => {
                    extracted = (GAS_HARVEST_RATE * dt).min(amount);
                    let remaining = amount - extracted;
                    a.kind = SiteKind::GasPocket {
                        gas,
                        amount: remaining,
                    };
                    good = Some(gas.trade_good());
                    depleted = remaining <= 0.0;
                }
                _ => return,
            },
            Err(_) => return,
        }

        // Sub-unit extractions accrue in the harvester's carry; cargo is
        // credited in whole units as they accumulate, with the remainder
        // rounded out when the pocket empties.
        let carry = self.harvest_carry.entry((anomaly, ship)).or_insert(0.0);
        *carry += extracted;
        let units = if depleted { carry.round() } else { carry.floor() };
        *carry -= units;

        if let (Some(good), Ok(mut hold)) = (good, world.get::<&mut CargoHold>(ship)) {
            hold.add(good, units as u32);
        }
        self.last_harvester.insert(anomaly, ship);

        if depleted {
            self.on_gas_depleted(world, events, anomaly);
        }
    }

    /// Complete a drained pocket: once per site, regardless of how many
    /// ships contributed.
    fn on_gas_depleted(
        &mut self,
        world: &mut World,
        events: &mut Vec<SimEvent>,
        anomaly: Entity,
    ) {
        if !self.completed.insert(anomaly) {
            return;
        }
        self.harvest_carry.retain(|(a, _), _| *a != anomaly);
        if let Ok(mut a) = world.get::<&mut Anomaly>(anomaly) {
            a.cleared = true;
        }
        let _ = world.insert_one(
            anomaly,
            DespawnTimer {
                remaining_secs: GAS_DESPAWN_DELAY_SECS,
            },
        );
        events.push(SimEvent::SiteCompleted {
            anomaly,
            reward: Reward::default(),
        });
        tracing::info!(?anomaly, "gas pocket depleted");
    }
}
