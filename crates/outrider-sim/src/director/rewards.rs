//! Site completion and reward generation.
//!
//! Every payout funnels through the completed-sites guard, so a site can
//! pay at most once no matter which path reaches it or how many times it
//! is reached.

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use outrider_core::catalog::{BONUS_MATERIAL, MATERIAL_CATALOG};
use outrider_core::components::{Anomaly, DespawnTimer};
use outrider_core::constants::{
    BONUS_MATERIAL_CHANCE, BONUS_MATERIAL_LOOT_MULT, LOOT_CREDIT_BONUS_MAX,
    RELIC_BONUS_CHANCE_PER_TIER, RELIC_BONUS_TIER_THRESHOLD, RELIC_BUNDLE_TIER_SCALE,
    RELIC_CREDIT_BONUS_FRACTION, RELIC_QTY_RANDOM_SPAN, RELIC_QTY_TIER_SCALE,
    SITE_DESPAWN_DELAY_SECS,
};
use outrider_core::enums::{SiteKind, TradeGood};
use outrider_core::types::Position;

use crate::events::{Reward, SimEvent};
use crate::world;

use super::EncounterDirector;

impl EncounterDirector {
    /// Pay out a cleared combat site: randomized credit bonus, a chance at
    /// the bonus material on high-multiplier sites, and a loot container
    /// at the site.
    pub(crate) fn complete_combat_site(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<SimEvent>,
        anomaly: Entity,
        loot_mult: f64,
    ) {
        if !self.completed.insert(anomaly) {
            return;
        }
        let loot_credits = match world.get::<&Anomaly>(anomaly).map(|a| a.kind) {
            Ok(SiteKind::Combat { loot_credits, .. }) => loot_credits,
            _ => return,
        };

        let credits =
            (loot_credits * loot_mult * (1.0 + rng.gen::<f64>() * LOOT_CREDIT_BONUS_MAX)).floor()
                as u64;
        let mut goods: Vec<(TradeGood, u32)> = Vec::new();
        if loot_mult >= BONUS_MATERIAL_LOOT_MULT && rng.gen_bool(BONUS_MATERIAL_CHANCE) {
            goods.push((BONUS_MATERIAL, 1));
        }

        if let Ok(pos) = world.get::<&Position>(anomaly).map(|p| *p) {
            world::spawn_loot(world, pos, "Wreckage cache", credits, goods.clone());
        }
        self.finish_site(world, anomaly, SITE_DESPAWN_DELAY_SECS, false);
        events.push(SimEvent::SiteCompleted {
            anomaly,
            reward: Reward { credits, goods },
        });
        tracing::info!(?anomaly, credits, "combat site completed");
    }

    /// Finish a successful hack or salvage. Data sites only mark and
    /// despawn; their access credits are granted by the hacking layer.
    /// Relic sites additionally drop a material bundle.
    pub fn on_hack_complete(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<SimEvent>,
        anomaly: Entity,
    ) {
        let kind = match world.get::<&Anomaly>(anomaly).map(|a| a.kind) {
            Ok(kind) => kind,
            Err(_) => return,
        };
        match kind {
            SiteKind::Data { .. } => {
                if !self.completed.insert(anomaly) {
                    return;
                }
                self.finish_site(world, anomaly, SITE_DESPAWN_DELAY_SECS, true);
                events.push(SimEvent::SiteCompleted {
                    anomaly,
                    reward: Reward::default(),
                });
                tracing::info!(?anomaly, "data site hacked");
            }
            SiteKind::Relic { tier, .. } => {
                if !self.completed.insert(anomaly) {
                    return;
                }
                let (credits, goods) = relic_bundle(rng, tier);
                if let Ok(pos) = world.get::<&Position>(anomaly).map(|p| *p) {
                    world::spawn_loot(world, pos, "Relic cache", credits, goods.clone());
                }
                self.finish_site(world, anomaly, SITE_DESPAWN_DELAY_SECS, true);
                events.push(SimEvent::SiteCompleted {
                    anomaly,
                    reward: Reward { credits, goods },
                });
                tracing::info!(?anomaly, credits, "relic site salvaged");
            }
            // Combat sites complete through wave clearing, gas pockets
            // through depletion.
            SiteKind::Combat { .. } | SiteKind::GasPocket { .. } => {}
        }
    }

    fn finish_site(&mut self, world: &mut World, anomaly: Entity, delay: f64, hacked: bool) {
        if let Ok(mut a) = world.get::<&mut Anomaly>(anomaly) {
            a.cleared = true;
            if hacked {
                a.hacked = true;
            }
        }
        let _ = world.insert_one(
            anomaly,
            DespawnTimer {
                remaining_secs: delay,
            },
        );
    }
}

/// Roll a relic material bundle: distinct catalog picks scaled by tier,
/// quantities with a random spread, a tier-gated shot at the rare bonus
/// material, and a credit bonus proportional to bundle value.
fn relic_bundle(rng: &mut ChaCha8Rng, tier: f64) -> (u64, Vec<(TradeGood, u32)>) {
    let count = 1 + (tier * RELIC_BUNDLE_TIER_SCALE + rng.gen::<f64>()).floor() as usize;
    let count = count.min(MATERIAL_CATALOG.len());

    let mut picks: Vec<TradeGood> = MATERIAL_CATALOG
        .choose_multiple(rng, count)
        .copied()
        .collect();
    if tier >= RELIC_BONUS_TIER_THRESHOLD && rng.gen::<f64>() < tier * RELIC_BONUS_CHANCE_PER_TIER {
        picks.push(BONUS_MATERIAL);
    }

    let mut goods = Vec::with_capacity(picks.len());
    let mut value = 0.0;
    for good in picks {
        let qty =
            1 + (tier * RELIC_QTY_TIER_SCALE + rng.gen::<f64>() * RELIC_QTY_RANDOM_SPAN).floor()
                as u32;
        value += good.unit_value() * f64::from(qty);
        goods.push((good, qty));
    }
    let credits = (value * RELIC_CREDIT_BONUS_FRACTION).floor() as u64;
    (credits, goods)
}
