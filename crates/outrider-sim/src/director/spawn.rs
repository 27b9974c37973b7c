//! Anomaly spawn policy.
//!
//! A fixed-interval timer tops the sector up toward its tier's desired
//! anomaly count, filling each missing slot with an independent coin flip
//! so population drifts up rather than snapping. Site kinds are drawn from
//! per-tier weights and parameterized by the tier's danger level.

use std::f64::consts::TAU;

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use outrider_core::components::Anomaly;
use outrider_core::constants::{
    COMBAT_SITE_BASE_CREDITS, COMBAT_SITE_CREDITS_PER_DANGER, DATA_SITE_BASE_CREDITS,
    DATA_SITE_CREDITS_PER_DANGER, GAS_POCKET_AMOUNT_PER_DANGER, GAS_POCKET_BASE_AMOUNT,
    HACK_DIFFICULTY_BASE, HACK_DIFFICULTY_PER_DANGER, SPAWN_BOUNDS_MARGIN, SPAWN_FILL_CHANCE,
    SPAWN_INTERVAL_SECS, SPAWN_RADIUS_MAX, SPAWN_RADIUS_MIN,
};
use outrider_core::enums::{DifficultyTier, GasType, SiteKind, WaveTier};
use outrider_core::types::Position;

use crate::world;

use super::{EncounterDirector, SectorConfig};

impl EncounterDirector {
    /// Advance the spawn timer; run a fill pass each time the interval
    /// elapses.
    pub(crate) fn tick_spawn_policy(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        sector: &SectorConfig,
        dt: f64,
    ) {
        self.spawn_timer += dt;
        if self.spawn_timer < SPAWN_INTERVAL_SECS {
            return;
        }
        self.spawn_timer = 0.0;
        self.run_spawn_pass(world, rng, sector);
    }

    /// One fill pass: for each slot below the tier's desired count, flip a
    /// coin and spawn on success. Also runs immediately on sector entry.
    pub fn run_spawn_pass(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        sector: &SectorConfig,
    ) {
        let current = world
            .query::<&Anomaly>()
            .iter()
            .filter(|(_, a)| !a.cleared)
            .count();
        let desired = sector.tier.desired_anomalies();
        let mut spawned = 0usize;
        for _ in current..desired {
            if rng.gen_bool(SPAWN_FILL_CHANCE) {
                self.spawn_one(world, rng, sector);
                spawned += 1;
            }
        }
        if spawned > 0 {
            tracing::debug!(spawned, current, desired, "anomaly fill pass");
        }
    }

    fn spawn_one(&mut self, world: &mut World, rng: &mut ChaCha8Rng, sector: &SectorConfig) {
        let danger = sector.tier.danger_level();
        let kind = pick_site_kind(rng, sector.tier, danger);
        let pos = pick_position(rng, sector);
        let entity = world::spawn_anomaly(world, kind, danger, pos);
        tracing::debug!(?entity, kind = kind.label(), danger, "anomaly spawned");
    }
}

/// Weighted kind selection from the tier's weight table, parameterized by
/// the tier's danger level.
fn pick_site_kind(rng: &mut ChaCha8Rng, tier: DifficultyTier, danger: f64) -> SiteKind {
    let weights = tier.site_weights();
    let total: f64 = weights.iter().sum();
    let mut roll = rng.gen::<f64>() * total;
    let mut index = weights.len() - 1;
    for (i, w) in weights.iter().enumerate() {
        if roll < *w {
            index = i;
            break;
        }
        roll -= w;
    }

    match index {
        0 => SiteKind::Combat {
            tier: WaveTier::from_danger(danger),
            loot_credits: COMBAT_SITE_BASE_CREDITS + danger * COMBAT_SITE_CREDITS_PER_DANGER,
        },
        1 => SiteKind::Data {
            credits: DATA_SITE_BASE_CREDITS + danger * DATA_SITE_CREDITS_PER_DANGER,
            difficulty: HACK_DIFFICULTY_BASE + danger * HACK_DIFFICULTY_PER_DANGER,
        },
        2 => SiteKind::GasPocket {
            gas: GasType::from_danger(danger),
            amount: (GAS_POCKET_BASE_AMOUNT + danger * GAS_POCKET_AMOUNT_PER_DANGER)
                * (0.5 + rng.gen::<f64>()),
        },
        _ => SiteKind::Relic {
            tier: danger,
            difficulty: HACK_DIFFICULTY_BASE + danger * HACK_DIFFICULTY_PER_DANGER,
        },
    }
}

/// Random position on an annulus around the sector origin, clamped inside
/// the sector bounds.
fn pick_position(rng: &mut ChaCha8Rng, sector: &SectorConfig) -> Position {
    let angle = rng.gen_range(0.0..TAU);
    let radius = rng
        .gen_range(SPAWN_RADIUS_MIN..SPAWN_RADIUS_MAX)
        .min((sector.bounds_radius - SPAWN_BOUNDS_MARGIN).max(0.0));
    Position::new(radius * angle.cos(), radius * angle.sin())
}
