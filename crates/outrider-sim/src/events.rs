//! Events emitted by the simulation for UI, audio, and progression systems.
//!
//! A closed tagged union: every consumer dispatches exhaustively, there are
//! no free-form string topics.

use hecs::Entity;

use outrider_core::enums::{DamageLayer, DifficultyTier, TradeGood};

/// Payout attached to a completion event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reward {
    pub credits: u64,
    pub goods: Vec<(TradeGood, u32)>,
}

/// Simulation events, drained by the embedding layer after each tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// An attack connected and damage was applied.
    CombatHit {
        attacker: Entity,
        target: Entity,
        damage: f64,
        layer: DamageLayer,
        hit_chance: f64,
    },
    /// An attack was resolved and missed. No state changed.
    CombatMiss {
        attacker: Entity,
        target: Entity,
        hit_chance: f64,
    },
    /// An entity's defenses reached zero. Delivered exactly once, after
    /// the entity is fully dead and before it is despawned.
    EntityDestroyed { entity: Entity, bounty: f64 },
    /// A combat-site wave was cleared. Fires for every wave, including
    /// the final one just before `SiteCompleted`.
    WaveCleared {
        anomaly: Entity,
        wave: usize,
        total_waves: usize,
    },
    /// An anomaly paid out and is winding down.
    SiteCompleted { anomaly: Entity, reward: Reward },
    /// A salvage channel crossed its halfway point.
    SalvageHalfway { anomaly: Entity },
    /// A salvage channel aborted without reward.
    SalvageInterrupted {
        anomaly: Entity,
        reason: InterruptReason,
    },
    /// The active sector changed; in-flight encounter state was discarded.
    SectorChanged { tier: DifficultyTier },
}

/// Why a salvage channel aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptReason {
    OutOfRange,
    ShipLost,
    SiteLost,
}

impl Reward {
    /// Market value of the goods plus raw credits.
    pub fn total_value(&self) -> f64 {
        self.credits as f64
            + self
                .goods
                .iter()
                .map(|(g, q)| g.unit_value() * *q as f64)
                .sum::<f64>()
    }
}
