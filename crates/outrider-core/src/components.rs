//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Logic lives in the sim crate's systems and the director.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyClass, SiteKind, TradeGood};

/// Layered defense pools. Damage depletes shield, then armor, then hull.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Defenses {
    pub shield: f64,
    pub shield_max: f64,
    pub armor: f64,
    pub armor_max: f64,
    pub hull: f64,
    pub hull_max: f64,
}

/// Effective targetability size (meters). Smaller = harder to hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Signature {
    pub radius: f64,
}

/// An anomaly site: a discoverable, interactable encounter in a sector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Anomaly {
    pub kind: SiteKind,
    /// Danger level in [0, 1] inherited from the sector tier at spawn.
    pub danger: f64,
    pub cleared: bool,
    pub hacked: bool,
}

/// Hostile ship profile for wave enemies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyShip {
    pub class: EnemyClass,
    /// Range at which this ship notices and pursues its target (meters).
    pub aggro_radius: f64,
}

/// Credit bounty paid to whoever destroys this entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounty {
    pub credits: f64,
}

/// Ship cargo hold holding tradeable goods.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CargoHold {
    /// (good, quantity) pairs; one entry per good.
    pub goods: Vec<(TradeGood, u32)>,
}

/// Player power-routing allocation. `weapons` in [0, 1] scales damage dealt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerRouting {
    pub weapons: f64,
}

/// Permanent pilot skill bonuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PilotTraits {
    /// Multiplicative hit-chance bonus (1.0 = none, 1.1 = +10%).
    pub gunnery_bonus: f64,
}

/// A floating loot container. Expires after `lifetime_secs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootContainer {
    pub name: String,
    pub credits: u64,
    pub goods: Vec<(TradeGood, u32)>,
    pub lifetime_secs: f64,
}

/// Countdown to removal, e.g. a completed site fading out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DespawnTimer {
    pub remaining_secs: f64,
}

/// Marks the player-controlled ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip;

/// Marks a hostile entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hostile;

/// Marks an entity whose defenses reached zero this tick.
/// Destroyed entities are announced once, then despawned by cleanup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Destroyed;

impl Defenses {
    /// Uniform pools at full charge.
    pub fn new(shield: f64, armor: f64, hull: f64) -> Self {
        Self {
            shield,
            shield_max: shield,
            armor,
            armor_max: armor,
            hull,
            hull_max: hull,
        }
    }

    /// Total remaining hit points across all layers.
    pub fn total(&self) -> f64 {
        self.shield + self.armor + self.hull
    }

    /// Alive while any hull remains.
    pub fn is_alive(&self) -> bool {
        self.hull > 0.0
    }
}

impl CargoHold {
    /// Add `qty` units of a good, merging with an existing stack.
    pub fn add(&mut self, good: TradeGood, qty: u32) {
        if qty == 0 {
            return;
        }
        match self.goods.iter_mut().find(|(g, _)| *g == good) {
            Some((_, have)) => *have += qty,
            None => self.goods.push((good, qty)),
        }
    }

    /// Units held of a good.
    pub fn quantity(&self, good: TradeGood) -> u32 {
        self.goods
            .iter()
            .find(|(g, _)| *g == good)
            .map(|(_, q)| *q)
            .unwrap_or(0)
    }

    /// Total volume occupied by the held goods, in m³.
    pub fn used_volume(&self) -> f64 {
        self.goods
            .iter()
            .map(|(g, q)| g.unit_volume() * f64::from(*q))
            .sum()
    }
}

impl Default for PowerRouting {
    fn default() -> Self {
        // Even three-way split: engines / shields / weapons.
        Self { weapons: 1.0 / 3.0 }
    }
}

impl Default for PilotTraits {
    fn default() -> Self {
        Self { gunnery_bonus: 1.0 }
    }
}
