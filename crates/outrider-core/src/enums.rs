//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Sector difficulty tier, driving anomaly population and danger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    /// Core hub sector, nearly safe.
    #[default]
    Hub,
    Safe,
    Contested,
    Dangerous,
    Deadly,
}

/// Category of a discoverable anomaly site.
///
/// Carries the type-specific parameters rolled at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SiteKind {
    /// Multi-wave combat encounter.
    Combat { tier: WaveTier, loot_credits: f64 },
    /// Hackable data cache paying credits.
    Data { credits: f64, difficulty: f64 },
    /// Hackable relic paying salvage materials instead of credits.
    Relic { tier: f64, difficulty: f64 },
    /// Harvestable gas cloud.
    GasPocket { gas: GasType, amount: f64 },
}

/// Combat-site wave tier, derived from danger level at spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaveTier {
    #[default]
    Easy,
    Normal,
    Hard,
    Elite,
}

/// Harvestable gas species, ordered by rarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GasType {
    Hydrozine,
    Cytoserin,
    Mycite,
    Xenoplasm,
}

/// Hostile ship class spawned by combat sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyClass {
    /// Light, fast, low bounty.
    Raider,
    /// Mid-line brawler.
    Marauder,
    /// Heavy escort with thick armor.
    Sentinel,
    /// Elite command ship.
    Dreadwing,
}

/// Tradeable goods carried in cargo holds and loot containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeGood {
    // Gases
    Hydrozine,
    Cytoserin,
    Mycite,
    Xenoplasm,
    // Salvage materials
    SalvagedAlloy,
    PulseCapacitor,
    DriveFilament,
    AncientDataCore,
    /// Rare bonus material from high-tier relics and rich combat sites.
    ZeroPointResidue,
}

/// Defense layer that absorbed a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageLayer {
    Shield,
    Armor,
    Hull,
}

impl DifficultyTier {
    /// Desired anomaly population for a sector of this tier.
    pub fn desired_anomalies(&self) -> usize {
        match self {
            DifficultyTier::Hub => 1,
            DifficultyTier::Safe => 2,
            DifficultyTier::Contested => 3,
            DifficultyTier::Dangerous => 4,
            DifficultyTier::Deadly => 5,
        }
    }

    /// Continuous danger level in [0, 1] for reward and enemy scaling.
    pub fn danger_level(&self) -> f64 {
        match self {
            DifficultyTier::Hub => 0.1,
            DifficultyTier::Safe => 0.3,
            DifficultyTier::Contested => 0.5,
            DifficultyTier::Dangerous => 0.75,
            DifficultyTier::Deadly => 0.95,
        }
    }

    /// Spawn weights for (combat, data, gas, relic) sites.
    /// Need not sum to 1; the spawn policy normalizes.
    pub fn site_weights(&self) -> [f64; 4] {
        match self {
            DifficultyTier::Hub => [0.1, 0.4, 0.4, 0.1],
            DifficultyTier::Safe => [0.25, 0.3, 0.3, 0.15],
            DifficultyTier::Contested => [0.4, 0.25, 0.2, 0.15],
            DifficultyTier::Dangerous => [0.5, 0.2, 0.1, 0.2],
            DifficultyTier::Deadly => [0.6, 0.1, 0.05, 0.25],
        }
    }
}

impl WaveTier {
    /// Map a continuous danger level onto a wave tier.
    pub fn from_danger(danger: f64) -> Self {
        if danger >= WAVE_TIER_ELITE {
            WaveTier::Elite
        } else if danger >= WAVE_TIER_HARD {
            WaveTier::Hard
        } else if danger >= WAVE_TIER_NORMAL {
            WaveTier::Normal
        } else {
            WaveTier::Easy
        }
    }
}

impl GasType {
    /// Gas species for a danger level. Richer sectors hold rarer gas.
    pub fn from_danger(danger: f64) -> Self {
        let idx = (danger * 4.0).floor().min(3.0) as usize;
        [
            GasType::Hydrozine,
            GasType::Cytoserin,
            GasType::Mycite,
            GasType::Xenoplasm,
        ][idx]
    }

    /// Cargo good produced by harvesting this gas.
    pub fn trade_good(&self) -> TradeGood {
        match self {
            GasType::Hydrozine => TradeGood::Hydrozine,
            GasType::Cytoserin => TradeGood::Cytoserin,
            GasType::Mycite => TradeGood::Mycite,
            GasType::Xenoplasm => TradeGood::Xenoplasm,
        }
    }
}

impl SiteKind {
    /// Short label for logging and UI.
    pub fn label(&self) -> &'static str {
        match self {
            SiteKind::Combat { .. } => "combat site",
            SiteKind::Data { .. } => "data site",
            SiteKind::Relic { .. } => "relic site",
            SiteKind::GasPocket { .. } => "gas pocket",
        }
    }
}
