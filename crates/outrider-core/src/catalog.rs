//! Static catalogs: enemy class stats and trade-good market data.

use crate::enums::{EnemyClass, TradeGood};

/// Combat statistics for one enemy class.
#[derive(Debug, Clone, Copy)]
pub struct EnemyStats {
    pub shield: f64,
    pub armor: f64,
    pub hull: f64,
    pub speed: f64,
    pub signature: f64,
    pub base_bounty: f64,
}

impl EnemyClass {
    pub fn stats(&self) -> EnemyStats {
        match self {
            EnemyClass::Raider => EnemyStats {
                shield: 120.0,
                armor: 80.0,
                hull: 100.0,
                speed: 220.0,
                signature: 35.0,
                base_bounty: 150.0,
            },
            EnemyClass::Marauder => EnemyStats {
                shield: 250.0,
                armor: 200.0,
                hull: 220.0,
                speed: 160.0,
                signature: 60.0,
                base_bounty: 400.0,
            },
            EnemyClass::Sentinel => EnemyStats {
                shield: 300.0,
                armor: 450.0,
                hull: 350.0,
                speed: 110.0,
                signature: 110.0,
                base_bounty: 800.0,
            },
            EnemyClass::Dreadwing => EnemyStats {
                shield: 600.0,
                armor: 500.0,
                hull: 500.0,
                speed: 140.0,
                signature: 150.0,
                base_bounty: 2_000.0,
            },
        }
    }
}

/// Relic materials drawn (without replacement) for a salvage bundle.
pub const MATERIAL_CATALOG: [TradeGood; 4] = [
    TradeGood::SalvagedAlloy,
    TradeGood::PulseCapacitor,
    TradeGood::DriveFilament,
    TradeGood::AncientDataCore,
];

/// Rare material appended to high-tier bundles.
pub const BONUS_MATERIAL: TradeGood = TradeGood::ZeroPointResidue;

impl TradeGood {
    /// Market value per unit, in credits.
    pub fn unit_value(&self) -> f64 {
        match self {
            TradeGood::Hydrozine => 12.0,
            TradeGood::Cytoserin => 30.0,
            TradeGood::Mycite => 75.0,
            TradeGood::Xenoplasm => 180.0,
            TradeGood::SalvagedAlloy => 40.0,
            TradeGood::PulseCapacitor => 95.0,
            TradeGood::DriveFilament => 150.0,
            TradeGood::AncientDataCore => 320.0,
            TradeGood::ZeroPointResidue => 1_100.0,
        }
    }

    /// Cargo volume per unit, in m³.
    pub fn unit_volume(&self) -> f64 {
        match self {
            TradeGood::Hydrozine
            | TradeGood::Cytoserin
            | TradeGood::Mycite
            | TradeGood::Xenoplasm => 0.5,
            TradeGood::SalvagedAlloy => 2.0,
            TradeGood::PulseCapacitor => 1.0,
            TradeGood::DriveFilament => 1.5,
            TradeGood::AncientDataCore => 0.5,
            TradeGood::ZeroPointResidue => 0.25,
        }
    }
}
