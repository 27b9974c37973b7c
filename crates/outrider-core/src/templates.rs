//! Wave templates: immutable per-tier combat-site configuration.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyClass, WaveTier};

/// One batch of enemies within a combat site.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WaveSpec {
    pub count: u32,
    pub enemy: EnemyClass,
    /// Pause before this wave spawns, once the previous wave is cleared.
    pub delay_secs: f64,
}

/// Ordered wave list plus reward multipliers for a combat site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveTemplate {
    pub waves: Vec<WaveSpec>,
    pub bounty_mult: f64,
    pub loot_mult: f64,
}

impl WaveTemplate {
    pub fn for_tier(tier: WaveTier) -> Self {
        match tier {
            WaveTier::Easy => Self {
                waves: vec![
                    WaveSpec {
                        count: 2,
                        enemy: EnemyClass::Raider,
                        delay_secs: 0.0,
                    },
                    WaveSpec {
                        count: 3,
                        enemy: EnemyClass::Raider,
                        delay_secs: 8.0,
                    },
                ],
                bounty_mult: 1.0,
                loot_mult: 1.0,
            },
            WaveTier::Normal => Self {
                waves: vec![
                    WaveSpec {
                        count: 3,
                        enemy: EnemyClass::Raider,
                        delay_secs: 0.0,
                    },
                    WaveSpec {
                        count: 2,
                        enemy: EnemyClass::Marauder,
                        delay_secs: 10.0,
                    },
                    WaveSpec {
                        count: 3,
                        enemy: EnemyClass::Marauder,
                        delay_secs: 12.0,
                    },
                ],
                bounty_mult: 1.2,
                loot_mult: 1.3,
            },
            WaveTier::Hard => Self {
                waves: vec![
                    WaveSpec {
                        count: 4,
                        enemy: EnemyClass::Marauder,
                        delay_secs: 0.0,
                    },
                    WaveSpec {
                        count: 3,
                        enemy: EnemyClass::Sentinel,
                        delay_secs: 12.0,
                    },
                    WaveSpec {
                        count: 4,
                        enemy: EnemyClass::Sentinel,
                        delay_secs: 15.0,
                    },
                ],
                bounty_mult: 1.5,
                loot_mult: 1.7,
            },
            WaveTier::Elite => Self {
                waves: vec![
                    WaveSpec {
                        count: 4,
                        enemy: EnemyClass::Sentinel,
                        delay_secs: 0.0,
                    },
                    WaveSpec {
                        count: 5,
                        enemy: EnemyClass::Sentinel,
                        delay_secs: 12.0,
                    },
                    WaveSpec {
                        count: 2,
                        enemy: EnemyClass::Dreadwing,
                        delay_secs: 18.0,
                    },
                ],
                bounty_mult: 2.0,
                loot_mult: 2.2,
            },
        }
    }

    /// Total enemies across all waves.
    pub fn total_enemies(&self) -> u32 {
        self.waves.iter().map(|w| w.count).sum()
    }
}
