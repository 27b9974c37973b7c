//! Player commands, processed at tick boundaries.

use hecs::Entity;

use outrider_combat::tracking::WeaponSpec;
use outrider_core::enums::DifficultyTier;

/// Commands queued by the embedding layer. Invalid targets and duplicate
/// interactions are silent no-ops, never faults.
#[derive(Debug, Clone)]
pub enum PlayerCommand {
    /// Fire a weapon from `source` at `target`.
    FireWeapon {
        source: Entity,
        target: Entity,
        weapon: WeaponSpec,
    },
    /// Begin a combat site's wave encounter.
    ActivateSite { anomaly: Entity },
    /// Start a relic salvage channel.
    StartSalvage { anomaly: Entity, ship: Entity },
    /// Harvest gas from a pocket for this tick.
    HarvestGas { anomaly: Entity, ship: Entity },
    /// Adjust the weapons share of the player's power routing.
    SetPowerRouting { ship: Entity, weapons: f64 },
    /// Jump to a different sector.
    ChangeSector { tier: DifficultyTier },
}
