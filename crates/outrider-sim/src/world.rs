//! Entity spawn factories.
//!
//! Creates the player ship, wave enemies, anomalies, and loot containers
//! with their component bundles. Encounter ownership is tracked by the
//! director's side-table, never on the entities themselves.

use hecs::{Entity, World};

use outrider_core::catalog::MATERIAL_CATALOG;
use outrider_core::components::*;
use outrider_core::constants::*;
use outrider_core::enums::{EnemyClass, SiteKind, TradeGood};
use outrider_core::error::DirectorError;
use outrider_core::templates::WaveTemplate;
use outrider_core::types::{Position, Velocity};

/// Pursuit order for a hostile ship. Sim-local component: it carries an
/// entity handle and so stays out of the core vocabulary crate.
#[derive(Debug, Clone, Copy)]
pub struct Pursuit {
    pub target: Entity,
}

/// Validate static encounter configuration. Called once at director
/// construction so a broken catalog fails fast instead of stalling a
/// wave mid-flight.
pub fn validate_config() -> Result<(), DirectorError> {
    use outrider_core::enums::WaveTier::*;
    for (tier, name) in [(Easy, "easy"), (Normal, "normal"), (Hard, "hard"), (Elite, "elite")] {
        if WaveTemplate::for_tier(tier).waves.is_empty() {
            return Err(DirectorError::EmptyWaveTemplate(name));
        }
    }
    if MATERIAL_CATALOG.is_empty() {
        return Err(DirectorError::EmptyMaterialCatalog);
    }
    Ok(())
}

/// Spawn the player's ship.
pub fn spawn_player(world: &mut World, pos: Position) -> Entity {
    world.spawn((
        PlayerShip,
        pos,
        Velocity::default(),
        Defenses::new(400.0, 300.0, 350.0),
        Signature { radius: 40.0 },
        CargoHold::default(),
        PowerRouting::default(),
        PilotTraits::default(),
    ))
}

/// Spawn one wave enemy with an extended aggro radius, pursuing `target`
/// when one exists.
pub fn spawn_enemy(
    world: &mut World,
    class: EnemyClass,
    pos: Position,
    bounty: f64,
    target: Option<Entity>,
) -> Entity {
    let stats = class.stats();
    let enemy = world.spawn((
        Hostile,
        EnemyShip {
            class,
            aggro_radius: WAVE_ENEMY_AGGRO_RADIUS,
        },
        pos,
        Velocity::default(),
        Defenses::new(stats.shield, stats.armor, stats.hull),
        Signature {
            radius: stats.signature,
        },
        Bounty { credits: bounty },
    ));
    if let Some(target) = target {
        // Cannot fail: the entity was just spawned.
        let _ = world.insert_one(enemy, Pursuit { target });
    }
    enemy
}

/// Spawn an anomaly site.
pub fn spawn_anomaly(world: &mut World, kind: SiteKind, danger: f64, pos: Position) -> Entity {
    world.spawn((
        Anomaly {
            kind,
            danger,
            cleared: false,
            hacked: false,
        },
        pos,
    ))
}

/// Spawn a loot container that expires after the standard loot lifetime.
pub fn spawn_loot(
    world: &mut World,
    pos: Position,
    name: &str,
    credits: u64,
    goods: Vec<(TradeGood, u32)>,
) -> Entity {
    world.spawn((
        LootContainer {
            name: name.to_string(),
            credits,
            goods,
            lifetime_secs: LOOT_LIFETIME_SECS,
        },
        pos,
        DespawnTimer {
            remaining_secs: LOOT_LIFETIME_SECS,
        },
    ))
}

/// Find the player ship, if one exists.
pub fn find_player(world: &World) -> Option<Entity> {
    let mut query = world.query::<&PlayerShip>();
    query.iter().next().map(|(e, _)| e)
}

/// Liveness check shared by combat and the director: the entity must still
/// exist, must not be marked destroyed, and any defenses must hold hull.
pub fn is_alive(world: &World, entity: Entity) -> bool {
    if !world.contains(entity) || world.get::<&Destroyed>(entity).is_ok() {
        return false;
    }
    match world.get::<&Defenses>(entity) {
        Ok(d) => d.is_alive(),
        Err(_) => true, // anomalies and loot have no defense pools
    }
}
