//! The Encounter Director.
//!
//! Owns every long-lived encounter registry: the spawn-policy timer, the
//! per-anomaly wave state machines, active salvage channels, gas-harvest
//! bookkeeping, the enemy-ownership side-table, and the completed-site
//! idempotence guard. Explicit construction, sector-change, and
//! maintenance lifecycle, with no ambient global state.

pub mod gas;
pub mod rewards;
pub mod salvage;
pub mod spawn;
pub mod waves;

use std::collections::{HashMap, HashSet};

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use outrider_core::constants::COMPLETED_SITES_CAP;
use outrider_core::enums::DifficultyTier;
use outrider_core::error::DirectorError;
use outrider_core::state::DirectorSave;

use crate::events::SimEvent;
use crate::world;

pub use salvage::SalvageOperation;
pub use waves::WaveState;

/// Static description of the active sector.
#[derive(Debug, Clone, Copy)]
pub struct SectorConfig {
    pub tier: DifficultyTier,
    /// Radius of the sector's playable area (meters).
    pub bounds_radius: f64,
}

impl Default for SectorConfig {
    fn default() -> Self {
        Self {
            tier: DifficultyTier::Contested,
            bounds_radius: 30_000.0,
        }
    }
}

/// Insertion-ordered set of anomaly ids that have already paid a reward.
/// FIFO eviction of the oldest half on overflow, deliberately not LRU.
#[derive(Debug, Default)]
pub struct CompletedSites {
    order: Vec<Entity>,
    members: HashSet<Entity>,
}

impl CompletedSites {
    pub fn contains(&self, id: Entity) -> bool {
        self.members.contains(&id)
    }

    /// Record a completion. Returns false if the id had already paid out.
    pub fn insert(&mut self, id: Entity) -> bool {
        if !self.members.insert(id) {
            return false;
        }
        if self.order.len() >= COMPLETED_SITES_CAP {
            for evicted in self.order.drain(..COMPLETED_SITES_CAP / 2) {
                self.members.remove(&evicted);
            }
        }
        self.order.push(id);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in insertion order, oldest first.
    pub fn ids(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order.iter().copied()
    }
}

/// Owns all anomaly-related simulation state.
pub struct EncounterDirector {
    spawn_timer: f64,
    waves: HashMap<Entity, WaveState>,
    salvages: HashMap<Entity, SalvageOperation>,
    /// Last ship seen harvesting each gas pocket. Informational only.
    last_harvester: HashMap<Entity, Entity>,
    /// Fractional extraction carried per (pocket, harvester) so whole
    /// units reach cargo even at tick-sized harvest calls.
    harvest_carry: HashMap<(Entity, Entity), f64>,
    /// Side-table: spawned enemy -> owning anomaly. Keeps enemy entities
    /// encounter-agnostic.
    enemy_owner: HashMap<Entity, Entity>,
    completed: CompletedSites,
}

impl EncounterDirector {
    /// Construct a director, validating static encounter configuration
    /// up front (fail fast rather than stalling a wave mid-flight).
    pub fn new() -> Result<Self, DirectorError> {
        world::validate_config()?;
        Ok(Self {
            spawn_timer: 0.0,
            waves: HashMap::new(),
            salvages: HashMap::new(),
            last_harvester: HashMap::new(),
            harvest_carry: HashMap::new(),
            enemy_owner: HashMap::new(),
            completed: CompletedSites::default(),
        })
    }

    /// Advance all encounter machinery by `dt` seconds.
    pub fn update(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<SimEvent>,
        sector: &SectorConfig,
        dt: f64,
    ) {
        self.tick_spawn_policy(world, rng, sector, dt);
        self.update_waves(world, rng, events, dt);
        self.update_salvages(world, rng, events, dt);
    }

    /// Handle a fully-dead entity. Must only be called once the entity's
    /// alive flag is final; the director never reprocesses a half-dead
    /// entity.
    pub fn on_entity_destroyed(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<SimEvent>,
        entity: Entity,
    ) {
        // An anomaly destroyed externally drops its machines unpaid.
        if let Some(state) = self.waves.remove(&entity) {
            for enemy in &state.spawned {
                self.enemy_owner.remove(enemy);
            }
            tracing::debug!(?entity, "combat site lost, wave state discarded");
        }
        self.salvages.remove(&entity);
        self.last_harvester.remove(&entity);
        self.harvest_carry
            .retain(|(a, s), _| *a != entity && *s != entity);

        self.note_enemy_destroyed(world, rng, events, entity);
    }

    /// Discard all in-flight encounter state and repopulate the new
    /// sector. CompletedSites and the spawn timer survive the jump.
    pub fn on_sector_change(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<SimEvent>,
        sector: &SectorConfig,
    ) {
        self.waves.clear();
        self.salvages.clear();
        self.last_harvester.clear();
        self.harvest_carry.clear();
        self.enemy_owner.clear();
        events.push(SimEvent::SectorChanged { tier: sector.tier });
        tracing::info!(tier = ?sector.tier, "sector change");
        self.run_spawn_pass(world, rng, sector);
    }

    /// Prune registries whose entities no longer exist.
    pub fn maintain(&mut self, world: &World) {
        let gone: Vec<Entity> = self
            .waves
            .keys()
            .copied()
            .filter(|a| !world.contains(*a))
            .collect();
        for anomaly in gone {
            if let Some(state) = self.waves.remove(&anomaly) {
                for enemy in &state.spawned {
                    self.enemy_owner.remove(enemy);
                }
            }
        }
        self.salvages.retain(|a, _| world.contains(*a));
        self.last_harvester.retain(|a, _| world.contains(*a));
        self.harvest_carry
            .retain(|(a, s), _| world.contains(*a) && world.contains(*s));
        self.enemy_owner.retain(|e, _| world.contains(*e));
    }

    /// Durable state: completed ids and the spawn timer. Wave, salvage,
    /// and harvest state is intentionally not persisted.
    pub fn save(&self) -> DirectorSave {
        DirectorSave {
            completed_sites: self.completed.ids().map(|e| e.to_bits().get()).collect(),
            spawn_timer: self.spawn_timer,
        }
    }

    /// Restore durable state from a save. Unparseable ids are skipped.
    pub fn restore(&mut self, save: &DirectorSave) {
        self.completed = CompletedSites::default();
        for bits in &save.completed_sites {
            if let Some(entity) = Entity::from_bits(*bits) {
                self.completed.insert(entity);
            }
        }
        self.spawn_timer = save.spawn_timer;
    }

    // --- Accessors ---

    pub fn wave_state(&self, anomaly: Entity) -> Option<&WaveState> {
        self.waves.get(&anomaly)
    }

    pub fn salvage(&self, anomaly: Entity) -> Option<&SalvageOperation> {
        self.salvages.get(&anomaly)
    }

    pub fn last_harvester(&self, anomaly: Entity) -> Option<Entity> {
        self.last_harvester.get(&anomaly).copied()
    }

    pub fn is_completed(&self, anomaly: Entity) -> bool {
        self.completed.contains(anomaly)
    }

    pub fn completed_sites(&self) -> &CompletedSites {
        &self.completed
    }

    #[cfg(test)]
    pub(crate) fn completed_sites_mut(&mut self) -> &mut CompletedSites {
        &mut self.completed
    }

    pub fn spawn_timer(&self) -> f64 {
        self.spawn_timer
    }

    pub fn active_wave_count(&self) -> usize {
        self.waves.len()
    }
}
