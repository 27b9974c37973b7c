//! The simulation engine.
//!
//! Owns the world, the clock, the seeded RNG, the delayed-damage queue,
//! and the Encounter Director, and advances everything in a fixed tick
//! order. Commands enter at tick boundaries; events drain at tick end.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use outrider_core::components::{
    Anomaly, Bounty, Defenses, Destroyed, EnemyShip, LootContainer, PowerRouting,
};
use outrider_core::constants::DT;
use outrider_core::enums::DifficultyTier;
use outrider_core::error::DirectorError;
use outrider_core::types::{Position, SimTime};

use crate::combat;
use crate::commands::PlayerCommand;
use crate::director::{EncounterDirector, SectorConfig};
use crate::events::SimEvent;
use crate::schedule::DamageSchedule;
use crate::systems;
use crate::world;

/// Engine construction parameters.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Seed for the engine's deterministic RNG stream.
    pub seed: u64,
    pub sector: SectorConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            sector: SectorConfig::default(),
        }
    }
}

pub struct SimEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    sector: SectorConfig,
    player: Entity,
    commands: VecDeque<PlayerCommand>,
    events: Vec<SimEvent>,
    damage_schedule: DamageSchedule,
    director: EncounterDirector,
    despawn_buffer: Vec<Entity>,
}

impl SimEngine {
    /// Build an engine: spawn the player at the sector origin and run the
    /// initial anomaly fill pass.
    pub fn new(config: SimConfig) -> Result<Self, DirectorError> {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut director = EncounterDirector::new()?;

        let player = world::spawn_player(&mut world, Position::default());
        director.run_spawn_pass(&mut world, &mut rng, &config.sector);
        tracing::info!(seed = config.seed, tier = ?config.sector.tier, "engine initialized");

        Ok(Self {
            world,
            time: SimTime::default(),
            rng,
            sector: config.sector,
            player,
            commands: VecDeque::new(),
            events: Vec::new(),
            damage_schedule: DamageSchedule::default(),
            director,
            despawn_buffer: Vec::new(),
        })
    }

    /// Queue a command for the next tick.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.commands.push_back(command);
    }

    /// Advance the simulation one fixed step and drain this tick's events.
    pub fn tick(&mut self) -> Vec<SimEvent> {
        self.process_commands();
        self.damage_schedule
            .tick(&mut self.world, &mut self.events, DT);
        self.sweep_deaths();

        let sector = self.sector;
        self.director
            .update(&mut self.world, &mut self.rng, &mut self.events, &sector, DT);

        systems::movement::run(&mut self.world, DT);
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, DT);
        self.director.maintain(&self.world);

        self.time.advance();
        std::mem::take(&mut self.events)
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.commands.pop_front() {
            match command {
                PlayerCommand::FireWeapon {
                    source,
                    target,
                    weapon,
                } => combat::resolve_attack(
                    &mut self.world,
                    &mut self.damage_schedule,
                    &mut self.events,
                    &mut self.rng,
                    source,
                    target,
                    &weapon,
                ),
                PlayerCommand::ActivateSite { anomaly } => {
                    self.director
                        .activate_site(&mut self.world, &mut self.rng, anomaly)
                }
                PlayerCommand::StartSalvage { anomaly, ship } => {
                    self.director.start_salvage(&self.world, anomaly, ship)
                }
                PlayerCommand::HarvestGas { anomaly, ship } => self.director.harvest_gas(
                    &mut self.world,
                    &mut self.events,
                    anomaly,
                    ship,
                    DT,
                ),
                PlayerCommand::SetPowerRouting { ship, weapons } => {
                    if let Ok(mut routing) = self.world.get::<&mut PowerRouting>(ship) {
                        routing.weapons = weapons.clamp(0.0, 1.0);
                    }
                }
                PlayerCommand::ChangeSector { tier } => self.change_sector(tier),
            }
        }
    }

    /// Mark entities whose hull just reached zero, emit their destruction
    /// exactly once, and let the director settle wave bookkeeping before
    /// anything despawns.
    fn sweep_deaths(&mut self) {
        let mut dead = Vec::new();
        {
            let mut query = self.world.query::<&Defenses>().without::<&Destroyed>();
            for (entity, defenses) in query.iter() {
                if !defenses.is_alive() {
                    dead.push(entity);
                }
            }
        }
        for entity in dead {
            let bounty = self
                .world
                .get::<&Bounty>(entity)
                .map(|b| b.credits)
                .unwrap_or(0.0);
            // Cannot fail: the entity was seen alive in the sweep above.
            let _ = self.world.insert_one(entity, Destroyed);
            self.events.push(SimEvent::EntityDestroyed { entity, bounty });
            tracing::debug!(?entity, bounty, "entity destroyed");
            self.director.on_entity_destroyed(
                &mut self.world,
                &mut self.rng,
                &mut self.events,
                entity,
            );
        }
    }

    /// Jump to another sector: old-sector anomalies, hostiles, and loot do
    /// not travel, and the director repopulates the new sector.
    fn change_sector(&mut self, tier: DifficultyTier) {
        self.sector.tier = tier;

        self.despawn_buffer.clear();
        for (entity, _) in self.world.query::<&Anomaly>().iter() {
            self.despawn_buffer.push(entity);
        }
        for (entity, _) in self.world.query::<&EnemyShip>().iter() {
            self.despawn_buffer.push(entity);
        }
        for (entity, _) in self.world.query::<&LootContainer>().iter() {
            self.despawn_buffer.push(entity);
        }
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }

        let sector = self.sector;
        self.director
            .on_sector_change(&mut self.world, &mut self.rng, &mut self.events, &sector);
    }

    // --- Accessors for the embedding layer and tests ---

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn sector(&self) -> SectorConfig {
        self.sector
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn director(&self) -> &EncounterDirector {
        &self.director
    }

    pub fn director_mut(&mut self) -> &mut EncounterDirector {
        &mut self.director
    }

    pub fn pending_damage(&self) -> usize {
        self.damage_schedule.len()
    }
}
