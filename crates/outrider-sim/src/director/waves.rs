//! Combat-site wave encounters.
//!
//! Each activated combat site runs a per-site state machine: spawn a wave,
//! count its enemies down through the ownership side-table, wait out the
//! next wave's delay, repeat. Clearing the final wave pays the site out
//! through the completion guard.

use std::collections::HashSet;
use std::f64::consts::TAU;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use outrider_core::components::Anomaly;
use outrider_core::constants::{
    WAVE_SPAWN_ANGLE_JITTER, WAVE_SPAWN_RADIUS_MAX, WAVE_SPAWN_RADIUS_MIN,
};
use outrider_core::enums::SiteKind;
use outrider_core::templates::WaveTemplate;
use outrider_core::types::Position;

use crate::events::SimEvent;
use crate::world::{self, is_alive};

use super::EncounterDirector;

/// Per-site wave progression.
#[derive(Debug)]
pub struct WaveState {
    /// Index into the template's wave list.
    pub current_wave: usize,
    pub template: WaveTemplate,
    /// Live enemies of the current wave. Ids are removed as their deaths
    /// are processed, so a stale id can never decrement twice.
    pub spawned: HashSet<Entity>,
    pub remaining: u32,
    pub wait_timer: f64,
    pub waiting: bool,
    pub all_done: bool,
}

impl EncounterDirector {
    /// Activate a combat site, spawning its first wave immediately.
    /// Already-active, already-completed, or non-combat sites are no-ops.
    pub fn activate_site(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        anomaly: Entity,
    ) {
        if self.waves.contains_key(&anomaly) || self.completed.contains(anomaly) {
            return;
        }
        if !is_alive(world, anomaly) {
            return;
        }
        let tier = match world.get::<&Anomaly>(anomaly).map(|a| a.kind) {
            Ok(SiteKind::Combat { tier, .. }) => tier,
            _ => return,
        };

        let mut state = WaveState {
            current_wave: 0,
            template: WaveTemplate::for_tier(tier),
            spawned: HashSet::new(),
            remaining: 0,
            wait_timer: 0.0,
            waiting: false,
            all_done: false,
        };
        self.spawn_wave(world, rng, anomaly, &mut state);
        tracing::debug!(
            ?anomaly,
            ?tier,
            enemies = state.remaining,
            "combat site activated"
        );
        self.waves.insert(anomaly, state);
    }

    /// Spawn the current wave around the anomaly: evenly spread angles with
    /// jitter, at a randomized standoff radius.
    fn spawn_wave(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        anomaly: Entity,
        state: &mut WaveState,
    ) {
        let spec = state.template.waves[state.current_wave];
        let center = match world.get::<&Position>(anomaly) {
            Ok(p) => *p,
            Err(_) => return,
        };
        let target = world::find_player(world);

        let stats = spec.enemy.stats();
        let bounty = stats.base_bounty * state.template.bounty_mult;
        for i in 0..spec.count {
            let angle = i as f64 * TAU / spec.count as f64
                + rng.gen_range(-WAVE_SPAWN_ANGLE_JITTER..WAVE_SPAWN_ANGLE_JITTER);
            let radius = rng.gen_range(WAVE_SPAWN_RADIUS_MIN..WAVE_SPAWN_RADIUS_MAX);
            let pos = Position::new(
                center.x() + radius * angle.cos(),
                center.y() + radius * angle.sin(),
            );
            let enemy = world::spawn_enemy(world, spec.enemy, pos, bounty, target);
            state.spawned.insert(enemy);
            self.enemy_owner.insert(enemy, anomaly);
        }
        state.remaining += spec.count;
    }

    /// Credit a destroyed enemy against its owning wave. Unknown or
    /// already-processed ids are ignored, so `remaining` can never go
    /// negative.
    pub(crate) fn note_enemy_destroyed(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<SimEvent>,
        enemy: Entity,
    ) {
        let anomaly = match self.enemy_owner.remove(&enemy) {
            Some(a) => a,
            None => return,
        };
        let state = match self.waves.get_mut(&anomaly) {
            Some(s) => s,
            None => return,
        };
        if !state.spawned.remove(&enemy) {
            return;
        }
        state.remaining = state.remaining.saturating_sub(1);
        if state.remaining > 0 {
            return;
        }

        let total_waves = state.template.waves.len();
        if state.current_wave + 1 < total_waves {
            state.waiting = true;
            state.wait_timer = 0.0;
            events.push(SimEvent::WaveCleared {
                anomaly,
                wave: state.current_wave,
                total_waves,
            });
            tracing::debug!(?anomaly, wave = state.current_wave, "wave cleared");
        } else {
            state.all_done = true;
            events.push(SimEvent::WaveCleared {
                anomaly,
                wave: state.current_wave,
                total_waves,
            });
            let loot_mult = state.template.loot_mult;
            self.waves.remove(&anomaly);
            self.complete_combat_site(world, rng, events, anomaly, loot_mult);
        }
    }

    /// Advance wave wait timers and spawn follow-up waves whose delay has
    /// elapsed. Sites that disappeared are discarded unpaid.
    pub(crate) fn update_waves(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        _events: &mut Vec<SimEvent>,
        dt: f64,
    ) {
        let anomalies: Vec<Entity> = self.waves.keys().copied().collect();
        for anomaly in anomalies {
            if !is_alive(world, anomaly) {
                if let Some(state) = self.waves.remove(&anomaly) {
                    for enemy in &state.spawned {
                        self.enemy_owner.remove(enemy);
                    }
                    tracing::debug!(?anomaly, "combat site lost mid-encounter");
                }
                continue;
            }

            let ready = match self.waves.get_mut(&anomaly) {
                Some(state) if state.waiting => {
                    state.wait_timer += dt;
                    let delay = state.template.waves[state.current_wave + 1].delay_secs;
                    state.wait_timer >= delay
                }
                _ => false,
            };
            if !ready {
                continue;
            }

            // Take the state out of the registry so spawn_wave can record
            // ownership while mutating it.
            if let Some(mut state) = self.waves.remove(&anomaly) {
                state.waiting = false;
                state.wait_timer = 0.0;
                state.current_wave += 1;
                self.spawn_wave(world, rng, anomaly, &mut state);
                self.waves.insert(anomaly, state);
            }
        }
    }
}
