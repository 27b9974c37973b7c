//! Delayed damage application.
//!
//! Weapon hits with a visual-sync delay are stored as explicit entries and
//! re-validated when they fire: a target that died or despawned in the gap
//! makes the application a silent no-op. Entries survive in plain data, so
//! in-flight effects are deterministic and inspectable.

use hecs::{Entity, World};

use outrider_combat::damage::apply_damage;
use outrider_core::components::Defenses;

use crate::events::SimEvent;
use crate::world::is_alive;

/// One scheduled damage application.
#[derive(Debug, Clone, Copy)]
pub struct PendingDamage {
    pub remaining_secs: f64,
    pub attacker: Entity,
    pub target: Entity,
    pub amount: f64,
    pub hit_chance: f64,
}

/// Engine-owned queue of pending applications.
#[derive(Debug, Default)]
pub struct DamageSchedule {
    entries: Vec<PendingDamage>,
}

impl DamageSchedule {
    pub fn push(&mut self, entry: PendingDamage) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance all entries by `dt`, applying those that come due.
    pub fn tick(&mut self, world: &mut World, events: &mut Vec<SimEvent>, dt: f64) {
        let mut due = Vec::new();
        self.entries.retain_mut(|entry| {
            entry.remaining_secs -= dt;
            if entry.remaining_secs <= 0.0 {
                due.push(*entry);
                false
            } else {
                true
            }
        });

        for entry in due {
            // Re-validate at application time: the gap between fire and
            // impact may have killed or despawned the target.
            if !is_alive(world, entry.target) {
                continue;
            }
            let report = match world.get::<&mut Defenses>(entry.target) {
                Ok(mut defenses) => apply_damage(&mut defenses, entry.amount),
                Err(_) => continue,
            };
            events.push(SimEvent::CombatHit {
                attacker: entry.attacker,
                target: entry.target,
                damage: entry.amount,
                layer: report.layer,
                hit_chance: entry.hit_chance,
            });
        }
    }
}
