//! Attack resolution against the live world.
//!
//! Stateless per call: samples geometry, rolls the tracking model, and
//! either applies layered damage immediately or schedules it through the
//! delayed-damage queue. Destruction is finalized by the engine's death
//! sweep, never here.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use outrider_combat::damage::apply_damage;
use outrider_combat::tracking::{hit_chance, roll_hit, routing_multiplier, TargetProfile, WeaponSpec};
use outrider_core::components::{Defenses, PilotTraits, PlayerShip, PowerRouting, Signature};
use outrider_core::types::{Position, Velocity};

use crate::events::SimEvent;
use crate::schedule::{DamageSchedule, PendingDamage};
use crate::world::is_alive;

/// Resolve one attack. Out-of-range or invalid source/target pairs are
/// pure no-ops, expected under concurrent world mutation rather than errors.
pub fn resolve_attack(
    world: &mut World,
    schedule: &mut DamageSchedule,
    events: &mut Vec<SimEvent>,
    rng: &mut ChaCha8Rng,
    source: Entity,
    target: Entity,
    weapon: &WeaponSpec,
) {
    if !is_alive(world, source) || !is_alive(world, target) {
        return;
    }

    let geometry = match sample_geometry(world, source, target) {
        Some(g) => g,
        None => return,
    };
    if geometry.distance > weapon.range {
        return;
    }

    let trait_bonus = world
        .get::<&PilotTraits>(source)
        .map(|t| t.gunnery_bonus)
        .unwrap_or(1.0);

    let chance = hit_chance(&geometry, weapon, trait_bonus);
    if !roll_hit(chance, rng) {
        events.push(SimEvent::CombatMiss {
            attacker: source,
            target,
            hit_chance: chance,
        });
        return;
    }

    let damage = weapon.damage * player_damage_multiplier(world, source);

    if weapon.impact_delay_secs > 0.0 {
        schedule.push(PendingDamage {
            remaining_secs: weapon.impact_delay_secs,
            attacker: source,
            target,
            amount: damage,
            hit_chance: chance,
        });
        return;
    }

    let report = match world.get::<&mut Defenses>(target) {
        Ok(mut defenses) => apply_damage(&mut defenses, damage),
        Err(_) => return,
    };
    events.push(SimEvent::CombatHit {
        attacker: source,
        target,
        damage,
        layer: report.layer,
        hit_chance: chance,
    });
}

/// Power-routing damage multiplier; 1.0 for non-player sources.
fn player_damage_multiplier(world: &World, source: Entity) -> f64 {
    if world.get::<&PlayerShip>(source).is_err() {
        return 1.0;
    }
    world
        .get::<&PowerRouting>(source)
        .map(|r| routing_multiplier(r.weapons))
        .unwrap_or(1.0)
}

/// Sample attack geometry from both entities. None when either side lacks
/// position data (despawned mid-tick).
fn sample_geometry(world: &World, source: Entity, target: Entity) -> Option<TargetProfile> {
    let source_pos = *world.get::<&Position>(source).ok()?;
    let target_pos = *world.get::<&Position>(target).ok()?;
    let source_sig = world.get::<&Signature>(source).map(|s| s.radius).ok()?;
    let target_sig = world.get::<&Signature>(target).map(|s| s.radius).ok()?;
    let target_speed = world
        .get::<&Velocity>(target)
        .map(|v| v.speed())
        .unwrap_or(0.0);

    Some(TargetProfile {
        distance: source_pos.distance_to(&target_pos),
        target_speed,
        target_signature: target_sig,
        source_signature: source_sig,
    })
}
