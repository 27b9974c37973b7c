//! End-of-tick entity removal.
//!
//! Counts down despawn timers and removes expired entities along with
//! everything marked destroyed this tick. The despawn buffer is reused
//! across ticks.

use hecs::{Entity, World};

use outrider_core::components::{DespawnTimer, Destroyed};

/// Collect and despawn expired and destroyed entities.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, dt: f64) {
    despawn_buffer.clear();

    for (entity, timer) in world.query_mut::<&mut DespawnTimer>() {
        timer.remaining_secs -= dt;
        if timer.remaining_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }
    for (entity, _) in world.query_mut::<&Destroyed>() {
        despawn_buffer.push(entity);
    }

    despawn_buffer.sort_unstable();
    despawn_buffer.dedup();
    for entity in despawn_buffer.drain(..) {
        // Already-gone entities are fine to skip.
        let _ = world.despawn(entity);
    }
}
