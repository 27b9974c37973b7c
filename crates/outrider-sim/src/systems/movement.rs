//! Enemy pursuit steering and position integration.

use hecs::{Entity, World};

use outrider_core::components::{Destroyed, EnemyShip};
use outrider_core::types::{Position, Velocity};

use crate::world::Pursuit;

/// Steer pursuing enemies toward their target at class speed when inside
/// their aggro radius, then integrate all positions.
pub fn run(world: &mut World, dt: f64) {
    let mut steering: Vec<(Entity, Velocity)> = Vec::new();
    {
        let mut query = world
            .query::<(&EnemyShip, &Pursuit, &Position)>()
            .without::<&Destroyed>();
        for (entity, (enemy, pursuit, pos)) in query.iter() {
            let target_pos = match world.get::<&Position>(pursuit.target) {
                Ok(p) => *p,
                Err(_) => {
                    steering.push((entity, Velocity::default()));
                    continue;
                }
            };
            let dist = pos.distance_to(&target_pos);
            let velocity = if dist <= enemy.aggro_radius && dist > 1.0 {
                let speed = enemy.class.stats().speed;
                Velocity((target_pos.0 - pos.0) / dist * speed)
            } else {
                Velocity::default()
            };
            steering.push((entity, velocity));
        }
    }
    for (entity, velocity) in steering {
        if let Ok(mut v) = world.get::<&mut Velocity>(entity) {
            *v = velocity;
        }
    }

    for (_, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.0 += vel.0 * dt;
    }
}
