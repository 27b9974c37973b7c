//! Combat math for the OUTRIDER simulation.
//!
//! Pure functions over plain data with no ECS dependency. The sim crate
//! supplies geometry and pools from the world and applies the results.

pub mod damage;
pub mod tracking;
