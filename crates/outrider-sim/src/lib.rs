//! Simulation engine for OUTRIDER.
//!
//! Owns the hecs world and the Encounter Director, resolves weapon fire
//! through the combat model, and drives every encounter state machine
//! from a single cooperative tick. Completely headless: rendering,
//! audio, and UI consume the event stream.

pub mod combat;
pub mod commands;
pub mod director;
pub mod engine;
pub mod events;
pub mod schedule;
pub mod systems;
pub mod world;

#[cfg(test)]
mod tests;
