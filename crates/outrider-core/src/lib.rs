//! Core types and definitions for the OUTRIDER simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, enums, constants, wave templates, catalogs, and persisted
//! state. It has no dependency on the ECS or any runtime framework.

pub mod catalog;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod state;
pub mod templates;
pub mod types;

#[cfg(test)]
mod tests;
