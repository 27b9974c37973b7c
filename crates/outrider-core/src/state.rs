//! Persisted director state.
//!
//! Only the completed-site guard and the spawn timer survive a save:
//! in-flight wave, salvage, and harvest state is regenerated on sector
//! re-entry by design.

use serde::{Deserialize, Serialize};

/// Serializable snapshot of the Encounter Director's durable state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectorSave {
    /// Completed anomaly ids (entity bits), oldest first.
    pub completed_sites: Vec<u64>,
    /// Elapsed seconds of the current spawn interval.
    pub spawn_timer: f64,
}
