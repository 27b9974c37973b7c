//! Configuration fault types.

/// Faults detected when constructing the simulation.
///
/// These are fail-fast construction errors only; runtime combat and
/// encounter failures degrade to no-ops or events instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DirectorError {
    #[error("wave template for tier {0} has no waves")]
    EmptyWaveTemplate(&'static str),

    #[error("relic material catalog is empty")]
    EmptyMaterialCatalog,
}
