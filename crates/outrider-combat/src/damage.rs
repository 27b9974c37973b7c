//! Layered defense depletion: shield, then armor, then hull.

use outrider_core::components::Defenses;
use outrider_core::enums::DamageLayer;

/// Result of applying one packet of damage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageReport {
    /// The layer that held charge when the hit landed. Overflow cascades
    /// into deeper pools but the label stays with the struck layer.
    pub layer: DamageLayer,
    /// Damage actually absorbed (equal to the packet unless the target
    /// had less total HP remaining).
    pub absorbed: f64,
    /// True when hull reached zero; the caller must treat this as a
    /// destruction trigger.
    pub destroyed: bool,
}

/// Deplete defense pools in priority order.
pub fn apply_damage(defenses: &mut Defenses, amount: f64) -> DamageReport {
    let layer = active_layer(defenses);

    let mut remaining = amount.max(0.0);
    let mut absorbed = 0.0;

    for pool in [
        &mut defenses.shield,
        &mut defenses.armor,
        &mut defenses.hull,
    ] {
        if remaining <= 0.0 {
            break;
        }
        let taken = remaining.min(*pool);
        *pool -= taken;
        absorbed += taken;
        remaining -= taken;
    }

    DamageReport {
        layer,
        absorbed,
        destroyed: defenses.hull <= 0.0,
    }
}

/// The outermost layer currently holding charge.
pub fn active_layer(defenses: &Defenses) -> DamageLayer {
    if defenses.shield > 0.0 {
        DamageLayer::Shield
    } else if defenses.armor > 0.0 {
        DamageLayer::Armor
    } else {
        DamageLayer::Hull
    }
}
