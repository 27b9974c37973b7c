//! Tracking-based hit chance model.
//!
//! A weapon's tracking rate is compared against the target's apparent
//! angular velocity; fast, small, close-orbiting targets are hard to hit,
//! and chance falls off linearly toward maximum range.

use rand::Rng;

use outrider_core::constants::*;

/// Geometry of one attack, sampled at fire time.
#[derive(Debug, Clone, Copy)]
pub struct TargetProfile {
    /// Source-to-target distance (meters).
    pub distance: f64,
    /// Target's current speed (m/s).
    pub target_speed: f64,
    /// Target signature radius (meters).
    pub target_signature: f64,
    /// Source signature radius (meters), used to derive tracking when the
    /// weapon does not specify one.
    pub source_signature: f64,
}

/// Weapon parameters relevant to resolution.
#[derive(Debug, Clone, Copy)]
pub struct WeaponSpec {
    /// Maximum range (meters). Beyond this the attack is a no-op.
    pub range: f64,
    /// Explicit tracking rate; derived from source signature when absent.
    pub tracking: Option<f64>,
    /// Base damage per hit.
    pub damage: f64,
    /// Visual-sync delay between fire and damage application (seconds).
    pub impact_delay_secs: f64,
}

impl WeaponSpec {
    /// A plain direct-fire weapon with no tracking override or delay.
    pub fn simple(range: f64, damage: f64) -> Self {
        Self {
            range,
            tracking: None,
            damage,
            impact_delay_secs: 0.0,
        }
    }
}

/// Compute the chance to hit, clamped to [MIN_HIT_CHANCE, 1.0].
///
/// `trait_bonus` is a multiplicative pilot-skill factor (1.0 = none),
/// applied before the final clamp.
pub fn hit_chance(profile: &TargetProfile, weapon: &WeaponSpec, trait_bonus: f64) -> f64 {
    let range_modifier = 1.0 - (profile.distance / weapon.range) * RANGE_FALLOFF;

    let tracking = weapon
        .tracking
        .unwrap_or_else(|| derived_tracking(profile.source_signature));

    let angular_velocity = (profile.target_speed
        / profile.distance.max(ANGULAR_DISTANCE_FLOOR))
        * (profile.target_signature / ANGULAR_SIGNATURE_REF);

    let tracking_factor = tracking / angular_velocity.max(ANGULAR_VELOCITY_FLOOR);

    let chance =
        (tracking_factor * TRACKING_CHANCE_SCALE).clamp(0.0, 1.0) * range_modifier * trait_bonus;
    chance.clamp(MIN_HIT_CHANCE, 1.0)
}

/// Tracking rate derived from the firing ship's signature.
/// Small hulls swing their hardpoints faster, capped for balance.
pub fn derived_tracking(source_signature: f64) -> f64 {
    (TRACKING_SIGNATURE_REF / source_signature).min(DERIVED_TRACKING_CAP)
}

/// Roll a single uniform draw against the hit chance.
pub fn roll_hit(chance: f64, rng: &mut impl Rng) -> bool {
    rng.gen_bool(chance.clamp(0.0, 1.0))
}

/// Damage multiplier from the player's weapon power routing.
pub fn routing_multiplier(weapons_fraction: f64) -> f64 {
    ROUTING_DAMAGE_BASE + weapons_fraction.clamp(0.0, 1.0) * ROUTING_DAMAGE_SPAN
}
