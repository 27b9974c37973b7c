//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Tracking model ---

/// Fraction of hit chance lost at maximum weapon range.
pub const RANGE_FALLOFF: f64 = 0.7;

/// Cap on tracking derived from source signature.
pub const DERIVED_TRACKING_CAP: f64 = 1.5;

/// Reference signature for deriving tracking (smaller ship = better tracking).
pub const TRACKING_SIGNATURE_REF: f64 = 40.0;

/// Distance floor for the angular velocity estimate (meters).
pub const ANGULAR_DISTANCE_FLOOR: f64 = 50.0;

/// Reference signature normalizing target angular size.
pub const ANGULAR_SIGNATURE_REF: f64 = 28.0;

/// Floor on angular velocity to keep the tracking factor finite.
pub const ANGULAR_VELOCITY_FLOOR: f64 = 0.01;

/// Scale applied to the tracking factor before range modulation.
pub const TRACKING_CHANCE_SCALE: f64 = 0.5;

/// Final hit chance floor. Even hopeless shots connect occasionally.
pub const MIN_HIT_CHANCE: f64 = 0.05;

// --- Power routing ---

/// Damage multiplier at zero weapon routing.
pub const ROUTING_DAMAGE_BASE: f64 = 0.5;

/// Additional damage multiplier at full weapon routing.
pub const ROUTING_DAMAGE_SPAN: f64 = 1.5;

// --- Spawn policy ---

/// Interval between anomaly spawn passes (seconds).
pub const SPAWN_INTERVAL_SECS: f64 = 60.0;

/// Probability of filling each missing anomaly slot per pass.
pub const SPAWN_FILL_CHANCE: f64 = 0.5;

/// Minimum radial distance of a new anomaly from sector center (meters).
pub const SPAWN_RADIUS_MIN: f64 = 5_000.0;

/// Maximum radial distance of a new anomaly from sector center (meters).
pub const SPAWN_RADIUS_MAX: f64 = 13_000.0;

/// Safety margin kept between an anomaly and the sector boundary (meters).
pub const SPAWN_BOUNDS_MARGIN: f64 = 1_000.0;

// --- Combat sites ---

/// Base credit reward before danger scaling.
pub const COMBAT_SITE_BASE_CREDITS: f64 = 500.0;

/// Credit reward gained per unit of danger.
pub const COMBAT_SITE_CREDITS_PER_DANGER: f64 = 2_000.0;

/// Danger threshold for an elite-tier combat site.
pub const WAVE_TIER_ELITE: f64 = 0.8;

/// Danger threshold for a hard-tier combat site.
pub const WAVE_TIER_HARD: f64 = 0.55;

/// Danger threshold for a normal-tier combat site.
pub const WAVE_TIER_NORMAL: f64 = 0.25;

/// Radial offset range for wave enemies around their anomaly (meters).
pub const WAVE_SPAWN_RADIUS_MIN: f64 = 400.0;
pub const WAVE_SPAWN_RADIUS_MAX: f64 = 900.0;

/// Angular jitter applied to the even spacing of wave enemies (radians).
pub const WAVE_SPAWN_ANGLE_JITTER: f64 = 0.35;

/// Aggro radius granted to wave enemies (meters), wider than default AI.
pub const WAVE_ENEMY_AGGRO_RADIUS: f64 = 20_000.0;

/// Random bonus fraction applied to combat-site loot credits.
pub const LOOT_CREDIT_BONUS_MAX: f64 = 0.3;

/// Loot multiplier at or above which a bonus material can drop.
pub const BONUS_MATERIAL_LOOT_MULT: f64 = 2.0;

/// Chance of the bonus material at qualifying loot multipliers.
pub const BONUS_MATERIAL_CHANCE: f64 = 0.6;

/// Delay before a completed combat site despawns (seconds).
pub const SITE_DESPAWN_DELAY_SECS: f64 = 15.0;

// --- Data / relic sites ---

/// Base data-site credit reward before danger scaling.
pub const DATA_SITE_BASE_CREDITS: f64 = 200.0;

/// Data-site credit reward gained per unit of danger.
pub const DATA_SITE_CREDITS_PER_DANGER: f64 = 1_800.0;

/// Base hack difficulty before danger scaling.
pub const HACK_DIFFICULTY_BASE: f64 = 0.2;

/// Hack difficulty gained per unit of danger.
pub const HACK_DIFFICULTY_PER_DANGER: f64 = 0.8;

/// Credit bonus paid alongside a relic material bundle, as a fraction of
/// the bundle's market value.
pub const RELIC_CREDIT_BONUS_FRACTION: f64 = 0.1;

/// Bundle size scaling: count = 1 + floor(tier * scale + uniform(0..1)).
pub const RELIC_BUNDLE_TIER_SCALE: f64 = 2.0;

/// Minimum relic tier at which the rare bonus material can appear.
pub const RELIC_BONUS_TIER_THRESHOLD: f64 = 0.5;

/// Chance of the rare bonus material per unit of tier.
pub const RELIC_BONUS_CHANCE_PER_TIER: f64 = 0.6;

/// Per-material quantity scaling with tier.
pub const RELIC_QTY_TIER_SCALE: f64 = 2.0;

/// Per-material quantity random span.
pub const RELIC_QTY_RANDOM_SPAN: f64 = 2.0;

// --- Salvage ---

/// Maximum range at which a salvage channel may start (meters).
pub const SALVAGE_START_RANGE: f64 = 250.0;

/// Range beyond which an in-progress salvage aborts (meters).
/// Looser than the start gate so position jitter does not break the channel.
pub const SALVAGE_ABORT_RANGE: f64 = 350.0;

/// Base salvage duration (seconds).
pub const SALVAGE_BASE_SECS: f64 = 8.0;

/// Additional salvage duration per unit of relic tier (seconds).
pub const SALVAGE_SECS_PER_TIER: f64 = 6.0;

// --- Gas harvesting ---

/// Gas extraction rate (units per second).
pub const GAS_HARVEST_RATE: f64 = 5.0;

/// Base gas amount for a fresh pocket before danger scaling.
pub const GAS_POCKET_BASE_AMOUNT: f64 = 300.0;

/// Additional gas per unit of danger.
pub const GAS_POCKET_AMOUNT_PER_DANGER: f64 = 500.0;

/// Delay before a depleted gas pocket despawns (seconds).
pub const GAS_DESPAWN_DELAY_SECS: f64 = 10.0;

// --- Loot ---

/// Lifetime of a spawned loot container (seconds).
pub const LOOT_LIFETIME_SECS: f64 = 300.0;

// --- Completed-site guard ---

/// Maximum remembered completed-site ids; oldest half evicted on overflow.
pub const COMPLETED_SITES_CAP: usize = 200;
