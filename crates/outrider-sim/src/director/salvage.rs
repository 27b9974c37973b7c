//! Relic salvage channels.
//!
//! A salvage is a timed channel with a tight start range and a looser
//! abort range, so a drifting ship does not instantly cancel its own
//! channel. Completion feeds the hack-completion reward path.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use outrider_core::components::Anomaly;
use outrider_core::constants::{
    SALVAGE_ABORT_RANGE, SALVAGE_BASE_SECS, SALVAGE_SECS_PER_TIER, SALVAGE_START_RANGE,
};
use outrider_core::enums::SiteKind;
use outrider_core::types::Position;

use crate::events::{InterruptReason, SimEvent};
use crate::world::is_alive;

use super::EncounterDirector;

/// One in-progress salvage channel.
#[derive(Debug, Clone, Copy)]
pub struct SalvageOperation {
    pub ship: Entity,
    pub elapsed: f64,
    pub duration: f64,
    /// One-shot latch for the halfway notification.
    pub half_notified: bool,
}

enum ChannelStep {
    Running,
    Complete,
    Abort(InterruptReason),
}

impl EncounterDirector {
    /// Start a salvage channel on a relic site. Non-relic, already-hacked,
    /// already-active, already-completed, or out-of-range requests are
    /// silent no-ops.
    pub fn start_salvage(&mut self, world: &World, anomaly: Entity, ship: Entity) {
        if self.salvages.contains_key(&anomaly) || self.completed.contains(anomaly) {
            return;
        }
        if !is_alive(world, anomaly) || !is_alive(world, ship) {
            return;
        }
        let tier = match world.get::<&Anomaly>(anomaly) {
            Ok(a) if !a.hacked => match a.kind {
                SiteKind::Relic { tier, .. } => tier,
                _ => return,
            },
            _ => return,
        };
        match pair_distance(world, ship, anomaly) {
            Some(d) if d <= SALVAGE_START_RANGE => {}
            _ => return,
        }

        let duration = SALVAGE_BASE_SECS + tier * SALVAGE_SECS_PER_TIER;
        self.salvages.insert(
            anomaly,
            SalvageOperation {
                ship,
                elapsed: 0.0,
                duration,
                half_notified: false,
            },
        );
        tracing::debug!(?anomaly, ?ship, duration, "salvage channel started");
    }

    /// Advance every active channel: abort on loss of ship, site, or
    /// range; notify once at the halfway mark; hand completed channels to
    /// the reward path.
    pub(crate) fn update_salvages(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<SimEvent>,
        dt: f64,
    ) {
        let anomalies: Vec<Entity> = self.salvages.keys().copied().collect();
        for anomaly in anomalies {
            let step = {
                let op = match self.salvages.get_mut(&anomaly) {
                    Some(op) => op,
                    None => continue,
                };
                if !is_alive(world, anomaly) {
                    ChannelStep::Abort(InterruptReason::SiteLost)
                } else if !is_alive(world, op.ship) {
                    ChannelStep::Abort(InterruptReason::ShipLost)
                } else {
                    match pair_distance(world, op.ship, anomaly) {
                        Some(d) if d <= SALVAGE_ABORT_RANGE => {
                            op.elapsed += dt;
                            if !op.half_notified && op.elapsed >= op.duration * 0.5 {
                                op.half_notified = true;
                                events.push(SimEvent::SalvageHalfway { anomaly });
                            }
                            if op.elapsed >= op.duration {
                                ChannelStep::Complete
                            } else {
                                ChannelStep::Running
                            }
                        }
                        _ => ChannelStep::Abort(InterruptReason::OutOfRange),
                    }
                }
            };

            match step {
                ChannelStep::Running => {}
                ChannelStep::Abort(reason) => {
                    self.salvages.remove(&anomaly);
                    events.push(SimEvent::SalvageInterrupted { anomaly, reason });
                    tracing::debug!(?anomaly, ?reason, "salvage channel aborted");
                }
                ChannelStep::Complete => {
                    self.salvages.remove(&anomaly);
                    tracing::debug!(?anomaly, "salvage channel complete");
                    self.on_hack_complete(world, rng, events, anomaly);
                }
            }
        }
    }
}

fn pair_distance(world: &World, a: Entity, b: Entity) -> Option<f64> {
    let pa = *world.get::<&Position>(a).ok()?;
    let pb = *world.get::<&Position>(b).ok()?;
    Some(pa.distance_to(&pb))
}
