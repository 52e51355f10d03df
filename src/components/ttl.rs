//! Time-to-live component for short-lived entities.
//!
//! Particles and score popups are spawned with a [`Ttl`]; the
//! [`ttl_system`](crate::systems::ttl::ttl_system) counts it down with the
//! frame delta and despawns the entity once it runs out.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug)]
pub struct Ttl {
    /// Remaining time in seconds before despawn.
    pub remaining: f32,
    /// Lifetime the entity started with, used for fading.
    pub total: f32,
}

impl Ttl {
    pub fn new(seconds: f32) -> Self {
        Ttl {
            remaining: seconds,
            total: seconds,
        }
    }

    /// Fraction of life left in `[0, 1]`.
    pub fn fraction_left(&self) -> f32 {
        if self.total <= f32::EPSILON {
            return 0.0;
        }
        (self.remaining / self.total).clamp(0.0, 1.0)
    }
}
