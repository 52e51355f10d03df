//! Kinematic body component.
//!
//! Traffic, powerups and particles carry a [`RigidBody`]; the
//! [`movement_system`](crate::systems::movement::movement_system) system integrates it into
//! their [`MapPosition`](super::mapposition::MapPosition) every frame. The
//! player is steered directly and has no body.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct RigidBody {
    /// Velocity in pixels per second.
    pub velocity: Vector2,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    pub fn new() -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
        }
    }

    pub fn with_velocity(x: f32, y: f32) -> Self {
        Self {
            velocity: Vector2 { x, y },
        }
    }

    /// Straight down the screen at `speed` pixels per second.
    pub fn scroll_down(&mut self, speed: f32) {
        self.velocity = Vector2 { x: 0.0, y: speed };
    }
}
