//! Cosmetic entities: particles and floating score popups.
//!
//! Both are spawned with a [`Ttl`](super::ttl::Ttl) and faded by the renderer
//! according to the life left.

use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

#[derive(Component, Clone, Copy, Debug)]
pub struct Particle {
    pub color: Color,
    /// Radius in pixels at full life.
    pub size: f32,
}

#[derive(Component, Clone, Debug)]
pub struct Popup {
    pub text: String,
    pub color: Color,
}
