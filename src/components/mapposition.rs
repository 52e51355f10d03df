//! World-space position component.
//!
//! [`MapPosition`] is the centre of an entity on the road, in screen pixels
//! with Y growing downwards. Traffic enters with a negative Y above the top of
//! the screen and leaves past `screen_height`.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn y(&self) -> f32 {
        self.pos.y
    }
}
