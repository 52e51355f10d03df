//! Axis-aligned box collider.
//!
//! A [`BoxCollider`] is attached next to a
//! [`MapPosition`](super::mapposition::MapPosition) and describes the car's
//! hit box relative to that position. [`BoxCollider::aabb`] resolves it into an
//! [`Aabb`] in screen space, which is what the collision detector compares.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Resolved world-space box. `min` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector2,
    pub max: Vector2,
}

impl Aabb {
    /// Box of the given size centred on `center`.
    pub fn from_center(center: Vector2, width: f32, height: f32) -> Self {
        let hw = width.abs() * 0.5;
        let hh = height.abs() * 0.5;
        Self {
            min: Vector2 {
                x: center.x - hw,
                y: center.y - hh,
            },
            max: Vector2 {
                x: center.x + hw,
                y: center.y + hh,
            },
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vector2,
}

impl BoxCollider {
    /// Collider of the given size centred on the entity position.
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            size: Vector2 {
                x: width,
                y: height,
            },
        }
    }

    /// Resolve the collider for an entity at `position`.
    /// Negative sizes are normalised.
    pub fn aabb(&self, position: Vector2) -> Aabb {
        Aabb::from_center(position, self.size.x, self.size.y)
    }
}
