//! Debug overlay toggle.
//!
//! While this resource is present the renderer draws collider boxes, the
//! entity count and the frame rate on top of the race.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode {}
