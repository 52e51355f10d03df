//! Z-index component for render ordering.
//!
//! Higher values are drawn later (on top). The renderer sorts by [`ZIndex`]
//! and then by Y so cars lower on the screen overlap the ones ahead of them.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);

impl ZIndex {
    pub const POWERUP: ZIndex = ZIndex(10);
    pub const TRAFFIC: ZIndex = ZIndex(20);
    pub const PLAYER: ZIndex = ZIndex(30);
    pub const EFFECTS: ZIndex = ZIndex(40);
}
