//! Collectable powerups.

use bevy_ecs::prelude::Component;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerupKind {
    /// A few seconds of extra top speed.
    Nitro,
    /// Absorbs one crash.
    Shield,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 2] = [PowerupKind::Nitro, PowerupKind::Shield];
}

#[derive(Component, Clone, Copy, Debug)]
pub struct Powerup {
    pub kind: PowerupKind,
}
