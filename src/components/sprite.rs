//! Sprite component.
//!
//! A [`Sprite`] names an entry of the
//! [`TextureStore`](crate::resources::texturestore::TextureStore) and the size
//! it is drawn at. Whether that entry is a real texture or a flat fallback
//! shape was decided when the store was loaded.

use bevy_ecs::prelude::Component;

use crate::components::car::VehicleKind;
use crate::components::powerup::PowerupKind;

/// Keys of the drawable assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    PlayerCar,
    EnemyCar,
    EnemyTruck,
    EnemyBus,
    Road,
    Nitro,
    Shield,
}

impl SpriteKey {
    pub const ALL: [SpriteKey; 7] = [
        SpriteKey::PlayerCar,
        SpriteKey::EnemyCar,
        SpriteKey::EnemyTruck,
        SpriteKey::EnemyBus,
        SpriteKey::Road,
        SpriteKey::Nitro,
        SpriteKey::Shield,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SpriteKey::PlayerCar => "car_player.png",
            SpriteKey::EnemyCar => "car_enemy.png",
            SpriteKey::EnemyTruck => "truck_enemy.png",
            SpriteKey::EnemyBus => "bus_enemy.png",
            SpriteKey::Road => "road.png",
            SpriteKey::Nitro => "nitro.png",
            SpriteKey::Shield => "shield.png",
        }
    }

    pub fn for_vehicle(kind: VehicleKind) -> SpriteKey {
        match kind {
            VehicleKind::Car => SpriteKey::EnemyCar,
            VehicleKind::Truck => SpriteKey::EnemyTruck,
            VehicleKind::Bus => SpriteKey::EnemyBus,
        }
    }

    pub fn for_powerup(kind: PowerupKind) -> SpriteKey {
        match kind {
            PowerupKind::Nitro => SpriteKey::Nitro,
            PowerupKind::Shield => SpriteKey::Shield,
        }
    }
}

#[derive(Component, Clone, Copy, Debug)]
pub struct Sprite {
    pub key: SpriteKey,
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    pub fn new(key: SpriteKey, width: f32, height: f32) -> Self {
        Self { key, width, height }
    }
}
