//! Sprite textures, with flat-colour fallbacks.
//!
//! Every [`SpriteKey`] resolves to a [`Drawable`] once, at load time. A file
//! that is missing or fails to decode becomes a solid rectangle in the
//! sprite's fallback colour; the renderer draws either variant the same way.
//!
//! The store holds GPU handles, so it stays on the main thread and is passed
//! to the renderer directly instead of living in the `World`.
use std::path::{Path, PathBuf};

use log::{info, warn};
use raylib::prelude::{Color, RaylibHandle, RaylibThread, Texture2D};
use rustc_hash::FxHashMap;

use crate::components::sprite::SpriteKey;
use crate::error::AssetError;

pub enum Drawable {
    Texture(Texture2D),
    Shape { color: Color },
}

impl Drawable {
    pub fn is_shape(&self) -> bool {
        matches!(self, Drawable::Shape { .. })
    }
}

/// Colour drawn when the sprite for `key` is unavailable.
pub fn fallback_color(key: SpriteKey) -> Color {
    match key {
        SpriteKey::PlayerCar => Color {
            r: 40,
            g: 120,
            b: 230,
            a: 255,
        },
        SpriteKey::EnemyCar => Color {
            r: 210,
            g: 45,
            b: 45,
            a: 255,
        },
        SpriteKey::EnemyTruck => Color {
            r: 230,
            g: 140,
            b: 30,
            a: 255,
        },
        SpriteKey::EnemyBus => Color {
            r: 235,
            g: 205,
            b: 40,
            a: 255,
        },
        SpriteKey::Road => Color {
            r: 48,
            g: 48,
            b: 52,
            a: 255,
        },
        SpriteKey::Nitro => Color {
            r: 0,
            g: 220,
            b: 255,
            a: 255,
        },
        SpriteKey::Shield => Color {
            r: 60,
            g: 220,
            b: 90,
            a: 255,
        },
    }
}

/// Path of the image for `key` under `dir`, if the file exists.
pub fn resolve_sprite(dir: &Path, key: SpriteKey) -> Result<PathBuf, AssetError> {
    let path = dir.join(key.file_name());
    if path.is_file() {
        Ok(path)
    } else {
        Err(AssetError::Missing { path })
    }
}

pub struct TextureStore {
    map: FxHashMap<SpriteKey, Drawable>,
}

impl TextureStore {
    /// A store where every sprite is a flat shape.
    pub fn shapes_only() -> Self {
        Self {
            map: SpriteKey::ALL
                .iter()
                .map(|&key| {
                    (
                        key,
                        Drawable::Shape {
                            color: fallback_color(key),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Load every sprite from `dir`, falling back to shapes.
    pub fn load(rl: &mut RaylibHandle, th: &RaylibThread, dir: &Path) -> Self {
        let mut store = Self::shapes_only();
        for key in SpriteKey::ALL {
            match load_one(rl, th, dir, key) {
                Ok(texture) => {
                    store.map.insert(key, Drawable::Texture(texture));
                }
                Err(e) => warn!("{e}; drawing {:?} as a rectangle", key),
            }
        }
        info!(
            "Texture store: {} of {} sprites loaded",
            store.texture_count(),
            SpriteKey::ALL.len()
        );
        store
    }

    pub fn get(&self, key: SpriteKey) -> Option<&Drawable> {
        self.map.get(&key)
    }

    pub fn texture_count(&self) -> usize {
        self.map.values().filter(|d| !d.is_shape()).count()
    }
}

fn load_one(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    dir: &Path,
    key: SpriteKey,
) -> Result<Texture2D, AssetError> {
    let path = resolve_sprite(dir, key)?;
    let path_str = path.to_string_lossy().into_owned();
    rl.load_texture(th, &path_str)
        .map_err(|e| AssetError::Load {
            path,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_only_covers_every_key() {
        let store = TextureStore::shapes_only();
        for key in SpriteKey::ALL {
            assert!(store.get(key).is_some_and(Drawable::is_shape));
        }
        assert_eq!(store.texture_count(), 0);
    }

    #[test]
    fn test_resolve_missing_sprite() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_sprite(dir.path(), SpriteKey::PlayerCar).unwrap_err();
        assert!(matches!(err, AssetError::Missing { .. }));
        assert!(err.to_string().contains("car_player.png"));
    }

    #[test]
    fn test_resolve_present_sprite() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("road.png"), b"\x89PNG").unwrap();
        let path = resolve_sprite(dir.path(), SpriteKey::Road).unwrap();
        assert_eq!(path, dir.path().join("road.png"));
    }

    #[test]
    fn test_vehicle_fallbacks_are_distinct() {
        let colors = [
            fallback_color(SpriteKey::PlayerCar),
            fallback_color(SpriteKey::EnemyCar),
            fallback_color(SpriteKey::EnemyTruck),
            fallback_color(SpriteKey::EnemyBus),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!((a.r, a.g, a.b), (b.r, b.g, b.b));
            }
        }
    }
}
