//! HUD font.
//!
//! Holds `arcade.ttf` from the assets directory when it loads, otherwise
//! nothing, in which case text is drawn with raylib's built-in font. Like the
//! texture store this owns GPU data and stays out of the `World`.
use std::path::Path;

use log::{info, warn};
use raylib::prelude::{Font, RaylibHandle, RaylibThread};

use crate::error::AssetError;

pub const FONT_FILE: &str = "arcade.ttf";
/// Glyph size the font atlas is rasterised at.
const FONT_BASE_SIZE: i32 = 48;

pub struct FontStore {
    hud: Option<Font>,
}

impl FontStore {
    pub fn builtin() -> Self {
        Self { hud: None }
    }

    pub fn load(rl: &mut RaylibHandle, th: &RaylibThread, dir: &Path) -> Self {
        match load_hud_font(rl, th, dir) {
            Ok(font) => {
                info!("Loaded HUD font {}", FONT_FILE);
                Self { hud: Some(font) }
            }
            Err(e) => {
                warn!("{e}; using the built-in font");
                Self::builtin()
            }
        }
    }

    /// The loaded font, or `None` for the built-in one.
    pub fn hud(&self) -> Option<&Font> {
        self.hud.as_ref()
    }
}

fn load_hud_font(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    dir: &Path,
) -> Result<Font, AssetError> {
    let path = dir.join(FONT_FILE);
    if !path.is_file() {
        return Err(AssetError::Missing { path });
    }
    let path_str = path.to_string_lossy().into_owned();
    rl.load_font_ex(th, &path_str, FONT_BASE_SIZE, None)
        .map_err(|e| AssetError::Load {
            path,
            reason: e.to_string(),
        })
}
