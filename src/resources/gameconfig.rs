//! Game configuration resource.
//!
//! Settings are read from an INI file. Every key is optional; anything
//! missing or malformed keeps its default, so a game without a config file
//! starts with the stock 900x600, four-lane highway.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 900
//! height = 600
//! target_fps = 60
//! vsync = true
//! fullscreen = false
//!
//! [assets]
//! dir = ./assets
//!
//! [road]
//! lanes = 4
//! margin = 80
//!
//! [audio]
//! music_volume = 0.4
//! engine_volume = 0.5
//!
//! [race]
//! seed = 12345
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::constants::{
    LANE_COUNT, LANE_MARGIN, MAX_LANES, MAX_SCREEN_HEIGHT, MAX_SCREEN_WIDTH, MAX_TARGET_FPS,
    MIN_SCREEN_HEIGHT, MIN_SCREEN_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH, TARGET_FPS,
};
use crate::error::ConfigError;
use crate::resources::road::RoadLayout;

const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_ASSETS_DIR: &str = "./assets";
const DEFAULT_MUSIC_VOLUME: f32 = 0.4;
const DEFAULT_ENGINE_VOLUME: f32 = 0.5;

/// Unsigned key within `range`; anything else is logged and skipped.
fn read_uint(config: &Ini, section: &str, key: &str, range: RangeInclusive<u64>) -> Option<u64> {
    match config.getuint(section, key) {
        Ok(Some(value)) if range.contains(&value) => Some(value),
        Ok(Some(value)) => {
            warn!(
                "[{section}] {key} = {value} is outside {}..={}; keeping default",
                range.start(),
                range.end()
            );
            None
        }
        Ok(None) => None,
        Err(e) => {
            warn!("[{section}] {key}: {e}; keeping default");
            None
        }
    }
}

/// Finite float key; NaN, infinities and parse errors are logged and skipped.
fn read_float(config: &Ini, section: &str, key: &str) -> Option<f32> {
    match config.getfloat(section, key) {
        Ok(Some(value)) if value.is_finite() => Some(value as f32),
        Ok(Some(value)) => {
            warn!("[{section}] {key} = {value} is not a finite number; keeping default");
            None
        }
        Ok(None) => None,
        Err(e) => {
            warn!("[{section}] {key}: {e}; keeping default");
            None
        }
    }
}

fn read_bool(config: &Ini, section: &str, key: &str) -> Option<bool> {
    match config.getbool(section, key) {
        Ok(value) => value,
        Err(e) => {
            warn!("[{section}] {key}: {e}; keeping default");
            None
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window (and playfield) width in pixels.
    pub window_width: u32,
    /// Window (and playfield) height in pixels.
    pub window_height: u32,
    pub target_fps: u32,
    pub vsync: bool,
    pub fullscreen: bool,
    /// Directory sprites, sounds and the font are loaded from.
    pub assets_dir: PathBuf,
    pub lane_count: usize,
    pub lane_margin: f32,
    pub music_volume: f32,
    /// Engine loop volume at full throttle.
    pub engine_volume: f32,
    /// Fixed seed for the race RNG; random when unset.
    pub seed: Option<u64>,
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            window_width: SCREEN_WIDTH,
            window_height: SCREEN_HEIGHT,
            target_fps: TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            fullscreen: DEFAULT_FULLSCREEN,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            lane_count: LANE_COUNT,
            lane_margin: LANE_MARGIN,
            music_volume: DEFAULT_MUSIC_VOLUME,
            engine_volume: DEFAULT_ENGINE_VOLUME,
            seed: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|reason| ConfigError::Read {
                path: self.config_path.clone(),
                reason,
            })?;
        self.apply(&config);

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, fullscreen={}, lanes={}, assets={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.fullscreen,
            self.lane_count,
            self.assets_dir.display()
        );
        Ok(())
    }

    /// Same as [`GameConfig::load_from_file`] but from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.read(text.to_string()).map_err(|reason| ConfigError::Read {
            path: self.config_path.clone(),
            reason,
        })?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [window]
        let widths = MIN_SCREEN_WIDTH as u64..=MAX_SCREEN_WIDTH as u64;
        if let Some(width) = read_uint(config, "window", "width", widths) {
            self.window_width = width as u32;
        }
        let heights = MIN_SCREEN_HEIGHT as u64..=MAX_SCREEN_HEIGHT as u64;
        if let Some(height) = read_uint(config, "window", "height", heights) {
            self.window_height = height as u32;
        }
        if let Some(fps) = read_uint(config, "window", "target_fps", 1..=MAX_TARGET_FPS as u64) {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = read_bool(config, "window", "vsync") {
            self.vsync = vsync;
        }
        if let Some(fullscreen) = read_bool(config, "window", "fullscreen") {
            self.fullscreen = fullscreen;
        }

        // [assets]
        if let Some(dir) = config.get("assets", "dir") {
            self.assets_dir = PathBuf::from(dir);
        }

        // [road]
        if let Some(lanes) = read_uint(config, "road", "lanes", 0..=u64::MAX) {
            self.lane_count = lanes.min(MAX_LANES as u64) as usize;
        }
        match read_float(config, "road", "margin") {
            Some(margin) if margin >= 0.0 => self.lane_margin = margin,
            Some(margin) => warn!("[road] margin = {margin} is negative; keeping default"),
            None => {}
        }

        // [audio]
        if let Some(vol) = read_float(config, "audio", "music_volume") {
            self.music_volume = vol.clamp(0.0, 1.0);
        }
        if let Some(vol) = read_float(config, "audio", "engine_volume") {
            self.engine_volume = vol.clamp(0.0, 1.0);
        }

        // [race]
        if let Some(seed) = read_uint(config, "race", "seed", 0..=u64::MAX) {
            self.seed = Some(seed);
        }
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));
        config.set("window", "fullscreen", Some(self.fullscreen.to_string()));
        config.set(
            "assets",
            "dir",
            Some(self.assets_dir.to_string_lossy().into_owned()),
        );
        config.set("road", "lanes", Some(self.lane_count.to_string()));
        config.set("road", "margin", Some(self.lane_margin.to_string()));
        config.set("audio", "music_volume", Some(self.music_volume.to_string()));
        config.set("audio", "engine_volume", Some(self.engine_volume.to_string()));
        if let Some(seed) = self.seed {
            config.set("race", "seed", Some(seed.to_string()));
        }

        config
            .write(&self.config_path)
            .map_err(|e| ConfigError::Write {
                path: self.config_path.clone(),
                reason: e.to_string(),
            })?;

        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Road geometry for these settings.
    pub fn road_layout(&self) -> RoadLayout {
        RoadLayout::new(
            self.window_width as f32,
            self.window_height as f32,
            self.lane_count,
            self.lane_margin,
        )
    }
}
