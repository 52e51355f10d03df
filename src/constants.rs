//! Gameplay tuning constants.
//!
//! Distances are in screen pixels, times in seconds and speeds in pixels per
//! second unless the name says otherwise. Road geometry that can be changed
//! from `config.ini` lives in [`crate::resources::road::RoadLayout`]; the values
//! here are its defaults.

// Screen and road
pub const SCREEN_WIDTH: u32 = 900;
pub const SCREEN_HEIGHT: u32 = 600;
pub const TARGET_FPS: u32 = 60;
/// Smallest window the road layout accepts.
pub const MIN_SCREEN_WIDTH: u32 = 320;
pub const MIN_SCREEN_HEIGHT: u32 = 240;
pub const MAX_SCREEN_WIDTH: u32 = 7680;
pub const MAX_SCREEN_HEIGHT: u32 = 4320;
pub const MAX_TARGET_FPS: u32 = 1000;
pub const LANE_COUNT: usize = 4;
pub const MIN_LANES: usize = 2;
pub const MAX_LANES: usize = 8;
pub const LANE_MARGIN: f32 = 80.0;
/// Inset of the player's clamp range from each road edge.
pub const ROAD_EDGE_INSET: f32 = 10.0;

// Player
pub const PLAYER_WIDTH: f32 = 60.0;
pub const PLAYER_HEIGHT: f32 = 120.0;
/// Distance of the player's centre from the bottom of the screen.
pub const PLAYER_BOTTOM_OFFSET: f32 = 140.0;
/// Forward speed units, not pixels.
pub const PLAYER_START_SPEED: f32 = 12.0;
pub const PLAYER_CRUISE_SPEED: f32 = 12.0;
pub const PLAYER_MIN_SPEED: f32 = 6.0;
pub const PLAYER_MAX_SPEED: f32 = 30.0;
pub const PLAYER_ACCEL: f32 = 18.0;
pub const PLAYER_BRAKE: f32 = 36.0;
pub const PLAYER_DRAG: f32 = 6.0;
pub const LANE_CHANGE_DURATION: f32 = 0.20;
pub const LANE_CHANGE_COOLDOWN: f32 = 0.18;
/// Rate at which the HUD needle chases the real speed.
pub const DISPLAY_SPEED_SMOOTHING: f32 = 6.0;

// Nitro and shield
pub const NITRO_DURATION: f32 = 3.0;
pub const NITRO_BOOST: f32 = 10.0;
pub const NITRO_KICK: f32 = 4.0;
pub const NITRO_KICK_CAP: f32 = PLAYER_MAX_SPEED + 6.0;
pub const POWERUP_SIZE: f32 = 48.0;
pub const POWERUP_PERIOD: f32 = 6.0;
pub const POWERUP_CHANCE: f32 = 0.2;

// Traffic
/// Conversion from the legacy "pixels per 1/60 s" cruise units.
pub const FRAME_UNITS: f32 = 60.0;
pub const TRAFFIC_CAP: usize = 28;
pub const SPAWN_PERIOD_BASE: f32 = 0.900;
pub const SPAWN_PERIOD_MIN: f32 = 0.220;
pub const SPAWN_Y_MIN: f32 = 100.0;
pub const SPAWN_Y_MAX: f32 = 800.0;
/// Centre-to-centre distance below which a lane counts as congested.
pub const SAFE_SPAWN_DISTANCE: f32 = 200.0;
/// Minimum bumper-to-bumper gap kept between a spawn and an existing car.
pub const SAFE_SPAWN_GAP: f32 = 60.0;
/// Vertical band in which at least one lane must stay open.
pub const WALL_BAND: f32 = 320.0;
pub const CRUISE_JITTER: f32 = 2.0;

// Scroll speed and difficulty
pub const SCROLL_BASE: f32 = 240.0;
pub const SCROLL_SCORE_SCALE: f32 = 5000.0;
pub const SCROLL_CAP_FACTOR: f32 = 3.0;
pub const DIFFICULTY_STEP_SCORE: u64 = 1000;
pub const DIFFICULTY_STEP: f32 = 0.1;

// Scoring
pub const SURVIVAL_POINTS_PER_SECOND: f32 = 10.0;
pub const OVERTAKE_POINTS: u64 = 100;
pub const NEAR_MISS_DISTANCE: f32 = 180.0;
pub const NEAR_MISS_BONUS: f32 = 250.0;
pub const NEAR_MISS_COMBO_WINDOW: f32 = 1.5;
pub const NEAR_MISS_MAX_COMBO: u32 = 6;
pub const NEAR_MISS_COMBO_MULT: f32 = 0.25;
pub const POPUP_LIFETIME: f32 = 1.4;
pub const HIGH_SCORE_SLOTS: usize = 20;

// Frame timing
/// Longest frame delta a single update accepts.
pub const MAX_FRAME_DELTA: f32 = 0.1;
/// Longest slice of time the simulation integrates between collision checks.
pub const SIM_STEP: f32 = 1.0 / 60.0;
