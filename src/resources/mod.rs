//! ECS resources and main-thread asset stores.
//!
//! Overview
//! - `audio` – bridge and channels for the background audio thread
//! - `debugmode` – presence toggles the debug overlay
//! - `fontstore` – HUD font (main thread only)
//! - `gameconfig` – settings read from `config.ini`
//! - `gamestate` – score, scroll speed, difficulty and the game-over flag
//! - `highscores` – in-memory top score table
//! - `input` – per-frame keyboard state and the derived driver intent
//! - `rng` – seedable race RNG
//! - `road` – lane geometry
//! - `screen` – current and pending front-end screen
//! - `soundbank` – sound ids with silent fallbacks
//! - `systemsstore` – one-shot systems run on screen transitions
//! - `texturestore` – sprite textures with shape fallbacks (main thread only)
//! - `worldtime` – race time and delta
pub mod audio;
pub mod debugmode;
pub mod fontstore;
pub mod gameconfig;
pub mod gamestate;
pub mod highscores;
pub mod input;
pub mod rng;
pub mod road;
pub mod screen;
pub mod soundbank;
pub mod systemsstore;
pub mod texturestore;
pub mod worldtime;
