//! Game systems.
//!
//! Submodules overview
//! - [`audio`] – bridge with the audio thread and engine volume
//! - [`collision`] – player/traffic crash and pickup checks
//! - [`driver`] – steering and throttle for the player car
//! - [`input`] – read the keyboard into [`crate::resources::input::InputState`]
//! - [`movement`] – integrate velocities and scroll the road
//! - [`particles`] – sparks and the nitro trail
//! - [`render`] – draw the road, cars, HUD and overlays with Raylib
//! - [`scoring`] – survival and overtake points, speed ramp
//! - [`screen`] – menu and screen transitions
//! - [`spawner`] – safe placement of traffic and pickups
//! - [`time`] – frame delta sanitising and the race clock
//! - [`traffic`] – traffic velocities and off-screen culling
//! - [`ttl`] – despawn short-lived entities

pub mod audio;
pub mod collision;
pub mod driver;
pub mod input;
pub mod movement;
pub mod particles;
pub mod render;
pub mod scoring;
pub mod screen;
pub mod spawner;
pub mod time;
pub mod traffic;
pub mod ttl;
