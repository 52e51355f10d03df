//! Speed Rush library.
//!
//! Exposes the game's ECS components, resources, systems, events and the
//! [`race::Race`] simulation for use in integration tests.

pub mod components;
pub mod constants;
pub mod error;
pub mod events;
pub mod race;
pub mod resources;
pub mod systems;
