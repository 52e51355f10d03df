//! Event types and observers.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`crash`] – the player hit traffic without a shield
//! - [`lanechange`] – lane changes and the near-miss bonus they can earn
//! - [`menu`] – title menu selections
//! - [`screen`] – front-end screen transitions
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod audio;
pub mod crash;
pub mod lanechange;
pub mod menu;
pub mod screen;
pub mod switchdebug;
