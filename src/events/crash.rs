//! Crash event and the observer that ends the race on screen.
//!
//! The crash detector sets the game-over flag itself and then triggers
//! [`CrashEvent`], so the headless race is complete without any observer.
//! The front end adds [`observe_crash_show_game_over`] to move to the game
//! over screen.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::screen::{NextScreen, Screens};

/// The player hit a traffic car with no shield left.
#[derive(Event, Debug, Clone, Copy)]
pub struct CrashEvent {
    pub player: Entity,
    pub other: Entity,
    /// Final score of the race.
    pub score: u64,
}

pub fn observe_crash_show_game_over(
    trigger: On<CrashEvent>,
    next_screen: Option<ResMut<NextScreen>>,
) {
    let event = trigger.event();
    info!("Crashed into {:?} with {} points", event.other, event.score);
    if let Some(mut next_screen) = next_screen {
        next_screen.set(Screens::GameOver);
    }
}
