//! Screen transition event and observer.
//!
//! Systems request a new screen by writing [`NextScreen`]. When
//! [`check_pending_screen`](crate::systems::screen::check_pending_screen)
//! sees a pending value it triggers [`ScreenChangedEvent`], and
//! [`observe_screen_change`] applies it: it updates [`Screen`], runs the exit
//! hooks of the old screen and the enter hooks of the new one.
//!
//! Enter/exit rules:
//! - leaving Menu despawns the title menu, entering Menu spawns it
//! - entering Playing from Menu or Game Over resets the race
//! - Paused pauses the engine loop, Playing resumes or starts it
//! - entering Game Over records the score in the high score table
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::events::audio::AudioCmd;
use crate::resources::screen::NextScreens::{Pending, Unchanged};
use crate::resources::screen::{NextScreen, Screen, Screens};
use crate::resources::soundbank::{SoundBank, Track};
use crate::resources::systemsstore::{ScreenHook, SystemsStore};

#[derive(Event, Debug, Clone, Copy)]
pub struct ScreenChangedEvent {}

pub fn observe_screen_change(
    _trigger: On<ScreenChangedEvent>,
    mut commands: Commands,
    mut next_screen: ResMut<NextScreen>,
    mut screen: ResMut<Screen>,
    systems_store: Res<SystemsStore>,
    bank: Option<Res<SoundBank>>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let new_screen = match next_screen.get() {
        Pending(new_screen) => new_screen,
        Unchanged => {
            debug!("No screen change pending.");
            return;
        }
    };
    let old_screen = screen.get();
    info!("Transitioning from {:?} to {:?}", old_screen, new_screen);
    screen.set(new_screen);
    next_screen.reset();

    let mut run = |hook: ScreenHook| match systems_store.get(hook) {
        Some(id) => commands.run_system(id),
        None => warn!("Screen hook {:?} is not registered", hook),
    };
    let mut sound = |cmd: Option<AudioCmd>| {
        if let Some(cmd) = cmd {
            audio.write(cmd);
        }
    };
    let bank = bank.as_deref();

    // Exit hooks
    if old_screen == Screens::Menu {
        run(ScreenHook::DespawnMenu);
    }

    // Enter hooks
    match new_screen {
        Screens::Menu => {
            run(ScreenHook::SpawnMenu);
            sound(bank.and_then(|b| b.stop_track(Track::Engine)));
        }
        Screens::Playing => match old_screen {
            Screens::Paused => sound(bank.and_then(|b| b.resume_track(Track::Engine))),
            _ => {
                run(ScreenHook::ResetRace);
                sound(bank.and_then(|b| b.start_track(Track::Engine)));
            }
        },
        Screens::Paused => sound(bank.and_then(|b| b.pause_track(Track::Engine))),
        Screens::GameOver => {
            run(ScreenHook::RecordScore);
            sound(bank.and_then(|b| b.stop_track(Track::Engine)));
        }
        Screens::Instructions => debug!("Showing instructions"),
        Screens::HighScores => debug!("Showing high scores"),
        Screens::Quitting => info!("Quitting"),
    }
}
