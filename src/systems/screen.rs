//! Front-end screen flow.
//!
//! - [`check_pending_screen`] fires [`ScreenChangedEvent`] when a transition
//!   has been requested
//! - [`menu_controller`] moves through the title menu and confirms items
//! - [`screen_keys`] handles pause, resume and the "back" paths
//! - [`register_screen_hooks`] registers the one-shot systems the transition
//!   observer runs on enter/exit
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::menu::Menu;
use crate::events::menu::MenuSelectionEvent;
use crate::events::screen::ScreenChangedEvent;
use crate::events::switchdebug::SwitchDebugEvent;
use crate::race::reset_world;
use crate::resources::gamestate::GameState;
use crate::resources::highscores::HighScores;
use crate::resources::input::InputState;
use crate::resources::screen::{NextScreen, NextScreens, Screen, Screens};
use crate::resources::systemsstore::{ScreenHook, SystemsStore};

pub fn check_pending_screen(mut commands: Commands, next_screen: Res<NextScreen>) {
    if let NextScreens::Pending(_) = next_screen.get() {
        commands.trigger(ScreenChangedEvent {});
    }
}

pub fn state_is_menu(screen: Res<Screen>) -> bool {
    matches!(screen.get(), Screens::Menu)
}

pub fn menu_controller(
    input: Res<InputState>,
    mut commands: Commands,
    mut menus: Query<(Entity, &mut Menu)>,
) {
    for (entity, mut menu) in menus.iter_mut() {
        if !menu.active {
            continue;
        }
        if input.up.just_pressed {
            menu.select_previous();
        }
        if input.down.just_pressed {
            menu.select_next();
        }
        if input.confirm.just_pressed {
            if let Some(action) = menu.selected().map(|item| item.action) {
                menu.active = false;
                commands.trigger(MenuSelectionEvent {
                    menu: entity,
                    action,
                });
            }
        }
    }
}

/// Keys that move between screens outside the title menu.
pub fn screen_keys(input: Res<InputState>, screen: Res<Screen>, mut next_screen: ResMut<NextScreen>) {
    let target = match screen.get() {
        Screens::Menu if input.back.just_pressed => Some(Screens::Quitting),
        Screens::Playing if input.pause.just_pressed || input.back.just_pressed => {
            Some(Screens::Paused)
        }
        Screens::Paused if input.pause.just_pressed || input.confirm.just_pressed => {
            Some(Screens::Playing)
        }
        Screens::Paused if input.back.just_pressed => Some(Screens::Menu),
        Screens::GameOver | Screens::Instructions | Screens::HighScores
            if input.confirm.just_pressed || input.back.just_pressed =>
        {
            Some(Screens::Menu)
        }
        _ => None,
    };
    if let Some(target) = target {
        next_screen.set(target);
    }
}

pub fn toggle_debug(input: Res<InputState>, mut commands: Commands) {
    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
}

fn reset_race_hook(world: &mut World) {
    reset_world(world);
}

fn spawn_menu(mut commands: Commands) {
    commands.spawn(Menu::title());
}

fn despawn_menu(mut commands: Commands, menus: Query<Entity, With<Menu>>) {
    for entity in menus.iter() {
        commands.entity(entity).despawn();
    }
}

fn record_score(state: Res<GameState>, mut table: ResMut<HighScores>) {
    match table.record(state.score) {
        Some(0) => info!("New best score: {}", state.score),
        Some(rank) => info!("Score {} ranks #{}", state.score, rank + 1),
        None => debug!("Score {} did not make the table", state.score),
    }
}

/// Register the screen hooks and insert the [`SystemsStore`] holding them.
pub fn register_screen_hooks(world: &mut World) {
    let mut systems_store = SystemsStore::new();
    let id = world.register_system(reset_race_hook);
    systems_store.insert(ScreenHook::ResetRace, id);
    let id = world.register_system(spawn_menu);
    systems_store.insert(ScreenHook::SpawnMenu, id);
    let id = world.register_system(despawn_menu);
    systems_store.insert(ScreenHook::DespawnMenu, id);
    let id = world.register_system(record_score);
    systems_store.insert(ScreenHook::RecordScore, id);
    world.insert_resource(systems_store);
}
