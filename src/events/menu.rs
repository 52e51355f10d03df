//! Menu selection event and observer.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::menu::MenuAction;
use crate::resources::screen::{NextScreen, Screens};

#[derive(Event, Debug, Clone, Copy)]
pub struct MenuSelectionEvent {
    pub menu: Entity,
    pub action: MenuAction,
}

/// Turn the chosen menu item into a screen request.
pub fn menu_selection_observer(
    trigger: On<MenuSelectionEvent>,
    mut next_screen: ResMut<NextScreen>,
) {
    let action = trigger.event().action;
    info!("Menu selection: {:?}", action);
    let target = match action {
        MenuAction::StartGame => Screens::Playing,
        MenuAction::ShowInstructions => Screens::Instructions,
        MenuAction::ShowHighScores => Screens::HighScores,
        MenuAction::Quit => Screens::Quitting,
    };
    next_screen.set(target);
}
