//! Interactive menu component.
//!
//! A [`Menu`] entity exists while the title screen is shown. The controller
//! system moves the selection and, on confirm, triggers a
//! [`MenuSelectionEvent`](crate::events::menu::MenuSelectionEvent) carrying
//! the selected [`MenuAction`].
use bevy_ecs::prelude::Component;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuAction {
    StartGame,
    ShowInstructions,
    ShowHighScores,
    Quit,
}

#[derive(Clone, Debug)]
pub struct MenuItem {
    pub action: MenuAction,
    pub label: &'static str,
}

#[derive(Component, Clone, Debug)]
pub struct Menu {
    pub items: Vec<MenuItem>,
    pub selected_index: usize,
    /// Cleared once an item has been chosen.
    pub active: bool,
}

impl Menu {
    pub fn new(items: &[(MenuAction, &'static str)]) -> Self {
        Self {
            items: items
                .iter()
                .map(|&(action, label)| MenuItem { action, label })
                .collect(),
            selected_index: 0,
            active: true,
        }
    }

    /// The title screen menu.
    pub fn title() -> Self {
        Self::new(&[
            (MenuAction::StartGame, "Start Game"),
            (MenuAction::ShowInstructions, "Instructions"),
            (MenuAction::ShowHighScores, "High Scores"),
            (MenuAction::Quit, "Quit"),
        ])
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.items.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.items.is_empty() {
            self.selected_index = (self.selected_index + self.items.len() - 1) % self.items.len();
        }
    }

    pub fn selected(&self) -> Option<&MenuItem> {
        self.items.get(self.selected_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_menu_starts_on_first_item() {
        let menu = Menu::title();
        assert_eq!(menu.items.len(), 4);
        assert_eq!(menu.selected().map(|i| i.action), Some(MenuAction::StartGame));
        assert!(menu.active);
    }

    #[test]
    fn test_selection_wraps_both_ways() {
        let mut menu = Menu::title();
        menu.select_previous();
        assert_eq!(menu.selected().map(|i| i.action), Some(MenuAction::Quit));
        menu.select_next();
        assert_eq!(menu.selected_index, 0);
        menu.select_next();
        assert_eq!(menu.selected().map(|i| i.action), Some(MenuAction::ShowInstructions));
        menu.select_next();
        assert_eq!(menu.selected().map(|i| i.action), Some(MenuAction::ShowHighScores));
    }

    #[test]
    fn test_empty_menu_is_inert() {
        let mut menu = Menu::new(&[]);
        menu.select_next();
        menu.select_previous();
        assert!(menu.selected().is_none());
    }
}
