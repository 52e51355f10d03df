//! High-level screen state resources.
//!
//! [`Screen`] is the authoritative screen the game shows; [`NextScreen`] holds
//! a transition requested by a system. See
//! `crate::events::screen::observe_screen_change_event` for how a transition
//! is applied and its enter/exit hooks run.

use bevy_ecs::prelude::Resource;

/// Discrete screens the game can be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screens {
    #[default]
    Menu,
    Instructions,
    HighScores,
    Playing,
    Paused,
    GameOver,
    Quitting,
}

/// Representation of a requested next screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NextScreens {
    #[default]
    Unchanged,
    Pending(Screens),
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Screen {
    current: Screens,
}

impl Screen {
    pub fn new() -> Self {
        Screen {
            current: Screens::Menu,
        }
    }

    pub fn get(&self) -> Screens {
        self.current
    }

    /// Set the current screen immediately, without running hooks.
    pub fn set(&mut self, screen: Screens) {
        self.current = screen;
    }
}

/// Intent to change to another screen.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextScreen {
    next: NextScreens,
}

impl NextScreen {
    pub fn new() -> Self {
        NextScreen {
            next: NextScreens::Unchanged,
        }
    }

    pub fn get(&self) -> NextScreens {
        self.next
    }

    /// Request a transition; `check_pending_screen` fires the change event.
    pub fn set(&mut self, next: Screens) {
        self.next = NextScreens::Pending(next);
    }

    pub fn reset(&mut self) {
        self.next = NextScreens::Unchanged;
    }
}
