//! Keyboard polling.
//!
//! [`update_input_state`] reads raylib once per frame and writes the result
//! into [`InputState`]. It runs on the main thread outside any schedule,
//! because the raylib handle is owned by the game loop.
use raylib::RaylibHandle;

use crate::resources::input::{BoolState, InputState};

/// Fold the states of every key bound to an action into one.
fn poll_action(rl: &RaylibHandle, action: &mut BoolState) {
    let mut active = false;
    let mut pressed = false;
    let mut released = false;
    for key in action.keys() {
        active |= rl.is_key_down(key);
        pressed |= rl.is_key_pressed(key);
        released |= rl.is_key_released(key);
    }
    action.active = active;
    action.just_pressed = pressed;
    action.just_released = released && !active;
}

pub fn update_input_state(rl: &RaylibHandle, input: &mut InputState) {
    for action in input.actions_mut() {
        poll_action(rl, action);
    }
}
