//! Per-frame keyboard input resources.
//!
//! [`InputState`] captures the keys the game cares about, each with a primary
//! and an optional alternative binding (WASD and the arrow keys drive the
//! same actions). The race itself never sees keys: it receives a
//! [`DriverIntent`] derived from the input state.
use bevy_ecs::prelude::*;
use raylib::prelude::KeyboardKey;

/// Boolean key state with its keyboard bindings.
#[derive(Debug, Clone, Copy)]
pub struct BoolState {
    /// Whether either binding is held this frame.
    pub active: bool,
    /// Whether either binding went down this frame.
    pub just_pressed: bool,
    /// Whether either binding went up this frame.
    pub just_released: bool,
    pub key_binding: KeyboardKey,
    pub alt_binding: Option<KeyboardKey>,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(KeyboardKey::KEY_NULL, None)
    }
}

impl BoolState {
    pub fn bound(key_binding: KeyboardKey, alt_binding: Option<KeyboardKey>) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding,
            alt_binding,
        }
    }

    /// Keys bound to this action.
    pub fn keys(&self) -> impl Iterator<Item = KeyboardKey> {
        std::iter::once(self.key_binding).chain(self.alt_binding)
    }
}

#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub up: BoolState,
    pub down: BoolState,
    pub left: BoolState,
    pub right: BoolState,
    pub confirm: BoolState,
    pub back: BoolState,
    pub pause: BoolState,
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            up: BoolState::bound(KeyboardKey::KEY_W, Some(KeyboardKey::KEY_UP)),
            down: BoolState::bound(KeyboardKey::KEY_S, Some(KeyboardKey::KEY_DOWN)),
            left: BoolState::bound(KeyboardKey::KEY_A, Some(KeyboardKey::KEY_LEFT)),
            right: BoolState::bound(KeyboardKey::KEY_D, Some(KeyboardKey::KEY_RIGHT)),
            confirm: BoolState::bound(KeyboardKey::KEY_ENTER, Some(KeyboardKey::KEY_SPACE)),
            back: BoolState::bound(KeyboardKey::KEY_ESCAPE, None),
            pause: BoolState::bound(KeyboardKey::KEY_P, None),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F11, None),
        }
    }
}

impl InputState {
    /// Mutable access to every action, for the polling system.
    pub fn actions_mut(&mut self) -> [&mut BoolState; 8] {
        [
            &mut self.up,
            &mut self.down,
            &mut self.left,
            &mut self.right,
            &mut self.confirm,
            &mut self.back,
            &mut self.pause,
            &mut self.mode_debug,
        ]
    }

    /// Reduce the current key state to what the driver wants this frame.
    pub fn driver_intent(&self) -> DriverIntent {
        DriverIntent {
            steer_left: self.left.just_pressed,
            steer_right: self.right.just_pressed,
            accelerate: self.up.active,
            brake: self.down.active,
        }
    }
}

/// What the player asks of the car for one frame.
///
/// Steering is edge-triggered: a press requests one lane change. Throttle and
/// brake are held.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverIntent {
    pub steer_left: bool,
    pub steer_right: bool,
    pub accelerate: bool,
    pub brake: bool,
}

impl DriverIntent {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn left() -> Self {
        Self {
            steer_left: true,
            ..Self::default()
        }
    }

    pub fn right() -> Self {
        Self {
            steer_right: true,
            ..Self::default()
        }
    }

    pub fn throttle() -> Self {
        Self {
            accelerate: true,
            ..Self::default()
        }
    }

    /// Lane step requested: -1, 0 or +1. Both directions cancel out.
    pub fn lane_step(&self) -> i32 {
        self.steer_right as i32 - self.steer_left as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
        assert_eq!(bs.key_binding, KeyboardKey::KEY_NULL);
        assert_eq!(bs.keys().count(), 1);
    }

    #[test]
    fn test_inputstate_default_bindings() {
        let input = InputState::default();
        assert_eq!(input.up.key_binding, KeyboardKey::KEY_W);
        assert_eq!(input.up.alt_binding, Some(KeyboardKey::KEY_UP));
        assert_eq!(input.left.alt_binding, Some(KeyboardKey::KEY_LEFT));
        assert_eq!(input.right.key_binding, KeyboardKey::KEY_D);
        assert_eq!(input.confirm.alt_binding, Some(KeyboardKey::KEY_SPACE));
        assert_eq!(input.back.key_binding, KeyboardKey::KEY_ESCAPE);
        assert_eq!(input.pause.key_binding, KeyboardKey::KEY_P);
        assert_eq!(input.mode_debug.key_binding, KeyboardKey::KEY_F11);
        assert_eq!(input.down.keys().count(), 2);
    }

    #[test]
    fn test_default_intent_is_idle() {
        let input = InputState::default();
        assert_eq!(input.driver_intent(), DriverIntent::idle());
    }

    #[test]
    fn test_intent_steering_is_edge_triggered() {
        let mut input = InputState::default();
        input.left.active = true;
        assert_eq!(input.driver_intent().lane_step(), 0);
        input.left.just_pressed = true;
        assert_eq!(input.driver_intent().lane_step(), -1);
    }

    #[test]
    fn test_intent_throttle_is_held() {
        let mut input = InputState::default();
        input.up.active = true;
        input.down.active = true;
        let intent = input.driver_intent();
        assert!(intent.accelerate);
        assert!(intent.brake);
    }

    #[test]
    fn test_opposite_steer_cancels() {
        let intent = DriverIntent {
            steer_left: true,
            steer_right: true,
            ..DriverIntent::default()
        };
        assert_eq!(intent.lane_step(), 0);
        assert_eq!(DriverIntent::right().lane_step(), 1);
    }
}
