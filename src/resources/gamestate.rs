//! Race state: score, speed and the game-over flag.
//!
//! [`GameState`] is the record the per-frame update advances. The entity
//! collection (player, traffic, powerups) lives next to it in the same ECS
//! `World`, owned by [`Race`](crate::race::Race).
//!
//! Speed is derived from score by [`scroll_speed_for`] and
//! [`difficulty_for`]; both are non-decreasing in the score and capped.

use bevy_ecs::prelude::Resource;

use crate::constants::{
    DIFFICULTY_STEP, DIFFICULTY_STEP_SCORE, NEAR_MISS_BONUS, NEAR_MISS_COMBO_MULT,
    NEAR_MISS_COMBO_WINDOW, NEAR_MISS_MAX_COMBO, SCROLL_BASE, SCROLL_CAP_FACTOR,
    SCROLL_SCORE_SCALE, SPAWN_PERIOD_BASE, SPAWN_PERIOD_MIN,
};

/// Road scroll speed in pixels per second at cruise throttle.
pub fn scroll_speed_for(score: u64) -> f32 {
    let factor = 1.0 + score as f32 / SCROLL_SCORE_SCALE;
    SCROLL_BASE * factor.min(SCROLL_CAP_FACTOR)
}

/// Spawn-rate multiplier; grows by one step every thousand points.
pub fn difficulty_for(score: u64) -> f32 {
    1.0 + (score / DIFFICULTY_STEP_SCORE) as f32 * DIFFICULTY_STEP
}

/// Seconds between traffic spawn attempts at a given difficulty.
pub fn spawn_period_for(difficulty: f32) -> f32 {
    (SPAWN_PERIOD_BASE / difficulty.max(1.0)).max(SPAWN_PERIOD_MIN)
}

#[derive(Resource, Debug, Clone)]
pub struct GameState {
    pub score: u64,
    /// Fractional survival points not yet added to `score`.
    pub score_remainder: f32,
    /// Pixels per second at cruise throttle; see [`scroll_speed_for`].
    pub scroll_speed: f32,
    pub difficulty: f32,
    pub game_over: bool,
    /// Road marking offset for the renderer, wraps at the screen height.
    pub road_offset: f32,
    /// Pixels of road driven this race.
    pub distance: f32,
    /// Race time of the last traffic spawn attempt.
    pub last_spawn_at: f32,
    /// Race time of the last powerup roll.
    pub last_powerup_roll_at: f32,
    pub near_miss_combo: u32,
    /// Race time of the last near miss; `None` before the first one.
    pub last_near_miss_at: Option<f32>,
    pub overtakes: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            score_remainder: 0.0,
            scroll_speed: scroll_speed_for(0),
            difficulty: difficulty_for(0),
            game_over: false,
            road_offset: 0.0,
            distance: 0.0,
            last_spawn_at: 0.0,
            last_powerup_roll_at: 0.0,
            near_miss_combo: 0,
            last_near_miss_at: None,
            overtakes: 0,
        }
    }

    /// Add whole points. Ignored once the race is over.
    pub fn add_points(&mut self, points: u64) {
        if self.game_over {
            return;
        }
        self.score = self.score.saturating_add(points);
    }

    /// Accumulate fractional points, carrying the remainder between frames.
    pub fn add_fractional_points(&mut self, points: f32) {
        if self.game_over || !points.is_finite() || points <= 0.0 {
            return;
        }
        self.score_remainder += points;
        let whole = self.score_remainder.floor();
        if whole >= 1.0 {
            self.score_remainder -= whole;
            self.add_points(whole as u64);
        }
    }

    /// Recompute scroll speed and difficulty from the current score.
    pub fn recompute_speed(&mut self) {
        self.scroll_speed = scroll_speed_for(self.score);
        self.difficulty = difficulty_for(self.score);
    }

    pub fn spawn_period(&self) -> f32 {
        spawn_period_for(self.difficulty)
    }

    /// Register a near miss at race time `now` and return the awarded bonus.
    ///
    /// Consecutive near misses within the combo window raise the combo up to
    /// its cap; each combo step adds a quarter of the base bonus.
    pub fn register_near_miss(&mut self, now: f32) -> u64 {
        if self.game_over {
            return 0;
        }
        let chained = self
            .last_near_miss_at
            .is_some_and(|last| now - last <= NEAR_MISS_COMBO_WINDOW);
        self.near_miss_combo = if chained {
            (self.near_miss_combo + 1).min(NEAR_MISS_MAX_COMBO)
        } else {
            1
        };
        self.last_near_miss_at = Some(now);
        let multiplier = 1.0 + (self.near_miss_combo - 1) as f32 * NEAR_MISS_COMBO_MULT;
        let bonus = (NEAR_MISS_BONUS * multiplier) as u64;
        self.add_points(bonus);
        bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new();
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert_eq!(state.scroll_speed, SCROLL_BASE);
        assert_eq!(state.difficulty, 1.0);
        assert_eq!(state.spawn_period(), SPAWN_PERIOD_BASE);
    }

    #[test]
    fn test_scroll_speed_is_monotonic_and_capped() {
        let mut prev = scroll_speed_for(0);
        for score in (0..40_000).step_by(250) {
            let s = scroll_speed_for(score);
            assert!(s >= prev);
            assert!(s <= SCROLL_BASE * SCROLL_CAP_FACTOR);
            prev = s;
        }
        assert_eq!(scroll_speed_for(1_000_000), SCROLL_BASE * SCROLL_CAP_FACTOR);
    }

    #[test]
    fn test_difficulty_steps() {
        assert_eq!(difficulty_for(999), 1.0);
        assert!((difficulty_for(1000) - 1.1).abs() < 1e-6);
        assert!((difficulty_for(2500) - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_period_has_floor() {
        assert_eq!(spawn_period_for(1.0), 0.9);
        assert_eq!(spawn_period_for(100.0), SPAWN_PERIOD_MIN);
        assert_eq!(spawn_period_for(0.0), 0.9);
    }

    #[test]
    fn test_fractional_points_carry() {
        let mut state = GameState::new();
        state.add_fractional_points(0.6);
        assert_eq!(state.score, 0);
        state.add_fractional_points(0.6);
        assert_eq!(state.score, 1);
        assert!((state.score_remainder - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_no_points_after_game_over() {
        let mut state = GameState::new();
        state.add_points(10);
        state.game_over = true;
        state.add_points(10);
        state.add_fractional_points(5.0);
        assert_eq!(state.register_near_miss(1.0), 0);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_near_miss_combo_chain_and_reset() {
        let mut state = GameState::new();
        assert_eq!(state.register_near_miss(1.0), 250);
        assert_eq!(state.register_near_miss(2.0), 312);
        assert_eq!(state.register_near_miss(3.0), 375);
        assert_eq!(state.near_miss_combo, 3);
        // Window expired.
        assert_eq!(state.register_near_miss(10.0), 250);
        assert_eq!(state.near_miss_combo, 1);
        assert_eq!(state.score, 250 + 312 + 375 + 250);
    }

    #[test]
    fn test_near_miss_combo_caps() {
        let mut state = GameState::new();
        let mut last = 0;
        for i in 0..10 {
            last = state.register_near_miss(i as f32 * 0.5);
        }
        assert_eq!(state.near_miss_combo, NEAR_MISS_MAX_COMBO);
        assert_eq!(last, 562);
    }
}
