//! Score and speed progression.
//!
//! Points come from survival time and from overtaking traffic; near-miss
//! bonuses are awarded by the lane change observer. Speed is recomputed from
//! the score after scoring, so it can only grow with it.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::car::{Player, Traffic};
use crate::components::mapposition::MapPosition;
use crate::constants::{OVERTAKE_POINTS, SURVIVAL_POINTS_PER_SECOND};
use crate::resources::gamestate::GameState;
use crate::resources::worldtime::WorldTime;

pub fn score_survival(time: Res<WorldTime>, mut state: ResMut<GameState>) {
    state.add_fractional_points(SURVIVAL_POINTS_PER_SECOND * time.delta);
}

/// Award points once for every car whose centre drops below the player's.
pub fn score_overtakes(
    mut state: ResMut<GameState>,
    players: Query<&MapPosition, With<Player>>,
    mut traffic: Query<(&MapPosition, &mut Traffic)>,
) {
    let Some(player_y) = players.iter().next().map(|p| p.y()) else {
        return;
    };
    for (pos, mut car) in traffic.iter_mut() {
        if car.passed || pos.y() <= player_y {
            continue;
        }
        car.passed = true;
        state.overtakes += 1;
        state.add_points(OVERTAKE_POINTS);
        debug!("Overtook {:?} (total {})", car.kind, state.overtakes);
    }
}

pub fn recompute_speed(mut state: ResMut<GameState>) {
    let before = state.difficulty;
    state.recompute_speed();
    if state.difficulty > before {
        debug!(
            "Difficulty {:.1}, scroll {:.0} px/s",
            state.difficulty, state.scroll_speed
        );
    }
}
