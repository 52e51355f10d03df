//! Traffic and pickup motion on the scrolling road.
//!
//! The player's car stays at a fixed height; everything else moves down the
//! screen. Traffic speed is its own cruise speed plus the road scroll, scaled
//! by how hard the player is driving. Pickups sit on the road and only move
//! with the scroll.
use bevy_ecs::prelude::*;
use log::trace;

use crate::components::boxcollider::BoxCollider;
use crate::components::car::{Player, Traffic};
use crate::components::mapposition::MapPosition;
use crate::components::powerup::Powerup;
use crate::components::rigidbody::RigidBody;
use crate::constants::{FRAME_UNITS, PLAYER_CRUISE_SPEED};
use crate::resources::gamestate::GameState;
use crate::resources::road::RoadLayout;

/// Player speed relative to cruise; 1.0 at cruise.
pub fn throttle_factor(player_speed: f32) -> f32 {
    (player_speed / PLAYER_CRUISE_SPEED).max(0.0)
}

/// Downward screen speed of a traffic car, pixels per second.
pub fn traffic_speed(cruise: f32, scroll_speed: f32, throttle: f32) -> f32 {
    cruise * FRAME_UNITS + scroll_speed * throttle
}

/// Set traffic and pickup velocities for this frame.
pub fn refresh_velocities(
    state: Res<GameState>,
    players: Query<&Player>,
    mut traffic: Query<(&Traffic, &mut RigidBody), Without<Powerup>>,
    mut powerups: Query<&mut RigidBody, (With<Powerup>, Without<Traffic>)>,
) {
    let throttle = players
        .iter()
        .next()
        .map(|p| throttle_factor(p.speed))
        .unwrap_or(1.0);

    for (car, mut body) in traffic.iter_mut() {
        body.scroll_down(traffic_speed(car.cruise, state.scroll_speed, throttle));
    }
    for mut body in powerups.iter_mut() {
        body.scroll_down(state.scroll_speed * throttle);
    }
}

/// Whether a box centred at `y` with `height` has left through the bottom.
pub fn is_below_screen(y: f32, height: f32, screen_height: f32) -> bool {
    y - height.abs() * 0.5 > screen_height
}

/// Despawn traffic and pickups that have scrolled off the bottom.
pub fn cull_offscreen(
    mut commands: Commands,
    road: Res<RoadLayout>,
    query: Query<(Entity, &MapPosition, &BoxCollider), Or<(With<Traffic>, With<Powerup>)>>,
) {
    for (entity, pos, collider) in query.iter() {
        if is_below_screen(pos.y(), collider.size.y, road.screen_height) {
            trace!("Culling {:?} at y={}", entity, pos.y());
            commands.entity(entity).try_despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_factor() {
        assert_eq!(throttle_factor(PLAYER_CRUISE_SPEED), 1.0);
        assert_eq!(throttle_factor(24.0), 2.0);
        assert_eq!(throttle_factor(-3.0), 0.0);
    }

    #[test]
    fn test_traffic_speed_combines_cruise_and_scroll() {
        assert_eq!(traffic_speed(6.0, 240.0, 1.0), 600.0);
        assert_eq!(traffic_speed(5.0, 240.0, 0.5), 420.0);
    }

    #[test]
    fn test_below_screen_uses_top_edge() {
        assert!(!is_below_screen(600.0, 120.0, 600.0));
        assert!(!is_below_screen(660.0, 120.0, 600.0));
        assert!(is_below_screen(660.5, 120.0, 600.0));
    }
}
