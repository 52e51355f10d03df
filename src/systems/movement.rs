//! Kinematic movement: position += velocity * delta.
use bevy_ecs::prelude::*;

use crate::components::car::Player;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::gamestate::GameState;
use crate::resources::road::RoadLayout;
use crate::resources::worldtime::WorldTime;
use crate::systems::traffic::throttle_factor;

pub fn movement_system(mut query: Query<(&mut MapPosition, &RigidBody)>, time: Res<WorldTime>) {
    for (mut position, rigidbody) in query.iter_mut() {
        position.pos.x += rigidbody.velocity.x * time.delta;
        position.pos.y += rigidbody.velocity.y * time.delta;
    }
}

/// Scroll the road markings and count the distance driven.
pub fn scroll_road(
    mut state: ResMut<GameState>,
    road: Res<RoadLayout>,
    time: Res<WorldTime>,
    players: Query<&Player>,
) {
    let throttle = players
        .iter()
        .next()
        .map(|p| throttle_factor(p.speed))
        .unwrap_or(1.0);
    let step = state.scroll_speed * throttle * time.delta;
    state.distance += step;
    state.road_offset = (state.road_offset + step).rem_euclid(road.screen_height.max(1.0));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_integrates_velocity() {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta: 0.5,
            ..WorldTime::default()
        });
        let e = world
            .spawn((MapPosition::new(10.0, 20.0), RigidBody::with_velocity(4.0, -8.0)))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(movement_system);
        schedule.run(&mut world);

        let pos = world.get::<MapPosition>(e).unwrap();
        assert_eq!(pos.x(), 12.0);
        assert_eq!(pos.y(), 16.0);
    }
}
