//! The race: world, schedule and the per-frame update.
//!
//! [`Race`] owns the ECS `World` holding the [`GameState`], the player, the
//! traffic and every effect, plus the single-threaded schedule that advances
//! them. It has no window or audio device of its own, so it runs the same in
//! the game and in tests.
//!
//! One [`Race::update`] runs, in order: player driving, velocity refresh,
//! movement, road scroll, off-screen cull, crash detection, pickups,
//! scoring, speed, the spawners, nitro trail and TTL. Every step from the
//! crash check on is skipped in the frame that ends the race, and later
//! updates do nothing until [`Race::reset`].
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use log::info;

use crate::components::boxcollider::{Aabb, BoxCollider};
use crate::components::car::{Lane, Player, Traffic};
use crate::components::mapposition::MapPosition;
use crate::components::particle::{Particle, Popup};
use crate::components::powerup::Powerup;
use crate::components::sprite::{Sprite, SpriteKey};
use crate::components::zindex::ZIndex;
use crate::constants::{PLAYER_HEIGHT, PLAYER_WIDTH, SIM_STEP};
use crate::events::audio::AudioCmd;
use crate::events::lanechange::observe_near_miss;
use crate::resources::gamestate::GameState;
use crate::resources::input::DriverIntent;
use crate::resources::rng::RaceRng;
use crate::resources::road::RoadLayout;
use crate::resources::soundbank::SoundBank;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::{collect_powerups, collides, detect_crash};
use crate::systems::driver::drive_player;
use crate::systems::movement::{movement_system, scroll_road};
use crate::systems::particles::emit_nitro_trail;
use crate::systems::scoring::{recompute_speed, score_overtakes, score_survival};
use crate::systems::spawner::{spawn_powerups, spawn_traffic};
use crate::systems::time::{sanitize_delta, update_world_time};
use crate::systems::traffic::{cull_offscreen, refresh_velocities};
use crate::systems::ttl::ttl_system;

pub fn race_in_progress(state: Res<GameState>) -> bool {
    !state.game_over
}

pub struct Race {
    world: World,
    schedule: Schedule,
}

impl Race {
    /// A fresh race on `road`. `seed` fixes the traffic pattern.
    pub fn new(road: RoadLayout, seed: Option<u64>) -> Self {
        Self::with_world(World::new(), road, seed)
    }

    /// Build a race inside an existing world, keeping its resources.
    ///
    /// Missing race resources are created; a [`SoundBank`] already present
    /// is kept, otherwise every sound is silent.
    pub fn with_world(mut world: World, road: RoadLayout, seed: Option<u64>) -> Self {
        world.insert_resource(road);
        world.insert_resource(match seed {
            Some(seed) => RaceRng::seeded(seed),
            None => RaceRng::default(),
        });
        world.init_resource::<DriverIntent>();
        world.init_resource::<SoundBank>();
        world.init_resource::<Messages<AudioCmd>>();
        world.spawn(Observer::new(observe_near_miss));
        reset_world(&mut world);

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems(
            (
                drive_player,
                refresh_velocities,
                movement_system,
                scroll_road,
                cull_offscreen,
                detect_crash,
                collect_powerups,
                score_survival,
                score_overtakes,
                recompute_speed,
                spawn_traffic,
                spawn_powerups,
                emit_nitro_trail,
                ttl_system,
            )
                .chain()
                .distributive_run_if(race_in_progress),
        );

        Self { world, schedule }
    }

    /// Advance the race by `dt` seconds with the driver's `intent`.
    ///
    /// Does nothing once the race is over. Long frames are integrated in
    /// substeps no longer than [`SIM_STEP`] so fast traffic cannot skip past
    /// the player between two collision checks.
    pub fn update(&mut self, dt: f32, intent: DriverIntent) {
        if self.is_over() {
            return;
        }
        let dt = sanitize_delta(dt);
        let steps = (dt / SIM_STEP).ceil().max(1.0) as u32;
        let step = dt / steps as f32;
        for _ in 0..steps {
            self.world.insert_resource(intent);
            update_world_time(&mut self.world, step);
            self.schedule.run(&mut self.world);
            if self.is_over() {
                break;
            }
        }
    }

    /// Start over: clears traffic, pickups and effects, score and speed.
    pub fn reset(&mut self) {
        reset_world(&mut self.world);
    }

    pub fn state(&self) -> &GameState {
        self.world.resource::<GameState>()
    }

    pub fn is_over(&self) -> bool {
        self.state().game_over
    }

    pub fn road(&self) -> &RoadLayout {
        self.world.resource::<RoadLayout>()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&mut self) -> Option<Entity> {
        self.world
            .query_filtered::<Entity, With<Player>>()
            .iter(&self.world)
            .next()
    }

    pub fn traffic_count(&mut self) -> usize {
        self.world
            .query_filtered::<(), With<Traffic>>()
            .iter(&self.world)
            .count()
    }

    /// Whether the player's box currently overlaps any traffic car.
    pub fn player_overlaps_traffic(&mut self) -> bool {
        let Some(player) = self
            .world
            .query_filtered::<(&MapPosition, &BoxCollider), With<Player>>()
            .iter(&self.world)
            .next()
            .map(|(pos, collider)| collider.aabb(pos.pos))
        else {
            return false;
        };
        let traffic: Vec<Aabb> = self
            .world
            .query_filtered::<(&MapPosition, &BoxCollider), With<Traffic>>()
            .iter(&self.world)
            .map(|(pos, collider)| collider.aabb(pos.pos))
            .collect();
        collides(&player, traffic)
    }
}

/// Put `world` back at the start line.
///
/// Despawns the player, traffic, pickups and effects, resets the game state
/// and race clock, and spawns a new player in the middle lane. Resources
/// owned by the front end are left alone.
pub fn reset_world(world: &mut World) {
    let doomed: Vec<Entity> = world
        .query_filtered::<Entity, Or<(
            With<Player>,
            With<Traffic>,
            With<Powerup>,
            With<Particle>,
            With<Popup>,
        )>>()
        .iter(world)
        .collect();
    for entity in doomed {
        world.despawn(entity);
    }

    let road = *world.get_resource_or_insert_with(RoadLayout::default);
    world.insert_resource(GameState::new());
    world.insert_resource(WorldTime::default());
    world.insert_resource(DriverIntent::idle());
    spawn_player(world, &road);
    info!(
        "Race reset: {} lanes, player in lane {}",
        road.lane_count,
        road.start_lane()
    );
}

pub fn spawn_player(world: &mut World, road: &RoadLayout) -> Entity {
    let lane = road.start_lane();
    let x = road.lane_center(lane);
    world
        .spawn((
            Player::new(x),
            Lane(lane),
            MapPosition::new(x, road.player_y()),
            BoxCollider::centered(PLAYER_WIDTH, PLAYER_HEIGHT),
            Sprite::new(SpriteKey::PlayerCar, PLAYER_WIDTH, PLAYER_HEIGHT),
            ZIndex::PLAYER,
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_race_has_one_player_and_no_traffic() {
        let mut race = Race::new(RoadLayout::default(), Some(1));
        assert!(race.player().is_some());
        assert_eq!(race.traffic_count(), 0);
        assert_eq!(race.state().score, 0);
        assert!(!race.is_over());
    }

    #[test]
    fn test_player_starts_in_middle_lane() {
        let mut race = Race::new(RoadLayout::default(), Some(1));
        let player = race.player().unwrap();
        let lane = race.world().get::<Lane>(player).unwrap().0;
        let pos = *race.world().get::<MapPosition>(player).unwrap();
        assert_eq!(lane, 2);
        assert_eq!(pos.x(), race.road().lane_center(2));
        assert_eq!(pos.y(), race.road().player_y());
    }

    #[test]
    fn test_zero_and_negative_deltas_do_not_score() {
        let mut race = Race::new(RoadLayout::default(), Some(1));
        race.update(0.0, DriverIntent::idle());
        race.update(-5.0, DriverIntent::idle());
        race.update(f32::NAN, DriverIntent::idle());
        assert_eq!(race.state().score, 0);
        assert_eq!(race.world().resource::<WorldTime>().elapsed, 0.0);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut race = Race::new(RoadLayout::default(), Some(1));
        race.update(10.0, DriverIntent::idle());
        let elapsed = race.world().resource::<WorldTime>().elapsed;
        assert!((elapsed - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_reset_keeps_single_player() {
        let mut race = Race::new(RoadLayout::default(), Some(1));
        race.reset();
        race.reset();
        let players = race
            .world_mut()
            .query_filtered::<(), With<Player>>()
            .iter(race.world())
            .count();
        assert_eq!(players, 1);
    }
}
