//! Race tick integration tests: scoring, culling, crashes, shields and reset.

use bevy_ecs::prelude::*;

use speedrush::components::boxcollider::BoxCollider;
use speedrush::components::car::{Lane, Player, Traffic, VehicleKind};
use speedrush::components::mapposition::MapPosition;
use speedrush::components::powerup::{Powerup, PowerupKind};
use speedrush::components::rigidbody::RigidBody;
use speedrush::constants::{
    NEAR_MISS_BONUS, NEAR_MISS_DISTANCE, POWERUP_SIZE, SCROLL_BASE, SCROLL_CAP_FACTOR,
};
use speedrush::events::audio::AudioCmd;
use speedrush::race::Race;
use speedrush::resources::gamestate::{GameState, scroll_speed_for};
use speedrush::resources::input::DriverIntent;
use speedrush::resources::road::RoadLayout;
use speedrush::resources::soundbank::{Sfx, SoundBank};

const FRAME: f32 = 1.0 / 60.0;

fn new_race(seed: u64) -> Race {
    Race::new(RoadLayout::default(), Some(seed))
}

fn place_traffic(race: &mut Race, lane: usize, y: f32) -> Entity {
    let x = race.road().lane_center(lane);
    let (w, h) = VehicleKind::Car.size();
    race.world_mut()
        .spawn((
            Traffic::new(VehicleKind::Car, VehicleKind::Car.base_cruise(), 0.0),
            Lane(lane),
            MapPosition::new(x, y),
            BoxCollider::centered(w, h),
            RigidBody::new(),
        ))
        .id()
}

fn player_y(race: &Race) -> f32 {
    race.road().player_y()
}

fn drive(race: &mut Race, frames: usize) {
    for _ in 0..frames {
        race.update(FRAME, DriverIntent::idle());
    }
}

fn drain_audio(race: &mut Race) -> Vec<AudioCmd> {
    race.world_mut()
        .resource_mut::<Messages<AudioCmd>>()
        .drain()
        .collect()
}

#[test]
fn score_never_decreases_while_racing() {
    let mut race = new_race(42);
    let intents = [
        DriverIntent::idle(),
        DriverIntent::left(),
        DriverIntent::throttle(),
        DriverIntent::right(),
    ];
    let mut last = race.state().score;
    for frame in 0..3000 {
        if race.is_over() {
            break;
        }
        race.update(FRAME, intents[(frame / 20) % intents.len()]);
        let score = race.state().score;
        assert!(score >= last, "score dropped from {} to {}", last, score);
        last = score;
    }
}

#[test]
fn survival_adds_ten_points_per_second() {
    let mut race = new_race(1);
    drive(&mut race, 60);
    assert!(!race.is_over());
    let score = race.state().score;
    assert!((9..=10).contains(&score), "score after one second: {}", score);
}

#[test]
fn offscreen_traffic_is_removed_within_one_frame() {
    let mut race = new_race(3);
    let below = race.road().screen_height + 200.0;
    let gone = place_traffic(&mut race, 0, below);
    let kept = place_traffic(&mut race, 0, -400.0);
    race.update(FRAME, DriverIntent::idle());
    assert!(race.world().get::<Traffic>(gone).is_none());
    assert!(race.world().get::<Traffic>(kept).is_some());
}

#[test]
fn crash_in_lane_two_ends_race_and_freezes_score() {
    let mut race = new_race(5);
    drive(&mut race, 30);
    let before = race.state().score;
    assert!(before > 0);

    let y = player_y(&race);
    place_traffic(&mut race, 2, y);
    race.update(FRAME, DriverIntent::idle());
    assert!(race.is_over());
    assert_eq!(race.state().score, before);

    drive(&mut race, 120);
    assert_eq!(race.state().score, before);

    let player = race.player().unwrap();
    assert!(!race.world().get::<Player>(player).unwrap().alive);
}

#[test]
fn silent_bank_crash_still_completes_the_frame() {
    let mut race = new_race(7);
    drain_audio(&mut race);
    let y = player_y(&race);
    place_traffic(&mut race, 2, y);
    race.update(FRAME, DriverIntent::idle());

    assert!(race.is_over());
    let cmds = drain_audio(&mut race);
    assert!(
        !cmds.iter().any(|c| matches!(c, AudioCmd::PlayFx { .. })),
        "silent sounds must not be played: {:?}",
        cmds
    );
}

#[test]
fn found_crash_sound_is_played_on_crash() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(Sfx::Crash.file_name()), b"RIFF").unwrap();
    let (bank, loads) = SoundBank::from_dir(dir.path());
    assert_eq!(loads.len(), 1);

    let mut world = World::new();
    world.insert_resource(bank);
    let mut race = Race::with_world(world, RoadLayout::default(), Some(9));
    let y = player_y(&race);
    place_traffic(&mut race, 2, y);
    race.update(FRAME, DriverIntent::idle());

    let cmds = drain_audio(&mut race);
    assert!(cmds.contains(&AudioCmd::PlayFx {
        id: Sfx::Crash.id().to_string()
    }));
}

#[test]
fn shield_absorbs_exactly_one_crash() {
    let mut race = new_race(11);
    let player = race.player().unwrap();
    race.world_mut().get_mut::<Player>(player).unwrap().shield = 1;

    let y = player_y(&race);
    let first = place_traffic(&mut race, 2, y);
    race.update(FRAME, DriverIntent::idle());
    assert!(!race.is_over());
    assert!(race.world().get::<Traffic>(first).is_none());
    assert_eq!(race.world().get::<Player>(player).unwrap().shield, 0);

    place_traffic(&mut race, 2, y);
    race.update(FRAME, DriverIntent::idle());
    assert!(race.is_over());
}

#[test]
fn one_shield_cannot_absorb_two_simultaneous_hits() {
    let mut race = new_race(11);
    let player = race.player().unwrap();
    race.world_mut().get_mut::<Player>(player).unwrap().shield = 1;

    let y = player_y(&race);
    place_traffic(&mut race, 2, y - 10.0);
    place_traffic(&mut race, 2, y + 10.0);
    race.update(FRAME, DriverIntent::idle());
    assert!(race.is_over());
    assert_eq!(race.world().get::<Player>(player).unwrap().shield, 0);
}

#[test]
fn overlapping_pickups_are_all_collected() {
    let mut race = new_race(29);
    let player = race.player().unwrap();
    let x = race.road().lane_center(2);
    let y = player_y(&race);
    for kind in PowerupKind::ALL {
        race.world_mut().spawn((
            Powerup { kind },
            Lane(2),
            MapPosition::new(x, y),
            BoxCollider::centered(POWERUP_SIZE, POWERUP_SIZE),
            RigidBody::new(),
        ));
    }
    race.update(FRAME, DriverIntent::idle());

    let driver = race.world().get::<Player>(player).unwrap();
    assert_eq!(driver.shield, 1);
    assert!(driver.nitro > 0.0);
    let world = race.world_mut();
    assert_eq!(world.query::<&Powerup>().iter(world).count(), 0);
}

#[test]
fn near_miss_lane_change_awards_bonus() {
    let mut race = new_race(13);
    let y = player_y(&race) + 150.0;
    place_traffic(&mut race, 1, y);
    race.update(FRAME, DriverIntent::left());

    let state = race.state();
    assert!(!state.game_over);
    assert_eq!(state.near_miss_combo, 1);
    assert!(state.score >= NEAR_MISS_BONUS as u64);
}

#[test]
fn traffic_at_the_near_miss_edge_is_not_close() {
    let mut race = new_race(13);
    let y = player_y(&race) + NEAR_MISS_DISTANCE;
    place_traffic(&mut race, 1, y);
    race.update(FRAME, DriverIntent::left());

    assert_eq!(race.state().near_miss_combo, 0);
    assert!(race.state().score < NEAR_MISS_BONUS as u64);
}

#[test]
fn fast_traffic_cannot_skip_past_the_player_in_a_long_frame() {
    let mut race = new_race(23);
    race.world_mut().resource_mut::<GameState>().score = 20_000;
    race.world_mut().resource_mut::<GameState>().recompute_speed();
    let player = race.player().unwrap();
    {
        let mut driver = race.world_mut().get_mut::<Player>(player).unwrap();
        driver.speed = 40.0;
        driver.nitro = 3.0;
    }
    let y = player_y(&race) - 121.0;
    let x = race.road().lane_center(2);
    let (w, h) = VehicleKind::Car.size();
    race.world_mut().spawn((
        Traffic::new(VehicleKind::Car, 8.0, 0.0),
        Lane(2),
        MapPosition::new(x, y),
        BoxCollider::centered(w, h),
        RigidBody::new(),
    ));
    assert!(!race.player_overlaps_traffic());

    race.update(0.1, DriverIntent::throttle());
    assert!(race.is_over());
}

#[test]
fn lane_change_without_traffic_earns_nothing_extra() {
    let mut race = new_race(13);
    race.update(FRAME, DriverIntent::left());
    assert_eq!(race.state().near_miss_combo, 0);
    assert!(race.state().score < NEAR_MISS_BONUS as u64);
}

#[test]
fn reset_clears_game_over_score_and_traffic() {
    let mut race = new_race(17);
    drive(&mut race, 90);
    let y = player_y(&race);
    place_traffic(&mut race, 2, y);
    race.update(FRAME, DriverIntent::idle());
    assert!(race.is_over());

    race.reset();
    assert!(!race.is_over());
    assert_eq!(race.state().score, 0);
    assert_eq!(race.traffic_count(), 0);
    assert!(!race.player_overlaps_traffic());

    race.update(FRAME, DriverIntent::idle());
    assert!(!race.is_over());
}

#[test]
fn scroll_speed_grows_with_score_and_is_capped() {
    let mut race = new_race(19);
    let mut last = race.state().scroll_speed;
    for _ in 0..600 {
        if race.is_over() {
            break;
        }
        race.update(FRAME, DriverIntent::throttle());
        let speed = race.state().scroll_speed;
        assert!(speed >= last);
        last = speed;
    }

    let cap = SCROLL_BASE * SCROLL_CAP_FACTOR;
    let mut previous = scroll_speed_for(0);
    for score in (0..200_000u64).step_by(997) {
        let speed = scroll_speed_for(score);
        assert!(speed >= previous);
        assert!(speed <= cap);
        previous = speed;
    }
    assert_eq!(scroll_speed_for(u64::MAX), cap);
}

#[test]
fn same_seed_replays_the_same_traffic() {
    let mut a = new_race(23);
    let mut b = new_race(23);
    drive(&mut a, 240);
    drive(&mut b, 240);
    assert_eq!(a.traffic_count(), b.traffic_count());
    assert_eq!(a.state().score, b.state().score);
    assert_eq!(a.is_over(), b.is_over());
}
