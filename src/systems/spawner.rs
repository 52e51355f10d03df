//! Traffic and pickup spawning.
//!
//! [`plan_spawn`] is the decision: given the cars already on (or above) the
//! road it picks a vehicle, a lane and a height, or declines. It never places
//! a car within the safe distance of another car in the same lane, and never
//! closes the last open lane inside the wall band. A declined spawn is not an
//! error, the next attempt simply comes one period later.
//!
//! [`spawn_traffic`] and [`spawn_powerups`] are the systems that call the
//! planners on their timers and create the entities.
use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::components::boxcollider::BoxCollider;
use crate::components::car::{Lane, Traffic, VehicleKind};
use crate::components::mapposition::MapPosition;
use crate::components::powerup::{Powerup, PowerupKind};
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::{Sprite, SpriteKey};
use crate::components::zindex::ZIndex;
use crate::constants::{
    CRUISE_JITTER, MAX_LANES, POWERUP_CHANCE, POWERUP_PERIOD, POWERUP_SIZE, SAFE_SPAWN_DISTANCE,
    SAFE_SPAWN_GAP, SPAWN_Y_MAX, SPAWN_Y_MIN, TRAFFIC_CAP, WALL_BAND,
};
use crate::resources::gamestate::GameState;
use crate::resources::rng::RaceRng;
use crate::resources::road::RoadLayout;
use crate::resources::worldtime::WorldTime;

/// A car already in play, as seen by the planner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occupant {
    pub lane: usize,
    pub y: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    pub kind: VehicleKind,
    pub lane: usize,
    /// Centre height; always above the top of the screen.
    pub y: f32,
    /// Cruise speed in frame units.
    pub cruise: f32,
}

/// Minimum centre-to-centre distance between two cars in one lane.
pub fn safe_distance(height_a: f32, height_b: f32) -> f32 {
    SAFE_SPAWN_DISTANCE.max((height_a + height_b) * 0.5 + SAFE_SPAWN_GAP)
}

/// Whether placing a car of `height` at `y` in `lane` would crowd another.
pub fn lane_congested(occupants: &[Occupant], lane: usize, y: f32, height: f32) -> bool {
    occupants
        .iter()
        .any(|o| o.lane == lane && (o.y - y).abs() < safe_distance(o.height, height))
}

/// Lanes holding at least one car within the wall band around `y`.
fn blocked_lanes(occupants: &[Occupant], y: f32, lane_count: usize) -> ArrayVec<bool, MAX_LANES> {
    let mut blocked: ArrayVec<bool, MAX_LANES> = (0..lane_count).map(|_| false).collect();
    for o in occupants {
        if (o.y - y).abs() < WALL_BAND {
            if let Some(slot) = blocked.get_mut(o.lane) {
                *slot = true;
            }
        }
    }
    blocked
}

/// Candidate lanes for a car of `height` at `y`.
pub fn open_lanes(
    occupants: &[Occupant],
    lane_count: usize,
    y: f32,
    height: f32,
) -> ArrayVec<usize, MAX_LANES> {
    let lane_count = lane_count.min(MAX_LANES);
    let blocked = blocked_lanes(occupants, y, lane_count);
    let blocked_count = blocked.iter().filter(|&&b| b).count();

    (0..lane_count)
        .filter(|&lane| !lane_congested(occupants, lane, y, height))
        // Taking a free lane must leave another one free.
        .filter(|&lane| blocked[lane] || blocked_count + 1 < lane_count)
        .collect()
}

/// Decide the next traffic spawn, or `None` to skip this attempt.
pub fn plan_spawn(road: &RoadLayout, occupants: &[Occupant], rng: &mut RaceRng) -> Option<SpawnPlan> {
    if occupants.len() >= TRAFFIC_CAP {
        trace!("Traffic cap reached ({})", occupants.len());
        return None;
    }

    let kind = VehicleKind::from_roll(rng.0.u32(0..VehicleKind::total_weight()));
    let (_, height) = kind.size();
    let y = -rng.range_f32(SPAWN_Y_MIN, SPAWN_Y_MAX);

    let lanes = open_lanes(occupants, road.lane_count, y, height);
    if lanes.is_empty() {
        trace!("No open lane at y={}", y);
        return None;
    }
    let lane = lanes[rng.0.usize(0..lanes.len())];
    let cruise = kind.base_cruise() + rng.range_f32(0.0, CRUISE_JITTER);
    Some(SpawnPlan {
        kind,
        lane,
        y,
        cruise,
    })
}

pub fn spawn_traffic_car(commands: &mut Commands, road: &RoadLayout, plan: SpawnPlan, now: f32) -> Entity {
    let (width, height) = plan.kind.size();
    commands
        .spawn((
            Traffic::new(plan.kind, plan.cruise, now),
            Lane(plan.lane),
            MapPosition::new(road.lane_center(plan.lane), plan.y),
            BoxCollider::centered(width, height),
            RigidBody::new(),
            Sprite::new(SpriteKey::for_vehicle(plan.kind), width, height),
            ZIndex::TRAFFIC,
        ))
        .id()
}

/// Every spawn period, try to add one traffic car.
pub fn spawn_traffic(
    mut commands: Commands,
    time: Res<WorldTime>,
    mut state: ResMut<GameState>,
    road: Res<RoadLayout>,
    mut rng: ResMut<RaceRng>,
    traffic: Query<(&Lane, &MapPosition, &BoxCollider), With<Traffic>>,
) {
    if time.elapsed - state.last_spawn_at < state.spawn_period() {
        return;
    }
    state.last_spawn_at = time.elapsed;

    let occupants: Vec<Occupant> = traffic
        .iter()
        .map(|(lane, pos, collider)| Occupant {
            lane: lane.0,
            y: pos.y(),
            height: collider.size.y,
        })
        .collect();

    if let Some(plan) = plan_spawn(&road, &occupants, &mut rng) {
        let entity = spawn_traffic_car(&mut commands, &road, plan, time.elapsed);
        debug!(
            "Spawned {:?} {:?} in lane {} at y={:.0}",
            plan.kind, entity, plan.lane, plan.y
        );
    }
}

/// Every powerup period, maybe drop a nitro or shield pickup in a free lane.
pub fn spawn_powerups(
    mut commands: Commands,
    time: Res<WorldTime>,
    mut state: ResMut<GameState>,
    road: Res<RoadLayout>,
    mut rng: ResMut<RaceRng>,
    occupied: Query<(&Lane, &MapPosition, &BoxCollider), Or<(With<Traffic>, With<Powerup>)>>,
) {
    if time.elapsed - state.last_powerup_roll_at < POWERUP_PERIOD {
        return;
    }
    state.last_powerup_roll_at = time.elapsed;
    if rng.0.f32() >= POWERUP_CHANCE {
        return;
    }

    let y = -POWERUP_SIZE;
    let occupants: Vec<Occupant> = occupied
        .iter()
        .map(|(lane, pos, collider)| Occupant {
            lane: lane.0,
            y: pos.y(),
            height: collider.size.y,
        })
        .collect();
    let lanes: ArrayVec<usize, MAX_LANES> = (0..road.lane_count.min(MAX_LANES))
        .filter(|&lane| !lane_congested(&occupants, lane, y, POWERUP_SIZE))
        .collect();
    if lanes.is_empty() {
        return;
    }
    let lane = lanes[rng.0.usize(0..lanes.len())];
    let kind = PowerupKind::ALL[rng.0.usize(0..PowerupKind::ALL.len())];

    commands.spawn((
        Powerup { kind },
        Lane(lane),
        MapPosition::new(road.lane_center(lane), y),
        BoxCollider::centered(POWERUP_SIZE, POWERUP_SIZE),
        RigidBody::new(),
        Sprite::new(SpriteKey::for_powerup(kind), POWERUP_SIZE, POWERUP_SIZE),
        ZIndex::POWERUP,
    ));
    debug!("Spawned {:?} pickup in lane {}", kind, lane);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(lane: usize, y: f32) -> Occupant {
        Occupant {
            lane,
            y,
            height: 120.0,
        }
    }

    #[test]
    fn test_safe_distance_grows_with_height() {
        assert_eq!(safe_distance(60.0, 60.0), SAFE_SPAWN_DISTANCE);
        assert_eq!(safe_distance(140.0, 140.0), 200.0);
        assert_eq!(safe_distance(200.0, 140.0), 230.0);
    }

    #[test]
    fn test_lane_congested_only_same_lane() {
        let cars = [occ(1, -300.0)];
        assert!(lane_congested(&cars, 1, -400.0, 120.0));
        assert!(!lane_congested(&cars, 0, -400.0, 120.0));
        assert!(!lane_congested(&cars, 1, -600.0, 120.0));
    }

    #[test]
    fn test_open_lanes_never_walls_off_road() {
        // Three of four lanes hold a car near y=-400, but far enough that
        // none is congested at the spawn height.
        let cars = [occ(0, -150.0), occ(1, -150.0), occ(2, -150.0)];
        let lanes = open_lanes(&cars, 4, -400.0, 120.0);
        assert!(!lanes.contains(&3));
        assert_eq!(lanes.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_plan_respects_cap() {
        let road = RoadLayout::default();
        let cars: Vec<Occupant> = (0..TRAFFIC_CAP).map(|i| occ(i % 4, 5000.0 + i as f32 * 500.0)).collect();
        let mut rng = RaceRng::seeded(3);
        assert!(plan_spawn(&road, &cars, &mut rng).is_none());
    }

    #[test]
    fn test_plan_on_empty_road() {
        let road = RoadLayout::default();
        let mut rng = RaceRng::seeded(11);
        for _ in 0..64 {
            let plan = plan_spawn(&road, &[], &mut rng).unwrap();
            assert!(plan.lane < road.lane_count);
            assert!(plan.y <= -SPAWN_Y_MIN && plan.y >= -SPAWN_Y_MAX);
            let base = plan.kind.base_cruise();
            assert!(plan.cruise >= base && plan.cruise <= base + CRUISE_JITTER);
        }
    }
}
