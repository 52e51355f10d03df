//! Spawner safety and collision detector properties.

use raylib::prelude::Vector2;

use speedrush::components::boxcollider::{Aabb, BoxCollider};
use speedrush::constants::TRAFFIC_CAP;
use speedrush::resources::rng::RaceRng;
use speedrush::resources::road::RoadLayout;
use speedrush::systems::collision::{collides, first_overlap};
use speedrush::systems::spawner::{Occupant, open_lanes, plan_spawn, safe_distance};

fn at(x: f32, y: f32) -> Vector2 {
    Vector2 { x, y }
}

#[test]
fn identical_boxes_always_collide() {
    for (w, h) in [(1.0, 1.0), (60.0, 120.0), (100.0, 140.0), (0.5, 900.0)] {
        for (x, y) in [(0.0, 0.0), (-300.0, 42.0), (512.5, -800.0)] {
            let a = Aabb::from_center(at(x, y), w, h);
            assert!(collides(&a, [a]));
        }
    }
}

#[test]
fn boxes_with_zero_overlap_never_collide() {
    let player = BoxCollider::centered(60.0, 120.0).aabb(at(400.0, 460.0));
    let touching = [
        Aabb::from_center(at(460.0, 460.0), 60.0, 120.0),
        Aabb::from_center(at(340.0, 460.0), 60.0, 120.0),
        Aabb::from_center(at(400.0, 580.0), 60.0, 120.0),
        Aabb::from_center(at(400.0, 340.0), 60.0, 120.0),
        Aabb::from_center(at(460.0, 580.0), 60.0, 120.0),
    ];
    for other in touching {
        assert!(!collides(&player, [other]), "{:?} only touches", other);
    }
    let far = Aabb::from_center(at(100.0, -500.0), 100.0, 140.0);
    assert!(!collides(&player, [far]));
}

#[test]
fn first_overlap_reports_the_hit_car() {
    let player = Aabb::from_center(at(0.0, 0.0), 60.0, 120.0);
    let others = vec![
        ("clear", Aabb::from_center(at(200.0, 0.0), 60.0, 120.0)),
        ("hit", Aabb::from_center(at(30.0, 100.0), 60.0, 120.0)),
    ];
    assert_eq!(first_overlap(&player, others), Some("hit"));
}

/// Simulate many spawn attempts with traffic scrolling down between them and
/// check every accepted plan against the cars already present.
#[test]
fn spawner_never_crowds_a_lane() {
    let road = RoadLayout::default();
    let mut rng = RaceRng::seeded(2024);
    let mut occupants: Vec<Occupant> = Vec::new();
    let mut accepted = 0;

    for step in 0..5000 {
        if let Some(plan) = plan_spawn(&road, &occupants, &mut rng) {
            let (_, height) = plan.kind.size();
            assert!(plan.lane < road.lane_count);
            assert!(plan.y < 0.0);
            for o in occupants.iter().filter(|o| o.lane == plan.lane) {
                assert!(
                    (o.y - plan.y).abs() >= safe_distance(o.height, height),
                    "step {}: lane {} crowded ({} vs {})",
                    step,
                    plan.lane,
                    o.y,
                    plan.y
                );
            }
            occupants.push(Occupant {
                lane: plan.lane,
                y: plan.y,
                height,
            });
            accepted += 1;
        }
        assert!(occupants.len() <= TRAFFIC_CAP);

        let shift = 40.0 + (step % 7) as f32 * 10.0;
        for o in occupants.iter_mut() {
            o.y += shift;
        }
        occupants.retain(|o| o.y - o.height * 0.5 <= road.screen_height);
    }
    assert!(accepted > 100);
}

#[test]
fn spawner_keeps_one_lane_open_in_the_wall_band() {
    let road = RoadLayout::default();
    let occupants = [
        Occupant {
            lane: 0,
            y: -350.0,
            height: 120.0,
        },
        Occupant {
            lane: 1,
            y: -360.0,
            height: 120.0,
        },
        Occupant {
            lane: 2,
            y: -340.0,
            height: 120.0,
        },
    ];
    let lanes = open_lanes(&occupants, road.lane_count, -600.0, 120.0);
    assert_eq!(lanes.as_slice(), &[0, 1, 2]);
}

#[test]
fn spawner_respects_the_traffic_cap() {
    let road = RoadLayout::default();
    let mut rng = RaceRng::seeded(1);
    let occupants: Vec<Occupant> = (0..TRAFFIC_CAP)
        .map(|i| Occupant {
            lane: i % road.lane_count,
            y: 10_000.0 + i as f32 * 1000.0,
            height: 120.0,
        })
        .collect();
    for _ in 0..50 {
        assert!(plan_spawn(&road, &occupants, &mut rng).is_none());
    }
}
