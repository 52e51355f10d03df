//! Cosmetic particles: crash and shield sparks, the nitro exhaust trail.
//!
//! Particles are plain entities with a velocity and a [`Ttl`]; movement and
//! the TTL system take care of the rest.
use bevy_ecs::prelude::*;
use raylib::prelude::{Color, Vector2};

use crate::components::car::Player;
use crate::components::mapposition::MapPosition;
use crate::components::particle::Particle;
use crate::components::rigidbody::RigidBody;
use crate::components::ttl::Ttl;
use crate::components::zindex::ZIndex;
use crate::constants::PLAYER_HEIGHT;
use crate::resources::rng::RaceRng;

pub struct SparkBurst {
    pub count: usize,
    pub speed: (f32, f32),
    pub lifetime: (f32, f32),
    pub size: (f32, f32),
    pub color: Color,
}

pub const CRASH_SPARKS: SparkBurst = SparkBurst {
    count: 28,
    speed: (80.0, 320.0),
    lifetime: (0.4, 1.0),
    size: (2.0, 6.0),
    color: Color {
        r: 255,
        g: 170,
        b: 40,
        a: 255,
    },
};

pub const SHIELD_SPARKS: SparkBurst = SparkBurst {
    count: 16,
    speed: (60.0, 220.0),
    lifetime: (0.3, 0.7),
    size: (2.0, 4.0),
    color: Color {
        r: 120,
        g: 255,
        b: 160,
        a: 255,
    },
};

const TRAIL_COLOR: Color = Color {
    r: 80,
    g: 200,
    b: 255,
    a: 255,
};
const TRAIL_PER_FRAME: usize = 2;

/// Spawn a radial burst of particles at `at`.
pub fn spawn_sparks(commands: &mut Commands, rng: &mut RaceRng, at: Vector2, burst: &SparkBurst) {
    for _ in 0..burst.count {
        let angle = rng.range_f32(0.0, std::f32::consts::TAU);
        let speed = rng.range_f32(burst.speed.0, burst.speed.1);
        commands.spawn((
            Particle {
                color: burst.color,
                size: rng.range_f32(burst.size.0, burst.size.1),
            },
            MapPosition::new(at.x, at.y),
            RigidBody::with_velocity(angle.cos() * speed, angle.sin() * speed),
            Ttl::new(rng.range_f32(burst.lifetime.0, burst.lifetime.1)),
            ZIndex::EFFECTS,
        ));
    }
}

/// Exhaust particles behind the player while nitro is active.
pub fn emit_nitro_trail(
    mut commands: Commands,
    mut rng: ResMut<RaceRng>,
    players: Query<(&Player, &MapPosition)>,
) {
    for (player, pos) in players.iter() {
        if player.nitro <= 0.0 || !player.alive {
            continue;
        }
        let tail_y = pos.y() + PLAYER_HEIGHT * 0.5;
        for _ in 0..TRAIL_PER_FRAME {
            commands.spawn((
                Particle {
                    color: TRAIL_COLOR,
                    size: rng.range_f32(3.0, 7.0),
                },
                MapPosition::new(pos.x() + rng.range_f32(-12.0, 12.0), tail_y),
                RigidBody::with_velocity(rng.range_f32(-20.0, 20.0), rng.range_f32(180.0, 260.0)),
                Ttl::new(rng.range_f32(0.25, 0.45)),
                ZIndex::EFFECTS,
            ));
        }
    }
}
