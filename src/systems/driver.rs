//! Player driving: lane changes and throttle.
//!
//! Steering is lane based. A steer press starts a short eased slide to the
//! centre of the neighbouring lane, after which further presses are ignored
//! for a cooldown. Throttle changes the forward speed, which in turn scales
//! how fast the road and the traffic scroll past.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::car::{Lane, Player};
use crate::components::mapposition::MapPosition;
use crate::constants::{
    DISPLAY_SPEED_SMOOTHING, NITRO_BOOST, PLAYER_ACCEL, PLAYER_BRAKE, PLAYER_CRUISE_SPEED,
    PLAYER_DRAG, PLAYER_MAX_SPEED, PLAYER_MIN_SPEED,
};
use crate::events::lanechange::LaneChanged;
use crate::resources::input::DriverIntent;
use crate::resources::road::RoadLayout;
use crate::resources::worldtime::WorldTime;

/// Highest forward speed the player may reach right now.
pub fn speed_cap(nitro_left: f32) -> f32 {
    if nitro_left > 0.0 {
        PLAYER_MAX_SPEED + NITRO_BOOST
    } else {
        PLAYER_MAX_SPEED
    }
}

/// Advance forward speed by one step of `dt` seconds.
///
/// Accelerating and braking at once cancel the drag but not each other.
/// Coasting bleeds speed back towards cruise.
pub fn next_speed(speed: f32, accelerate: bool, brake: bool, nitro_left: f32, dt: f32) -> f32 {
    let mut speed = speed;
    if accelerate {
        speed += PLAYER_ACCEL * dt;
    }
    if brake {
        speed -= PLAYER_BRAKE * dt;
    }
    if !accelerate && !brake {
        let drag = PLAYER_DRAG * speed / PLAYER_MAX_SPEED * dt;
        if speed > PLAYER_CRUISE_SPEED {
            speed = (speed - drag).max(PLAYER_CRUISE_SPEED);
        } else if speed < PLAYER_CRUISE_SPEED {
            speed = (speed + drag).min(PLAYER_CRUISE_SPEED);
        }
    }
    speed.clamp(PLAYER_MIN_SPEED, speed_cap(nitro_left))
}

/// Target lane for a steer request, or `None` at the road edge.
pub fn target_lane(current: usize, step: i32, lane_count: usize) -> Option<usize> {
    if step == 0 {
        return None;
    }
    let target = current as i64 + step as i64;
    if target < 0 || target >= lane_count as i64 {
        None
    } else {
        Some(target as usize)
    }
}

pub fn drive_player(
    mut commands: Commands,
    intent: Res<DriverIntent>,
    time: Res<WorldTime>,
    road: Res<RoadLayout>,
    mut players: Query<(Entity, &mut Player, &mut Lane, &mut MapPosition)>,
) {
    let dt = time.delta;
    for (entity, mut player, mut lane, mut pos) in players.iter_mut() {
        if !player.alive {
            continue;
        }
        player.lane_cooldown = (player.lane_cooldown - dt).max(0.0);

        if player.lane_cooldown <= 0.0 {
            if let Some(to) = target_lane(lane.0, intent.lane_step(), road.lane_count) {
                let from = lane.0;
                let from_x = pos.x();
                player.begin_slide(from_x, road.lane_center(to));
                lane.0 = to;
                debug!("Lane change {} -> {}", from, to);
                commands.trigger(LaneChanged {
                    player: entity,
                    from,
                    to,
                });
            }
        }

        let x = player.advance_slide(dt);
        pos.pos.x = road.clamp_player_x(x);
        pos.pos.y = road.player_y();

        player.speed = next_speed(player.speed, intent.accelerate, intent.brake, player.nitro, dt);
        player.nitro = (player.nitro - dt).max(0.0);
        let blend = (DISPLAY_SPEED_SMOOTHING * dt).min(1.0);
        player.display_speed += (player.speed - player.display_speed) * blend;
    }
}
