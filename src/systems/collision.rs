//! Collision detection between the player and everything else on the road.
//!
//! [`first_overlap`] and [`collides`] are the pure detector: axis-aligned box
//! overlap, where boxes that only touch along an edge do not collide. The
//! systems below run it after movement each frame:
//! - [`detect_crash`] against traffic, consuming a shield charge or ending
//!   the race
//! - [`collect_powerups`] against pickups
use bevy_ecs::prelude::*;
use log::info;
use smallvec::SmallVec;

use crate::components::boxcollider::{Aabb, BoxCollider};
use crate::components::car::{Player, Traffic};
use crate::components::mapposition::MapPosition;
use crate::components::powerup::{Powerup, PowerupKind};
use crate::constants::{NITRO_DURATION, NITRO_KICK, NITRO_KICK_CAP};
use crate::events::audio::AudioCmd;
use crate::events::crash::CrashEvent;
use crate::events::lanechange::spawn_popup;
use crate::resources::gamestate::GameState;
use crate::resources::rng::RaceRng;
use crate::resources::soundbank::{Sfx, SoundBank};
use crate::systems::particles::{CRASH_SPARKS, SHIELD_SPARKS, spawn_sparks};

/// First candidate whose box overlaps `player`.
pub fn first_overlap<T, I>(player: &Aabb, others: I) -> Option<T>
where
    I: IntoIterator<Item = (T, Aabb)>,
{
    others
        .into_iter()
        .find(|(_, aabb)| player.overlaps(aabb))
        .map(|(id, _)| id)
}

/// Whether any of `others` overlaps `player`.
pub fn collides<I>(player: &Aabb, others: I) -> bool
where
    I: IntoIterator<Item = Aabb>,
{
    others.into_iter().any(|aabb| player.overlaps(&aabb))
}

pub fn detect_crash(
    mut commands: Commands,
    mut state: ResMut<GameState>,
    mut rng: ResMut<RaceRng>,
    bank: Res<SoundBank>,
    mut audio: MessageWriter<AudioCmd>,
    mut players: Query<(Entity, &MapPosition, &BoxCollider, &mut Player)>,
    traffic: Query<(Entity, &MapPosition, &BoxCollider), With<Traffic>>,
) {
    for (player_entity, player_pos, player_box, mut player) in players.iter_mut() {
        if !player.alive {
            continue;
        }
        let player_aabb = player_box.aabb(player_pos.pos);
        let mut candidates: SmallVec<[(Entity, Aabb); 8]> = traffic
            .iter()
            .map(|(e, pos, collider)| (e, collider.aabb(pos.pos)))
            .collect();

        while let Some(other) = first_overlap(&player_aabb, candidates.iter().copied()) {
            candidates.retain(|(e, _)| *e != other);
            if player.shield > 0 {
                player.shield -= 1;
                info!("Shield absorbed hit from {:?} ({} left)", other, player.shield);
                commands.entity(other).try_despawn();
                if let Some(cmd) = bank.play_fx(Sfx::Shield) {
                    audio.write(cmd);
                }
                spawn_sparks(&mut commands, &mut rng, player_pos.pos, &SHIELD_SPARKS);
                continue;
            }

            player.alive = false;
            state.game_over = true;
            if let Some(cmd) = bank.play_fx(Sfx::Crash) {
                audio.write(cmd);
            }
            spawn_sparks(&mut commands, &mut rng, player_pos.pos, &CRASH_SPARKS);
            commands.trigger(CrashEvent {
                player: player_entity,
                other,
                score: state.score,
            });
            break;
        }
    }
}

pub fn collect_powerups(
    mut commands: Commands,
    bank: Res<SoundBank>,
    mut audio: MessageWriter<AudioCmd>,
    mut players: Query<(&MapPosition, &BoxCollider, &mut Player)>,
    powerups: Query<(Entity, &MapPosition, &BoxCollider, &Powerup)>,
) {
    for (player_pos, player_box, mut player) in players.iter_mut() {
        if !player.alive {
            continue;
        }
        let player_aabb = player_box.aabb(player_pos.pos);
        let mut candidates: SmallVec<[((Entity, PowerupKind), Aabb); 4]> = powerups
            .iter()
            .map(|(e, pos, collider, powerup)| ((e, powerup.kind), collider.aabb(pos.pos)))
            .collect();

        while let Some((entity, kind)) = first_overlap(&player_aabb, candidates.iter().copied()) {
            candidates.retain(|((e, _), _)| *e != entity);
            let (sfx, label) = match kind {
                PowerupKind::Nitro => {
                    player.nitro = NITRO_DURATION;
                    player.speed = (player.speed + NITRO_KICK).min(NITRO_KICK_CAP);
                    (Sfx::Nitro, "NITRO!")
                }
                PowerupKind::Shield => {
                    player.shield += 1;
                    (Sfx::Shield, "SHIELD")
                }
            };
            info!("Picked up {:?}", kind);
            commands.entity(entity).try_despawn();
            if let Some(cmd) = bank.play_fx(sfx) {
                audio.write(cmd);
            }
            spawn_popup(
                &mut commands,
                player_pos.x(),
                player_pos.y() - 80.0,
                label.to_string(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::Vector2;

    fn boxed(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::from_center(Vector2 { x, y }, w, h)
    }

    #[test]
    fn test_identical_boxes_collide() {
        let a = boxed(100.0, 100.0, 60.0, 120.0);
        assert!(collides(&a, [a]));
    }

    #[test]
    fn test_disjoint_boxes_do_not_collide() {
        let a = boxed(100.0, 100.0, 60.0, 120.0);
        assert!(!collides(&a, [boxed(300.0, 100.0, 60.0, 120.0)]));
        assert!(!collides(&a, std::iter::empty()));
    }

    #[test]
    fn test_edge_contact_is_not_a_collision() {
        let a = boxed(0.0, 0.0, 60.0, 120.0);
        assert!(!collides(&a, [boxed(60.0, 0.0, 60.0, 120.0)]));
        assert!(!collides(&a, [boxed(0.0, 120.0, 60.0, 120.0)]));
    }

    #[test]
    fn test_first_overlap_picks_the_hit() {
        let player = boxed(0.0, 0.0, 60.0, 120.0);
        let others = [
            ("far", boxed(500.0, 0.0, 60.0, 120.0)),
            ("hit", boxed(30.0, 50.0, 60.0, 120.0)),
            ("also", boxed(0.0, 0.0, 10.0, 10.0)),
        ];
        assert_eq!(first_overlap(&player, others), Some("hit"));
        assert_eq!(first_overlap(&player, [("far", boxed(500.0, 0.0, 1.0, 1.0))]), None);
    }
}
