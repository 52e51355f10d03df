//! Lane change event and the near-miss bonus.
//!
//! The driving system triggers [`LaneChanged`] when the player starts moving
//! into a neighbouring lane. [`observe_near_miss`] then looks for traffic in
//! the destination lane close to the player and, if there is any, awards a
//! near-miss bonus and shows a popup.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;
use raylib::prelude::Color;

use crate::components::car::{Lane, Player, Traffic};
use crate::components::mapposition::MapPosition;
use crate::components::particle::Popup;
use crate::components::rigidbody::RigidBody;
use crate::components::ttl::Ttl;
use crate::components::zindex::ZIndex;
use crate::constants::{NEAR_MISS_DISTANCE, POPUP_LIFETIME};
use crate::events::audio::AudioCmd;
use crate::resources::gamestate::GameState;
use crate::resources::soundbank::{Sfx, SoundBank};
use crate::resources::worldtime::WorldTime;

/// Upward drift of score popups, pixels per second.
const POPUP_RISE: f32 = 60.0;
const POPUP_COLOR: Color = Color {
    r: 255,
    g: 220,
    b: 60,
    a: 255,
};

#[derive(Event, Debug, Clone, Copy)]
pub struct LaneChanged {
    pub player: Entity,
    pub from: usize,
    pub to: usize,
}

pub fn observe_near_miss(
    trigger: On<LaneChanged>,
    mut commands: Commands,
    players: Query<&MapPosition, With<Player>>,
    traffic: Query<(&Lane, &MapPosition), With<Traffic>>,
    time: Res<WorldTime>,
    mut state: ResMut<GameState>,
    bank: Res<SoundBank>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let event = trigger.event();
    let Ok(player_pos) = players.get(event.player) else {
        return;
    };
    let close = traffic.iter().any(|(lane, pos)| {
        lane.0 == event.to && (pos.y() - player_pos.y()).abs() < NEAR_MISS_DISTANCE
    });
    if !close {
        return;
    }

    let bonus = state.register_near_miss(time.elapsed);
    if bonus == 0 {
        return;
    }
    debug!(
        "Near miss into lane {} (combo x{}): +{}",
        event.to, state.near_miss_combo, bonus
    );
    if let Some(cmd) = bank.play_fx(Sfx::NearMiss) {
        audio.write(cmd);
    }
    let text = if state.near_miss_combo > 1 {
        format!("NEAR MISS x{} +{}", state.near_miss_combo, bonus)
    } else {
        format!("NEAR MISS +{}", bonus)
    };
    spawn_popup(&mut commands, player_pos.x(), player_pos.y() - 80.0, text);
}

/// Floating score text that rises and fades out.
pub fn spawn_popup(commands: &mut Commands, x: f32, y: f32, text: String) {
    commands.spawn((
        Popup {
            text,
            color: POPUP_COLOR,
        },
        MapPosition::new(x, y),
        RigidBody::with_velocity(0.0, -POPUP_RISE),
        Ttl::new(POPUP_LIFETIME),
        ZIndex::EFFECTS,
    ));
}
