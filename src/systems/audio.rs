//! Audio thread and the systems bridging it with the world.
//!
//! - [`audio_thread`] runs on its own OS thread, owns the raylib audio
//!   device and every loaded sound, and processes [`AudioCmd`] values.
//! - [`poll_audio_messages`] drains the thread's replies into
//!   `Messages<AudioMessage>` each frame.
//! - [`forward_audio_cmds`] sends the commands written by game systems.
//! - [`downgrade_failed_sounds`] turns sounds the thread could not decode
//!   into silence.
//! - [`update_engine_volume`] follows the player's speed with the engine
//!   loop volume.
//!
//! With no [`AudioBridge`] in the world the bridge systems do nothing, so
//! every sound request is a no-op.

use crate::components::car::Player;
use crate::constants::PLAYER_MAX_SPEED;
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use crate::resources::gameconfig::GameConfig;
use crate::resources::soundbank::{SoundBank, Track};
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::{debug, info, trace, warn};
use raylib::core::audio::{Music, RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};

/// Smallest engine volume change worth sending.
const ENGINE_VOLUME_STEP: f32 = 0.02;
/// Engine loop volume at standstill, as a share of the configured volume.
const ENGINE_IDLE_SHARE: f32 = 0.4;

pub fn poll_audio_messages(bridge: Option<Res<AudioBridge>>, mut writer: MessageWriter<AudioMessage>) {
    if let Some(bridge) = bridge {
        writer.write_batch(bridge.rx_msg.try_iter());
    }
}

/// Advance the `AudioMessage` queue so this frame's replies become readable.
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

pub fn forward_audio_cmds(bridge: Option<Res<AudioBridge>>, mut reader: MessageReader<AudioCmd>) {
    let Some(bridge) = bridge else {
        // Still consume, so the reader does not replay them later.
        reader.read().for_each(drop);
        return;
    };
    for cmd in reader.read() {
        trace!("audio <- {:?}", cmd);
        // The thread only hangs up on shutdown.
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

pub fn downgrade_failed_sounds(mut reader: MessageReader<AudioMessage>, mut bank: ResMut<SoundBank>) {
    for msg in reader.read() {
        match msg {
            AudioMessage::FxLoadFailed { id, error } | AudioMessage::MusicLoadFailed { id, error } => {
                warn!("Sound '{}' failed to load ({}); it will be silent", id, error);
                bank.downgrade(id);
            }
            AudioMessage::FxLoaded { id } | AudioMessage::MusicLoaded { id } => {
                debug!("Sound '{}' ready", id);
            }
            AudioMessage::MusicFinished { id } => debug!("Track '{}' finished", id),
        }
    }
}

/// Engine loop volume for a displayed speed.
pub fn engine_volume_for(display_speed: f32, configured: f32) -> f32 {
    let share = (display_speed / PLAYER_MAX_SPEED).clamp(0.0, 1.0);
    configured * (ENGINE_IDLE_SHARE + (1.0 - ENGINE_IDLE_SHARE) * share)
}

pub fn update_engine_volume(
    bank: Res<SoundBank>,
    config: Res<GameConfig>,
    players: Query<&Player>,
    mut last_sent: Local<f32>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let Some(player) = players.iter().next() else {
        return;
    };
    let vol = engine_volume_for(player.display_speed, config.engine_volume);
    if (vol - *last_sent).abs() < ENGINE_VOLUME_STEP {
        return;
    }
    if let Some(cmd) = bank.set_track_volume(Track::Engine, vol) {
        audio.write(cmd);
        *last_sent = vol;
    }
}

/// Entry point of the dedicated audio thread.
///
/// Owns all `Music` and `Sound` handles for the life of the thread, reacts
/// to [`AudioCmd`] inputs and reports load results and finished tracks.
/// Blocks until it receives [`AudioCmd::Shutdown`] or the game hangs up.
///
/// If the audio device cannot be opened, load commands are answered with a
/// failure (so the game downgrades those sounds) and everything else is
/// dropped.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_evt: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            warn!("Failed to initialize audio device: {}; running silent", e);
            run_without_device(&rx_cmd, &tx_evt, &e.to_string());
            return;
        }
    };

    info!(
        "[audio] thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut musics: FxHashMap<String, Music> = FxHashMap::default();
    let mut playing: FxHashSet<String> = FxHashSet::default();
    let mut looped: FxHashSet<String> = FxHashSet::default();
    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();

    'run: loop {
        // 1) Drain commands
        loop {
            let cmd = match rx_cmd.try_recv() {
                Ok(cmd) => cmd,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("[audio] game hung up");
                    break 'run;
                }
            };
            match cmd {
                AudioCmd::LoadMusic { id, path } => match audio.new_music(&path) {
                    Ok(music) => {
                        debug!("[audio] loaded id='{}' path='{}'", id, path);
                        musics.insert(id.clone(), music);
                        let _ = tx_evt.send(AudioMessage::MusicLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_evt.send(AudioMessage::MusicLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayMusic {
                    id,
                    looped: want_loop,
                } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("[audio] play start id='{}' looped={}", id, want_loop);
                        music.seek_stream(0.0);
                        music.play_stream();
                        playing.insert(id.clone());
                        if want_loop {
                            looped.insert(id);
                        } else {
                            looped.remove(&id);
                        }
                    }
                }
                AudioCmd::StopMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("[audio] stop id='{}'", id);
                        music.stop_stream();
                        playing.remove(&id);
                        looped.remove(&id);
                    }
                }
                AudioCmd::PauseMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("[audio] pause id='{}'", id);
                        music.pause_stream();
                        playing.remove(&id);
                    }
                }
                AudioCmd::ResumeMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("[audio] resume id='{}'", id);
                        music.resume_stream();
                        playing.insert(id);
                    }
                }
                AudioCmd::VolumeMusic { id, vol } => {
                    if let Some(music) = musics.get(&id) {
                        trace!("[audio] volume id='{}' vol={}", id, vol);
                        music.set_volume(vol);
                    }
                }
                AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                    Ok(sound) => {
                        debug!("[audio] fx loaded id='{}' path='{}'", id, path);
                        sounds.insert(id.clone(), sound);
                        let _ = tx_evt.send(AudioMessage::FxLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_evt.send(AudioMessage::FxLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayFx { id } => {
                    if let Some(sound) = sounds.get(&id) {
                        trace!("[audio] fx play id='{}'", id);
                        sound.play();
                    } else {
                        debug!("[audio] fx play skipped id='{}' reason='not loaded'", id);
                    }
                }
                AudioCmd::Shutdown => {
                    debug!("[audio] shutdown requested");
                    break 'run;
                }
            }
        }

        // 2) Pump streaming and detect ends.
        //    `update_stream()` must be called regularly while playing.
        let mut ended: Vec<String> = Vec::new();
        for id in playing.iter() {
            if let Some(music) = musics.get(id) {
                if music.is_stream_playing() {
                    music.update_stream();
                } else if music.get_time_played() >= music.get_time_length() - 0.01 {
                    ended.push(id.clone());
                }
            }
        }
        for id in ended {
            if looped.contains(&id) {
                if let Some(music) = musics.get(&id) {
                    trace!("[audio] restarting looped id='{}'", id);
                    music.seek_stream(0.0);
                    music.play_stream();
                }
            } else {
                playing.remove(&id);
                let _ = tx_evt.send(AudioMessage::MusicFinished { id });
            }
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    // Handles drop before `audio`.
    musics.clear();
    sounds.clear();
    info!(
        "[audio] thread exiting (id={:?})",
        std::thread::current().id()
    );
}

fn run_without_device(rx_cmd: &Receiver<AudioCmd>, tx_evt: &Sender<AudioMessage>, reason: &str) {
    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::LoadFx { id, .. } => {
                let _ = tx_evt.send(AudioMessage::FxLoadFailed {
                    id,
                    error: reason.to_string(),
                });
            }
            AudioCmd::LoadMusic { id, .. } => {
                let _ = tx_evt.send(AudioMessage::MusicLoadFailed {
                    id,
                    error: reason.to_string(),
                });
            }
            AudioCmd::Shutdown => break,
            _ => {}
        }
    }
}
