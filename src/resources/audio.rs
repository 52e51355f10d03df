//! Bridge between the game world and the background audio thread.
//!
//! [`setup_audio`] spawns the thread and inserts [`AudioBridge`];
//! [`shutdown_audio`] stops and joins it. Without a bridge (tests, headless
//! runs) the audio systems simply have nothing to forward to.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{info, warn};

#[derive(Resource)]
pub struct AudioBridge {
    /// Game -> audio thread.
    pub tx_cmd: Sender<AudioCmd>,
    /// Audio thread -> game.
    pub rx_msg: Receiver<AudioMessage>,
    pub handle: std::thread::JoinHandle<()>,
}

/// Spawn the audio thread and register the bridge and message queues.
///
/// `preload` is sent before anything else, typically the load commands
/// returned by [`SoundBank::from_dir`](crate::resources::soundbank::SoundBank::from_dir).
pub fn setup_audio(world: &mut World, preload: Vec<AudioCmd>) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    for cmd in preload {
        // Receiver is alive until the thread exits, so this cannot fail yet.
        let _ = tx_cmd.send(cmd);
    }

    let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));
    info!("Audio thread started");

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.init_resource::<Messages<AudioMessage>>();
    world.init_resource::<Messages<AudioCmd>>();
}

/// Ask the audio thread to stop and wait for it.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        if bridge.handle.join().is_err() {
            warn!("Audio thread panicked during shutdown");
        }
        info!("Audio thread stopped");
    }
}
