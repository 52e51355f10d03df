//! Sound effects and music tracks, with silent fallbacks.
//!
//! Each sound is resolved once, when the bank is built: a file that exists
//! becomes a [`Playable::Clip`] and is queued for loading on the audio
//! thread, anything else becomes [`Playable::Silence`]. Playing a silent
//! entry produces no command at all, so a game without sound files runs
//! exactly like one with them.
use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use rustc_hash::FxHashMap;

use crate::error::AssetError;
use crate::events::audio::AudioCmd;

/// A sound that can be asked to play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Playable {
    /// Loaded (or loading) on the audio thread under `id`.
    Clip { id: String },
    /// Missing or broken; every request is a no-op.
    Silence,
}

impl Playable {
    pub fn id(&self) -> Option<&str> {
        match self {
            Playable::Clip { id } => Some(id),
            Playable::Silence => None,
        }
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, Playable::Silence)
    }
}

/// One-shot sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sfx {
    Crash,
    Nitro,
    Shield,
    NearMiss,
}

impl Sfx {
    pub const ALL: [Sfx; 4] = [Sfx::Crash, Sfx::Nitro, Sfx::Shield, Sfx::NearMiss];

    pub fn file_name(self) -> &'static str {
        match self {
            Sfx::Crash => "crash.wav",
            Sfx::Nitro => "nitro.wav",
            Sfx::Shield => "shield.wav",
            Sfx::NearMiss => "nearmiss.wav",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Sfx::Crash => "crash",
            Sfx::Nitro => "nitro",
            Sfx::Shield => "shield",
            Sfx::NearMiss => "nearmiss",
        }
    }
}

/// Streamed, looping tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    Music,
    Engine,
}

impl Track {
    pub const ALL: [Track; 2] = [Track::Music, Track::Engine];

    pub fn file_name(self) -> &'static str {
        match self {
            Track::Music => "music_loop.ogg",
            Track::Engine => "engine_loop.ogg",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Track::Music => "music",
            Track::Engine => "engine",
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct SoundBank {
    fx: FxHashMap<Sfx, Playable>,
    tracks: FxHashMap<Track, Playable>,
}

impl Default for SoundBank {
    fn default() -> Self {
        Self::silent()
    }
}

impl SoundBank {
    /// A bank where every sound is [`Playable::Silence`].
    pub fn silent() -> Self {
        Self {
            fx: Sfx::ALL.iter().map(|&s| (s, Playable::Silence)).collect(),
            tracks: Track::ALL.iter().map(|&t| (t, Playable::Silence)).collect(),
        }
    }

    /// Resolve every sound against `dir`.
    ///
    /// Returns the bank together with the load commands for the files that
    /// were found; the caller forwards them to the audio thread.
    pub fn from_dir(dir: &Path) -> (Self, Vec<AudioCmd>) {
        let mut bank = Self::silent();
        let mut loads = Vec::new();

        for sfx in Sfx::ALL {
            match resolve(dir, sfx.file_name()) {
                Ok(path) => {
                    loads.push(AudioCmd::LoadFx {
                        id: sfx.id().to_string(),
                        path,
                    });
                    bank.fx.insert(
                        sfx,
                        Playable::Clip {
                            id: sfx.id().to_string(),
                        },
                    );
                }
                Err(e) => warn!("{e}; {:?} will be silent", sfx),
            }
        }
        for track in Track::ALL {
            match resolve(dir, track.file_name()) {
                Ok(path) => {
                    loads.push(AudioCmd::LoadMusic {
                        id: track.id().to_string(),
                        path,
                    });
                    bank.tracks.insert(
                        track,
                        Playable::Clip {
                            id: track.id().to_string(),
                        },
                    );
                }
                Err(e) => warn!("{e}; {:?} will be silent", track),
            }
        }

        info!("Sound bank: {} of {} sounds found", loads.len(), Sfx::ALL.len() + Track::ALL.len());
        (bank, loads)
    }

    pub fn fx(&self, sfx: Sfx) -> &Playable {
        self.fx.get(&sfx).unwrap_or(&Playable::Silence)
    }

    pub fn track(&self, track: Track) -> &Playable {
        self.tracks.get(&track).unwrap_or(&Playable::Silence)
    }

    pub fn play_fx(&self, sfx: Sfx) -> Option<AudioCmd> {
        self.fx(sfx)
            .id()
            .map(|id| AudioCmd::PlayFx { id: id.to_string() })
    }

    pub fn start_track(&self, track: Track) -> Option<AudioCmd> {
        self.track(track).id().map(|id| AudioCmd::PlayMusic {
            id: id.to_string(),
            looped: true,
        })
    }

    pub fn stop_track(&self, track: Track) -> Option<AudioCmd> {
        self.track(track)
            .id()
            .map(|id| AudioCmd::StopMusic { id: id.to_string() })
    }

    pub fn pause_track(&self, track: Track) -> Option<AudioCmd> {
        self.track(track)
            .id()
            .map(|id| AudioCmd::PauseMusic { id: id.to_string() })
    }

    pub fn resume_track(&self, track: Track) -> Option<AudioCmd> {
        self.track(track)
            .id()
            .map(|id| AudioCmd::ResumeMusic { id: id.to_string() })
    }

    pub fn set_track_volume(&self, track: Track, vol: f32) -> Option<AudioCmd> {
        self.track(track).id().map(|id| AudioCmd::VolumeMusic {
            id: id.to_string(),
            vol: vol.clamp(0.0, 1.0),
        })
    }

    /// Turn the sound registered under `id` into silence.
    ///
    /// Used when the audio thread reports it could not decode a file.
    /// Returns whether anything changed.
    pub fn downgrade(&mut self, id: &str) -> bool {
        let entry = self
            .fx
            .values_mut()
            .chain(self.tracks.values_mut())
            .find(|p| p.id() == Some(id));
        match entry {
            Some(playable) => {
                *playable = Playable::Silence;
                true
            }
            None => false,
        }
    }

    /// Number of sounds that will actually make noise.
    pub fn audible_count(&self) -> usize {
        self.fx
            .values()
            .chain(self.tracks.values())
            .filter(|p| !p.is_silent())
            .count()
    }
}

fn resolve(dir: &Path, file_name: &str) -> Result<String, AssetError> {
    let path = dir.join(file_name);
    if path.is_file() {
        Ok(path.to_string_lossy().into_owned())
    } else {
        Err(AssetError::Missing { path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_bank_emits_nothing() {
        let bank = SoundBank::silent();
        for sfx in Sfx::ALL {
            assert_eq!(bank.play_fx(sfx), None);
        }
        assert_eq!(bank.start_track(Track::Engine), None);
        assert_eq!(bank.set_track_volume(Track::Music, 0.5), None);
        assert_eq!(bank.audible_count(), 0);
    }

    #[test]
    fn test_missing_dir_is_all_silence() {
        let (bank, loads) = SoundBank::from_dir(Path::new("./no/such/assets"));
        assert!(loads.is_empty());
        assert!(bank.fx(Sfx::Crash).is_silent());
        assert!(bank.track(Track::Music).is_silent());
    }

    #[test]
    fn test_present_files_become_clips() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("crash.wav"), b"RIFF").unwrap();
        std::fs::write(dir.path().join("engine_loop.ogg"), b"OggS").unwrap();

        let (bank, loads) = SoundBank::from_dir(dir.path());
        assert_eq!(loads.len(), 2);
        assert_eq!(
            bank.play_fx(Sfx::Crash),
            Some(AudioCmd::PlayFx {
                id: "crash".to_string()
            })
        );
        assert_eq!(bank.play_fx(Sfx::Nitro), None);
        assert_eq!(
            bank.start_track(Track::Engine),
            Some(AudioCmd::PlayMusic {
                id: "engine".to_string(),
                looped: true
            })
        );
        assert_eq!(bank.audible_count(), 2);
    }

    #[test]
    fn test_downgrade_silences_clip() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("nitro.wav"), b"garbage").unwrap();
        let (mut bank, _) = SoundBank::from_dir(dir.path());
        assert!(bank.play_fx(Sfx::Nitro).is_some());

        assert!(bank.downgrade("nitro"));
        assert_eq!(bank.play_fx(Sfx::Nitro), None);
        assert!(!bank.downgrade("nitro"));
        assert!(!bank.downgrade("unknown"));
    }

    #[test]
    fn test_volume_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("music_loop.ogg"), b"OggS").unwrap();
        let (bank, _) = SoundBank::from_dir(dir.path());
        assert_eq!(
            bank.set_track_volume(Track::Music, 4.0),
            Some(AudioCmd::VolumeMusic {
                id: "music".to_string(),
                vol: 1.0
            })
        );
    }
}
