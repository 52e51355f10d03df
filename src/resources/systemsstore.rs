//! Registry of one-shot systems run on screen transitions.
//!
//! Hooks that need broad world access (resetting the race, spawning the
//! title menu) are registered once as one-shot systems and looked up here
//! by the screen transition observer, which runs them through `Commands`.

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenHook {
    ResetRace,
    SpawnMenu,
    DespawnMenu,
    RecordScore,
}

#[derive(Resource, Default)]
pub struct SystemsStore {
    map: FxHashMap<ScreenHook, SystemId>,
}

impl SystemsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hook: ScreenHook, id: SystemId) {
        self.map.insert(hook, id);
    }

    pub fn get(&self, hook: ScreenHook) -> Option<SystemId> {
        self.map.get(&hook).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
