//! Car components shared by the player and traffic.
//!
//! Every car carries a [`Lane`], a
//! [`MapPosition`](super::mapposition::MapPosition) (its centre) and a
//! [`BoxCollider`](super::boxcollider::BoxCollider) sized to the car. The
//! player adds [`Player`]; traffic adds [`Traffic`] and a
//! [`RigidBody`](super::rigidbody::RigidBody).

use bevy_ecs::prelude::Component;

use crate::constants::{
    LANE_CHANGE_COOLDOWN, LANE_CHANGE_DURATION, PLAYER_START_SPEED,
};

/// Index of the lane a car occupies, counted from the left edge.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lane(pub usize);

/// The kinds of vehicles that make up traffic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VehicleKind {
    Car,
    Truck,
    Bus,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 3] = [VehicleKind::Car, VehicleKind::Truck, VehicleKind::Bus];

    /// Relative spawn weight.
    pub fn weight(self) -> u32 {
        match self {
            VehicleKind::Car => 70,
            VehicleKind::Truck => 20,
            VehicleKind::Bus => 10,
        }
    }

    /// (width, height) in pixels.
    pub fn size(self) -> (f32, f32) {
        match self {
            VehicleKind::Car => (60.0, 120.0),
            VehicleKind::Truck => (90.0, 140.0),
            VehicleKind::Bus => (100.0, 140.0),
        }
    }

    /// Base cruise speed in legacy frame units (pixels per 1/60 s).
    pub fn base_cruise(self) -> f32 {
        match self {
            VehicleKind::Car => 6.0,
            VehicleKind::Truck => 4.8,
            VehicleKind::Bus => 5.2,
        }
    }

    /// Pick a kind from a uniform roll in `0..total_weight()`.
    pub fn from_roll(roll: u32) -> VehicleKind {
        let mut acc = 0;
        for kind in Self::ALL {
            acc += kind.weight();
            if roll < acc {
                return kind;
            }
        }
        VehicleKind::Car
    }

    pub fn total_weight() -> u32 {
        Self::ALL.iter().map(|k| k.weight()).sum()
    }
}

/// Player-only driving state.
#[derive(Component, Clone, Debug)]
pub struct Player {
    /// False once the player has crashed.
    pub alive: bool,
    /// Forward speed in throttle units (cruise is 12).
    pub speed: f32,
    /// Smoothed speed shown on the HUD.
    pub display_speed: f32,
    /// X the current lane slide started from.
    pub slide_from: f32,
    /// X the current lane slide ends at.
    pub slide_to: f32,
    /// Lane slide progress in `[0, 1]`; 1 means settled.
    pub slide_progress: f32,
    /// Seconds until another lane change is accepted.
    pub lane_cooldown: f32,
    /// Seconds of nitro left.
    pub nitro: f32,
    /// Crashes the player can still absorb.
    pub shield: u32,
}

impl Player {
    pub fn new(x: f32) -> Self {
        Self {
            alive: true,
            speed: PLAYER_START_SPEED,
            display_speed: PLAYER_START_SPEED,
            slide_from: x,
            slide_to: x,
            slide_progress: 1.0,
            lane_cooldown: 0.0,
            nitro: 0.0,
            shield: 0,
        }
    }

    pub fn is_sliding(&self) -> bool {
        self.slide_progress < 1.0
    }

    /// Start sliding from `from_x` to `to_x`.
    pub fn begin_slide(&mut self, from_x: f32, to_x: f32) {
        self.slide_from = from_x;
        self.slide_to = to_x;
        self.slide_progress = 0.0;
        self.lane_cooldown = LANE_CHANGE_COOLDOWN;
    }

    /// Advance the lane slide and return the new x.
    pub fn advance_slide(&mut self, dt: f32) -> f32 {
        if !self.is_sliding() {
            return self.slide_to;
        }
        self.slide_progress = (self.slide_progress + dt / LANE_CHANGE_DURATION).min(1.0);
        let t = self.slide_progress;
        let eased = t * t * (3.0 - 2.0 * t);
        self.slide_from + (self.slide_to - self.slide_from) * eased
    }
}

/// Traffic-only state.
#[derive(Component, Clone, Debug)]
pub struct Traffic {
    pub kind: VehicleKind,
    /// Own speed towards the player in pixels per second.
    pub cruise: f32,
    /// Race time (seconds) at which the car was spawned.
    pub spawned_at: f32,
    /// Set once the car has been overtaken and scored.
    pub passed: bool,
}

impl Traffic {
    pub fn new(kind: VehicleKind, cruise: f32, spawned_at: f32) -> Self {
        Self {
            kind,
            cruise,
            spawned_at,
            passed: false,
        }
    }
}
