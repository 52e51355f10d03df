//! Seedable random source for the race.
//!
//! Every random decision of the simulation (traffic kind, lane, spawn height,
//! powerups, particle jitter) goes through [`RaceRng`] so a race can be
//! replayed from its seed.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

#[derive(Resource, Clone, Debug)]
pub struct RaceRng(pub Rng);

impl RaceRng {
    pub fn seeded(seed: u64) -> Self {
        RaceRng(Rng::with_seed(seed))
    }

    /// Uniform f32 in `[min, max)`; returns `min` for an empty range.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        let span = max - min;
        if span < f32::EPSILON {
            return min;
        }
        min + self.0.f32() * span
    }
}

impl Default for RaceRng {
    fn default() -> Self {
        RaceRng(Rng::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RaceRng::seeded(7);
        let mut b = RaceRng::seeded(7);
        for _ in 0..16 {
            assert_eq!(a.0.u32(..), b.0.u32(..));
        }
    }

    #[test]
    fn test_range_f32_bounds() {
        let mut rng = RaceRng::seeded(1);
        for _ in 0..256 {
            let x = rng.range_f32(-8.0, 8.0);
            assert!((-8.0..8.0).contains(&x));
        }
        assert_eq!(rng.range_f32(3.0, 3.0), 3.0);
    }
}
