//! Road geometry resource.
//!
//! [`RoadLayout`] turns the lane count and margins into pixel positions:
//! lane centres, the road bounds the player is clamped to, and where the
//! player sits on screen. It is derived once from
//! [`GameConfig`](super::gameconfig::GameConfig) when a race is created.

use bevy_ecs::prelude::Resource;

use crate::constants::{
    LANE_COUNT, LANE_MARGIN, MAX_LANES, MAX_SCREEN_HEIGHT, MAX_SCREEN_WIDTH, MIN_LANES,
    MIN_SCREEN_HEIGHT, MIN_SCREEN_WIDTH, PLAYER_BOTTOM_OFFSET, ROAD_EDGE_INSET, SCREEN_HEIGHT,
    SCREEN_WIDTH,
};

/// Non-finite sizes fall back to `default`, the rest are clamped into range.
fn sane_extent(value: f32, default: u32, min: u32, max: u32) -> f32 {
    if value.is_finite() {
        value.clamp(min as f32, max as f32)
    } else {
        default as f32
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct RoadLayout {
    pub screen_width: f32,
    pub screen_height: f32,
    pub lane_count: usize,
    /// Grass strip on each side of the road.
    pub margin: f32,
}

impl Default for RoadLayout {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32, LANE_COUNT, LANE_MARGIN)
    }
}

impl RoadLayout {
    /// Screen size and lane count are clamped to the supported range and the
    /// margin to leave at least half the screen as road, so the player's
    /// clamp bounds are always ordered.
    pub fn new(screen_width: f32, screen_height: f32, lane_count: usize, margin: f32) -> Self {
        let screen_width = sane_extent(screen_width, SCREEN_WIDTH, MIN_SCREEN_WIDTH, MAX_SCREEN_WIDTH);
        let screen_height =
            sane_extent(screen_height, SCREEN_HEIGHT, MIN_SCREEN_HEIGHT, MAX_SCREEN_HEIGHT);
        let lane_count = lane_count.clamp(MIN_LANES, MAX_LANES);
        let margin = if margin.is_finite() { margin } else { LANE_MARGIN };
        let margin = margin.clamp(0.0, screen_width * 0.25);
        Self {
            screen_width,
            screen_height,
            lane_count,
            margin,
        }
    }

    pub fn road_width(&self) -> f32 {
        self.screen_width - self.margin * 2.0
    }

    pub fn lane_width(&self) -> f32 {
        self.road_width() / self.lane_count as f32
    }

    /// X of a lane's centre; out-of-range lanes are clamped to the last one.
    pub fn lane_center(&self, lane: usize) -> f32 {
        let lane = lane.min(self.lane_count - 1);
        self.margin + lane as f32 * self.lane_width() + self.lane_width() * 0.5
    }

    /// X of the dividing line to the left of `lane` (1..lane_count).
    pub fn divider_x(&self, lane: usize) -> f32 {
        self.margin + lane as f32 * self.lane_width()
    }

    /// Lane whose span contains `x`.
    pub fn lane_at(&self, x: f32) -> usize {
        let rel = ((x - self.margin) / self.lane_width()).floor();
        if rel <= 0.0 {
            0
        } else {
            (rel as usize).min(self.lane_count - 1)
        }
    }

    pub fn min_player_x(&self) -> f32 {
        self.margin + ROAD_EDGE_INSET
    }

    pub fn max_player_x(&self) -> f32 {
        self.margin + self.road_width() - ROAD_EDGE_INSET
    }

    pub fn clamp_player_x(&self, x: f32) -> f32 {
        x.clamp(self.min_player_x(), self.max_player_x())
    }

    pub fn player_y(&self) -> f32 {
        self.screen_height - PLAYER_BOTTOM_OFFSET
    }

    /// Lane the player starts in.
    pub fn start_lane(&self) -> usize {
        self.lane_count / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let road = RoadLayout::default();
        assert_eq!(road.lane_count, 4);
        assert_eq!(road.road_width(), 740.0);
        assert_eq!(road.lane_width(), 185.0);
        assert_eq!(road.lane_center(0), 172.5);
        assert_eq!(road.lane_center(3), 727.5);
        assert_eq!(road.player_y(), 460.0);
        assert_eq!(road.start_lane(), 2);
    }

    #[test]
    fn test_lane_count_is_clamped() {
        assert_eq!(RoadLayout::new(900.0, 600.0, 0, 80.0).lane_count, MIN_LANES);
        assert_eq!(RoadLayout::new(900.0, 600.0, 99, 80.0).lane_count, MAX_LANES);
    }

    #[test]
    fn test_lane_at_round_trips_centres() {
        let road = RoadLayout::default();
        for lane in 0..road.lane_count {
            assert_eq!(road.lane_at(road.lane_center(lane)), lane);
        }
        assert_eq!(road.lane_at(-50.0), 0);
        assert_eq!(road.lane_at(5000.0), road.lane_count - 1);
    }

    #[test]
    fn test_player_clamp() {
        let road = RoadLayout::default();
        assert_eq!(road.clamp_player_x(0.0), 90.0);
        assert_eq!(road.clamp_player_x(10_000.0), 810.0);
        assert_eq!(road.clamp_player_x(400.0), 400.0);
    }

    #[test]
    fn test_nan_margin_falls_back_to_default() {
        let road = RoadLayout::new(900.0, 600.0, 4, f32::NAN);
        assert_eq!(road.margin, LANE_MARGIN);
        assert_eq!(road.clamp_player_x(400.0), 400.0);
    }

    #[test]
    fn test_tiny_screen_keeps_clamp_bounds_ordered() {
        for width in [0.0, 10.0, 39.0, -500.0, f32::INFINITY, f32::NAN] {
            let road = RoadLayout::new(width, 600.0, 4, 80.0);
            assert!(road.screen_width >= 2.0 * road.margin + 2.0 * ROAD_EDGE_INSET);
            assert!(road.min_player_x() <= road.max_player_x());
            let x = road.clamp_player_x(0.0);
            assert_eq!(x, road.min_player_x());
        }
    }

    #[test]
    fn test_screen_size_is_capped() {
        let road = RoadLayout::new(1.0e9, 1.0e9, 4, 80.0);
        assert_eq!(road.screen_width, MAX_SCREEN_WIDTH as f32);
        assert_eq!(road.screen_height, MAX_SCREEN_HEIGHT as f32);
        let road = RoadLayout::new(900.0, f32::NAN, 4, 80.0);
        assert_eq!(road.player_y(), 460.0);
    }
}
