//! Items orbiting a common center

use flair_core::Point;
use serde::{Deserialize, Serialize};

use crate::config::clamp_field;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub radius: f32,
    /// Time for one full revolution
    pub revolution_ms: f32,
    /// Start delay added per item index
    pub item_delay_ms: f32,
    pub delay_ms: f32,
    /// Orbit counter-clockwise
    pub reverse: bool,
    pub icon_size: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            radius: 160.0,
            revolution_ms: 20_000.0,
            item_delay_ms: 200.0,
            delay_ms: 0.0,
            reverse: false,
            icon_size: 30.0,
        }
    }
}

impl OrbitConfig {
    pub fn sanitized(self) -> Self {
        Self {
            radius: clamp_field("orbit.radius", self.radius, 0.0, f32::MAX),
            revolution_ms: clamp_field("orbit.revolution_ms", self.revolution_ms, 1.0, f32::MAX),
            item_delay_ms: clamp_field("orbit.item_delay_ms", self.item_delay_ms, 0.0, f32::MAX),
            delay_ms: clamp_field("orbit.delay_ms", self.delay_ms, 0.0, f32::MAX),
            icon_size: clamp_field("orbit.icon_size", self.icon_size, 0.0, f32::MAX),
            reverse: self.reverse,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitItem {
    /// Angle on the orbit in degrees, clockwise from the positive x axis
    pub angle_deg: f32,
    /// Offset from the orbit center in pixels (y down)
    pub position: Point,
    /// Rotation to apply to the item's content so it stays upright
    pub counter_rotation_deg: f32,
}

/// `count` items spaced evenly around a circle, all turning together
pub struct OrbitingCircles {
    config: OrbitConfig,
    count: usize,
    elapsed_ms: f32,
}

impl OrbitingCircles {
    pub fn new(config: OrbitConfig, count: usize) -> Self {
        Self {
            config: config.sanitized(),
            count,
            elapsed_ms: 0.0,
        }
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    pub fn tick(&mut self, dt_ms: f32) {
        if dt_ms > 0.0 {
            // Kept within a bounded window so precision holds on long sessions
            let window = self.config.delay_ms
                + self.config.item_delay_ms * self.count as f32
                + self.config.revolution_ms;
            self.elapsed_ms += dt_ms;
            if self.elapsed_ms > window * 2.0 {
                self.elapsed_ms -= self.config.revolution_ms
                    * ((self.elapsed_ms - window) / self.config.revolution_ms).floor();
            }
        }
    }

    /// Diameter of the orbit path
    pub fn path_diameter(&self) -> f32 {
        self.config.radius * 2.0
    }

    pub fn item(&self, index: usize) -> Option<OrbitItem> {
        if index >= self.count {
            return None;
        }
        let base = 360.0 / self.count as f32 * index as f32;
        let start = self.config.delay_ms + self.config.item_delay_ms * index as f32;
        let local = (self.elapsed_ms - start).max(0.0);
        let travel = 360.0 * (local % self.config.revolution_ms) / self.config.revolution_ms;

        let angle = if self.config.reverse {
            base - travel
        } else {
            base + travel
        }
        .rem_euclid(360.0);

        let radians = angle.to_radians();
        Some(OrbitItem {
            angle_deg: angle,
            position: Point::new(
                self.config.radius * radians.cos(),
                self.config.radius * radians.sin(),
            ),
            counter_rotation_deg: -angle,
        })
    }

    pub fn items(&self) -> impl Iterator<Item = OrbitItem> + '_ {
        (0..self.count).filter_map(|i| self.item(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_items_are_evenly_spaced() {
        let orbit = OrbitingCircles::new(OrbitConfig::default(), 4);
        let angles: Vec<f32> = orbit.items().map(|i| i.angle_deg).collect();
        assert_eq!(angles, vec![0.0, 90.0, 180.0, 270.0]);

        let first = orbit.item(0).unwrap();
        assert!(close(first.position.x, 160.0));
        assert!(close(first.position.y, 0.0));
        assert!(orbit.item(4).is_none());
    }

    #[test]
    fn test_rotation_over_time() {
        let mut orbit = OrbitingCircles::new(OrbitConfig::default(), 2);
        orbit.tick(5000.0);
        // a quarter turn for item 0; item 1 started 200 ms later
        assert!(close(orbit.item(0).unwrap().angle_deg, 90.0));
        assert!(close(orbit.item(1).unwrap().angle_deg, 180.0 + 360.0 * 4800.0 / 20000.0));
    }

    #[test]
    fn test_reverse_orbit() {
        let mut orbit = OrbitingCircles::new(
            OrbitConfig {
                reverse: true,
                ..OrbitConfig::default()
            },
            1,
        );
        orbit.tick(5000.0);
        let item = orbit.item(0).unwrap();
        assert!(close(item.angle_deg, 270.0));
        assert!(close(item.counter_rotation_deg, -270.0));
    }

    #[test]
    fn test_full_revolution_wraps() {
        let mut orbit = OrbitingCircles::new(OrbitConfig::default(), 1);
        orbit.tick(20_000.0);
        assert!(close(orbit.item(0).unwrap().angle_deg, 0.0));
        for _ in 0..100 {
            orbit.tick(1000.0);
        }
        assert!(close(orbit.item(0).unwrap().angle_deg, 0.0));
    }
}
