//! Timed spawners
//!
//! A spawner accumulates simulated (time-scaled) milliseconds and fires once
//! its interval is exceeded, then starts over from zero.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Accumulator that fires at a fixed or redrawn interval
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    pub elapsed: f32,
    pub interval: f32,
    /// When set, a new interval is drawn uniformly from this range after each fire
    pub redraw: Option<(f32, f32)>,
}

impl Spawner {
    pub fn fixed(interval: f32) -> Self {
        Self {
            elapsed: 0.0,
            interval,
            redraw: None,
        }
    }

    /// Fires first after `initial`, then after intervals drawn from `[min, max)`
    pub fn variable(initial: f32, min: f32, max: f32) -> Self {
        Self {
            elapsed: 0.0,
            interval: initial,
            redraw: Some((min, max)),
        }
    }

    /// Advance by `scaled_dt`; returns true exactly on the tick it fires
    pub fn tick<R: Rng + ?Sized>(&mut self, scaled_dt: f32, rng: &mut R) -> bool {
        self.elapsed += scaled_dt;
        if self.elapsed <= self.interval {
            return false;
        }
        self.elapsed = 0.0;
        if let Some((min, max)) = self.redraw {
            self.interval = if max > min {
                rng.random_range(min..max)
            } else {
                min
            };
        }
        true
    }
}

/// Screen edge an enemy can enter from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnSide {
    Top,
    Right,
    Bottom,
    Left,
}
