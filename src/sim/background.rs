//! Parallax starfield
//!
//! Decorative only. It owns its own RNG stream so that star wrapping never
//! shifts the gameplay random sequence.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

const STAR_COLORS: [&str; 4] = ["#ffffff", "#aaccff", "#ffccaa", "#aaffcc"];
/// (speed modifier, star count) from farthest to closest
const LAYERS: [(f32, usize); 3] = [(0.2, 50), (0.5, 30), (1.0, 20)];
/// Scroll units per 16ms at speed modifier 1.0
const SCROLL_SPEED: f32 = 20.0;
/// The starfield scrolls against a 16ms reference frame
const STAR_FRAME_MS: f32 = 16.0;

#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub color: &'static str,
    pub alpha: f32,
}

/// One depth layer of stars
#[derive(Debug, Clone)]
pub struct StarLayer {
    pub speed_modifier: f32,
    pub stars: Vec<Star>,
}

/// Three scrolling layers
#[derive(Debug, Clone)]
pub struct Background {
    pub width: f32,
    pub height: f32,
    pub layers: Vec<StarLayer>,
    rng: Pcg32,
}

impl Background {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let layers = LAYERS
            .iter()
            .map(|&(speed_modifier, count)| StarLayer {
                speed_modifier,
                stars: (0..count)
                    .map(|_| Star {
                        pos: Vec2::new(
                            rng.random::<f32>() * width,
                            rng.random::<f32>() * height,
                        ),
                        size: rng.random::<f32>() * (speed_modifier * 2.5) + 0.5,
                        color: STAR_COLORS[rng.random_range(0..STAR_COLORS.len())],
                        alpha: rng.random::<f32>() * 0.5 + 0.5,
                    })
                    .collect(),
            })
            .collect();

        Self {
            width,
            height,
            layers,
            rng,
        }
    }

    /// Scroll downward; stars falling off the bottom wrap to the top
    pub fn update(&mut self, dt: f32, time_scale: f32) {
        for layer in &mut self.layers {
            let step = SCROLL_SPEED * layer.speed_modifier * time_scale * (dt / STAR_FRAME_MS);
            for star in &mut layer.stars {
                star.pos.y += step;
                if star.pos.y > self.height {
                    star.pos.y = 0.0;
                    star.pos.x = self.rng.random::<f32>() * self.width;
                }
            }
        }
    }

    /// Stars keep their positions; new wraps use the new width
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn star_count(&self) -> usize {
        self.layers.iter().map(|l| l.stars.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_layers_of_stars() {
        let bg = Background::new(800.0, 600.0, 1);
        assert_eq!(bg.layers.len(), 3);
        assert_eq!(bg.star_count(), 100);
        for star in bg.layers.iter().flat_map(|l| &l.stars) {
            assert!(star.pos.x < 800.0 && star.pos.y < 600.0);
            assert!((0.5..=1.0).contains(&star.alpha));
        }
    }

    #[test]
    fn test_near_layer_scrolls_faster() {
        let mut bg = Background::new(800.0, 600.0, 1);
        for layer in &mut bg.layers {
            for star in &mut layer.stars {
                star.pos.y = 0.0;
            }
        }
        bg.update(16.0, 1.0);
        assert!((bg.layers[0].stars[0].pos.y - 4.0).abs() < 1e-4);
        assert!((bg.layers[2].stars[0].pos.y - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_stars_wrap_to_top() {
        let mut bg = Background::new(800.0, 600.0, 1);
        bg.layers[2].stars[0].pos.y = 599.0;
        bg.update(16.0, 1.0);
        assert_eq!(bg.layers[2].stars[0].pos.y, 0.0);
    }

    #[test]
    fn test_resize_updates_bounds() {
        let mut bg = Background::new(800.0, 600.0, 1);
        bg.resize(1024.0, 768.0);
        assert_eq!((bg.width, bg.height), (1024.0, 768.0));
        assert_eq!(bg.star_count(), 100);
    }
}
