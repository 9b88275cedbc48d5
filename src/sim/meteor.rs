//! Drifting rock obstacles

use glam::Vec2;
use rand::Rng;

use super::context::TickContext;
use super::geom::outside_bounds;
use crate::consts::OFFSCREEN_MARGIN;

/// Polygon vertex count
pub const METEOR_VERTICES: usize = 8;
/// Hits a fresh meteor absorbs
pub const METEOR_LIVES: u32 = 5;
/// Spawn distance outside the screen edge
const SPAWN_OFFSET: f32 = 50.0;

/// A jagged rock; `pos` is its center and `size` its nominal radius
#[derive(Debug, Clone)]
pub struct Meteor {
    pub pos: Vec2,
    /// Units per reference frame
    pub vel: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub lives: u32,
    /// Outline relative to the center
    pub vertices: [Vec2; METEOR_VERTICES],
    pub marked_for_deletion: bool,
}

impl Meteor {
    /// A round, motionless meteor (handy for placing obstacles by hand)
    pub fn new(pos: Vec2, size: f32) -> Self {
        let vertices = std::array::from_fn(|i| {
            let a = i as f32 / METEOR_VERTICES as f32 * std::f32::consts::TAU;
            Vec2::new(a.cos(), a.sin()) * size
        });
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            rotation: 0.0,
            rotation_speed: 0.0,
            lives: METEOR_LIVES,
            vertices,
            marked_for_deletion: false,
        }
    }

    /// Random meteor just off a random edge, heading roughly at the center
    pub fn spawn<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> Self {
        let pos = if rng.random_bool(0.5) {
            let x = if rng.random_bool(0.5) {
                -SPAWN_OFFSET
            } else {
                width + SPAWN_OFFSET
            };
            Vec2::new(x, rng.random::<f32>() * height)
        } else {
            let y = if rng.random_bool(0.5) {
                -SPAWN_OFFSET
            } else {
                height + SPAWN_OFFSET
            };
            Vec2::new(rng.random::<f32>() * width, y)
        };

        let size = rng.random::<f32>() * 30.0 + 20.0;
        let to_center = Vec2::new(width / 2.0, height / 2.0) - pos;
        let heading = to_center.y.atan2(to_center.x) + (rng.random::<f32>() - 0.5);
        let speed = rng.random::<f32>() * 2.0 + 1.0;

        let vertices = std::array::from_fn(|i| {
            let r = size * (0.8 + rng.random::<f32>() * 0.4);
            let a = i as f32 / METEOR_VERTICES as f32 * std::f32::consts::TAU;
            Vec2::new(a.cos(), a.sin()) * r
        });

        Self {
            pos,
            vel: Vec2::new(heading.cos(), heading.sin()) * speed,
            size,
            rotation: 0.0,
            rotation_speed: (rng.random::<f32>() - 0.5) * 0.05,
            lives: METEOR_LIVES,
            vertices,
            marked_for_deletion: false,
        }
    }

    pub fn update(&mut self, ctx: &TickContext) {
        let step = ctx.time_scale * ctx.frames();
        self.pos += self.vel * step;
        self.rotation += self.rotation_speed * step;

        if outside_bounds(self.pos, ctx.width, ctx.height, OFFSCREEN_MARGIN) {
            self.marked_for_deletion = true;
        }
    }

    /// Take one hit; returns true only on the hit that destroys it
    pub fn hit(&mut self) -> bool {
        if self.lives == 0 {
            return false;
        }
        self.lives -= 1;
        if self.lives == 0 {
            self.marked_for_deletion = true;
            return true;
        }
        false
    }
}
