//! Bullets fired by the player and by fighters

use glam::Vec2;

use super::context::TickContext;
use super::geom::{Rect, outside_bounds};
use crate::consts::PROJECTILE_SIZE;

/// A bullet; `is_enemy` decides who it can hurt
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    /// Units per reference frame
    pub vel: Vec2,
    pub is_enemy: bool,
    pub marked_for_deletion: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, is_enemy: bool) -> Self {
        Self {
            pos,
            vel,
            is_enemy,
            marked_for_deletion: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(PROJECTILE_SIZE))
    }

    pub fn color(&self) -> &'static str {
        if self.is_enemy { "#f00" } else { "#ff0" }
    }

    pub fn update(&mut self, ctx: &TickContext) {
        self.pos += self.vel * ctx.time_scale * ctx.frames();

        // Bullets die the moment they leave the screen
        if outside_bounds(self.pos, ctx.width, ctx.height, 0.0) {
            self.marked_for_deletion = true;
        }
    }
}
