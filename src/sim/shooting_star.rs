//! Rare bonus star that streaks across the top half of the screen

use glam::Vec2;
use rand::Rng;

use super::context::TickContext;
use super::particles::Exhaust;
use crate::consts::{OFFSCREEN_MARGIN, SHOOTING_STAR_SIZE};

/// Score for shooting one down
pub const SHOOTING_STAR_SCORE: u64 = 500;
/// Spin per reference frame
const SPIN: f32 = 0.2;
const SPAWN_OFFSET: f32 = 50.0;

/// A fragile, fast bonus target; `pos` is its top-left corner
#[derive(Debug, Clone)]
pub struct ShootingStar {
    pub pos: Vec2,
    /// Units per reference frame
    pub vel: Vec2,
    pub angle: f32,
    pub marked_for_deletion: bool,
}

impl ShootingStar {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            angle: 0.0,
            marked_for_deletion: false,
        }
    }

    /// Enters from the left or right edge, high up, diving diagonally
    pub fn spawn<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> Self {
        let speed = rng.random::<f32>() * 5.0 + 10.0;
        let (x, vx) = if rng.random_bool(0.5) {
            (-SPAWN_OFFSET, speed)
        } else {
            (width + SPAWN_OFFSET, -speed)
        };
        let y = rng.random::<f32>() * (height / 2.0);
        let vy = rng.random::<f32>() * 5.0 + 2.0;
        Self::new(Vec2::new(x, y), Vec2::new(vx, vy))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(SHOOTING_STAR_SIZE / 2.0)
    }

    pub fn radius(&self) -> f32 {
        SHOOTING_STAR_SIZE / 2.0
    }

    /// Move and spin; always trails one exhaust puff behind it
    pub fn update(&mut self, ctx: &TickContext) -> Exhaust {
        let step = ctx.time_scale * ctx.frames();
        self.pos += self.vel * step;
        self.angle += SPIN * step;

        let exhaust = Exhaust {
            pos: self.center(),
            angle: self.vel.y.atan2(self.vel.x) + std::f32::consts::PI,
        };

        // Stars only fall, so the top edge never culls
        if self.pos.x < -OFFSCREEN_MARGIN
            || self.pos.x > ctx.width + OFFSCREEN_MARGIN
            || self.pos.y > ctx.height + OFFSCREEN_MARGIN
        {
            self.marked_for_deletion = true;
        }

        exhaust
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ctx() -> TickContext {
        TickContext {
            dt: 16.67,
            time_scale: 1.0,
            width: 800.0,
            height: 600.0,
            player_pos: Vec2::ZERO,
        }
    }

    #[test]
    fn test_spawn_heads_inward_and_down() {
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..50 {
            let s = ShootingStar::spawn(800.0, 600.0, &mut rng);
            if s.pos.x < 0.0 {
                assert!(s.vel.x >= 10.0);
            } else {
                assert_eq!(s.pos.x, 850.0);
                assert!(s.vel.x <= -10.0);
            }
            assert!(s.pos.y < 300.0);
            assert!((2.0..7.0).contains(&s.vel.y));
        }
    }

    #[test]
    fn test_exhaust_trails_behind() {
        let mut s = ShootingStar::new(Vec2::new(100.0, 100.0), Vec2::new(12.0, 0.0));
        let exhaust = s.update(&ctx());
        // Moving +x: exhaust faces -x, so its own thrust points back to +x
        assert!((exhaust.angle - std::f32::consts::PI).abs() < 1e-5);
        assert_eq!(exhaust.pos, s.center());
    }

    #[test]
    fn test_star_above_screen_survives() {
        let mut s = ShootingStar::new(Vec2::new(100.0, -500.0), Vec2::new(0.0, 1.0));
        s.update(&ctx());
        assert!(!s.marked_for_deletion);
        let mut s = ShootingStar::new(Vec2::new(100.0, 701.0), Vec2::new(0.0, 1.0));
        s.update(&ctx());
        assert!(s.marked_for_deletion);
    }
}
