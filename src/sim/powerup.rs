//! Pickups dropped by destroyed enemies

use glam::Vec2;
use rand::Rng;

use super::context::TickContext;
use super::geom::Rect;
use crate::consts::POWERUP_SIZE;

/// What a pickup does when collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Health,
    RapidFire,
    Shield,
    Energy,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Health,
        PowerUpKind::RapidFire,
        PowerUpKind::Shield,
        PowerUpKind::Energy,
    ];

    /// Uniform pick
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn color(self) -> &'static str {
        match self {
            PowerUpKind::Health => "#0f0",
            PowerUpKind::RapidFire => "#ff0",
            PowerUpKind::Shield => "#0ff",
            PowerUpKind::Energy => "#00f",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Health => "+HP",
            PowerUpKind::RapidFire => "<<<",
            PowerUpKind::Shield => "(O)",
            PowerUpKind::Energy => "NRG",
        }
    }
}

/// A drifting pickup that bounces off the screen edges
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    /// Simulated milliseconds alive
    pub age: f32,
    pub lifetime: f32,
    pub marked_for_deletion: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2, vel: Vec2, lifetime: f32) -> Self {
        Self {
            kind,
            pos,
            vel,
            age: 0.0,
            lifetime,
            marked_for_deletion: false,
        }
    }

    /// Random kind with a slow random drift
    pub fn spawn<R: Rng + ?Sized>(pos: Vec2, lifetime: f32, rng: &mut R) -> Self {
        let kind = PowerUpKind::random(rng);
        let vel = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5);
        Self::new(kind, pos, vel, lifetime)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(POWERUP_SIZE))
    }

    pub fn update(&mut self, ctx: &TickContext) {
        let ts = ctx.time_scale;
        self.pos += self.vel * ts;

        self.age += ctx.scaled_dt();
        if self.age > self.lifetime {
            self.marked_for_deletion = true;
        }

        if self.pos.x < 0.0 || self.pos.x > ctx.width - POWERUP_SIZE {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > ctx.height - POWERUP_SIZE {
            self.vel.y = -self.vel.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ctx(time_scale: f32) -> TickContext {
        TickContext {
            dt: 16.67,
            time_scale,
            width: 800.0,
            height: 600.0,
            player_pos: Vec2::ZERO,
        }
    }

    #[test]
    fn test_every_kind_shows_up() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let kind = PowerUpKind::random(&mut rng);
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_bounces_off_left_wall() {
        let mut p = PowerUp::new(PowerUpKind::Shield, Vec2::new(0.2, 100.0), Vec2::new(-0.5, 0.0), 10_000.0);
        p.update(&ctx(1.0));
        assert!(p.vel.x > 0.0);
        assert_eq!(p.vel.length(), 0.5);
    }

    #[test]
    fn test_expires_after_lifetime() {
        let mut p = PowerUp::new(PowerUpKind::Health, Vec2::new(100.0, 100.0), Vec2::ZERO, 110.0);
        for _ in 0..6 {
            p.update(&ctx(1.0));
        }
        assert!(!p.marked_for_deletion);
        p.update(&ctx(1.0));
        assert!(p.marked_for_deletion);
    }

    #[test]
    fn test_lifetime_stretches_while_frozen() {
        let mut p = PowerUp::new(PowerUpKind::Health, Vec2::new(100.0, 100.0), Vec2::ZERO, 110.0);
        for _ in 0..100 {
            p.update(&ctx(0.05));
        }
        assert!(!p.marked_for_deletion);
    }
}
