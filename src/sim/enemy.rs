//! Enemy ships and their AI
//!
//! Three variants share one struct: drones drift and spin, fighters turn to
//! face the player and shoot, chasers steer their velocity into the player.

use glam::Vec2;
use rand::Rng;

use super::context::TickContext;
use super::geom::{Rect, outside_bounds};
use super::projectile::Projectile;
use super::spawner::SpawnSide;
use crate::consts::{ENEMY_SIZE, OFFSCREEN_MARGIN};
use crate::lerp_angle;

/// Turn rate toward the player (fraction of the angular gap per tick)
const AIM_SMOOTHING: f32 = 0.1;
/// Drone spin per tick
const DRONE_SPIN: f32 = 0.05;
/// Chaser velocity blend toward its pursuit vector per tick
const CHASE_BLEND: f32 = 0.05;
/// Chaser pursuit speed before the variant multiplier
const CHASE_SPEED: f32 = 3.0;
/// Fighter bullet speed (units per frame)
const BULLET_SPEED: f32 = 8.0;
/// Distance from center to the gun
const NOSE_OFFSET: f32 = 20.0;

/// Enemy variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Drone,
    Fighter,
    Chaser,
}

/// Fixed per-variant numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub hit_points: u32,
    pub score: u64,
    pub speed_multiplier: f32,
    /// Milliseconds between shots (only fighters fire)
    pub shoot_interval: f32,
    pub color: &'static str,
}

impl EnemyKind {
    /// 50% drone, 30% fighter, 20% chaser
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let roll: f32 = rng.random();
        if roll < 0.5 {
            EnemyKind::Drone
        } else if roll < 0.8 {
            EnemyKind::Fighter
        } else {
            EnemyKind::Chaser
        }
    }

    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Drone => EnemyStats {
                hit_points: 2,
                score: 10,
                speed_multiplier: 1.0,
                shoot_interval: 2000.0,
                color: "#0af",
            },
            EnemyKind::Fighter => EnemyStats {
                hit_points: 3,
                score: 20,
                speed_multiplier: 0.8,
                shoot_interval: 1500.0,
                color: "#f0f",
            },
            EnemyKind::Chaser => EnemyStats {
                hit_points: 1,
                score: 15,
                speed_multiplier: 2.0,
                shoot_interval: 2000.0,
                color: "#f50",
            },
        }
    }
}

/// An enemy ship
#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub angle: f32,
    pub hit_points: u32,
    pub shoot_timer: f32,
    pub marked_for_deletion: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            kind,
            pos,
            vel,
            angle: 0.0,
            hit_points: kind.stats().hit_points,
            shoot_timer: 0.0,
            marked_for_deletion: false,
        }
    }

    /// Random variant entering from `side` of a `width` x `height` screen
    pub fn spawn<R: Rng + ?Sized>(side: SpawnSide, width: f32, height: f32, rng: &mut R) -> Self {
        let kind = EnemyKind::roll(rng);
        let base = 2.0 * kind.stats().speed_multiplier;
        let inward = rng.random::<f32>() * base + base;
        let drift = (rng.random::<f32>() - 0.5) * 2.0;
        let along_x = rng.random::<f32>() * (width - ENEMY_SIZE).max(0.0);
        let along_y = rng.random::<f32>() * (height - ENEMY_SIZE).max(0.0);

        let (pos, vel) = match side {
            SpawnSide::Top => (Vec2::new(along_x, -ENEMY_SIZE), Vec2::new(drift, inward)),
            SpawnSide::Right => (Vec2::new(width, along_y), Vec2::new(-inward, drift)),
            SpawnSide::Bottom => (Vec2::new(along_x, height), Vec2::new(drift, -inward)),
            SpawnSide::Left => (Vec2::new(-ENEMY_SIZE, along_y), Vec2::new(inward, drift)),
        };
        Self::new(kind, pos, vel)
    }

    pub fn stats(&self) -> EnemyStats {
        self.kind.stats()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(ENEMY_SIZE))
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Advance one tick; a fighter may hand back a bullet for the world to own
    pub fn update(&mut self, ctx: &TickContext) -> Option<Projectile> {
        let ts = ctx.time_scale;
        self.pos += self.vel * ts;

        let to_player = ctx.player_pos - self.pos;
        let target_angle = to_player.y.atan2(to_player.x);

        match self.kind {
            EnemyKind::Drone => self.angle += DRONE_SPIN * ts,
            EnemyKind::Fighter | EnemyKind::Chaser => {
                self.angle = lerp_angle(self.angle, target_angle, AIM_SMOOTHING * ts);
            }
        }

        if self.kind == EnemyKind::Chaser {
            let speed = CHASE_SPEED * self.stats().speed_multiplier;
            let pursuit = Vec2::new(target_angle.cos(), target_angle.sin()) * speed;
            self.vel += (pursuit - self.vel) * CHASE_BLEND * ts;
        }

        let mut shot = None;
        if self.kind == EnemyKind::Fighter {
            if self.shoot_timer > self.stats().shoot_interval {
                let dir = Vec2::new(self.angle.cos(), self.angle.sin());
                let nose = self.center() + dir * NOSE_OFFSET;
                shot = Some(Projectile::new(nose, dir * BULLET_SPEED, true));
                self.shoot_timer = 0.0;
            }
            self.shoot_timer += ctx.scaled_dt();
        }

        if outside_bounds(self.pos, ctx.width, ctx.height, OFFSCREEN_MARGIN) {
            self.marked_for_deletion = true;
        }

        shot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ctx(player_pos: Vec2, time_scale: f32) -> TickContext {
        TickContext {
            dt: 16.67,
            time_scale,
            width: 800.0,
            height: 600.0,
            player_pos,
        }
    }

    #[test]
    fn test_kind_split_is_roughly_50_30_20() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut counts = [0u32; 3];
        for _ in 0..10_000 {
            match EnemyKind::roll(&mut rng) {
                EnemyKind::Drone => counts[0] += 1,
                EnemyKind::Fighter => counts[1] += 1,
                EnemyKind::Chaser => counts[2] += 1,
            }
        }
        assert!((4700..5300).contains(&counts[0]), "{counts:?}");
        assert!((2700..3300).contains(&counts[1]), "{counts:?}");
        assert!((1700..2300).contains(&counts[2]), "{counts:?}");
    }

    #[test]
    fn test_score_values() {
        assert_eq!(EnemyKind::Drone.stats().score, 10);
        assert_eq!(EnemyKind::Fighter.stats().score, 20);
        assert_eq!(EnemyKind::Chaser.stats().score, 15);
    }

    #[test]
    fn test_top_spawn_enters_downward() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..50 {
            let e = Enemy::spawn(SpawnSide::Top, 800.0, 600.0, &mut rng);
            assert_eq!(e.pos.y, -ENEMY_SIZE);
            assert!((0.0..=760.0).contains(&e.pos.x));
            assert!(e.vel.y > 0.0);
            assert!(e.vel.x.abs() <= 1.0);
        }
    }

    #[test]
    fn test_left_spawn_enters_rightward() {
        let mut rng = Pcg32::seed_from_u64(11);
        let e = Enemy::spawn(SpawnSide::Left, 800.0, 600.0, &mut rng);
        assert_eq!(e.pos.x, -ENEMY_SIZE);
        assert!(e.vel.x > 0.0);
    }

    #[test]
    fn test_drone_spins_and_never_shoots() {
        let mut drone = Enemy::new(EnemyKind::Drone, Vec2::new(100.0, 100.0), Vec2::ZERO);
        drone.shoot_timer = 10_000.0;
        assert!(drone.update(&ctx(Vec2::new(400.0, 300.0), 1.0)).is_none());
        assert!((drone.angle - DRONE_SPIN).abs() < 1e-6);
    }

    #[test]
    fn test_fighter_turns_toward_player() {
        let mut fighter = Enemy::new(EnemyKind::Fighter, Vec2::new(100.0, 100.0), Vec2::ZERO);
        // Player straight below: target angle is π/2
        let c = ctx(Vec2::new(100.0, 400.0), 1.0);
        fighter.update(&c);
        assert!((fighter.angle - std::f32::consts::FRAC_PI_2 * 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_fighter_fires_after_interval() {
        let mut fighter = Enemy::new(EnemyKind::Fighter, Vec2::new(100.0, 100.0), Vec2::ZERO);
        let c = ctx(Vec2::new(100.0, 400.0), 1.0);
        let mut shots = 0;
        // 1500ms interval at 16.67ms per tick: first shot on tick 91
        for _ in 0..91 {
            if let Some(p) = fighter.update(&c) {
                assert!(p.is_enemy);
                assert!((p.vel.length() - BULLET_SPEED).abs() < 1e-4);
                shots += 1;
            }
        }
        assert_eq!(shots, 1);
    }

    #[test]
    fn test_fighter_reloads_slower_while_frozen() {
        let mut fighter = Enemy::new(EnemyKind::Fighter, Vec2::new(100.0, 100.0), Vec2::ZERO);
        let c = ctx(Vec2::new(100.0, 400.0), 0.05);
        for _ in 0..200 {
            assert!(fighter.update(&c).is_none());
        }
    }

    #[test]
    fn test_chaser_bends_toward_player() {
        let mut chaser = Enemy::new(EnemyKind::Chaser, Vec2::new(100.0, 100.0), Vec2::new(0.0, 4.0));
        // Player to the right
        let c = ctx(Vec2::new(700.0, 100.0), 1.0);
        chaser.update(&c);
        assert!(chaser.vel.x > 0.0);
        assert!(chaser.vel.y < 4.0);
    }

    #[test]
    fn test_culled_past_margin() {
        let mut e = Enemy::new(EnemyKind::Drone, Vec2::new(100.0, 699.0), Vec2::new(0.0, 2.0));
        e.update(&ctx(Vec2::ZERO, 1.0));
        assert!(e.marked_for_deletion);
    }
}
