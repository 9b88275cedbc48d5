//! Visual particles
//!
//! Purely cosmetic: nothing in gameplay reads them. The pool is capped and
//! trims oldest first.

use glam::Vec2;
use rand::Rng;

use super::context::TickContext;
use crate::consts::PARTICLE_MIN_LIFE;

/// Spread of explosion particle velocities
const EXPLOSION_SPREAD: f32 = 5.0;
/// Thruster exhaust speed
const THRUSTER_SPEED: f32 = 2.0;
/// Thruster particles burn out fast
const THRUSTER_DECAY: f32 = 0.1;
pub const THRUSTER_COLOR: &str = "#0ff";

/// Request for one thruster puff at `pos`, facing `angle`
///
/// Entities hand these back from `update`; the world owns the particle pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exhaust {
    pub pos: Vec2,
    pub angle: f32,
}

/// A single spark
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: &'static str,
    /// 1.0 at birth, purged below `PARTICLE_MIN_LIFE`
    pub life: f32,
    /// Life lost per reference frame
    pub decay: f32,
    pub size: f32,
}

impl Particle {
    /// A spark flying off in a random direction within `spread`
    pub fn burst<R: Rng + ?Sized>(pos: Vec2, color: &'static str, spread: f32, rng: &mut R) -> Self {
        Self {
            pos,
            size: rng.random::<f32>() * 3.0 + 1.0,
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * spread,
                (rng.random::<f32>() - 0.5) * spread,
            ),
            color,
            life: 1.0,
            decay: rng.random::<f32>() * 0.02 + 0.02,
        }
    }

    fn update(&mut self, frames: f32, scale: f32) {
        self.pos += self.vel * scale * frames;
        self.life -= self.decay * scale * frames;
        self.size *= 0.95_f32.powf(frames);
    }

    pub fn alive(&self) -> bool {
        self.life > PARTICLE_MIN_LIFE
    }
}

/// Owns the particle pool
#[derive(Debug, Clone)]
pub struct ParticleManager {
    pub particles: Vec<Particle>,
    pub max_particles: usize,
    /// Slow particles down during a freeze as well
    pub follow_time_scale: bool,
}

impl ParticleManager {
    pub fn new(max_particles: usize, follow_time_scale: bool) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles),
            max_particles,
            follow_time_scale,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Radial burst of `count` sparks
    pub fn explosion<R: Rng + ?Sized>(
        &mut self,
        pos: Vec2,
        color: &'static str,
        count: usize,
        rng: &mut R,
    ) {
        self.particles
            .extend((0..count).map(|_| Particle::burst(pos, color, EXPLOSION_SPREAD, rng)));
    }

    /// One exhaust puff travelling along `angle + π` with a little jitter
    pub fn thruster<R: Rng + ?Sized>(&mut self, pos: Vec2, angle: f32, rng: &mut R) {
        let mut p = Particle::burst(pos, THRUSTER_COLOR, 1.0, rng);
        let back = angle + std::f32::consts::PI;
        p.vel = Vec2::new(
            back.cos() * THRUSTER_SPEED + (rng.random::<f32>() - 0.5),
            back.sin() * THRUSTER_SPEED + (rng.random::<f32>() - 0.5),
        );
        p.decay = THRUSTER_DECAY;
        self.particles.push(p);
    }

    /// Move, fade and shrink every particle, then purge the dead
    pub fn update(&mut self, ctx: &TickContext) {
        let frames = ctx.frames();
        let scale = if self.follow_time_scale {
            ctx.time_scale
        } else {
            1.0
        };
        for particle in &mut self.particles {
            particle.update(frames, scale);
        }
        self.particles.retain(Particle::alive);
        self.enforce_cap();
    }

    /// Trim the oldest particles beyond the cap
    pub fn enforce_cap(&mut self) {
        if self.particles.len() > self.max_particles {
            let excess = self.particles.len() - self.max_particles;
            self.particles.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ctx(dt: f32, time_scale: f32) -> TickContext {
        TickContext {
            dt,
            time_scale,
            width: 800.0,
            height: 600.0,
            player_pos: Vec2::ZERO,
        }
    }

    #[test]
    fn test_explosion_spawns_fresh_particles() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pm = ParticleManager::new(200, true);
        pm.explosion(Vec2::new(10.0, 10.0), "#f00", 15, &mut rng);
        assert_eq!(pm.len(), 15);
        for p in &pm.particles {
            assert_eq!(p.life, 1.0);
            assert!((1.0..4.0).contains(&p.size));
            assert!(p.vel.x.abs() <= 2.5 && p.vel.y.abs() <= 2.5);
        }
    }

    #[test]
    fn test_cap_trims_oldest_first() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pm = ParticleManager::new(200, true);
        pm.explosion(Vec2::ZERO, "#old", 150, &mut rng);
        pm.explosion(Vec2::ZERO, "#new", 150, &mut rng);
        pm.update(&ctx(1.0, 1.0));
        assert_eq!(pm.len(), 200);
        // 100 of the old batch were dropped; survivors are the newest 50 old + 150 new
        assert_eq!(pm.particles.iter().filter(|p| p.color == "#old").count(), 50);
        assert_eq!(pm.particles.iter().filter(|p| p.color == "#new").count(), 150);
    }

    #[test]
    fn test_particles_fade_out() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut pm = ParticleManager::new(200, true);
        pm.explosion(Vec2::ZERO, "#fff", 10, &mut rng);
        // Decay is at least 0.02 per frame, so 60 frames empties the pool
        for _ in 0..60 {
            pm.update(&ctx(16.67, 1.0));
        }
        assert!(pm.is_empty());
    }

    #[test]
    fn test_time_scale_slows_particles() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut scaled = ParticleManager::new(200, true);
        scaled.thruster(Vec2::ZERO, 0.0, &mut rng);
        let mut unscaled = scaled.clone();
        unscaled.follow_time_scale = false;

        scaled.update(&ctx(16.67, 0.05));
        unscaled.update(&ctx(16.67, 0.05));
        assert!(scaled.particles[0].life > unscaled.particles[0].life);
    }

    #[test]
    fn test_thruster_points_backwards() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut pm = ParticleManager::new(200, true);
        // Ship facing +x: exhaust travels toward -x
        pm.thruster(Vec2::ZERO, 0.0, &mut rng);
        let p = &pm.particles[0];
        assert!(p.vel.x < -1.0);
        assert_eq!(p.decay, THRUSTER_DECAY);
        assert_eq!(p.color, THRUSTER_COLOR);
    }
}
