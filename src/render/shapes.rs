//! Per-entity drawing
//!
//! Every `draw` leaves the surface state as it found it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

use super::Surface;
use crate::consts::{PLAYER_SIZE, POWERUP_SIZE, PROJECTILE_SIZE};
use crate::sim::{Background, Enemy, EnemyKind, Meteor, Particle, Player, PowerUp, Projectile, ShootingStar};

const SHIP_COLOR: &str = "#0ff";
const HULL_FILL: &str = "#000";
const SHIELD_FILL: &str = "rgba(0, 255, 255, 0.2)";
const ENGINE_COLOR: &str = "#f0f";
const RAPID_FIRE_ENGINE_COLOR: &str = "#ff0";
const METEOR_FILL: &str = "#444";
const METEOR_EDGE: &str = "#888";
const STAR_FILL: &str = "#fff";
const STAR_GLOW: &str = "#ffffaa";
const POWERUP_FONT: &str = "bold 10px Arial";
/// Chance an enemy engine flame shows on a given frame
const FLAME_CHANCE: f64 = 0.3;

/// Per-frame drawing state: the pulse clock and a cosmetic RNG
///
/// The RNG is separate from the world's so drawing never changes gameplay.
#[derive(Debug, Clone)]
pub struct DrawContext {
    pub time_ms: f64,
    rng: Pcg32,
}

impl DrawContext {
    pub fn new(seed: u64) -> Self {
        Self {
            time_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Sine pulse in [-1, 1] with the given period divisor
    pub fn pulse(&self, divisor: f64) -> f32 {
        (self.time_ms / divisor).sin() as f32
    }

    /// Random offset within ±magnitude/2 on each axis
    pub fn jitter(&mut self, magnitude: f32) -> Vec2 {
        Vec2::new(
            (self.rng.random::<f32>() - 0.5) * magnitude,
            (self.rng.random::<f32>() - 0.5) * magnitude,
        )
    }

    /// Length of an engine flame, when one shows this frame
    pub fn flame(&mut self) -> Option<f32> {
        self.rng
            .random_bool(FLAME_CHANCE)
            .then(|| self.rng.random::<f32>() * 15.0 + 5.0)
    }
}

/// Something that knows how to draw itself
pub trait Draw {
    fn draw<S: Surface>(&self, s: &mut S, ctx: &mut DrawContext);
}

/// Triangle ship pointing along its aim, with shield bubble and engine pulse
impl Draw for Player {
    fn draw<S: Surface>(&self, s: &mut S, ctx: &mut DrawContext) {
        let half = PLAYER_SIZE / 2.0;
        s.save();
        s.translate(self.center());
        s.rotate(self.angle + FRAC_PI_2);

        s.set_stroke_style(SHIP_COLOR);
        s.set_line_width(2.0);
        s.set_shadow(15.0, SHIP_COLOR);
        s.set_fill_style(HULL_FILL);
        s.polygon(&[
            Vec2::new(0.0, -half),
            Vec2::new(half, half),
            Vec2::new(0.0, half - 10.0),
            Vec2::new(-half, half),
        ]);
        s.fill();
        s.stroke();

        if self.is_shielded() {
            s.set_line_width(1.0);
            s.begin_path();
            s.circle(Vec2::ZERO, PLAYER_SIZE);
            s.stroke();
            s.set_fill_style(SHIELD_FILL);
            s.fill();
        }

        s.set_fill_style(if self.is_rapid_fire() {
            RAPID_FIRE_ENGINE_COLOR
        } else {
            ENGINE_COLOR
        });
        s.set_global_alpha(0.5 + ctx.pulse(100.0) * 0.2);
        s.begin_path();
        s.circle(Vec2::new(0.0, half - 5.0), 5.0);
        s.fill();

        s.restore();
    }
}

/// Hostile ship with a flickering engine flame
impl Draw for Enemy {
    fn draw<S: Surface>(&self, s: &mut S, ctx: &mut DrawContext) {
        let color = self.stats().color;
        s.save();
        s.translate(self.center());
        s.rotate(self.angle);

        s.set_stroke_style(color);
        s.set_line_width(2.0);
        s.set_shadow(10.0, color);
        s.set_fill_style(HULL_FILL);

        match self.kind {
            EnemyKind::Chaser => {
                s.polygon(&[
                    Vec2::new(15.0, 0.0),
                    Vec2::new(-10.0, 10.0),
                    Vec2::new(-5.0, 0.0),
                    Vec2::new(-10.0, -10.0),
                ]);
                s.fill();
                s.stroke();

                s.set_fill_style(color);
                s.begin_path();
                s.circle(Vec2::ZERO, 3.0);
                s.fill();
            }
            EnemyKind::Fighter => {
                s.polygon(&[
                    Vec2::new(15.0, 0.0),
                    Vec2::new(-5.0, 12.0),
                    Vec2::new(-5.0, -12.0),
                ]);
                s.fill();
                s.stroke();

                for side in [1.0, -1.0] {
                    s.begin_path();
                    s.move_to(Vec2::new(-5.0, 12.0 * side));
                    s.line_to(Vec2::new(-15.0, 20.0 * side));
                    s.stroke();
                }
            }
            EnemyKind::Drone => {
                let hexagon: Vec<Vec2> = (0..6)
                    .map(|i| Vec2::from_angle(i as f32 * FRAC_PI_3) * 15.0)
                    .collect();
                s.polygon(&hexagon);
                s.fill();
                s.stroke();

                // Eye
                s.set_fill_style(color);
                s.set_global_alpha(0.5 + ctx.pulse(200.0) * 0.5);
                s.begin_path();
                s.circle(Vec2::ZERO, 6.0);
                s.fill();
            }
        }

        s.set_global_alpha(1.0);
        if let Some(len) = ctx.flame() {
            s.set_stroke_style(STAR_FILL);
            s.begin_path();
            s.move_to(Vec2::new(-10.0, 0.0));
            s.line_to(Vec2::new(-10.0 - len, 0.0));
            s.stroke();
        }

        s.restore();
    }
}

impl Draw for Projectile {
    fn draw<S: Surface>(&self, s: &mut S, _ctx: &mut DrawContext) {
        let color = self.color();
        s.save();
        s.set_fill_style(color);
        s.set_shadow(10.0, color);
        s.fill_rect(self.pos, Vec2::splat(PROJECTILE_SIZE));
        s.restore();
    }
}

/// Jagged rock from its stored outline
impl Draw for Meteor {
    fn draw<S: Surface>(&self, s: &mut S, _ctx: &mut DrawContext) {
        s.save();
        s.translate(self.pos);
        s.rotate(self.rotation);
        s.set_stroke_style(METEOR_EDGE);
        s.set_fill_style(METEOR_FILL);
        s.set_line_width(2.0);
        s.polygon(&self.vertices);
        s.fill();
        s.stroke();
        s.restore();
    }
}

/// Pulsing orb with its one-letter label
impl Draw for PowerUp {
    fn draw<S: Surface>(&self, s: &mut S, ctx: &mut DrawContext) {
        let color = self.kind.color();
        let center = self.rect().center();
        s.save();
        s.set_fill_style(color);
        s.set_shadow(10.0 + ctx.pulse(200.0) * 5.0, color);
        s.begin_path();
        s.circle(center, POWERUP_SIZE / 2.0);
        s.fill();

        s.set_fill_style(HULL_FILL);
        s.fill_text(self.kind.label(), center, POWERUP_FONT);
        s.restore();
    }
}

/// Five-pointed star
impl Draw for ShootingStar {
    fn draw<S: Surface>(&self, s: &mut S, _ctx: &mut DrawContext) {
        let outer = self.radius();
        let inner = 7.0;
        let points: Vec<Vec2> = (0..5)
            .flat_map(|i| {
                let tip = (18.0 + i as f32 * 72.0).to_radians();
                let notch = (54.0 + i as f32 * 72.0).to_radians();
                [
                    Vec2::new(tip.cos(), -tip.sin()) * outer,
                    Vec2::new(notch.cos(), -notch.sin()) * inner,
                ]
            })
            .collect();

        s.save();
        s.translate(self.center());
        s.rotate(self.angle);
        s.set_shadow(20.0, STAR_GLOW);
        s.set_fill_style(STAR_FILL);
        s.polygon(&points);
        s.fill();
        s.restore();
    }
}

/// Assumes the caller already set additive compositing
impl Draw for Particle {
    fn draw<S: Surface>(&self, s: &mut S, _ctx: &mut DrawContext) {
        s.save();
        s.set_global_alpha(self.life.clamp(0.0, 1.0));
        s.set_fill_style(self.color);
        s.begin_path();
        s.circle(self.pos, self.size);
        s.fill();
        s.restore();
    }
}

impl Draw for Background {
    fn draw<S: Surface>(&self, s: &mut S, _ctx: &mut DrawContext) {
        for star in self.layers.iter().flat_map(|l| &l.stars) {
            s.set_global_alpha(star.alpha);
            s.set_fill_style(star.color);
            s.fill_rect(star.pos, Vec2::splat(star.size));
        }
        s.set_global_alpha(1.0);
    }
}
