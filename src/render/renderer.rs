//! Frame composition

use glam::Vec2;

use super::shapes::{Draw, DrawContext};
use super::{Composite, Surface};
use crate::settings::Settings;
use crate::sim::{GameMode, World};

/// Translucent clear that leaves short motion trails
const TRAIL_FILL: &str = "rgba(5, 5, 16, 0.5)";
const FREEZE_TINT: &str = "rgba(0, 255, 255, 0.05)";
const FREEZE_BORDER: &str = "#0ff";
const FREEZE_BORDER_WIDTH: f32 = 10.0;

/// Draws a `World` onto any `Surface`
///
/// Layers are drawn back to front: backdrop, player, power-ups, meteors,
/// shooting stars, enemies, projectiles, particles, then the freeze overlay.
#[derive(Debug, Clone)]
pub struct Renderer {
    ctx: DrawContext,
    pub screen_shake: bool,
    pub particles: bool,
}

impl Renderer {
    pub fn new(seed: u64) -> Self {
        Self {
            ctx: DrawContext::new(seed),
            screen_shake: true,
            particles: true,
        }
    }

    pub fn from_settings(settings: &Settings, seed: u64) -> Self {
        let mut renderer = Self::new(seed);
        renderer.apply_settings(settings);
        renderer
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.screen_shake = settings.effective_screen_shake();
        self.particles = settings.particles;
    }

    /// Draw one frame
    pub fn draw<S: Surface>(&mut self, world: &World, s: &mut S) {
        let screen = Vec2::new(world.width, world.height);
        let ctx = &mut self.ctx;
        ctx.time_ms = world.elapsed_ms;
        s.save();

        if self.screen_shake && world.shake.active() {
            s.translate(ctx.jitter(world.shake.magnitude));
        }

        s.set_fill_style(TRAIL_FILL);
        s.fill_rect(Vec2::ZERO, screen);
        world.background.draw(s, ctx);

        if world.mode == GameMode::Menu {
            s.restore();
            return;
        }

        world.player.draw(s, ctx);
        draw_all(&world.powerups, s, ctx);
        draw_all(&world.meteors, s, ctx);
        draw_all(&world.shooting_stars, s, ctx);
        draw_all(&world.enemies, s, ctx);
        draw_all(&world.projectiles, s, ctx);

        if self.particles {
            s.save();
            s.set_composite(Composite::Lighter);
            draw_all(&world.particles.particles, s, ctx);
            s.restore();
        }

        if world.time_frozen {
            s.set_fill_style(FREEZE_TINT);
            s.fill_rect(Vec2::ZERO, screen);
            s.set_stroke_style(FREEZE_BORDER);
            s.set_line_width(FREEZE_BORDER_WIDTH);
            s.stroke_rect(Vec2::ZERO, screen);
        }

        s.restore();
    }
}

fn draw_all<T: Draw, S: Surface>(items: &[T], s: &mut S, ctx: &mut DrawContext) {
    for item in items {
        item.draw(s, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingSurface};
    use crate::sim::{Enemy, EnemyKind, InputState};

    fn running_world() -> World {
        let mut world = World::new(800.0, 600.0, 7);
        world.restart();
        world
    }

    fn freeze_border(s: &RecordingSurface) -> usize {
        s.count(|c| matches!(c, DrawCommand::StrokeRect { .. }))
    }

    #[test]
    fn test_menu_draws_only_backdrop() {
        let world = World::new(800.0, 600.0, 7);
        let mut s = RecordingSurface::new();
        Renderer::new(1).draw(&world, &mut s);

        assert!(s.is_balanced());
        // Trail clear plus one square per star
        assert_eq!(
            s.count(|c| matches!(c, DrawCommand::FillRect { .. })),
            1 + world.background.star_count()
        );
        assert_eq!(s.count(|c| matches!(c, DrawCommand::Rotate(_))), 0);
    }

    #[test]
    fn test_frame_is_balanced_with_entities() {
        let mut world = running_world();
        world
            .enemies
            .push(Enemy::new(EnemyKind::Fighter, Vec2::new(100.0, 100.0), Vec2::ZERO));
        world.update(16.67, &InputState::new());
        let mut s = RecordingSurface::new();
        Renderer::new(1).draw(&world, &mut s);
        assert!(s.is_balanced());
        assert!(s.commands.contains(&DrawCommand::Composite(Composite::Lighter)));
    }

    #[test]
    fn test_freeze_overlay() {
        let mut world = running_world();
        let mut renderer = Renderer::new(1);

        let mut s = RecordingSurface::new();
        renderer.draw(&world, &mut s);
        assert_eq!(freeze_border(&s), 0);

        let mut input = InputState::new();
        input.press("shift");
        world.update(16.67, &input);
        let mut s = RecordingSurface::new();
        renderer.draw(&world, &mut s);
        assert_eq!(freeze_border(&s), 1);
        assert!(s.commands.contains(&DrawCommand::LineWidth(FREEZE_BORDER_WIDTH)));
    }

    #[test]
    fn test_shake_respects_setting() {
        let mut world = running_world();
        world.shake.trigger(20.0);
        let shaken = |s: &RecordingSurface| {
            matches!(s.commands.get(1), Some(DrawCommand::Translate(_)))
        };

        let mut s = RecordingSurface::new();
        Renderer::new(1).draw(&world, &mut s);
        assert!(shaken(&s));

        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut s = RecordingSurface::new();
        Renderer::from_settings(&settings, 1).draw(&world, &mut s);
        assert!(!shaken(&s));
    }

    #[test]
    fn test_drawing_leaves_world_rng_alone() {
        let mut a = running_world();
        let mut b = running_world();
        let mut renderer = Renderer::new(3);
        let input = InputState::new();
        for _ in 0..300 {
            a.update(16.67, &input);
            b.update(16.67, &input);
            renderer.draw(&a, &mut RecordingSurface::new());
        }
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.score, b.score);
    }
}
