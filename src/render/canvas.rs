//! `Surface` backed by the browser's 2D canvas context

use glam::Vec2;
use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;

use super::{Composite, Surface};

// Transform and arc calls only fail on non-finite input; a bad frame is skipped
// rather than aborting the loop.
impl Surface for CanvasRenderingContext2d {
    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&mut self, offset: Vec2) {
        CanvasRenderingContext2d::translate(self, offset.x as f64, offset.y as f64).ok();
    }

    fn rotate(&mut self, angle: f32) {
        CanvasRenderingContext2d::rotate(self, angle as f64).ok();
    }

    fn set_fill_style(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f32) {
        CanvasRenderingContext2d::set_line_width(self, width as f64);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        CanvasRenderingContext2d::set_global_alpha(self, alpha as f64);
    }

    fn set_composite(&mut self, mode: Composite) {
        self.set_global_composite_operation(mode.as_str()).ok();
    }

    fn set_shadow(&mut self, blur: f32, color: &str) {
        self.set_shadow_blur(blur as f64);
        self.set_shadow_color(color);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, point: Vec2) {
        CanvasRenderingContext2d::move_to(self, point.x as f64, point.y as f64);
    }

    fn line_to(&mut self, point: Vec2) {
        CanvasRenderingContext2d::line_to(self, point.x as f64, point.y as f64);
    }

    fn circle(&mut self, center: Vec2, radius: f32) {
        self.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .ok();
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn fill(&mut self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2) {
        CanvasRenderingContext2d::fill_rect(
            self,
            pos.x as f64,
            pos.y as f64,
            size.x as f64,
            size.y as f64,
        );
    }

    fn stroke_rect(&mut self, pos: Vec2, size: Vec2) {
        CanvasRenderingContext2d::stroke_rect(
            self,
            pos.x as f64,
            pos.y as f64,
            size.x as f64,
            size.y as f64,
        );
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str) {
        self.set_font(font);
        self.set_text_align("center");
        self.set_text_baseline("middle");
        CanvasRenderingContext2d::fill_text(self, text, pos.x as f64, pos.y as f64).ok();
    }
}
