//! Surface that records commands instead of drawing

use glam::Vec2;

use super::{Composite, Surface};

/// One recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    FillStyle(String),
    StrokeStyle(String),
    LineWidth(f32),
    GlobalAlpha(f32),
    Composite(Composite),
    Shadow { blur: f32, color: String },
    BeginPath,
    MoveTo(Vec2),
    LineTo(Vec2),
    Circle { center: Vec2, radius: f32 },
    ClosePath,
    Fill,
    Stroke,
    FillRect { pos: Vec2, size: Vec2 },
    StrokeRect { pos: Vec2, size: Vec2 },
    FillText { text: String, pos: Vec2 },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    depth: usize,
    max_depth: usize,
    unbalanced: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Every `restore` matched an earlier `save` and nothing is left open
    pub fn is_balanced(&self) -> bool {
        !self.unbalanced && self.depth == 0
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    fn push(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        match self.depth.checked_sub(1) {
            Some(depth) => self.depth = depth,
            None => self.unbalanced = true,
        }
        self.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, angle: f32) {
        self.push(DrawCommand::Rotate(angle));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.push(DrawCommand::FillStyle(color.to_string()));
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.push(DrawCommand::StrokeStyle(color.to_string()));
    }

    fn set_line_width(&mut self, width: f32) {
        self.push(DrawCommand::LineWidth(width));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn set_composite(&mut self, mode: Composite) {
        self.push(DrawCommand::Composite(mode));
    }

    fn set_shadow(&mut self, blur: f32, color: &str) {
        self.push(DrawCommand::Shadow {
            blur,
            color: color.to_string(),
        });
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: Vec2) {
        self.push(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Vec2) {
        self.push(DrawCommand::LineTo(point));
    }

    fn circle(&mut self, center: Vec2, radius: f32) {
        self.push(DrawCommand::Circle { center, radius });
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2) {
        self.push(DrawCommand::FillRect { pos, size });
    }

    fn stroke_rect(&mut self, pos: Vec2, size: Vec2) {
        self.push(DrawCommand::StrokeRect { pos, size });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, _font: &str) {
        self.push(DrawCommand::FillText {
            text: text.to_string(),
            pos,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_tracking() {
        let mut s = RecordingSurface::new();
        s.save();
        s.save();
        s.restore();
        assert!(!s.is_balanced());
        s.restore();
        assert!(s.is_balanced());
        assert_eq!(s.max_depth(), 2);

        s.restore();
        assert!(!s.is_balanced());
    }

    #[test]
    fn test_polygon_closes_path() {
        let mut s = RecordingSurface::new();
        s.polygon(&[Vec2::ZERO, Vec2::X, Vec2::Y]);
        assert_eq!(s.commands.first(), Some(&DrawCommand::BeginPath));
        assert_eq!(s.commands[1], DrawCommand::MoveTo(Vec2::ZERO));
        assert_eq!(s.count(|c| matches!(c, DrawCommand::LineTo(_))), 2);
        assert_eq!(s.commands.last(), Some(&DrawCommand::ClosePath));
    }
}
