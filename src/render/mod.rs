//! Canvas-style 2D rendering
//!
//! Drawing is immediate-mode against a `Surface`. The browser build backs it
//! with a `CanvasRenderingContext2d`; tests and the native runner use
//! `RecordingSurface`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;
pub mod renderer;
pub mod shapes;

use glam::Vec2;

pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::Renderer;
pub use shapes::{Draw, DrawContext};

/// How new pixels combine with what is already drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    SourceOver,
    /// Additive blending for glowing sparks
    Lighter,
}

impl Composite {
    pub fn as_str(&self) -> &'static str {
        match self {
            Composite::SourceOver => "source-over",
            Composite::Lighter => "lighter",
        }
    }
}

/// The subset of the canvas 2D API the game draws with
///
/// Colors are CSS color strings. `save`/`restore` bracket transform and
/// style changes exactly like the canvas state stack.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);

    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f32);
    fn set_global_alpha(&mut self, alpha: f32);
    fn set_composite(&mut self, mode: Composite);
    /// Glow around subsequent fills and strokes; `blur` 0 disables it
    fn set_shadow(&mut self, blur: f32, color: &str);

    fn begin_path(&mut self);
    fn move_to(&mut self, point: Vec2);
    fn line_to(&mut self, point: Vec2);
    /// Full circle sub-path
    fn circle(&mut self, center: Vec2, radius: f32);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn fill_rect(&mut self, pos: Vec2, size: Vec2);
    fn stroke_rect(&mut self, pos: Vec2, size: Vec2);
    /// Text centered on `pos`
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str);

    /// Closed polygon path through `points`
    fn polygon(&mut self, points: &[Vec2]) {
        self.begin_path();
        if let Some((first, rest)) = points.split_first() {
            self.move_to(*first);
            for p in rest {
                self.line_to(*p);
            }
        }
        self.close_path();
    }
}
