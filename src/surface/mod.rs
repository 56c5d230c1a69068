//! Drawing surfaces.
//!
//! Scene entities draw themselves through [`RenderSurface`], a small
//! canvas-like capability set. The same draw calls produce pixels on screen
//! ([`PainterSurface`]), pixels offscreen ([`PixmapSurface`], native only) or
//! TikZ markup ([`TikzSurface`]).

mod painter;
#[cfg(not(target_arch = "wasm32"))]
mod pixmap;
mod tikz;

pub use painter::{EguiTextMeasure, PainterSurface};
#[cfg(not(target_arch = "wasm32"))]
pub use pixmap::{FontdbTextMeasure, PixmapSurface};
pub use tikz::{format_fixed, TikzSurface};

use crate::geometry::Point;

/// Black-box text width measurement.
pub trait TextMeasure {
    /// Width of `text` when laid out on a single line, in canvas units.
    fn text_width(&self, text: &str) -> f32;
}

/// Measures text as a fixed advance per character.
///
/// Used where no font is available (tests, headless export).
#[derive(Debug, Clone, Copy)]
pub struct ApproxTextMeasure {
    /// Advance of every character
    pub char_width: f32,
}

impl Default for ApproxTextMeasure {
    fn default() -> Self {
        Self {
            char_width: crate::constants::FONT_SIZE * 0.5,
        }
    }
}

impl TextMeasure for ApproxTextMeasure {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }
}

/// A canvas-like drawing target.
///
/// Path calls accumulate a polyline that `stroke` or `fill` emits; both leave
/// the path in place until the next `begin_path`.
pub trait RenderSurface {
    /// Discards the accumulated path.
    fn begin_path(&mut self);
    /// Starts a new subpath at `p`.
    fn move_to(&mut self, p: Point);
    /// Extends the current subpath to `p`.
    fn line_to(&mut self, p: Point);
    /// Appends a clockwise arc; a sweep of `2PI` is a full circle.
    fn arc(&mut self, center: Point, radius: f32, start_angle: f32, end_angle: f32);
    /// Outlines the accumulated path.
    fn stroke(&mut self);
    /// Fills the accumulated path.
    fn fill(&mut self);
    /// Width of already-formatted display text.
    fn measure_text(&self, text: &str) -> f32;
    /// Draws a raw label centered on `at`, optionally rotated by `angle`.
    ///
    /// The surface applies its own subscript formatting.
    fn draw_label(&mut self, raw: &str, at: Point, angle: Option<f32>, selected: bool);
    /// Switches strokes and fills between the normal and the selection color.
    fn set_highlight(&mut self, highlight: bool);
}

impl TextMeasure for dyn RenderSurface + '_ {
    fn text_width(&self, text: &str) -> f32 {
        self.measure_text(text)
    }
}

impl<M: TextMeasure + ?Sized> TextMeasure for &M {
    fn text_width(&self, text: &str) -> f32 {
        (**self).text_width(text)
    }
}

/// Accumulates subpaths for backends whose primitives take whole polylines.
#[derive(Debug, Default, Clone)]
pub struct PathRecorder {
    subpaths: Vec<Vec<Point>>,
}

impl PathRecorder {
    /// Drops every subpath.
    pub fn clear(&mut self) {
        self.subpaths.clear();
    }

    /// Starts a new subpath.
    pub fn move_to(&mut self, p: Point) {
        self.subpaths.push(vec![p]);
    }

    /// Extends the current subpath, starting one if needed.
    pub fn line_to(&mut self, p: Point) {
        match self.subpaths.last_mut() {
            Some(path) => path.push(p),
            None => self.subpaths.push(vec![p]),
        }
    }

    /// Appends arc samples to the current subpath.
    pub fn arc(&mut self, center: Point, radius: f32, start: f32, end: f32) {
        for p in crate::geometry::arc_points(center, radius, start, end) {
            self.line_to(p);
        }
    }

    /// Subpaths with at least one point.
    pub fn subpaths(&self) -> impl Iterator<Item = &[Point]> {
        self.subpaths.iter().map(Vec::as_slice).filter(|p| !p.is_empty())
    }
}
