//! On-screen backend drawing through an [`egui::Painter`].

use super::{PathRecorder, RenderSurface, TextMeasure};
use crate::constants::CARET_HALF_HEIGHT;
use crate::geometry::Point;
use crate::label::{apply_subscripts, SubscriptStyle};
use eframe::egui;
use eframe::epaint::TextShape;

const STROKE_WIDTH: f32 = 1.5;

/// Measures text with egui's font system.
pub struct EguiTextMeasure<'a> {
    ctx: &'a egui::Context,
    font: egui::FontId,
}

impl<'a> EguiTextMeasure<'a> {
    /// Measures with the proportional font at `font_size`.
    pub fn new(ctx: &'a egui::Context, font_size: f32) -> Self {
        Self {
            ctx,
            font: egui::FontId::proportional(font_size),
        }
    }
}

impl TextMeasure for EguiTextMeasure<'_> {
    fn text_width(&self, text: &str) -> f32 {
        self.ctx.fonts_mut(|f| {
            f.layout_no_wrap(text.to_owned(), self.font.clone(), egui::Color32::BLACK)
                .size()
                .x
        })
    }
}

/// Draws into an egui painter, offsetting canvas coordinates by `origin`.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Vec2,
    font: egui::FontId,
    ink: egui::Color32,
    accent: egui::Color32,
    highlighted: bool,
    path: PathRecorder,
}

impl<'a> PainterSurface<'a> {
    /// A surface whose canvas origin sits at `origin` on screen.
    pub fn new(
        painter: &'a egui::Painter,
        origin: egui::Pos2,
        font_size: f32,
        dark_mode: bool,
    ) -> Self {
        let (ink, accent) = if dark_mode {
            (egui::Color32::from_gray(230), egui::Color32::from_rgb(100, 150, 255))
        } else {
            (egui::Color32::BLACK, egui::Color32::from_rgb(0, 0, 255))
        };
        Self {
            painter,
            origin: origin.to_vec2(),
            font: egui::FontId::proportional(font_size),
            ink,
            accent,
            highlighted: false,
            path: PathRecorder::default(),
        }
    }

    fn to_screen(&self, p: Point) -> egui::Pos2 {
        egui::pos2(p.x, p.y) + self.origin
    }

    fn color(&self) -> egui::Color32 {
        if self.highlighted {
            self.accent
        } else {
            self.ink
        }
    }

    fn screen_points(&self, subpath: &[Point]) -> Vec<egui::Pos2> {
        subpath.iter().map(|p| self.to_screen(*p)).collect()
    }
}

impl RenderSurface for PainterSurface<'_> {
    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
    }

    fn line_to(&mut self, p: Point) {
        self.path.line_to(p);
    }

    fn arc(&mut self, center: Point, radius: f32, start_angle: f32, end_angle: f32) {
        self.path.arc(center, radius, start_angle, end_angle);
    }

    fn stroke(&mut self) {
        let stroke = egui::Stroke::new(STROKE_WIDTH, self.color());
        for subpath in self.path.subpaths().filter(|s| s.len() >= 2) {
            self.painter
                .add(egui::Shape::line(self.screen_points(subpath), stroke));
        }
    }

    fn fill(&mut self) {
        for subpath in self.path.subpaths().filter(|s| s.len() >= 3) {
            self.painter.add(egui::Shape::convex_polygon(
                self.screen_points(subpath),
                self.color(),
                egui::Stroke::NONE,
            ));
        }
    }

    fn measure_text(&self, text: &str) -> f32 {
        self.painter
            .layout_no_wrap(text.to_owned(), self.font.clone(), self.ink)
            .size()
            .x
    }

    fn draw_label(&mut self, raw: &str, at: Point, angle: Option<f32>, selected: bool) {
        let color = if selected { self.accent } else { self.ink };
        let text = apply_subscripts(raw, SubscriptStyle::Unicode);
        let galley = self.painter.layout_no_wrap(text, self.font.clone(), color);
        let half_w = galley.size().x / 2.0;
        let half_h = galley.size().y / 2.0;
        let angle = angle.unwrap_or(0.0);

        // TextShape rotates about its top-left corner; place that corner so the
        // galley ends up centered on `at`.
        let top_left = Point::new(at.x - half_w, at.y - half_h).rotate_around(at, angle);
        self.painter
            .add(TextShape::new(self.to_screen(top_left), galley, color).with_angle(angle));

        if selected {
            let x = at.x + half_w + 1.0;
            let top = Point::new(x, at.y - CARET_HALF_HEIGHT).rotate_around(at, angle);
            let bottom = Point::new(x, at.y + CARET_HALF_HEIGHT).rotate_around(at, angle);
            self.painter.line_segment(
                [self.to_screen(top), self.to_screen(bottom)],
                egui::Stroke::new(1.0, color),
            );
        }
    }

    fn set_highlight(&mut self, highlight: bool) {
        self.highlighted = highlight;
    }
}
