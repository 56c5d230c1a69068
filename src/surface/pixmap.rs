//! Offscreen raster backend for PNG export.
//!
//! Paths go straight to tiny-skia. Labels are rendered by building a one-node
//! SVG document per label and letting resvg draw it onto the same pixmap.

use super::{ApproxTextMeasure, PathRecorder, RenderSurface, TextMeasure};
use crate::error::ExportError;
use crate::geometry::Point;
use crate::label::{apply_subscripts, SubscriptStyle};
use std::sync::Arc;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

const STROKE_WIDTH: f32 = 1.5;

/// Measures text by laying it out with usvg against a font database.
#[derive(Clone)]
pub struct FontdbTextMeasure {
    fonts: Arc<fontdb::Database>,
    font_size: f32,
}

impl FontdbTextMeasure {
    /// Measures with the fonts in `fonts` at `font_size`.
    pub fn new(fonts: Arc<fontdb::Database>, font_size: f32) -> Self {
        Self { fonts, font_size }
    }

    /// Loads the system fonts. This is slow; callers should keep the result.
    pub fn system_fonts() -> Arc<fontdb::Database> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("loaded {} font faces", db.len());
        Arc::new(db)
    }

    fn text_tree(&self, text: &str, at: Point, angle: f32, fill: Color) -> Option<usvg::Tree> {
        let rgb = fill.to_color_u8();
        let svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1\" height=\"1\">\
             <text x=\"{x}\" y=\"{y}\" font-family=\"serif, sans-serif\" font-size=\"{size}\" \
             fill=\"#{r:02x}{g:02x}{b:02x}\" text-anchor=\"middle\" dominant-baseline=\"central\" \
             transform=\"rotate({deg} {x} {y})\">{text}</text></svg>",
            x = at.x,
            y = at.y,
            size = self.font_size,
            r = rgb.red(),
            g = rgb.green(),
            b = rgb.blue(),
            deg = angle.to_degrees(),
            text = escape_xml(text),
        );
        let options = usvg::Options {
            fontdb: self.fonts.clone(),
            ..Default::default()
        };
        match usvg::Tree::from_data(svg.as_bytes(), &options) {
            Ok(tree) => Some(tree),
            Err(e) => {
                log::warn!("could not lay out label {text:?}: {e}");
                None
            }
        }
    }
}

impl TextMeasure for FontdbTextMeasure {
    fn text_width(&self, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        match self.text_tree(text, Point::ZERO, 0.0, Color::BLACK) {
            Some(tree) if !tree.root().children().is_empty() => tree.root().bounding_box().width(),
            // No usable font: fall back to a fixed advance.
            _ => ApproxTextMeasure {
                char_width: self.font_size * 0.5,
            }
            .text_width(text),
        }
    }
}

/// Draws onto a white tiny-skia pixmap.
pub struct PixmapSurface {
    pixmap: Pixmap,
    transform: Transform,
    text: FontdbTextMeasure,
    path: PathRecorder,
    highlighted: bool,
}

impl PixmapSurface {
    /// A blank `width` x `height` canvas rendered at `scale` pixels per unit.
    pub fn new(
        width: u32,
        height: u32,
        scale: f32,
        font_size: f32,
        fonts: Arc<fontdb::Database>,
    ) -> Result<Self, ExportError> {
        let scale = scale.clamp(0.25, 8.0);
        let out_w = (width as f32 * scale).round() as u32;
        let out_h = (height as f32 * scale).round() as u32;
        let mut pixmap =
            Pixmap::new(out_w, out_h).ok_or(ExportError::EmptyCanvas { width, height })?;
        pixmap.fill(Color::WHITE);
        Ok(Self {
            pixmap,
            transform: Transform::from_scale(scale, scale),
            text: FontdbTextMeasure::new(fonts, font_size),
            path: PathRecorder::default(),
            highlighted: false,
        })
    }

    /// Encodes the pixmap as PNG.
    pub fn finish(self) -> Result<Vec<u8>, ExportError> {
        self.pixmap
            .encode_png()
            .map_err(|e| ExportError::Encode(e.to_string()))
    }

    fn color(&self) -> Color {
        if self.highlighted {
            Color::from_rgba8(0, 0, 255, 255)
        } else {
            Color::BLACK
        }
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(self.color());
        paint.anti_alias = true;
        paint
    }

    fn build_path(&self, close: bool) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::new();
        for subpath in self.path.subpaths().filter(|s| s.len() >= 2) {
            pb.move_to(subpath[0].x, subpath[0].y);
            for p in &subpath[1..] {
                pb.line_to(p.x, p.y);
            }
            if close {
                pb.close();
            }
        }
        pb.finish()
    }
}

impl RenderSurface for PixmapSurface {
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
        if let Some(path) = self.build_path(false) {
            let stroke = Stroke {
                width: STROKE_WIDTH,
                ..Default::default()
            };
            let paint = self.paint();
            self.pixmap
                .stroke_path(&path, &paint, &stroke, self.transform, None);
        }
    }

    fn fill(&mut self) {
        if let Some(path) = self.build_path(true) {
            let paint = self.paint();
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, self.transform, None);
        }
    }

    fn measure_text(&self, text: &str) -> f32 {
        self.text.text_width(text)
    }

    fn draw_label(&mut self, raw: &str, at: Point, angle: Option<f32>, selected: bool) {
        let text = apply_subscripts(raw, SubscriptStyle::Unicode);
        if text.trim().is_empty() {
            return;
        }
        let fill = if selected {
            Color::from_rgba8(0, 0, 255, 255)
        } else {
            Color::BLACK
        };
        if let Some(tree) = self.text.text_tree(&text, at, angle.unwrap_or(0.0), fill) {
            resvg::render(&tree, self.transform, &mut self.pixmap.as_mut());
        }
    }

    fn set_highlight(&mut self, highlight: bool) {
        self.highlighted = highlight;
    }
}

fn escape_xml(input: &str) -> String {
    let mut s = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            _ => s.push(ch),
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{Editor, InputEvent};

    fn no_fonts() -> Arc<fontdb::Database> {
        Arc::new(fontdb::Database::new())
    }

    #[test]
    fn zero_sized_canvas_is_an_error() {
        let err = PixmapSurface::new(0, 100, 1.0, 20.0, no_fonts()).err();
        assert!(matches!(err, Some(ExportError::EmptyCanvas { width: 0, height: 100 })));
    }

    #[test]
    fn export_produces_png_of_scaled_size() {
        let mut ed = Editor::default();
        ed.settings.png_scale = 2.0;
        ed.handle(InputEvent::DoubleClick(Point::new(50.0, 50.0)));
        ed.handle(InputEvent::Text("x_1_".into()));

        let png = ed.export_image(120, 80, no_fonts()).expect("png");
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = Pixmap::decode_png(&png).expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (240, 160));
    }

    #[test]
    fn stroked_circle_inks_the_outline_only() {
        let mut s = PixmapSurface::new(100, 100, 1.0, 20.0, no_fonts()).expect("surface");
        s.begin_path();
        s.arc(Point::new(50.0, 50.0), 30.0, 0.0, std::f32::consts::TAU);
        s.stroke();
        let pixel = |x: u32, y: u32| s.pixmap.pixel(x, y).expect("pixel");
        assert_eq!(pixel(50, 50).red(), 255, "center stays white");
        assert!(pixel(80, 50).red() < 255, "outline is inked");
    }

    #[test]
    fn measure_without_fonts_falls_back_to_fixed_advance() {
        let m = FontdbTextMeasure::new(no_fonts(), 20.0);
        assert_eq!(m.text_width(""), 0.0);
        assert_eq!(m.text_width("abc"), 30.0);
    }

    #[test]
    fn xml_special_characters_are_escaped() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
