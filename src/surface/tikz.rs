//! TikZ markup backend.
//!
//! `stroke` and `fill` append one `\draw`/`\fill` command per recorded subpath
//! or arc. Canvas coordinates are scaled and y is flipped, because TikZ's y
//! axis points up.

use super::{PathRecorder, RenderSurface, TextMeasure};
use crate::constants::TIKZ_LABEL_NUDGE;
use crate::geometry::Point;
use crate::label::{apply_subscripts, SubscriptStyle};
use std::f64::consts::TAU;
use std::fmt::Write as _;

const PROLOGUE: &str = "\\begin{center}\n\
\\begin{tikzpicture}[scale=0.2]\n\
\\tikzstyle{every node}+=[inner sep=0pt]\n";

const EPILOGUE: &str = "\\end{tikzpicture}\n\\end{center}\n";

/// Formats `value` with `digits` decimals, then strips trailing zeros and a
/// trailing decimal point. Negative zero prints as `0`.
pub fn format_fixed(value: f64, digits: usize) -> String {
    let fixed = format!("{:.*}", digits, value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Converts to degrees, rounded to the f32 precision the angle arrived with.
fn degrees(radians: f64) -> f64 {
    f64::from(radians.to_degrees() as f32)
}

/// An arc waiting for the next `stroke` or `fill`.
#[derive(Debug, Clone, Copy)]
struct PendingArc {
    center: Point,
    radius: f32,
    start: f32,
    end: f32,
}

/// Accumulates a TikZ picture from draw calls.
pub struct TikzSurface<'a> {
    measure: &'a dyn TextMeasure,
    scale: f32,
    path: PathRecorder,
    arcs: Vec<PendingArc>,
    color: &'static str,
    body: String,
}

impl<'a> TikzSurface<'a> {
    /// Creates an empty picture; `scale` multiplies every canvas coordinate.
    pub fn new(measure: &'a dyn TextMeasure, scale: f32) -> Self {
        Self {
            measure,
            scale,
            path: PathRecorder::default(),
            arcs: Vec::new(),
            color: "black",
            body: String::new(),
        }
    }

    /// The commands emitted so far, without prologue or epilogue.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The complete snippet.
    pub fn finish(self) -> String {
        format!("{PROLOGUE}{}{EPILOGUE}", self.body)
    }

    fn scaled(&self, value: f32) -> f64 {
        f64::from(value) * f64::from(self.scale)
    }

    fn coord(&self, p: Point, digits: usize) -> String {
        format!(
            "({},{})",
            format_fixed(self.scaled(p.x), digits),
            format_fixed(-self.scaled(p.y), digits)
        )
    }

    /// `circle` for a full sweep, otherwise `arc` from the start point with
    /// angles kept inside the +-360 degree range TikZ accepts.
    fn arc_operation(&self, arc: PendingArc) -> String {
        let r = self.scaled(arc.radius);
        let (mut start, mut end) = (f64::from(arc.start), f64::from(arc.end));
        if end - start >= TAU - 1e-6 {
            return format!(
                "{} circle ({})",
                self.coord(arc.center, 3),
                format_fixed(r, 3)
            );
        }

        if end < start {
            end += TAU;
        }
        if start.min(end) < -TAU {
            start += TAU;
            end += TAU;
        } else if start.max(end) > TAU {
            start -= TAU;
            end -= TAU;
        }
        // y-up flips the sweep direction.
        let (start, end) = (-start, -end);
        let cx = self.scaled(arc.center.x);
        let cy = -self.scaled(arc.center.y);
        format!(
            "({},{}) arc ({}:{}:{})",
            format_fixed(cx + r * start.cos(), 3),
            format_fixed(cy + r * start.sin(), 3),
            format_fixed(degrees(start), 5),
            format_fixed(degrees(end), 5),
            format_fixed(r, 3)
        )
    }

    fn emit_path(&mut self, command: &str) {
        let mut lines = String::new();
        for subpath in self.path.subpaths().filter(|s| s.len() >= 2) {
            let _ = write!(lines, "\\{command} [{}]", self.color);
            for (i, p) in subpath.iter().enumerate() {
                let sep = if i > 0 { " --" } else { "" };
                let _ = write!(lines, "{sep} {}", self.coord(*p, 3));
            }
            lines.push_str(";\n");
        }
        for arc in &self.arcs {
            let operation = self.arc_operation(*arc);
            let _ = writeln!(lines, "\\{command} [{}] {operation};", self.color);
        }
        self.body.push_str(&lines);
    }
}

impl RenderSurface for TikzSurface<'_> {
    fn begin_path(&mut self) {
        self.path.clear();
        self.arcs.clear();
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
    }

    fn line_to(&mut self, p: Point) {
        self.path.line_to(p);
    }

    fn arc(&mut self, center: Point, radius: f32, start_angle: f32, end_angle: f32) {
        self.arcs.push(PendingArc {
            center,
            radius,
            start: start_angle,
            end: end_angle,
        });
    }

    fn stroke(&mut self) {
        self.emit_path("draw");
    }

    fn fill(&mut self) {
        self.emit_path("fill");
    }

    fn measure_text(&self, text: &str) -> f32 {
        self.measure.text_width(text)
    }

    fn draw_label(&mut self, raw: &str, at: Point, angle: Option<f32>, _selected: bool) {
        let text = apply_subscripts(raw, SubscriptStyle::Markup);
        if text.trim().is_empty() {
            return;
        }

        // Anchor the node on the side of the line the label sits on, and move
        // the coordinate back to the edge of the text nearest the line.
        let mut at = at;
        let mut side = "";
        if let Some(angle) = angle {
            let width = self
                .measure
                .text_width(&apply_subscripts(raw, SubscriptStyle::Unicode));
            let (sin, cos) = angle.sin_cos();
            let normal = Point::new(sin, -cos);
            if cos.abs() >= sin.abs() {
                if normal.y < 0.0 {
                    side = "[above] ";
                    at.y += TIKZ_LABEL_NUDGE;
                } else {
                    side = "[below] ";
                    at.y -= TIKZ_LABEL_NUDGE;
                }
            } else if normal.x > 0.0 {
                side = "[right] ";
                at.x -= width / 2.0;
            } else {
                side = "[left] ";
                at.x += width / 2.0;
            }
        }

        let _ = writeln!(
            self.body,
            "\\draw {} node {side}{{${}$}};",
            self.coord(at, 2),
            text.replace(' ', "\\mbox{ }")
        );
    }

    fn set_highlight(&mut self, highlight: bool) {
        self.color = if highlight { "blue" } else { "black" };
    }
}
