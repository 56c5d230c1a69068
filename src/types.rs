//! Scene entities: vertices, edges and the transient edge of a connect gesture.
//!
//! Entities own their geometry and know how to draw and hit-test themselves.
//! Edges refer to their endpoints by id only; the [`Scene`](crate::Scene) is
//! the sole owner of every vertex.

use crate::constants::{ARROW_HALF_WIDTH, ARROW_LENGTH, EDGE_LABEL_OFFSET, LABEL_PADDING};
use crate::geometry::{self, nearest_point_on_circle, point_to_segment_offset, Point};
use crate::label::{apply_subscripts, SubscriptStyle};
use crate::surface::{RenderSurface, TextMeasure};
use std::f32::consts::TAU;
use uuid::Uuid;

/// Unique identifier for vertices.
pub type VertexId = Uuid;

/// Unique identifier for edges.
pub type EdgeId = Uuid;

/// A reference to a persisted scene entity: the target of selection, deletion and label edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// A vertex
    Vertex(VertexId),
    /// An edge of either kind
    Edge(EdgeId),
}

/// Whether an edge carries an arrowhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Plain line
    Undirected,
    /// Line with an arrowhead at the `to` end
    Directed,
}

/// A labeled circle on the canvas.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Unique identifier for this vertex
    pub id: VertexId,
    /// Center of the circle
    pub position: Point,
    /// Smallest radius the circle may have
    pub base_radius: f32,
    /// Effective radius as of the last interactive redraw; used for hit-testing
    pub radius: f32,
    /// Raw label text, possibly containing subscript markers
    pub label: String,
    /// Offset from the pointer to the center while a move gesture is active
    drag_offset: Point,
}

impl Vertex {
    /// Creates an unlabeled vertex centered on `position`.
    pub fn new(position: Point, base_radius: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            base_radius,
            radius: base_radius,
            label: String::new(),
            drag_offset: Point::ZERO,
        }
    }

    /// The label as it appears on screen.
    pub fn display_label(&self) -> String {
        apply_subscripts(&self.label, SubscriptStyle::Unicode)
    }

    /// Radius needed to fit a label of the given display width.
    pub fn effective_radius(&self, label_width: f32) -> f32 {
        self.base_radius.max(label_width / 2.0 + LABEL_PADDING)
    }

    /// Recomputes the cached radius from the current label.
    pub fn fit_label<M: TextMeasure + ?Sized>(&mut self, measure: &M) {
        self.radius = self.effective_radius(measure.text_width(&self.display_label()));
    }

    /// Radius this vertex takes when drawn on `surface`.
    pub fn radius_on(&self, surface: &dyn RenderSurface) -> f32 {
        self.effective_radius(surface.measure_text(&self.display_label()))
    }

    /// Strokes the circle and draws the label centered inside it.
    pub fn draw(&self, surface: &mut dyn RenderSurface, selected: bool) {
        let radius = self.radius_on(surface);
        surface.set_highlight(selected);
        surface.begin_path();
        surface.arc(self.position, radius, 0.0, TAU);
        surface.stroke();
        surface.draw_label(&self.label, self.position, None, selected);
        surface.set_highlight(false);
    }

    /// Whether `p` lies inside the circle.
    pub fn hit_test(&self, p: Point) -> bool {
        self.position.distance_sq(p) <= self.radius * self.radius
    }

    /// Starts a move gesture grabbed at `p`.
    pub fn begin_drag(&mut self, p: Point) {
        self.drag_offset = self.position - p;
    }

    /// Moves the vertex so the grabbed point follows `p`.
    pub fn update_drag(&mut self, p: Point) {
        self.position = p + self.drag_offset;
    }
}

/// A connection between two distinct vertices.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,
    /// First endpoint (tail of a directed edge)
    pub from: VertexId,
    /// Second endpoint (head of a directed edge)
    pub to: VertexId,
    /// Directed or undirected
    pub kind: EdgeKind,
    /// Raw label text, possibly containing subscript markers
    pub label: String,
}

impl Edge {
    /// Creates an unlabeled edge.
    pub fn new(from: VertexId, to: VertexId, kind: EdgeKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            from,
            to,
            kind,
            label: String::new(),
        }
    }

    /// Whether the edge joins `a` and `b`, in either order.
    pub fn joins(&self, a: VertexId, b: VertexId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// Whether `v` is one of the endpoints.
    pub fn touches(&self, v: VertexId) -> bool {
        self.from == v || self.to == v
    }

    /// Draws the edge between the circle outlines of its endpoints.
    pub fn draw(
        &self,
        from: &Vertex,
        to: &Vertex,
        surface: &mut dyn RenderSurface,
        selected: bool,
    ) {
        let (start, end) = anchors(from, to, surface);
        surface.set_highlight(selected);
        draw_connector(surface, start, end, self.kind);
        surface.set_highlight(false);

        let angle = geometry::upright_angle(start.angle_to(end));
        let normal = Point::new(angle.sin(), -angle.cos());
        let at = start.midpoint(end) + normal * EDGE_LABEL_OFFSET;
        surface.draw_label(&self.label, at, Some(angle), selected);
    }

    /// Whether `p` lies on the segment between the endpoint centers.
    pub fn hit_test(from: &Vertex, to: &Vertex, p: Point, margin: f32) -> bool {
        point_to_segment_offset(from.position, to.position, p).is_on_segment(margin)
    }
}

/// Where the loose end of a connect gesture currently points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingTarget {
    /// Following the pointer over empty space
    Mouse(Point),
    /// Resting on a destination vertex
    Vertex(VertexId),
}

/// The not-yet-committed edge of a connect gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingEdge {
    /// Vertex the gesture started on
    pub from: VertexId,
    /// Kind fixed when the gesture started
    pub kind: EdgeKind,
    /// Current loose end
    pub target: PendingTarget,
}

impl PendingEdge {
    /// A pending edge following the pointer.
    pub fn following(from: VertexId, kind: EdgeKind, mouse: Point) -> Self {
        Self {
            from,
            kind,
            target: PendingTarget::Mouse(mouse),
        }
    }

    /// Destination vertex, once one has been acquired.
    pub fn destination(&self) -> Option<VertexId> {
        match self.target {
            PendingTarget::Vertex(id) => Some(id),
            PendingTarget::Mouse(_) => None,
        }
    }

    /// Draws toward the pointer, or exactly like the edge it would commit to.
    pub fn draw(&self, from: &Vertex, to: Option<&Vertex>, surface: &mut dyn RenderSurface) {
        let (start, end) = match (self.target, to) {
            (PendingTarget::Vertex(_), Some(to)) => anchors(from, to, surface),
            (PendingTarget::Mouse(mouse), _) => {
                let radius = from.radius_on(surface);
                (nearest_point_on_circle(from.position, radius, mouse), mouse)
            }
            (PendingTarget::Vertex(_), None) => return,
        };
        draw_connector(surface, start, end, self.kind);
    }
}

/// Boundary points where a line between two vertices meets their circles.
fn anchors(from: &Vertex, to: &Vertex, surface: &dyn RenderSurface) -> (Point, Point) {
    let start = nearest_point_on_circle(from.position, from.radius_on(surface), to.position);
    let end = nearest_point_on_circle(to.position, to.radius_on(surface), from.position);
    (start, end)
}

fn draw_connector(surface: &mut dyn RenderSurface, start: Point, end: Point, kind: EdgeKind) {
    surface.begin_path();
    surface.move_to(start);
    surface.line_to(end);
    surface.stroke();
    if kind == EdgeKind::Directed {
        draw_arrow(surface, end, start.angle_to(end));
    }
}

/// Filled triangle with its tip at `tip`, pointing along `angle`.
fn draw_arrow(surface: &mut dyn RenderSurface, tip: Point, angle: f32) {
    let (dy, dx) = angle.sin_cos();
    surface.begin_path();
    surface.move_to(tip);
    surface.line_to(Point::new(
        tip.x - ARROW_LENGTH * dx + ARROW_HALF_WIDTH * dy,
        tip.y - ARROW_LENGTH * dy - ARROW_HALF_WIDTH * dx,
    ));
    surface.line_to(Point::new(
        tip.x - ARROW_LENGTH * dx - ARROW_HALF_WIDTH * dy,
        tip.y - ARROW_LENGTH * dy + ARROW_HALF_WIDTH * dx,
    ));
    surface.fill();
}
