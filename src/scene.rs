//! The scene store: ordered vertices and edges plus the full redraw pass.

use crate::geometry::Point;
use crate::surface::{RenderSurface, TextMeasure};
use crate::types::*;

/// All persisted entities of the drawing.
///
/// Insertion order is draw order, and also the order in which hit-tests are
/// tried. Vertices are always tested before edges.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Vertices in insertion order
    pub vertices: Vec<Vertex>,
    /// Edges in insertion order
    pub edges: Vec<Edge>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the scene has no vertices (and therefore no edges).
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its id.
    pub fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
        let id = vertex.id;
        log::debug!("vertex {id} added at ({}, {})", vertex.position.x, vertex.position.y);
        self.vertices.push(vertex);
        id
    }

    /// Adds an edge between two distinct existing vertices.
    ///
    /// Returns `None` without changing anything when the endpoints are equal,
    /// either endpoint is missing, or an edge of any kind already joins them.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, kind: EdgeKind) -> Option<EdgeId> {
        if from == to || self.vertex(from).is_none() || self.vertex(to).is_none() {
            return None;
        }
        if let Some(existing) = self.edge_between(from, to) {
            log::debug!("edge {from} -> {to} rejected, {} already joins them", existing.id);
            return None;
        }
        let edge = Edge::new(from, to, kind);
        let id = edge.id;
        log::debug!("edge {id} added ({kind:?}) {from} -> {to}");
        self.edges.push(edge);
        Some(id)
    }

    /// Removes a vertex together with every edge that touches it.
    ///
    /// Returns `false` if the vertex did not exist.
    pub fn remove_vertex(&mut self, id: VertexId) -> bool {
        let Some(index) = self.vertices.iter().position(|v| v.id == id) else {
            return false;
        };
        self.vertices.remove(index);
        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(id));
        log::debug!("vertex {id} removed with {} incident edges", before - self.edges.len());
        true
    }

    /// Removes a single edge. Returns `false` if it did not exist.
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        let Some(index) = self.edges.iter().position(|e| e.id == id) else {
            return false;
        };
        self.edges.remove(index);
        log::debug!("edge {id} removed");
        true
    }

    /// Removes whichever entity `entity` refers to.
    pub fn remove(&mut self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Vertex(id) => self.remove_vertex(id),
            EntityRef::Edge(id) => self.remove_edge(id),
        }
    }

    /// Looks up a vertex.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    /// Looks up a vertex for mutation.
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.iter_mut().find(|v| v.id == id)
    }

    /// Looks up an edge.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// The edge joining `a` and `b` in either direction, if any.
    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.joins(a, b))
    }

    /// Raw label of an entity.
    pub fn label(&self, entity: EntityRef) -> Option<&str> {
        match entity {
            EntityRef::Vertex(id) => self.vertex(id).map(|v| v.label.as_str()),
            EntityRef::Edge(id) => self.edge(id).map(|e| e.label.as_str()),
        }
    }

    /// Raw label of an entity, for editing.
    pub fn label_mut(&mut self, entity: EntityRef) -> Option<&mut String> {
        match entity {
            EntityRef::Vertex(id) => self.vertex_mut(id).map(|v| &mut v.label),
            EntityRef::Edge(id) => self.edges.iter_mut().find(|e| e.id == id).map(|e| &mut e.label),
        }
    }

    /// First vertex containing `p`, else first edge within `margin` of `p`.
    pub fn hit_test(&self, p: Point, margin: f32) -> Option<EntityRef> {
        if let Some(v) = self.vertex_at(p) {
            return Some(EntityRef::Vertex(v));
        }
        self.edges
            .iter()
            .find(|e| match (self.vertex(e.from), self.vertex(e.to)) {
                (Some(a), Some(b)) => Edge::hit_test(a, b, p, margin),
                _ => false,
            })
            .map(|e| EntityRef::Edge(e.id))
    }

    /// First vertex containing `p`.
    pub fn vertex_at(&self, p: Point) -> Option<VertexId> {
        self.vertices.iter().find(|v| v.hit_test(p)).map(|v| v.id)
    }

    /// Refreshes every vertex's cached radius from its label width.
    pub fn fit_labels<M: TextMeasure + ?Sized>(&mut self, measure: &M) {
        for v in &mut self.vertices {
            v.fit_label(measure);
        }
    }

    /// Draws the whole scene: edges, then the pending edge, then vertices on top.
    ///
    /// Only `highlight` is drawn as selected.
    pub fn draw(
        &self,
        surface: &mut dyn RenderSurface,
        highlight: Option<EntityRef>,
        pending: Option<&PendingEdge>,
    ) {
        for e in &self.edges {
            if let (Some(a), Some(b)) = (self.vertex(e.from), self.vertex(e.to)) {
                e.draw(a, b, surface, highlight == Some(EntityRef::Edge(e.id)));
            }
        }
        if let Some(p) = pending {
            if let Some(from) = self.vertex(p.from) {
                let to = p.destination().and_then(|id| self.vertex(id));
                p.draw(from, to, surface);
            }
        }
        for v in &self.vertices {
            v.draw(surface, highlight == Some(EntityRef::Vertex(v.id)));
        }
    }
}
