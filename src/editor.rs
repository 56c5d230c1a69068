//! The interaction controller.
//!
//! [`Editor`] owns the scene plus every piece of interaction state (selection,
//! active gesture, held modifiers) and turns portable [`InputEvent`]s into
//! scene mutations. It knows nothing about the windowing toolkit, so the
//! whole state machine can be driven directly from tests.

use crate::geometry::Point;
use crate::scene::Scene;
use crate::settings::{EditorSettings, ModifierKey};
use crate::surface::{RenderSurface, TextMeasure, TikzSurface};
use crate::types::*;

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Shift modifier
    Shift,
    /// Alt / Option modifier
    Alt,
    /// Control modifier
    Control,
    /// Removes the selection
    Delete,
    /// Trims the last label character
    Backspace,
}

/// A pointer or keyboard event in canvas-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed
    PointerDown(Point),
    /// Pointer moved (with or without a button held)
    PointerMove(Point),
    /// Primary button released
    PointerUp(Point),
    /// Primary button double clicked
    DoubleClick(Point),
    /// Key pressed
    KeyDown(Key),
    /// Key released
    KeyUp(Key),
    /// Printable text typed
    Text(String),
}

/// Raw held/released state of the modifier keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    /// Shift is held
    pub shift: bool,
    /// Alt is held
    pub alt: bool,
    /// Control is held
    pub control: bool,
}

impl ModifierState {
    /// Whether `key` is currently held.
    pub fn is_held(&self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::Shift => self.shift,
            ModifierKey::Alt => self.alt,
            ModifierKey::Control => self.control,
        }
    }

    /// Records a modifier press or release; other keys are ignored.
    fn set(&mut self, key: Key, down: bool) {
        match key {
            Key::Shift => self.shift = down,
            Key::Alt => self.alt = down,
            Key::Control => self.control = down,
            Key::Delete | Key::Backspace => {}
        }
    }
}

/// The pointer gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// Nothing in progress
    #[default]
    Idle,
    /// Moving a vertex
    Dragging {
        /// The vertex being moved
        vertex: VertexId,
    },
    /// Drawing an edge out of a vertex
    Connecting {
        /// The candidate edge
        pending: PendingEdge,
    },
}

/// Editor state: the scene and everything needed to interpret input against it.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    /// The drawing
    pub scene: Scene,
    /// Currently selected entity, the target of typing and deletion
    pub selection: Option<EntityRef>,
    /// Editor configuration
    pub settings: EditorSettings,
    gesture: Gesture,
    modifiers: ModifierState,
}

impl Editor {
    /// Creates an empty editor with the given settings.
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// The gesture in progress.
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Which modifiers are currently held.
    pub fn modifiers(&self) -> ModifierState {
        self.modifiers
    }

    /// The candidate edge of an active connect gesture.
    pub fn pending_edge(&self) -> Option<&PendingEdge> {
        match &self.gesture {
            Gesture::Connecting { pending } => Some(pending),
            _ => None,
        }
    }

    /// Feeds one input event through the state machine.
    ///
    /// Returns whether anything visible changed and a redraw is due.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerDown(p) => self.pointer_down(p),
            InputEvent::PointerMove(p) => self.pointer_move(p),
            InputEvent::PointerUp(p) => self.pointer_up(p),
            InputEvent::DoubleClick(p) => self.double_click(p),
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => {
                self.modifiers.set(key, false);
                false
            }
            InputEvent::Text(text) => self.type_text(&text),
        }
    }

    /// Removes everything and returns to the idle state.
    pub fn clear(&mut self) {
        self.scene = Scene::new();
        self.selection = None;
        self.gesture = Gesture::Idle;
    }

    fn connect_kind(&self) -> Option<EdgeKind> {
        if self.modifiers.is_held(self.settings.directed_modifier) {
            Some(EdgeKind::Directed)
        } else if self.modifiers.is_held(self.settings.undirected_modifier) {
            Some(EdgeKind::Undirected)
        } else {
            None
        }
    }

    fn pointer_down(&mut self, p: Point) -> bool {
        if matches!(self.gesture, Gesture::Connecting { .. }) {
            return false;
        }
        let hit = self.scene.hit_test(p, self.settings.edge_margin);
        self.selection = hit;
        self.gesture = Gesture::Idle;

        if let Some(EntityRef::Vertex(id)) = hit {
            if let Some(kind) = self.connect_kind() {
                self.gesture = Gesture::Connecting {
                    pending: PendingEdge::following(id, kind, p),
                };
            } else if let Some(vertex) = self.scene.vertex_mut(id) {
                vertex.begin_drag(p);
                self.gesture = Gesture::Dragging { vertex: id };
            }
        }
        true
    }

    fn pointer_move(&mut self, p: Point) -> bool {
        match self.gesture {
            Gesture::Idle => false,
            Gesture::Dragging { vertex } => {
                if let Some(v) = self.scene.vertex_mut(vertex) {
                    v.update_drag(p);
                }
                self.snap(vertex);
                true
            }
            Gesture::Connecting { pending } => {
                self.gesture = Gesture::Connecting {
                    pending: self.retarget(pending, p),
                };
                true
            }
        }
    }

    fn pointer_up(&mut self, p: Point) -> bool {
        let gesture = std::mem::take(&mut self.gesture);
        match gesture {
            Gesture::Idle => false,
            Gesture::Dragging { .. } => true,
            Gesture::Connecting { pending } => {
                let pending = self.retarget(pending, p);
                if let Some(to) = pending.destination() {
                    if let Some(edge) = self.scene.add_edge(pending.from, to, pending.kind) {
                        self.selection = Some(EntityRef::Edge(edge));
                    }
                }
                true
            }
        }
    }

    fn double_click(&mut self, p: Point) -> bool {
        if self.gesture != Gesture::Idle {
            return false;
        }
        match self.scene.hit_test(p, self.settings.edge_margin) {
            Some(hit) => self.selection = Some(hit),
            None => {
                let id = self
                    .scene
                    .add_vertex(Vertex::new(p, self.settings.vertex_radius));
                self.selection = Some(EntityRef::Vertex(id));
            }
        }
        true
    }

    fn key_down(&mut self, key: Key) -> bool {
        match key {
            Key::Shift | Key::Alt | Key::Control => {
                self.modifiers.set(key, true);
                false
            }
            Key::Delete => match self.selection.take() {
                Some(target) => {
                    self.scene.remove(target);
                    self.gesture = Gesture::Idle;
                    true
                }
                None => false,
            },
            Key::Backspace => self
                .selected_label_mut()
                .map(|label| label.pop().is_some())
                .unwrap_or(false),
        }
    }

    fn type_text(&mut self, text: &str) -> bool {
        let printable: String = text.chars().filter(|c| !c.is_control()).collect();
        if printable.is_empty() {
            return false;
        }
        match self.selected_label_mut() {
            Some(label) => {
                label.push_str(&printable);
                true
            }
            None => false,
        }
    }

    fn selected_label_mut(&mut self) -> Option<&mut String> {
        let target = self.selection?;
        self.scene.label_mut(target)
    }

    /// Points the pending edge at the vertex under `p`, or at `p` itself.
    fn retarget(&self, pending: PendingEdge, p: Point) -> PendingEdge {
        let target = match self.scene.vertex_at(p) {
            Some(id) if id != pending.from => PendingTarget::Vertex(id),
            _ => PendingTarget::Mouse(p),
        };
        PendingEdge { target, ..pending }
    }

    /// Aligns a vertex with any other vertex that is nearly level with it, per axis.
    fn snap(&mut self, id: VertexId) {
        let tolerance = self.settings.snap_tolerance;
        let Some(position) = self.scene.vertex(id).map(|v| v.position) else {
            return;
        };
        let mut snapped = position;
        for other in self.scene.vertices.iter().filter(|v| v.id != id) {
            if (other.position.x - position.x).abs() < tolerance {
                snapped.x = other.position.x;
            }
            if (other.position.y - position.y).abs() < tolerance {
                snapped.y = other.position.y;
            }
        }
        if let Some(v) = self.scene.vertex_mut(id) {
            v.position = snapped;
        }
    }

    /// Full interactive redraw: refreshes radii from `surface`, then draws
    /// the scene with the selection highlighted and any pending edge.
    pub fn redraw(&mut self, surface: &mut dyn RenderSurface) {
        self.scene.fit_labels(&*surface);
        let pending = self.pending_edge().copied();
        self.scene.draw(surface, self.selection, pending.as_ref());
    }

    /// Renders the scene as a TikZ snippet, without selection or pending edge.
    pub fn export_markup(&self, measure: &dyn TextMeasure) -> String {
        let mut surface = TikzSurface::new(measure, self.settings.tikz_scale);
        self.scene.draw(&mut surface, None, None);
        log::info!(
            "exported {} vertices and {} edges as TikZ",
            self.scene.vertices.len(),
            self.scene.edges.len()
        );
        surface.finish()
    }

    /// Renders the scene to PNG bytes, without selection or pending edge.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn export_image(
        &self,
        width: u32,
        height: u32,
        fonts: std::sync::Arc<fontdb::Database>,
    ) -> Result<Vec<u8>, crate::error::ExportError> {
        let mut surface = crate::surface::PixmapSurface::new(
            width,
            height,
            self.settings.png_scale,
            self.settings.font_size,
            fonts,
        )?;
        self.scene.draw(&mut surface, None, None);
        let png = surface.finish()?;
        log::info!("exported {width}x{height} PNG ({} bytes)", png.len());
        Ok(png)
    }
}
