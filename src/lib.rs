//! # Graph Sketch
//!
//! An interactive editor for drawing small graphs: circular labeled vertices
//! joined by undirected or directed edges.
//!
//! ## Features
//! - Double-click to add a vertex, drag to move it (aligned with its neighbors)
//! - Modifier-drag between vertices to connect them
//! - Type to label the selection; `x_12_` renders as a subscript
//! - Export the drawing as PNG or as a TikZ snippet for LaTeX
//!
//! The editing core ([`Editor`], [`Scene`]) has no dependency on the window
//! toolkit and draws through the [`RenderSurface`] trait.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod constants;
mod editor;
mod error;
mod geometry;
mod label;
mod scene;
mod settings;
mod surface;
mod types;
mod ui;

pub use editor::{Editor, Gesture, InputEvent, Key, ModifierState};
pub use error::ExportError;
pub use geometry::{Point, SegmentOffset};
pub use label::{apply_subscripts, SubscriptStyle};
pub use scene::Scene;
pub use settings::{EditorSettings, ModifierKey};
pub use surface::{
    format_fixed, ApproxTextMeasure, EguiTextMeasure, PainterSurface, PathRecorder,
    RenderSurface, TextMeasure, TikzSurface,
};
#[cfg(not(target_arch = "wasm32"))]
pub use surface::{FontdbTextMeasure, PixmapSurface};
pub use types::*;
pub use ui::GraphEditorApp;

/// Runs the editor window, restoring persisted settings.
///
/// # Example
///
/// ```no_run
/// fn main() -> Result<(), eframe::Error> {
///     graph_sketch::run_app()
/// }
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Graph Sketch",
        options,
        Box::new(|cc| Ok(Box::new(GraphEditorApp::from_storage(cc.storage)))),
    )
}
