//! Application state.

use crate::editor::{Editor, ModifierState};
use crate::geometry::Point;
use crate::settings::EditorSettings;
use eframe::egui;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::Arc;

/// Storage key under which the settings are persisted.
pub const SETTINGS_KEY: &str = "editor_settings";

/// The eframe application: the editor plus shell-only state.
pub struct GraphEditorApp {
    /// Scene, selection and interaction state
    pub editor: Editor,
    /// Markup of the last TikZ export; the output window is open while `Some`
    pub tikz_output: Option<String>,
    /// Screen rectangle of the canvas as of the last frame
    pub canvas_rect: egui::Rect,
    /// Last export failure, shown in the toolbar until the next export
    pub status: Option<String>,
    /// Modifier state last forwarded to the editor
    pub(super) forwarded_modifiers: ModifierState,
    /// Canvas position of the last pointer event forwarded to the editor
    pub(super) last_pointer: Point,
    #[cfg(not(target_arch = "wasm32"))]
    fonts: Option<Arc<fontdb::Database>>,
}

impl Default for GraphEditorApp {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl GraphEditorApp {
    /// Creates an app with an empty canvas.
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            editor: Editor::new(settings),
            tikz_output: None,
            canvas_rect: egui::Rect::NOTHING,
            status: None,
            forwarded_modifiers: ModifierState::default(),
            last_pointer: Point::ZERO,
            #[cfg(not(target_arch = "wasm32"))]
            fonts: None,
        }
    }

    /// Restores persisted settings, falling back to defaults.
    pub fn from_storage(storage: Option<&dyn eframe::Storage>) -> Self {
        let settings = storage
            .and_then(|s| s.get_string(SETTINGS_KEY))
            .and_then(|json| match EditorSettings::from_json(&json) {
                Ok(settings) => Some(settings),
                Err(err) => {
                    log::warn!("ignoring unreadable settings: {err}");
                    None
                }
            })
            .unwrap_or_default();
        Self::new(settings)
    }

    /// System fonts for raster export, loaded on first use.
    #[cfg(not(target_arch = "wasm32"))]
    pub(super) fn fonts(&mut self) -> Arc<fontdb::Database> {
        self.fonts
            .get_or_insert_with(crate::surface::FontdbTextMeasure::system_fonts)
            .clone()
    }
}
