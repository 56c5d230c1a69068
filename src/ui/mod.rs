//! The eframe application shell around the editor.
//!
//! # Module Organization
//!
//! - `state` - [`GraphEditorApp`] and settings persistence
//! - `canvas` - egui input to editor events, and the per-frame redraw
//! - `export` - TikZ and PNG export actions

mod canvas;
mod export;
mod state;

#[cfg(test)]
mod tests;

pub use state::GraphEditorApp;

use crate::settings::ModifierKey;
use eframe::egui;

impl eframe::App for GraphEditorApp {
    /// Persists the settings; the drawing itself is never saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.editor.settings.to_json() {
            Ok(json) => storage.set_string(state::SETTINGS_KEY, json),
            Err(err) => log::error!("failed to serialize settings: {err}"),
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = if self.editor.settings.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        self.draw_tikz_window(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });
    }
}

fn modifier_name(key: ModifierKey) -> &'static str {
    match key {
        ModifierKey::Shift => "Shift",
        ModifierKey::Alt => "Alt",
        ModifierKey::Control => "Ctrl",
    }
}

impl GraphEditorApp {
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            #[cfg(not(target_arch = "wasm32"))]
            {
                if ui.button("Export PNG").clicked() {
                    self.export_png();
                }
            }
            if ui.button("Export TikZ").clicked() {
                self.export_tikz(ui.ctx());
            }

            ui.separator();

            if ui.button("Clear").clicked() {
                self.editor.clear();
            }
            ui.checkbox(&mut self.editor.settings.dark_mode, "Dark mode");

            ui.separator();

            let settings = &self.editor.settings;
            ui.weak(format!(
                "Double-click: add vertex. {}-drag: edge. {}-drag: arrow. Type to label, x_1_ for subscripts.",
                modifier_name(settings.undirected_modifier),
                modifier_name(settings.directed_modifier),
            ));

            if let Some(status) = &self.status {
                ui.separator();
                ui.colored_label(ui.visuals().error_fg_color, status);
            }
        });
    }

    fn draw_tikz_window(&mut self, ctx: &egui::Context) {
        let Some(markup) = self.tikz_output.as_mut() else {
            return;
        };
        let mut open = true;
        let mut save = false;
        egui::Window::new("TikZ export")
            .open(&mut open)
            .default_size(egui::vec2(480.0, 360.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Copy").clicked() {
                        ui.ctx().copy_text(markup.clone());
                    }
                    save = ui.button("Save…").clicked();
                });
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(markup)
                            .code_editor()
                            .desired_width(f32::INFINITY),
                    );
                });
            });
        if save {
            self.save_tikz();
        }
        if !open {
            self.tikz_output = None;
        }
    }
}
