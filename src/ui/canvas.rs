//! The drawing canvas: translates egui input into editor events and paints
//! the scene every frame.

use super::state::GraphEditorApp;
use crate::editor::{InputEvent, Key, ModifierState};
use crate::geometry::Point;
use crate::surface::PainterSurface;
use eframe::egui;

impl GraphEditorApp {
    /// Allocates the canvas, feeds this frame's input to the editor and redraws.
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        self.canvas_rect = response.rect;

        for event in self.collect_input(ui) {
            self.editor.handle(event);
        }

        let settings = &self.editor.settings;
        let mut surface = PainterSurface::new(
            &painter,
            response.rect.min,
            settings.font_size,
            settings.dark_mode,
        );
        self.editor.redraw(&mut surface);
    }

    fn to_canvas(&self, pos: egui::Pos2) -> Point {
        let local = pos - self.canvas_rect.min;
        Point::new(local.x, local.y)
    }

    /// Whether a press at `pos` belongs to the canvas rather than a window above it.
    fn accepts_press(&self, ui: &egui::Ui, pos: egui::Pos2) -> bool {
        self.canvas_rect.contains(pos)
            && ui
                .ctx()
                .layer_id_at(pos)
                .map_or(true, |layer| layer == ui.layer_id())
    }

    fn collect_input(&mut self, ui: &egui::Ui) -> Vec<InputEvent> {
        let mut out = Vec::new();

        // Modifier edges first, so a press in the same frame sees them.
        let held = ui.input(|i| ModifierState {
            shift: i.modifiers.shift,
            alt: i.modifiers.alt,
            control: i.modifiers.ctrl,
        });
        let previous = self.forwarded_modifiers;
        for (key, was, now) in [
            (Key::Shift, previous.shift, held.shift),
            (Key::Alt, previous.alt, held.alt),
            (Key::Control, previous.control, held.control),
        ] {
            match (was, now) {
                (false, true) => out.push(InputEvent::KeyDown(key)),
                (true, false) => out.push(InputEvent::KeyUp(key)),
                _ => {}
            }
        }
        self.forwarded_modifiers = held;

        let keyboard_free = !ui.ctx().wants_keyboard_input();
        let (events, double_click) = ui.input(|i| {
            let double = i
                .pointer
                .button_double_clicked(egui::PointerButton::Primary)
                .then(|| i.pointer.interact_pos())
                .flatten();
            (i.events.clone(), double)
        });

        for event in events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    self.last_pointer = self.to_canvas(pos);
                    out.push(InputEvent::PointerMove(self.last_pointer));
                }
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    let at = self.to_canvas(pos);
                    if !pressed {
                        self.last_pointer = at;
                        out.push(InputEvent::PointerUp(at));
                    } else if self.accepts_press(ui, pos) {
                        self.last_pointer = at;
                        out.push(InputEvent::PointerDown(at));
                    }
                }
                // Leaving the window ends any gesture at the last known position.
                egui::Event::PointerGone => out.push(InputEvent::PointerUp(self.last_pointer)),
                egui::Event::Key {
                    key: egui::Key::Delete,
                    pressed: true,
                    ..
                } if keyboard_free => out.push(InputEvent::KeyDown(Key::Delete)),
                egui::Event::Key {
                    key: egui::Key::Backspace,
                    pressed: true,
                    ..
                } if keyboard_free => out.push(InputEvent::KeyDown(Key::Backspace)),
                egui::Event::Text(text) if keyboard_free => out.push(InputEvent::Text(text)),
                _ => {}
            }
        }

        if let Some(pos) = double_click {
            if self.accepts_press(ui, pos) {
                out.push(InputEvent::DoubleClick(self.to_canvas(pos)));
            }
        }
        out
    }
}
