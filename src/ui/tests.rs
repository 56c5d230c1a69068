use super::*;
use crate::editor::Gesture;
use crate::geometry::Point;
use crate::settings::EditorSettings;
use crate::types::{EdgeKind, EntityRef, Vertex};
use eframe::egui;
use eframe::App as _;
use std::collections::HashMap;

/// Run one headless frame of the canvas with the given modifiers and events.
fn frame(
    ctx: &egui::Context,
    app: &mut GraphEditorApp,
    modifiers: egui::Modifiers,
    events: Vec<egui::Event>,
) -> egui::FullOutput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));
    raw.modifiers = modifiers;
    raw.events = events;
    ctx.run(raw, |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| app.draw_canvas(ui));
    })
}

/// Lays the canvas out once and returns its screen origin.
fn settle(ctx: &egui::Context, app: &mut GraphEditorApp) -> egui::Vec2 {
    let _ = frame(ctx, app, egui::Modifiers::NONE, vec![]);
    app.canvas_rect.min.to_vec2()
}

fn button(pos: egui::Pos2, pressed: bool) -> egui::Event {
    egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed,
        modifiers: egui::Modifiers::NONE,
    }
}

fn key(key: egui::Key) -> egui::Event {
    egui::Event::Key {
        key,
        physical_key: Some(key),
        pressed: true,
        repeat: false,
        modifiers: egui::Modifiers::NONE,
    }
}

fn click(ctx: &egui::Context, app: &mut GraphEditorApp, pos: egui::Pos2) {
    let _ = frame(
        ctx,
        app,
        egui::Modifiers::NONE,
        vec![egui::Event::PointerMoved(pos), button(pos, true)],
    );
    let _ = frame(ctx, app, egui::Modifiers::NONE, vec![button(pos, false)]);
}

fn drag(
    ctx: &egui::Context,
    app: &mut GraphEditorApp,
    modifiers: egui::Modifiers,
    from: egui::Pos2,
    to: egui::Pos2,
) {
    let _ = frame(
        ctx,
        app,
        modifiers,
        vec![egui::Event::PointerMoved(from), button(from, true)],
    );
    let _ = frame(ctx, app, modifiers, vec![egui::Event::PointerMoved(to)]);
    let _ = frame(ctx, app, modifiers, vec![button(to, false)]);
    let _ = frame(ctx, app, egui::Modifiers::NONE, vec![]);
}

fn add_vertex(app: &mut GraphEditorApp, x: f32, y: f32) -> crate::types::VertexId {
    let radius = app.editor.settings.vertex_radius;
    app.editor
        .scene
        .add_vertex(Vertex::new(Point::new(x, y), radius))
}

#[derive(Default)]
struct MemoryStorage(HashMap<String, String>);

impl eframe::Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.0.insert(key.to_string(), value);
    }

    fn flush(&mut self) {}
}

#[test]
fn double_click_on_empty_canvas_creates_vertex_in_canvas_coordinates() {
    let ctx = egui::Context::default();
    let mut app = GraphEditorApp::default();
    let origin = settle(&ctx, &mut app);
    let pos = egui::pos2(100.0, 120.0) + origin;

    click(&ctx, &mut app, pos);
    assert!(app.editor.scene.is_empty(), "a single click creates nothing");
    click(&ctx, &mut app, pos);

    assert_eq!(app.editor.scene.vertices.len(), 1);
    let vertex = &app.editor.scene.vertices[0];
    assert_eq!(vertex.position, Point::new(100.0, 120.0));
    assert_eq!(app.editor.selection, Some(EntityRef::Vertex(vertex.id)));
}

#[test]
fn shift_drag_between_vertices_creates_undirected_edge() {
    let ctx = egui::Context::default();
    let mut app = GraphEditorApp::default();
    let a = add_vertex(&mut app, 100.0, 100.0);
    let b = add_vertex(&mut app, 300.0, 100.0);
    let origin = settle(&ctx, &mut app);

    drag(
        &ctx,
        &mut app,
        egui::Modifiers::SHIFT,
        egui::pos2(100.0, 100.0) + origin,
        egui::pos2(300.0, 100.0) + origin,
    );

    let edges = &app.editor.scene.edges;
    assert_eq!(edges.len(), 1);
    assert_eq!((edges[0].from, edges[0].to, edges[0].kind), (a, b, EdgeKind::Undirected));
    assert_eq!(app.editor.selection, Some(EntityRef::Edge(edges[0].id)));
    assert!(!app.editor.modifiers().shift, "release is forwarded");
}

#[test]
fn alt_drag_creates_directed_edge() {
    let ctx = egui::Context::default();
    let mut app = GraphEditorApp::default();
    add_vertex(&mut app, 100.0, 100.0);
    add_vertex(&mut app, 100.0, 300.0);
    let origin = settle(&ctx, &mut app);

    drag(
        &ctx,
        &mut app,
        egui::Modifiers::ALT,
        egui::pos2(100.0, 100.0) + origin,
        egui::pos2(100.0, 300.0) + origin,
    );

    assert_eq!(app.editor.scene.edges.len(), 1);
    assert_eq!(app.editor.scene.edges[0].kind, EdgeKind::Directed);
}

#[test]
fn plain_drag_moves_the_vertex() {
    let ctx = egui::Context::default();
    let mut app = GraphEditorApp::default();
    let v = add_vertex(&mut app, 100.0, 100.0);
    let origin = settle(&ctx, &mut app);

    drag(
        &ctx,
        &mut app,
        egui::Modifiers::NONE,
        egui::pos2(110.0, 100.0) + origin,
        egui::pos2(260.0, 300.0) + origin,
    );

    let vertex = app.editor.scene.vertex(v).expect("vertex");
    assert_eq!(vertex.position, Point::new(250.0, 300.0));
    assert!(app.editor.scene.edges.is_empty());
}

#[test]
fn pointer_leaving_the_window_ends_a_connect_gesture() {
    let ctx = egui::Context::default();
    let mut app = GraphEditorApp::default();
    add_vertex(&mut app, 100.0, 100.0);
    let b = add_vertex(&mut app, 300.0, 100.0);
    let origin = settle(&ctx, &mut app);
    let from = egui::pos2(100.0, 100.0) + origin;
    let away = egui::pos2(200.0, 400.0) + origin;

    let shift = egui::Modifiers::SHIFT;
    let press = vec![egui::Event::PointerMoved(from), button(from, true)];
    let _ = frame(&ctx, &mut app, shift, press);
    let _ = frame(&ctx, &mut app, shift, vec![egui::Event::PointerMoved(away)]);
    assert!(app.editor.pending_edge().is_some());

    let _ = frame(&ctx, &mut app, shift, vec![egui::Event::PointerGone]);
    assert_eq!(app.editor.gesture(), Gesture::Idle);
    assert!(app.editor.scene.edges.is_empty());

    click(&ctx, &mut app, egui::pos2(300.0, 100.0) + origin);
    assert_eq!(app.editor.selection, Some(EntityRef::Vertex(b)));
}

#[test]
fn typing_and_backspace_edit_the_selected_label() {
    let ctx = egui::Context::default();
    let mut app = GraphEditorApp::default();
    let v = add_vertex(&mut app, 200.0, 200.0);
    let origin = settle(&ctx, &mut app);
    click(&ctx, &mut app, egui::pos2(200.0, 200.0) + origin);
    assert_eq!(app.editor.selection, Some(EntityRef::Vertex(v)));

    let _ = frame(&ctx, &mut app, egui::Modifiers::NONE, vec![egui::Event::Text("q_1_".into())]);
    assert_eq!(app.editor.scene.vertex(v).expect("vertex").label, "q_1_");

    let _ = frame(&ctx, &mut app, egui::Modifiers::NONE, vec![key(egui::Key::Backspace)]);
    assert_eq!(app.editor.scene.vertex(v).expect("vertex").label, "q_1");
}

#[test]
fn delete_key_removes_selected_vertex() {
    let ctx = egui::Context::default();
    let mut app = GraphEditorApp::default();
    let v = add_vertex(&mut app, 200.0, 200.0);
    let origin = settle(&ctx, &mut app);
    click(&ctx, &mut app, egui::pos2(200.0, 200.0) + origin);

    let _ = frame(&ctx, &mut app, egui::Modifiers::NONE, vec![key(egui::Key::Delete)]);

    assert!(app.editor.scene.vertex(v).is_none());
    assert_eq!(app.editor.selection, None);
}

#[test]
fn drawing_a_scene_produces_shapes() {
    let ctx = egui::Context::default();
    let mut app = GraphEditorApp::default();
    let a = add_vertex(&mut app, 100.0, 100.0);
    let b = add_vertex(&mut app, 300.0, 100.0);
    app.editor.scene.add_edge(a, b, EdgeKind::Directed);
    app.editor.scene.vertices[0].label = "x_1_".into();

    let output = frame(&ctx, &mut app, egui::Modifiers::NONE, vec![]);
    assert!(!output.shapes.is_empty());
}

#[test]
fn export_tikz_fills_the_output_window() {
    let ctx = egui::Context::default();
    let mut app = GraphEditorApp::default();
    let v = add_vertex(&mut app, 100.0, 100.0);
    app.editor.scene.vertex_mut(v).expect("vertex").label = "v_1_".into();
    app.editor.selection = Some(EntityRef::Vertex(v));

    let _ = ctx.run(egui::RawInput::default(), |ctx| app.export_tikz(ctx));

    let markup = app.tikz_output.as_deref().expect("markup");
    assert!(markup.contains("\\begin{tikzpicture}"));
    assert!(markup.contains("{$v_{1}$}"));
    assert!(!markup.contains("blue"), "selection is not exported");
    assert_eq!(app.editor.selection, Some(EntityRef::Vertex(v)));
}

#[test]
fn settings_survive_a_save_and_restore() {
    let mut app = GraphEditorApp::default();
    app.editor.settings.dark_mode = true;
    app.editor.settings.snap_tolerance = 3.0;
    add_vertex(&mut app, 10.0, 10.0);

    let mut storage = MemoryStorage::default();
    app.save(&mut storage);
    let restored = GraphEditorApp::from_storage(Some(&storage as &dyn eframe::Storage));

    assert_eq!(restored.editor.settings, app.editor.settings);
    assert!(restored.editor.scene.is_empty(), "the drawing is not persisted");
}

#[test]
fn unreadable_settings_fall_back_to_defaults() {
    let mut storage = MemoryStorage::default();
    eframe::Storage::set_string(&mut storage, super::state::SETTINGS_KEY, "not json".into());
    let restored = GraphEditorApp::from_storage(Some(&storage as &dyn eframe::Storage));
    assert_eq!(restored.editor.settings, EditorSettings::default());
    assert_eq!(GraphEditorApp::from_storage(None).editor.settings, EditorSettings::default());
}
