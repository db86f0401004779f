// tests/editor_tests.rs

use macroquad::math::{ivec2, vec2, Vec2};
use quadtile_editor::input::{InputEvent, KeyCode, Modifiers, MouseButton};
use quadtile_editor::{
    EditorConfig, EditorState, FileStore, MapError, MemoryStore, TileId, TilemapEditor,
};

fn editor() -> TilemapEditor<MemoryStore> {
    TilemapEditor::new(&EditorConfig::default(), MemoryStore::new()).unwrap()
}

fn click(ed: &mut TilemapEditor<MemoryStore>, button: MouseButton, at: Vec2) {
    ed.handle_event(&InputEvent::ButtonDown { button, position: at }).unwrap();
    ed.handle_event(&InputEvent::ButtonUp { button, position: at }).unwrap();
}

fn ctrl(ed: &mut TilemapEditor<MemoryStore>, key: KeyCode) {
    let modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::default()
    };
    ed.handle_event(&InputEvent::KeyDown { key, modifiers }).unwrap();
}

/// Screen point at the centre of a tile while the camera is at rest.
fn tile_center(x: i32, y: i32) -> Vec2 {
    vec2(x as f32 * 32.0 + 16.0, y as f32 * 32.0 + 16.0)
}

#[test]
fn paint_beyond_right_edge_grows_grid() {
    let mut ed = editor();
    assert_eq!((ed.grid().width(), ed.grid().height()), (10, 5));

    // Swatch 1 is the second slot of the tilebox's first row.
    click(&mut ed, MouseButton::Left, vec2(40.0, 5.0));
    assert_eq!(ed.selected(), TileId(1));

    click(&mut ed, MouseButton::Left, tile_center(12, 2));

    assert!(ed.grid().width() >= 13);
    assert_eq!(ed.grid().height(), 5);
    assert_eq!(ed.grid().get(12, 2).unwrap(), TileId(1));
    assert_eq!(ed.grid().get(0, 0).unwrap(), TileId(0));
    assert_eq!(ed.grid().get(11, 2).unwrap(), TileId(0));
}

#[test]
fn paint_above_left_shifts_origin_and_keeps_cells() {
    let mut ed = editor();
    ed.select_tile(TileId(2));
    ed.paint_at(tile_center(4, 4)).unwrap();
    ed.select_tile(TileId(1));
    let painted = ed.paint_at(vec2(-20.0, -40.0)).unwrap();

    assert_eq!(painted, ivec2(-1, -2));
    assert_eq!(ed.grid().origin_offset(), ivec2(1, 2));
    assert_eq!((ed.grid().width(), ed.grid().height()), (11, 7));
    assert_eq!(ed.grid().get(-1, -2).unwrap(), TileId(1));
    assert_eq!(ed.grid().get(4, 4).unwrap(), TileId(2));
}

#[test]
fn clicks_on_tilebox_do_not_paint() {
    let mut ed = editor();
    ed.select_tile(TileId(2));
    let before = ed.grid().clone();
    // Below the last swatch: consumed, but selects nothing.
    click(&mut ed, MouseButton::Left, vec2(10.0, 100.0));
    assert_eq!(ed.grid(), &before);
    assert_eq!(ed.selected(), TileId(2));
}

#[test]
fn save_then_load_restores_grid() {
    let mut ed = editor();
    ed.select_tile(TileId(2));
    ed.paint_at(tile_center(3, 1)).unwrap();
    ed.paint_at(tile_center(14, 6)).unwrap();
    let saved = ed.grid().clone();

    ctrl(&mut ed, KeyCode::S);
    assert!(ed.store().get(ed.level_path()).is_some());

    ed.paint_at(tile_center(0, 0)).unwrap();
    assert_ne!(ed.grid(), &saved);

    ctrl(&mut ed, KeyCode::O);
    assert_eq!(ed.grid(), &saved);
}

#[test]
fn binary_level_path_round_trips() {
    let config = EditorConfig {
        level_path: "/levels/level.bin".into(),
        ..EditorConfig::default()
    };
    let mut ed = TilemapEditor::new(&config, MemoryStore::new()).unwrap();
    ed.select_tile(TileId(1));
    ed.paint_at(tile_center(2, 2)).unwrap();
    ed.save().unwrap();

    let bytes = ed.store().get("/levels/level.bin").unwrap();
    assert_eq!(&bytes[..8], &[0, 0, 0, 10, 0, 0, 0, 5]);
    assert_eq!(bytes[8 + 2 * 10 + 2], 1);
}

#[test]
fn failed_load_leaves_grid_untouched() {
    let mut store = MemoryStore::new();
    store.insert("/levels/level.bmp", b"definitely not a bitmap".to_vec());
    let mut ed = TilemapEditor::new(&EditorConfig::default(), store).unwrap();
    ed.select_tile(TileId(1));
    ed.paint_at(tile_center(1, 1)).unwrap();
    let before = ed.grid().clone();

    assert!(ed.load().is_err());
    assert_eq!(ed.grid(), &before);

    // The keyboard path logs and carries on.
    ctrl(&mut ed, KeyCode::O);
    assert_eq!(ed.grid(), &before);
}

#[test]
fn degenerate_binary_header_is_rejected_without_aborting() {
    let config = EditorConfig {
        level_path: "/levels/level.bin".into(),
        ..EditorConfig::default()
    };
    let mut store = MemoryStore::new();
    store.insert("/levels/level.bin", vec![0, 0, 0, 0, 0xff, 0xff, 0xff, 0xff]);
    let mut ed = TilemapEditor::new(&config, store).unwrap();
    let before = ed.grid().clone();

    assert!(matches!(ed.load(), Err(MapError::CorruptFile(_))));
    ctrl(&mut ed, KeyCode::O);
    assert_eq!(ed.grid(), &before);
}

#[test]
fn load_of_missing_file_is_not_found() {
    let mut ed = editor();
    let err = ed.load_from("/levels/nothing.bmp").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn loaded_level_with_foreign_tile_is_rejected() {
    let mut store = MemoryStore::new();
    store.insert("/levels/level.bin", vec![0, 0, 0, 1, 0, 0, 0, 1, 7]);
    let mut ed = TilemapEditor::new(&EditorConfig::default(), store).unwrap();
    let err = ed.load_from("/levels/level.bin").unwrap_err();
    assert!(matches!(err, MapError::UnknownTile { tile: 7, x: 0, y: 0, .. }));
    assert_eq!((ed.grid().width(), ed.grid().height()), (10, 5));
}

#[test]
fn drag_and_wheel_move_camera() {
    let mut ed = editor();
    let start = vec2(500.0, 300.0);

    ed.handle_event(&InputEvent::ButtonDown { button: MouseButton::Right, position: start }).unwrap();
    assert_eq!(ed.state(), EditorState::DraggingCamera);
    ed.handle_event(&InputEvent::PointerMoved { position: start + vec2(-64.0, 32.0), delta: vec2(-64.0, 32.0) }).unwrap();
    ed.handle_event(&InputEvent::ButtonUp { button: MouseButton::Right, position: start }).unwrap();
    assert_eq!(ed.state(), EditorState::Idle);
    assert_eq!(ed.camera().target_position(), vec2(-64.0, 32.0));

    ed.handle_event(&InputEvent::Wheel { delta: 1.0 }).unwrap();
    assert_eq!(ed.camera().target_zoom(), 1.125);

    for _ in 0..200 {
        ed.advance(0.01);
    }
    assert!((ed.camera().zoom() - 1.125).abs() < 1e-4);
}

#[test]
fn store_trait_object_is_usable() {
    let mut store = MemoryStore::new();
    let dyn_store: &mut dyn FileStore = &mut store;
    dyn_store.write("levels/a.bin", &[1, 2]).unwrap();
    assert_eq!(dyn_store.read("/levels/a.bin").unwrap(), vec![1, 2]);
}
