// tests/store_tests.rs

use std::fs;
use std::path::PathBuf;

use quadtile_editor::{EditorConfig, FileStore, MountedStore, TileId, TilemapEditor};

fn scratch(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("quadtile_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn reads_fall_back_through_mounts() {
    let root = scratch("fallback");
    let data = root.join("data");
    let user = root.join("user");
    fs::create_dir_all(data.join("levels")).unwrap();
    fs::write(data.join("levels/level.bin"), [1u8]).unwrap();
    fs::write(data.join("editor.json"), br#"{ "rows": 3 }"#).unwrap();

    let mut store = MountedStore::new();
    store.mount(&data);
    store.set_write_dir(&user).unwrap();
    assert_eq!(store.mounts()[0], user);

    assert_eq!(store.read("/levels/level.bin").unwrap(), vec![1]);

    // A saved file shadows the shipped one.
    store.write("/levels/level.bin", &[2]).unwrap();
    assert_eq!(store.read("/levels/level.bin").unwrap(), vec![2]);
    assert_eq!(fs::read(data.join("levels/level.bin")).unwrap(), vec![1]);

    assert_eq!(EditorConfig::load(&store).unwrap().rows, 3);

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn missing_file_and_escaping_paths() {
    let root = scratch("escape");
    let mut store = MountedStore::new();
    store.mount(&root);

    assert!(store.read("/nope.bin").unwrap_err().is_not_found());
    assert!(store.read("/../etc/passwd").is_err());
    assert!(!store.read("/../etc/passwd").unwrap_err().is_not_found());

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn write_without_write_dir_fails() {
    let mut store = MountedStore::new();
    assert!(store.write("/levels/level.bmp", &[0]).is_err());
}

#[test]
fn editor_saves_into_user_dir() {
    let root = scratch("editor");
    let mut store = MountedStore::new();
    store.set_write_dir(root.join("user")).unwrap();

    let mut ed = TilemapEditor::new(&EditorConfig::default(), store.clone()).unwrap();
    ed.select_tile(TileId(2));
    ed.paint_at(macroquad::math::vec2(80.0, 48.0)).unwrap();
    ed.save().unwrap();
    assert!(root.join("user/levels/level.bmp").is_file());

    // A second editor on the same directories sees the saved level.
    let mut other = TilemapEditor::new(&EditorConfig::default(), store).unwrap();
    other.load().unwrap();
    assert_eq!(other.grid(), ed.grid());

    fs::remove_dir_all(&root).unwrap();
}
