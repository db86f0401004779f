// tests/codec_tests.rs

use image::ImageFormat;
use quadtile_editor::codec::{self, binary, bitmap};
use quadtile_editor::{LevelFormat, MapError, Palette, TileGrid, TileId};

fn palette() -> Palette {
    Palette::new(
        vec!["".into(), "images/tiles/block.png".into(), "images/tiles/brick.png".into()],
        TileId(0),
    )
    .unwrap()
}

/// A grid that has grown in every direction, with a few painted cells.
fn grown_grid() -> TileGrid {
    let mut grid = TileGrid::new(4, 3, TileId(0));
    for (x, y, t) in [(-2, -1, 1), (6, 4, 2), (0, 0, 2), (3, -1, 1)] {
        grid.ensure_contains(x, y);
        grid.set(x, y, TileId(t)).unwrap();
    }
    grid
}

/// Decoded grids are anchored at the origin, so compare row content.
fn same_rows(a: &TileGrid, b: &TileGrid) -> bool {
    a.width() == b.width() && a.height() == b.height() && a.rows().eq(b.rows())
}

#[test]
fn every_format_round_trips_grown_grid() {
    let grid = grown_grid();
    for path in ["/l.bin", "/l.bmp", "/l.png"] {
        let format = LevelFormat::from_path(path).unwrap();
        let bytes = codec::encode(format, &grid).unwrap();
        let back = codec::decode(format, &bytes, &palette()).unwrap();
        assert!(same_rows(&grid, &back), "{} did not round-trip", path);
        assert_eq!(back.origin_offset(), macroquad::math::IVec2::ZERO);
    }
}

#[test]
fn binary_rejects_truncated_input() {
    let err = binary::decode(&[0, 0, 0, 2, 0, 0], &palette()).unwrap_err();
    assert!(matches!(err, MapError::CorruptFile(ref m) if m == "no dimensions"));

    let err = binary::decode(&[0, 0, 0, 2, 0, 0, 0, 2, 1, 1, 1], &palette()).unwrap_err();
    assert!(matches!(err, MapError::CorruptFile(ref m) if m.starts_with("wrong size")));
}

#[test]
fn binary_rejects_zero_width_with_huge_height() {
    let err = binary::decode(&[0, 0, 0, 0, 0xff, 0xff, 0xff, 0xff], &palette()).unwrap_err();
    assert!(matches!(err, MapError::CorruptFile(_)));
}

#[test]
fn binary_rejects_tile_outside_palette() {
    let err = binary::decode(&[0, 0, 0, 2, 0, 0, 0, 1, 0, 3], &palette()).unwrap_err();
    assert!(matches!(err, MapError::UnknownTile { tile: 3, x: 1, y: 0, palette_len: 3 }));
}

#[test]
fn binary_cannot_store_wide_indices() {
    let mut grid = TileGrid::new(1, 1, TileId(0));
    grid.set(0, 0, TileId(300)).unwrap();
    assert!(matches!(binary::encode(&grid), Err(MapError::Encoding(_))));
}

#[test]
fn bitmap_pixels_use_inverted_alpha() {
    let mut grid = TileGrid::new(2, 1, TileId(0));
    grid.set(1, 0, TileId(2)).unwrap();
    let bytes = bitmap::encode(&grid, ImageFormat::Png).unwrap();

    let img = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0xff]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 2, 0xff]);
}

#[test]
fn bitmap_rejects_foreign_pixels() {
    let mut img = image::RgbaImage::new(2, 2);
    for p in img.pixels_mut() {
        *p = image::Rgba([0, 0, 0, 0xff]);
    }
    img.put_pixel(1, 1, image::Rgba([0, 0, 9, 0xff]));
    let mut bytes = std::io::Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png).unwrap();

    let err = bitmap::decode(bytes.get_ref(), ImageFormat::Png, &palette()).unwrap_err();
    assert!(matches!(err, MapError::UnknownTile { tile: 9, x: 1, y: 1, .. }));
}

#[test]
fn bitmap_rejects_garbage() {
    let err = bitmap::decode(b"BMnope", ImageFormat::Bmp, &palette()).unwrap_err();
    assert!(matches!(err, MapError::CorruptFile(_)));
}

#[test]
fn unknown_extension_is_unsupported() {
    match LevelFormat::from_path("/levels/level.tmx").unwrap_err() {
        MapError::UnsupportedFormat(path) => assert_eq!(path, "/levels/level.tmx"),
        other => panic!("expected UnsupportedFormat, got {:?}", other),
    }
}
