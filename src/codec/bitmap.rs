//! Image-based level format. Each 32-bit ARGB pixel XOR `0xFF000000` is a
//! tile index, so ordinary indices come out fully opaque.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::MapError;
use crate::grid::{TileGrid, TileId};
use crate::palette::Palette;

/// XOR mask between tile indices and ARGB pixels.
pub const ALPHA_MASK: u32 = 0xFF00_0000;

fn tile_to_pixel(tile: TileId) -> Rgba<u8> {
    let [a, r, g, b] = (tile.raw() ^ ALPHA_MASK).to_be_bytes();
    Rgba([r, g, b, a])
}

fn pixel_to_tile(pixel: &Rgba<u8>) -> TileId {
    let [r, g, b, a] = pixel.0;
    TileId(u32::from_be_bytes([a, r, g, b]) ^ ALPHA_MASK)
}

/// Encodes the grid as a 32-bit RGBA image in `format`.
pub fn encode(grid: &TileGrid, format: ImageFormat) -> Result<Vec<u8>, MapError> {
    let w = u32::try_from(grid.width())
        .map_err(|_| MapError::Encoding(format!("width {} does not fit in 32 bits", grid.width())))?;
    let h = u32::try_from(grid.height())
        .map_err(|_| MapError::Encoding(format!("height {} does not fit in 32 bits", grid.height())))?;

    let mut img = RgbaImage::new(w, h);
    for (y, row) in grid.rows().enumerate() {
        for (x, tile) in row.iter().enumerate() {
            img.put_pixel(x as u32, y as u32, tile_to_pixel(*tile));
        }
    }

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format)
        .map_err(|e| MapError::Encoding(format!("can't write {:?} image: {}", format, e)))?;
    Ok(out.into_inner())
}

/// Decodes an image level; every pixel must map into the palette.
pub fn decode(bytes: &[u8], format: ImageFormat, palette: &Palette) -> Result<TileGrid, MapError> {
    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| MapError::CorruptFile(format!("can't read {:?} image: {}", format, e)))?
        .to_rgba8();

    let (w, h) = img.dimensions();
    let mut tiles = Vec::with_capacity(w as usize * h as usize);
    for (x, y, pixel) in img.enumerate_pixels() {
        let tile = pixel_to_tile(pixel);
        if !palette.contains(tile) {
            return Err(MapError::UnknownTile {
                tile: tile.raw(),
                x,
                y,
                palette_len: palette.len(),
            });
        }
        tiles.push(tile);
    }

    TileGrid::from_cells(w as usize, h as usize, tiles, palette.default_tile())
}
