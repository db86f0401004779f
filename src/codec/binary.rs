//! Compact level format: big-endian u32 width, big-endian u32 height, then
//! one byte per tile in row-major order.

use crate::error::MapError;
use crate::grid::{TileGrid, TileId};
use crate::palette::Palette;

/// Width plus height, four bytes each.
pub const HEADER_LEN: usize = 8;

/// Encodes the grid's stored cells. Fails with `Encoding` for tiles above 255.
pub fn encode(grid: &TileGrid) -> Result<Vec<u8>, MapError> {
    let w = u32::try_from(grid.width())
        .map_err(|_| MapError::Encoding(format!("width {} does not fit in 32 bits", grid.width())))?;
    let h = u32::try_from(grid.height())
        .map_err(|_| MapError::Encoding(format!("height {} does not fit in 32 bits", grid.height())))?;

    let mut out = Vec::with_capacity(HEADER_LEN + grid.width() * grid.height());
    out.extend_from_slice(&w.to_be_bytes());
    out.extend_from_slice(&h.to_be_bytes());

    for (y, row) in grid.rows().enumerate() {
        for (x, tile) in row.iter().enumerate() {
            let byte = u8::try_from(tile.raw()).map_err(|_| {
                MapError::Encoding(format!(
                    "tile {} at {}x{} does not fit in one byte",
                    tile.raw(),
                    x,
                    y
                ))
            })?;
            out.push(byte);
        }
    }
    Ok(out)
}

/// Decodes a level. Bytes past the declared cells are ignored.
pub fn decode(bytes: &[u8], palette: &Palette) -> Result<TileGrid, MapError> {
    if bytes.len() < HEADER_LEN {
        return Err(MapError::CorruptFile("no dimensions".into()));
    }

    let w = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let h = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let payload = &bytes[HEADER_LEN..];

    let declared = w as u64 * h as u64;
    if (payload.len() as u64) < declared {
        return Err(MapError::CorruptFile(format!(
            "wrong size ({}x{} != {})",
            w,
            h,
            payload.len()
        )));
    }

    let cells = &payload[..declared as usize];
    let mut tiles = Vec::with_capacity(cells.len());
    for (i, byte) in cells.iter().enumerate() {
        let tile = TileId(*byte as u32);
        if !palette.contains(tile) {
            return Err(MapError::UnknownTile {
                tile: tile.raw(),
                x: (i as u64 % w as u64) as u32,
                y: (i as u64 / w as u64) as u32,
                palette_len: palette.len(),
            });
        }
        tiles.push(tile);
    }

    TileGrid::from_cells(w as usize, h as usize, tiles, palette.default_tile())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(len: usize) -> Palette {
        Palette::new(vec![String::new(); len], TileId(0)).unwrap()
    }

    #[test]
    fn header_is_big_endian() {
        let grid = TileGrid::new(258, 1, TileId(0));
        let bytes = encode(&grid).unwrap();
        assert_eq!(&bytes[..8], &[0, 0, 1, 2, 0, 0, 0, 1]);
        assert_eq!(bytes.len(), 8 + 258);
    }

    #[test]
    fn payload_is_row_major() {
        let mut grid = TileGrid::new(2, 2, TileId(0));
        grid.set(1, 0, TileId(1)).unwrap();
        grid.set(0, 1, TileId(2)).unwrap();
        let bytes = encode(&grid).unwrap();
        assert_eq!(&bytes[8..], &[0, 1, 2, 0]);
    }

    #[test]
    fn rejects_tiles_above_one_byte() {
        let mut grid = TileGrid::new(1, 1, TileId(0));
        grid.set(0, 0, TileId(256)).unwrap();
        assert!(matches!(encode(&grid), Err(MapError::Encoding(_))));
    }

    #[test]
    fn huge_declared_size_is_corrupt() {
        let bytes = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0];
        assert!(matches!(decode(&bytes, &palette(3)), Err(MapError::CorruptFile(_))));
    }

    #[test]
    fn zero_width_with_huge_height_is_corrupt() {
        let bytes = [0, 0, 0, 0, 0xff, 0xff, 0xff, 0xff];
        assert!(matches!(decode(&bytes, &palette(3)), Err(MapError::CorruptFile(_))));
    }

    #[test]
    fn empty_level_decodes_to_empty_grid() {
        let grid = decode(&[0; 8], &palette(3)).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let bytes = [0, 0, 0, 1, 0, 0, 0, 1, 2, 9, 9];
        let grid = decode(&bytes, &palette(3)).unwrap();
        assert_eq!(grid.get(0, 0).unwrap(), TileId(2));
    }
}
