//! Level persistence: format selection and dispatch to the two encodings.

/// Header-plus-bytes format.
pub mod binary;
/// Image format.
pub mod bitmap;

use std::path::Path;

use image::ImageFormat;

use crate::error::MapError;
use crate::grid::TileGrid;
use crate::palette::Palette;

/// On-disk level encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelFormat {
    /// Header plus one byte per tile (`.bin`).
    Binary,
    /// 32-bit image container (`.bmp`, `.png`).
    Image(ImageFormat),
}

impl LevelFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &str) -> Result<Self, MapError> {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("bin") => Ok(LevelFormat::Binary),
            Some("bmp") => Ok(LevelFormat::Image(ImageFormat::Bmp)),
            Some("png") => Ok(LevelFormat::Image(ImageFormat::Png)),
            _ => Err(MapError::UnsupportedFormat(path.to_owned())),
        }
    }
}

/// Encodes `grid` in `format`.
pub fn encode(format: LevelFormat, grid: &TileGrid) -> Result<Vec<u8>, MapError> {
    match format {
        LevelFormat::Binary => binary::encode(grid),
        LevelFormat::Image(f) => bitmap::encode(grid, f),
    }
}

/// Decodes a level into a fresh grid anchored at the origin.
pub fn decode(format: LevelFormat, bytes: &[u8], palette: &Palette) -> Result<TileGrid, MapError> {
    match format {
        LevelFormat::Binary => binary::decode(bytes, palette),
        LevelFormat::Image(f) => bitmap::decode(bytes, f, palette),
    }
}
