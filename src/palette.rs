//! Tile palette.

use crate::error::MapError;
use crate::grid::TileId;

/// Ordered list of tile texture paths.
///
/// The default tile fills every cell created by grid growth or a fresh
/// editor. It is allowed to point at a non-empty entry; only entries whose
/// path is empty are skipped when drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<String>,
    default_tile: TileId,
}

impl Palette {
    /// Validates and wraps the entries. Fails with `InvalidConfig` when there
    /// are none or `default_tile` is past the end.
    pub fn new(entries: Vec<String>, default_tile: TileId) -> Result<Self, MapError> {
        if entries.is_empty() {
            return Err(MapError::InvalidConfig("palette has no entries".into()));
        }
        if default_tile.as_usize() >= entries.len() {
            return Err(MapError::InvalidConfig(format!(
                "default tile {} is outside the palette ({} entries)",
                default_tile.raw(),
                entries.len()
            )));
        }
        Ok(Palette {
            entries,
            default_tile,
        })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fill tile for new cells.
    pub fn default_tile(&self) -> TileId {
        self.default_tile
    }

    /// Whether `tile` indexes an entry.
    pub fn contains(&self, tile: TileId) -> bool {
        tile.as_usize() < self.entries.len()
    }

    /// Texture path for `tile`, if it is in the palette.
    pub fn path(&self, tile: TileId) -> Option<&str> {
        self.entries.get(tile.as_usize()).map(String::as_str)
    }

    /// Texture path for `tile` when there is something to draw.
    pub fn drawable(&self, tile: TileId) -> Option<&str> {
        self.path(tile).filter(|p| !p.is_empty())
    }

    /// Entries with their tile ids, in palette order.
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &str)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, p)| (TileId(i as u32), p.as_str()))
    }
}
