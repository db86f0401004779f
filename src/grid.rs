//! Growable tile grid.

use crate::error::MapError;
use macroquad::math::{ivec2, IVec2};

/// Index into the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl TileId {
    /// Palette index as stored on disk.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Palette index for slice lookups.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Half-open rectangle of tile coordinates: `min` inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    /// Inclusive corner.
    pub min: IVec2,
    /// Exclusive corner.
    pub max: IVec2,
}

impl TileRect {
    /// Rectangle from `min` (inclusive) to `max` (exclusive).
    pub fn new(min: IVec2, max: IVec2) -> Self {
        TileRect { min, max }
    }

    /// True when the rectangle covers no tile.
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `p` lies inside.
    pub fn contains(&self, p: IVec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Overlap of two rectangles; may be empty.
    pub fn intersect(&self, other: &TileRect) -> TileRect {
        TileRect {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }
}

/// Growable 2D grid of tile indices addressed by logical tile coordinates.
///
/// Cells live in one flat row-major buffer. `origin` records how far storage
/// index (0, 0) has moved away from tile coordinate (0, 0) as the grid grew
/// towards negative coordinates: tile `(x, y)` is stored at
/// `(x + origin.x, y + origin.y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<TileId>,
    origin: IVec2,
    fill: TileId,
}

impl TileGrid {
    /// A `width` x `height` grid where every cell is `fill`.
    pub fn new(width: usize, height: usize, fill: TileId) -> Self {
        TileGrid {
            width,
            height,
            cells: vec![fill; width * height],
            origin: IVec2::ZERO,
            fill,
        }
    }

    /// Builds a grid anchored at the origin from row-major `cells`.
    ///
    /// Used by the loaders. `cells` must hold exactly `width * height` tiles,
    /// and a zero dimension is only accepted when both are zero.
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: Vec<TileId>,
        fill: TileId,
    ) -> Result<Self, MapError> {
        if (width == 0) != (height == 0) {
            return Err(MapError::CorruptFile(format!(
                "degenerate dimensions {}x{}",
                width, height
            )));
        }
        if width.checked_mul(height) != Some(cells.len()) {
            return Err(MapError::CorruptFile(format!(
                "{} tiles do not fill {}x{}",
                cells.len(),
                width,
                height
            )));
        }
        Ok(TileGrid {
            width,
            height,
            cells,
            origin: IVec2::ZERO,
            fill,
        })
    }

    /// Columns currently stored.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows currently stored.
    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the grid holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Translation from tile coordinates to storage indices.
    pub fn origin_offset(&self) -> IVec2 {
        self.origin
    }

    /// Tile used for cells created by growth.
    pub fn fill(&self) -> TileId {
        self.fill
    }

    /// Logical tile rectangle currently materialized.
    pub fn bounds(&self) -> TileRect {
        let min = -self.origin;
        TileRect::new(min, min + ivec2(self.width as i32, self.height as i32))
    }

    fn storage_index(&self, x: i32, y: i32) -> Option<usize> {
        let sx = x as i64 + self.origin.x as i64;
        let sy = y as i64 + self.origin.y as i64;
        if sx < 0 || sy < 0 || sx >= self.width as i64 || sy >= self.height as i64 {
            return None;
        }
        Some(sy as usize * self.width + sx as usize)
    }

    /// Whether logical `(x, y)` is materialized.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.storage_index(x, y).is_some()
    }

    /// Tile at logical `(x, y)`, or `OutOfRange`.
    pub fn get(&self, x: i32, y: i32) -> Result<TileId, MapError> {
        self.storage_index(x, y)
            .map(|i| self.cells[i])
            .ok_or(MapError::OutOfRange { x, y })
    }

    /// Overwrites one cell. Call [`TileGrid::ensure_contains`] first on
    /// write paths that may land outside the grid.
    pub fn set(&mut self, x: i32, y: i32, tile: TileId) -> Result<(), MapError> {
        let i = self
            .storage_index(x, y)
            .ok_or(MapError::OutOfRange { x, y })?;
        self.cells[i] = tile;
        Ok(())
    }

    /// Grows the grid just enough for tile `(x, y)` to be addressable.
    ///
    /// Rows are handled before columns, both from the same input coordinate.
    /// Existing cells keep their tile coordinates; growing towards negative
    /// coordinates shifts the origin offset by the amount prepended.
    pub fn ensure_contains(&mut self, x: i32, y: i32) {
        let sx = x as i64 + self.origin.x as i64;
        let sy = y as i64 + self.origin.y as i64;

        let (prepend_rows, new_height) = if sy < 0 {
            ((-sy) as usize, self.height + (-sy) as usize)
        } else if sy as usize >= self.height {
            (0, sy as usize + 1)
        } else {
            (0, self.height)
        };

        let (prepend_cols, new_width) = if sx < 0 {
            ((-sx) as usize, self.width + (-sx) as usize)
        } else if sx as usize >= self.width {
            (0, sx as usize + 1)
        } else {
            (0, self.width)
        };

        if new_width == self.width && new_height == self.height {
            return;
        }

        let mut cells = vec![self.fill; new_width * new_height];
        for (y, row) in self.rows().enumerate() {
            let start = (y + prepend_rows) * new_width + prepend_cols;
            cells[start..start + row.len()].copy_from_slice(row);
        }

        self.cells = cells;
        self.width = new_width;
        self.height = new_height;
        self.origin += ivec2(prepend_cols as i32, prepend_rows as i32);
    }

    /// Storage rows, top to bottom. Row 0 is tile row `-origin.y`.
    pub fn rows(&self) -> impl Iterator<Item = &[TileId]> + '_ {
        (0..self.height).map(move |y| &self.cells[y * self.width..(y + 1) * self.width])
    }

    /// Tiles inside `rect` (logical coordinates), row by row.
    pub fn cells_in(&self, rect: TileRect) -> impl Iterator<Item = (IVec2, TileId)> + '_ {
        let clip = self.bounds().intersect(&rect);
        let (xs, ys) = if clip.is_empty() {
            (0..0, 0..0)
        } else {
            (clip.min.x..clip.max.x, clip.min.y..clip.max.y)
        };
        ys.flat_map(move |y| {
            xs.clone().map(move |x| {
                let i = (y + self.origin.y) as usize * self.width + (x + self.origin.x) as usize;
                (ivec2(x, y), self.cells[i])
            })
        })
    }
}
