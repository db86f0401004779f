//! Screen, world and tile coordinate conversions.

use crate::camera::EditorCamera;
use crate::grid::TileRect;
use macroquad::math::{ivec2, IVec2, Vec2};

/// Tiles beyond the screen edge that are still reported as visible.
const CULL_MARGIN_TILES: i32 = 1;

/// Converts between screen pixels, world units and tile coordinates.
///
/// Tile coordinates here are logical; the grid's origin offset is applied
/// only by the grid itself when indexing storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    tile_size: Vec2,
}

impl CoordinateMapper {
    /// Tile edge used when nothing else is configured.
    pub const DEFAULT_TILE_SIZE: Vec2 = Vec2::new(32.0, 32.0);

    /// Mapper for tiles of `tile_size` world units.
    pub fn new(tile_size: Vec2) -> Self {
        CoordinateMapper { tile_size }
    }

    /// Tile size in world units.
    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    /// Tile under a screen point.
    pub fn screen_to_tile(&self, camera: &EditorCamera, screen: Vec2) -> IVec2 {
        (camera.screen_to_world(screen) / self.tile_size)
            .floor()
            .as_ivec2()
    }

    /// Screen position of a tile's top-left corner.
    pub fn tile_to_screen(&self, camera: &EditorCamera, tile: IVec2) -> Vec2 {
        camera.world_to_screen(self.tile_to_world(tile))
    }

    /// Screen-space size of one tile at the camera's displayed zoom.
    pub fn tile_screen_size(&self, camera: &EditorCamera) -> Vec2 {
        self.tile_size * camera.zoom()
    }

    /// World position of a tile's top-left corner.
    pub fn tile_to_world(&self, tile: IVec2) -> Vec2 {
        tile.as_vec2() * self.tile_size
    }

    /// Tiles covering a `screen_size` viewport, padded by one tile.
    pub fn visible_tiles(&self, camera: &EditorCamera, screen_size: Vec2) -> TileRect {
        let mut min = self.screen_to_tile(camera, Vec2::ZERO);
        let mut max = self.screen_to_tile(camera, screen_size);

        if min.x > max.x {
            std::mem::swap(&mut min.x, &mut max.x);
        }
        if min.y > max.y {
            std::mem::swap(&mut min.y, &mut max.y);
        }

        TileRect::new(
            min - ivec2(CULL_MARGIN_TILES, CULL_MARGIN_TILES),
            max + ivec2(CULL_MARGIN_TILES + 1, CULL_MARGIN_TILES + 1),
        )
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TILE_SIZE)
    }
}
