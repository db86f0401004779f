//! Tilemap editor scene.

use log::{error, info};
use macroquad::color::Color;
use macroquad::math::{vec2, IVec2, Rect, Vec2};

use crate::camera::EditorCamera;
use crate::codec::{self, LevelFormat};
use crate::config::EditorConfig;
use crate::error::MapError;
use crate::grid::{TileGrid, TileId};
use crate::input::{InputEvent, KeyCode, MouseButton};
use crate::mapper::CoordinateMapper;
use crate::palette::Palette;
use crate::render::DrawingContext;
use crate::scene::{Scene, SceneAction};
use crate::store::FileStore;
use crate::tilebox::{Tilebox, TileboxResponse};

const BACKGROUND: Color = Color::new(0.1, 0.2, 0.4, 1.0);
const GRID_LINE: Color = Color::new(1.0, 1.0, 1.0, 0.5);
const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
const PREVIEW: Color = Color::new(1.0, 1.0, 1.0, 0.5);

/// Help line drawn next to the tilebox.
pub const HINT: &str = "Press Ctrl+S to save and Ctrl+O to load";

/// Interaction state of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// Waiting for input; left clicks paint.
    Idle,
    /// Right button held; pointer motion pans.
    DraggingCamera,
}

/// Tilemap editor scene: owns the grid, camera and palette, and turns input
/// into grid edits, camera moves and level save/load through `S`.
pub struct TilemapEditor<S: FileStore> {
    grid: TileGrid,
    palette: Palette,
    camera: EditorCamera,
    mapper: CoordinateMapper,
    tilebox: Tilebox,
    store: S,
    level_path: String,
    state: EditorState,
    selected: TileId,
    pointer: Vec2,
}

impl<S: FileStore> TilemapEditor<S> {
    /// Editor with a fresh grid sized and filled from `config`.
    pub fn new(config: &EditorConfig, store: S) -> Result<Self, MapError> {
        config.validate()?;
        let palette = config.palette()?;
        Ok(TilemapEditor {
            grid: TileGrid::new(config.columns, config.rows, palette.default_tile()),
            selected: palette.default_tile(),
            palette,
            camera: config.camera(),
            mapper: CoordinateMapper::new(vec2(config.tile_size, config.tile_size)),
            tilebox: Tilebox::new(),
            store,
            level_path: config.level_path.clone(),
            state: EditorState::Idle,
            pointer: Vec2::ZERO,
        })
    }

    /// The level being edited.
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Palette the grid indexes into.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// View camera.
    pub fn camera(&self) -> &EditorCamera {
        &self.camera
    }

    /// Coordinate mapper shared by hit-testing and drawing.
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Store levels are saved to and loaded from.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current interaction state.
    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Tile that left clicks paint.
    pub fn selected(&self) -> TileId {
        self.selected
    }

    /// Path used by Ctrl+S and Ctrl+O.
    pub fn level_path(&self) -> &str {
        &self.level_path
    }

    /// Makes `tile` the brush. Returns false, leaving the brush unchanged,
    /// if it is not in the palette.
    pub fn select_tile(&mut self, tile: TileId) -> bool {
        if !self.palette.contains(tile) {
            return false;
        }
        self.selected = tile;
        true
    }

    /// Feeds one input event through the tilebox and the editor state machine.
    ///
    /// Save/load failures are logged and swallowed; an error here means the
    /// grid was asked for a cell it does not hold.
    pub fn handle_event(&mut self, event: &InputEvent) -> Result<(), MapError> {
        match self.tilebox.event(event, &self.palette) {
            TileboxResponse::Ignored => {}
            TileboxResponse::Consumed => return Ok(()),
            TileboxResponse::Selected(tile) => {
                self.select_tile(tile);
                return Ok(());
            }
        }

        match *event {
            InputEvent::ButtonDown { button, position } => match button {
                MouseButton::Left => {
                    self.paint_at(position)?;
                }
                MouseButton::Right => {
                    self.state = EditorState::DraggingCamera;
                    self.camera.begin_drag();
                }
                _ => {}
            },
            InputEvent::ButtonUp { button, .. } => {
                if button == MouseButton::Right {
                    self.state = EditorState::Idle;
                    self.camera.end_drag();
                }
            }
            InputEvent::PointerMoved { position, delta } => {
                self.pointer = position;
                self.camera.pointer_moved(position, delta);
            }
            InputEvent::Wheel { delta } => self.camera.zoom_by(delta, self.pointer),
            InputEvent::KeyDown { .. } => {
                if event.is_ctrl_key(KeyCode::S) {
                    match self.save() {
                        Ok(()) => info!("Saved level to '{}'", self.level_path),
                        Err(e) => error!("Can't save level '{}': {}", self.level_path, e),
                    }
                } else if event.is_ctrl_key(KeyCode::O) {
                    match self.load() {
                        Ok(()) => info!(
                            "Loaded {}x{} level from '{}'",
                            self.grid.width(),
                            self.grid.height(),
                            self.level_path
                        ),
                        Err(e) => error!("Can't load level '{}': {}", self.level_path, e),
                    }
                }
            }
        }
        Ok(())
    }

    /// Paints the selected tile under a screen point, growing the grid as
    /// needed. Returns the tile coordinate that was painted.
    pub fn paint_at(&mut self, screen: Vec2) -> Result<IVec2, MapError> {
        let tile = self.mapper.screen_to_tile(&self.camera, screen);
        self.grid.ensure_contains(tile.x, tile.y);
        self.grid.set(tile.x, tile.y, self.selected)?;
        Ok(tile)
    }

    /// Advances camera smoothing by `dt_sec` seconds.
    pub fn advance(&mut self, dt_sec: f32) {
        self.camera.advance(dt_sec);
    }

    /// Saves to [`TilemapEditor::level_path`].
    pub fn save(&mut self) -> Result<(), MapError> {
        let path = self.level_path.clone();
        self.save_to(&path)
    }

    /// Loads from [`TilemapEditor::level_path`].
    pub fn load(&mut self) -> Result<(), MapError> {
        let path = self.level_path.clone();
        self.load_from(&path)
    }

    /// Encodes the grid in the format named by `path` and writes it.
    pub fn save_to(&mut self, path: &str) -> Result<(), MapError> {
        let format = LevelFormat::from_path(path)?;
        let bytes = codec::encode(format, &self.grid)?;
        self.store.write(path, &bytes)
    }

    /// Replaces the grid with the level at `path`. On any error the current
    /// grid is left as it was.
    pub fn load_from(&mut self, path: &str) -> Result<(), MapError> {
        let format = LevelFormat::from_path(path)?;
        let bytes = self.store.read(path)?;
        self.grid = codec::decode(format, &bytes, &self.palette)?;
        Ok(())
    }

    /// Records the whole editor view into `context`.
    pub fn draw(&self, context: &mut DrawingContext) {
        let target = context.target_size;
        context.draw_filled_rect(Rect::new(0.0, 0.0, target.x, target.y), BACKGROUND);

        if !self.grid.is_empty() {
            self.draw_grid(context);
        }

        if let Some(path) = self.palette.drawable(self.selected) {
            let tile = self.mapper.screen_to_tile(&self.camera, self.pointer);
            let corner = self.mapper.tile_to_screen(&self.camera, tile);
            let size = self.mapper.tile_screen_size(&self.camera);
            context.draw_texture(path, Rect::new(corner.x, corner.y, size.x, size.y), PREVIEW);
        }

        self.tilebox.draw(context, &self.palette);

        context.draw_text(HINT, Tilebox::content_left() + vec2(8.0, 8.0), 16.0, WHITE);
    }

    fn draw_grid(&self, context: &mut DrawingContext) {
        let ts = self.mapper.tile_size();
        let visible = self.mapper.visible_tiles(&self.camera, context.target_size);

        context.push_transform();
        self.camera.apply_transform(context);

        for (tile, id) in self.grid.cells_in(visible) {
            if let Some(path) = self.palette.drawable(id) {
                let p = self.mapper.tile_to_world(tile);
                context.draw_texture(path, Rect::new(p.x, p.y, ts.x, ts.y), WHITE);
            }
        }

        let bounds = self.grid.bounds();
        let min = self.mapper.tile_to_world(bounds.min);
        let max = self.mapper.tile_to_world(bounds.max);
        for x in bounds.min.x..=bounds.max.x {
            let wx = x as f32 * ts.x;
            context.draw_line(vec2(wx, min.y), vec2(wx, max.y), GRID_LINE);
        }
        for y in bounds.min.y..=bounds.max.y {
            let wy = y as f32 * ts.y;
            context.draw_line(vec2(min.x, wy), vec2(max.x, wy), GRID_LINE);
        }

        context.pop_transform();
    }
}

impl<S: FileStore + 'static> Scene for TilemapEditor<S> {
    fn event(&mut self, event: &InputEvent) -> anyhow::Result<()> {
        self.handle_event(event)?;
        Ok(())
    }

    fn update(&mut self, dt_sec: f32) -> anyhow::Result<SceneAction> {
        self.advance(dt_sec);
        Ok(SceneAction::None)
    }

    fn draw(&self, context: &mut DrawingContext) {
        TilemapEditor::draw(self, context);
    }
}
