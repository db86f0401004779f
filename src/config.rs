//! JSON editor configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::camera::{EditorCamera, DEFAULT_DECAY_RATE};
use crate::error::MapError;
use crate::grid::TileId;
use crate::palette::Palette;
use crate::store::FileStore;

/// Logical path of the optional configuration file.
pub const CONFIG_PATH: &str = "/editor.json";

/// Editor settings. Every field falls back to its default when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Tile texture paths, relative to the data mounts.
    pub palette: Vec<String>,
    /// Palette index used for new cells.
    pub default_tile: u32,
    /// Starting grid width in tiles.
    pub columns: usize,
    /// Starting grid height in tiles.
    pub rows: usize,
    /// Edge length of one tile in world units.
    pub tile_size: f32,
    /// Where Ctrl+S / Ctrl+O save and load. The extension picks the format.
    pub level_path: String,
    /// When false the camera follows input without easing.
    pub smoothing: bool,
    /// Smoothing strength, see [`EditorCamera::new`].
    pub decay_rate: f32,
    /// Seconds of simulated time per frame.
    pub timestep: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            palette: vec![
                String::new(),
                "images/tiles/block.png".into(),
                "images/tiles/brick.png".into(),
            ],
            default_tile: 0,
            columns: 10,
            rows: 5,
            tile_size: 32.0,
            level_path: "/levels/level.bmp".into(),
            smoothing: true,
            decay_rate: DEFAULT_DECAY_RATE,
            timestep: 0.01,
        }
    }
}

impl EditorConfig {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(txt: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(txt)
    }

    /// Reads [`CONFIG_PATH`] from the store, using defaults if it is absent.
    pub fn load(store: &dyn FileStore) -> Result<Self, MapError> {
        let bytes = match store.read(CONFIG_PATH) {
            Ok(bytes) => bytes,
            Err(e) if e.is_not_found() => return Ok(Self::default()),
            Err(e) => return Err(e),
        };
        let config: EditorConfig =
            serde_json::from_slice(&bytes).map_err(|source| MapError::Json {
                path: PathBuf::from(CONFIG_PATH),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot: positive tile size, usable decay rate,
    /// non-negative timestep and a valid palette.
    pub fn validate(&self) -> Result<(), MapError> {
        if !(self.tile_size > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "tile_size must be positive, got {}",
                self.tile_size
            )));
        }
        if self.smoothing && !(self.decay_rate > 1.0) {
            return Err(MapError::InvalidConfig(format!(
                "decay_rate must be greater than 1, got {}",
                self.decay_rate
            )));
        }
        if !(self.timestep >= 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "timestep must not be negative, got {}",
                self.timestep
            )));
        }
        self.palette().map(|_| ())
    }

    /// Palette built from `palette` and `default_tile`.
    pub fn palette(&self) -> Result<Palette, MapError> {
        Palette::new(self.palette.clone(), TileId(self.default_tile))
    }

    /// Smoothed camera, or an instant one when `smoothing` is off.
    pub fn camera(&self) -> EditorCamera {
        if self.smoothing {
            EditorCamera::new(self.decay_rate)
        } else {
            EditorCamera::instant()
        }
    }
}
