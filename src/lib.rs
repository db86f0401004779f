#![warn(missing_docs)]

//! Tile-based level editor on Macroquad: a growable tile grid, a smoothed
//! pan/zoom camera, binary and bitmap level codecs, and the editor scene
//! that ties them to input.

pub mod app;
pub mod camera;
pub mod cli;
pub mod codec;
pub mod config;
pub mod editor;
mod error;
pub mod grid;
pub mod input;
pub mod mapper;
pub mod palette;
pub mod render;
pub mod scene;
pub mod store;
pub mod tilebox;

pub use camera::EditorCamera;
pub use codec::LevelFormat;
pub use config::EditorConfig;
pub use editor::{EditorState, TilemapEditor};
pub use error::MapError;
pub use grid::{TileGrid, TileId, TileRect};
pub use mapper::CoordinateMapper;
pub use palette::Palette;
pub use store::{FileStore, MemoryStore, MountedStore};
