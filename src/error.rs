//! Crate error type.

use std::path::PathBuf;
use std::{error, fmt, io};

/// Error type for grid access, level persistence and editor configuration.
#[derive(Debug)]
pub enum MapError {
    /// A grid read/write at a tile coordinate that is not materialized.
    OutOfRange {
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
    },
    /// Persisted data is too short or internally inconsistent.
    CorruptFile(String),
    /// A decoded tile index is not covered by the palette.
    UnknownTile {
        /// The offending index.
        tile: u32,
        /// Column in the file.
        x: u32,
        /// Row in the file.
        y: u32,
        /// Entries in the palette used for decoding.
        palette_len: usize,
    },
    /// Grid content cannot be represented in the target format.
    Encoding(String),
    /// Underlying storage failure.
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// What the OS reported.
        source: io::Error,
    },
    /// Configuration file is not valid JSON for `EditorConfig`.
    Json {
        /// Logical path of the file.
        path: PathBuf,
        /// Parser error with line and column.
        source: serde_json::Error,
    },
    /// Level path extension does not name a known format.
    UnsupportedFormat(String),
    /// Configuration values that cannot be used (empty palette, bad default).
    InvalidConfig(String),
}

impl MapError {
    /// True when this is a storage error for a file that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MapError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::OutOfRange { x, y } => {
                write!(f, "Tile coordinate {}x{} is outside the tilemap", x, y)
            }
            MapError::CorruptFile(msg) => write!(f, "Corrupt level file: {}", msg),
            MapError::UnknownTile {
                tile,
                x,
                y,
                palette_len,
            } => write!(
                f,
                "Tile overflow {} at location {}x{} (palette has {} entries)",
                tile, x, y, palette_len
            ),
            MapError::Encoding(msg) => write!(f, "Can't encode level: {}", msg),
            MapError::Io { path, source } => {
                write!(f, "I/O error on '{}': {}", path.display(), source)
            }
            MapError::Json { path, source } => {
                write!(f, "Failed to parse JSON in '{}': {}", path.display(), source)
            }
            MapError::UnsupportedFormat(path) => write!(f, "Unsupported file format: {}", path),
            MapError::InvalidConfig(msg) => write!(f, "Invalid editor configuration: {}", msg),
        }
    }
}

impl error::Error for MapError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            MapError::Io { source, .. } => Some(source),
            MapError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
