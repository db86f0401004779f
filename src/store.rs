//! Byte-stream file access keyed by logical `/`-separated paths.

use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::MapError;

/// Reads and writes whole files by logical path.
pub trait FileStore {
    /// Whole contents of the file at `path`.
    fn read(&self, path: &str) -> Result<Vec<u8>, MapError>;
    /// Replaces the file at `path`, creating parent directories as needed.
    fn write(&mut self, path: &str, bytes: &[u8]) -> Result<(), MapError>;
}

fn io_err(path: &str, kind: io::ErrorKind, msg: &str) -> MapError {
    MapError::Io {
        path: PathBuf::from(path),
        source: io::Error::new(kind, msg.to_owned()),
    }
}

/// Turns a logical path into a relative filesystem path, refusing anything
/// that would escape a mount point.
fn relative(path: &str) -> Result<PathBuf, MapError> {
    let rel = Path::new(path.trim_start_matches('/'));
    let mut out = PathBuf::new();
    for comp in rel.components() {
        match comp {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            _ => {
                return Err(io_err(
                    path,
                    io::ErrorKind::InvalidInput,
                    "path leaves the mounted directories",
                ))
            }
        }
    }
    if out.as_os_str().is_empty() {
        return Err(io_err(path, io::ErrorKind::InvalidInput, "empty path"));
    }
    Ok(out)
}

/// Directory search path for reads plus an optional write directory.
///
/// Reads try the mounts in order; the write directory, when set, is also
/// mounted first so saved files shadow shipped data.
#[derive(Debug, Clone, Default)]
pub struct MountedStore {
    mounts: Vec<PathBuf>,
    write_dir: Option<PathBuf>,
}

impl MountedStore {
    /// A store with no mounts and no write directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a read-only directory to the search path.
    pub fn mount(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.mounts.push(dir.into());
        self
    }

    /// Sets the writable directory and puts it at the front of the search path.
    pub fn set_write_dir(&mut self, dir: impl Into<PathBuf>) -> Result<&mut Self, MapError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| MapError::Io {
            path: dir.clone(),
            source,
        })?;
        self.mounts.retain(|m| m != &dir);
        self.mounts.insert(0, dir.clone());
        self.write_dir = Some(dir);
        Ok(self)
    }

    /// Read search path, first match wins.
    pub fn mounts(&self) -> &[PathBuf] {
        &self.mounts
    }

    /// Directory writes go to, if one is set.
    pub fn write_dir(&self) -> Option<&Path> {
        self.write_dir.as_deref()
    }
}

impl FileStore for MountedStore {
    fn read(&self, path: &str) -> Result<Vec<u8>, MapError> {
        let rel = relative(path)?;
        for dir in &self.mounts {
            let full = dir.join(&rel);
            match std::fs::read(&full) {
                Ok(bytes) => return Ok(bytes),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(source) => return Err(MapError::Io { path: full, source }),
            }
        }
        Err(io_err(path, io::ErrorKind::NotFound, "file not found in any mount"))
    }

    fn write(&mut self, path: &str, bytes: &[u8]) -> Result<(), MapError> {
        let rel = relative(path)?;
        let dir = self.write_dir.as_ref().ok_or_else(|| {
            io_err(path, io::ErrorKind::PermissionDenied, "no write directory set")
        })?;
        let full = dir.join(rel);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).map_err(|source| MapError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&full, bytes).map_err(|source| MapError::Io { path: full, source })
    }
}

/// In-memory store, mostly for tests and tooling.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(path: &str) -> String {
        format!("/{}", path.trim_start_matches('/'))
    }

    /// Stores `bytes` under `path`, replacing any previous file.
    pub fn insert(&mut self, path: &str, bytes: Vec<u8>) {
        self.files.insert(Self::key(path), bytes);
    }

    /// Stored bytes for `path`, if any.
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(&Self::key(path)).map(Vec::as_slice)
    }
}

impl FileStore for MemoryStore {
    fn read(&self, path: &str) -> Result<Vec<u8>, MapError> {
        self.get(path)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| io_err(path, io::ErrorKind::NotFound, "file not found"))
    }

    fn write(&mut self, path: &str, bytes: &[u8]) -> Result<(), MapError> {
        self.insert(path, bytes.to_vec());
        Ok(())
    }
}
