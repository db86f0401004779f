//! Replays recorded [`DrawCommand`]s through macroquad.

use std::collections::HashMap;

use log::{debug, warn};
use macroquad::prelude::*;

use super::{DrawCommand, DrawingContext};
use crate::error::MapError;
use crate::store::FileStore;

const PLACEHOLDER: Color = Color::new(1.0, 0.0, 1.0, 0.5);

/// Draws frames with macroquad, loading tile textures lazily from `S`.
pub struct MacroquadBackend<S: FileStore> {
    store: S,
    /// `None` marks a path that failed to load, so it is reported once.
    textures: HashMap<String, Option<Texture2D>>,
}

impl<S: FileStore> MacroquadBackend<S> {
    /// Backend that loads textures from `store`.
    pub fn new(store: S) -> Self {
        MacroquadBackend {
            store,
            textures: HashMap::new(),
        }
    }

    /// Clears the screen and draws every command in `context`.
    pub fn render(&mut self, context: &DrawingContext) {
        clear_background(BLACK);
        for cmd in context.commands() {
            match cmd {
                DrawCommand::FilledRect { rect, color } => {
                    draw_rectangle(rect.x, rect.y, rect.w, rect.h, *color);
                }
                DrawCommand::Line {
                    from,
                    to,
                    thickness,
                    color,
                } => draw_line(from.x, from.y, to.x, to.y, *thickness, *color),
                DrawCommand::Texture { path, dest, tint } => match self.texture(path) {
                    Some(tex) => draw_texture_ex(
                        &tex,
                        dest.x,
                        dest.y,
                        *tint,
                        DrawTextureParams {
                            dest_size: Some(vec2(dest.w, dest.h)),
                            ..Default::default()
                        },
                    ),
                    None => draw_rectangle(dest.x, dest.y, dest.w, dest.h, PLACEHOLDER),
                },
                DrawCommand::Text {
                    text,
                    pos,
                    size,
                    color,
                } => {
                    // macroquad positions text by its baseline.
                    let dims = measure_text(text, None, *size as u16, 1.0);
                    draw_text(text, pos.x, pos.y + dims.offset_y, *size, *color);
                }
            }
        }
    }

    fn texture(&mut self, path: &str) -> Option<Texture2D> {
        if let Some(cached) = self.textures.get(path) {
            return cached.clone();
        }
        let loaded = match load_texture_from(&self.store, path) {
            Ok(tex) => {
                debug!("Loaded texture '{}'", path);
                Some(tex)
            }
            Err(e) => {
                warn!("Can't load texture '{}': {}", path, e);
                None
            }
        };
        self.textures.insert(path.to_owned(), loaded.clone());
        loaded
    }
}

fn load_texture_from<S: FileStore>(store: &S, path: &str) -> Result<Texture2D, MapError> {
    let bytes = store.read(path)?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| MapError::CorruptFile(format!("{}: {}", path, e)))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    let (w, h) = match (u16::try_from(w), u16::try_from(h)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(MapError::CorruptFile(format!(
                "{}: {}x{} is too large for a texture",
                path, w, h
            )))
        }
    };
    let tex = Texture2D::from_rgba8(w, h, img.as_raw());
    tex.set_filter(FilterMode::Nearest);
    Ok(tex)
}
