//! Palette picker panel.

use macroquad::color::Color;
use macroquad::math::{vec2, Rect, Vec2};

use crate::grid::TileId;
use crate::input::InputEvent;
use crate::palette::Palette;
use crate::render::DrawingContext;

/// Size of one palette swatch in screen pixels. Independent of the map's
/// tile size.
pub const SWATCH_SIZE: f32 = 32.0;
/// Swatches per row.
pub const COLUMNS: usize = 4;
/// Panel width in screen pixels.
pub const WIDTH: f32 = SWATCH_SIZE * COLUMNS as f32;

const PANEL_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.5);

/// What the tilebox did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileboxResponse {
    /// Not for the tilebox; the editor should handle it.
    Ignored,
    /// Handled by the tilebox; the editor should not see it.
    Consumed,
    /// Consumed, and the user picked this palette entry.
    Selected(TileId),
}

/// Palette picker docked to the left edge of the window.
#[derive(Debug, Default)]
pub struct Tilebox {
    pointer: Vec2,
    pressed: bool,
}

impl Tilebox {
    /// Tilebox with no button held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Palette slot under a screen point, if the point is on the panel.
    pub fn slot_at(p: Vec2) -> Option<usize> {
        if p.x < 0.0 || p.y < 0.0 || p.x >= WIDTH {
            return None;
        }
        let col = (p.x / SWATCH_SIZE) as usize;
        let row = (p.y / SWATCH_SIZE) as usize;
        Some(col + row * COLUMNS)
    }

    fn swatch_rect(slot: usize) -> Rect {
        let x = (slot % COLUMNS) as f32 * SWATCH_SIZE;
        let y = (slot / COLUMNS) as f32 * SWATCH_SIZE;
        Rect::new(x, y, SWATCH_SIZE, SWATCH_SIZE)
    }

    /// Routes one event; presses inside the panel capture the pointer until
    /// release.
    pub fn event(&mut self, event: &InputEvent, palette: &Palette) -> TileboxResponse {
        match *event {
            InputEvent::ButtonDown { position, .. } => {
                self.pointer = position;
                if position.x < WIDTH {
                    self.pressed = true;
                    return TileboxResponse::Consumed;
                }
                TileboxResponse::Ignored
            }
            InputEvent::ButtonUp { position, .. } => {
                if !self.pressed {
                    return TileboxResponse::Ignored;
                }
                self.pressed = false;
                self.pointer = position;
                match Self::slot_at(position) {
                    Some(slot) if slot < palette.len() => {
                        TileboxResponse::Selected(TileId(slot as u32))
                    }
                    _ => TileboxResponse::Consumed,
                }
            }
            InputEvent::PointerMoved { position, .. } => {
                self.pointer = position;
                if self.pressed {
                    TileboxResponse::Consumed
                } else {
                    TileboxResponse::Ignored
                }
            }
            _ => TileboxResponse::Ignored,
        }
    }

    /// Draws the panel, the swatches and the hover highlight.
    pub fn draw(&self, context: &mut DrawingContext, palette: &Palette) {
        context.draw_filled_rect(Rect::new(0.0, 0.0, WIDTH, context.target_size.y), PANEL_COLOR);

        for (tile, path) in palette.iter() {
            let rect = Self::swatch_rect(tile.as_usize());
            if !path.is_empty() {
                context.draw_texture(path, rect, Color::new(1.0, 1.0, 1.0, 1.0));
            }
            if rect.contains(self.pointer) {
                let o = if self.pressed { 0.5 } else { 0.25 };
                context.draw_filled_rect(rect, Color::new(1.0, 1.0, 1.0, o));
            }
        }
    }

    /// Left edge of the free area to the right of the panel.
    pub fn content_left() -> Vec2 {
        vec2(WIDTH, 0.0)
    }
}
