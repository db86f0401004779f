//! Drawing context: records draw requests under a translate/scale transform
//! stack. The macroquad backend replays the recorded commands.

/// Macroquad replay of recorded commands.
pub mod backend;
mod command;

pub use command::DrawCommand;

use macroquad::color::Color;
use macroquad::math::{vec2, Rect, Vec2};

/// 2D affine transform limited to translation and per-axis scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation applied after scaling.
    pub offset: Vec2,
    /// Per-axis scale.
    pub scale: Vec2,
}

impl Transform {
    /// No translation, unit scale.
    pub const IDENTITY: Transform = Transform {
        offset: Vec2::ZERO,
        scale: Vec2::ONE,
    };

    /// Moves the local origin by `v`, measured in local units.
    pub fn translate(&mut self, v: Vec2) {
        self.offset += v * self.scale;
    }

    /// Scales subsequent coordinates by `s`.
    pub fn scale(&mut self, s: Vec2) {
        self.scale *= s;
    }

    /// Maps a local point to screen space.
    pub fn apply(&self, p: Vec2) -> Vec2 {
        p * self.scale + self.offset
    }

    /// Maps a local rectangle to screen space.
    pub fn apply_rect(&self, r: Rect) -> Rect {
        let p = self.apply(vec2(r.x, r.y));
        Rect::new(p.x, p.y, r.w * self.scale.x, r.h * self.scale.y)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

/// Collects one frame of draw requests.
pub struct DrawingContext {
    /// Size of the render target in screen pixels.
    pub target_size: Vec2,
    transform: Transform,
    stack: Vec<Transform>,
    commands: Vec<DrawCommand>,
}

impl DrawingContext {
    /// Empty context for a target of `target_size` pixels.
    pub fn new(target_size: Vec2) -> Self {
        DrawingContext {
            target_size,
            transform: Transform::IDENTITY,
            stack: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Current transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Current transform, for camera setup.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Saves the current transform.
    pub fn push_transform(&mut self) {
        self.stack.push(self.transform);
    }

    /// Restores the transform saved by the matching push. An unbalanced pop
    /// resets to identity.
    pub fn pop_transform(&mut self) {
        self.transform = self.stack.pop().unwrap_or(Transform::IDENTITY);
    }

    /// Records a filled rectangle.
    pub fn draw_filled_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.transform.apply_rect(rect);
        self.commands.push(DrawCommand::FilledRect { rect, color });
    }

    /// Records a one-pixel line.
    pub fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line {
            from: self.transform.apply(from),
            to: self.transform.apply(to),
            thickness: 1.0,
            color,
        });
    }

    /// Records the texture at `path` stretched over `dest`.
    pub fn draw_texture(&mut self, path: &str, dest: Rect, tint: Color) {
        let dest = self.transform.apply_rect(dest);
        self.commands.push(DrawCommand::Texture {
            path: path.to_owned(),
            dest,
            tint,
        });
    }

    /// Text is positioned by its top-left corner and is not scaled.
    pub fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            pos: self.transform.apply(pos),
            size,
            color,
        });
    }

    /// Commands recorded since the last clear, in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drops recorded commands and any leftover transforms.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.stack.clear();
        self.transform = Transform::IDENTITY;
    }
}
