use macroquad::color::Color;
use macroquad::math::{Rect, Vec2};

/// One recorded draw request, already in screen space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Solid rectangle.
    FilledRect {
        /// Area to fill.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Straight line segment.
    Line {
        /// Start point.
        from: Vec2,
        /// End point.
        to: Vec2,
        /// Line width in pixels.
        thickness: f32,
        /// Line color.
        color: Color,
    },
    /// Whole texture stretched over `dest`.
    Texture {
        /// Logical path of the image.
        path: String,
        /// Destination rectangle.
        dest: Rect,
        /// Color multiplied into the texture.
        tint: Color,
    },
    /// Text with its top-left corner at `pos`.
    Text {
        /// The string to draw.
        text: String,
        /// Top-left corner.
        pos: Vec2,
        /// Font size in pixels.
        size: f32,
        /// Text color.
        color: Color,
    },
}
