//! Smoothed pan/zoom camera.

use crate::render::DrawingContext;
use macroquad::math::{vec2, Vec2};

/// Smallest target zoom.
pub const MIN_ZOOM: f32 = 0.5;
/// Largest target zoom.
pub const MAX_ZOOM: f32 = 2.0;
/// Zoom change per wheel notch.
pub const WHEEL_ZOOM_STEP: f32 = 1.0 / 8.0;
/// Remaining distance to the target is divided by this every second.
pub const DEFAULT_DECAY_RATE: f32 = 1.0e24;

/// Pan/zoom camera for the editor view.
///
/// Input moves the *target* position and zoom immediately; the *displayed*
/// values, used for drawing and coordinate conversion, follow them with
/// exponential decay in [`EditorCamera::advance`]. Screen space relates to
/// world space by `screen = world * zoom + position`.
#[derive(Debug, Clone)]
pub struct EditorCamera {
    position: Vec2,
    zoom: f32,
    target_position: Vec2,
    target_zoom: f32,
    decay_rate: f32,
    dragging: bool,
    pointer: Vec2,
}

impl EditorCamera {
    /// Smoothed camera with the given decay rate (must be > 1).
    pub fn new(decay_rate: f32) -> Self {
        EditorCamera {
            position: Vec2::ZERO,
            zoom: 1.0,
            target_position: Vec2::ZERO,
            target_zoom: 1.0,
            decay_rate,
            dragging: false,
            pointer: Vec2::ZERO,
        }
    }

    /// Camera whose displayed values always equal its targets.
    pub fn instant() -> Self {
        Self::new(f32::INFINITY)
    }

    /// Whether displayed values always equal the targets.
    pub fn is_instant(&self) -> bool {
        self.decay_rate.is_infinite()
    }

    /// Displayed pan offset in screen pixels.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Displayed zoom factor.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Pan offset the camera is moving towards.
    pub fn target_position(&self) -> Vec2 {
        self.target_position
    }

    /// Zoom the camera is moving towards, within `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn target_zoom(&self) -> f32 {
        self.target_zoom
    }

    /// Whether pointer motion currently pans.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Last pointer position seen by [`EditorCamera::pointer_moved`].
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Starts panning with subsequent pointer motion.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Stops panning.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Tracks the pointer and, while dragging, pans by `delta` screen pixels.
    pub fn pointer_moved(&mut self, position: Vec2, delta: Vec2) {
        self.pointer = position;
        if self.dragging {
            self.target_position += delta;
            self.settle_if_instant();
        }
    }

    /// Changes the target zoom by `wheel_delta / 8`, keeping the world point
    /// under `pivot` in place.
    pub fn zoom_by(&mut self, wheel_delta: f32, pivot: Vec2) {
        if wheel_delta == 0.0 {
            return;
        }
        let old_zoom = self.target_zoom;
        let new_zoom = (old_zoom + wheel_delta * WHEEL_ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
        self.target_zoom = new_zoom;
        self.target_position = pivot - (pivot - self.target_position) * new_zoom / old_zoom;
        self.settle_if_instant();
    }

    /// Moves displayed values towards the targets for `dt_sec` seconds.
    pub fn advance(&mut self, dt_sec: f32) {
        if dt_sec <= 0.0 {
            return;
        }
        let remaining = (-self.decay_rate.ln() * dt_sec).exp();
        self.position = self.target_position + (self.position - self.target_position) * remaining;
        self.zoom = self.target_zoom + (self.zoom - self.target_zoom) * remaining;
    }

    /// Snaps displayed values onto the targets.
    pub fn settle(&mut self) {
        self.position = self.target_position;
        self.zoom = self.target_zoom;
    }

    fn settle_if_instant(&mut self) {
        if self.is_instant() {
            self.settle();
        }
    }

    /// Screen pixel to world units, using the displayed values.
    pub fn screen_to_world(&self, p: Vec2) -> Vec2 {
        (p - self.position) / self.zoom
    }

    /// World units to screen pixel, using the displayed values.
    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        p * self.zoom + self.position
    }

    /// Makes subsequent draws use world coordinates.
    pub fn apply_transform(&self, context: &mut DrawingContext) {
        let t = context.transform_mut();
        t.translate(self.position);
        t.scale(vec2(self.zoom, self.zoom));
    }
}

impl Default for EditorCamera {
    fn default() -> Self {
        Self::new(DEFAULT_DECAY_RATE)
    }
}
