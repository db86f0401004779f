//! Scene stack.

use crate::input::InputEvent;
use crate::render::DrawingContext;

/// What the top scene wants done with the stack after an update.
pub enum SceneAction {
    /// Keep the stack as it is.
    None,
    /// Put a scene on top.
    Push(Box<dyn Scene>),
    /// Remove the top scene.
    Pop,
    /// Replace the top scene.
    Switch(Box<dyn Scene>),
    /// Remove every scene.
    Quit,
}

/// One screen of the application. Only the top scene of a [`SceneStack`]
/// receives events and updates.
pub trait Scene {
    /// Handles one input event.
    fn event(&mut self, event: &InputEvent) -> anyhow::Result<()>;
    /// Advances by `dt_sec` seconds and says what the stack should do next.
    fn update(&mut self, dt_sec: f32) -> anyhow::Result<SceneAction>;
    /// Records this scene's draw calls.
    fn draw(&self, context: &mut DrawingContext);
    /// Transparent scenes let the scene below them draw too.
    fn is_transparent(&self) -> bool {
        false
    }
}

/// Owned stack of scenes. Only the top scene receives events and updates.
#[derive(Default)]
pub struct SceneStack {
    scenes: Vec<Box<dyn Scene>>,
}

impl SceneStack {
    /// Stack holding only `initial`.
    pub fn new(initial: Box<dyn Scene>) -> Self {
        Self {
            scenes: vec![initial],
        }
    }

    /// True once every scene has left.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Number of stacked scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Puts `scene` on top.
    pub fn push(&mut self, scene: Box<dyn Scene>) {
        self.scenes.push(scene);
    }

    /// Removes and returns the top scene.
    pub fn pop(&mut self) -> Option<Box<dyn Scene>> {
        self.scenes.pop()
    }

    /// Removes every scene.
    pub fn quit(&mut self) {
        self.scenes.clear();
    }

    /// Replaces the whole stack with `scene`.
    pub fn reset(&mut self, scene: Box<dyn Scene>) {
        self.scenes.clear();
        self.scenes.push(scene);
    }

    /// Forwards `event` to the top scene.
    pub fn event(&mut self, event: &InputEvent) -> anyhow::Result<()> {
        match self.scenes.last_mut() {
            Some(top) => top.event(event),
            None => Ok(()),
        }
    }

    /// Updates the top scene and applies the action it returns.
    pub fn update(&mut self, dt_sec: f32) -> anyhow::Result<()> {
        let action = match self.scenes.last_mut() {
            Some(top) => top.update(dt_sec)?,
            None => return Ok(()),
        };

        match action {
            SceneAction::None => {}
            SceneAction::Push(s) => self.scenes.push(s),
            SceneAction::Pop => {
                self.scenes.pop();
            }
            SceneAction::Switch(s) => {
                self.scenes.pop();
                self.scenes.push(s);
            }
            SceneAction::Quit => self.quit(),
        }
        Ok(())
    }

    /// Draws from the topmost opaque scene upwards.
    pub fn draw(&self, context: &mut DrawingContext) {
        let start = self
            .scenes
            .iter()
            .rposition(|s| !s.is_transparent())
            .unwrap_or(0);
        for scene in &self.scenes[start..] {
            scene.draw(context);
        }
    }
}
