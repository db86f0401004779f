//! Frame driver with staged error recovery.

use log::{debug, error, info};
use macroquad::math::Vec2;

use crate::input::InputEvent;
use crate::render::DrawingContext;
use crate::scene::{Scene, SceneStack};

/// Builds the starting scene. Called once at startup and again whenever
/// recovery has to throw the whole stack away.
pub type SceneFactory = Box<dyn Fn() -> anyhow::Result<Box<dyn Scene>>>;

/// Scene stack plus the per-frame loop state.
pub struct App {
    stack: SceneStack,
    factory: SceneFactory,
    context: DrawingContext,
    timestep: f32,
}

impl App {
    /// Builds the first scene with `factory` and an empty drawing context.
    pub fn new(factory: SceneFactory, timestep: f32, target_size: Vec2) -> anyhow::Result<Self> {
        let initial = factory()?;
        Ok(App {
            stack: SceneStack::new(initial),
            factory,
            context: DrawingContext::new(target_size),
            timestep,
        })
    }

    /// False once the last scene has left the stack.
    pub fn is_running(&self) -> bool {
        !self.stack.is_empty()
    }

    /// The scene stack.
    pub fn stack(&self) -> &SceneStack {
        &self.stack
    }

    /// Draw calls recorded by the last successful frame.
    pub fn context(&self) -> &DrawingContext {
        &self.context
    }

    /// Runs one frame: events to the top scene, one fixed-step update, then
    /// a fresh draw into the context.
    pub fn frame(&mut self, events: &[InputEvent], target_size: Vec2) -> anyhow::Result<()> {
        for event in events {
            self.stack.event(event)?;
        }
        self.stack.update(self.timestep)?;

        self.context.clear();
        self.context.target_size = target_size;
        self.stack.draw(&mut self.context);
        Ok(())
    }

    fn retry(&mut self, step: &str) -> bool {
        let target = self.context.target_size;
        match self.frame(&[], target) {
            Ok(()) => {
                info!("Recovered after {}", step);
                true
            }
            Err(e) => {
                debug!("Frame still failing after {}: {:#}", step, e);
                false
            }
        }
    }

    /// Tries progressively harsher fixes after a failed frame. Returns false
    /// if none of them produced a working frame.
    pub fn recover(&mut self) -> bool {
        if self.retry("retrying the frame") {
            return true;
        }

        self.context = DrawingContext::new(self.context.target_size);
        if self.retry("resetting the drawing context") {
            return true;
        }

        if self.stack.len() > 1 {
            self.stack.pop();
            if self.retry("popping the top scene") {
                return true;
            }
        }

        match (self.factory)() {
            Ok(scene) => {
                self.stack.reset(scene);
                if self.retry("rebuilding the scene stack") {
                    return true;
                }
            }
            Err(e) => error!("Can't rebuild the starting scene: {:#}", e),
        }

        error!("Recovery failed");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneAction;
    use macroquad::math::vec2;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Fails its first `failures` updates.
    struct Flaky {
        failures: Rc<Cell<u32>>,
    }

    impl Scene for Flaky {
        fn event(&mut self, _event: &InputEvent) -> anyhow::Result<()> {
            Ok(())
        }

        fn update(&mut self, _dt_sec: f32) -> anyhow::Result<SceneAction> {
            let left = self.failures.get();
            if left > 0 {
                self.failures.set(left - 1);
                anyhow::bail!("flaky scene failed");
            }
            Ok(SceneAction::None)
        }

        fn draw(&self, _context: &mut DrawingContext) {}
    }

    fn app(failures: u32) -> App {
        let failures = Rc::new(Cell::new(failures));
        let factory: SceneFactory = Box::new(move || {
            Ok(Box::new(Flaky {
                failures: failures.clone(),
            }) as Box<dyn Scene>)
        });
        App::new(factory, 0.01, vec2(640.0, 480.0)).unwrap()
    }

    #[test]
    fn transient_failure_recovers_on_retry() {
        let mut app = app(1);
        assert!(app.frame(&[], vec2(640.0, 480.0)).is_err());
        assert!(app.recover());
        assert!(app.is_running());
    }

    #[test]
    fn broken_overlay_is_popped() {
        let mut app = app(0);
        app.stack.push(Box::new(Flaky {
            failures: Rc::new(Cell::new(u32::MAX)),
        }));
        assert!(app.frame(&[], vec2(640.0, 480.0)).is_err());
        assert!(app.recover());
        assert_eq!(app.stack().len(), 1);
    }

    #[test]
    fn persistent_failure_gives_up() {
        let mut app = app(u32::MAX);
        assert!(app.frame(&[], vec2(640.0, 480.0)).is_err());
        assert!(!app.recover());
    }
}
