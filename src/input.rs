//! Input events and the macroquad poller.

pub use macroquad::input::{KeyCode, MouseButton};
use macroquad::math::{vec2, Vec2};

/// Modifier keys held when a key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Either Control key.
    pub ctrl: bool,
    /// Either Shift key.
    pub shift: bool,
    /// Either Alt key.
    pub alt: bool,
}

/// One discrete input event, positions in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed.
    ButtonDown {
        /// Which button.
        button: MouseButton,
        /// Pointer position at the press.
        position: Vec2,
    },
    /// Mouse button released.
    ButtonUp {
        /// Which button.
        button: MouseButton,
        /// Pointer position at the release.
        position: Vec2,
    },
    /// Pointer moved.
    PointerMoved {
        /// New pointer position.
        position: Vec2,
        /// Motion since the previous position.
        delta: Vec2,
    },
    /// Scroll wheel turned.
    Wheel {
        /// Signed scroll amount; positive scrolls up.
        delta: f32,
    },
    /// Key pressed.
    KeyDown {
        /// The key.
        key: KeyCode,
        /// Modifiers held at that moment.
        modifiers: Modifiers,
    },
}

impl InputEvent {
    /// Ctrl + `key` was pressed.
    pub fn is_ctrl_key(&self, key: KeyCode) -> bool {
        matches!(self, InputEvent::KeyDown { key: k, modifiers } if *k == key && modifiers.ctrl)
    }
}

const BUTTONS: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

/// Turns macroquad's per-frame input state into an ordered event list.
///
/// Motion comes first so button and wheel events see the current pointer.
#[derive(Debug, Default)]
pub struct InputPoller {
    last_pointer: Option<Vec2>,
}

impl InputPoller {
    /// Poller that has not seen the pointer yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events since the previous call, in delivery order.
    pub fn poll(&mut self) -> Vec<InputEvent> {
        use macroquad::input::{
            get_keys_pressed, is_key_down, is_mouse_button_pressed, is_mouse_button_released,
            mouse_position, mouse_wheel,
        };

        let mut events = Vec::new();

        let (mx, my) = mouse_position();
        let position = vec2(mx, my);
        let last = self.last_pointer.unwrap_or(position);
        if self.last_pointer.is_none() || last != position {
            events.push(InputEvent::PointerMoved {
                position,
                delta: position - last,
            });
        }
        self.last_pointer = Some(position);

        for button in BUTTONS {
            if is_mouse_button_pressed(button) {
                events.push(InputEvent::ButtonDown { button, position });
            }
            if is_mouse_button_released(button) {
                events.push(InputEvent::ButtonUp { button, position });
            }
        }

        // Wheel units differ per platform; one event is one notch.
        let (_, wheel_y) = mouse_wheel();
        if wheel_y != 0.0 {
            events.push(InputEvent::Wheel {
                delta: wheel_y.signum(),
            });
        }

        let modifiers = Modifiers {
            ctrl: is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl),
            shift: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
            alt: is_key_down(KeyCode::LeftAlt) || is_key_down(KeyCode::RightAlt),
        };
        for key in get_keys_pressed() {
            events.push(InputEvent::KeyDown { key, modifiers });
        }

        events
    }
}
