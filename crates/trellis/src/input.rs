//! The input capability polled by the coordinator.
//!
//! Once per logic tick [`Gui::logic`](crate::Gui::logic) samples the clock
//! of its [`InputSource`] and drains the queued raw events. Events are
//! processed in queue order, so mouse and keyboard input interleave exactly
//! as the platform delivered them.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use trellis_core::Point;

use crate::widget::{Key, KeyboardModifiers, MouseButton};

/// Raw pointer input kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseInputKind {
    Move,
    Down,
    Up,
    Wheel,
}

/// A raw pointer event in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseInput {
    pub kind: MouseInputKind,
    pub position: Point,
    pub button: Option<MouseButton>,
    pub wheel: f32,
    pub modifiers: KeyboardModifiers,
}

impl MouseInput {
    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            kind: MouseInputKind::Move,
            position: Point::new(x, y),
            button: None,
            wheel: 0.0,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    pub fn down(x: f32, y: f32, button: MouseButton) -> Self {
        Self {
            kind: MouseInputKind::Down,
            button: Some(button),
            ..Self::moved(x, y)
        }
    }

    pub fn up(x: f32, y: f32, button: MouseButton) -> Self {
        Self {
            kind: MouseInputKind::Up,
            button: Some(button),
            ..Self::moved(x, y)
        }
    }

    pub fn wheel(x: f32, y: f32, delta: f32) -> Self {
        Self {
            kind: MouseInputKind::Wheel,
            wheel: delta,
            ..Self::moved(x, y)
        }
    }
}

/// Raw keyboard input kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyInputKind {
    Down,
    Up,
    Repeat,
}

/// A raw keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardInput {
    pub kind: KeyInputKind,
    pub key: Key,
    pub character: Option<char>,
    pub modifiers: KeyboardModifiers,
}

impl KeyboardInput {
    pub fn new(kind: KeyInputKind, key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            kind,
            key,
            character: None,
            modifiers,
        }
    }

    /// Attach the text the key produces.
    pub fn with_character(mut self, character: char) -> Self {
        self.character = Some(character);
        self
    }
}

/// One raw input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Mouse(MouseInput),
    Key(KeyboardInput),
}

/// Source of raw input and of the frame clock.
pub trait InputSource {
    /// Seconds since the host started the clock.
    fn elapsed_time(&self) -> f64;

    /// Move every queued event into `out`, oldest first.
    fn poll(&mut self, out: &mut Vec<InputEvent>);
}

#[derive(Debug, Default)]
struct QueuedState {
    events: VecDeque<InputEvent>,
    time: f64,
}

/// A headless input source fed by the host.
///
/// Clones share the same queue and clock, so a test can keep one handle
/// while the coordinator owns another.
///
/// ```
/// use trellis::input::{InputSource, QueuedInput};
///
/// let input = QueuedInput::new();
/// let mut owned = input.clone();
/// input.mouse_move(10.0, 20.0);
/// input.advance(0.25);
///
/// let mut out = Vec::new();
/// owned.poll(&mut out);
/// assert_eq!(out.len(), 1);
/// assert_eq!(owned.elapsed_time(), 0.25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueuedInput {
    state: Rc<RefCell<QueuedState>>,
}

impl QueuedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw event.
    pub fn push(&self, event: InputEvent) {
        self.state.borrow_mut().events.push_back(event);
    }

    pub fn push_mouse(&self, input: MouseInput) {
        self.push(InputEvent::Mouse(input));
    }

    pub fn push_key(&self, input: KeyboardInput) {
        self.push(InputEvent::Key(input));
    }

    pub fn mouse_move(&self, x: f32, y: f32) {
        self.push_mouse(MouseInput::moved(x, y));
    }

    pub fn mouse_down(&self, x: f32, y: f32, button: MouseButton) {
        self.push_mouse(MouseInput::down(x, y, button));
    }

    pub fn mouse_up(&self, x: f32, y: f32, button: MouseButton) {
        self.push_mouse(MouseInput::up(x, y, button));
    }

    /// Queue a press and release of `button` at the same point.
    pub fn click(&self, x: f32, y: f32, button: MouseButton) {
        self.mouse_down(x, y, button);
        self.mouse_up(x, y, button);
    }

    pub fn wheel(&self, x: f32, y: f32, delta: f32) {
        self.push_mouse(MouseInput::wheel(x, y, delta));
    }

    pub fn key_down(&self, key: Key, modifiers: KeyboardModifiers) {
        self.push_key(KeyboardInput::new(KeyInputKind::Down, key, modifiers));
    }

    pub fn key_up(&self, key: Key, modifiers: KeyboardModifiers) {
        self.push_key(KeyboardInput::new(KeyInputKind::Up, key, modifiers));
    }

    pub fn key_repeat(&self, key: Key, modifiers: KeyboardModifiers) {
        self.push_key(KeyboardInput::new(KeyInputKind::Repeat, key, modifiers));
    }

    /// Queue a key down followed by its release.
    pub fn key_press(&self, key: Key, modifiers: KeyboardModifiers) {
        self.key_down(key, modifiers);
        self.key_up(key, modifiers);
    }

    /// Set the clock to an absolute time in seconds.
    pub fn set_time(&self, seconds: f64) {
        self.state.borrow_mut().time = seconds;
    }

    /// Move the clock forward.
    pub fn advance(&self, seconds: f64) {
        self.state.borrow_mut().time += seconds;
    }

    /// Number of events not yet polled.
    pub fn pending(&self) -> usize {
        self.state.borrow().events.len()
    }
}

impl InputSource for QueuedInput {
    fn elapsed_time(&self) -> f64 {
        self.state.borrow().time
    }

    fn poll(&mut self, out: &mut Vec<InputEvent>) {
        out.extend(self.state.borrow_mut().events.drain(..));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_preserves_queue_order() {
        let input = QueuedInput::new();
        let mut source = input.clone();
        input.mouse_move(1.0, 1.0);
        input.key_down(Key::A, KeyboardModifiers::NONE);
        input.mouse_down(1.0, 1.0, MouseButton::Left);

        let mut out = Vec::new();
        source.poll(&mut out);
        assert_eq!(out.len(), 3);
        assert!(matches!(out[0], InputEvent::Mouse(MouseInput { kind: MouseInputKind::Move, .. })));
        assert!(matches!(out[1], InputEvent::Key(KeyboardInput { key: Key::A, .. })));
        assert_eq!(input.pending(), 0);
    }

    #[test]
    fn test_clock_is_shared() {
        let input = QueuedInput::new();
        let source = input.clone();
        input.set_time(1.5);
        input.advance(0.5);
        assert_eq!(source.elapsed_time(), 2.0);
    }
}
