//! Widget-specific event types.
//!
//! The coordinator turns raw input into the semantic events defined here and
//! hands them to widget behaviors and listeners. Every event can be consumed,
//! which stops delivery to the remaining listeners of that dispatch.
//!
//! - [`MouseEvent`]: pointer movement, buttons, clicks, hover and modal presses
//! - [`KeyEvent`]: key down, up and repeat
//! - [`FocusEvent`]: focus gained or lost
//! - [`WidgetEvent`]: geometry, structure and lifecycle notifications
//! - [`ActionEvent`] and [`SelectionEvent`]: emitted by concrete widgets

use serde::{Deserialize, Serialize};
use trellis_core::{Consumable, Point, Size};

use super::tree::WidgetId;

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held.
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button (scroll wheel click).
    Middle,
    /// Any other button, by platform index.
    Other(u16),
}

/// Keyboard key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Insert,
    Enter, Tab, Space, Escape,

    // Modifiers
    Shift, Control, Alt, Meta,

    /// Unmapped key, by platform scan code.
    Unknown(u16),
}

impl Key {
    /// Check if this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Shift | Key::Control | Key::Alt | Key::Meta)
    }

    /// Check if this is a navigation key.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp
                | Key::ArrowDown
                | Key::ArrowLeft
                | Key::ArrowRight
                | Key::Home
                | Key::End
                | Key::PageUp
                | Key::PageDown
        )
    }
}

/// A key plus the exact modifier set that must be held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: Key,
    #[serde(default)]
    pub modifiers: KeyboardModifiers,
}

impl KeyBinding {
    /// Create a binding.
    pub const fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self { key, modifiers }
    }

    /// Whether a key press matches this binding.
    pub fn matches(&self, key: Key, modifiers: KeyboardModifiers) -> bool {
        self.key == key && self.modifiers == modifiers
    }
}

/// The kind of a [`MouseEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Move,
    Down,
    Up,
    Wheel,
    /// The pointer entered the widget.
    Enter,
    /// The pointer left the widget.
    Leave,
    /// Press and release on the same widget with the same button.
    Click,
    /// Second click inside the double-click interval.
    DoubleClick,
    /// The pointer rested on the widget for the hover interval.
    Hover,
    /// A press outside the modal widget, delivered to the modal widget.
    ModalDown,
    /// A release outside the modal widget, delivered to the modal widget.
    ModalUp,
}

/// A semantic mouse event delivered to one widget.
#[derive(Debug, Clone)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    /// The widget receiving the event.
    pub source: WidgetId,
    /// Pointer position relative to the widget's origin.
    pub position: Point,
    /// Pointer position in absolute coordinates.
    pub absolute_position: Point,
    pub button: Option<MouseButton>,
    /// Wheel delta, positive away from the user.
    pub wheel: f32,
    pub modifiers: KeyboardModifiers,
    consumed: bool,
}

impl MouseEvent {
    /// Create a mouse event.
    pub fn new(
        kind: MouseEventKind,
        source: WidgetId,
        position: Point,
        absolute_position: Point,
        button: Option<MouseButton>,
    ) -> Self {
        Self {
            kind,
            source,
            position,
            absolute_position,
            button,
            wheel: 0.0,
            modifiers: KeyboardModifiers::NONE,
            consumed: false,
        }
    }

    /// Set the wheel delta.
    pub fn with_wheel(mut self, wheel: f32) -> Self {
        self.wheel = wheel;
        self
    }

    /// Set the held modifiers.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this is a left-button event.
    pub fn is_left(&self) -> bool {
        self.button == Some(MouseButton::Left)
    }
}

/// The kind of a [`KeyEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    Down,
    Up,
    /// Auto-repeat while the key is held. Only the input source produces it.
    Repeat,
}

/// A keyboard event.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    /// The receiving widget; `None` while key-preview listeners run.
    pub source: Option<WidgetId>,
    pub key: Key,
    /// Text produced by the key, if any.
    pub character: Option<char>,
    pub modifiers: KeyboardModifiers,
    consumed: bool,
}

impl KeyEvent {
    /// Create a key event.
    pub fn new(
        kind: KeyEventKind,
        key: Key,
        character: Option<char>,
        modifiers: KeyboardModifiers,
    ) -> Self {
        Self {
            kind,
            source: None,
            key,
            character,
            modifiers,
            consumed: false,
        }
    }

    /// Down or repeat.
    pub fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Down | KeyEventKind::Repeat)
    }
}

/// Focus gained or lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusEventKind {
    Gained,
    Lost,
}

/// A focus notification.
#[derive(Debug, Clone)]
pub struct FocusEvent {
    pub kind: FocusEventKind,
    pub source: WidgetId,
    consumed: bool,
}

impl FocusEvent {
    pub fn new(kind: FocusEventKind, source: WidgetId) -> Self {
        Self {
            kind,
            source,
            consumed: false,
        }
    }
}

/// Geometry, structure and lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetNotification {
    SizeChanged { old: Size, new: Size },
    LocationChanged { old: Point, new: Point },
    /// The parent's size changed.
    ParentSizeChanged,
    VisibilityChanged(bool),
    EnabledChanged(bool),
    ChildAdded(WidgetId),
    ChildRemoved(WidgetId),
    /// The widget's subtree became reachable from the desktop root.
    AddedToTree,
    FontChanged,
    TextChanged,
    /// Sent once, right before the widget is destroyed.
    Destroyed,
}

/// A [`WidgetNotification`] delivered to one widget.
#[derive(Debug, Clone)]
pub struct WidgetEvent {
    pub source: WidgetId,
    pub notification: WidgetNotification,
    consumed: bool,
}

impl WidgetEvent {
    pub fn new(source: WidgetId, notification: WidgetNotification) -> Self {
        Self {
            source,
            notification,
            consumed: false,
        }
    }
}

/// A widget performed its primary action.
#[derive(Debug, Clone)]
pub struct ActionEvent {
    pub source: WidgetId,
    consumed: bool,
}

impl ActionEvent {
    pub fn new(source: WidgetId) -> Self {
        Self {
            source,
            consumed: false,
        }
    }
}

/// The selected item of a widget was set.
#[derive(Debug, Clone)]
pub struct SelectionEvent {
    pub source: WidgetId,
    /// The new selection, `None` when cleared.
    pub index: Option<usize>,
    consumed: bool,
}

impl SelectionEvent {
    pub fn new(source: WidgetId, index: Option<usize>) -> Self {
        Self {
            source,
            index,
            consumed: false,
        }
    }
}

macro_rules! impl_consumable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Consumable for $ty {
                fn is_consumed(&self) -> bool {
                    self.consumed
                }

                fn consume(&mut self) {
                    self.consumed = true;
                }
            }
        )*
    };
}

impl_consumable!(
    MouseEvent,
    KeyEvent,
    FocusEvent,
    WidgetEvent,
    ActionEvent,
    SelectionEvent,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_binding_requires_exact_modifiers() {
        let binding = KeyBinding::new(Key::Tab, KeyboardModifiers::SHIFT);
        assert!(binding.matches(Key::Tab, KeyboardModifiers::SHIFT));
        assert!(!binding.matches(Key::Tab, KeyboardModifiers::NONE));
        let ctrl_shift = KeyboardModifiers {
            shift: true,
            control: true,
            ..KeyboardModifiers::NONE
        };
        assert!(!binding.matches(Key::Tab, ctrl_shift));
    }

    #[test]
    fn test_key_press_kinds() {
        let down = KeyEvent::new(KeyEventKind::Down, Key::A, Some('a'), KeyboardModifiers::NONE);
        let repeat = KeyEvent::new(KeyEventKind::Repeat, Key::A, Some('a'), KeyboardModifiers::NONE);
        let up = KeyEvent::new(KeyEventKind::Up, Key::A, None, KeyboardModifiers::NONE);
        assert!(down.is_press());
        assert!(repeat.is_press());
        assert!(!up.is_press());
    }

    #[test]
    fn test_consume_event() {
        let mut event = ActionEvent::new(WidgetId::default());
        assert!(!event.is_consumed());
        event.consume();
        assert!(event.is_consumed());
    }

    #[test]
    fn test_modifiers() {
        assert!(KeyboardModifiers::NONE.none());
        assert!(KeyboardModifiers::ALT.any());
        assert!(Key::Home.is_navigation());
        assert!(Key::Shift.is_modifier());
        assert!(!Key::Enter.is_navigation());
    }
}
