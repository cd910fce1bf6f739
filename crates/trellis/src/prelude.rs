//! Prelude module for Trellis.
//!
//! ```
//! use trellis::prelude::*;
//! ```
//!
//! Brings in the coordinator, the widget foundation, the event types, the
//! standard widgets, layouts and the geometry types.

// ============================================================================
// Coordinator
// ============================================================================

pub use crate::config::GuiConfig;
pub use crate::gui::Gui;

// ============================================================================
// Widget Foundation
// ============================================================================

pub use crate::widget::{PaintContext, TreeDebug, WidgetBehavior, WidgetId, WidgetNode};

// ============================================================================
// Events
// ============================================================================

pub use crate::widget::{
    ActionEvent, FocusEvent, FocusEventKind, Key, KeyBinding, KeyEvent, KeyEventKind,
    KeyboardModifiers, MouseButton, MouseEvent, MouseEventKind, SelectionEvent, WidgetEvent,
    WidgetNotification,
};
pub use trellis_core::{Consumable, ListenerId};

// ============================================================================
// Widgets and Layouts
// ============================================================================

pub use crate::layout::{FlowLayout, LayoutPolicy};
pub use crate::widgets::{DropDown, DropDownEvent, DropDownEventKind, ListBox};

// ============================================================================
// Host Capabilities
// ============================================================================

pub use crate::graphics::{DrawCommand, Font, Graphics, RecordingGraphics};
pub use crate::input::{InputEvent, InputSource, QueuedInput};

// ============================================================================
// Geometry
// ============================================================================

pub use trellis_core::{Color, Margins, Point, Rect, Size};
