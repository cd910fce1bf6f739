//! The widget model.
//!
//! Widgets live in an arena ([`WidgetTree`]) owned by the
//! [`Gui`](crate::Gui) and are addressed by copyable [`WidgetId`] handles.
//! A handle to a destroyed widget simply stops resolving.
//!
//! - [`WidgetNode`]: the state every widget has (geometry, flags, appearance,
//!   listeners)
//! - [`WidgetBehavior`]: optional kind-specific paint and event hooks
//! - [`FocusManager`]: focus and modal references plus tab order
//! - [`TreeDebug`]: tree dumps for logging
//!
//! # Creating a Widget
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut gui = Gui::new(Size::new(320.0, 240.0));
//! let panel = gui.create_widget();
//! gui.set_bounds(panel, Rect::new(10.0, 10.0, 100.0, 60.0));
//! gui.set_margins(panel, Margins::uniform(4.0));
//! gui.add(panel);
//!
//! let label = gui.create_widget();
//! gui.set_location(label, Point::new(2.0, 2.0));
//! gui.add_child(panel, label);
//!
//! // Children are placed inside the parent's margins.
//! assert_eq!(gui.absolute_position(label), Some(Point::new(16.0, 16.0)));
//! ```

mod base;
mod debug;
mod events;
mod focus;
mod listeners;
mod traits;
mod tree;

#[cfg(test)]
mod tests;

pub use base::WidgetNode;
pub use debug::TreeDebug;
pub use events::{
    ActionEvent, FocusEvent, FocusEventKind, Key, KeyBinding, KeyEvent, KeyEventKind,
    KeyboardModifiers, MouseButton, MouseEvent, MouseEventKind, SelectionEvent, WidgetEvent,
    WidgetNotification,
};
pub use focus::FocusManager;
pub use listeners::{ListenedEvent, WidgetListeners};
pub use traits::{AsAny, PaintContext, WidgetBehavior};
pub use tree::{WidgetId, WidgetTree};
