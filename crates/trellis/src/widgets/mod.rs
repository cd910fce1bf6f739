//! Standard widgets for Trellis.
//!
//! - [`ListBox`]: a vertical list of text items with a single selection
//! - [`DropDown`]: a selector that opens a [`ListBox`] popup
//!
//! Both are handles around a [`WidgetId`](crate::widget::WidgetId); their
//! state lives in a behavior attached to the widget node.

mod drop_down;
mod list_box;

pub use drop_down::{
    DEFAULT_MAX_DROP_DOWN_HEIGHT, DropDown, DropDownBehavior, DropDownEvent, DropDownEventKind,
};
pub use list_box::{ListBox, ListBoxBehavior};
