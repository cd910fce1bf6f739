//! Trellis - a small retained-mode widget toolkit.
//!
//! Widgets live in an arena owned by a [`Gui`]. The host feeds input through
//! an [`InputSource`](input::InputSource) and receives drawing commands
//! through a [`Graphics`](graphics::Graphics) backend, so Trellis itself
//! never touches a window system.
//!
//! The [`Gui`] turns raw input into semantic events (enter, leave, click,
//! double click, hover, modal presses), manages keyboard focus, tabbing and
//! modal capture, and defers widget destruction through a flag-and-sweep
//! queue. Containers can be given a [`LayoutPolicy`](layout::LayoutPolicy)
//! such as [`FlowLayout`](layout::FlowLayout).
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut gui = Gui::new(Size::new(200.0, 100.0));
//! let flow = gui.create_layout(FlowLayout::new());
//! gui.set_size(flow, Size::new(200.0, 100.0));
//! gui.add(flow);
//!
//! let list = ListBox::new(&mut gui);
//! gui.set_size(list.id(), Size::new(60.0, 20.0));
//! gui.add_child(flow, list.id());
//!
//! let mut graphics = RecordingGraphics::new();
//! gui.render_with(&mut graphics);
//! assert_eq!(graphics.clip_depth(), 0);
//! ```

pub mod config;
pub mod graphics;
pub mod gui;
pub mod input;
pub mod layout;
pub mod prelude;
pub mod widget;
pub mod widgets;

pub use config::GuiConfig;
pub use gui::Gui;
pub use trellis_core::{
    Color, ConfigError, ConfigResult, Consumable, ListenerId, Margins, Point, Rect, Size,
    TreeError,
};
