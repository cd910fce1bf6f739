//! Core value types for Trellis.
//!
//! This crate provides the pieces of the Trellis widget toolkit that do not
//! depend on the widget tree itself:
//!
//! - **Geometry**: points, sizes, rectangles, margins and colors
//! - **Errors**: tree and configuration error types
//! - **Logging**: tracing targets, span names and tree formatting options
//! - **Observers**: listener lists with subscription tokens
//!
//! # Example
//!
//! ```
//! use trellis_core::{Margins, Point, Rect};
//!
//! let bounds = Rect::new(10.0, 10.0, 100.0, 40.0);
//! let inner = bounds.inset(Margins::uniform(2.0));
//! assert!(inner.contains(Point::new(12.0, 12.0)));
//! assert!(!inner.contains(Point::new(11.0, 12.0)));
//! ```

pub mod error;
pub mod geometry;
pub mod logging;
pub mod observer;

pub use error::{ConfigError, ConfigResult, TreeError};
pub use geometry::{Color, Margins, Point, Rect, Side, Size};
pub use logging::{TreeFormatOptions, TreeStyle, span_names, targets};
pub use observer::{Consumable, ListenerFn, ListenerId, ListenerSnapshot, Observers, dispatch};

static_assertions::assert_not_impl_any!(Observers<(), ()>: Send, Sync);
static_assertions::assert_impl_all!(ListenerId: Send, Sync, Copy);
