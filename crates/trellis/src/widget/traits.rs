//! Widget behavior and painting contracts.
//!
//! # Key Types
//!
//! - [`WidgetBehavior`] - Kind-specific hooks attached to a widget node
//! - [`PaintContext`] - Drawing context passed to the paint hooks
//!
//! A widget without a behavior is a plain container: it paints its
//! background and its children and forwards events to its listeners.

use std::any::Any;

use trellis_core::{Color, Margins, Point, Rect, Size};

use super::events::{FocusEvent, KeyEvent, MouseEvent, WidgetEvent};
use super::tree::WidgetId;
use crate::graphics::{Font, Graphics};
use crate::gui::Gui;

/// Context provided during widget painting.
///
/// All drawing methods take coordinates local to the widget (the top-left
/// corner of its bounds is `(0, 0)`) and translate them to the absolute
/// coordinates the graphics backend expects.
pub struct PaintContext<'a> {
    graphics: &'a mut dyn Graphics,
    /// Absolute position of the widget's local origin.
    origin: Point,
    size: Size,
    margins: Margins,
    font: &'a Font,
    font_color: Color,
    back_color: Color,
    text: &'a str,
    opaque: bool,
    focused: bool,
    enabled: bool,
}

impl<'a> PaintContext<'a> {
    /// Create a paint context for a widget at `origin` with the given size.
    pub fn new(graphics: &'a mut dyn Graphics, origin: Point, size: Size, font: &'a Font) -> Self {
        Self {
            graphics,
            origin,
            size,
            margins: Margins::ZERO,
            font,
            font_color: Color::BLACK,
            back_color: Color::WHITE,
            text: "",
            opaque: true,
            focused: false,
            enabled: true,
        }
    }

    pub(crate) fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub(crate) fn with_colors(mut self, font_color: Color, back_color: Color) -> Self {
        self.font_color = font_color;
        self.back_color = back_color;
        self
    }

    pub(crate) fn with_text(mut self, text: &'a str) -> Self {
        self.text = text;
        self
    }

    pub(crate) fn with_state(mut self, opaque: bool, focused: bool, enabled: bool) -> Self {
        self.opaque = opaque;
        self.focused = focused;
        self.enabled = enabled;
        self
    }

    /// The widget's local rectangle (origin always 0,0).
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size)
    }

    /// The local rectangle minus the margins.
    #[inline]
    pub fn inner_rect(&self) -> Rect {
        self.rect().inset(self.margins)
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// The effective font of the widget.
    pub fn font(&self) -> &'a Font {
        self.font
    }

    /// The effective font color of the widget.
    pub fn font_color(&self) -> Color {
        self.font_color
    }

    /// The effective background color of the widget.
    pub fn back_color(&self) -> Color {
        self.back_color
    }

    /// The widget's text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn to_absolute(&self, rect: Rect) -> Rect {
        rect.offset(self.origin.x, self.origin.y)
    }

    fn point_to_absolute(&self, point: Point) -> Point {
        point + self.origin
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.to_absolute(rect);
        self.graphics.fill_rect(rect, color);
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.to_absolute(rect);
        self.graphics.draw_rect(rect, color);
    }

    pub fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        let (from, to) = (self.point_to_absolute(from), self.point_to_absolute(to));
        self.graphics.draw_line(from, to, color);
    }

    /// Draw text with the widget's effective font.
    pub fn draw_text(&mut self, position: Point, text: &str, color: Color) {
        let position = self.point_to_absolute(position);
        self.graphics.draw_text(position, text, color, self.font);
    }

    pub fn push_clip(&mut self, rect: Rect) {
        let rect = self.to_absolute(rect);
        self.graphics.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.graphics.pop_clip();
    }

    /// Fill the whole bounds with the background color if the widget is
    /// opaque. This is the default background of every widget.
    pub fn fill_default_background(&mut self) {
        if self.opaque {
            let (rect, color) = (self.rect(), self.back_color);
            self.fill_rect(rect, color);
        }
    }
}

/// Upcast support for downcasting behaviors to their concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Kind-specific hooks for a widget.
///
/// Every method has a default, so an implementation only overrides the
/// hooks it needs. Event hooks run before the widget's listeners and may
/// consume the event to stop them. While a hook runs the behavior is
/// detached from its node; events re-entering the same widget reach only
/// its listeners.
///
/// # Example
///
/// ```
/// use trellis::prelude::*;
///
/// struct Swatch;
///
/// impl WidgetBehavior for Swatch {
///     fn paint_component(&self, ctx: &mut PaintContext<'_>) {
///         let rect = ctx.inner_rect();
///         ctx.fill_rect(rect, Color::RED);
///     }
/// }
///
/// let mut gui = Gui::new(Size::new(100.0, 100.0));
/// let swatch = gui.create_widget_with(Swatch);
/// gui.add(swatch);
/// assert!(gui.behavior::<Swatch>(swatch).is_some());
/// ```
pub trait WidgetBehavior: AsAny {
    /// Name shown in debug output.
    fn type_name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Paint behind everything else, over the full bounds.
    fn paint_background(&self, ctx: &mut PaintContext<'_>) {
        ctx.fill_default_background();
    }

    /// Paint the widget's own content.
    fn paint_component(&self, _ctx: &mut PaintContext<'_>) {}

    /// Paint over the children.
    fn paint_border(&self, _ctx: &mut PaintContext<'_>) {}

    /// Called once per logic tick while the widget is in the tree.
    fn logic(&mut self, _gui: &mut Gui, _id: WidgetId) {}

    fn on_mouse(&mut self, _gui: &mut Gui, _id: WidgetId, _event: &mut MouseEvent) {}

    fn on_key(&mut self, _gui: &mut Gui, _id: WidgetId, _event: &mut KeyEvent) {}

    fn on_focus(&mut self, _gui: &mut Gui, _id: WidgetId, _event: &mut FocusEvent) {}

    /// Geometry, structure and lifecycle notifications.
    fn on_notify(&mut self, _gui: &mut Gui, _id: WidgetId, _event: &mut WidgetEvent) {}

    /// The widget became reachable from the desktop root.
    fn added_to_tree(&mut self, _gui: &mut Gui, _id: WidgetId) {}
}
