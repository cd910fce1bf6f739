//! The widget node stored in the tree.
//!
//! [`WidgetNode`] holds the state every widget has: geometry, state flags,
//! appearance, listeners and tree links. Kind-specific behavior is attached
//! through an optional [`WidgetBehavior`] and layout through an optional
//! [`LayoutSlot`].
//!
//! Nodes are read through [`Gui::widget`](crate::Gui::widget). All mutation
//! goes through the coordinator so that notifications fire and back
//! references stay consistent.

use trellis_core::{Color, Margins, Point, Rect, Size};

use super::listeners::WidgetListeners;
use super::traits::WidgetBehavior;
use super::tree::WidgetId;
use crate::graphics::Font;
use crate::layout::LayoutSlot;

/// One widget in the tree.
pub struct WidgetNode {
    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId>,

    /// Location relative to the parent's inner rectangle.
    pub(crate) location: Point,
    pub(crate) size: Size,
    pub(crate) margins: Margins,

    pub(crate) visible: bool,
    pub(crate) enabled: bool,
    pub(crate) focusable: bool,
    pub(crate) tabable: bool,
    pub(crate) opaque: bool,

    /// Appearance set on this widget; `None` inherits from the ancestors.
    pub(crate) font: Option<Font>,
    pub(crate) font_color: Option<Color>,
    pub(crate) back_color: Option<Color>,

    pub(crate) text: String,
    pub(crate) name: String,
    pub(crate) flagged: bool,

    pub(crate) type_name: &'static str,
    pub(crate) listeners: WidgetListeners,
    pub(crate) behavior: Option<Box<dyn WidgetBehavior>>,
    pub(crate) layout: Option<LayoutSlot>,
}

impl WidgetNode {
    /// Create a detached node with default state.
    ///
    /// Widgets start visible, enabled and opaque, but neither focusable nor
    /// tabable.
    pub(crate) fn new(type_name: &'static str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            location: Point::ZERO,
            size: Size::ZERO,
            margins: Margins::ZERO,
            visible: true,
            enabled: true,
            focusable: false,
            tabable: false,
            opaque: true,
            font: None,
            font_color: None,
            back_color: None,
            text: String::new(),
            name: String::new(),
            flagged: false,
            type_name,
            listeners: WidgetListeners::default(),
            behavior: None,
            layout: None,
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// Children in paint order; the last one is on top.
    #[inline]
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    #[inline]
    pub fn location(&self) -> Point {
        self.location
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Location and size, in the parent's inner coordinate space.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.location, self.size)
    }

    /// The hit-testable area in the widget's own coordinates.
    pub fn inner_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size).inset(self.margins)
    }

    /// The inner size, which children are laid out in.
    pub fn inner_size(&self) -> Size {
        self.inner_rect().size
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    #[inline]
    pub fn is_tabable(&self) -> bool {
        self.tabable
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    /// Whether the widget is queued for destruction.
    #[inline]
    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Whether focus may be given to this widget right now.
    pub fn can_take_focus(&self) -> bool {
        self.focusable && self.visible && self.enabled && !self.flagged
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The font set directly on this widget, without inheritance.
    pub fn own_font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    pub fn own_font_color(&self) -> Option<Color> {
        self.font_color
    }

    pub fn own_back_color(&self) -> Option<Color> {
        self.back_color
    }

    /// Short name of the widget kind, used by debug output.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether this widget positions its children with a layout policy.
    pub fn is_layout(&self) -> bool {
        self.layout.is_some()
    }

    /// The attached behavior, if any and not currently running a hook.
    pub fn behavior(&self) -> Option<&dyn WidgetBehavior> {
        self.behavior.as_deref()
    }
}

impl std::fmt::Debug for WidgetNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetNode")
            .field("type_name", &self.type_name)
            .field("name", &self.name)
            .field("location", &self.location)
            .field("size", &self.size)
            .field("visible", &self.visible)
            .field("enabled", &self.enabled)
            .field("flagged", &self.flagged)
            .field("children", &self.children.len())
            .finish()
    }
}
