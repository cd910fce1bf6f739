//! Layout system for automatic child positioning.
//!
//! A layout is an ordinary widget with a [`LayoutSlot`]. The slot holds a
//! [`LayoutPolicy`] that repositions the widget's children whenever
//! something that affects them changes:
//!
//! - a child's size, location or visibility changes
//! - a child is added or removed
//! - the layout's own size changes
//!
//! When `resize_to_parent` is set (the default) the layout also copies its
//! parent's inner size whenever the parent resizes or the layout is added
//! to a parent, which in turn triggers a pass.
//!
//! [`Gui::update_layout`] is the only entry point for a pass. Geometry
//! changes made by the policy during its own pass do not re-enter it.
//!
//! # Built-in Layouts
//!
//! - [`FlowLayout`] - Wrapping rows of children
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut gui = Gui::new(Size::new(200.0, 100.0));
//! let flow = gui.create_layout(FlowLayout::new());
//! gui.add(flow);
//!
//! let a = gui.create_widget();
//! gui.set_size(a, Size::new(60.0, 20.0));
//! gui.add_child(flow, a);
//!
//! let b = gui.create_widget();
//! gui.set_size(b, Size::new(60.0, 20.0));
//! gui.add_child(flow, b);
//!
//! assert_eq!(gui.widget(b).unwrap().location(), Point::new(70.0, 0.0));
//! ```

mod flow_layout;

pub use flow_layout::FlowLayout;

use trellis_core::{span_names, targets};

use crate::gui::Gui;
use crate::widget::{AsAny, WidgetId};

/// A strategy that positions the children of a layout widget.
pub trait LayoutPolicy: AsAny {
    /// Name shown in debug output.
    fn type_name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Reposition or resize the children of `layout`.
    ///
    /// Implementations read the children and their geometry from `gui` and
    /// move them with the regular mutators.
    fn layout_children(&mut self, gui: &mut Gui, layout: WidgetId);
}

/// The layout capability of a widget node.
pub struct LayoutSlot {
    /// Taken out while a pass runs.
    pub(crate) policy: Option<Box<dyn LayoutPolicy>>,
    pub(crate) laying_out: bool,
    pub(crate) resize_to_parent: bool,
}

impl LayoutSlot {
    pub(crate) fn new(policy: Box<dyn LayoutPolicy>) -> Self {
        Self {
            policy: Some(policy),
            laying_out: false,
            resize_to_parent: true,
        }
    }

    /// Whether a pass is currently running.
    pub fn is_laying_out(&self) -> bool {
        self.laying_out
    }

    pub fn is_resizing_to_parent(&self) -> bool {
        self.resize_to_parent
    }
}

impl Gui {
    /// Create a detached layout widget driven by `policy`.
    ///
    /// Layout widgets are transparent containers: they are not opaque and
    /// paint no background of their own.
    pub fn create_layout<P: LayoutPolicy>(&mut self, policy: P) -> WidgetId {
        let type_name = policy.type_name();
        let id = self.create_widget_named(type_name);
        if let Some(node) = self.tree.get_mut(id) {
            node.opaque = false;
            node.layout = Some(LayoutSlot::new(Box::new(policy)));
        }
        id
    }

    /// Run one layout pass on `layout`.
    ///
    /// Does nothing if the widget is not a layout, is flagged, or is already
    /// in the middle of a pass.
    pub fn update_layout(&mut self, layout: WidgetId) {
        let Some(node) = self.tree.get_mut(layout) else {
            return;
        };
        if node.flagged {
            return;
        }
        let Some(slot) = node.layout.as_mut() else {
            return;
        };
        if slot.laying_out {
            tracing::trace!(target: targets::LAYOUT, ?layout, "re-entrant layout pass suppressed");
            return;
        }
        let Some(mut policy) = slot.policy.take() else {
            return;
        };
        slot.laying_out = true;

        {
            let _span = tracing::trace_span!(span_names::LAYOUT_PASS, ?layout).entered();
            tracing::trace!(target: targets::LAYOUT, policy = policy.type_name(), "layout pass");
            policy.layout_children(self, layout);
        }

        if let Some(slot) = self.tree.get_mut(layout).and_then(|n| n.layout.as_mut()) {
            slot.policy = Some(policy);
            slot.laying_out = false;
        }
    }

    /// Choose whether `layout` follows its parent's inner size.
    pub fn set_resize_to_parent(&mut self, layout: WidgetId, resize: bool) {
        let Some(slot) = self.tree.get_mut(layout).and_then(|n| n.layout.as_mut()) else {
            return;
        };
        slot.resize_to_parent = resize;
        if resize {
            self.fit_layout_to_parent(layout);
        }
    }

    pub fn is_resizing_to_parent(&self, layout: WidgetId) -> bool {
        self.tree
            .get(layout)
            .and_then(|n| n.layout.as_ref())
            .is_some_and(|slot| slot.resize_to_parent)
    }

    /// Borrow the policy of a layout as its concrete type.
    pub fn layout_policy<P: LayoutPolicy>(&self, layout: WidgetId) -> Option<&P> {
        let policy = self.tree.get(layout)?.layout.as_ref()?.policy.as_deref()?;
        policy.as_any().downcast_ref::<P>()
    }

    /// Change the policy of a layout, then run a pass.
    ///
    /// Returns `None` if `layout` is not a layout with a policy of type `P`.
    pub fn configure_layout<P, R>(&mut self, layout: WidgetId, f: impl FnOnce(&mut P) -> R) -> Option<R>
    where
        P: LayoutPolicy,
    {
        let policy = self
            .tree
            .get_mut(layout)?
            .layout
            .as_mut()?
            .policy
            .as_deref_mut()?;
        let result = f(policy.as_any_mut().downcast_mut::<P>()?);
        self.update_layout(layout);
        Some(result)
    }

    /// Copy the parent's inner size onto a layout that follows its parent.
    pub(crate) fn fit_layout_to_parent(&mut self, layout: WidgetId) {
        if !self.is_resizing_to_parent(layout) {
            return;
        }
        let Some(parent) = self.tree.parent(layout) else {
            return;
        };
        let Some(inner) = self.tree.get(parent).map(|p| p.inner_size()) else {
            return;
        };
        self.set_size(layout, inner);
    }

    /// React to a change in one of `child`'s inputs to its parent's layout.
    pub(crate) fn relayout_parent_of(&mut self, child: WidgetId) {
        if let Some(parent) = self.tree.parent(child) {
            if self.tree.get(parent).is_some_and(|p| p.is_layout()) {
                self.update_layout(parent);
            }
        }
    }
}
