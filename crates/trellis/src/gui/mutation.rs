//! Tree structure, geometry and state mutators.
//!
//! Every mutator is a no-op on a missing or flagged widget and fires
//! nothing when the value does not change.

use trellis_core::{Color, Margins, Point, Rect, Size, targets};

use super::Gui;
use crate::graphics::Font;
use crate::widget::{WidgetId, WidgetNotification};

impl Gui {
    fn is_mutable(&self, id: WidgetId) -> bool {
        match self.tree.get(id) {
            Some(node) if !node.flagged => true,
            Some(_) => {
                tracing::debug!(target: targets::TREE, ?id, "mutation of flagged widget ignored");
                false
            }
            None => {
                tracing::debug!(target: targets::TREE, ?id, "mutation of missing widget ignored");
                false
            }
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Attach a widget to the desktop root.
    pub fn add(&mut self, child: WidgetId) -> bool {
        self.add_child(self.root, child)
    }

    /// Append `child` on top of `parent`'s children, detaching it from its
    /// previous parent first.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        self.attach_child(parent, child, None)
    }

    /// Insert `child` at `index` among `parent`'s children.
    pub fn add_child_at(&mut self, parent: WidgetId, child: WidgetId, index: usize) -> bool {
        self.attach_child(parent, child, Some(index))
    }

    fn attach_child(&mut self, parent: WidgetId, child: WidgetId, index: Option<usize>) -> bool {
        if !self.is_mutable(parent) || !self.is_mutable(child) {
            return false;
        }
        if child == self.root {
            tracing::debug!(target: targets::TREE, "the desktop root cannot be re-parented");
            return false;
        }
        if self.tree.is_ancestor_or_self(child, parent) {
            tracing::debug!(target: targets::TREE, ?parent, ?child, "attach would create a cycle");
            return false;
        }

        if let Some(old_parent) = self.tree.parent(child) {
            let remaining = self.tree.children(old_parent).len() - 1;
            let target_parent_len = if old_parent == parent {
                remaining
            } else {
                self.tree.children(parent).len()
            };
            if index.is_some_and(|i| i > target_parent_len) {
                tracing::debug!(target: targets::TREE, ?parent, ?child, ?index, "child index out of range");
                return false;
            }
            self.remove_child(old_parent, child);
        }

        if let Err(err) = self.tree.attach(parent, child, index) {
            tracing::debug!(target: targets::TREE, ?parent, ?child, %err, "attach rejected");
            return false;
        }

        self.notify(parent, WidgetNotification::ChildAdded(child));
        if self.is_in_tree(child) {
            self.propagate_added_to_tree(child);
        }
        self.fit_layout_to_parent(child);
        self.relayout_parent_of(child);
        self.refresh_under_mouse();
        true
    }

    fn propagate_added_to_tree(&mut self, root: WidgetId) {
        for id in self.tree.subtree(root) {
            if !self.tree.contains(id) {
                continue;
            }
            self.run_behavior(id, |behavior, gui| behavior.added_to_tree(gui, id));
            self.notify(id, WidgetNotification::AddedToTree);
        }
    }

    /// Detach `child` from `parent`.
    ///
    /// Every coordinator reference into the child's subtree is cleared
    /// first; a focused widget inside it gets its focus-lost notification
    /// while still attached. Returns `false` if `child` is not a child of
    /// `parent`.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        if self.tree.parent(child) != Some(parent) {
            tracing::debug!(target: targets::TREE, ?parent, ?child, "remove of a non-child ignored");
            return false;
        }

        self.purge_references(child);
        self.tree.detach(child);
        self.notify(parent, WidgetNotification::ChildRemoved(child));
        if self.tree.get(parent).is_some_and(|p| p.is_layout()) {
            self.update_layout(parent);
        }
        self.refresh_under_mouse();
        true
    }

    /// Detach a widget from whatever parent it has.
    pub fn remove(&mut self, child: WidgetId) -> bool {
        match self.tree.parent(child) {
            Some(parent) => self.remove_child(parent, child),
            None => false,
        }
    }

    /// Move a widget on top of its siblings.
    pub fn bring_to_front(&mut self, id: WidgetId) -> bool {
        let Some(parent) = self.tree.parent(id) else {
            return false;
        };
        let last = self.tree.children(parent).len() - 1;
        self.reorder_child(id, last)
    }

    /// Move a widget below its siblings.
    pub fn send_to_back(&mut self, id: WidgetId) -> bool {
        self.reorder_child(id, 0)
    }

    fn reorder_child(&mut self, id: WidgetId, index: usize) -> bool {
        if !self.is_mutable(id) {
            return false;
        }
        if let Err(err) = self.tree.reorder(id, index) {
            tracing::debug!(target: targets::TREE, ?id, %err, "reorder rejected");
            return false;
        }
        self.relayout_parent_of(id);
        self.refresh_under_mouse();
        true
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn set_location(&mut self, id: WidgetId, location: Point) {
        if !self.is_mutable(id) {
            return;
        }
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        let old = node.location;
        if old == location {
            return;
        }
        node.location = location;

        self.notify(id, WidgetNotification::LocationChanged { old, new: location });
        self.relayout_parent_of(id);
        self.refresh_under_mouse();
    }

    pub fn set_size(&mut self, id: WidgetId, size: Size) {
        if !self.is_mutable(id) {
            return;
        }
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        let old = node.size;
        if old == size {
            return;
        }
        node.size = size;

        self.after_resize(id, old, size);
    }

    fn after_resize(&mut self, id: WidgetId, old: Size, new: Size) {
        self.notify(id, WidgetNotification::SizeChanged { old, new });

        for child in self.tree.children(id).to_vec() {
            self.notify(child, WidgetNotification::ParentSizeChanged);
            self.fit_layout_to_parent(child);
        }
        if self.tree.get(id).is_some_and(|n| n.is_layout()) {
            self.update_layout(id);
        }
        self.relayout_parent_of(id);
        self.refresh_under_mouse();
    }

    /// Set location and size together.
    pub fn set_bounds(&mut self, id: WidgetId, bounds: Rect) {
        self.set_location(id, bounds.origin);
        self.set_size(id, bounds.size);
    }

    /// Change the border around the inner rectangle.
    ///
    /// The outer size stays the same, so the inner size shrinks or grows.
    pub fn set_margins(&mut self, id: WidgetId, margins: Margins) {
        if !self.is_mutable(id) {
            return;
        }
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if node.margins == margins {
            return;
        }
        node.margins = margins;
        let size = node.size;
        self.after_resize(id, size, size);
    }

    /// The absolute position of a widget's origin.
    pub fn absolute_position(&self, id: WidgetId) -> Option<Point> {
        self.tree.absolute_position(id)
    }

    // =========================================================================
    // State Flags
    // =========================================================================

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        if !self.is_mutable(id) {
            return;
        }
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if node.visible == visible {
            return;
        }
        node.visible = visible;

        if !visible {
            self.drop_focus_within(id);
        }
        self.notify(id, WidgetNotification::VisibilityChanged(visible));
        self.relayout_parent_of(id);
        self.refresh_under_mouse();
    }

    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) {
        if !self.is_mutable(id) {
            return;
        }
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if node.enabled == enabled {
            return;
        }
        node.enabled = enabled;

        if !enabled && self.focus.focused() == Some(id) {
            self.clear_focus();
        }
        self.notify(id, WidgetNotification::EnabledChanged(enabled));
    }

    pub fn set_focusable(&mut self, id: WidgetId, focusable: bool) {
        if let Some(node) = self.tree.get_mut(id) {
            node.focusable = focusable;
        }
        if !focusable && self.focus.focused() == Some(id) {
            self.clear_focus();
        }
    }

    pub fn set_tabable(&mut self, id: WidgetId, tabable: bool) {
        if let Some(node) = self.tree.get_mut(id) {
            node.tabable = tabable;
        }
    }

    pub fn set_opaque(&mut self, id: WidgetId, opaque: bool) {
        if let Some(node) = self.tree.get_mut(id) {
            node.opaque = opaque;
        }
    }

    // =========================================================================
    // Appearance
    // =========================================================================

    /// Set the widget's own font; `None` inherits from the ancestors again.
    pub fn set_font(&mut self, id: WidgetId, font: Option<Font>) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if node.font == font {
            return;
        }
        node.font = font;
        self.notify(id, WidgetNotification::FontChanged);
    }

    pub fn set_font_color(&mut self, id: WidgetId, color: Option<Color>) {
        if let Some(node) = self.tree.get_mut(id) {
            node.font_color = color;
        }
    }

    pub fn set_back_color(&mut self, id: WidgetId, color: Option<Color>) {
        if let Some(node) = self.tree.get_mut(id) {
            node.back_color = color;
        }
    }

    pub fn set_text(&mut self, id: WidgetId, text: impl Into<String>) {
        let text = text.into();
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if node.text == text {
            return;
        }
        node.text = text;
        self.notify(id, WidgetNotification::TextChanged);
    }

    pub fn set_name(&mut self, id: WidgetId, name: impl Into<String>) {
        if let Some(node) = self.tree.get_mut(id) {
            node.name = name.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::widget::WidgetEvent;

    fn recorder(gui: &mut Gui, id: WidgetId) -> Rc<RefCell<Vec<WidgetNotification>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        gui.add_widget_listener(id, move |_gui, event: &mut WidgetEvent| {
            sink.borrow_mut().push(event.notification.clone());
        });
        seen
    }

    #[test]
    fn test_unchanged_size_fires_nothing() {
        let mut gui = Gui::new(Size::new(100.0, 100.0));
        let w = gui.create_widget();
        gui.set_size(w, Size::new(10.0, 10.0));
        let seen = recorder(&mut gui, w);

        gui.set_size(w, Size::new(10.0, 10.0));
        assert!(seen.borrow().is_empty());

        gui.set_size(w, Size::new(20.0, 10.0));
        assert_eq!(
            seen.borrow().as_slice(),
            &[WidgetNotification::SizeChanged {
                old: Size::new(10.0, 10.0),
                new: Size::new(20.0, 10.0),
            }]
        );
    }

    #[test]
    fn test_resize_notifies_children() {
        let mut gui = Gui::new(Size::new(100.0, 100.0));
        let parent = gui.create_widget();
        let child = gui.create_widget();
        gui.add_child(parent, child);
        let seen = recorder(&mut gui, child);

        gui.set_size(parent, Size::new(50.0, 50.0));
        assert_eq!(seen.borrow().as_slice(), &[WidgetNotification::ParentSizeChanged]);
    }

    #[test]
    fn test_add_child_reparents() {
        let mut gui = Gui::new(Size::new(100.0, 100.0));
        let a = gui.create_widget();
        let b = gui.create_widget();
        let child = gui.create_widget();
        assert!(gui.add_child(a, child));
        assert!(gui.add_child(b, child));

        assert!(gui.widget(a).unwrap().children().is_empty());
        assert_eq!(gui.widget(b).unwrap().children(), &[child]);
        assert_eq!(gui.widget(child).unwrap().parent(), Some(b));
    }

    #[test]
    fn test_add_child_rejects_cycle() {
        let mut gui = Gui::new(Size::new(100.0, 100.0));
        let a = gui.create_widget();
        let b = gui.create_widget();
        gui.add_child(a, b);
        assert!(!gui.add_child(b, a));
        assert!(!gui.add_child(a, a));
        assert_eq!(gui.widget(a).unwrap().parent(), None);
    }

    #[test]
    fn test_remove_non_child_is_noop() {
        let mut gui = Gui::new(Size::new(100.0, 100.0));
        let a = gui.create_widget();
        let b = gui.create_widget();
        assert!(!gui.remove_child(a, b));
        assert!(!gui.remove(b));
    }

    #[test]
    fn test_flagged_widget_is_frozen() {
        let mut gui = Gui::new(Size::new(100.0, 100.0));
        let w = gui.create_widget();
        gui.add(w);
        gui.flag_widget(w);

        gui.set_size(w, Size::new(30.0, 30.0));
        gui.set_visible(w, false);
        let node = gui.widget(w).unwrap();
        assert_eq!(node.size(), Size::ZERO);
        assert!(node.is_visible());
    }

    #[test]
    fn test_bring_to_front_and_send_to_back() {
        let mut gui = Gui::new(Size::new(100.0, 100.0));
        let a = gui.create_widget();
        let b = gui.create_widget();
        let c = gui.create_widget();
        for id in [a, b, c] {
            gui.add(id);
        }

        assert!(gui.bring_to_front(a));
        assert_eq!(gui.widget(gui.root()).unwrap().children(), &[b, c, a]);
        assert!(gui.send_to_back(c));
        assert_eq!(gui.widget(gui.root()).unwrap().children(), &[c, b, a]);
    }

    #[test]
    fn test_margins_shrink_inner_size() {
        let mut gui = Gui::new(Size::new(100.0, 100.0));
        let w = gui.create_widget();
        gui.set_size(w, Size::new(40.0, 40.0));
        gui.set_margins(w, Margins::uniform(5.0));
        assert_eq!(gui.widget(w).unwrap().inner_size(), Size::new(30.0, 30.0));
    }
}
