//! Arena storage for the widget tree.
//!
//! Widgets live in a [`SlotMap`] and refer to each other by [`WidgetId`].
//! A stale id simply fails to resolve, so no operation here can observe a
//! freed widget. This module only maintains structure (parents, children,
//! ordering) and answers geometric queries; notifications are sent by the
//! coordinator.

use slotmap::{SlotMap, new_key_type};
use trellis_core::{Point, Rect, TreeError, targets};

use super::base::WidgetNode;

new_key_type! {
    /// A stable handle to a widget in a [`WidgetTree`].
    ///
    /// Handles stay valid until the widget is destroyed. Afterwards every
    /// lookup with the handle returns `None`.
    pub struct WidgetId;
}

/// The arena owning every widget of one coordinator.
#[derive(Default)]
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, WidgetNode>,
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Insert a detached node.
    pub fn insert(&mut self, node: WidgetNode) -> WidgetId {
        self.nodes.insert(node)
    }

    #[inline]
    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.get(id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetNode> {
        self.nodes.get_mut(id)
    }

    #[inline]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live widgets, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The parent of a widget, if it has one.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// The children of a widget in paint order (bottom first).
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `ancestor` is `id` itself or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.parent(node_id);
        }
        false
    }

    /// The topmost ancestor of a widget (the widget itself when detached).
    pub fn top_ancestor(&self, id: WidgetId) -> WidgetId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Attach `child` to `parent`, detaching it from any previous parent.
    ///
    /// With `index` the child is inserted at that position, otherwise it is
    /// appended on top of its siblings. Returns the previous parent.
    pub fn attach(
        &mut self,
        parent: WidgetId,
        child: WidgetId,
        index: Option<usize>,
    ) -> Result<Option<WidgetId>, TreeError> {
        if !self.contains(parent) || !self.contains(child) {
            return Err(TreeError::MissingWidget);
        }
        if parent == child {
            return Err(TreeError::SelfParent);
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(TreeError::WouldCreateCycle);
        }

        let same_parent = self.parent(child) == Some(parent);
        let len = self.children(parent).len() - usize::from(same_parent);
        if let Some(index) = index {
            if index > len {
                return Err(TreeError::IndexOutOfRange { index, len });
            }
        }

        let old_parent = self.detach(child);
        let siblings = &mut self.nodes[parent].children;
        match index {
            Some(index) => siblings.insert(index, child),
            None => siblings.push(child),
        }
        self.nodes[child].parent = Some(parent);

        tracing::trace!(target: targets::TREE, ?parent, ?child, "attached");
        Ok(old_parent)
    }

    /// Detach a widget from its parent. Returns the old parent.
    pub fn detach(&mut self, child: WidgetId) -> Option<WidgetId> {
        let parent = self.nodes.get_mut(child)?.parent.take()?;
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|&id| id != child);
        }
        tracing::trace!(target: targets::TREE, ?parent, ?child, "detached");
        Some(parent)
    }

    /// Move a child to a new index among its siblings.
    pub fn reorder(&mut self, child: WidgetId, index: usize) -> Result<(), TreeError> {
        let parent = self.parent(child).ok_or(TreeError::MissingWidget)?;
        let siblings = &mut self.nodes[parent].children;
        if index >= siblings.len() {
            return Err(TreeError::IndexOutOfRange {
                index,
                len: siblings.len(),
            });
        }
        siblings.retain(|&id| id != child);
        siblings.insert(index, child);
        Ok(())
    }

    /// Every widget of the subtree rooted at `root`, in depth-first
    /// pre-order (the root first).
    pub fn subtree(&self, root: WidgetId) -> Vec<WidgetId> {
        let mut order = Vec::new();
        if !self.contains(root) {
            return order;
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// Remove a detached subtree from the arena, children first.
    ///
    /// The caller is responsible for detaching `root` beforehand.
    pub(crate) fn remove_subtree(&mut self, root: WidgetId) -> usize {
        let ids = self.subtree(root);
        for &id in ids.iter().rev() {
            self.nodes.remove(id);
        }
        ids.len()
    }

    /// The absolute position of a widget's origin.
    ///
    /// Each ancestor contributes its location plus its left and top margins,
    /// since children are laid out inside the parent's inner rectangle.
    pub fn absolute_position(&self, id: WidgetId) -> Option<Point> {
        let node = self.nodes.get(id)?;
        let mut position = node.location;
        let mut current = node.parent;
        while let Some(parent_id) = current {
            let parent = &self.nodes[parent_id];
            position = position
                .offset(parent.location.x, parent.location.y)
                .offset(parent.margins.left, parent.margins.top);
            current = parent.parent;
        }
        Some(position)
    }

    /// The absolute inner rectangle of a widget.
    pub fn absolute_inner_rect(&self, id: WidgetId) -> Option<Rect> {
        let origin = self.absolute_position(id)?;
        let node = self.nodes.get(id)?;
        Some(Rect::from_origin_size(origin, node.size).inset(node.margins))
    }

    /// Find the deepest visible widget whose inner rectangle contains the
    /// absolute point, starting at `root`.
    ///
    /// Children are tested topmost first, so of two overlapping siblings the
    /// later-added one wins. Hidden and flagged widgets are skipped together
    /// with their subtrees.
    pub fn hit_test(&self, root: WidgetId, point: Point) -> Option<WidgetId> {
        let root_node = self.nodes.get(root)?;
        let offset = match root_node.parent {
            Some(parent) => {
                let parent_pos = self.absolute_position(parent)?;
                let parent_node = &self.nodes[parent];
                parent_pos.offset(parent_node.margins.left, parent_node.margins.top)
            }
            None => Point::ZERO,
        };
        self.hit_test_recursive(root, point, offset)
    }

    fn hit_test_recursive(&self, id: WidgetId, point: Point, offset: Point) -> Option<WidgetId> {
        let node = self.nodes.get(id)?;
        if !node.visible || node.flagged {
            return None;
        }

        let origin = offset + node.location;
        let inner = Rect::from_origin_size(origin, node.size).inset(node.margins);
        if !inner.contains(point) {
            return None;
        }

        for &child in node.children.iter().rev() {
            if let Some(hit) = self.hit_test_recursive(child, point, inner.origin) {
                return Some(hit);
            }
        }
        Some(id)
    }

    /// Find the first widget in the subtree with the given name.
    pub fn find_by_name(&self, root: WidgetId, name: &str) -> Option<WidgetId> {
        self.subtree(root)
            .into_iter()
            .find(|&id| self.nodes[id].name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::{Margins, Size};

    fn node(x: f32, y: f32, w: f32, h: f32) -> WidgetNode {
        let mut node = WidgetNode::new("Test");
        node.location = Point::new(x, y);
        node.size = Size::new(w, h);
        node
    }

    #[test]
    fn test_attach_and_detach() {
        let mut tree = WidgetTree::new();
        let parent = tree.insert(node(0.0, 0.0, 100.0, 100.0));
        let child = tree.insert(node(0.0, 0.0, 10.0, 10.0));

        assert_eq!(tree.attach(parent, child, None), Ok(None));
        assert_eq!(tree.parent(child), Some(parent));
        assert_eq!(tree.children(parent), &[child]);

        assert_eq!(tree.detach(child), Some(parent));
        assert_eq!(tree.parent(child), None);
        assert!(tree.children(parent).is_empty());
        assert_eq!(tree.detach(child), None);
    }

    #[test]
    fn test_attach_rejects_cycles() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(node(0.0, 0.0, 10.0, 10.0));
        let b = tree.insert(node(0.0, 0.0, 10.0, 10.0));
        let c = tree.insert(node(0.0, 0.0, 10.0, 10.0));
        tree.attach(a, b, None).unwrap();
        tree.attach(b, c, None).unwrap();

        assert_eq!(tree.attach(a, a, None), Err(TreeError::SelfParent));
        assert_eq!(tree.attach(c, a, None), Err(TreeError::WouldCreateCycle));
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn test_attach_at_index_and_reparent() {
        let mut tree = WidgetTree::new();
        let p = tree.insert(node(0.0, 0.0, 10.0, 10.0));
        let q = tree.insert(node(0.0, 0.0, 10.0, 10.0));
        let a = tree.insert(node(0.0, 0.0, 1.0, 1.0));
        let b = tree.insert(node(0.0, 0.0, 1.0, 1.0));
        let c = tree.insert(node(0.0, 0.0, 1.0, 1.0));
        tree.attach(p, a, None).unwrap();
        tree.attach(p, b, None).unwrap();
        tree.attach(p, c, Some(0)).unwrap();
        assert_eq!(tree.children(p), &[c, a, b]);

        assert_eq!(
            tree.attach(p, a, Some(7)),
            Err(TreeError::IndexOutOfRange { index: 7, len: 2 })
        );

        assert_eq!(tree.attach(q, a, None), Ok(Some(p)));
        assert_eq!(tree.children(p), &[c, b]);
        assert_eq!(tree.children(q), &[a]);
    }

    #[test]
    fn test_subtree_pre_order() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(node(0.0, 0.0, 10.0, 10.0));
        let a = tree.insert(node(0.0, 0.0, 1.0, 1.0));
        let a1 = tree.insert(node(0.0, 0.0, 1.0, 1.0));
        let b = tree.insert(node(0.0, 0.0, 1.0, 1.0));
        tree.attach(root, a, None).unwrap();
        tree.attach(a, a1, None).unwrap();
        tree.attach(root, b, None).unwrap();

        assert_eq!(tree.subtree(root), vec![root, a, a1, b]);
        assert_eq!(tree.remove_subtree(a), 2);
        assert!(!tree.contains(a1));
    }

    #[test]
    fn test_absolute_position_includes_margins() {
        let mut tree = WidgetTree::new();
        let mut outer = node(10.0, 20.0, 200.0, 200.0);
        outer.margins = Margins::new(3.0, 5.0, 0.0, 0.0);
        let outer = tree.insert(outer);
        let inner = tree.insert(node(1.0, 2.0, 50.0, 50.0));
        tree.attach(outer, inner, None).unwrap();

        assert_eq!(tree.absolute_position(inner), Some(Point::new(16.0, 25.0)));
    }

    #[test]
    fn test_hit_test_topmost_sibling_and_margins() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(node(0.0, 0.0, 100.0, 100.0));
        let under = tree.insert(node(0.0, 0.0, 50.0, 50.0));
        let over = tree.insert(node(25.0, 25.0, 50.0, 50.0));
        let mut bordered = node(80.0, 80.0, 20.0, 20.0);
        bordered.margins = Margins::uniform(5.0);
        let bordered = tree.insert(bordered);
        for id in [under, over, bordered] {
            tree.attach(root, id, None).unwrap();
        }

        assert_eq!(tree.hit_test(root, Point::new(30.0, 30.0)), Some(over));
        assert_eq!(tree.hit_test(root, Point::new(10.0, 10.0)), Some(under));
        assert_eq!(tree.hit_test(root, Point::new(82.0, 82.0)), Some(root));
        assert_eq!(tree.hit_test(root, Point::new(90.0, 90.0)), Some(bordered));
        assert_eq!(tree.hit_test(root, Point::new(150.0, 10.0)), None);

        tree.get_mut(over).unwrap().visible = false;
        assert_eq!(tree.hit_test(root, Point::new(30.0, 30.0)), Some(under));
    }
}
