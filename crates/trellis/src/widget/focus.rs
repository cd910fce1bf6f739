//! Focus state for a widget tree.
//!
//! [`FocusManager`] holds the two focus references of a [`Gui`](crate::Gui):
//! the widget with keyboard focus and the widget holding modal capture. The
//! coordinator owns the transfers, because they send focus events; the
//! manager itself only stores state and computes tab order.
//!
//! # Tab Order
//!
//! Tab order is depth-first pre-order over the tree, which is also paint
//! order (parents before children, siblings bottom to top). The walk starts
//! at the focused widget, which need not be a stop itself, and lands on the
//! next widget that is tabable, focusable, visible and enabled. A hidden or
//! flagged widget hides its whole subtree from the walk.

use super::tree::{WidgetId, WidgetTree};

/// The focused and modal widgets of one tree.
#[derive(Debug, Default)]
pub struct FocusManager {
    focused: Option<WidgetId>,
    modal: Option<WidgetId>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, focused: Option<WidgetId>) {
        self.focused = focused;
    }

    pub(crate) fn take_focused(&mut self) -> Option<WidgetId> {
        self.focused.take()
    }

    /// The widget that receives all input while set.
    #[inline]
    pub fn modal(&self) -> Option<WidgetId> {
        self.modal
    }

    pub(crate) fn set_modal(&mut self, modal: Option<WidgetId>) {
        self.modal = modal;
    }

    /// Depth-first pre-order of the subtree rooted at `root`.
    ///
    /// Every widget is listed, tab stop or not, so a walk can start from a
    /// focused widget that is not itself a stop. Hidden and flagged widgets
    /// are left out together with their children.
    pub fn focus_walk(tree: &WidgetTree, root: WidgetId) -> Vec<WidgetId> {
        let mut walk = Vec::new();
        Self::collect_walk(tree, root, &mut walk);
        walk
    }

    fn collect_walk(tree: &WidgetTree, id: WidgetId, walk: &mut Vec<WidgetId>) {
        let Some(node) = tree.get(id) else {
            return;
        };
        // Skip hidden widgets and their children
        if !node.is_visible() || node.is_flagged() {
            return;
        }
        walk.push(id);
        for &child in node.children() {
            Self::collect_walk(tree, child, walk);
        }
    }

    /// Whether `id` is a stop for Tab and Shift+Tab.
    pub fn is_tab_stop(tree: &WidgetTree, id: WidgetId) -> bool {
        tree.get(id)
            .is_some_and(|node| node.is_tabable() && node.can_take_focus())
    }

    /// The tab stops of the subtree rooted at `root`, in tab order.
    pub fn tab_order(tree: &WidgetTree, root: WidgetId) -> Vec<WidgetId> {
        Self::focus_walk(tree, root)
            .into_iter()
            .filter(|&id| Self::is_tab_stop(tree, id))
            .collect()
    }

    /// The first stop after `current` in `walk`, wrapping around.
    ///
    /// `current` itself is the last candidate, so a lone stop keeps focus.
    /// Without a `current` in the walk this is the first stop.
    pub fn next_stop(
        walk: &[WidgetId],
        current: Option<WidgetId>,
        is_stop: impl Fn(WidgetId) -> bool,
    ) -> Option<WidgetId> {
        let len = walk.len();
        match current.and_then(|c| walk.iter().position(|&id| id == c)) {
            Some(pos) => (1..=len).map(|k| walk[(pos + k) % len]).find(|&id| is_stop(id)),
            None => walk.iter().copied().find(|&id| is_stop(id)),
        }
    }

    /// The first stop before `current` in `walk`, wrapping around; the last
    /// stop without a `current` in the walk.
    pub fn previous_stop(
        walk: &[WidgetId],
        current: Option<WidgetId>,
        is_stop: impl Fn(WidgetId) -> bool,
    ) -> Option<WidgetId> {
        let len = walk.len();
        match current.and_then(|c| walk.iter().position(|&id| id == c)) {
            Some(pos) => (1..=len)
                .map(|k| walk[(pos + len - k) % len])
                .find(|&id| is_stop(id)),
            None => walk.iter().rev().copied().find(|&id| is_stop(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn ids(count: usize) -> Vec<WidgetId> {
        let mut map: SlotMap<WidgetId, ()> = SlotMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_next_wraps() {
        let walk = ids(3);
        let any = |_: WidgetId| true;
        assert_eq!(FocusManager::next_stop(&walk, Some(walk[0]), any), Some(walk[1]));
        assert_eq!(FocusManager::next_stop(&walk, Some(walk[2]), any), Some(walk[0]));
        assert_eq!(FocusManager::next_stop(&walk, None, any), Some(walk[0]));
    }

    #[test]
    fn test_previous_wraps() {
        let walk = ids(3);
        let any = |_: WidgetId| true;
        assert_eq!(FocusManager::previous_stop(&walk, Some(walk[0]), any), Some(walk[2]));
        assert_eq!(FocusManager::previous_stop(&walk, Some(walk[2]), any), Some(walk[1]));
        assert_eq!(FocusManager::previous_stop(&walk, None, any), Some(walk[2]));
    }

    #[test]
    fn test_walk_starts_from_non_stop() {
        let walk = ids(5);
        let stops = [walk[0], walk[2], walk[4]];
        let is_stop = |id| stops.contains(&id);
        assert_eq!(FocusManager::next_stop(&walk, Some(walk[1]), is_stop), Some(walk[2]));
        assert_eq!(FocusManager::previous_stop(&walk, Some(walk[1]), is_stop), Some(walk[0]));
        assert_eq!(FocusManager::next_stop(&walk, Some(walk[3]), is_stop), Some(walk[4]));
        assert_eq!(FocusManager::previous_stop(&walk, Some(walk[3]), is_stop), Some(walk[2]));
    }

    #[test]
    fn test_lone_stop_keeps_focus() {
        let walk = ids(3);
        let is_stop = |id| id == walk[1];
        assert_eq!(FocusManager::next_stop(&walk, Some(walk[1]), is_stop), Some(walk[1]));
        assert_eq!(FocusManager::previous_stop(&walk, Some(walk[1]), is_stop), Some(walk[1]));
    }

    #[test]
    fn test_empty_walk() {
        assert_eq!(FocusManager::next_stop(&[], None, |_| true), None);
        assert_eq!(FocusManager::previous_stop(&[], None, |_| true), None);
        let walk = ids(2);
        assert_eq!(FocusManager::next_stop(&walk, Some(walk[0]), |_| false), None);
    }
}
