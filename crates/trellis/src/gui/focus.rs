//! Keyboard focus, modal capture and tabbing.

use std::collections::HashSet;

use trellis_core::targets;

use super::Gui;
use crate::widget::{FocusEvent, FocusEventKind, FocusManager, WidgetId};

impl Gui {
    #[inline]
    pub fn focused_widget(&self) -> Option<WidgetId> {
        self.focus.focused()
    }

    #[inline]
    pub fn modal_widget(&self) -> Option<WidgetId> {
        self.focus.modal()
    }

    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.focus.focused() == Some(id)
    }

    /// Whether `id` is the modal widget or one of its descendants, or no
    /// modal widget is set.
    pub(crate) fn passes_modal(&self, id: WidgetId) -> bool {
        match self.focus.modal() {
            Some(modal) => self.tree.is_ancestor_or_self(modal, id),
            None => true,
        }
    }

    /// Give keyboard focus to a widget.
    ///
    /// The previous holder receives a focus-lost event, then the new one a
    /// focus-gained event. Returns `false` without emitting anything if the
    /// widget cannot take focus right now. Requesting the widget that
    /// already has focus returns `true` and emits nothing.
    pub fn request_focus(&mut self, id: WidgetId) -> bool {
        let can_take = self.tree.get(id).is_some_and(|n| n.can_take_focus())
            && self.is_in_tree(id)
            && self.is_effectively_visible(id)
            && !self.is_frozen(id);
        if !can_take {
            tracing::debug!(target: targets::FOCUS, ?id, "focus request rejected");
            return false;
        }
        if !self.passes_modal(id) {
            tracing::debug!(target: targets::FOCUS, ?id, "focus request outside modal widget rejected");
            return false;
        }
        if self.focus.focused() == Some(id) {
            return true;
        }

        if let Some(old) = self.focus.take_focused() {
            self.deliver(old, &mut FocusEvent::new(FocusEventKind::Lost, old));
        }
        self.focus.set_focused(Some(id));
        tracing::debug!(target: targets::FOCUS, ?id, "focus transferred");
        self.deliver(id, &mut FocusEvent::new(FocusEventKind::Gained, id));
        true
    }

    /// Remove keyboard focus from whichever widget has it.
    pub fn clear_focus(&mut self) {
        if let Some(old) = self.focus.take_focused() {
            tracing::debug!(target: targets::FOCUS, ?old, "focus cleared");
            self.deliver(old, &mut FocusEvent::new(FocusEventKind::Lost, old));
        }
    }

    /// Route all input to `id` and its descendants until released.
    ///
    /// Also requests ordinary focus for `id` when it can take it.
    pub fn request_modal_focus(&mut self, id: WidgetId) -> bool {
        if !self.is_in_tree(id) || self.is_frozen(id) {
            tracing::debug!(target: targets::FOCUS, ?id, "modal request rejected");
            return false;
        }
        self.focus.set_modal(Some(id));
        tracing::debug!(target: targets::FOCUS, ?id, "modal focus set");

        if self.tree.get(id).is_some_and(|n| n.can_take_focus()) {
            self.request_focus(id);
        }
        if self.focus.focused().is_some_and(|f| !self.passes_modal(f)) {
            self.clear_focus();
        }
        self.refresh_under_mouse();
        true
    }

    /// Release modal capture if `id` holds it.
    pub fn release_modal_focus(&mut self, id: WidgetId) -> bool {
        if self.focus.modal() != Some(id) {
            tracing::debug!(target: targets::FOCUS, ?id, "modal release by non-holder ignored");
            return false;
        }
        self.focus.set_modal(None);
        tracing::debug!(target: targets::FOCUS, ?id, "modal focus released");
        self.refresh_under_mouse();
        true
    }

    /// Focus the next tabable widget, wrapping around.
    pub fn focus_next(&mut self) -> bool {
        self.tab(true)
    }

    /// Focus the previous tabable widget, wrapping around.
    pub fn focus_previous(&mut self) -> bool {
        self.tab(false)
    }

    fn tab(&mut self, forward: bool) -> bool {
        let scope = self.focus.modal().unwrap_or(self.root);
        let walk = FocusManager::focus_walk(&self.tree, scope);
        let current = self.focus.focused();
        let is_stop = |id| FocusManager::is_tab_stop(&self.tree, id);
        let target = if forward {
            FocusManager::next_stop(&walk, current, is_stop)
        } else {
            FocusManager::previous_stop(&walk, current, is_stop)
        };
        match target {
            Some(id) => self.request_focus(id),
            None => false,
        }
    }

    /// Drop focus if it sits inside the subtree of `root`.
    pub(crate) fn drop_focus_within(&mut self, root: WidgetId) {
        if self
            .focus
            .focused()
            .is_some_and(|f| self.tree.is_ancestor_or_self(root, f))
        {
            self.clear_focus();
        }
    }

    /// Clear every coordinator reference into the subtree of `root`.
    ///
    /// A focused widget inside the subtree gets its focus-lost event first,
    /// while it is still attached.
    pub(crate) fn purge_references(&mut self, root: WidgetId) {
        self.drop_focus_within(root);

        let doomed: HashSet<WidgetId> = self.tree.subtree(root).into_iter().collect();
        // A focus-lost listener may have moved focus back into the subtree.
        if self.focus.focused().is_some_and(|f| doomed.contains(&f)) {
            self.focus.set_focused(None);
        }
        if self.focus.modal().is_some_and(|m| doomed.contains(&m)) {
            tracing::debug!(target: targets::FOCUS, ?root, "modal widget removed");
            self.focus.set_modal(None);
        }
        self.mouse.purge(|id| doomed.contains(&id));
    }
}
