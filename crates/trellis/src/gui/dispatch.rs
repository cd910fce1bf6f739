//! Delivery of events to one widget: its behavior hook, then its listeners.

use trellis_core::{Consumable, ListenerId, dispatch, targets};

use super::Gui;
use crate::widget::{
    ActionEvent, FocusEvent, KeyEvent, ListenedEvent, MouseEvent, SelectionEvent,
    WidgetBehavior, WidgetEvent, WidgetId, WidgetNotification,
};

/// Routes an event type to the matching [`WidgetBehavior`] hook.
pub(crate) trait Hooked: ListenedEvent {
    fn run_hook(behavior: &mut dyn WidgetBehavior, gui: &mut Gui, id: WidgetId, event: &mut Self);
}

impl Hooked for MouseEvent {
    fn run_hook(behavior: &mut dyn WidgetBehavior, gui: &mut Gui, id: WidgetId, event: &mut Self) {
        behavior.on_mouse(gui, id, event);
    }
}

impl Hooked for KeyEvent {
    fn run_hook(behavior: &mut dyn WidgetBehavior, gui: &mut Gui, id: WidgetId, event: &mut Self) {
        behavior.on_key(gui, id, event);
    }
}

impl Hooked for FocusEvent {
    fn run_hook(behavior: &mut dyn WidgetBehavior, gui: &mut Gui, id: WidgetId, event: &mut Self) {
        behavior.on_focus(gui, id, event);
    }
}

impl Hooked for WidgetEvent {
    fn run_hook(behavior: &mut dyn WidgetBehavior, gui: &mut Gui, id: WidgetId, event: &mut Self) {
        behavior.on_notify(gui, id, event);
    }
}

// Actions and selections are produced by behaviors, not consumed by them.
impl Hooked for ActionEvent {
    fn run_hook(_: &mut dyn WidgetBehavior, _: &mut Gui, _: WidgetId, _: &mut Self) {}
}

impl Hooked for SelectionEvent {
    fn run_hook(_: &mut dyn WidgetBehavior, _: &mut Gui, _: WidgetId, _: &mut Self) {}
}

impl Gui {
    /// Deliver an event to a widget. Returns whether it was consumed.
    pub(crate) fn deliver<E: Hooked>(&mut self, id: WidgetId, event: &mut E) -> bool {
        if !self.tree.contains(id) {
            return false;
        }
        self.run_behavior(id, |behavior, gui| E::run_hook(behavior, gui, id, event));
        if event.is_consumed() {
            return true;
        }

        let Some(snapshot) = self.tree.get(id).map(|n| E::list(&n.listeners).snapshot()) else {
            return false;
        };
        dispatch(self, snapshot, event, |gui, token| {
            gui.tree
                .get(id)
                .is_some_and(|n| E::list(&n.listeners).contains(token))
        })
    }

    /// Send a widget notification.
    pub(crate) fn notify(&mut self, id: WidgetId, notification: WidgetNotification) {
        tracing::trace!(target: targets::GUI, ?id, ?notification, "notify");
        let mut event = WidgetEvent::new(id, notification);
        self.deliver(id, &mut event);
    }

    /// Tell a widget's action listeners that it performed its action.
    pub fn fire_action(&mut self, id: WidgetId) {
        let mut event = ActionEvent::new(id);
        self.deliver(id, &mut event);
    }

    /// Tell a widget's selection listeners about a new selection.
    pub fn fire_selection(&mut self, id: WidgetId, index: Option<usize>) {
        let mut event = SelectionEvent::new(id, index);
        self.deliver(id, &mut event);
    }

    // =========================================================================
    // Listener Registration
    // =========================================================================

    /// Register a listener for one event category on a widget.
    ///
    /// Returns `None` if the widget does not exist.
    pub fn add_listener<E, F>(&mut self, id: WidgetId, listener: F) -> Option<ListenerId>
    where
        E: ListenedEvent,
        F: FnMut(&mut Gui, &mut E) + 'static,
    {
        let node = self.tree.get_mut(id)?;
        Some(E::list_mut(&mut node.listeners).add(listener))
    }

    pub fn add_mouse_listener<F>(&mut self, id: WidgetId, listener: F) -> Option<ListenerId>
    where
        F: FnMut(&mut Gui, &mut MouseEvent) + 'static,
    {
        self.add_listener(id, listener)
    }

    pub fn add_key_listener<F>(&mut self, id: WidgetId, listener: F) -> Option<ListenerId>
    where
        F: FnMut(&mut Gui, &mut KeyEvent) + 'static,
    {
        self.add_listener(id, listener)
    }

    pub fn add_focus_listener<F>(&mut self, id: WidgetId, listener: F) -> Option<ListenerId>
    where
        F: FnMut(&mut Gui, &mut FocusEvent) + 'static,
    {
        self.add_listener(id, listener)
    }

    pub fn add_widget_listener<F>(&mut self, id: WidgetId, listener: F) -> Option<ListenerId>
    where
        F: FnMut(&mut Gui, &mut WidgetEvent) + 'static,
    {
        self.add_listener(id, listener)
    }

    pub fn add_action_listener<F>(&mut self, id: WidgetId, listener: F) -> Option<ListenerId>
    where
        F: FnMut(&mut Gui, &mut ActionEvent) + 'static,
    {
        self.add_listener(id, listener)
    }

    pub fn add_selection_listener<F>(&mut self, id: WidgetId, listener: F) -> Option<ListenerId>
    where
        F: FnMut(&mut Gui, &mut SelectionEvent) + 'static,
    {
        self.add_listener(id, listener)
    }

    /// Unregister a listener of any category. Unknown tokens are ignored.
    pub fn remove_listener(&mut self, id: WidgetId, token: ListenerId) -> bool {
        let removed = self
            .tree
            .get_mut(id)
            .is_some_and(|node| node.listeners.remove(token));
        if !removed {
            tracing::debug!(target: targets::GUI, ?id, %token, "unknown listener token");
        }
        removed
    }

    /// Register a global listener that sees every key event before the
    /// focused widget does.
    pub fn add_key_preview_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&mut Gui, &mut KeyEvent) + 'static,
    {
        self.key_preview.add(listener)
    }

    pub fn remove_key_preview_listener(&mut self, token: ListenerId) -> bool {
        self.key_preview.remove(token)
    }
}
