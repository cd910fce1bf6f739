//! Per-widget listener registration.
//!
//! Every widget carries one listener list per event category. Listeners
//! receive the coordinator and the event, so they can freely mutate the tree.
//! They are dropped together with their widget.

use trellis_core::{Consumable, ListenerId, Observers};

use super::events::{ActionEvent, FocusEvent, KeyEvent, MouseEvent, SelectionEvent, WidgetEvent};
use crate::gui::Gui;

/// The listener lists of one widget.
#[derive(Debug, Default)]
pub struct WidgetListeners {
    pub(crate) mouse: Observers<Gui, MouseEvent>,
    pub(crate) key: Observers<Gui, KeyEvent>,
    pub(crate) focus: Observers<Gui, FocusEvent>,
    pub(crate) widget: Observers<Gui, WidgetEvent>,
    pub(crate) action: Observers<Gui, ActionEvent>,
    pub(crate) selection: Observers<Gui, SelectionEvent>,
}

impl WidgetListeners {
    /// Remove a token from whichever category holds it.
    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        self.mouse.remove(id)
            || self.key.remove(id)
            || self.focus.remove(id)
            || self.widget.remove(id)
            || self.action.remove(id)
            || self.selection.remove(id)
    }

    /// Total number of registrations across categories.
    pub fn len(&self) -> usize {
        self.mouse.len()
            + self.key.len()
            + self.focus.len()
            + self.widget.len()
            + self.action.len()
            + self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An event type with a listener category on every widget.
pub trait ListenedEvent: Consumable + Sized + 'static {
    fn list(listeners: &WidgetListeners) -> &Observers<Gui, Self>;
    fn list_mut(listeners: &mut WidgetListeners) -> &mut Observers<Gui, Self>;
}

macro_rules! listened_event {
    ($ty:ty, $field:ident) => {
        impl ListenedEvent for $ty {
            fn list(listeners: &WidgetListeners) -> &Observers<Gui, Self> {
                &listeners.$field
            }

            fn list_mut(listeners: &mut WidgetListeners) -> &mut Observers<Gui, Self> {
                &mut listeners.$field
            }
        }
    };
}

listened_event!(MouseEvent, mouse);
listened_event!(KeyEvent, key);
listened_event!(FocusEvent, focus);
listened_event!(WidgetEvent, widget);
listened_event!(ActionEvent, action);
listened_event!(SelectionEvent, selection);
