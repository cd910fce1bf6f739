//! The keyboard pipeline: key preview, tab bindings, then the focused widget.

use trellis_core::{dispatch, targets};

use super::Gui;
use crate::input::{KeyInputKind, KeyboardInput};
use crate::widget::{KeyEvent, KeyEventKind};

impl Gui {
    pub(crate) fn handle_key(&mut self, input: KeyboardInput) {
        let kind = match input.kind {
            KeyInputKind::Down => KeyEventKind::Down,
            KeyInputKind::Up => KeyEventKind::Up,
            KeyInputKind::Repeat => KeyEventKind::Repeat,
        };
        let mut event = KeyEvent::new(kind, input.key, input.character, input.modifiers);

        let snapshot = self.key_preview.snapshot();
        if dispatch(self, snapshot, &mut event, |gui, token| gui.key_preview.contains(token)) {
            tracing::trace!(target: targets::GUI, key = ?input.key, "key consumed by preview");
            return;
        }

        if event.is_press() && self.config.tabbing_enabled {
            if self.config.tab_next.matches(input.key, input.modifiers) {
                self.focus_next();
                return;
            }
            if self.config.tab_previous.matches(input.key, input.modifiers) {
                self.focus_previous();
                return;
            }
        }

        let Some(target) = self.focus.focused() else {
            return;
        };
        if !self.passes_modal(target) || !self.tree.get(target).is_some_and(|n| n.enabled) {
            return;
        }
        tracing::trace!(target: targets::GUI, ?target, key = ?input.key, ?kind, "key event");
        event.source = Some(target);
        self.deliver(target, &mut event);
    }
}
