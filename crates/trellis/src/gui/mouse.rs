//! The mouse pipeline: widget-under-mouse tracking, button gestures,
//! double clicks and hover.

use trellis_core::{Point, targets};

use super::Gui;
use crate::input::{MouseInput, MouseInputKind};
use crate::widget::{KeyboardModifiers, MouseButton, MouseEvent, MouseEventKind, WidgetId};

/// Coordinator state derived from the pointer.
#[derive(Debug, Default)]
pub(crate) struct MouseState {
    pub(crate) under_mouse: Option<WidgetId>,
    pub(crate) previous_under_mouse: Option<WidgetId>,
    /// Receives the `Up` of the current gesture.
    pub(crate) down_owner: Option<WidgetId>,
    /// Target of the last click, for double-click detection.
    pub(crate) up_owner: Option<WidgetId>,
    /// The modal widget active when the current gesture started.
    pub(crate) modal_at_down: Option<WidgetId>,
    pub(crate) hover_target: Option<WidgetId>,
    pub(crate) next_hover: f64,
    pub(crate) hover_fired: bool,
    pub(crate) double_click_expiry: f64,
    pub(crate) can_double_click: bool,
    pub(crate) last_button: Option<MouseButton>,
    pub(crate) last_click_button: Option<MouseButton>,
    pub(crate) position: Point,
    pub(crate) modifiers: KeyboardModifiers,
    /// No pointer input has arrived yet.
    pub(crate) pointer_known: bool,
}

impl MouseState {
    /// Clear every reference for which `doomed` holds.
    pub(crate) fn purge(&mut self, doomed: impl Fn(WidgetId) -> bool) {
        for slot in [
            &mut self.under_mouse,
            &mut self.previous_under_mouse,
            &mut self.down_owner,
            &mut self.up_owner,
            &mut self.modal_at_down,
            &mut self.hover_target,
        ] {
            if slot.is_some_and(&doomed) {
                *slot = None;
            }
        }
    }
}

impl Gui {
    /// The widget the pointer is over, honoring modal capture.
    #[inline]
    pub fn widget_under_mouse(&self) -> Option<WidgetId> {
        self.mouse.under_mouse
    }

    /// The last pointer position in absolute coordinates.
    pub fn mouse_position(&self) -> Point {
        self.mouse.position
    }

    fn raw_hit(&self, position: Point) -> Option<WidgetId> {
        self.tree.hit_test(self.root(), position)
    }

    fn is_outside_modal(&self, hit: Option<WidgetId>) -> bool {
        match self.focus.modal() {
            Some(modal) => !hit.is_some_and(|h| self.tree.is_ancestor_or_self(modal, h)),
            None => false,
        }
    }

    pub(crate) fn handle_mouse(&mut self, input: MouseInput) {
        self.mouse.position = input.position;
        self.mouse.modifiers = input.modifiers;
        self.mouse.pointer_known = true;

        match input.kind {
            MouseInputKind::Move => {
                self.update_under_mouse();
                if let Some(target) = self.mouse.under_mouse {
                    self.send_mouse(target, MouseEventKind::Move, None, 0.0);
                }
            }
            MouseInputKind::Wheel => {
                self.update_under_mouse();
                if let Some(target) = self.mouse.under_mouse {
                    self.send_mouse(target, MouseEventKind::Wheel, None, input.wheel);
                }
            }
            MouseInputKind::Down => self.handle_mouse_down(input.button),
            MouseInputKind::Up => self.handle_mouse_up(input.button),
        }
    }

    fn handle_mouse_down(&mut self, button: Option<MouseButton>) {
        self.update_under_mouse();
        self.mouse.last_button = button;
        self.reset_hover(self.mouse.under_mouse);

        let modal = self.focus.modal();
        self.mouse.modal_at_down = modal;
        let hit = self.raw_hit(self.mouse.position);
        if let Some(modal) = modal.filter(|_| self.is_outside_modal(hit)) {
            self.mouse.down_owner = None;
            tracing::trace!(target: targets::GUI, ?modal, "press outside modal widget");
            self.send_mouse(modal, MouseEventKind::ModalDown, button, 0.0);
            return;
        }

        let Some(target) = self.mouse.under_mouse else {
            self.mouse.down_owner = None;
            return;
        };
        self.mouse.down_owner = Some(target);
        if self.tree.get(target).is_some_and(|n| n.can_take_focus()) {
            self.request_focus(target);
        }
        self.send_mouse(target, MouseEventKind::Down, button, 0.0);
    }

    fn handle_mouse_up(&mut self, button: Option<MouseButton>) {
        self.update_under_mouse();

        let modal = self.focus.modal();
        let hit = self.raw_hit(self.mouse.position);
        if let Some(modal) = modal.filter(|_| self.is_outside_modal(hit)) {
            // Only a gesture that started under this modal widget closes it.
            if self.mouse.modal_at_down == Some(modal) {
                self.send_mouse(modal, MouseEventKind::ModalUp, button, 0.0);
            }
            self.mouse.down_owner = None;
            return;
        }

        let Some(owner) = self.mouse.down_owner.take() else {
            return;
        };
        if !self.tree.contains(owner) || !self.passes_modal(owner) {
            return;
        }
        self.send_mouse(owner, MouseEventKind::Up, button, 0.0);

        if self.mouse.under_mouse != Some(owner) || self.mouse.last_button != button {
            return;
        }
        self.send_mouse(owner, MouseEventKind::Click, button, 0.0);

        let now = self.elapsed_time();
        let repeat = self.mouse.can_double_click
            && self.mouse.up_owner == Some(owner)
            && self.mouse.last_click_button == button
            && now < self.mouse.double_click_expiry;
        if repeat {
            self.mouse.can_double_click = false;
            self.send_mouse(owner, MouseEventKind::DoubleClick, button, 0.0);
        } else {
            self.mouse.can_double_click = true;
            self.mouse.double_click_expiry = now + self.config.double_click_interval;
        }
        self.mouse.up_owner = Some(owner);
        self.mouse.last_click_button = button;
    }

    /// Recompute the widget under the mouse and send `Leave` and `Enter`
    /// if it changed.
    fn update_under_mouse(&mut self) {
        let hit = self.raw_hit(self.mouse.position);
        let target = if self.is_outside_modal(hit) { None } else { hit };
        if target == self.mouse.under_mouse {
            return;
        }

        let old = self.mouse.under_mouse;
        self.mouse.previous_under_mouse = old;
        self.mouse.under_mouse = target;
        self.reset_hover(target);
        tracing::trace!(target: targets::GUI, ?old, new = ?target, "widget under mouse changed");

        if let Some(old) = old {
            self.send_mouse(old, MouseEventKind::Leave, None, 0.0);
        }
        if let Some(new) = target {
            self.send_mouse(new, MouseEventKind::Enter, None, 0.0);
        }
    }

    /// Re-run the hit-test after a change in the tree.
    ///
    /// Only `Enter` and `Leave` are sent. Does nothing before the first
    /// pointer input.
    pub(crate) fn refresh_under_mouse(&mut self) {
        if self.mouse.pointer_known {
            self.update_under_mouse();
        }
    }

    fn reset_hover(&mut self, target: Option<WidgetId>) {
        self.mouse.hover_target = target;
        self.mouse.next_hover = self.elapsed_time() + self.config.hover_interval;
        self.mouse.hover_fired = false;
    }

    /// Fire the hover event once the pointer has rested long enough.
    pub(crate) fn handle_hover(&mut self) {
        let Some(target) = self.mouse.hover_target else {
            return;
        };
        if self.mouse.hover_fired || self.elapsed_time() < self.mouse.next_hover {
            return;
        }
        self.mouse.hover_fired = true;
        self.send_mouse(target, MouseEventKind::Hover, None, 0.0);
    }

    /// Build and deliver a mouse event with coordinates relative to `target`.
    ///
    /// Disabled widgets are skipped.
    fn send_mouse(
        &mut self,
        target: WidgetId,
        kind: MouseEventKind,
        button: Option<MouseButton>,
        wheel: f32,
    ) -> bool {
        if !self.tree.get(target).is_some_and(|n| n.enabled) {
            return false;
        }
        let Some(origin) = self.tree.absolute_position(target) else {
            return false;
        };
        let absolute = self.mouse.position;
        let mut event = MouseEvent::new(kind, target, absolute - origin, absolute, button)
            .with_wheel(wheel)
            .with_modifiers(self.mouse.modifiers);
        tracing::trace!(target: targets::GUI, ?target, ?kind, "mouse event");
        self.deliver(target, &mut event)
    }
}
