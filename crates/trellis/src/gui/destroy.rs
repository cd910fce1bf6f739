//! Immediate and deferred widget destruction.

use trellis_core::targets;

use super::Gui;
use crate::widget::{WidgetId, WidgetNotification};

impl Gui {
    /// Destroy a widget and its subtree now.
    ///
    /// Coordinator references into the subtree are cleared first, then every
    /// widget of the subtree receives `Destroyed`, then the subtree is
    /// detached and dropped together with its listeners. The desktop root
    /// cannot be destroyed.
    pub fn destroy_widget(&mut self, id: WidgetId) -> bool {
        if !self.tree.contains(id) {
            tracing::debug!(target: targets::TREE, ?id, "destroy of missing widget ignored");
            return false;
        }
        if id == self.root() {
            tracing::debug!(target: targets::TREE, "the desktop root cannot be destroyed");
            return false;
        }

        self.purge_references(id);
        for member in self.tree.subtree(id) {
            self.notify(member, WidgetNotification::Destroyed);
        }
        // A destroyed listener may already have removed the widget.
        if !self.tree.contains(id) {
            return true;
        }

        if let Some(parent) = self.tree.parent(id) {
            self.remove_child(parent, id);
        } else {
            self.purge_references(id);
        }
        let removed = self.tree.remove_subtree(id);
        self.flagged.retain(|&queued| self.tree.contains(queued));
        tracing::debug!(target: targets::TREE, ?id, removed, "widget destroyed");
        true
    }

    /// Queue a widget for destruction at the end of the next logic tick.
    ///
    /// A flagged widget is frozen: hit-testing skips it, it cannot take
    /// focus and the structure and geometry mutators ignore it. Focus held
    /// anywhere in its subtree is dropped at once, and no widget under it
    /// can take focus again.
    pub fn flag_widget(&mut self, id: WidgetId) -> bool {
        if id == self.root() {
            return false;
        }
        let Some(node) = self.tree.get_mut(id) else {
            return false;
        };
        if node.flagged {
            return false;
        }
        node.flagged = true;
        self.flagged.push_back(id);

        self.drop_focus_within(id);
        self.refresh_under_mouse();
        true
    }

    /// Hand the queue of flagged widgets to the caller.
    ///
    /// Meant for callers that turned
    /// [`set_destroying_flagged_widgets`](Self::set_destroying_flagged_widgets)
    /// off. The coordinator holds no references to the returned widgets; the
    /// caller finalizes them, usually with [`destroy_widget`](Self::destroy_widget).
    pub fn take_flagged_widgets(&mut self) -> Vec<WidgetId> {
        self.flagged.drain(..).collect()
    }

    /// Widgets currently waiting in the destruction queue, oldest first.
    pub fn flagged_widgets(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.flagged.iter().copied()
    }

    pub(crate) fn sweep_flagged(&mut self) {
        if self.flagged.is_empty() {
            return;
        }

        if self.config.destroy_flagged_widgets {
            while let Some(id) = self.flagged.pop_front() {
                self.destroy_widget(id);
            }
        } else {
            let queued: Vec<WidgetId> = self.flagged.iter().copied().collect();
            for id in queued {
                if self.tree.contains(id) {
                    self.purge_references(id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use trellis_core::Size;

    use super::*;
    use crate::widget::WidgetEvent;

    #[test]
    fn test_destroy_notifies_whole_subtree() {
        let mut gui = Gui::new(Size::new(100.0, 100.0));
        let parent = gui.create_widget();
        let child = gui.create_widget();
        gui.add(parent);
        gui.add_child(parent, child);

        let destroyed = Rc::new(RefCell::new(Vec::new()));
        for id in [parent, child] {
            let sink = destroyed.clone();
            gui.add_widget_listener(id, move |_gui, event: &mut WidgetEvent| {
                if event.notification == WidgetNotification::Destroyed {
                    sink.borrow_mut().push(event.source);
                }
            });
        }

        assert!(gui.destroy_widget(parent));
        assert_eq!(destroyed.borrow().as_slice(), &[parent, child]);
        assert!(!gui.widget_exists(parent));
        assert!(!gui.widget_exists(child));
        assert!(gui.widget(gui.root()).unwrap().children().is_empty());
    }

    #[test]
    fn test_root_cannot_be_destroyed() {
        let mut gui = Gui::new(Size::new(100.0, 100.0));
        let root = gui.root();
        assert!(!gui.destroy_widget(root));
        assert!(!gui.flag_widget(root));
        assert!(gui.widget_exists(root));
    }

    #[test]
    fn test_flag_twice_queues_once() {
        let mut gui = Gui::new(Size::new(100.0, 100.0));
        let w = gui.create_widget();
        gui.add(w);
        assert!(gui.flag_widget(w));
        assert!(!gui.flag_widget(w));
        assert_eq!(gui.flagged_widgets().count(), 1);

        gui.logic();
        assert!(!gui.widget_exists(w));
        assert_eq!(gui.flagged_widgets().count(), 0);
    }
}
