//! Tests for the widget tree and focus handling.

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use trellis_core::{Color, Point, Rect, Size};

    use crate::graphics::Font;
    use crate::gui::Gui;
    use crate::widget::{FocusEvent, FocusEventKind, FocusManager, WidgetBehavior, WidgetId};

    type FocusLog = Rc<RefCell<Vec<(WidgetId, FocusEventKind)>>>;

    fn setup() -> Gui {
        Gui::new(Size::new(400.0, 300.0))
    }

    fn focusable(gui: &mut Gui, parent: WidgetId) -> WidgetId {
        let id = gui.create_widget();
        gui.set_size(id, Size::new(20.0, 20.0));
        gui.set_focusable(id, true);
        gui.set_tabable(id, true);
        gui.add_child(parent, id);
        id
    }

    fn log_focus(gui: &mut Gui, ids: &[WidgetId]) -> FocusLog {
        let log: FocusLog = Rc::new(RefCell::new(Vec::new()));
        for &id in ids {
            let sink = log.clone();
            gui.add_focus_listener(id, move |_gui, event: &mut FocusEvent| {
                sink.borrow_mut().push((event.source, event.kind));
            });
        }
        log
    }

    #[test]
    fn test_focus_transfer_emits_one_pair() {
        let mut gui = setup();
        let root = gui.root();
        let a = focusable(&mut gui, root);
        let b = focusable(&mut gui, root);
        let log = log_focus(&mut gui, &[a, b]);

        assert!(gui.request_focus(a));
        assert!(gui.request_focus(b));
        assert_eq!(
            log.borrow().as_slice(),
            &[
                (a, FocusEventKind::Gained),
                (a, FocusEventKind::Lost),
                (b, FocusEventKind::Gained),
            ]
        );

        log.borrow_mut().clear();
        assert!(gui.request_focus(b));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_focus_rejected_for_unfit_widgets() {
        let mut gui = setup();
        let root = gui.root();
        let plain = gui.create_widget();
        gui.add(plain);
        let disabled = focusable(&mut gui, root);
        gui.set_enabled(disabled, false);
        let detached = gui.create_widget();
        gui.set_focusable(detached, true);

        let parent = gui.create_widget();
        gui.add(parent);
        let nested = focusable(&mut gui, parent);
        gui.set_visible(parent, false);

        let log = log_focus(&mut gui, &[plain, disabled, detached, nested]);
        for id in [plain, disabled, detached, nested] {
            assert!(!gui.request_focus(id));
        }
        assert!(log.borrow().is_empty());
        assert_eq!(gui.focused_widget(), None);
    }

    #[test]
    fn test_removing_focused_widget_sends_lost_while_attached() {
        let mut gui = setup();
        let panel = gui.create_widget();
        gui.add(panel);
        let field = focusable(&mut gui, panel);
        gui.request_focus(field);

        let parent_at_lost = Rc::new(RefCell::new(None));
        let sink = parent_at_lost.clone();
        gui.add_focus_listener(field, move |gui, event: &mut FocusEvent| {
            if event.kind == FocusEventKind::Lost {
                *sink.borrow_mut() = gui.widget(event.source).and_then(|n| n.parent());
            }
        });

        assert!(gui.remove(panel));
        assert_eq!(*parent_at_lost.borrow(), Some(panel));
        assert_eq!(gui.focused_widget(), None);
        assert_eq!(gui.widget(panel).unwrap().parent(), None);
        assert!(!gui.widget(gui.root()).unwrap().children().contains(&panel));
    }

    #[test]
    fn test_hiding_ancestor_drops_focus() {
        let mut gui = setup();
        let panel = gui.create_widget();
        gui.add(panel);
        let field = focusable(&mut gui, panel);
        gui.request_focus(field);

        gui.set_visible(panel, false);
        assert_eq!(gui.focused_widget(), None);
    }

    #[test]
    fn test_tab_order_is_preorder_and_skips_hidden_subtrees() {
        let mut gui = setup();
        let root = gui.root();
        let first = focusable(&mut gui, root);
        let group = gui.create_widget();
        gui.add(group);
        let inner = focusable(&mut gui, group);
        let hidden_group = gui.create_widget();
        gui.add(hidden_group);
        let _skipped = focusable(&mut gui, hidden_group);
        gui.set_visible(hidden_group, false);
        let last = focusable(&mut gui, root);

        let order = FocusManager::tab_order(gui.tree(), root);
        assert_eq!(order, vec![first, inner, last]);
    }

    #[test]
    fn test_focus_next_and_previous_wrap() {
        let mut gui = setup();
        let root = gui.root();
        let a = focusable(&mut gui, root);
        let b = focusable(&mut gui, root);
        let c = focusable(&mut gui, root);

        assert!(gui.focus_next());
        assert_eq!(gui.focused_widget(), Some(a));
        gui.request_focus(c);
        assert!(gui.focus_next());
        assert_eq!(gui.focused_widget(), Some(a));
        assert!(gui.focus_previous());
        assert_eq!(gui.focused_widget(), Some(c));
        assert!(gui.focus_previous());
        assert_eq!(gui.focused_widget(), Some(b));
    }

    #[test]
    fn test_tab_walks_from_focused_non_tabable_widget() {
        let mut gui = setup();
        let root = gui.root();
        let a = focusable(&mut gui, root);
        let b = focusable(&mut gui, root);
        gui.set_tabable(b, false);
        let c = focusable(&mut gui, root);

        assert!(gui.request_focus(b));
        assert!(gui.focus_next());
        assert_eq!(gui.focused_widget(), Some(c));

        assert!(gui.request_focus(b));
        assert!(gui.focus_previous());
        assert_eq!(gui.focused_widget(), Some(a));
    }

    #[test]
    fn test_tab_walks_from_focused_container_into_children() {
        let mut gui = setup();
        let root = gui.root();
        let before = focusable(&mut gui, root);
        let panel = gui.create_widget();
        gui.set_focusable(panel, true);
        gui.add(panel);
        let inner = focusable(&mut gui, panel);
        let _after = focusable(&mut gui, root);

        assert!(gui.request_focus(panel));
        gui.focus_next();
        assert_eq!(gui.focused_widget(), Some(inner));
        assert!(gui.request_focus(panel));
        gui.focus_previous();
        assert_eq!(gui.focused_widget(), Some(before));
    }

    #[test]
    fn test_flagged_ancestor_drops_and_blocks_focus() {
        let mut gui = setup();
        gui.set_destroying_flagged_widgets(false);
        let root = gui.root();
        let panel = gui.create_widget();
        gui.add(panel);
        let child = focusable(&mut gui, panel);
        let other = focusable(&mut gui, root);
        let log = log_focus(&mut gui, &[child]);

        assert!(gui.request_focus(child));
        assert!(gui.flag_widget(panel));
        assert_eq!(gui.focused_widget(), None);
        assert_eq!(
            log.borrow().as_slice(),
            &[(child, FocusEventKind::Gained), (child, FocusEventKind::Lost)]
        );

        assert!(gui.is_frozen(child));
        assert!(!gui.request_focus(child));
        assert!(!gui.request_modal_focus(child));
        assert!(gui.focus_next());
        assert_eq!(gui.focused_widget(), Some(other));

        gui.logic();
        assert!(gui.widget_exists(child));
        assert!(!gui.request_focus(child));
    }

    #[test]
    fn test_focus_previous_without_focus_picks_last() {
        let mut gui = setup();
        let root = gui.root();
        let _a = focusable(&mut gui, root);
        let b = focusable(&mut gui, root);
        assert!(gui.focus_previous());
        assert_eq!(gui.focused_widget(), Some(b));
    }

    #[test]
    fn test_modal_confines_tabbing_and_focus() {
        let mut gui = setup();
        let root = gui.root();
        let outside = focusable(&mut gui, root);
        let dialog = gui.create_widget();
        gui.add(dialog);
        let ok = focusable(&mut gui, dialog);
        let cancel = focusable(&mut gui, dialog);

        gui.request_focus(outside);
        assert!(gui.request_modal_focus(dialog));
        assert_eq!(gui.focused_widget(), None);
        assert!(!gui.request_focus(outside));

        gui.focus_next();
        assert_eq!(gui.focused_widget(), Some(ok));
        gui.focus_next();
        assert_eq!(gui.focused_widget(), Some(cancel));
        gui.focus_next();
        assert_eq!(gui.focused_widget(), Some(ok));

        assert!(!gui.release_modal_focus(ok));
        assert!(gui.release_modal_focus(dialog));
        assert!(gui.request_focus(outside));
    }

    #[test]
    fn test_modal_widget_removed_clears_capture() {
        let mut gui = setup();
        let dialog = gui.create_widget();
        gui.add(dialog);
        gui.request_modal_focus(dialog);
        gui.remove(dialog);
        assert_eq!(gui.modal_widget(), None);
        assert!(!gui.request_modal_focus(dialog));
    }

    #[test]
    fn test_stale_handle_resolves_to_none() {
        let mut gui = setup();
        let w = gui.create_widget();
        gui.add(w);
        gui.destroy_widget(w);

        assert!(gui.widget(w).is_none());
        assert!(!gui.widget_exists(w));
        gui.set_size(w, Size::new(1.0, 1.0));
        assert!(!gui.request_focus(w));
        assert!(!gui.remove(w));
    }

    #[test]
    fn test_appearance_is_inherited() {
        let mut gui = setup();
        let panel = gui.create_widget();
        gui.add(panel);
        let label = gui.create_widget();
        gui.add_child(panel, label);

        assert_eq!(gui.effective_font(label), &gui.config().default_font);
        gui.set_font(panel, Some(Font::new("mono", 10.0, 14.0)));
        gui.set_font_color(panel, Some(Color::RED));
        assert_eq!(gui.effective_font(label).family, "mono");
        assert_eq!(gui.effective_font_color(label), Color::RED);

        gui.set_font_color(label, Some(Color::BLUE));
        assert_eq!(gui.effective_font_color(label), Color::BLUE);
    }

    #[derive(Default)]
    struct TreeWatcher {
        added: usize,
    }

    impl WidgetBehavior for TreeWatcher {
        fn added_to_tree(&mut self, _gui: &mut Gui, _id: WidgetId) {
            self.added += 1;
        }
    }

    #[test]
    fn test_added_to_tree_reaches_subtree_when_attached_to_root() {
        let mut gui = setup();
        let panel = gui.create_widget();
        let watcher = gui.create_widget_with(TreeWatcher::default());
        gui.add_child(panel, watcher);
        assert_eq!(gui.behavior::<TreeWatcher>(watcher).unwrap().added, 0);

        gui.add(panel);
        assert_eq!(gui.behavior::<TreeWatcher>(watcher).unwrap().added, 1);
    }

    #[test]
    fn test_hit_test_prefers_later_sibling() {
        let mut gui = setup();
        let under = gui.create_widget();
        gui.set_bounds(under, Rect::new(0.0, 0.0, 50.0, 50.0));
        gui.add(under);
        let over = gui.create_widget();
        gui.set_bounds(over, Rect::new(25.0, 25.0, 50.0, 50.0));
        gui.add(over);

        assert_eq!(gui.tree().hit_test(gui.root(), Point::new(30.0, 30.0)), Some(over));
        assert_eq!(gui.tree().hit_test(gui.root(), Point::new(10.0, 10.0)), Some(under));

        gui.send_to_back(over);
        assert_eq!(gui.tree().hit_test(gui.root(), Point::new(30.0, 30.0)), Some(under));
    }
}
