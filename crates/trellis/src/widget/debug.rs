//! Human-readable dumps of the widget tree.

use std::fmt::Write;

use trellis_core::TreeFormatOptions;

use super::tree::WidgetId;
use crate::gui::Gui;

/// Debug utility for visualizing widget trees.
///
/// ```
/// use trellis::prelude::*;
/// use trellis::widget::TreeDebug;
/// use trellis_core::TreeFormatOptions;
///
/// let mut gui = Gui::new(Size::new(100.0, 100.0));
/// let button = gui.create_widget();
/// gui.set_name(button, "ok");
/// gui.add(button);
///
/// let dump = TreeDebug::with_options(&gui, TreeFormatOptions::minimal()).format_subtree(gui.root());
/// assert_eq!(dump, "(unnamed)\n\u{2514}\u{2500}\u{2500} ok\n");
/// ```
#[derive(Clone)]
pub struct TreeDebug<'a> {
    gui: &'a Gui,
    options: TreeFormatOptions,
}

impl<'a> TreeDebug<'a> {
    pub fn new(gui: &'a Gui) -> Self {
        Self::with_options(gui, TreeFormatOptions::default())
    }

    pub fn with_options(gui: &'a Gui, options: TreeFormatOptions) -> Self {
        Self { gui, options }
    }

    /// Format the subtree rooted at `root`, one widget per line.
    pub fn format_subtree(&self, root: WidgetId) -> String {
        let mut output = String::new();
        self.format_into(root, 0, true, &mut output);
        output
    }

    fn format_into(&self, id: WidgetId, depth: usize, is_last: bool, output: &mut String) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }
        let Some(node) = self.gui.widget(id) else {
            return;
        };

        output.push_str(&self.options.prefix(depth, is_last));
        output.push_str(if node.name().is_empty() { "(unnamed)" } else { node.name() });

        if self.options.show_ids {
            let _ = write!(output, " [{id:?}]");
        }
        if self.options.show_types {
            let _ = write!(output, " ({})", node.type_name());
        }
        if self.options.show_geometry {
            let bounds = node.bounds();
            let _ = write!(
                output,
                " @({}, {}) {}x{}",
                bounds.left(),
                bounds.top(),
                bounds.width(),
                bounds.height()
            );
        }
        if self.options.show_flags {
            let flags = [
                (!node.is_visible(), "hidden"),
                (!node.is_enabled(), "disabled"),
                (node.is_focusable(), "focusable"),
                (node.is_tabable(), "tabable"),
                (node.is_flagged(), "flagged"),
                (self.gui.focused_widget() == Some(id), "focused"),
                (self.gui.modal_widget() == Some(id), "modal"),
            ];
            let set: Vec<&str> = flags.iter().filter(|(on, _)| *on).map(|(_, name)| *name).collect();
            if !set.is_empty() {
                let _ = write!(output, " [{}]", set.join(", "));
            }
        }
        output.push('\n');

        let children = node.children();
        for (i, &child) in children.iter().enumerate() {
            self.format_into(child, depth + 1, i + 1 == children.len(), output);
        }
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::{Rect, Size, TreeStyle};

    use super::*;

    #[test]
    fn test_ascii_tree_with_geometry() {
        let mut gui = Gui::new(Size::new(100.0, 50.0));
        gui.set_name(gui.root(), "desktop");
        let a = gui.create_widget();
        gui.set_name(a, "a");
        gui.set_bounds(a, Rect::new(1.0, 2.0, 3.0, 4.0));
        gui.add(a);
        let b = gui.create_widget();
        gui.set_name(b, "b");
        gui.add(b);

        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            show_ids: false,
            show_types: false,
            ..TreeFormatOptions::default()
        };
        let dump = TreeDebug::with_options(&gui, options).format_subtree(gui.root());
        assert_eq!(dump, "desktop @(0, 0) 100x50\n+-- a @(1, 2) 3x4\n`-- b @(0, 0) 0x0\n");
    }

    #[test]
    fn test_flags_and_depth_limit() {
        let mut gui = Gui::new(Size::new(100.0, 50.0));
        let a = gui.create_widget();
        gui.set_name(a, "a");
        gui.add(a);
        gui.set_visible(a, false);
        let deep = gui.create_widget();
        gui.add_child(a, deep);

        let options = TreeFormatOptions::minimal().with_max_depth(1);
        let dump = TreeDebug::with_options(&gui, TreeFormatOptions { show_flags: true, ..options })
            .format_subtree(gui.root());
        assert!(dump.contains("a [hidden]"));
        assert_eq!(dump.lines().count(), 2);
    }
}
