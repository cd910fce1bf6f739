//! A vertical list of text items with a single selection.
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut gui = Gui::new(Size::new(200.0, 200.0));
//! let list = ListBox::new(&mut gui);
//! gui.add(list.id());
//! for fruit in ["Apple", "Banana", "Cherry"] {
//!     list.add_item(&mut gui, fruit);
//! }
//!
//! list.set_selected_index(&mut gui, 1);
//! assert_eq!(list.selected_index(&gui), Some(1));
//! assert_eq!(list.selected_item(&gui).as_deref(), Some("Banana"));
//! ```

use trellis_core::{Color, Point, Rect, Size, targets};

use crate::gui::Gui;
use crate::widget::{
    Key, KeyEvent, MouseEvent, MouseEventKind, PaintContext, WidgetBehavior, WidgetId,
};

const SELECTION_COLOR: Color = Color::new(0.66, 0.76, 0.96, 1.0);
const BORDER_COLOR: Color = Color::new(0.39, 0.39, 0.39, 1.0);
const TEXT_INSET: f32 = 2.0;

/// State and hooks of a list box widget.
#[derive(Debug, Default)]
pub struct ListBoxBehavior {
    items: Vec<String>,
    selected: Option<usize>,
    /// `None` follows the line height of the effective font.
    item_height: Option<f32>,
    hover_selection: bool,
}

impl ListBoxBehavior {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_hover_selection(&self) -> bool {
        self.hover_selection
    }

    fn item_height(&self, gui: &Gui, id: WidgetId) -> f32 {
        self.item_height
            .unwrap_or_else(|| gui.effective_font(id).line_height)
    }

    /// Set the selection and notify the selection listeners.
    ///
    /// An out-of-range index clears the selection.
    fn select(&mut self, gui: &mut Gui, id: WidgetId, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.items.len());
        tracing::trace!(target: targets::GUI, ?id, selected = ?self.selected, "list selection");
        gui.fire_selection(id, self.selected);
    }

    fn insert(&mut self, index: usize, item: String) -> bool {
        if index > self.items.len() {
            return false;
        }
        self.items.insert(index, item);
        if let Some(selected) = self.selected.as_mut().filter(|s| **s >= index) {
            *selected += 1;
        }
        true
    }

    fn remove_at(&mut self, gui: &mut Gui, id: WidgetId, index: usize) -> Option<String> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        match self.selected {
            Some(selected) if selected == index => self.select(gui, id, None),
            Some(selected) if selected > index => self.selected = Some(selected - 1),
            _ => {}
        }
        Some(item)
    }

    /// The item under a point given in the widget's local coordinates.
    fn index_at(&self, gui: &Gui, id: WidgetId, position: Point) -> Option<usize> {
        let node = gui.widget(id)?;
        let y = position.y - node.margins().top;
        let height = self.item_height(gui, id);
        if y < 0.0 || height <= 0.0 {
            return None;
        }
        let index = (y / height) as usize;
        (index < self.items.len()).then_some(index)
    }

    fn content_width(&self, gui: &Gui, id: WidgetId) -> f32 {
        let font = gui.effective_font(id);
        self.items
            .iter()
            .map(|item| font.text_width(item) + TEXT_INSET * 2.0)
            .fold(0.0, f32::max)
    }

    fn resize_height_to_contents(&mut self, gui: &mut Gui, id: WidgetId) {
        let height = self.item_height(gui, id);
        let Some(node) = gui.widget(id) else {
            return;
        };
        let size = Size::new(
            node.size().width,
            self.items.len() as f32 * height + node.margins().vertical(),
        );
        gui.set_size(id, size);
    }
}

impl WidgetBehavior for ListBoxBehavior {
    fn type_name(&self) -> &'static str {
        "ListBox"
    }

    fn paint_component(&self, ctx: &mut PaintContext<'_>) {
        let height = self.item_height.unwrap_or(ctx.font().line_height);
        let (width, color) = (ctx.width(), ctx.font_color());
        for (index, item) in self.items.iter().enumerate() {
            let y = index as f32 * height;
            if y > ctx.height() {
                break;
            }
            if self.selected == Some(index) {
                ctx.fill_rect(Rect::new(0.0, y, width, height), SELECTION_COLOR);
            }
            ctx.draw_text(Point::new(TEXT_INSET, y), item, color);
        }
    }

    fn paint_border(&self, ctx: &mut PaintContext<'_>) {
        let rect = ctx.rect();
        ctx.draw_rect(rect, BORDER_COLOR);
    }

    fn on_mouse(&mut self, gui: &mut Gui, id: WidgetId, event: &mut MouseEvent) {
        match event.kind {
            MouseEventKind::Move if self.hover_selection => {
                let index = self.index_at(gui, id, event.position);
                if index.is_some() && index != self.selected {
                    self.select(gui, id, index);
                }
            }
            MouseEventKind::Down if event.is_left() => {
                if let Some(index) = self.index_at(gui, id, event.position) {
                    self.select(gui, id, Some(index));
                }
            }
            _ => {}
        }
    }

    fn on_key(&mut self, gui: &mut Gui, id: WidgetId, event: &mut KeyEvent) {
        if !event.is_press() || self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        let target = match event.key {
            Key::ArrowDown => self.selected.map_or(0, |i| (i + 1).min(last)),
            Key::ArrowUp => self.selected.map_or(0, |i| i.saturating_sub(1)),
            Key::Home => 0,
            Key::End => last,
            _ => return,
        };
        if self.selected != Some(target) {
            self.select(gui, id, Some(target));
        }
    }
}

/// Handle to a list box widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListBox(WidgetId);

impl ListBox {
    /// Create a detached, focusable list box.
    pub fn new(gui: &mut Gui) -> Self {
        let id = gui.create_widget_with(ListBoxBehavior::default());
        gui.set_focusable(id, true);
        gui.set_tabable(id, true);
        Self(id)
    }

    /// Wrap an existing widget; `None` if it is not a list box.
    pub fn from_id(gui: &Gui, id: WidgetId) -> Option<Self> {
        gui.behavior::<ListBoxBehavior>(id).map(|_| Self(id))
    }

    #[inline]
    pub fn id(self) -> WidgetId {
        self.0
    }

    fn with<R>(self, gui: &mut Gui, f: impl FnOnce(&mut ListBoxBehavior, &mut Gui) -> R) -> Option<R> {
        gui.with_behavior::<ListBoxBehavior, R>(self.0, f)
    }

    pub fn items(self, gui: &Gui) -> &[String] {
        gui.behavior::<ListBoxBehavior>(self.0)
            .map(|list| list.items())
            .unwrap_or(&[])
    }

    pub fn item_count(self, gui: &Gui) -> usize {
        self.items(gui).len()
    }

    pub fn item(self, gui: &Gui, index: usize) -> Option<String> {
        self.items(gui).get(index).cloned()
    }

    pub fn add_item(self, gui: &mut Gui, item: impl Into<String>) {
        let index = self.item_count(gui);
        self.add_item_at(gui, index, item);
    }

    /// Insert an item; `false` if `index` is past the end.
    pub fn add_item_at(self, gui: &mut Gui, index: usize, item: impl Into<String>) -> bool {
        let item = item.into();
        self.with(gui, |list, _| list.insert(index, item))
            .unwrap_or(false)
    }

    /// Remove the first item equal to `item`.
    pub fn remove_item(self, gui: &mut Gui, item: &str) -> bool {
        match self.items(gui).iter().position(|i| i == item) {
            Some(index) => self.remove_item_at(gui, index).is_some(),
            None => false,
        }
    }

    /// Remove the item at `index`. Removing the selected item clears the
    /// selection.
    pub fn remove_item_at(self, gui: &mut Gui, index: usize) -> Option<String> {
        let id = self.0;
        self.with(gui, |list, gui| list.remove_at(gui, id, index))
            .flatten()
    }

    pub fn clear(self, gui: &mut Gui) {
        let id = self.0;
        self.with(gui, |list, gui| {
            list.items.clear();
            if list.selected.is_some() {
                list.select(gui, id, None);
            }
        });
    }

    pub fn selected_index(self, gui: &Gui) -> Option<usize> {
        gui.behavior::<ListBoxBehavior>(self.0)
            .and_then(|list| list.selected_index())
    }

    pub fn selected_item(self, gui: &Gui) -> Option<String> {
        self.selected_index(gui).and_then(|i| self.item(gui, i))
    }

    /// Select an item, or clear the selection with `None`.
    ///
    /// Selection listeners are notified on every call.
    pub fn set_selected_index(self, gui: &mut Gui, index: impl Into<Option<usize>>) {
        let (id, index) = (self.0, index.into());
        self.with(gui, |list, gui| list.select(gui, id, index));
    }

    /// The height of one row.
    pub fn item_height(self, gui: &Gui) -> f32 {
        gui.behavior::<ListBoxBehavior>(self.0)
            .map_or(0.0, |list| list.item_height(gui, self.0))
    }

    /// Override the row height; `None` follows the font's line height.
    pub fn set_item_height(self, gui: &mut Gui, height: Option<f32>) {
        self.with(gui, |list, _| list.item_height = height.map(|h| h.max(0.0)));
    }

    pub fn is_hover_selection(self, gui: &Gui) -> bool {
        gui.behavior::<ListBoxBehavior>(self.0)
            .is_some_and(|list| list.is_hover_selection())
    }

    /// Select the item under the pointer as it moves.
    pub fn set_hover_selection(self, gui: &mut Gui, hover: bool) {
        self.with(gui, |list, _| list.hover_selection = hover);
    }

    /// The width needed to show the widest item.
    pub fn content_width(self, gui: &Gui) -> f32 {
        gui.behavior::<ListBoxBehavior>(self.0)
            .map_or(0.0, |list| list.content_width(gui, self.0))
    }

    /// Make the list exactly tall enough for all of its items.
    pub fn resize_height_to_contents(self, gui: &mut Gui) {
        let id = self.0;
        self.with(gui, |list, gui| list.resize_height_to_contents(gui, id));
    }

    /// The item under an absolute point.
    pub fn index_at(self, gui: &Gui, absolute: Point) -> Option<usize> {
        let origin = gui.absolute_position(self.0)?;
        gui.behavior::<ListBoxBehavior>(self.0)?
            .index_at(gui, self.0, absolute - origin)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::input::QueuedInput;
    use crate::widget::{KeyboardModifiers, MouseButton, SelectionEvent};

    fn fruit_list(gui: &mut Gui) -> ListBox {
        let list = ListBox::new(gui);
        gui.set_bounds(list.id(), Rect::new(0.0, 0.0, 100.0, 100.0));
        list.set_item_height(gui, Some(20.0));
        gui.add(list.id());
        for item in ["Apple", "Banana", "Cherry"] {
            list.add_item(gui, item);
        }
        list
    }

    fn selections(gui: &mut Gui, list: ListBox) -> Rc<RefCell<Vec<Option<usize>>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        gui.add_selection_listener(list.id(), move |_gui, event: &mut SelectionEvent| {
            sink.borrow_mut().push(event.index);
        });
        seen
    }

    #[test]
    fn test_insert_and_remove_keep_selection_on_item() {
        let mut gui = Gui::new(Size::new(200.0, 200.0));
        let list = fruit_list(&mut gui);
        list.set_selected_index(&mut gui, 1);

        assert!(list.add_item_at(&mut gui, 0, "Apricot"));
        assert_eq!(list.selected_item(&gui).as_deref(), Some("Banana"));
        assert!(!list.add_item_at(&mut gui, 10, "Nope"));

        assert!(list.remove_item(&mut gui, "Apricot"));
        assert_eq!(list.selected_index(&gui), Some(1));

        assert_eq!(list.remove_item_at(&mut gui, 1).as_deref(), Some("Banana"));
        assert_eq!(list.selected_index(&gui), None);
        assert_eq!(list.items(&gui), &["Apple".to_string(), "Cherry".to_string()]);
    }

    #[test]
    fn test_out_of_range_selection_clears() {
        let mut gui = Gui::new(Size::new(200.0, 200.0));
        let list = fruit_list(&mut gui);
        let seen = selections(&mut gui, list);
        list.set_selected_index(&mut gui, 7);
        assert_eq!(list.selected_index(&gui), None);
        assert_eq!(seen.borrow().as_slice(), &[None]);
    }

    #[test]
    fn test_click_selects_item() {
        let input = QueuedInput::new();
        let mut gui = Gui::new(Size::new(200.0, 200.0));
        gui.set_input(Box::new(input.clone()));
        let list = fruit_list(&mut gui);
        let seen = selections(&mut gui, list);

        input.click(10.0, 45.0, MouseButton::Left);
        gui.logic();
        assert_eq!(list.selected_index(&gui), Some(2));
        assert_eq!(seen.borrow().as_slice(), &[Some(2)]);
        assert_eq!(gui.focused_widget(), Some(list.id()));
    }

    #[test]
    fn test_navigation_keys() {
        let input = QueuedInput::new();
        let mut gui = Gui::new(Size::new(200.0, 200.0));
        gui.set_input(Box::new(input.clone()));
        let list = fruit_list(&mut gui);
        gui.request_focus(list.id());

        input.key_press(Key::ArrowDown, KeyboardModifiers::NONE);
        gui.logic();
        assert_eq!(list.selected_index(&gui), Some(0));

        input.key_press(Key::End, KeyboardModifiers::NONE);
        input.key_press(Key::ArrowDown, KeyboardModifiers::NONE);
        gui.logic();
        assert_eq!(list.selected_index(&gui), Some(2));

        input.key_press(Key::ArrowUp, KeyboardModifiers::NONE);
        gui.logic();
        assert_eq!(list.selected_index(&gui), Some(1));

        input.key_press(Key::Home, KeyboardModifiers::NONE);
        gui.logic();
        assert_eq!(list.selected_index(&gui), Some(0));
    }

    #[test]
    fn test_hover_selection_follows_pointer() {
        let input = QueuedInput::new();
        let mut gui = Gui::new(Size::new(200.0, 200.0));
        gui.set_input(Box::new(input.clone()));
        let list = fruit_list(&mut gui);

        input.mouse_move(10.0, 25.0);
        gui.logic();
        assert_eq!(list.selected_index(&gui), None);

        list.set_hover_selection(&mut gui, true);
        input.mouse_move(10.0, 26.0);
        gui.logic();
        assert_eq!(list.selected_index(&gui), Some(1));
    }

    #[test]
    fn test_resize_height_to_contents() {
        let mut gui = Gui::new(Size::new(200.0, 200.0));
        let list = fruit_list(&mut gui);
        list.resize_height_to_contents(&mut gui);
        assert_eq!(gui.widget(list.id()).unwrap().size(), Size::new(100.0, 60.0));
        assert!(list.content_width(&gui) > 0.0);
    }
}
