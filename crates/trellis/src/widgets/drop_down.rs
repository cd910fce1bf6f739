//! A single-line selector that opens a [`ListBox`] popup.
//!
//! The drop-down shows the selected item as its text. Opening it attaches
//! its list box to the desktop root, right below the drop-down, and gives
//! the list modal focus until it closes again:
//!
//! - clicking an item commits it and closes the list
//! - Enter commits the highlighted item and closes the list
//! - arrow, Home and End keys inside the list commit as they move
//! - a left press or release outside the list closes it
//!
//! While closed and focused, Space opens the list and the arrow keys step
//! through the items, firing an [`ActionEvent`](crate::widget::ActionEvent)
//! for every change.
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut gui = Gui::new(Size::new(300.0, 300.0));
//! let dd = DropDown::new(&mut gui);
//! gui.set_bounds(dd.id(), Rect::new(10.0, 10.0, 120.0, 24.0));
//! gui.add(dd.id());
//! for size in ["Small", "Medium", "Large"] {
//!     dd.add_item(&mut gui, size);
//! }
//!
//! dd.set_selected_index(&mut gui, 1);
//! assert_eq!(gui.widget(dd.id()).unwrap().text(), "Medium");
//!
//! dd.show_drop_down(&mut gui);
//! assert!(dd.is_drop_down_showing(&gui));
//! assert_eq!(gui.modal_widget(), dd.list(&gui).map(|list| list.id()));
//! ```

use trellis_core::{Color, Consumable, ListenerId, Margins, Observers, Point, Size, targets};

use super::list_box::ListBox;
use crate::gui::Gui;
use crate::widget::{
    Key, KeyEvent, MouseEvent, MouseEventKind, PaintContext, WidgetBehavior, WidgetEvent,
    WidgetId, WidgetNotification,
};

/// Default cap on the height of the open list, in pixels.
pub const DEFAULT_MAX_DROP_DOWN_HEIGHT: f32 = 400.0;

const FOCUS_COLOR: Color = Color::new(200.0 / 255.0, 220.0 / 255.0, 230.0 / 255.0, 1.0);
const OPEN_COLOR: Color = Color::new(160.0 / 255.0, 180.0 / 255.0, 190.0 / 255.0, 1.0);
const BORDER_COLOR: Color = Color::new(100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0, 1.0);
const ARROW_SIZE: f32 = 8.0;

/// What happened to a drop-down.
#[derive(Debug, Clone, PartialEq)]
pub enum DropDownEventKind {
    Shown,
    Hidden,
    ItemAdded(String),
    ItemRemoved(String),
    MaxHeightChanged(f32),
    ResizeToWidestItemChanged(bool),
    /// The drop-down is about to be destroyed.
    Destroyed,
}

/// A notification for drop-down listeners.
#[derive(Debug, Clone)]
pub struct DropDownEvent {
    pub source: WidgetId,
    pub kind: DropDownEventKind,
    consumed: bool,
}

impl DropDownEvent {
    pub fn new(source: WidgetId, kind: DropDownEventKind) -> Self {
        Self {
            source,
            kind,
            consumed: false,
        }
    }
}

impl Consumable for DropDownEvent {
    fn is_consumed(&self) -> bool {
        self.consumed
    }

    fn consume(&mut self) {
        self.consumed = true;
    }
}

/// State and hooks of a drop-down widget.
pub struct DropDownBehavior {
    list: ListBox,
    selected: Option<usize>,
    max_height: f32,
    resize_to_widest: bool,
    list_offset: Point,
    list_padding: Size,
    showing: bool,
    mouse_inside: bool,
    listeners: Observers<Gui, DropDownEvent>,
}

impl std::fmt::Debug for DropDownBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropDownBehavior")
            .field("list", &self.list)
            .field("selected", &self.selected)
            .field("showing", &self.showing)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl DropDownBehavior {
    fn new(list: ListBox) -> Self {
        Self {
            list,
            selected: None,
            max_height: DEFAULT_MAX_DROP_DOWN_HEIGHT,
            resize_to_widest: false,
            list_offset: Point::ZERO,
            list_padding: Size::ZERO,
            showing: false,
            mouse_inside: false,
            listeners: Observers::new(),
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_showing(&self) -> bool {
        self.showing
    }

    fn emit(&self, gui: &mut Gui, id: WidgetId, kind: DropDownEventKind) {
        self.listeners.emit(gui, &mut DropDownEvent::new(id, kind));
    }

    /// Select through the list so both agree, then mirror the item as text.
    fn select(&mut self, gui: &mut Gui, id: WidgetId, index: Option<usize>) {
        self.list.set_selected_index(gui, index);
        self.selected = self.list.selected_index(gui);
        let text = self
            .selected
            .and_then(|i| self.list.item(gui, i))
            .unwrap_or_default();
        gui.set_text(id, text);
        gui.fire_selection(id, self.selected);
    }

    /// Re-sync after the list changed under the selection.
    fn resync(&mut self, gui: &mut Gui, id: WidgetId) {
        let current = self.list.selected_index(gui);
        if current != self.selected {
            self.select(gui, id, current);
        }
    }

    fn show(&mut self, gui: &mut Gui, id: WidgetId) {
        let list = self.list.id();
        gui.remove(list);
        if !gui.add(list) {
            return;
        }
        gui.set_visible(list, true);
        self.position_list(gui, id);
        self.resize_list(gui, id);
        self.list.set_selected_index(gui, self.selected);
        gui.request_modal_focus(list);
        self.showing = true;
        tracing::debug!(target: targets::GUI, ?id, "drop-down shown");
        self.emit(gui, id, DropDownEventKind::Shown);
    }

    fn hide(&mut self, gui: &mut Gui, id: WidgetId) {
        if !self.showing {
            return;
        }
        let list = self.list.id();
        gui.set_visible(list, false);
        gui.remove(list);
        gui.release_modal_focus(list);
        self.showing = false;
        gui.request_focus(id);
        tracing::debug!(target: targets::GUI, ?id, "drop-down hidden");
        self.emit(gui, id, DropDownEventKind::Hidden);
    }

    fn position_list(&self, gui: &mut Gui, id: WidgetId) {
        let root = gui.root();
        let (Some(origin), Some(root_origin)) = (gui.absolute_position(id), gui.absolute_position(root))
        else {
            return;
        };
        let (Some(node), Some(root_node)) = (gui.widget(id), gui.widget(root)) else {
            return;
        };
        let height = node.size().height;
        let root_margins = root_node.margins();
        let location = Point::new(
            origin.x - root_origin.x - root_margins.left + self.list_offset.x,
            origin.y - root_origin.y - root_margins.top + height + self.list_offset.y,
        );
        gui.set_location(self.list.id(), location);
    }

    fn resize_list(&self, gui: &mut Gui, id: WidgetId) {
        let list = self.list.id();
        let Some(mut width) = gui.widget(id).map(|n| n.size().width) else {
            return;
        };
        if self.resize_to_widest {
            let content = self.list.content_width(gui);
            let margins = gui.widget(list).map_or(0.0, |n| n.margins().horizontal());
            if width < content {
                width = content + margins + 5.0;
            }
        }

        let height = if self.list.item_count(gui) > 0 {
            self.list.resize_height_to_contents(gui);
            gui.widget(list).map_or(0.0, |n| n.size().height)
        } else {
            self.list.item_height(gui)
        };
        let height = height.min(self.max_height);
        gui.set_size(
            list,
            Size::new(width + self.list_padding.width, height + self.list_padding.height),
        );
    }

    fn fit_height_to_font(&self, gui: &mut Gui, id: WidgetId) {
        let line_height = gui.effective_font(id).line_height;
        let Some(node) = gui.widget(id) else {
            return;
        };
        if node.inner_size().height < line_height {
            let size = Size::new(node.size().width, line_height + node.margins().vertical());
            gui.set_size(id, size);
        }
    }

    fn handle_keyboard(&mut self, gui: &mut Gui, id: WidgetId, event: &mut KeyEvent) {
        let before = self.selected;
        match event.key {
            Key::Space => {
                self.show(gui, id);
                event.consume();
                return;
            }
            Key::ArrowDown | Key::ArrowRight => {
                event.consume();
                let in_list = self.list.selected_index(gui);
                if in_list != self.selected {
                    self.select(gui, id, in_list);
                } else {
                    let next = self.selected.map_or(0, |i| i + 1);
                    if next < self.list.item_count(gui) {
                        self.list.set_selected_index(gui, next);
                    }
                    let in_list = self.list.selected_index(gui);
                    self.select(gui, id, in_list);
                }
            }
            Key::ArrowUp | Key::ArrowLeft => {
                let in_list = self.list.selected_index(gui);
                if in_list != self.selected {
                    event.consume();
                    self.select(gui, id, in_list);
                } else if let Some(current) = self.selected.filter(|&i| i > 0) {
                    event.consume();
                    self.list.set_selected_index(gui, current - 1);
                    let in_list = self.list.selected_index(gui);
                    self.select(gui, id, in_list);
                }
            }
            _ => return,
        }
        if self.selected != before {
            gui.fire_action(id);
        }
    }
}

impl WidgetBehavior for DropDownBehavior {
    fn type_name(&self) -> &'static str {
        "DropDown"
    }

    fn paint_background(&self, ctx: &mut PaintContext<'_>) {
        let color = if self.showing {
            OPEN_COLOR
        } else if ctx.has_focus() {
            FOCUS_COLOR
        } else {
            ctx.back_color()
        };
        let rect = ctx.rect();
        ctx.fill_rect(rect, color);

        let (w, h) = (rect.width(), rect.height());
        ctx.draw_line(Point::new(0.0, 0.0), Point::new(w, 0.0), BORDER_COLOR);
        ctx.draw_line(Point::new(0.0, 0.0), Point::new(0.0, h), BORDER_COLOR);
        ctx.draw_line(Point::new(w, 0.0), Point::new(w, h), BORDER_COLOR);
        ctx.draw_line(Point::new(0.0, h), Point::new(w, h), BORDER_COLOR);
    }

    fn paint_component(&self, ctx: &mut PaintContext<'_>) {
        let color = ctx.font_color();
        let text_y = (ctx.height() - ctx.font().line_height) / 2.0;
        let text = ctx.text();
        ctx.draw_text(Point::new(0.0, text_y), text, color);

        let x = ctx.width() - ARROW_SIZE * 2.0 - 2.0;
        let y = (ctx.height() - 4.0) / 2.0;
        for step in (1..=ARROW_SIZE as u32).rev() {
            let i = step as f32;
            ctx.draw_line(
                Point::new(ARROW_SIZE * 2.0 - i + x, i + y),
                Point::new(i + x, i + y),
                color,
            );
        }
    }

    fn on_mouse(&mut self, gui: &mut Gui, id: WidgetId, event: &mut MouseEvent) {
        match event.kind {
            MouseEventKind::Down if event.is_left() => {
                self.show(gui, id);
                event.consume();
            }
            MouseEventKind::Enter => self.mouse_inside = true,
            MouseEventKind::Leave => self.mouse_inside = false,
            _ => {}
        }
    }

    fn on_key(&mut self, gui: &mut Gui, id: WidgetId, event: &mut KeyEvent) {
        if event.is_press() {
            self.handle_keyboard(gui, id, event);
        }
    }

    fn on_notify(&mut self, gui: &mut Gui, id: WidgetId, event: &mut WidgetEvent) {
        match event.notification {
            WidgetNotification::FontChanged => self.fit_height_to_font(gui, id),
            WidgetNotification::Destroyed => {
                self.emit(gui, id, DropDownEventKind::Destroyed);
                gui.destroy_widget(self.list.id());
            }
            _ => {}
        }
    }
}

/// Handle to a drop-down widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropDown(WidgetId);

impl DropDown {
    /// Create a detached drop-down together with its hidden list box.
    pub fn new(gui: &mut Gui) -> Self {
        let list = ListBox::new(gui);
        list.set_hover_selection(gui, true);
        gui.set_visible(list.id(), false);

        let id = gui.create_widget_with(DropDownBehavior::new(list));
        gui.set_focusable(id, true);
        gui.set_tabable(id, true);
        gui.set_margins(id, Margins::new(2.0, 4.0, 2.0, 4.0));
        gui.with_behavior::<DropDownBehavior, _>(id, |dd, gui| dd.fit_height_to_font(gui, id));

        Self::connect_list(gui, id, list);
        Self(id)
    }

    fn connect_list(gui: &mut Gui, id: WidgetId, list: ListBox) {
        gui.add_key_listener(list.id(), move |gui, event| {
            if !event.is_press() {
                return;
            }
            if matches!(event.key, Key::ArrowDown | Key::ArrowUp | Key::Home | Key::End | Key::Enter) {
                event.consume();
                let dd = DropDown(id);
                dd.set_selected_index(gui, list.selected_index(gui));
                if event.key == Key::Enter {
                    dd.hide_drop_down(gui);
                }
            }
        });

        gui.add_mouse_listener(list.id(), move |gui, event| match event.kind {
            MouseEventKind::Click if event.is_left() => {
                let dd = DropDown(id);
                let before = dd.selected_index(gui);
                dd.hide_drop_down(gui);
                dd.set_selected_index(gui, list.selected_index(gui));
                if dd.selected_index(gui) != before {
                    gui.fire_action(id);
                }
            }
            MouseEventKind::ModalDown | MouseEventKind::ModalUp if event.is_left() => {
                DropDown(id).hide_drop_down(gui);
                event.consume();
            }
            _ => {}
        });
    }

    /// Wrap an existing widget; `None` if it is not a drop-down.
    pub fn from_id(gui: &Gui, id: WidgetId) -> Option<Self> {
        gui.behavior::<DropDownBehavior>(id).map(|_| Self(id))
    }

    #[inline]
    pub fn id(self) -> WidgetId {
        self.0
    }

    fn with<R>(self, gui: &mut Gui, f: impl FnOnce(&mut DropDownBehavior, &mut Gui, WidgetId) -> R) -> Option<R> {
        let id = self.0;
        gui.with_behavior::<DropDownBehavior, R>(id, |dd, gui| f(dd, gui, id))
    }

    fn state(self, gui: &Gui) -> Option<&DropDownBehavior> {
        gui.behavior::<DropDownBehavior>(self.0)
    }

    /// The popup list.
    pub fn list(self, gui: &Gui) -> Option<ListBox> {
        self.state(gui).map(|dd| dd.list)
    }

    // =========================================================================
    // Items
    // =========================================================================

    pub fn add_item(self, gui: &mut Gui, item: impl Into<String>) {
        let item = item.into();
        self.with(gui, |dd, gui, id| {
            dd.list.add_item(gui, item.clone());
            dd.emit(gui, id, DropDownEventKind::ItemAdded(item));
        });
    }

    /// Insert an item; `false` if `index` is past the end.
    pub fn add_item_at(self, gui: &mut Gui, index: usize, item: impl Into<String>) -> bool {
        let item = item.into();
        self.with(gui, |dd, gui, id| {
            if !dd.list.add_item_at(gui, index, item.clone()) {
                return false;
            }
            dd.selected = dd.list.selected_index(gui);
            dd.emit(gui, id, DropDownEventKind::ItemAdded(item));
            true
        })
        .unwrap_or(false)
    }

    /// Remove the first item equal to `item`.
    pub fn remove_item(self, gui: &mut Gui, item: &str) -> bool {
        let index = self
            .list(gui)
            .and_then(|list| list.items(gui).iter().position(|i| i == item));
        match index {
            Some(index) => self.remove_item_at(gui, index).is_some(),
            None => false,
        }
    }

    pub fn remove_item_at(self, gui: &mut Gui, index: usize) -> Option<String> {
        self.with(gui, |dd, gui, id| {
            let item = dd.list.remove_item_at(gui, index)?;
            dd.resync(gui, id);
            dd.emit(gui, id, DropDownEventKind::ItemRemoved(item.clone()));
            Some(item)
        })
        .flatten()
    }

    pub fn item_count(self, gui: &Gui) -> usize {
        self.list(gui).map_or(0, |list| list.item_count(gui))
    }

    pub fn item(self, gui: &Gui, index: usize) -> Option<String> {
        self.list(gui)?.item(gui, index)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select an item, or clear the selection with `None`.
    ///
    /// The text mirrors the selected item, and selection listeners are
    /// notified on every call.
    pub fn set_selected_index(self, gui: &mut Gui, index: impl Into<Option<usize>>) {
        let index = index.into();
        self.with(gui, |dd, gui, id| dd.select(gui, id, index));
    }

    pub fn selected_index(self, gui: &Gui) -> Option<usize> {
        self.state(gui).and_then(|dd| dd.selected_index())
    }

    // =========================================================================
    // Popup
    // =========================================================================

    pub fn show_drop_down(self, gui: &mut Gui) {
        self.with(gui, |dd, gui, id| dd.show(gui, id));
    }

    pub fn hide_drop_down(self, gui: &mut Gui) {
        self.with(gui, |dd, gui, id| dd.hide(gui, id));
    }

    pub fn is_drop_down_showing(self, gui: &Gui) -> bool {
        self.state(gui).is_some_and(|dd| dd.is_showing())
    }

    pub fn max_drop_down_height(self, gui: &Gui) -> f32 {
        self.state(gui).map_or(DEFAULT_MAX_DROP_DOWN_HEIGHT, |dd| dd.max_height)
    }

    pub fn set_max_drop_down_height(self, gui: &mut Gui, height: f32) {
        self.with(gui, |dd, gui, id| {
            dd.max_height = height;
            dd.emit(gui, id, DropDownEventKind::MaxHeightChanged(height));
        });
    }

    pub fn is_resizing_to_widest_item(self, gui: &Gui) -> bool {
        self.state(gui).is_some_and(|dd| dd.resize_to_widest)
    }

    /// Widen the open list to its widest item when the drop-down is narrower.
    pub fn set_resize_to_widest_item(self, gui: &mut Gui, resize: bool) {
        self.with(gui, |dd, gui, id| {
            dd.resize_to_widest = resize;
            dd.emit(gui, id, DropDownEventKind::ResizeToWidestItemChanged(resize));
        });
    }

    pub fn list_position_offset(self, gui: &Gui) -> Point {
        self.state(gui).map_or(Point::ZERO, |dd| dd.list_offset)
    }

    /// Shift the open list away from its default place below the drop-down.
    pub fn set_list_position_offset(self, gui: &mut Gui, offset: Point) {
        self.with(gui, |dd, _, _| dd.list_offset = offset);
    }

    pub fn list_size_padding(self, gui: &Gui) -> Size {
        self.state(gui).map_or(Size::ZERO, |dd| dd.list_padding)
    }

    /// Extra size added to the open list.
    pub fn set_list_size_padding(self, gui: &mut Gui, padding: Size) {
        self.with(gui, |dd, _, _| dd.list_padding = padding);
    }

    /// Whether the pointer is over the drop-down.
    pub fn is_mouse_inside(self, gui: &Gui) -> bool {
        self.state(gui).is_some_and(|dd| dd.mouse_inside)
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    pub fn add_drop_down_listener<F>(self, gui: &mut Gui, listener: F) -> Option<ListenerId>
    where
        F: FnMut(&mut Gui, &mut DropDownEvent) + 'static,
    {
        gui.behavior_mut::<DropDownBehavior>(self.0)
            .map(|dd| dd.listeners.add(listener))
    }

    pub fn remove_drop_down_listener(self, gui: &mut Gui, token: ListenerId) -> bool {
        gui.behavior_mut::<DropDownBehavior>(self.0)
            .is_some_and(|dd| dd.listeners.remove(token))
    }
}
