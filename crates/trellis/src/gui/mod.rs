//! The GUI coordinator.
//!
//! [`Gui`] owns the widget tree and turns polled input into semantic events.
//! A host drives it with two calls per frame:
//!
//! 1. [`Gui::logic`] polls the input source, dispatches mouse and keyboard
//!    events in queue order, fires timed events (hover), runs each widget's
//!    logic hook and sweeps flagged widgets.
//! 2. [`Gui::render`] walks the tree and issues drawing commands.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use trellis::input::QueuedInput;
//! use trellis::prelude::*;
//!
//! let input = QueuedInput::new();
//! let mut gui = Gui::new(Size::new(640.0, 480.0));
//! gui.set_input(Box::new(input.clone()));
//!
//! let button = gui.create_widget();
//! gui.set_bounds(button, Rect::new(10.0, 10.0, 80.0, 24.0));
//! gui.add(button);
//!
//! let clicks = Rc::new(Cell::new(0));
//! let counter = clicks.clone();
//! gui.add_mouse_listener(button, move |_gui, event| {
//!     if event.kind == MouseEventKind::Click {
//!         counter.set(counter.get() + 1);
//!     }
//! });
//!
//! input.click(20.0, 20.0, MouseButton::Left);
//! gui.logic();
//! assert_eq!(clicks.get(), 1);
//! ```

mod destroy;
mod dispatch;
mod focus;
mod keyboard;
mod mouse;
mod mutation;
mod paint;

use std::collections::VecDeque;

use trellis_core::{Color, Observers, Size, span_names, targets};

use crate::config::GuiConfig;
use crate::graphics::{Font, Graphics};
use crate::input::{InputEvent, InputSource};
use crate::widget::{
    FocusManager, KeyBinding, KeyEvent, TreeDebug, WidgetBehavior, WidgetId, WidgetNode,
    WidgetTree,
};

pub(crate) use mouse::MouseState;

/// The event, focus and timing coordinator of one widget tree.
///
/// `Gui` is single-threaded: it is neither `Send` nor `Sync`, and all
/// listeners run synchronously inside the call that triggered them.
pub struct Gui {
    pub(crate) tree: WidgetTree,
    root: WidgetId,
    pub(crate) focus: FocusManager,
    pub(crate) config: GuiConfig,
    input: Option<Box<dyn InputSource>>,
    graphics: Option<Box<dyn Graphics>>,
    input_buffer: Vec<InputEvent>,
    /// Seconds, sampled from the input source once per tick.
    time: f64,
    pub(crate) mouse: MouseState,
    pub(crate) flagged: VecDeque<WidgetId>,
    pub(crate) key_preview: Observers<Gui, KeyEvent>,
}

impl Gui {
    /// Create a coordinator with a desktop root of the given size and the
    /// default configuration.
    pub fn new(size: Size) -> Self {
        Self::with_config(size, GuiConfig::default())
    }

    /// Create a coordinator from a configuration.
    pub fn with_config(size: Size, config: GuiConfig) -> Self {
        let mut tree = WidgetTree::new();
        let mut root = WidgetNode::new("Desktop");
        root.size = size;
        root.opaque = false;
        let root = tree.insert(root);

        Self {
            tree,
            root,
            focus: FocusManager::new(),
            config,
            input: None,
            graphics: None,
            input_buffer: Vec::new(),
            time: 0.0,
            mouse: MouseState::default(),
            flagged: VecDeque::new(),
            key_preview: Observers::new(),
        }
    }

    /// Plug in the input source polled by [`logic`](Self::logic).
    pub fn set_input(&mut self, input: Box<dyn InputSource>) {
        self.input = Some(input);
    }

    /// Plug in the graphics backend used by [`render`](Self::render).
    pub fn set_graphics(&mut self, graphics: Box<dyn Graphics>) {
        self.graphics = Some(graphics);
    }

    /// The desktop root: the top container every visible widget hangs from.
    #[inline]
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// Resize the desktop root.
    pub fn resize(&mut self, size: Size) {
        self.set_size(self.root, size);
    }

    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    /// Seconds of tick time, as last sampled from the input source.
    #[inline]
    pub fn elapsed_time(&self) -> f64 {
        self.time
    }

    // =========================================================================
    // Widget Access
    // =========================================================================

    /// Read a widget's state.
    pub fn widget(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.tree.get(id)
    }

    /// Whether the handle refers to a live widget.
    pub fn widget_exists(&self, id: WidgetId) -> bool {
        self.tree.contains(id)
    }

    /// Read access to the whole tree.
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Whether the widget is reachable from the desktop root.
    pub fn is_in_tree(&self, id: WidgetId) -> bool {
        self.tree.contains(id) && self.tree.top_ancestor(id) == self.root
    }

    /// Whether the widget and all of its ancestors are visible.
    pub fn is_effectively_visible(&self, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            match self.tree.get(node_id) {
                Some(node) if node.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Whether the widget or one of its ancestors is flagged for destruction.
    pub fn is_frozen(&self, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            match self.tree.get(node_id) {
                Some(node) if node.flagged => return true,
                Some(node) => current = node.parent,
                None => return false,
            }
        }
        false
    }

    /// Find the first widget in the desktop tree with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<WidgetId> {
        self.tree.find_by_name(self.root, name)
    }

    /// Borrow a widget's behavior as its concrete type.
    ///
    /// Returns `None` while one of the behavior's own hooks is running.
    pub fn behavior<T: WidgetBehavior>(&self, id: WidgetId) -> Option<&T> {
        self.tree
            .get(id)?
            .behavior
            .as_deref()?
            .as_any()
            .downcast_ref::<T>()
    }

    /// Mutably borrow a widget's behavior as its concrete type.
    pub fn behavior_mut<T: WidgetBehavior>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.tree
            .get_mut(id)?
            .behavior
            .as_deref_mut()?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Run `f` with a widget's behavior and the coordinator at once.
    ///
    /// The behavior is detached from its node for the duration of the call.
    pub fn with_behavior<T, R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut T, &mut Gui) -> R,
    ) -> Option<R>
    where
        T: WidgetBehavior,
    {
        let mut behavior = self.tree.get_mut(id)?.behavior.take()?;
        let result = (*behavior)
            .as_any_mut()
            .downcast_mut::<T>()
            .map(|concrete| f(concrete, self));
        self.restore_behavior(id, behavior);
        result
    }

    /// Run a hook on whatever behavior the widget has.
    pub(crate) fn run_behavior(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn WidgetBehavior, &mut Gui),
    ) {
        let Some(mut behavior) = self.tree.get_mut(id).and_then(|n| n.behavior.take()) else {
            return;
        };
        f(&mut *behavior, self);
        self.restore_behavior(id, behavior);
    }

    fn restore_behavior(&mut self, id: WidgetId, behavior: Box<dyn WidgetBehavior>) {
        if let Some(node) = self.tree.get_mut(id) {
            if node.behavior.is_none() {
                node.behavior = Some(behavior);
            }
        }
    }

    // =========================================================================
    // Widget Creation
    // =========================================================================

    /// Create a detached plain widget.
    pub fn create_widget(&mut self) -> WidgetId {
        self.create_widget_named("Widget")
    }

    /// Create a detached widget with a behavior.
    pub fn create_widget_with<B: WidgetBehavior>(&mut self, behavior: B) -> WidgetId {
        let mut node = WidgetNode::new(behavior.type_name());
        node.behavior = Some(Box::new(behavior));
        let id = self.tree.insert(node);
        tracing::trace!(target: targets::TREE, ?id, "widget created");
        id
    }

    pub(crate) fn create_widget_named(&mut self, type_name: &'static str) -> WidgetId {
        let id = self.tree.insert(WidgetNode::new(type_name));
        tracing::trace!(target: targets::TREE, ?id, type_name, "widget created");
        id
    }

    // =========================================================================
    // Appearance Inheritance
    // =========================================================================

    /// The font of the nearest ancestor (or the widget itself) that sets one.
    pub fn effective_font(&self, id: WidgetId) -> &Font {
        self.inherited(id, |node| node.font.as_ref())
            .unwrap_or(&self.config.default_font)
    }

    pub fn effective_font_color(&self, id: WidgetId) -> Color {
        self.inherited(id, |node| node.font_color)
            .unwrap_or(self.config.default_font_color)
    }

    pub fn effective_back_color(&self, id: WidgetId) -> Color {
        self.inherited(id, |node| node.back_color)
            .unwrap_or(self.config.default_back_color)
    }

    fn inherited<'a, T>(
        &'a self,
        id: WidgetId,
        get: impl Fn(&'a WidgetNode) -> Option<T>,
    ) -> Option<T> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.tree.get(node_id)?;
            if let Some(value) = get(node) {
                return Some(value);
            }
            current = node.parent;
        }
        None
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn hover_interval(&self) -> f64 {
        self.config.hover_interval
    }

    /// Seconds the pointer must rest on a widget before it gets a hover event.
    pub fn set_hover_interval(&mut self, seconds: f64) {
        self.config.hover_interval = seconds.max(0.0);
    }

    pub fn double_click_interval(&self) -> f64 {
        self.config.double_click_interval
    }

    pub fn set_double_click_interval(&mut self, seconds: f64) {
        self.config.double_click_interval = seconds.max(0.0);
    }

    pub fn tab_next_key(&self) -> KeyBinding {
        self.config.tab_next
    }

    pub fn set_tab_next_key(&mut self, binding: KeyBinding) {
        self.config.tab_next = binding;
    }

    pub fn tab_previous_key(&self) -> KeyBinding {
        self.config.tab_previous
    }

    pub fn set_tab_previous_key(&mut self, binding: KeyBinding) {
        self.config.tab_previous = binding;
    }

    pub fn is_tabbing_enabled(&self) -> bool {
        self.config.tabbing_enabled
    }

    pub fn set_tabbing_enabled(&mut self, enabled: bool) {
        self.config.tabbing_enabled = enabled;
    }

    /// Whether [`logic`](Self::logic) destroys flagged widgets itself.
    pub fn is_destroying_flagged_widgets(&self) -> bool {
        self.config.destroy_flagged_widgets
    }

    /// With `false` the caller drains the queue with
    /// [`take_flagged_widgets`](Self::take_flagged_widgets) and finalizes the
    /// widgets itself.
    pub fn set_destroying_flagged_widgets(&mut self, destroying: bool) {
        self.config.destroy_flagged_widgets = destroying;
    }

    pub fn set_default_font(&mut self, font: Font) {
        self.config.default_font = font;
    }

    pub fn set_default_font_color(&mut self, color: Color) {
        self.config.default_font_color = color;
    }

    pub fn set_default_back_color(&mut self, color: Color) {
        self.config.default_back_color = color;
    }

    // =========================================================================
    // Frame Entry Points
    // =========================================================================

    /// Run one logic tick.
    pub fn logic(&mut self) {
        let _span = tracing::trace_span!(span_names::LOGIC).entered();
        let mut events = std::mem::take(&mut self.input_buffer);
        if let Some(input) = self.input.as_mut() {
            self.time = self.time.max(input.elapsed_time());
            input.poll(&mut events);
        }

        for event in events.drain(..) {
            match event {
                InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
                InputEvent::Key(key) => self.handle_key(key),
            }
        }
        self.input_buffer = events;

        self.handle_hover();
        self.run_logic_hooks();
        self.sweep_flagged();
    }

    fn run_logic_hooks(&mut self) {
        let ids: Vec<WidgetId> = self
            .tree
            .subtree(self.root)
            .into_iter()
            .filter(|&id| self.tree.get(id).is_some_and(|n| n.behavior.is_some() && !n.flagged))
            .collect();
        for id in ids {
            self.run_behavior(id, |behavior, gui| behavior.logic(gui, id));
        }
    }

    /// Render the desktop tree through the configured graphics backend.
    pub fn render(&mut self) {
        let _span = tracing::trace_span!(span_names::RENDER).entered();
        let Some(mut graphics) = self.graphics.take() else {
            tracing::trace!(target: targets::GUI, "render skipped: no graphics backend");
            return;
        };
        self.render_with(&mut *graphics);
        self.graphics = Some(graphics);
    }

    /// Format the desktop tree for debugging.
    pub fn debug_tree(&self) -> String {
        TreeDebug::new(self).format_subtree(self.root)
    }
}

static_assertions::assert_not_impl_any!(Gui: Send, Sync);
