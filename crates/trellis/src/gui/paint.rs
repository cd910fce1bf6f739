//! Painting the widget tree.

use trellis_core::{Rect, targets};

use super::Gui;
use crate::graphics::Graphics;
use crate::widget::{PaintContext, WidgetId};

impl Gui {
    /// Paint the desktop tree into `graphics`.
    ///
    /// Each visible widget paints its background over its bounds, then its
    /// component and its children clipped to the inner rectangle, then its
    /// border on top.
    pub fn render_with(&self, graphics: &mut dyn Graphics) {
        self.paint_widget(self.root(), graphics);
    }

    fn paint_widget(&self, id: WidgetId, graphics: &mut dyn Graphics) {
        let Some(node) = self.tree.get(id) else {
            return;
        };
        if !node.visible || node.flagged {
            return;
        }
        let Some(origin) = self.tree.absolute_position(id) else {
            return;
        };
        tracing::trace!(target: targets::GUI, ?id, "paint");

        let font = self.effective_font(id);
        let font_color = self.effective_font_color(id);
        let back_color = self.effective_back_color(id);
        let focused = self.focus.focused() == Some(id);
        let behavior = node.behavior.as_deref();

        {
            let mut ctx = PaintContext::new(&mut *graphics, origin, node.size, font)
                .with_margins(node.margins)
                .with_colors(font_color, back_color)
                .with_text(&node.text)
                .with_state(node.opaque, focused, node.enabled);
            match behavior {
                Some(behavior) => behavior.paint_background(&mut ctx),
                None => ctx.fill_default_background(),
            }
        }

        let inner = Rect::from_origin_size(origin, node.size).inset(node.margins);
        graphics.push_clip(inner);
        if let Some(behavior) = behavior {
            let mut ctx = PaintContext::new(&mut *graphics, inner.origin, inner.size, font)
                .with_colors(font_color, back_color)
                .with_text(&node.text)
                .with_state(node.opaque, focused, node.enabled);
            behavior.paint_component(&mut ctx);
        }
        for &child in &node.children {
            self.paint_widget(child, graphics);
        }
        graphics.pop_clip();

        if let Some(behavior) = behavior {
            let mut ctx = PaintContext::new(graphics, origin, node.size, font)
                .with_margins(node.margins)
                .with_colors(font_color, back_color)
                .with_text(&node.text)
                .with_state(node.opaque, focused, node.enabled);
            behavior.paint_border(&mut ctx);
        }
    }
}
