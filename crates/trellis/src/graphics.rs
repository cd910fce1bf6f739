//! The graphics capability consumed by the renderer.
//!
//! Trellis never rasterizes anything itself. During [`Gui::render`] every
//! widget issues drawing commands through a [`Graphics`] implementation in
//! absolute pixel coordinates. Hosts plug in their real backend;
//! [`RecordingGraphics`] keeps the commands for tests and tooling.
//!
//! [`Gui::render`]: crate::Gui::render

use serde::{Deserialize, Serialize};
use trellis_core::{Color, Point, Rect};

/// A font description. Trellis does no text shaping, so a font is just the
/// values a backend needs to pick a face and the line height used for
/// layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    pub family: String,
    /// Point size.
    pub size: f32,
    /// Height of one line of text in pixels.
    pub line_height: f32,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f32, line_height: f32) -> Self {
        Self {
            family: family.into(),
            size,
            line_height,
        }
    }

    /// Estimated advance width of `text`, at 0.6 em per character.
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.size * 0.6
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("sans-serif", 12.0, 16.0)
    }
}

/// Drawing primitives provided by the platform backend.
///
/// All coordinates are absolute pixels. Clip rectangles nest: a pushed clip
/// is intersected with the current one by the backend.
pub trait Graphics {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke the outline of a rectangle.
    fn draw_rect(&mut self, rect: Rect, color: Color);

    fn draw_line(&mut self, from: Point, to: Point, color: Color);

    /// Draw text with its top-left corner at `position`.
    fn draw_text(&mut self, position: Point, text: &str, color: Color, font: &Font);

    fn push_clip(&mut self, rect: Rect);

    fn pop_clip(&mut self);
}

/// A drawing command captured by [`RecordingGraphics`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect(Rect, Color),
    DrawRect(Rect, Color),
    DrawLine(Point, Point, Color),
    DrawText {
        position: Point,
        text: String,
        color: Color,
        font: Font,
    },
    PushClip(Rect),
    PopClip,
}

/// A headless backend that records every command.
#[derive(Debug, Default)]
pub struct RecordingGraphics {
    commands: Vec<DrawCommand>,
    clip_depth: usize,
}

impl RecordingGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Current clip nesting depth; zero after a balanced render.
    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    /// The texts drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Graphics for RecordingGraphics {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::DrawRect(rect, color));
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.commands.push(DrawCommand::DrawLine(from, to, color));
    }

    fn draw_text(&mut self, position: Point, text: &str, color: Color, font: &Font) {
        self.commands.push(DrawCommand::DrawText {
            position,
            text: text.to_owned(),
            color,
            font: font.clone(),
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.clip_depth = self.clip_depth.saturating_sub(1);
        self.commands.push(DrawCommand::PopClip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_tracks_clip_depth() {
        let mut graphics = RecordingGraphics::new();
        graphics.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        graphics.fill_rect(Rect::new(1.0, 1.0, 2.0, 2.0), Color::RED);
        assert_eq!(graphics.clip_depth(), 1);
        graphics.pop_clip();
        graphics.pop_clip();
        assert_eq!(graphics.clip_depth(), 0);
        assert_eq!(graphics.commands().len(), 4);
    }

    #[test]
    fn test_recorded_texts() {
        let mut graphics = RecordingGraphics::new();
        let font = Font::default();
        graphics.draw_text(Point::ZERO, "one", Color::BLACK, &font);
        graphics.draw_line(Point::ZERO, Point::new(1.0, 1.0), Color::BLACK);
        graphics.draw_text(Point::ZERO, "two", Color::BLACK, &font);
        assert_eq!(graphics.texts(), vec!["one", "two"]);
        assert_eq!(graphics.take_commands().len(), 3);
        assert!(graphics.commands().is_empty());
    }
}
