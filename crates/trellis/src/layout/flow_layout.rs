//! Flow layout for wrapping rows.
//!
//! `FlowLayout` places visible children one after another along a row and
//! starts a new row when the next child would extend past the inner width.
//! This is similar to how words flow in a paragraph.
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut gui = Gui::new(Size::new(300.0, 200.0));
//! let flow = gui.create_layout(FlowLayout::new().with_spacing(4.0, 4.0));
//! gui.add(flow);
//!
//! // Spacing and flow direction can be changed later; each change re-flows.
//! gui.configure_layout(flow, |layout: &mut FlowLayout| layout.set_horizontally_centered(true));
//! assert!(gui.layout_policy::<FlowLayout>(flow).unwrap().is_horizontally_centered());
//! ```

use trellis_core::{Point, Size};

use super::LayoutPolicy;
use crate::gui::Gui;
use crate::widget::WidgetId;

/// Default gap between children, in pixels.
pub const DEFAULT_SPACING: f32 = 10.0;

/// A layout that wraps children into rows.
///
/// # Features
///
/// - Left-to-right or right-to-left flow (right-to-left is ignored while
///   centering)
/// - Top-to-bottom or bottom-to-top rows
/// - Independent horizontal and vertical spacing
/// - Optional single-row mode that never wraps
/// - Optional horizontal centering of each row, with the last row optionally
///   aligned to the first instead
#[derive(Debug, Clone)]
pub struct FlowLayout {
    horizontal_spacing: f32,
    vertical_spacing: f32,
    left_to_right: bool,
    top_to_bottom: bool,
    single_row: bool,
    centered: bool,
    align_last_row: bool,
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowLayout {
    /// Create a new flow layout with default settings.
    pub fn new() -> Self {
        Self {
            horizontal_spacing: DEFAULT_SPACING,
            vertical_spacing: DEFAULT_SPACING,
            left_to_right: true,
            top_to_bottom: true,
            single_row: false,
            centered: false,
            align_last_row: false,
        }
    }

    /// Set both spacings (builder pattern).
    pub fn with_spacing(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_spacing = horizontal;
        self.vertical_spacing = vertical;
        self
    }

    #[inline]
    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    pub fn set_horizontal_spacing(&mut self, spacing: f32) {
        self.horizontal_spacing = spacing;
    }

    #[inline]
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    pub fn set_vertical_spacing(&mut self, spacing: f32) {
        self.vertical_spacing = spacing;
    }

    pub fn is_left_to_right(&self) -> bool {
        self.left_to_right
    }

    pub fn set_left_to_right(&mut self, left_to_right: bool) {
        self.left_to_right = left_to_right;
    }

    pub fn is_top_to_bottom(&self) -> bool {
        self.top_to_bottom
    }

    pub fn set_top_to_bottom(&mut self, top_to_bottom: bool) {
        self.top_to_bottom = top_to_bottom;
    }

    pub fn is_single_row(&self) -> bool {
        self.single_row
    }

    /// Keep every child on the first row, even past the inner width.
    pub fn set_single_row(&mut self, single_row: bool) {
        self.single_row = single_row;
    }

    pub fn is_horizontally_centered(&self) -> bool {
        self.centered
    }

    pub fn set_horizontally_centered(&mut self, centered: bool) {
        self.centered = centered;
    }

    pub fn is_last_row_aligned(&self) -> bool {
        self.align_last_row
    }

    /// When centering with more than one row, give the last row the first
    /// row's horizontal offset instead of centering it on its own.
    pub fn set_align_last_row(&mut self, align: bool) {
        self.align_last_row = align;
    }

    /// Compute the location of each visible child.
    ///
    /// `children` holds the sizes of the visible children in order; the
    /// result has one location per entry.
    pub fn compute(&self, inner: Size, children: &[Size]) -> Vec<Point> {
        let mut locations = Vec::with_capacity(children.len());
        let mut cur_x = 0.0_f32;
        let mut cur_y = 0.0_f32;
        let mut row_height = 0.0_f32;
        let mut row_start = 0;
        let mut rows = 1;

        for (index, size) in children.iter().enumerate() {
            if cur_x + size.width > inner.width && index > 0 && !self.single_row {
                rows += 1;
                cur_x = 0.0;
                cur_y += row_height + self.vertical_spacing;
                row_height = 0.0;
                if self.centered {
                    self.center_row(inner.width, &mut locations[row_start..], &children[row_start..index]);
                }
                row_start = index;
            }

            let x = if !self.left_to_right && !self.centered {
                inner.width - size.width - cur_x
            } else {
                cur_x
            };
            let y = if self.top_to_bottom {
                cur_y
            } else {
                inner.height - size.height - cur_y
            };
            locations.push(Point::new(x, y));

            cur_x += size.width + self.horizontal_spacing;
            row_height = row_height.max(size.height);
        }

        if self.centered && row_start < locations.len() {
            if self.align_last_row && rows > 1 {
                let diff = locations[0].x - locations[row_start].x;
                for location in &mut locations[row_start..] {
                    location.x += diff;
                }
            } else {
                self.center_row(inner.width, &mut locations[row_start..], &children[row_start..]);
            }
        }

        locations
    }

    fn center_row(&self, inner_width: f32, row: &mut [Point], sizes: &[Size]) {
        let (Some(first), Some(last), Some(last_size)) = (row.first(), row.last(), sizes.last()) else {
            return;
        };
        let width = last.x + last_size.width - first.x;
        let offset = (inner_width - width) / 2.0;
        for location in row {
            location.x += offset;
        }
    }
}

impl LayoutPolicy for FlowLayout {
    fn layout_children(&mut self, gui: &mut Gui, layout: WidgetId) {
        let Some(node) = gui.widget(layout) else {
            return;
        };
        let inner = node.inner_size();
        let visible: Vec<(WidgetId, Size)> = node
            .children()
            .iter()
            .filter_map(|&child| {
                let child_node = gui.widget(child)?;
                child_node.is_visible().then(|| (child, child_node.size()))
            })
            .collect();

        let sizes: Vec<Size> = visible.iter().map(|(_, size)| *size).collect();
        let locations = self.compute(inner, &sizes);
        for ((child, _), location) in visible.into_iter().zip(locations) {
            gui.set_location(child, location);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(count: usize, width: f32, height: f32) -> Vec<Size> {
        vec![Size::new(width, height); count]
    }

    #[test]
    fn test_wraps_when_exceeding_width() {
        let flow = FlowLayout::new();
        let locations = flow.compute(Size::new(200.0, 100.0), &uniform(5, 60.0, 20.0));
        assert_eq!(
            locations,
            vec![
                Point::new(0.0, 0.0),
                Point::new(70.0, 0.0),
                Point::new(140.0, 0.0),
                Point::new(0.0, 30.0),
                Point::new(70.0, 30.0),
            ]
        );
    }

    #[test]
    fn test_row_height_is_tallest_child() {
        let flow = FlowLayout::new();
        let sizes = [
            Size::new(100.0, 10.0),
            Size::new(90.0, 40.0),
            Size::new(50.0, 10.0),
        ];
        let locations = flow.compute(Size::new(200.0, 200.0), &sizes);
        assert_eq!(locations[2], Point::new(0.0, 50.0));
    }

    #[test]
    fn test_single_row_never_wraps() {
        let mut flow = FlowLayout::new();
        flow.set_single_row(true);
        let locations = flow.compute(Size::new(100.0, 100.0), &uniform(3, 60.0, 20.0));
        assert_eq!(locations[2], Point::new(140.0, 0.0));
    }

    #[test]
    fn test_oversized_first_child_stays_on_first_row() {
        let flow = FlowLayout::new();
        let locations = flow.compute(Size::new(50.0, 100.0), &uniform(1, 80.0, 20.0));
        assert_eq!(locations, vec![Point::ZERO]);
    }

    #[test]
    fn test_right_to_left_and_bottom_to_top() {
        let mut flow = FlowLayout::new();
        flow.set_left_to_right(false);
        flow.set_top_to_bottom(false);
        let locations = flow.compute(Size::new(200.0, 100.0), &uniform(2, 60.0, 20.0));
        assert_eq!(locations[0], Point::new(140.0, 80.0));
        assert_eq!(locations[1], Point::new(70.0, 80.0));
    }

    #[test]
    fn test_centered_rows() {
        let mut flow = FlowLayout::new();
        flow.set_horizontally_centered(true);
        // Row 0 holds three children (width 200 exactly), row 1 holds one.
        let locations = flow.compute(Size::new(200.0, 100.0), &uniform(4, 60.0, 20.0));
        assert_eq!(locations[0].x, 0.0);
        assert_eq!(locations[3], Point::new(70.0, 30.0));
    }

    #[test]
    fn test_centered_last_row_aligned_to_first() {
        let mut flow = FlowLayout::new();
        flow.set_horizontally_centered(true);
        flow.set_align_last_row(true);
        let locations = flow.compute(Size::new(220.0, 100.0), &uniform(4, 60.0, 20.0));
        // First row spans 200 of 220, so it is shifted by 10.
        assert_eq!(locations[0].x, 10.0);
        assert_eq!(locations[3].x, 10.0);
    }

    #[test]
    fn test_right_to_left_ignored_when_centered() {
        let mut flow = FlowLayout::new();
        flow.set_left_to_right(false);
        flow.set_horizontally_centered(true);
        let locations = flow.compute(Size::new(100.0, 100.0), &uniform(1, 20.0, 20.0));
        assert_eq!(locations[0].x, 40.0);
    }
}
