//! Logging and debugging facilities for Trellis.
//!
//! This module provides:
//! - Target and span names for filtering the `tracing` output of each subsystem
//! - Formatting options shared by the widget tree debug views
//!
//! # Tracing Integration
//!
//! Trellis never installs a subscriber. To see logs, install one in your
//! application and filter by the targets below:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("trellis::focus=debug,trellis::gui=trace")
//!     .init();
//! ```

/// Span names used throughout Trellis for tracing.
pub mod span_names {
    /// One logic tick of the coordinator.
    pub const LOGIC: &str = "trellis::logic";
    /// One render pass of the coordinator.
    pub const RENDER: &str = "trellis::render";
    /// A single layout pass.
    pub const LAYOUT_PASS: &str = "trellis::layout_pass";
}

/// Target names for log filtering.
pub mod targets {
    /// Core value types and listener lists.
    pub const CORE: &str = "trellis_core";
    /// Event pipeline of the coordinator.
    pub const GUI: &str = "trellis::gui";
    /// Focus and modal transfers.
    pub const FOCUS: &str = "trellis::focus";
    /// Layout passes.
    pub const LAYOUT: &str = "trellis::layout";
    /// Structural edits of the widget tree.
    pub const TREE: &str = "trellis::tree";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show widget ids.
    pub show_ids: bool,
    /// Whether to show behavior type names.
    pub show_types: bool,
    /// Whether to show location and size.
    pub show_geometry: bool,
    /// Whether to show state flags (hidden, disabled, focusable...).
    pub show_flags: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_types: true,
            show_geometry: true,
            show_flags: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_flags: true,
            ..Default::default()
        }
    }

    /// Options for minimal output: names only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_types: false,
            show_geometry: false,
            show_flags: false,
            ..Default::default()
        }
    }

    /// Limit the traversal depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Build the line prefix for a node at `depth`.
    pub fn prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => (
                "\u{2502}",
                "\u{251c}\u{2500}\u{2500}",
                "\u{2514}\u{2500}\u{2500}",
            ),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..self.indent_size {
                prefix.push(' ');
            }
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}
