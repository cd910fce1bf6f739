//! Coordinator configuration.
//!
//! [`GuiConfig`] gathers the tunable values of a [`Gui`](crate::Gui). Every
//! field has a default, so a TOML document only needs the values it changes:
//!
//! ```
//! use trellis::GuiConfig;
//!
//! let config = GuiConfig::from_toml_str(r#"
//! hover_interval = 1.0
//! tabbing_enabled = false
//!
//! [tab_next]
//! key = "F6"
//! "#).unwrap();
//!
//! assert_eq!(config.hover_interval, 1.0);
//! assert_eq!(config.double_click_interval, 0.5);
//! assert!(!config.tabbing_enabled);
//! ```

use serde::{Deserialize, Serialize};
use trellis_core::{Color, ConfigError, ConfigResult};

use crate::graphics::Font;
use crate::widget::{Key, KeyBinding, KeyboardModifiers};

/// Tunable values of the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Seconds the pointer must rest on a widget before a hover event.
    pub hover_interval: f64,
    /// Seconds within which a second click counts as a double click.
    pub double_click_interval: f64,
    /// Moves focus to the next tabable widget.
    pub tab_next: KeyBinding,
    /// Moves focus to the previous tabable widget.
    pub tab_previous: KeyBinding,
    pub tabbing_enabled: bool,
    /// Whether the logic tick destroys flagged widgets itself.
    pub destroy_flagged_widgets: bool,
    /// Font used when no widget on the ancestor chain sets one.
    pub default_font: Font,
    pub default_font_color: Color,
    pub default_back_color: Color,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            hover_interval: 2.0,
            double_click_interval: 0.5,
            tab_next: KeyBinding::new(Key::Tab, KeyboardModifiers::NONE),
            tab_previous: KeyBinding::new(Key::Tab, KeyboardModifiers::SHIFT),
            tabbing_enabled: true,
            destroy_flagged_widgets: true,
            default_font: Font::default(),
            default_font_color: Color::BLACK,
            default_back_color: Color::from_rgb8(220, 220, 220),
        }
    }
}

impl GuiConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: GuiConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.hover_interval.is_finite() || self.hover_interval < 0.0 {
            return Err(ConfigError::invalid(
                "hover_interval",
                "must be a non-negative number of seconds",
            ));
        }
        if !self.double_click_interval.is_finite() || self.double_click_interval < 0.0 {
            return Err(ConfigError::invalid(
                "double_click_interval",
                "must be a non-negative number of seconds",
            ));
        }
        if self.default_font.line_height < 0.0 || self.default_font.size < 0.0 {
            return Err(ConfigError::invalid("default_font", "sizes must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = GuiConfig::from_toml_str("").unwrap();
        assert_eq!(config, GuiConfig::default());
        assert_eq!(config.tab_previous.modifiers, KeyboardModifiers::SHIFT);
    }

    #[test]
    fn test_nested_tables() {
        let config = GuiConfig::from_toml_str(
            r#"
            [tab_previous]
            key = "Tab"
            modifiers = { control = true }

            [default_font]
            family = "mono"
            line_height = 20.0

            [default_back_color]
            r = 1.0
            g = 0.0
            b = 0.0
            a = 1.0
            "#,
        )
        .unwrap();
        assert!(config.tab_previous.modifiers.control);
        assert!(!config.tab_previous.modifiers.shift);
        assert_eq!(config.default_font.family, "mono");
        assert_eq!(config.default_font.size, 12.0);
        assert_eq!(config.default_back_color, Color::RED);
    }

    #[test]
    fn test_negative_interval_is_rejected() {
        let err = GuiConfig::from_toml_str("double_click_interval = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "double_click_interval"));
    }

    #[test]
    fn test_parse_error() {
        let err = GuiConfig::from_toml_str("hover_interval = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
