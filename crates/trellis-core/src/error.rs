//! Error types for Trellis.
//!
//! Most widget operations treat invalid input as a logged no-op and never
//! return an error. The types here cover the two places where a caller needs
//! to know why something was rejected: structural tree edits and
//! configuration parsing.

/// Result type alias for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors raised by structural edits of the widget tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A widget handle does not refer to a live widget.
    #[error("widget does not exist or has been destroyed")]
    MissingWidget,

    /// A widget was asked to become its own parent.
    #[error("a widget cannot be its own parent")]
    SelfParent,

    /// The new parent is a descendant of the child.
    #[error("attaching would create a cycle in the widget tree")]
    WouldCreateCycle,

    /// An insertion index past the end of the child list.
    #[error("child index {index} is out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors that can occur while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed or did not match the schema.
    #[error("configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid configuration value for '{field}': {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    /// Create an invalid-value error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_error_display() {
        let err = TreeError::IndexOutOfRange { index: 5, len: 2 };
        assert_eq!(err.to_string(), "child index 5 is out of range (len 2)");
        assert_eq!(
            TreeError::SelfParent.to_string(),
            "a widget cannot be its own parent"
        );
    }

    #[test]
    fn test_config_error_invalid() {
        let err = ConfigError::invalid("hover_interval", "must not be negative");
        assert!(err.to_string().contains("hover_interval"));
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
