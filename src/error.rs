//! Structured error types for the moodboard layout crate.
//!
//! Placement itself never fails. Errors come from the edges: JSON input that
//! does not parse, configuration that cannot produce a layout, and file
//! access in the CLI.

use thiserror::Error;

/// The unified error type returned by all public entry points.
#[derive(Debug, Error)]
pub enum MoodboardError {
    /// JSON input failed to parse as a moodboard.
    #[error("Failed to parse moodboard: {source}{}", format_hint(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },
    /// A configuration value cannot produce a layout.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for MoodboardError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the moodboard schema. Every item needs an \"id\"."
                    .to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        MoodboardError::Parse { source: e, hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_carries_hint() {
        let err: MoodboardError = serde_json::from_str::<serde_json::Value>("{,}")
            .unwrap_err()
            .into();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to parse moodboard"));
        assert!(msg.contains("trailing commas"));
    }

    #[test]
    fn test_config_error_message() {
        let err = MoodboardError::InvalidConfig("columns must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: columns must be at least 1"
        );
    }
}
