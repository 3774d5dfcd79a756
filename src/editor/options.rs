//! Editor configuration.

use serde::{Deserialize, Serialize};

/// Options accepted by [`CodeEditor`](super::CodeEditor). Unknown fields in a
/// JSON config are ignored; missing fields take the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Registered mode name ("css", "script", "json", "xml", "html").
    pub mode: String,
    pub tab_size: usize,
    pub line_numbers: bool,
    pub line_wrapping: bool,
    pub tooltip: String,
}

impl Default for EditorOptions {
    fn default() -> Self {
        EditorOptions {
            mode: "script".to_string(),
            tab_size: 4,
            line_numbers: true,
            line_wrapping: true,
            tooltip: "Autocomplete: ctrl+space".to_string(),
        }
    }
}

impl EditorOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EditorOptions::default();
        assert_eq!(options.mode, "script");
        assert_eq!(options.tab_size, 4);
        assert!(options.line_numbers);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = EditorOptions::from_json(r#"{"mode":"html","tab_size":2}"#).unwrap();
        assert_eq!(options.mode, "html");
        assert_eq!(options.tab_size, 2);
        assert!(options.line_wrapping);
    }

    #[test]
    fn test_round_trip() {
        let options = EditorOptions {
            mode: "css".to_string(),
            ..Default::default()
        };
        let json = options.to_json().unwrap();
        let back = EditorOptions::from_json(&json).unwrap();
        assert_eq!(back.mode, "css");
    }
}
