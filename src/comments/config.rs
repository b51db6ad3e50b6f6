//! Highlighter configuration
//!
//! Mirrors the host extension settings block. Every field has a default so a
//! partial (or empty) settings object is always valid.

use serde::{Deserialize, Serialize};

use super::error::CommentError;

// ==================== TYPE DEFINITIONS ====================

/// How range offsets are expressed to the host
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OffsetEncoding {
    /// UTF-8 byte offsets (Rust-native hosts)
    Utf8,
    /// UTF-16 code units (JavaScript strings)
    #[default]
    Utf16,
}

/// A single configured tag as written in settings
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagConfig {
    /// Marker text. Optional here so a missing literal is reported by the
    /// registry instead of failing deserialization of the whole list.
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default = "default_background")]
    pub background_color: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl TagConfig {
    pub fn new(tag: &str, color: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            color: color.to_string(),
            strikethrough: false,
            underline: false,
            background_color: default_background(),
            bold: false,
            italic: false,
        }
    }

    pub fn struck(mut self) -> Self {
        self.strikethrough = true;
        self
    }
}

/// Top-level highlighter configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HighlightConfig {
    /// Scan `/* */` blocks in languages that support them
    #[serde(default = "default_true")]
    pub multiline_comments: bool,
    /// Scan `/** */` blocks with the leading-asterisk line convention
    #[serde(default = "default_true")]
    pub doc_comments: bool,
    /// Treat every line of a plain-text document as a comment
    #[serde(default)]
    pub highlight_plain_text: bool,
    #[serde(default)]
    pub offset_encoding: OffsetEncoding,
    #[serde(default = "default_tags")]
    pub tags: Vec<TagConfig>,
}

fn default_true() -> bool { true }

fn default_color() -> String { "#FFFFFF".to_string() }

fn default_background() -> String { "transparent".to_string() }

/// Out-of-the-box tag set: alert, query, commented-out code, todo, highlight
pub fn default_tags() -> Vec<TagConfig> {
    vec![
        TagConfig::new("!", "#FF2D00"),
        TagConfig::new("?", "#3498DB"),
        TagConfig::new("//", "#474747").struck(),
        TagConfig::new("todo", "#FF8C00"),
        TagConfig::new("*", "#98C379"),
    ]
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            multiline_comments: true,
            doc_comments: true,
            highlight_plain_text: false,
            offset_encoding: OffsetEncoding::Utf16,
            tags: default_tags(),
        }
    }
}

impl HighlightConfig {
    /// Parse a settings object from its JSON text
    pub fn from_json(json: &str) -> Result<Self, CommentError> {
        serde_json::from_str(json).map_err(|e| CommentError::InvalidConfig(e.to_string()))
    }
}

// ==================== TESTS ====================
