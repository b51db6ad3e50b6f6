//! Errors raised while building the comment scanner
//!
//! Every failure here happens at construction time (configuration parsing,
//! tag registration, pattern compilation). Scanning itself never fails.

use wasm_bindgen::JsValue;

/// Comment scanner construction errors
#[derive(Debug, Clone, PartialEq)]
pub enum CommentError {
    /// Tag at `index` has no literal (absent or empty)
    MissingLiteral { index: usize },
    /// Two tags share a literal (case-insensitive)
    DuplicateTag { literal: String, first: usize, second: usize },
    /// The combined expression failed to compile
    InvalidPattern { pattern: String, reason: String },
    /// Configuration could not be deserialized
    InvalidConfig(String),
}

impl std::fmt::Display for CommentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommentError::MissingLiteral { index } => {
                write!(f, "Tag #{} has no literal", index)
            }
            CommentError::DuplicateTag { literal, first, second } => write!(
                f,
                "Duplicate tag literal '{}' (tags #{} and #{})",
                literal, first, second
            ),
            CommentError::InvalidPattern { pattern, reason } => {
                write!(f, "Invalid pattern '{}': {}", pattern, reason)
            }
            CommentError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for CommentError {}

impl From<CommentError> for JsValue {
    fn from(err: CommentError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
