//! CommentHighlighter - WASM facade over `HighlightSession`
//!
//! # Usage (JavaScript)
//! ```javascript
//! import init, { CommentHighlighter } from 'commentcore';
//!
//! await init();
//! const highlighter = new CommentHighlighter(vscode.workspace.getConfiguration('better-comments'));
//! highlighter.setLanguage(document.languageId);
//! const { decorations } = highlighter.scan(document.getText());
//! for (const d of decorations) editor.setDecorations(typeFor(d.tag, d.style), d.ranges);
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::config::HighlightConfig;
use super::error::CommentError;
use super::session::HighlightSession;
use super::tags::escape_literal;
use crate::logging;

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    0.0
}

#[wasm_bindgen]
pub struct CommentHighlighter {
    inner: HighlightSession,
}

#[wasm_bindgen]
impl CommentHighlighter {
    /// Create a highlighter from a settings object (null/undefined → defaults)
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CommentHighlighter, JsValue> {
        let config: HighlightConfig = if config.is_null() || config.is_undefined() {
            HighlightConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| CommentError::InvalidConfig(e.to_string()))?
        };
        Self::from_config(config)
    }

    /// Create a highlighter from settings JSON text
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<CommentHighlighter, JsValue> {
        Self::from_config(HighlightConfig::from_json(json)?)
    }

    /// Switch the active language; returns true when the id changed
    #[wasm_bindgen(js_name = setLanguage)]
    pub fn set_language(&mut self, language_id: &str) -> Result<bool, JsValue> {
        Ok(self.inner.set_language(language_id)?)
    }

    #[wasm_bindgen(js_name = isSupported)]
    pub fn is_supported(&self) -> bool {
        self.inner.profile().is_supported
    }

    #[wasm_bindgen(js_name = languageId)]
    pub fn language_id(&self) -> Option<String> {
        self.inner.language_id().map(str::to_string)
    }

    #[wasm_bindgen(js_name = tagCount)]
    pub fn tag_count(&self) -> usize {
        self.inner.registry().len()
    }

    /// Run one scan cycle; returns `{ decorations, stats }`
    #[wasm_bindgen]
    pub fn scan(&self, text: &str) -> Result<JsValue, JsValue> {
        let start = now_ms();
        let mut output = self.inner.scan(text);
        output.stats.total_time_ms = now_ms() - start;

        // Plain objects rather than ES Maps: the style record is flattened
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        output.serialize(&serializer).map_err(|e| {
            logging::error(&format!("[CommentHighlighter] Serialization failed: {:?}", e));
            JsValue::from_str(&format!("Serialization error: {}", e))
        })
    }

    /// Status snapshot as a JSON string
    #[wasm_bindgen(js_name = getStatus)]
    pub fn get_status(&self) -> String {
        self.status_json().to_string()
    }
}

impl CommentHighlighter {
    fn from_config(config: HighlightConfig) -> Result<CommentHighlighter, JsValue> {
        let inner = HighlightSession::new(config).map_err(|e| {
            logging::error(&format!("[CommentHighlighter] {}", e));
            JsValue::from(e)
        })?;

        logging::log(&format!(
            "[CommentHighlighter] Ready ({} tags)",
            inner.registry().len()
        ));

        Ok(Self { inner })
    }

    fn status_json(&self) -> serde_json::Value {
        let config = self.inner.config();
        serde_json::json!({
            "languageId": self.inner.language_id(),
            "profile": self.inner.profile(),
            "tags": self.inner.registry().tags().iter().map(|t| t.literal.as_str()).collect::<Vec<_>>(),
            "config": {
                "multilineComments": config.multiline_comments,
                "docComments": config.doc_comments,
                "highlightPlainText": config.highlight_plain_text,
                "offsetEncoding": config.offset_encoding,
            }
        })
    }
}

/// Pattern-safe form of a tag literal, as the scanner embeds it
#[wasm_bindgen(js_name = escapeTagLiteral)]
pub fn escape_tag_literal(literal: &str) -> String {
    escape_literal(literal)
}

#[cfg(test)]
mod tests {
    use super::*;

    // JsValue-returning methods need a JS host; these cover the Rust side.

    #[test]
    fn test_status_json() {
        let mut highlighter = CommentHighlighter {
            inner: HighlightSession::new(HighlightConfig::default()).unwrap(),
        };
        highlighter.inner.set_language("lua").unwrap();

        let status = highlighter.status_json();
        assert_eq!(status["languageId"], "lua");
        assert_eq!(status["profile"]["singleLineDelimiter"], "--");
        assert_eq!(status["tags"][3], "todo");
        assert_eq!(status["config"]["offsetEncoding"], "utf16");
        assert!(highlighter.is_supported());
        assert_eq!(highlighter.tag_count(), 5);
    }

    #[test]
    fn test_escape_export() {
        assert_eq!(escape_tag_literal("?"), r"\?");
    }
}
