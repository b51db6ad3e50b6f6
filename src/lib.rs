//! CommentCore: Annotated comment scanner
//!
//! A Rust/WASM engine that finds tagged comments (`// TODO`, `# !`, `/** * ? */`)
//! in raw document text and returns per-tag ranges for an editor to style.
//!
//! # Architecture
//! - `comments/tags.rs` - TagRegistry: configured markers and their styles
//! - `comments/language.rs` - DelimiterResolver: comment syntax per language id
//! - `comments/pattern.rs` - PatternBuilder: line and block expressions
//! - `comments/scanner.rs` - CommentScanner: the matching passes
//! - `comments/dispatch.rs` - RenderDispatcher: ranges → decorations
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { CommentHighlighter } from 'commentcore';
//!
//! await init();
//!
//! const highlighter = new CommentHighlighter({
//!   multilineComments: true,
//!   tags: [{ tag: 'TODO', color: '#FF8C00' }, { tag: '!', color: '#FF2D00' }],
//! });
//!
//! highlighter.setLanguage('typescript');
//! const result = highlighter.scan(source);
//! console.log(result.decorations); // [{ tag, style, ranges }] in tag order
//! console.log(result.stats);       // match counts and timing
//! ```

pub mod comments;
pub mod logging;

pub use comments::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("commentcore v{}", env!("CARGO_PKG_VERSION"))
}
