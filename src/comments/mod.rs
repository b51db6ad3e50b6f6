//! Annotated comment scanning
//!
//! - `tags.rs` - TagRegistry: configured markers, escaping, lookup
//! - `language.rs` - DelimiterResolver: language id → comment profile
//! - `pattern.rs` - PatternBuilder: line and block expressions
//! - `scanner.rs` - CommentScanner: line pass and two-phase block pass
//! - `dispatch.rs` - RenderDispatcher: per-tag ranges → host decorations
//! - `session.rs` - HighlightSession: one full scan cycle
//! - `wasm.rs` - CommentHighlighter: JavaScript entry point

pub mod config;
pub mod dispatch;
pub mod error;
pub mod language;
pub mod offsets;
pub mod pattern;
pub mod scanner;
pub mod session;
pub mod tags;
pub mod wasm;

pub use config::{HighlightConfig, OffsetEncoding, TagConfig};
pub use dispatch::{Decoration, DecorationRange, StyleDescriptor};
pub use error::CommentError;
pub use language::{resolve, resolve_with, LanguageProfile};
pub use offsets::{LineIndex, Position};
pub use scanner::{RangeBuffers, TextRange};
pub use session::{CycleOutput, HighlightSession, ScanStats};
pub use tags::{escape_literal, Tag, TagRegistry, TagStyle};
pub use wasm::CommentHighlighter;
