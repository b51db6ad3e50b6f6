//! HighlightSession - One configured scanner bound to the active language
//!
//! Owns the registry and the compiled patterns. Block patterns depend only on
//! the tags and are built once; the line pattern is rebuilt only when the
//! active language changes. `scan` runs a full cycle (line pass, block passes,
//! flush) with buffers local to that call.

use regex::Regex;
use serde::Serialize;

use super::config::HighlightConfig;
use super::dispatch::{flush, Decoration};
use super::error::CommentError;
use super::language::{resolve_with, LanguageProfile};
use super::offsets::LineIndex;
use super::pattern::{build_for_profile, build_multiline, build_plain_text, build_single_line, BlockPatterns};
use super::scanner::{scan_multiline, scan_single_line, RangeBuffers};
use super::tags::TagRegistry;
use crate::logging;

/// Counters for one cycle
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    pub text_length: usize,
    pub line_count: usize,
    pub single_line_matches: usize,
    pub block_matches: usize,
    /// No tag literal occurs in the text, so no pattern ran
    pub prefiltered: bool,
    /// Filled in by the WASM facade, which has a clock
    pub total_time_ms: f64,
}

/// Output of one scan cycle
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CycleOutput {
    pub decorations: Vec<Decoration>,
    pub stats: ScanStats,
}

pub struct HighlightSession {
    config: HighlightConfig,
    registry: TagRegistry,
    plain_blocks: BlockPatterns,
    doc_blocks: BlockPatterns,
    language_id: Option<String>,
    profile: LanguageProfile,
    line_pattern: Option<Regex>,
}

impl HighlightSession {
    /// Build registry and patterns. Every configuration error surfaces here.
    pub fn new(config: HighlightConfig) -> Result<Self, CommentError> {
        let registry = TagRegistry::build(&config.tags)?;

        // Delimiters are fixed and escaped, so if the alternation compiles
        // behind one delimiter it compiles behind all of them.
        build_single_line("//", &registry)?;
        build_plain_text(&registry)?;

        let plain_blocks = build_multiline(&registry, false)?;
        let doc_blocks = build_multiline(&registry, true)?;

        Ok(Self {
            config,
            registry,
            plain_blocks,
            doc_blocks,
            language_id: None,
            profile: LanguageProfile::unsupported(),
            line_pattern: None,
        })
    }

    /// Switch the active language. Returns false (and keeps the compiled
    /// pattern) when the id is unchanged.
    pub fn set_language(&mut self, language_id: &str) -> Result<bool, CommentError> {
        if self.language_id.as_deref() == Some(language_id) {
            return Ok(false);
        }

        let profile = resolve_with(language_id, &self.config);
        let line_pattern = build_for_profile(&profile, &self.registry)?;

        if !profile.is_supported {
            logging::log(&format!(
                "[CommentHighlighter] Language '{}' not supported; scanning disabled",
                language_id
            ));
        }

        self.language_id = Some(language_id.to_string());
        self.profile = profile;
        self.line_pattern = line_pattern;
        Ok(true)
    }

    /// Run one full cycle over `text`
    pub fn scan(&self, text: &str) -> CycleOutput {
        let mut buffers = RangeBuffers::for_registry(&self.registry);
        let index = LineIndex::new(text, self.config.offset_encoding);

        let mut stats = ScanStats {
            text_length: text.len(),
            line_count: index.line_count(),
            ..ScanStats::default()
        };

        if self.registry.may_contain_tags(text) {
            if let Some(pattern) = &self.line_pattern {
                stats.single_line_matches =
                    scan_single_line(text, &self.profile, pattern, &self.registry, &mut buffers);
            }

            stats.block_matches =
                scan_multiline(text, &self.profile, &self.plain_blocks, &self.registry, &mut buffers);

            if self.config.doc_comments {
                stats.block_matches +=
                    scan_multiline(text, &self.profile, &self.doc_blocks, &self.registry, &mut buffers);
            }
        } else {
            stats.prefiltered = true;
        }

        CycleOutput {
            decorations: flush(&self.registry, &mut buffers, &index),
            stats,
        }
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    pub fn language_id(&self) -> Option<&str> {
        self.language_id.as_deref()
    }
}
