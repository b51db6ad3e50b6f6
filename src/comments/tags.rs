//! TagRegistry - Configured annotation markers
//!
//! Holds every configured tag in registration order together with its
//! pattern-safe literal and style. Built once from configuration and never
//! mutated afterwards; per-cycle matches live in `RangeBuffers`.
//!
//! # Features
//! - Explicit escaping rule for embedding literals in expressions
//! - Case-insensitive exact lookup (no prefix matching across tags), folding
//!   case exactly as the scanning expressions do
//! - Aho-Corasick prefilter so documents without any literal skip regex work

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use regex::RegexSet;
use serde::{Deserialize, Serialize};

use super::config::TagConfig;
use super::error::CommentError;

// ==================== ESCAPING ====================

/// Characters that carry meaning inside an expression, plus `/`
const PATTERN_METACHARS: &[char] = &[
    '(', ')', '[', '{', '*', '+', '.', '$', '^', '\\', '|', '?', '/',
];

/// Escape pattern metacharacters so `literal` matches itself verbatim.
///
/// `]` and `}` are left alone: with their openers escaped they can never
/// close a class or repetition.
pub fn escape_literal(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len() * 2);
    for c in literal.chars() {
        if PATTERN_METACHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ==================== TYPE DEFINITIONS ====================

/// Visual treatment of a tag, passed through to the host untouched
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagStyle {
    pub color: String,
    pub strikethrough: bool,
    pub underline: bool,
    pub background_color: String,
    pub bold: bool,
    pub italic: bool,
}

impl TagStyle {
    /// CSS-like `text-decoration` value
    pub fn text_decoration(&self) -> String {
        match (self.strikethrough, self.underline) {
            (true, true) => "line-through underline".to_string(),
            (true, false) => "line-through".to_string(),
            (false, true) => "underline".to_string(),
            (false, false) => String::new(),
        }
    }

    pub fn font_weight(&self) -> &'static str {
        if self.bold { "bold" } else { "normal" }
    }

    pub fn font_style(&self) -> &'static str {
        if self.italic { "italic" } else { "normal" }
    }
}

/// A configured annotation marker
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    /// Marker text as written in comments
    pub literal: String,
    /// `literal` with metacharacters escaped
    pub pattern_safe_literal: String,
    pub style: TagStyle,
}

impl Tag {
    fn from_config(index: usize, config: &TagConfig) -> Result<Self, CommentError> {
        let literal = match config.tag.as_deref() {
            Some(literal) if !literal.is_empty() => literal.to_string(),
            _ => return Err(CommentError::MissingLiteral { index }),
        };

        Ok(Self {
            pattern_safe_literal: escape_literal(&literal),
            literal,
            style: TagStyle {
                color: config.color.clone(),
                strikethrough: config.strikethrough,
                underline: config.underline,
                background_color: config.background_color.clone(),
                bold: config.bold,
                italic: config.italic,
            },
        })
    }
}

// ==================== MAIN IMPLEMENTATION ====================

/// Ordered, immutable set of configured tags
#[derive(Debug)]
pub struct TagRegistry {
    tags: Vec<Tag>,
    /// One anchored `(?i)` expression per tag, in registration order
    matchers: RegexSet,
    /// Literal prefilter, present only when every literal is ASCII
    prefilter: Option<AhoCorasick>,
}

impl TagRegistry {
    /// Build the registry from settings, failing on the first invalid tag
    pub fn build(configs: &[TagConfig]) -> Result<Self, CommentError> {
        let tags = configs
            .iter()
            .enumerate()
            .map(|(index, config)| Tag::from_config(index, config))
            .collect::<Result<Vec<_>, _>>()?;

        let matchers = Self::build_matchers(&tags)?;

        // A literal that an earlier tag's matcher accepts would never be reached
        for (second, tag) in tags.iter().enumerate() {
            if let Some(first) = matchers.matches(&tag.literal).iter().find(|&i| i < second) {
                return Err(CommentError::DuplicateTag {
                    literal: tag.literal.clone(),
                    first,
                    second,
                });
            }
        }

        let prefilter = Self::build_prefilter(&tags)?;

        Ok(Self { tags, matchers, prefilter })
    }

    fn build_matchers(tags: &[Tag]) -> Result<RegexSet, CommentError> {
        let patterns: Vec<String> = tags
            .iter()
            .map(|t| format!("(?i)^(?:{})$", t.pattern_safe_literal))
            .collect();

        RegexSet::new(&patterns).map_err(|e| CommentError::InvalidPattern {
            pattern: patterns.join("|"),
            reason: e.to_string(),
        })
    }

    fn build_prefilter(tags: &[Tag]) -> Result<Option<AhoCorasick>, CommentError> {
        if tags.is_empty() || !tags.iter().all(|t| t.literal.is_ascii()) {
            return Ok(None);
        }

        let literals: Vec<&str> = tags.iter().map(|t| t.literal.as_str()).collect();
        let automaton = AhoCorasickBuilder::new()
            .match_kind(MatchKind::LeftmostFirst)
            .ascii_case_insensitive(true)
            .build(&literals)
            .map_err(|e| CommentError::InvalidPattern {
                pattern: literals.join("|"),
                reason: e.to_string(),
            })?;

        Ok(Some(automaton))
    }

    /// Case-insensitive exact lookup, returning the tag's registration index.
    ///
    /// Uses the same Unicode simple case folding as `(?i)` in the scanning
    /// expressions, so anything they capture as a tag is found here.
    pub fn lookup(&self, text: &str) -> Option<(usize, &Tag)> {
        let index = self.matchers.matches(text).iter().next()?;
        self.tags.get(index).map(|tag| (index, tag))
    }

    /// False only when `text` provably contains no tag literal.
    ///
    /// Unicode case folding can match non-ASCII text against ASCII literals
    /// (`ſ` folds to `s`), so non-ASCII documents always report true.
    pub fn may_contain_tags(&self, text: &str) -> bool {
        match &self.prefilter {
            Some(automaton) if text.is_ascii() => automaton.is_match(text),
            Some(_) => true,
            None => !self.tags.is_empty(),
        }
    }

    /// Escaped literals in registration order, for alternation
    pub fn alternation(&self) -> String {
        self.tags
            .iter()
            .map(|t| t.pattern_safe_literal.as_str())
            .collect::<Vec<_>>()
            .join("|")
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.tags.get(index)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

// ==================== TESTS ====================
